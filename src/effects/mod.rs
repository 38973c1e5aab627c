//! Stereo modulation effects that implement [`Effect`](crate::host::Effect).

pub mod autopan;
pub mod bitcrusher;
pub mod tremolo;

pub use autopan::Autopan;
pub use bitcrusher::Bitcrusher;
pub use tremolo::Tremolo;
