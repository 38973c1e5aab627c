pub mod config;
pub mod dsp;
pub mod effects;
pub mod host; // Callback contract, messaging, rack runner
pub mod io;
pub mod voices; // Oscillator voices (plucked string, wavefolder, Van der Pol)

pub use config::RackConfig;

/// Sample rate the modules assume when none is given.
pub const SAMPLE_RATE: f32 = 48_000.0;
/// Sample rates accepted by the rack and the bitcrusher's step counter.
pub const SAMPLE_RATE_RANGE: (f32, f32) = (8_000.0, 192_000.0);
pub const MAX_BLOCK_SIZE: usize = 2048;

/// Delay capacity of the plucked string. 2048 is too short for the lowest
/// octave at 48 kHz.
pub const DELAY_CAPACITY: usize = 4096;
