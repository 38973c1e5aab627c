//! Sound sources that implement [`Oscillator`](crate::host::Oscillator).
//!
//! # Example
//!
//! ```
//! use pluck_dsp::host::{CycleParams, Oscillator, Pitch};
//! use pluck_dsp::voices::PluckedString;
//!
//! let mut voice = PluckedString::new(48_000.0);
//! voice.note_on(Pitch::new(45, 0));
//!
//! let cycle = CycleParams { pitch: Pitch::new(45, 0), shape_lfo: 0.0 };
//! let mut block = [0.0f32; 128];
//! voice.process_block(&cycle, &mut block, 64);
//! assert!(block.iter().any(|s| *s != 0.0));
//! ```

mod pluck;
mod vdpol;
mod wavefolder;

pub use pluck::PluckedString;
pub use vdpol::{rk4_step, VanDerPol};
pub use wavefolder::Wavefolder;
