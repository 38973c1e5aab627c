//! Low-level DSP primitives used by the voices and effects.
//!
//! These components allocate only at construction (the delay line's buffer)
//! and are realtime-safe afterwards, making them safe to embed directly
//! inside voice structs. They stay focused on the signal-processing math;
//! the voices and effects layer on parameter mapping and block handling.

/// Power-of-two circular buffer with exact and fractional reads.
pub mod delay;
/// Soft clip and folding curves.
pub mod distortion;
/// Phase-accumulator LFO with phase-offset waveforms.
pub mod lfo;
/// Modulation offset and dry/wet crossfade helpers.
pub mod modulate;
/// Seedable white noise.
pub mod noise;
/// One-pole low-pass / high-pass stage.
pub mod one_pole;
/// Per-block linear parameter ramp.
pub mod ramp;

pub use lfo::{Lfo, LfoWaveform};
pub use ramp::ParamRamp;
