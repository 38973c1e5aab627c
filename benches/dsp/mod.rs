//! Benchmarks for low-level DSP primitives.

mod delay;
mod distortion;
mod lfo;
mod one_pole;
mod ramp;

pub use delay::bench_delay;
pub use distortion::bench_distortion;
pub use lfo::bench_lfo;
pub use one_pole::bench_one_pole;
pub use ramp::bench_ramp;
