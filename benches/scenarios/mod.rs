//! Scenario benchmarks: complete modules as a host would drive them.

mod effects;
mod rack;
mod voices;

pub use effects::bench_effects;
pub use rack::bench_rack;
pub use voices::bench_voices;
