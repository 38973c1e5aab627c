//! Benchmarks for per-block parameter smoothing.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use pluck_dsp::dsp::ramp::ParamRamp;

use crate::BLOCK_SIZES;

pub fn bench_ramp(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/ramp");

    for &size in BLOCK_SIZES {
        let mut ramp = ParamRamp::new(0.0);
        let mut output = vec![0.0f32; size];
        let mut flip = false;

        group.bench_with_input(BenchmarkId::new("block", size), &size, |b, &size| {
            b.iter(|| {
                flip = !flip;
                ramp.set_target(if flip { 1.0 } else { -1.0 });
                ramp.begin_block(black_box(size));
                for y in output.iter_mut() {
                    *y = ramp.next();
                }
            })
        });
    }

    group.finish();
}
