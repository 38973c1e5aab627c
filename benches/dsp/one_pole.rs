//! Benchmarks for the one-pole filter.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use pluck_dsp::dsp::one_pole::OnePole;

use crate::BLOCK_SIZES;

pub fn bench_one_pole(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/one_pole");

    for &size in BLOCK_SIZES {
        let input: Vec<f32> = (0..size)
            .map(|i| (i as f32 / size as f32) * 2.0 - 1.0)
            .collect();
        let mut buffer = input.clone();
        let mut filter = OnePole::with_pole(0.9);

        group.bench_with_input(BenchmarkId::new("render", size), &size, |b, _| {
            b.iter(|| {
                buffer.copy_from_slice(&input);
                filter.render(black_box(&mut buffer))
            })
        });
    }

    group.finish();
}
