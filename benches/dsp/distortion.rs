//! Benchmarks for saturation curves.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use pluck_dsp::dsp::distortion::{rational_clip, sine_fold, soft_clip, SOFT_CLIP_KNEE};

use crate::BLOCK_SIZES;

pub fn bench_distortion(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/distortion");

    for &size in BLOCK_SIZES {
        // Hot signal that spends time past the clip point
        let input: Vec<f32> = (0..size)
            .map(|i| ((i as f32 / size as f32) * 2.0 - 1.0) * 1.5)
            .collect();
        let mut output = vec![0.0f32; size];

        group.bench_with_input(BenchmarkId::new("soft_clip", size), &size, |b, _| {
            b.iter(|| {
                for (x, y) in input.iter().zip(output.iter_mut()) {
                    *y = soft_clip(SOFT_CLIP_KNEE, black_box(*x));
                }
            })
        });

        group.bench_with_input(BenchmarkId::new("rational_clip", size), &size, |b, _| {
            b.iter(|| {
                for (x, y) in input.iter().zip(output.iter_mut()) {
                    *y = rational_clip(SOFT_CLIP_KNEE, black_box(*x));
                }
            })
        });

        group.bench_with_input(BenchmarkId::new("sine_fold", size), &size, |b, _| {
            b.iter(|| {
                for (x, y) in input.iter().zip(output.iter_mut()) {
                    *y = sine_fold(black_box(*x), 2.5);
                }
            })
        });
    }

    group.finish();
}
