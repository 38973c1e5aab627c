//! Benchmarks for the delay line.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use pluck_dsp::{dsp::delay::DelayLine, DELAY_CAPACITY};

use crate::BLOCK_SIZES;

pub fn bench_delay(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/delay");

    for &size in BLOCK_SIZES {
        let mut line = DelayLine::new(DELAY_CAPACITY);
        let input: Vec<f32> = (0..size).map(|i| (i as f32 * 0.01).sin()).collect();
        let mut output = vec![0.0f32; size];

        // Karplus-Strong access pattern: fractional read then write
        group.bench_with_input(BenchmarkId::new("read_fractional_write", size), &size, |b, _| {
            b.iter(|| {
                for (x, y) in input.iter().zip(output.iter_mut()) {
                    *y = line.read_fractional(black_box(436.36));
                    line.write(*x);
                }
            })
        });

        group.bench_with_input(BenchmarkId::new("read_exact_write", size), &size, |b, _| {
            b.iter(|| {
                for (x, y) in input.iter().zip(output.iter_mut()) {
                    *y = line.read_exact(black_box(436));
                    line.write(*x);
                }
            })
        });
    }

    group.finish();
}
