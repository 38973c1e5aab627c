//! Benchmarks for LFO waveform evaluation.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use pluck_dsp::dsp::lfo::{Lfo, LfoWaveform};

use crate::BLOCK_SIZES;

pub fn bench_lfo(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/lfo");

    for &size in BLOCK_SIZES {
        let mut output = vec![0.0f32; size * 2];

        for wave in LfoWaveform::ALL {
            let mut lfo = Lfo::new();
            lfo.set_frequency(5.0, 1.0 / 48_000.0);
            let name = format!("{wave:?}_stereo").to_lowercase();

            group.bench_with_input(BenchmarkId::new(name, size), &size, |b, _| {
                b.iter(|| {
                    for frame in output.chunks_exact_mut(2) {
                        lfo.advance();
                        frame[0] = lfo.bipolar(wave);
                        frame[1] = lfo.bipolar_off(wave, black_box(0.25));
                    }
                })
            });
        }
    }

    group.finish();
}
