//! Benchmarks for the oscillator voices.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use pluck_dsp::{
    host::{CycleParams, OscParam, Oscillator, Pitch},
    voices::{PluckedString, VanDerPol, Wavefolder},
    SAMPLE_RATE,
};

use crate::BLOCK_SIZES;

fn voices() -> Vec<Box<dyn Oscillator>> {
    let mut vdp = VanDerPol::new(SAMPLE_RATE);
    // Relaxation regime costs the same per step but exercises the nonlinearity
    vdp.set_param(OscParam::Shape.index(), 512);

    let mut folder = Wavefolder::new(SAMPLE_RATE);
    folder.set_param(OscParam::Shape.index(), 700);

    vec![
        Box::new(PluckedString::new(SAMPLE_RATE)),
        Box::new(folder),
        Box::new(vdp),
    ]
}

pub fn bench_voices(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/voices");
    let cycle = CycleParams {
        pitch: Pitch::new(45, 0),
        shape_lfo: 0.3,
    };

    for &size in BLOCK_SIZES {
        let mut output = vec![0.0f32; size * 2];

        for mut voice in voices() {
            voice.note_on(cycle.pitch);
            group.bench_with_input(BenchmarkId::new(voice.name(), size), &size, |b, &size| {
                b.iter(|| voice.process_block(black_box(&cycle), &mut output, size))
            });
        }

        // Pluck re-excited every block: burst path plus delay clear
        let mut pluck = PluckedString::new(SAMPLE_RATE);
        group.bench_with_input(BenchmarkId::new("pluck_retrigger", size), &size, |b, &size| {
            b.iter(|| {
                pluck.note_on(cycle.pitch);
                pluck.process_block(black_box(&cycle), &mut output, size)
            })
        });
    }

    group.finish();
}
