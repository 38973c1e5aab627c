//! Benchmarks for the stereo effects.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use pluck_dsp::{
    effects::{Autopan, Bitcrusher, Tremolo},
    host::{Effect, FxParam},
    io::converter::f32_to_q31,
    SAMPLE_RATE,
};

use crate::BLOCK_SIZES;

fn effects() -> Vec<Box<dyn Effect>> {
    let mut crusher = Bitcrusher::new(SAMPLE_RATE);
    crusher.set_param(FxParam::Time.index(), f32_to_q31(0.15));
    crusher.set_param(FxParam::Depth.index(), f32_to_q31(0.3));

    let mut tremolo = Tremolo::new(SAMPLE_RATE);
    tremolo.set_param(FxParam::Depth.index(), f32_to_q31(0.5));

    let mut autopan = Autopan::new(SAMPLE_RATE);
    autopan.set_param(FxParam::Time.index(), f32_to_q31(0.33));

    vec![Box::new(crusher), Box::new(tremolo), Box::new(autopan)]
}

pub fn bench_effects(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/effects");

    for &size in BLOCK_SIZES {
        let input: Vec<f32> = (0..size * 2).map(|i| (i as f32 * 0.013).sin()).collect();
        let mut output = vec![0.0f32; size * 2];

        for mut fx in effects() {
            group.bench_with_input(BenchmarkId::new(fx.name(), size), &size, |b, &size| {
                b.iter(|| fx.process_block(black_box(&input), &mut output, size))
            });
        }
    }

    group.finish();
}
