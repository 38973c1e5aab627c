//! Benchmark for the full rack: voice plus every effect enabled.

use std::{collections::VecDeque, hint::black_box};

use criterion::{BenchmarkId, Criterion};
use pluck_dsp::{
    host::{HostMessage, Pitch, Rack},
    RackConfig,
};

use crate::BLOCK_SIZES;

pub fn bench_rack(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/rack");

    for &size in BLOCK_SIZES {
        let config = RackConfig::default().block_size(64).shape_lfo(0.5, 0.2);
        let mut queue = VecDeque::new();
        queue.push_back(HostMessage::NoteOn(Pitch::new(45, 0)));
        for slot in 0..3 {
            queue.push_back(HostMessage::ToggleEffect(slot));
        }
        let mut rack = Rack::standard(&config, queue);
        let mut output = vec![0.0f32; size * 2];

        group.bench_with_input(BenchmarkId::new("pluck_full_chain", size), &size, |b, _| {
            b.iter(|| rack.render(black_box(&mut output)))
        });
    }

    group.finish();
}
