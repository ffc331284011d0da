//! Criterion benchmarks for the growth curve, the per-frame
//! synchronizer at several pool sizes, and the transient emitter.

#![allow(unused_results)] // criterion builders return &mut Self
#![allow(missing_docs)] // criterion_group! expands to an undocumented fn

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use glade::decor::{Decor, DecorKind};
use glade::emitter::ParticleKind;
use glade::engine::GladeEngine;
use glade::frame::FrameState;
use glade::options::Options;
use glade::util::growth::growth_at;
use glam::Vec3;

const DT: f32 = 1.0 / 60.0;

fn plant_field(engine: &mut GladeEngine, count: usize) {
    for i in 0..count {
        let x = (i % 64) as f32;
        let z = (i / 64) as f32;
        let _ = engine.place(
            Decor::new(DecorKind::Grass { height: 0.5 }).grown(),
            Vec3::new(x, 0.0, z),
        );
    }
}

fn growth_benchmark(c: &mut Criterion) {
    c.bench_function("growth_curve", |b| {
        b.iter(|| black_box(growth_at(black_box(0.65), 0.0)))
    });
}

fn sync_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("frame_sync");

    for count in [100_usize, 1000, 4000] {
        let mut engine = GladeEngine::new(Options::default());
        plant_field(&mut engine, count);
        let frame = FrameState::still(0.0);

        // Steady state: nothing moves, so this measures the walk plus the
        // always-on attribute rewrites, not transform uploads.
        group.bench_function(format!("{count}_decors"), |b| {
            b.iter(|| engine.update(DT, black_box(&frame)))
        });
    }
    group.finish();
}

fn emitter_benchmark(c: &mut Criterion) {
    let mut engine = GladeEngine::new(Options::default());
    let frame = FrameState::still(0.0);

    c.bench_function("transient_burst_and_step", |b| {
        b.iter(|| {
            engine.burst(Vec3::ZERO, ParticleKind::Land);
            engine.update(DT, black_box(&frame));
        })
    });
}

criterion_group!(
    benches,
    growth_benchmark,
    sync_benchmark,
    emitter_benchmark
);
criterion_main!(benches);
