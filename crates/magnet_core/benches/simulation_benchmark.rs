//! # Simulation Benchmark
//!
//! Frame budget targets at full capacity:
//! - 1,000,000 slots updated per step
//! - Compaction of the whole live range every frame
//!
//! Run with: `cargo bench --package magnet_core`

// Benchmarks don't need docs
#![allow(missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use magnet_core::{ActiveSetCompactor, Rect2, Simulation, SimulationConfig, SlotPolicy, Vec3};

/// Full store capacity.
const ITEM_COUNT: usize = 1_000_000;

const DT: f32 = 1.0 / 60.0;

fn filled(count: usize, policy: SlotPolicy) -> Simulation {
    let mut sim = Simulation::new(SimulationConfig {
        slot_policy: policy,
        ..SimulationConfig::with_capacity(count)
    })
    .unwrap();
    sim.spawn(count, Rect2::centered(50.0, 50.0));
    sim
}

/// Update + compact + reclaim with every slot live and nothing captured.
fn bench_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("step");
    group.sample_size(20);

    for count in [100_000, ITEM_COUNT] {
        let mut sim = filled(count, SlotPolicy::Scan);
        let far = Vec3::new(10_000.0, 10_000.0, 0.0);

        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, _| {
            b.iter(|| {
                sim.step(black_box(far), DT);
                black_box(sim.active_count())
            });
        });
    }

    group.finish();
}

/// Spawning into an empty store, per slot policy.
fn bench_spawn(c: &mut Criterion) {
    let mut group = c.benchmark_group("spawn_100k");
    group.sample_size(20);

    for policy in [SlotPolicy::Scan, SlotPolicy::Pool] {
        let mut sim = Simulation::new(SimulationConfig {
            slot_policy: policy,
            ..SimulationConfig::with_capacity(100_000)
        })
        .unwrap();

        group.bench_function(format!("{policy:?}"), |b| {
            b.iter(|| {
                sim.reset();
                black_box(sim.spawn(100_000, Rect2::centered(50.0, 50.0)))
            });
        });
    }

    group.finish();
}

/// Rescan of a half-live store.
fn bench_compact(c: &mut Criterion) {
    let mut sim = Simulation::new(SimulationConfig::with_capacity(ITEM_COUNT)).unwrap();
    sim.spawn(ITEM_COUNT / 2, Rect2::centered(50.0, 50.0));
    sim.spawn(ITEM_COUNT / 2, Rect2::centered(0.5, 0.5));
    // Collect the half spawned on the target
    for _ in 0..40 {
        sim.step(Vec3::ZERO, DT);
    }
    let mut compactor = ActiveSetCompactor::new(ITEM_COUNT);

    c.bench_function("compact_1M", |b| {
        b.iter(|| {
            black_box(
                compactor
                    .compact(sim.store().states(), sim.high_water_mark())
                    .len(),
            )
        });
    });
}

criterion_group!(benches, bench_step, bench_spawn, bench_compact);
criterion_main!(benches);
