//! # Submission Tests
//!
//! End-to-end: simulate, compact, render through the headless backend.
//!
//! 1. **Batching**: submissions equal `ceil(active / batch_size)` at full scale
//! 2. **Equivalence**: batched and procedural paths show the same items
//!
//! Run with: cargo test --package magnet_rendering --test submission_test

use magnet_core::{Rect2, Simulation, SimulationConfig, Vec2, Vec3};
use magnet_rendering::{
    BatchedRenderer, HeadlessBackend, InstanceData, ProceduralRenderer, RenderConfig, Renderer,
    RenderStrategy,
};

const DT: f32 = 1.0 / 60.0;

/// Anything below this was parked off-screen.
const VISIBLE_FLOOR: f32 = -5_000.0;

fn visible(instances: &[InstanceData]) -> Vec<InstanceData> {
    let mut visible: Vec<InstanceData> = instances
        .iter()
        .copied()
        .filter(|instance| instance.model.translation().y > VISIBLE_FLOOR)
        .collect();
    visible.sort_by(|a, b| {
        let (a, b) = (a.model.translation(), b.model.translation());
        (a.x, a.y).partial_cmp(&(b.x, b.y)).unwrap()
    });
    visible
}

// ============================================================================
// BATCHING AT SCALE
// ============================================================================

#[test]
fn verify_hundred_thousand_active_in_ninety_eight_calls() {
    let mut sim = Simulation::new(SimulationConfig::default()).unwrap();
    assert_eq!(sim.capacity(), 1_000_000);

    let far = Rect2::new(Vec2::new(100.0, 100.0), Vec2::new(200.0, 200.0));
    assert_eq!(sim.spawn(100_000, far), 100_000);
    sim.step(Vec3::ZERO, DT);
    assert_eq!(sim.active_indices().len(), 100_000);

    let mut renderer = BatchedRenderer::new(1023).unwrap();
    let mut backend = HeadlessBackend::new();
    let stats = renderer.render(sim.store(), sim.active_indices(), &mut backend);

    assert_eq!(stats.draw_calls, 98);
    assert_eq!(backend.draw_calls(), 98);
    assert_eq!(backend.instances(), 100_000);
    assert_eq!(backend.largest_call(), 1023);
}

#[test]
fn verify_submission_bound_holds_every_frame() {
    let mut sim = Simulation::new(SimulationConfig::with_capacity(20_000)).unwrap();
    let mut renderer = Renderer::new(&RenderConfig {
        batch_size: 256,
        ..RenderConfig::default()
    })
    .unwrap();
    let mut backend = HeadlessBackend::new();

    for frame in 0..60 {
        sim.spawn(500, Rect2::centered(3.0, 3.0));
        let angle = frame as f32 * 0.2;
        sim.step(Vec3::new(angle.cos() * 2.0, angle.sin() * 2.0, 0.0), DT);

        let stats = renderer.render(
            sim.store(),
            sim.active_indices(),
            sim.high_water_mark(),
            &mut backend,
        );
        let active = sim.active_indices().len();
        assert_eq!(stats.draw_calls as usize, active.div_ceil(256));
        assert_eq!(stats.instances, active);
    }
}

// ============================================================================
// STRATEGY EQUIVALENCE
// ============================================================================

#[test]
fn verify_batched_and_procedural_show_the_same_items() {
    let config = SimulationConfig {
        kinds: vec![magnet_core::ItemKind {
            randomize_rotation: true,
            ..magnet_core::ItemKind::default()
        }],
        ..SimulationConfig::with_capacity(2_000)
    };
    let mut sim = Simulation::new(config).unwrap();
    sim.spawn(2_000, Rect2::centered(4.0, 4.0));

    // Long enough for items near the target to be collected
    for _ in 0..45 {
        sim.step(Vec3::ZERO, DT);
    }
    assert!(sim.active_count() < 2_000, "nothing was collected");
    assert!(sim.active_count() > 0, "everything was collected");

    let mut batched = Renderer::new(&RenderConfig::default()).unwrap();
    let mut procedural = Renderer::new(&RenderConfig {
        strategy: RenderStrategy::Procedural,
        ..RenderConfig::default()
    })
    .unwrap();
    let mut batched_backend = HeadlessBackend::capturing();
    let mut procedural_backend = HeadlessBackend::capturing();

    batched.render(
        sim.store(),
        sim.active_indices(),
        sim.high_water_mark(),
        &mut batched_backend,
    );
    procedural.render(
        sim.store(),
        sim.active_indices(),
        sim.high_water_mark(),
        &mut procedural_backend,
    );

    // The procedural path uploads collected slots too, parked off-screen
    assert_eq!(procedural_backend.captured().len(), sim.high_water_mark());
    assert_eq!(batched_backend.captured().len(), sim.active_count());

    let from_batched = visible(batched_backend.captured());
    let from_procedural = visible(procedural_backend.captured());
    assert_eq!(from_batched.len(), sim.active_count());
    assert_eq!(from_batched, from_procedural);
}

#[test]
fn verify_procedural_call_count_is_one() {
    let mut sim = Simulation::new(SimulationConfig::with_capacity(50_000)).unwrap();
    sim.spawn(50_000, Rect2::centered(10.0, 10.0));
    sim.step(Vec3::ZERO, DT);

    let mut renderer = ProceduralRenderer::new();
    let mut backend = HeadlessBackend::new();
    let stats = renderer.render(sim.store(), sim.high_water_mark(), &mut backend);

    assert_eq!(stats.draw_calls, 1);
    assert_eq!(stats.instances, 50_000);
}
