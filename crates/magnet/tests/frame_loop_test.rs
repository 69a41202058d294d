//! # Frame Loop Tests
//!
//! Whole sessions through the host loop with the headless backend:
//!
//! 1. **Ordering**: spawns land after rendering, never mid-update
//! 2. **Saturation**: the HUD tops out at capacity
//! 3. **Cadence**: interval and burst spawning through the scheduler
//!
//! Run with: cargo test --package magnet --test frame_loop_test

use magnet::core::{SimulationConfig, SpawnModifier, SpawnPolicy, SpawnTrigger, Vec2};
use magnet::rendering::{HeadlessBackend, RenderConfig, RenderStrategy};
use magnet::{DemoConfig, FrameLoop, InputSource, InputState, ScriptConfig, ScriptedInput};

const DT: f32 = 1.0 / 60.0;

/// Holds one fixed input forever.
struct Constant(InputState);

impl InputSource for Constant {
    fn poll(&mut self, _frame: u64, _elapsed: f32) -> InputState {
        self.0
    }
}

fn config(capacity: usize, spawn: SpawnPolicy) -> DemoConfig {
    DemoConfig {
        simulation: SimulationConfig {
            worker_threads: 2,
            ..SimulationConfig::with_capacity(capacity)
        },
        spawn,
        ..DemoConfig::default()
    }
}

fn burst() -> SpawnPolicy {
    SpawnPolicy::Burst {
        cooldown: 0.2,
        count: 1,
    }
}

fn holding(modifier: SpawnModifier) -> Constant {
    Constant(InputState {
        movement: Vec2::ZERO,
        spawn: SpawnTrigger::held(modifier),
    })
}

// ============================================================================
// ORDERING
// ============================================================================

#[test]
fn verify_spawns_render_on_the_next_frame() {
    let mut frame_loop = FrameLoop::new(
        &config(1_000, burst()),
        holding(SpawnModifier::Ten),
        HeadlessBackend::new(),
    )
    .unwrap();

    let first = frame_loop.run_frame(DT);
    assert_eq!(first.spawned, 10);
    assert_eq!(first.active, 0);
    assert_eq!(first.draw_calls, 0);

    let second = frame_loop.run_frame(DT);
    assert_eq!(second.draw_calls, 1);
    assert_eq!(frame_loop.backend().instances(), second.active as u64);
}

// ============================================================================
// SATURATION
// ============================================================================

#[test]
fn verify_hud_tops_out_at_capacity() {
    let mut demo = config(150, burst());
    // Keep the player parked in a corner, away from most spawns
    demo.player.start = Vec2::new(-8.0, -4.5);
    let mut frame_loop = FrameLoop::new(
        &demo,
        holding(SpawnModifier::Hundred),
        HeadlessBackend::new(),
    )
    .unwrap();

    for _ in 0..120 {
        let timings = frame_loop.run_frame(DT);
        assert!(timings.active <= 150);
        assert!(frame_loop.simulation().active_count() <= 150);
    }

    let label = frame_loop.hud_label();
    let (active, capacity) = label.split_once('/').unwrap();
    assert_eq!(capacity, "150");
    assert!(active.parse::<usize>().unwrap() <= 150);
}

// ============================================================================
// CADENCE
// ============================================================================

#[test]
fn verify_interval_spawning() {
    let demo = config(10_000, SpawnPolicy::Interval {
        interval: 0.5,
        count: 100,
    });
    let idle = Constant(InputState::default());
    let mut frame_loop = FrameLoop::new(&demo, idle, HeadlessBackend::new()).unwrap();

    // 0.5 s at a fixed quarter-second step: every second frame
    let spawned: Vec<usize> = (0..6).map(|_| frame_loop.run_frame(0.25).spawned).collect();
    assert_eq!(spawned, [0, 100, 0, 100, 0, 100]);
}

#[test]
fn verify_scripted_session_collects_items() {
    let demo = DemoConfig {
        frames: 300,
        render: RenderConfig {
            strategy: RenderStrategy::Procedural,
            ..RenderConfig::default()
        },
        script: ScriptConfig {
            modifier: SpawnModifier::Ten,
            ..ScriptConfig::default()
        },
        ..config(50_000, burst())
    };
    let input = ScriptedInput::new(demo.script);
    let mut frame_loop = FrameLoop::new(&demo, input, HeadlessBackend::new()).unwrap();

    let summary = frame_loop
        .run(demo.frames, demo.fixed_delta_time)
        .clone();

    assert_eq!(summary.frames, 300);
    assert!(summary.spawned > 0);
    assert!(
        summary.collected > 0,
        "the orbiting player should collect something"
    );
    assert_eq!(
        frame_loop.simulation().active_count(),
        summary.spawned - summary.collected
    );
    assert_eq!(frame_loop.frame(), 300);
}

#[test]
fn verify_invalid_config_rejected() {
    let demo = DemoConfig {
        fixed_delta_time: -1.0,
        ..DemoConfig::default()
    };
    let result = FrameLoop::new(
        &demo,
        Constant(InputState::default()),
        HeadlessBackend::new(),
    );
    assert!(result.is_err());
}
