//! # MAGNET Frame Loop
//!
//! ```text
//! Frame N:
//! ┌─────────────────────────────────────────────────────────────────┐
//! │ 1. INPUT      poll the input source                             │
//! │ 2. PLAYER     move the chase target, clamp to the view          │
//! │ 3. SIMULATE   parallel update → compact → reclaim   (joined)    │
//! │ 4. RENDER     active set / live range → backend                 │
//! │ 5. HUD        "{active}/{capacity}"                             │
//! │ 6. SPAWN      scheduler decides, simulation activates slots     │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Spawns land after rendering, so they are always applied between two
//! update passes and never while one is running.

use std::time::{Duration, Instant};

use magnet_core::{Rect2, Simulation, SpawnScheduler};
use magnet_rendering::{RenderBackend, Renderer};
use tracing::{debug, info, warn};

use crate::config::DemoConfig;
use crate::error::HostResult;
use crate::hud;
use crate::input::InputSource;
use crate::player::Player;

/// Timing and counters for one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameTimings {
    /// Frame number.
    pub frame: u64,
    /// Total frame time in microseconds.
    pub total_us: u64,
    /// Simulation step in microseconds (update + compact + reclaim).
    pub simulate_us: u64,
    /// Render submission in microseconds.
    pub render_us: u64,
    /// Spawn scheduling and activation in microseconds.
    pub spawn_us: u64,
    /// Items activated at the end of this frame.
    pub spawned: usize,
    /// Items collected this frame.
    pub collected: usize,
    /// Live items after the update pass.
    pub active: usize,
    /// Backend calls issued.
    pub draw_calls: u32,
}

/// Accumulated frame timings over a run.
#[derive(Clone, Debug)]
pub struct RunSummary {
    /// Frames recorded.
    pub frames: u64,
    /// Sum of total frame times.
    pub total_us_sum: u64,
    /// Sum of simulation step times.
    pub simulate_us_sum: u64,
    /// Sum of render times.
    pub render_us_sum: u64,
    /// Fastest frame.
    pub min_frame_us: u64,
    /// Slowest frame.
    pub max_frame_us: u64,
    /// Frames that exceeded the budget.
    pub frames_over_budget: u64,
    /// Items spawned over the run.
    pub spawned: usize,
    /// Items collected over the run.
    pub collected: usize,
    /// Largest active count seen.
    pub peak_active: usize,
}

impl RunSummary {
    /// Creates an empty summary.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            frames: 0,
            total_us_sum: 0,
            simulate_us_sum: 0,
            render_us_sum: 0,
            min_frame_us: u64::MAX,
            max_frame_us: 0,
            frames_over_budget: 0,
            spawned: 0,
            collected: 0,
            peak_active: 0,
        }
    }

    /// Records one frame.
    pub fn record(&mut self, timings: &FrameTimings, over_budget: bool) {
        self.frames += 1;
        self.total_us_sum += timings.total_us;
        self.simulate_us_sum += timings.simulate_us;
        self.render_us_sum += timings.render_us;
        self.min_frame_us = self.min_frame_us.min(timings.total_us);
        self.max_frame_us = self.max_frame_us.max(timings.total_us);
        self.spawned += timings.spawned;
        self.collected += timings.collected;
        self.peak_active = self.peak_active.max(timings.active);
        if over_budget {
            self.frames_over_budget += 1;
        }
    }

    /// Average frame time in milliseconds.
    #[must_use]
    pub fn avg_frame_ms(&self) -> f64 {
        if self.frames == 0 {
            return 0.0;
        }
        (self.total_us_sum as f64 / self.frames as f64) / 1000.0
    }

    /// Average simulation step in milliseconds.
    #[must_use]
    pub fn avg_simulate_ms(&self) -> f64 {
        if self.frames == 0 {
            return 0.0;
        }
        (self.simulate_us_sum as f64 / self.frames as f64) / 1000.0
    }
}

impl Default for RunSummary {
    fn default() -> Self {
        Self::new()
    }
}

/// Owns a session and drives it one frame at a time.
pub struct FrameLoop<I, B> {
    simulation: Simulation,
    renderer: Renderer,
    scheduler: SpawnScheduler,
    player: Player,
    input: I,
    backend: B,
    view: Rect2,
    budget: Duration,
    hud_label: String,
    frame: u64,
    elapsed: f32,
    summary: RunSummary,
}

impl<I, B> FrameLoop<I, B>
where
    I: InputSource,
    B: RenderBackend,
{
    /// Builds every subsystem from `config`.
    ///
    /// # Errors
    ///
    /// Fails if any section of `config` is invalid or the worker pool cannot
    /// start.
    pub fn new(config: &DemoConfig, input: I, backend: B) -> HostResult<Self> {
        config.validate()?;

        let simulation = Simulation::new(config.simulation.clone())?;
        let renderer = Renderer::new(&config.render)?;
        let hud_label = hud::counter_label(0, simulation.capacity());

        info!(
            view = ?config.view(),
            spawn = ?config.spawn,
            budget_ms = config.frame_budget_ms,
            "frame loop ready"
        );

        Ok(Self {
            simulation,
            renderer,
            scheduler: SpawnScheduler::new(config.spawn),
            player: Player::new(&config.player),
            input,
            backend,
            view: config.view(),
            budget: Duration::from_secs_f32(config.frame_budget_ms.max(0.0) / 1000.0),
            hud_label,
            frame: 0,
            elapsed: 0.0,
            summary: RunSummary::new(),
        })
    }

    /// Runs one frame of `delta_time` seconds.
    pub fn run_frame(&mut self, delta_time: f32) -> FrameTimings {
        let frame_start = Instant::now();

        let input = self.input.poll(self.frame, self.elapsed);
        self.player.update(input.movement, delta_time, self.view);

        let started = Instant::now();
        self.simulation.step(self.player.target(), delta_time);
        let simulate_us = elapsed_us(started);

        let started = Instant::now();
        let render = self.renderer.render(
            self.simulation.store(),
            self.simulation.active_indices(),
            self.simulation.high_water_mark(),
            &mut self.backend,
        );
        let render_us = elapsed_us(started);

        let active = self.simulation.active_count();
        hud::write_counter(&mut self.hud_label, active, self.simulation.capacity());

        let started = Instant::now();
        let requested = self.scheduler.tick(delta_time, input.spawn);
        let spawned = if requested > 0 {
            self.simulation.spawn(requested, self.view)
        } else {
            0
        };
        let spawn_us = elapsed_us(started);

        let timings = FrameTimings {
            frame: self.frame,
            total_us: elapsed_us(frame_start),
            simulate_us,
            render_us,
            spawn_us,
            spawned,
            collected: self.simulation.stats().deactivated,
            active,
            draw_calls: render.draw_calls,
        };

        let over_budget = frame_start.elapsed() > self.budget;
        if over_budget {
            warn!(
                frame = self.frame,
                total_ms = timings.total_us as f64 / 1000.0,
                budget_ms = self.budget.as_secs_f64() * 1000.0,
                "frame exceeded budget"
            );
        }
        debug!(frame = self.frame, label = %self.hud_label, spawned, "frame done");

        self.summary.record(&timings, over_budget);
        self.frame += 1;
        self.elapsed += delta_time;
        timings
    }

    /// Runs `frames` fixed-length frames and returns the accumulated summary.
    pub fn run(&mut self, frames: u64, delta_time: f32) -> &RunSummary {
        for _ in 0..frames {
            self.run_frame(delta_time);
        }
        &self.summary
    }

    /// The simulation.
    #[must_use]
    pub const fn simulation(&self) -> &Simulation {
        &self.simulation
    }

    /// The chase target.
    #[must_use]
    pub const fn player(&self) -> &Player {
        &self.player
    }

    /// The backend.
    #[must_use]
    pub const fn backend(&self) -> &B {
        &self.backend
    }

    /// Current HUD text.
    #[must_use]
    pub fn hud_label(&self) -> &str {
        &self.hud_label
    }

    /// Frames run so far.
    #[must_use]
    pub const fn frame(&self) -> u64 {
        self.frame
    }

    /// Accumulated timings.
    #[must_use]
    pub const fn summary(&self) -> &RunSummary {
        &self.summary
    }
}

#[inline]
fn elapsed_us(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_accumulates() {
        let mut summary = RunSummary::new();
        let timings = FrameTimings {
            total_us: 2000,
            simulate_us: 1000,
            active: 7,
            spawned: 3,
            ..FrameTimings::default()
        };
        summary.record(&timings, false);
        let slow = FrameTimings {
            total_us: 4000,
            ..timings
        };
        summary.record(&slow, true);

        assert_eq!(summary.frames, 2);
        assert!((summary.avg_frame_ms() - 3.0).abs() < 1e-9);
        assert!((summary.avg_simulate_ms() - 1.0).abs() < 1e-9);
        assert_eq!(summary.min_frame_us, 2000);
        assert_eq!(summary.max_frame_us, 4000);
        assert_eq!(summary.frames_over_budget, 1);
        assert_eq!(summary.spawned, 6);
        assert_eq!(summary.peak_active, 7);
    }

    #[test]
    fn test_empty_summary() {
        assert!(RunSummary::default().avg_frame_ms().abs() < f64::EPSILON);
    }
}
