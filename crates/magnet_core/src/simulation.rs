//! # Simulation
//!
//! Owns the store and every per-frame stage, and exposes them as explicit
//! calls for a host frame loop:
//!
//! ```text
//! host                      Simulation
//! ────                      ──────────
//! spawn(n, bounds) ───────► allocate slot ─► roll item ─► write row
//! step(target, dt) ───────► 1. parallel update over [0, hwm)   (join)
//!                           2. rescan active set               (barrier)
//!                           3. reclaim deactivated slots
//! active_indices() ◄─────── ascending live indices
//! ```

use std::time::Instant;

use tracing::{debug, info, trace, warn};

use crate::compact::ActiveSetCompactor;
use crate::config::SimulationConfig;
use crate::ecs::{ItemRecord, ItemStore};
use crate::error::SimulationResult;
use crate::kernel::FrameParams;
use crate::math::{Rect2, Vec3};
use crate::memory::{new_allocator, SlotAllocator};
use crate::parallel::ParallelDriver;
use crate::spawn::ItemSpawner;

/// Per-frame counters, covering everything since the previous [`Simulation::step`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Update pass time in microseconds.
    pub update_us: u64,
    /// Compaction time in microseconds.
    pub compact_us: u64,
    /// Items activated by spawn calls.
    pub spawned: usize,
    /// Spawn requests dropped because every slot was active.
    pub dropped: usize,
    /// Items that finished their pull this frame.
    pub deactivated: usize,
    /// Live items after compaction.
    pub active: usize,
    /// High-water mark the update pass covered.
    pub high_water_mark: usize,
}

/// The collect-to-despawn simulation.
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = Simulation::new(SimulationConfig::with_capacity(10_000))?;
/// sim.spawn(100, Rect2::centered(8.0, 4.5));
/// sim.step(player_position, 1.0 / 60.0);
/// renderer.render(sim.store(), sim.active_indices(), sim.high_water_mark(), &mut backend);
/// ```
pub struct Simulation {
    config: SimulationConfig,
    store: ItemStore,
    slots: Box<dyn SlotAllocator>,
    compactor: ActiveSetCompactor,
    driver: ParallelDriver,
    spawner: ItemSpawner,
    /// Live count, kept current across spawns between steps.
    active_count: usize,
    /// Counters accumulated since the last step.
    pending: FrameStats,
    stats: FrameStats,
    frame: u64,
    saturation_reported: bool,
}

impl Simulation {
    /// Validates `config`, allocates every slot and starts the worker pool.
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError::InvalidConfig`](crate::SimulationError::InvalidConfig)
    /// for a bad config, or
    /// [`SimulationError::WorkerPool`](crate::SimulationError::WorkerPool) if
    /// the worker threads cannot be spawned.
    pub fn new(config: SimulationConfig) -> SimulationResult<Self> {
        config.validate()?;

        let driver = ParallelDriver::new(config.worker_threads, config.update_chunk_size)?;
        let store = ItemStore::new(config.capacity, config.hidden_position);
        let slots = new_allocator(config.slot_policy, config.capacity);

        info!(
            capacity = config.capacity,
            policy = ?config.slot_policy,
            kinds = config.kinds.len(),
            workers = driver.worker_count(),
            "simulation initialized"
        );

        Ok(Self {
            compactor: ActiveSetCompactor::new(config.capacity),
            spawner: ItemSpawner::new(config.seed),
            store,
            slots,
            driver,
            active_count: 0,
            pending: FrameStats::default(),
            stats: FrameStats::default(),
            frame: 0,
            saturation_reported: false,
            config,
        })
    }

    /// Activates up to `count` new items at random positions inside `bounds`.
    ///
    /// Returns how many were actually activated. Requests beyond capacity are
    /// dropped silently; check [`is_saturated`](Self::is_saturated).
    pub fn spawn(&mut self, count: usize, bounds: Rect2) -> usize {
        let mut spawned = 0;

        while spawned < count {
            let grown_to = self.slots.high_water_mark();
            let Some(index) = self.slots.allocate(self.store.states()) else {
                break;
            };
            if index < grown_to {
                trace!(index, "reusing slot");
            }

            let record = self.spawner.roll(&self.config.kinds, bounds);
            self.store.set(index, &record);
            spawned += 1;
        }

        let dropped = count - spawned;
        self.active_count += spawned;
        self.pending.spawned += spawned;
        self.pending.dropped += dropped;

        if dropped > 0 && !self.saturation_reported {
            self.saturation_reported = true;
            warn!(
                capacity = self.capacity(),
                dropped, "item store saturated, dropping spawn requests"
            );
        }

        spawned
    }

    /// Runs one frame: update every slot up to the high-water mark, rebuild
    /// the active set, then return finished slots to the allocator.
    pub fn step(&mut self, target: Vec3, delta_time: f32) {
        let high_water_mark = self.slots.high_water_mark();
        let frame = FrameParams {
            target,
            delta_time,
            pull_duration: self.config.pull_duration,
            collision_radius: self.config.collision_radius(),
            hidden_position: self.config.hidden_position,
        };

        let started = Instant::now();
        self.driver.run(&mut self.store, high_water_mark, &frame);
        let update_us = elapsed_us(started);

        let started = Instant::now();
        let active = self
            .compactor
            .compact(self.store.states(), high_water_mark)
            .len();
        let compact_us = elapsed_us(started);

        self.slots.reclaim(self.store.states());

        let deactivated = self.active_count.saturating_sub(active);
        self.active_count = active;
        self.stats = FrameStats {
            update_us,
            compact_us,
            deactivated,
            active,
            high_water_mark,
            ..self.pending
        };
        self.pending = FrameStats::default();
        self.frame += 1;

        debug!(
            frame = self.frame,
            active,
            high_water_mark,
            spawned = self.stats.spawned,
            deactivated,
            update_us,
            compact_us,
            "simulation step"
        );
    }

    /// Live slot indices in ascending order, as of the last [`step`](Self::step).
    #[inline]
    #[must_use]
    pub fn active_indices(&self) -> &[u32] {
        self.compactor.indices()
    }

    /// Number of live items, including ones spawned since the last step.
    #[inline]
    #[must_use]
    pub const fn active_count(&self) -> usize {
        self.active_count
    }

    /// Hard slot capacity.
    #[inline]
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.store.capacity()
    }

    /// One past the highest slot ever allocated.
    #[inline]
    #[must_use]
    pub fn high_water_mark(&self) -> usize {
        self.slots.high_water_mark()
    }

    /// Returns true once every slot is live.
    #[inline]
    #[must_use]
    pub const fn is_saturated(&self) -> bool {
        self.active_count >= self.store.capacity()
    }

    /// Read-only view of the store.
    #[inline]
    #[must_use]
    pub const fn store(&self) -> &ItemStore {
        &self.store
    }

    /// Reads slot `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= capacity`.
    #[must_use]
    #[track_caller]
    pub fn record(&self, index: usize) -> ItemRecord {
        self.store.get(index)
    }

    /// Counters for the last completed step.
    #[inline]
    #[must_use]
    pub const fn stats(&self) -> &FrameStats {
        &self.stats
    }

    /// Number of completed steps.
    #[inline]
    #[must_use]
    pub const fn frame(&self) -> u64 {
        self.frame
    }

    /// The validated config this simulation was built from.
    #[inline]
    #[must_use]
    pub const fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Update worker threads.
    #[must_use]
    pub fn worker_count(&self) -> usize {
        self.driver.worker_count()
    }

    /// Deactivates every item and forgets all allocations.
    pub fn reset(&mut self) {
        self.store.clear();
        self.slots.reset();
        self.compactor.clear();
        self.active_count = 0;
        self.pending = FrameStats::default();
        self.stats = FrameStats::default();
        self.saturation_reported = false;
        info!(capacity = self.capacity(), "simulation reset");
    }
}

#[inline]
fn elapsed_us(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX)
}
