//! # Parallel Driver
//!
//! Fork-join fan-out of the update kernel over `[0, high_water_mark)`.
//!
//! ## Ownership model
//!
//! The frame loop owns the store. For the update phase it splits every
//! column into a prefix slice and zips them, so each worker task receives
//! `&mut` to exactly one row per index. Rayon never hands the same index to
//! two tasks, so no locks are needed. [`ParallelDriver::run`] returns only
//! after every index is done: later phases never see a half-updated store.

use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use tracing::info;

use crate::ecs::{ItemRowMut, ItemStore};
use crate::error::SimulationResult;
use crate::kernel::{update_item, FrameParams};

/// Runs the update kernel over the live range on a dedicated worker pool.
pub struct ParallelDriver {
    pool: ThreadPool,
    chunk_size: usize,
}

impl ParallelDriver {
    /// Starts a worker pool.
    ///
    /// * `worker_threads` - 0 picks one thread per core
    /// * `chunk_size` - minimum indices per task; trades dispatch overhead
    ///   against load balance
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError::WorkerPool`](crate::SimulationError::WorkerPool)
    /// if the threads cannot be spawned.
    pub fn new(worker_threads: usize, chunk_size: usize) -> SimulationResult<Self> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(worker_threads)
            .thread_name(|i| format!("magnet-update-{i}"))
            .build()?;

        info!(
            threads = pool.current_num_threads(),
            chunk_size, "update worker pool started"
        );

        Ok(Self {
            pool,
            chunk_size: chunk_size.max(1),
        })
    }

    /// Number of worker threads.
    #[must_use]
    pub fn worker_count(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Minimum indices per task.
    #[must_use]
    pub const fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Updates every slot in `[0, high_water_mark)` and blocks until all are done.
    ///
    /// # Panics
    ///
    /// Panics if `high_water_mark` exceeds the store capacity.
    pub fn run(&self, store: &mut ItemStore, high_water_mark: usize, frame: &FrameParams) {
        let columns = store.columns_mut(high_water_mark);
        if columns.is_empty() {
            return;
        }
        let chunk_size = self.chunk_size;

        self.pool.install(|| {
            (
                columns.states.par_iter_mut(),
                columns.positions.par_iter_mut(),
                columns.animations.par_iter_mut(),
                columns.sprite_rects.par_iter_mut(),
                columns.render_positions.par_iter_mut(),
                columns.rotations.par_iter_mut(),
                columns.scales.par_iter_mut(),
            )
                .into_par_iter()
                .with_min_len(chunk_size)
                .for_each(
                    |(state, position, animation, sprite_rect, render_position, rotation, scale)| {
                        let mut row = ItemRowMut {
                            state,
                            position,
                            animation,
                            sprite_rect,
                            render_position,
                            rotation,
                            scale,
                        };
                        let next = update_item(row.load(), frame);
                        row.store(&next);
                    },
                );
        });
    }

    /// Single-threaded reference pass with identical semantics.
    ///
    /// # Panics
    ///
    /// Panics if `high_water_mark` exceeds the store capacity.
    pub fn run_sequential(store: &mut ItemStore, high_water_mark: usize, frame: &FrameParams) {
        let mut columns = store.columns_mut(high_water_mark);
        for index in 0..columns.len() {
            let mut row = columns.row(index);
            let next = update_item(row.load(), frame);
            row.store(&next);
        }
    }
}
