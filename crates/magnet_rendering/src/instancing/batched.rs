//! Chunked instanced rendering of the compacted active set.

use magnet_core::{ItemStore, Transform};
use tracing::debug;

use super::buffer::BatchBuffer;
use crate::backend::RenderBackend;
use crate::config::{RenderConfig, DEFAULT_BATCH_SIZE};
use crate::error::RenderResult;
use crate::pipeline::RenderStats;

/// Packs the active set into `ceil(active / batch_size)` instanced calls.
///
/// Each call carries up to `batch_size` model matrices and sprite rects,
/// copied from the store in active-set order.
pub struct BatchedRenderer {
    buffer: BatchBuffer,
    stats: RenderStats,
}

impl BatchedRenderer {
    /// Creates a renderer with the given per-call ceiling.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::InvalidBatchSize`](crate::RenderError::InvalidBatchSize)
    /// for a zero or oversized batch.
    pub fn new(batch_size: usize) -> RenderResult<Self> {
        RenderConfig {
            batch_size,
            ..RenderConfig::default()
        }
        .validate()?;

        Ok(Self {
            buffer: BatchBuffer::new(batch_size),
            stats: RenderStats::default(),
        })
    }

    /// Per-call instance ceiling.
    #[must_use]
    pub const fn batch_size(&self) -> usize {
        self.buffer.capacity()
    }

    /// Submits every index in `active`.
    ///
    /// # Panics
    ///
    /// Panics if an index is outside the store.
    pub fn render<B>(&mut self, store: &ItemStore, active: &[u32], backend: &mut B) -> RenderStats
    where
        B: RenderBackend + ?Sized,
    {
        let positions = store.render_positions();
        let rotations = store.rotations();
        let scales = store.scales();
        let sprite_rects = store.sprite_rects();

        let mut stats = RenderStats::default();
        for batch in active.chunks(self.buffer.capacity()) {
            self.buffer.clear();
            for &index in batch {
                let i = index as usize;
                let pose = Transform::new(positions[i], rotations[i], scales[i]);
                let packed = self.buffer.push(&pose, sprite_rects[i]);
                debug_assert!(packed, "batch exceeded buffer capacity");
            }

            backend.draw_instanced(self.buffer.transforms(), self.buffer.sprite_rects());
            stats.draw_calls += 1;
            stats.instances += self.buffer.len();
            stats.bytes_uploaded += self.buffer.byte_len();
        }

        debug!(
            draw_calls = stats.draw_calls,
            instances = stats.instances,
            "batched render"
        );
        self.stats = stats;
        stats
    }

    /// Statistics from the last frame.
    #[must_use]
    pub const fn stats(&self) -> RenderStats {
        self.stats
    }
}

impl Default for BatchedRenderer {
    fn default() -> Self {
        Self {
            buffer: BatchBuffer::new(DEFAULT_BATCH_SIZE),
            stats: RenderStats::default(),
        }
    }
}
