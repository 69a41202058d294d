//! Bulk upload of the whole live range with one procedural draw.
//!
//! Nothing is compacted or chunked: inactive slots are uploaded too and are
//! culled by sitting at the hidden position.

use magnet_core::ItemStore;
use tracing::debug;

use crate::backend::{ProceduralBuffers, RenderBackend};
use crate::pipeline::RenderStats;

/// Issues one draw sized to the high-water mark.
#[derive(Debug, Default)]
pub struct ProceduralRenderer {
    stats: RenderStats,
}

impl ProceduralRenderer {
    /// Creates the renderer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Uploads `[0, high_water_mark)` of every render column and draws it.
    ///
    /// No call is issued while nothing has ever spawned.
    ///
    /// # Panics
    ///
    /// Panics if `high_water_mark` exceeds the store capacity.
    pub fn render<B>(
        &mut self,
        store: &ItemStore,
        high_water_mark: usize,
        backend: &mut B,
    ) -> RenderStats
    where
        B: RenderBackend + ?Sized,
    {
        let mut stats = RenderStats::default();

        if high_water_mark > 0 {
            let buffers = ProceduralBuffers {
                positions: &store.render_positions()[..high_water_mark],
                rotations: &store.rotations()[..high_water_mark],
                scales: &store.scales()[..high_water_mark],
                sprite_rects: &store.sprite_rects()[..high_water_mark],
            };
            backend.draw_procedural(&buffers, high_water_mark);

            stats.draw_calls = 1;
            stats.instances = high_water_mark;
            stats.bytes_uploaded = buffers.byte_len();
        }

        debug!(instances = stats.instances, "procedural render");
        self.stats = stats;
        stats
    }

    /// Statistics from the last frame.
    #[must_use]
    pub const fn stats(&self) -> RenderStats {
        self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::HeadlessBackend;
    use magnet_core::HIDDEN_POSITION;

    #[test]
    fn test_single_call_sized_to_high_water_mark() {
        let store = ItemStore::new(100_000, HIDDEN_POSITION);
        let mut renderer = ProceduralRenderer::new();
        let mut backend = HeadlessBackend::new();

        let stats = renderer.render(&store, 40_000, &mut backend);

        assert_eq!(stats.draw_calls, 1);
        assert_eq!(stats.instances, 40_000);
        assert_eq!(backend.largest_call(), 40_000);
        assert_eq!(stats.bytes_uploaded, 40_000 * 56);
    }

    #[test]
    fn test_nothing_spawned_draws_nothing() {
        let store = ItemStore::new(10, HIDDEN_POSITION);
        let mut backend = HeadlessBackend::new();
        let stats = ProceduralRenderer::new().render(&store, 0, &mut backend);
        assert_eq!(stats.draw_calls, 0);
        assert_eq!(backend.draw_calls(), 0);
    }
}
