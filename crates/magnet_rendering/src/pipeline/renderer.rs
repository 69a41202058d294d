//! Strategy dispatch.

use magnet_core::ItemStore;
use tracing::info;

use crate::backend::RenderBackend;
use crate::config::{RenderConfig, RenderStrategy};
use crate::error::RenderResult;
use crate::instancing::{BatchedRenderer, ProceduralRenderer};

use super::RenderStats;

/// The renderer selected by [`RenderConfig::strategy`].
pub enum Renderer {
    /// Chunked instanced calls over the active set.
    Batched(BatchedRenderer),
    /// One procedural call over the live range.
    Procedural(ProceduralRenderer),
}

impl Renderer {
    /// Builds the configured renderer.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::InvalidBatchSize`](crate::RenderError::InvalidBatchSize)
    /// for a bad batch size, whichever strategy is selected.
    pub fn new(config: &RenderConfig) -> RenderResult<Self> {
        config.validate()?;

        let renderer = match config.strategy {
            RenderStrategy::Batched => Self::Batched(BatchedRenderer::new(config.batch_size)?),
            RenderStrategy::Procedural => Self::Procedural(ProceduralRenderer::new()),
        };
        info!(
            strategy = ?config.strategy,
            batch_size = config.batch_size,
            "renderer initialized"
        );
        Ok(renderer)
    }

    /// Active strategy.
    #[must_use]
    pub const fn strategy(&self) -> RenderStrategy {
        match self {
            Self::Batched(_) => RenderStrategy::Batched,
            Self::Procedural(_) => RenderStrategy::Procedural,
        }
    }

    /// Draws one frame.
    ///
    /// `active` feeds the batched path, `high_water_mark` the procedural one.
    pub fn render<B>(
        &mut self,
        store: &ItemStore,
        active: &[u32],
        high_water_mark: usize,
        backend: &mut B,
    ) -> RenderStats
    where
        B: RenderBackend + ?Sized,
    {
        match self {
            Self::Batched(renderer) => renderer.render(store, active, backend),
            Self::Procedural(renderer) => renderer.render(store, high_water_mark, backend),
        }
    }

    /// Statistics from the last frame.
    #[must_use]
    pub const fn stats(&self) -> RenderStats {
        match self {
            Self::Batched(renderer) => renderer.stats(),
            Self::Procedural(renderer) => renderer.stats(),
        }
    }
}
