//! Renderer selection and limits.

use serde::{Deserialize, Serialize};

use crate::error::{RenderError, RenderResult};

/// Per-call instance ceiling of the engine backend.
pub const DEFAULT_BATCH_SIZE: usize = 1023;

/// Largest batch a renderer will accept.
pub const MAX_BATCH_SIZE: usize = 1 << 20;

/// How the active set reaches the backend.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderStrategy {
    /// Compacted active set, chunked into instanced calls.
    #[default]
    Batched,
    /// Whole live range uploaded once, one procedural call.
    Procedural,
}

/// Renderer configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Submission strategy.
    pub strategy: RenderStrategy,
    /// Maximum instances per instanced call.
    pub batch_size: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            strategy: RenderStrategy::Batched,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

impl RenderConfig {
    /// Checks the batch size.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::InvalidBatchSize`] if it is zero or above [`MAX_BATCH_SIZE`].
    pub fn validate(&self) -> RenderResult<()> {
        if self.batch_size == 0 || self.batch_size > MAX_BATCH_SIZE {
            return Err(RenderError::InvalidBatchSize {
                got: self.batch_size,
                max: MAX_BATCH_SIZE,
            });
        }
        Ok(())
    }
}
