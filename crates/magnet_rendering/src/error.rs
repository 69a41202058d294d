//! Rendering errors.

use thiserror::Error;

/// Errors raised while building a renderer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// Batch size must be at least one instance.
    #[error("batch size must be between 1 and {max}, got {got}")]
    InvalidBatchSize {
        /// Requested size.
        got: usize,
        /// Largest accepted size.
        max: usize,
    },
}

/// Result type for renderer construction.
pub type RenderResult<T> = Result<T, RenderError>;
