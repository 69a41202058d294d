//! Host error types.

use magnet_core::SimulationError;
use magnet_rendering::RenderError;
use thiserror::Error;

/// Errors raised while setting up a session.
#[derive(Error, Debug)]
pub enum HostError {
    /// Simulation config rejected or worker pool failed.
    #[error(transparent)]
    Simulation(#[from] SimulationError),

    /// Renderer config rejected.
    #[error(transparent)]
    Render(#[from] RenderError),

    /// Demo config file could not be read.
    #[error("failed to read demo config: {0}")]
    Io(#[from] std::io::Error),

    /// Demo config file is not valid TOML for this schema.
    #[error("failed to parse demo config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A host-level config value is out of range.
    #[error("invalid demo configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for host setup.
pub type HostResult<T> = Result<T, HostError>;
