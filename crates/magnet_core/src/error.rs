//! # Simulation Error Types
//!
//! Errors only arise while building a simulation (bad config, unreadable
//! file, worker pool failure). A running frame never fails: capacity
//! exhaustion is a saturation signal and out-of-range indices are bugs.

use thiserror::Error;

/// Errors that can occur while constructing or configuring a simulation.
#[derive(Error, Debug)]
pub enum SimulationError {
    /// A config value is out of its valid range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The config file could not be read.
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// The config file is not valid TOML for this schema.
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// The update worker pool could not be started.
    #[error("failed to build worker pool: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),
}

/// Result type for simulation construction.
pub type SimulationResult<T> = Result<T, SimulationError>;
