//! # MAGNET
//!
//! Host application around the core simulation: a chase target steered by
//! input, a spawn cadence, a HUD counter, and a frame loop that ties them
//! to a render backend.
//!
//! ## Modules
//!
//! - `game_loop`: Frame orchestration and timing
//! - `player`: Chase-target motion
//! - `input`: Input sources, including a scripted one for headless runs
//! - `hud`: Counter label
//! - `config`: One TOML file for the whole session

#![deny(missing_docs)]

pub mod config;
pub mod error;
pub mod game_loop;
pub mod hud;
pub mod input;
pub mod player;

// Re-export the layers
pub use magnet_core as core;
pub use magnet_rendering as rendering;

pub use config::DemoConfig;
pub use error::{HostError, HostResult};
pub use game_loop::{FrameLoop, FrameTimings, RunSummary};
pub use input::{InputSource, InputState, ScriptConfig, ScriptedInput};
pub use player::{Player, PlayerConfig};
