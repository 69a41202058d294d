//! # Demo Configuration
//!
//! One TOML file drives a whole session. Every section is optional.
//!
//! ```toml
//! frames = 600
//! fixed_delta_time = 0.016666668
//! log_level = "info"
//!
//! [simulation]
//! capacity = 1000000
//!
//! [render]
//! strategy = "procedural"
//!
//! [spawn]
//! mode = "burst"
//! cooldown = 0.2
//! count = 1
//! ```

use std::path::Path;

use magnet_core::{Rect2, SimulationConfig, SpawnPolicy};
use magnet_rendering::RenderConfig;
use serde::{Deserialize, Serialize};

use crate::error::{HostError, HostResult};
use crate::input::ScriptConfig;
use crate::player::PlayerConfig;

/// Full session configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    /// Frames to run.
    pub frames: u64,
    /// Seconds per frame.
    pub fixed_delta_time: f32,
    /// Frames slower than this are logged, in milliseconds.
    pub frame_budget_ms: f32,
    /// Max tracing level for the binary.
    pub log_level: String,
    /// Half extents of the visible world; player clamp and spawn area.
    pub view_half_extents: [f32; 2],
    /// Core simulation.
    pub simulation: SimulationConfig,
    /// Renderer.
    pub render: RenderConfig,
    /// Spawn cadence.
    pub spawn: SpawnPolicy,
    /// Chase target.
    pub player: PlayerConfig,
    /// Scripted input for headless runs.
    pub script: ScriptConfig,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            frames: 600,
            fixed_delta_time: 1.0 / 60.0,
            frame_budget_ms: 33.0,
            log_level: "info".to_owned(),
            view_half_extents: [8.0, 4.5],
            simulation: SimulationConfig::default(),
            render: RenderConfig::default(),
            spawn: SpawnPolicy::default(),
            player: PlayerConfig::default(),
            script: ScriptConfig::default(),
        }
    }
}

impl DemoConfig {
    /// Visible world rectangle.
    #[must_use]
    pub const fn view(&self) -> Rect2 {
        Rect2::centered(self.view_half_extents[0], self.view_half_extents[1])
    }

    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`HostError::Parse`] for malformed TOML and a config error for
    /// any out-of-range value.
    pub fn from_toml_str(source: &str) -> HostResult<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`HostError::Io`] if the file cannot be read, otherwise the
    /// same errors as [`Self::from_toml_str`].
    pub fn load(path: impl AsRef<Path>) -> HostResult<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    /// Checks every section.
    ///
    /// # Errors
    ///
    /// Returns the first section error found.
    #[allow(clippy::neg_cmp_op_on_partial_ord)] // NaN must fail too
    pub fn validate(&self) -> HostResult<()> {
        self.simulation.validate()?;
        self.render.validate()?;

        if !(self.fixed_delta_time > 0.0 && self.fixed_delta_time.is_finite()) {
            return Err(HostError::InvalidConfig(format!(
                "fixed_delta_time must be finite and positive, got {}",
                self.fixed_delta_time
            )));
        }
        if !(self.frame_budget_ms >= 0.0 && self.frame_budget_ms.is_finite()) {
            return Err(HostError::InvalidConfig(format!(
                "frame_budget_ms must be a finite, non-negative number, got {}",
                self.frame_budget_ms
            )));
        }
        if !self
            .view_half_extents
            .iter()
            .all(|&e| e.is_finite() && e >= 0.0)
        {
            return Err(HostError::InvalidConfig(format!(
                "view_half_extents must be finite and non-negative, got {:?}",
                self.view_half_extents
            )));
        }
        match self.spawn {
            SpawnPolicy::Interval { interval: t, .. } | SpawnPolicy::Burst { cooldown: t, .. }
                if !(t >= 0.0) =>
            {
                Err(HostError::InvalidConfig(format!(
                    "spawn timing must not be negative, got {t}"
                )))
            }
            _ => Ok(()),
        }
    }

    /// Parsed [`log_level`](Self::log_level), falling back to INFO.
    #[must_use]
    pub fn tracing_level(&self) -> tracing::Level {
        self.log_level.parse().unwrap_or(tracing::Level::INFO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use magnet_core::SlotPolicy;
    use magnet_rendering::RenderStrategy;

    #[test]
    fn test_empty_document_is_default() {
        assert_eq!(
            DemoConfig::from_toml_str("").unwrap(),
            DemoConfig::default()
        );
    }

    #[test]
    fn test_sections_compose() {
        let config = DemoConfig::from_toml_str(
            r#"
            frames = 120
            log_level = "debug"

            [simulation]
            capacity = 5000
            slot_policy = "pool"

            [render]
            strategy = "procedural"

            [spawn]
            mode = "burst"
            cooldown = 0.2
            count = 1

            [player]
            damping = 0.8
            "#,
        )
        .unwrap();

        assert_eq!(config.frames, 120);
        assert_eq!(config.tracing_level(), tracing::Level::DEBUG);
        assert_eq!(config.simulation.capacity, 5000);
        assert_eq!(config.simulation.slot_policy, SlotPolicy::Pool);
        assert_eq!(config.render.strategy, RenderStrategy::Procedural);
        assert_eq!(
            config.spawn,
            SpawnPolicy::Burst {
                cooldown: 0.2,
                count: 1
            }
        );
        assert!((config.player.damping - 0.8).abs() < f32::EPSILON);
    }

    #[test]
    fn test_section_errors_surface() {
        assert!(matches!(
            DemoConfig::from_toml_str("[simulation]\ncapacity = 0"),
            Err(HostError::Simulation(_))
        ));
        assert!(matches!(
            DemoConfig::from_toml_str("[render]\nbatch_size = 0"),
            Err(HostError::Render(_))
        ));
        assert!(matches!(
            DemoConfig::from_toml_str("fixed_delta_time = 0.0"),
            Err(HostError::InvalidConfig(_))
        ));
        assert!(matches!(
            DemoConfig::from_toml_str("frames = \"lots\""),
            Err(HostError::Parse(_))
        ));
    }

    #[test]
    fn test_rejects_non_finite_extents() {
        for source in [
            "view_half_extents = [inf, 4.5]",
            "view_half_extents = [8.0, nan]",
            "view_half_extents = [-1.0, 4.5]",
            "fixed_delta_time = inf",
        ] {
            assert!(
                matches!(
                    DemoConfig::from_toml_str(source),
                    Err(HostError::InvalidConfig(_))
                ),
                "{source} was accepted"
            );
        }
        assert!(matches!(
            DemoConfig::from_toml_str("[simulation]\ntarget_radius = nan"),
            Err(HostError::Simulation(_))
        ));
    }

    #[test]
    fn test_unknown_level_falls_back() {
        let config = DemoConfig {
            log_level: "chatty".to_owned(),
            ..DemoConfig::default()
        };
        assert_eq!(config.tracing_level(), tracing::Level::INFO);
    }
}
