//! # Simulation Configuration
//!
//! Loaded once at startup from TOML. Every field has a default matching the
//! stock demo, so an empty file is a valid config.
//!
//! ```toml
//! capacity = 1000000
//! slot_policy = "scan"
//!
//! [[kinds]]
//! name = "gem"
//! atlas = { columns = 4, rows = 12 }
//! frame_duration = 0.1
//! randomize_rotation = true
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{SimulationError, SimulationResult};
use crate::math::Vec3;

/// Default number of item slots.
pub const DEFAULT_CAPACITY: usize = 1_000_000;

/// Minimum indices per parallel update task.
pub const DEFAULT_CHUNK_SIZE: usize = 64;

/// Where inactive items are parked so they never reach the screen.
pub const HIDDEN_POSITION: Vec3 = Vec3::new(0.0, -10_000.0, 0.0);

/// Sprite-atlas geometry: one column per animation frame, one row per color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AtlasLayout {
    /// Frames per row.
    pub columns: u16,
    /// Color variants.
    pub rows: u16,
}

impl AtlasLayout {
    /// Creates a layout.
    #[must_use]
    pub const fn new(columns: u16, rows: u16) -> Self {
        Self { columns, rows }
    }

    /// Total cells in the atlas.
    #[must_use]
    pub const fn total_frames(self) -> u32 {
        self.columns as u32 * self.rows as u32
    }
}

impl Default for AtlasLayout {
    fn default() -> Self {
        Self::new(4, 12)
    }
}

/// How a freed slot is found for a new spawn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotPolicy {
    /// Grow to capacity, then reuse the first inactive slot.
    #[default]
    Scan,
    /// Free list plus an explicit active set.
    Pool,
}

/// One row of the variant table. Variants share behavior and differ only here.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemKind {
    /// Display name.
    pub name: String,
    /// Atlas this kind animates through.
    pub atlas: AtlasLayout,
    /// Seconds per animation frame.
    pub frame_duration: f32,
    /// Render scale.
    pub scale: Vec3,
    /// Random Z rotation at spawn.
    pub randomize_rotation: bool,
}

impl Default for ItemKind {
    fn default() -> Self {
        Self {
            name: "item".to_owned(),
            atlas: AtlasLayout::default(),
            frame_duration: 0.1,
            scale: Vec3::new(0.5, 0.5, 1.0),
            randomize_rotation: false,
        }
    }
}

/// Configuration for a [`Simulation`](crate::Simulation).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Hard slot capacity, fixed for the process lifetime.
    pub capacity: usize,
    /// Seed for spawn randomization.
    pub seed: u64,
    /// Seconds an item takes to travel to the target once captured.
    pub pull_duration: f32,
    /// Half-extent of the chase target.
    pub target_radius: f32,
    /// Half-extent of an item.
    pub item_radius: f32,
    /// Off-screen park position for inactive slots.
    pub hidden_position: Vec3,
    /// Minimum indices handed to one worker task.
    pub update_chunk_size: usize,
    /// Update worker threads (0 = one per core).
    pub worker_threads: usize,
    /// Slot reuse strategy.
    pub slot_policy: SlotPolicy,
    /// Variant table, indexed by kind.
    pub kinds: Vec<ItemKind>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            seed: 0x5EED,
            pull_duration: 0.3,
            target_radius: 0.5,
            item_radius: 0.25,
            hidden_position: HIDDEN_POSITION,
            update_chunk_size: DEFAULT_CHUNK_SIZE,
            worker_threads: 0,
            slot_policy: SlotPolicy::Scan,
            kinds: vec![ItemKind::default()],
        }
    }
}

impl SimulationConfig {
    /// Default config with a different capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            ..Self::default()
        }
    }

    /// Distance below which an item is captured by the target.
    #[must_use]
    pub fn collision_radius(&self) -> f32 {
        self.target_radius + self.item_radius
    }

    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError::Parse`] for malformed TOML and
    /// [`SimulationError::InvalidConfig`] for out-of-range values.
    pub fn from_toml_str(source: &str) -> SimulationResult<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError::Io`] if the file cannot be read, otherwise
    /// the same errors as [`Self::from_toml_str`].
    pub fn load(path: impl AsRef<Path>) -> SimulationResult<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    /// Checks every value is usable.
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError::InvalidConfig`] naming the first bad field.
    #[allow(clippy::neg_cmp_op_on_partial_ord)] // NaN must fail too
    pub fn validate(&self) -> SimulationResult<()> {
        fn invalid(msg: impl Into<String>) -> SimulationResult<()> {
            Err(SimulationError::InvalidConfig(msg.into()))
        }

        if self.capacity == 0 {
            return invalid("capacity must be greater than zero");
        }
        if self.capacity > u32::MAX as usize {
            return invalid("capacity cannot exceed u32::MAX");
        }
        if !(self.pull_duration > 0.0) {
            return invalid(format!(
                "pull_duration must be positive, got {}",
                self.pull_duration
            ));
        }
        for (name, radius) in [
            ("target_radius", self.target_radius),
            ("item_radius", self.item_radius),
        ] {
            if !(radius.is_finite() && radius >= 0.0) {
                return invalid(format!(
                    "{name} must be finite and non-negative, got {radius}"
                ));
            }
        }
        if !self.hidden_position.to_array().iter().all(|c| c.is_finite()) {
            return invalid(format!(
                "hidden_position must be finite, got {:?}",
                self.hidden_position
            ));
        }
        if self.update_chunk_size == 0 {
            return invalid("update_chunk_size must be greater than zero");
        }
        if self.kinds.is_empty() {
            return invalid("at least one item kind is required");
        }
        if self.kinds.len() > usize::from(u16::MAX) {
            return invalid("too many item kinds");
        }
        for kind in &self.kinds {
            if kind.atlas.columns == 0 || kind.atlas.rows == 0 {
                return invalid(format!("kind '{}' has an empty atlas", kind.name));
            }
            if !(kind.frame_duration > 0.0) {
                return invalid(format!(
                    "kind '{}' frame_duration must be positive, got {}",
                    kind.name, kind.frame_duration
                ));
            }
        }
        Ok(())
    }
}
