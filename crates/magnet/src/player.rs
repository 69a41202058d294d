//! # Chase Target
//!
//! The item magnet. Input accelerates it, damping slows it, and it can never
//! leave the view.

use magnet_core::{Rect2, Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// Player tuning.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Speed multiplier applied after each move.
    pub damping: f32,
    /// Starting position.
    pub start: Vec2,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            damping: 0.9,
            start: Vec2::ZERO,
        }
    }
}

/// The chase target.
#[derive(Clone, Copy, Debug)]
pub struct Player {
    position: Vec2,
    speed: Vec2,
    damping: f32,
}

impl Player {
    /// Creates a player at rest.
    #[must_use]
    pub const fn new(config: &PlayerConfig) -> Self {
        Self {
            position: config.start,
            speed: Vec2::ZERO,
            damping: config.damping,
        }
    }

    /// Applies one frame of input.
    ///
    /// `input` is the move axis in `[-1, 1]` per component. Hitting the view
    /// edge stops the player dead.
    pub fn update(&mut self, input: Vec2, delta_time: f32, view: Rect2) {
        self.speed = self.speed + input * delta_time;
        self.position = self.position + self.speed;
        self.speed = self.speed * self.damping;

        let clamped = view.clamp(self.position);
        if clamped != self.position {
            self.position = clamped;
            self.speed = Vec2::ZERO;
        }
    }

    /// Current position.
    #[must_use]
    pub const fn position(&self) -> Vec2 {
        self.position
    }

    /// Current position on the item plane.
    #[must_use]
    pub const fn target(&self) -> Vec3 {
        Vec3::new(self.position.x, self.position.y, 0.0)
    }

    /// Current speed per frame.
    #[must_use]
    pub const fn speed(&self) -> Vec2 {
        self.speed
    }
}
