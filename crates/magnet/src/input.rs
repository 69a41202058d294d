//! # Input
//!
//! Where movement and spawn commands come from. A windowed host reads a
//! gamepad or keyboard; the headless benchmark replays a script.

use magnet_core::{SpawnModifier, SpawnTrigger, Vec2};
use serde::{Deserialize, Serialize};

/// Input sampled for one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct InputState {
    /// Move axis, each component in `[-1, 1]`.
    pub movement: Vec2,
    /// Spawn button and modifier.
    pub spawn: SpawnTrigger,
}

/// Supplies one [`InputState`] per frame.
pub trait InputSource {
    /// Samples input for frame `frame`, `elapsed` seconds into the session.
    fn poll(&mut self, frame: u64, elapsed: f32) -> InputState;
}

/// Script for [`ScriptedInput`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScriptConfig {
    /// Radians per second the move axis rotates, tracing a loop.
    pub orbit_rate: f32,
    /// Length of the move axis.
    pub thrust: f32,
    /// Spawn trigger cycle length in frames.
    pub hold_period: u64,
    /// Frames per cycle the trigger is held.
    pub hold_frames: u64,
    /// Modifier while held.
    pub modifier: SpawnModifier,
}

impl Default for ScriptConfig {
    fn default() -> Self {
        Self {
            orbit_rate: 1.5,
            thrust: 1.0,
            hold_period: 60,
            hold_frames: 30,
            modifier: SpawnModifier::Hundred,
        }
    }
}

/// Deterministic input: steers in a circle, holds spawn on a duty cycle.
#[derive(Clone, Debug)]
pub struct ScriptedInput {
    script: ScriptConfig,
}

impl ScriptedInput {
    /// Creates a scripted source.
    #[must_use]
    pub const fn new(script: ScriptConfig) -> Self {
        Self { script }
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self, frame: u64, elapsed: f32) -> InputState {
        let (sin, cos) = (elapsed * self.script.orbit_rate).sin_cos();
        let held = self.script.hold_period > 0
            && frame % self.script.hold_period < self.script.hold_frames;

        InputState {
            movement: Vec2::new(cos, sin) * self.script.thrust,
            spawn: SpawnTrigger {
                held,
                modifier: self.script.modifier,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duty_cycle() {
        let mut input = ScriptedInput::new(ScriptConfig {
            hold_period: 4,
            hold_frames: 1,
            ..ScriptConfig::default()
        });
        let held: Vec<bool> = (0..8).map(|f| input.poll(f, 0.0).spawn.held).collect();
        assert_eq!(held, [true, false, false, false, true, false, false, false]);
    }

    #[test]
    fn test_movement_is_bounded() {
        let mut input = ScriptedInput::new(ScriptConfig::default());
        for frame in 0..100 {
            let state = input.poll(frame, frame as f32 / 60.0);
            assert!(state.movement.x.abs() <= 1.0);
            assert!(state.movement.y.abs() <= 1.0);
        }
    }

    #[test]
    fn test_zero_period_never_holds() {
        let mut input = ScriptedInput::new(ScriptConfig {
            hold_period: 0,
            ..ScriptConfig::default()
        });
        assert!(!input.poll(0, 0.0).spawn.held);
    }
}
