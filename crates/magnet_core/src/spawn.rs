//! # Spawning
//!
//! Two halves:
//! - [`SpawnScheduler`] turns elapsed time and trigger input into a spawn count
//! - [`ItemSpawner`] rolls the randomized initial state of each new item
//!
//! Both are deterministic: the scheduler is a pure accumulator and the
//! spawner draws from a seeded ChaCha stream.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::config::ItemKind;
use crate::ecs::{sprite_rect, AnimationState, ItemRecord, Transform};
use crate::math::{Quat, Rect2, Vec3};

/// When new items are requested.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum SpawnPolicy {
    /// Fixed cadence, no input.
    Interval {
        /// Seconds between waves.
        interval: f32,
        /// Items per wave.
        count: usize,
    },
    /// While the trigger is held, one wave per cooldown.
    Burst {
        /// Seconds between waves.
        cooldown: f32,
        /// Items per wave before the modifier multiplier.
        count: usize,
    },
}

impl Default for SpawnPolicy {
    fn default() -> Self {
        Self::Interval {
            interval: 0.5,
            count: 100,
        }
    }
}

/// Multiplier applied to a burst wave.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpawnModifier {
    /// x1
    #[default]
    None,
    /// x10
    Ten,
    /// x100
    Hundred,
}

impl SpawnModifier {
    /// Factor applied to the wave size.
    #[must_use]
    pub const fn multiplier(self) -> usize {
        match self {
            Self::None => 1,
            Self::Ten => 10,
            Self::Hundred => 100,
        }
    }
}

/// Spawn input sampled once per frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SpawnTrigger {
    /// Spawn button is down.
    pub held: bool,
    /// Active modifier.
    pub modifier: SpawnModifier,
}

impl SpawnTrigger {
    /// Trigger held with `modifier`.
    #[must_use]
    pub const fn held(modifier: SpawnModifier) -> Self {
        Self {
            held: true,
            modifier,
        }
    }
}

/// Accumulates frame time and decides how many items to request.
#[derive(Clone, Debug)]
pub struct SpawnScheduler {
    policy: SpawnPolicy,
    /// Interval: time since last wave. Burst: remaining cooldown.
    timer: f32,
}

impl SpawnScheduler {
    /// Creates a scheduler with an empty timer.
    #[must_use]
    pub const fn new(policy: SpawnPolicy) -> Self {
        Self { policy, timer: 0.0 }
    }

    /// The active policy.
    #[must_use]
    pub const fn policy(&self) -> SpawnPolicy {
        self.policy
    }

    /// Advances by `delta_time` and returns how many items to spawn now.
    pub fn tick(&mut self, delta_time: f32, trigger: SpawnTrigger) -> usize {
        match self.policy {
            SpawnPolicy::Interval { interval, count } => {
                self.timer += delta_time;
                if self.timer >= interval {
                    self.timer = 0.0;
                    count
                } else {
                    0
                }
            }
            SpawnPolicy::Burst { cooldown, count } => {
                if self.timer > 0.0 {
                    self.timer -= delta_time;
                    0
                } else if trigger.held {
                    self.timer += cooldown;
                    count * trigger.modifier.multiplier()
                } else {
                    0
                }
            }
        }
    }

    /// Clears the timer.
    pub fn reset(&mut self) {
        self.timer = 0.0;
    }
}

/// Rolls the initial state of freshly spawned items.
#[derive(Clone, Debug)]
pub struct ItemSpawner {
    rng: ChaCha8Rng,
}

impl ItemSpawner {
    /// Creates a spawner whose sequence is fixed by `seed`.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Rolls one live item.
    ///
    /// Kind, position, color, starting frame and (if the kind allows it)
    /// rotation are uniform. The sprite rect is derived immediately.
    ///
    /// # Panics
    ///
    /// Panics if `kinds` is empty.
    pub fn roll(&mut self, kinds: &[ItemKind], bounds: Rect2) -> ItemRecord {
        assert!(!kinds.is_empty(), "spawn requires at least one item kind");

        let kind_index = self.rng.gen_range(0..kinds.len());
        let kind = &kinds[kind_index];
        let atlas = kind.atlas;

        let position = Vec3::new(
            self.uniform(bounds.min.x, bounds.max.x),
            self.uniform(bounds.min.y, bounds.max.y),
            0.0,
        );
        let color_index = self.rng.gen_range(0..u32::from(atlas.rows));
        let current_frame = self.rng.gen_range(0..atlas.total_frames());
        let rotation = if kind.randomize_rotation {
            Quat::from_rotation_z(self.uniform(0.0, std::f32::consts::TAU))
        } else {
            Quat::IDENTITY
        };

        ItemRecord {
            active: true,
            pulling: false,
            kind: kind_index as u32,
            start_position: position,
            position,
            pull_elapsed: 0.0,
            animation: AnimationState {
                color_index,
                current_frame,
                animation_elapsed: 0.0,
                frame_duration: kind.frame_duration,
                total_frames: atlas.total_frames(),
                columns: atlas.columns,
                rows: atlas.rows,
            },
            sprite_rect: sprite_rect(atlas, color_index, current_frame),
            transform: Transform::new(position, rotation, kind.scale),
        }
    }

    #[inline]
    fn uniform(&mut self, min: f32, max: f32) -> f32 {
        min + (max - min) * self.rng.gen::<f32>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AtlasLayout;
    use crate::math::{Vec2, Vec4};

    #[test]
    fn test_interval_fires_on_cadence() {
        let mut scheduler = SpawnScheduler::new(SpawnPolicy::Interval {
            interval: 0.5,
            count: 100,
        });
        let idle = SpawnTrigger::default();

        assert_eq!(scheduler.tick(0.25, idle), 0);
        assert_eq!(scheduler.tick(0.25, idle), 100);
        // Timer resets to zero, not by subtraction
        assert_eq!(scheduler.tick(0.4, idle), 0);
        assert_eq!(scheduler.tick(0.1, idle), 100);
    }

    #[test]
    fn test_burst_requires_trigger() {
        let mut scheduler = SpawnScheduler::new(SpawnPolicy::Burst {
            cooldown: 0.2,
            count: 1,
        });
        assert_eq!(scheduler.tick(0.016, SpawnTrigger::default()), 0);
        let held = SpawnTrigger::held(SpawnModifier::None);
        assert_eq!(scheduler.tick(0.016, held), 1);
    }

    #[test]
    fn test_burst_cooldown_and_modifiers() {
        let mut scheduler = SpawnScheduler::new(SpawnPolicy::Burst {
            cooldown: 0.2,
            count: 1,
        });
        let held = SpawnTrigger::held(SpawnModifier::Hundred);

        assert_eq!(scheduler.tick(0.1, held), 100);
        assert_eq!(scheduler.tick(0.1, held), 0);
        assert_eq!(scheduler.tick(0.1, held), 0);
        let ten = SpawnTrigger::held(SpawnModifier::Ten);
        assert_eq!(scheduler.tick(0.1, ten), 10);
    }

    #[test]
    fn test_roll_within_bounds_and_atlas() {
        let kinds = vec![ItemKind::default()];
        let bounds = Rect2::new(Vec2::new(-8.0, -4.0), Vec2::new(8.0, 4.0));
        let mut spawner = ItemSpawner::new(7);

        for _ in 0..500 {
            let item = spawner.roll(&kinds, bounds);
            assert!(item.active && !item.pulling);
            assert!(bounds.contains(Vec2::new(item.position.x, item.position.y)));
            assert!(item.position.z.abs() < f32::EPSILON);
            assert!(item.animation.color_index < 12);
            assert!(item.animation.current_frame < 48);
            assert_eq!(item.transform.rotation, Quat::IDENTITY);
            assert_eq!(item.transform.scale, Vec3::new(0.5, 0.5, 1.0));
        }
    }

    #[test]
    fn test_first_frame_sprite_rect() {
        let atlas = AtlasLayout::new(4, 12);
        for k in 0..12 {
            let rect = sprite_rect(atlas, k, 0);
            let expected = Vec4::new(0.25, 1.0 / 12.0, 0.0, k as f32 / 12.0);
            for (got, want) in rect.to_array().into_iter().zip(expected.to_array()) {
                assert!((got - want).abs() < 1e-6, "color {k}: {rect:?}");
            }
        }
    }

    #[test]
    fn test_roll_is_seeded() {
        let kinds = vec![
            ItemKind::default(),
            ItemKind {
                name: "gem".to_owned(),
                randomize_rotation: true,
                ..ItemKind::default()
            },
        ];
        let bounds = Rect2::centered(10.0, 5.0);
        let mut a = ItemSpawner::new(42);
        let mut b = ItemSpawner::new(42);

        for _ in 0..100 {
            assert_eq!(a.roll(&kinds, bounds), b.roll(&kinds, bounds));
        }
    }

    #[test]
    fn test_degenerate_bounds() {
        let kinds = vec![ItemKind::default()];
        let point = Rect2::new(Vec2::new(1.0, 2.0), Vec2::new(1.0, 2.0));
        let item = ItemSpawner::new(0).roll(&kinds, point);
        assert_eq!(item.position, Vec3::new(1.0, 2.0, 0.0));
    }
}
