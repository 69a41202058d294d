//! # MAGNET Core
//!
//! Fixed-capacity simulation of up to 1,000,000 collectible items that
//! animate in place, get captured by a moving target, travel to it and
//! despawn. Designed for:
//! - One flat array per field, allocated once at startup
//! - A pure per-item kernel fanned out over all cores every frame
//! - Slot reuse without growth once capacity is reached
//!
//! ## Frame Rules
//!
//! 1. **Spawns land between frames** - never while the update pass runs
//! 2. **Update, compact, render** - each phase finishes before the next reads the store
//! 3. **Index `i` is written only by the task updating `i`** - no locks anywhere
//!
//! ## Example
//!
//! ```rust,ignore
//! use magnet_core::{Rect2, Simulation, SimulationConfig, Vec3};
//!
//! let mut sim = Simulation::new(SimulationConfig::default())?;
//! sim.spawn(1_000, Rect2::centered(8.0, 4.5));
//! sim.step(Vec3::ZERO, 1.0 / 60.0);
//! println!("{}/{}", sim.active_count(), sim.capacity());
//! ```

#![deny(missing_docs)]

pub mod compact;
pub mod config;
pub mod ecs;
pub mod error;
pub mod kernel;
pub mod math;
pub mod memory;
pub mod parallel;
pub mod simulation;
pub mod spawn;

pub use compact::ActiveSetCompactor;
pub use config::{
    AtlasLayout, ItemKind, SimulationConfig, SlotPolicy, DEFAULT_CAPACITY, DEFAULT_CHUNK_SIZE,
    HIDDEN_POSITION,
};
pub use ecs::{sprite_rect, AnimationState, ItemRecord, ItemState, ItemStore, Transform};
pub use error::{SimulationError, SimulationResult};
pub use kernel::{advance_animation, update_item, FrameParams};
pub use math::{Mat4, Quat, Rect2, Vec2, Vec3, Vec4};
pub use memory::{PoolAllocator, ScanAllocator, SlotAllocator};
pub use parallel::ParallelDriver;
pub use simulation::{FrameStats, Simulation};
pub use spawn::{ItemSpawner, SpawnModifier, SpawnPolicy, SpawnScheduler, SpawnTrigger};
