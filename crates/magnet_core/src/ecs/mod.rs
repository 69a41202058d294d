//! # Item Storage
//!
//! ## Design Philosophy
//!
//! - One array per field, pre-allocated to the hard capacity
//! - A slot index is the item's identity for its whole active lifetime
//! - Inactive slots stay in place, parked off-screen, until reused

mod component;
mod storage;
mod store;

pub use component::{sprite_rect, AnimationState, Component, ItemState, Transform};
pub use storage::ComponentStorage;
pub use store::{ItemColumnsMut, ItemRecord, ItemRowMut, ItemStore};
