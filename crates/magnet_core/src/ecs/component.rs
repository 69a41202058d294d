//! # Item Columns
//!
//! Each struct here is one column of the item store. Columns are pure data:
//! `Copy`, `Pod` and fixed-size so the whole store is allocated once.

use bytemuck::{Pod, Zeroable};

use crate::config::AtlasLayout;
use crate::math::{Quat, Vec3, Vec4};

/// Marker trait for store columns.
///
/// Columns must be:
/// - `Copy`: No heap allocations, bitwise copyable
/// - `Pod`: Plain old data, can be uploaded as-is
/// - `Default`: Must have a default value for pre-allocation
/// - `Send + Sync`: Disjoint slices are handed to worker threads
pub trait Component: Copy + Pod + Zeroable + Default + Send + Sync + 'static {}

impl<T> Component for T where T: Copy + Pod + Zeroable + Default + Send + Sync + 'static {}

/// Lifecycle and pull state of one item.
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct ItemState {
    /// Bitset of `FLAG_*` values.
    pub flags: u32,
    /// Index into the kind table.
    pub kind: u32,
    /// Position captured when the pull began.
    pub start_position: Vec3,
    /// Seconds since the pull began.
    pub pull_elapsed: f32,
}

impl ItemState {
    /// Slot holds a live item.
    pub const FLAG_ACTIVE: u32 = 1 << 0;
    /// Item is travelling toward the target.
    pub const FLAG_PULLING: u32 = 1 << 1;

    /// Is this slot live?
    #[inline]
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.flags & Self::FLAG_ACTIVE != 0
    }

    /// Is this item being pulled?
    #[inline]
    #[must_use]
    pub const fn is_pulling(&self) -> bool {
        self.flags & Self::FLAG_PULLING != 0
    }
}

/// Sprite-sheet animation state of one item.
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct AnimationState {
    /// Atlas row (palette variant).
    pub color_index: u32,
    /// Atlas frame, always below `total_frames`.
    pub current_frame: u32,
    /// Seconds accumulated toward the next frame.
    pub animation_elapsed: f32,
    /// Seconds per frame, fixed at spawn.
    pub frame_duration: f32,
    /// Frame count, fixed at spawn.
    pub total_frames: u32,
    /// Atlas columns, fixed at spawn.
    pub columns: u16,
    /// Atlas rows, fixed at spawn.
    pub rows: u16,
}

impl AnimationState {
    /// Atlas this item animates through.
    #[inline]
    #[must_use]
    pub const fn atlas(&self) -> AtlasLayout {
        AtlasLayout::new(self.columns, self.rows)
    }
}

/// Render-facing pose.
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct Transform {
    /// World position.
    pub position: Vec3,
    /// Orientation.
    pub rotation: Quat,
    /// Per-axis scale.
    pub scale: Vec3,
}

impl Transform {
    /// Creates a transform.
    #[must_use]
    pub const fn new(position: Vec3, rotation: Quat, scale: Vec3) -> Self {
        Self {
            position,
            rotation,
            scale,
        }
    }

    /// Pose given to inactive slots: parked off-screen, unrotated, unit scale.
    #[must_use]
    pub const fn hidden(position: Vec3) -> Self {
        Self::new(position, Quat::IDENTITY, Vec3::ONE)
    }
}

/// UV sub-rectangle selecting one atlas cell: scale in `xy`, offset in `zw`.
///
/// Column comes from `frame % columns`, row from `color_index`.
#[inline]
#[must_use]
pub fn sprite_rect(atlas: AtlasLayout, color_index: u32, frame: u32) -> Vec4 {
    let frame_width = 1.0 / f32::from(atlas.columns);
    let frame_height = 1.0 / f32::from(atlas.rows);
    let column = frame % u32::from(atlas.columns);
    Vec4::new(
        frame_width,
        frame_height,
        column as f32 * frame_width,
        color_index as f32 * frame_height,
    )
}
