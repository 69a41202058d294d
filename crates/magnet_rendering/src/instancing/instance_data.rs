//! Instance data structures for GPU upload.

use bytemuck::{Pod, Zeroable};
use magnet_core::{Mat4, Transform, Vec4};

/// Per-instance data sent to the GPU by the instanced path.
///
/// Column-major model matrix followed by the atlas sprite rect.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct InstanceData {
    /// Model matrix (T * R * S).
    pub model: Mat4,
    /// UV scale in xy, UV offset in zw.
    pub sprite_rect: Vec4,
}

impl InstanceData {
    /// Size in bytes.
    pub const SIZE: usize = std::mem::size_of::<Self>();

    /// Builds an instance from a render pose and sprite rect.
    #[inline]
    #[must_use]
    pub fn from_pose(transform: &Transform, sprite_rect: Vec4) -> Self {
        Self {
            model: Mat4::from_scale_rotation_translation(
                transform.scale,
                transform.rotation,
                transform.position,
            ),
            sprite_rect,
        }
    }
}
