//! Staging buffers for one instanced call.
//!
//! Pre-allocated to the batch size so packing never allocates.

use magnet_core::{Mat4, Transform, Vec4};

/// Transforms and sprite rects for one submission, packed contiguously.
pub struct BatchBuffer {
    transforms: Vec<Mat4>,
    sprite_rects: Vec<Vec4>,
    capacity: usize,
}

impl BatchBuffer {
    /// Creates a buffer holding up to `capacity` instances.
    ///
    /// # Note
    /// Allocates once. Call during initialization.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            transforms: Vec::with_capacity(capacity),
            sprite_rects: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Empties the buffer for the next batch.
    #[inline]
    pub fn clear(&mut self) {
        self.transforms.clear();
        self.sprite_rects.clear();
    }

    /// Appends one instance.
    ///
    /// Returns false if the buffer is full.
    #[inline]
    pub fn push(&mut self, transform: &Transform, sprite_rect: Vec4) -> bool {
        if self.transforms.len() >= self.capacity {
            return false;
        }
        self.transforms.push(Mat4::from_scale_rotation_translation(
            transform.scale,
            transform.rotation,
            transform.position,
        ));
        self.sprite_rects.push(sprite_rect);
        true
    }

    /// Instances currently packed.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.transforms.len()
    }

    /// Returns true if nothing is packed.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.transforms.is_empty()
    }

    /// Maximum instances per batch.
    #[inline]
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Packed model matrices.
    #[inline]
    #[must_use]
    pub fn transforms(&self) -> &[Mat4] {
        &self.transforms
    }

    /// Packed sprite rects.
    #[inline]
    #[must_use]
    pub fn sprite_rects(&self) -> &[Vec4] {
        &self.sprite_rects
    }

    /// Bytes this batch uploads.
    #[inline]
    #[must_use]
    pub fn byte_len(&self) -> usize {
        std::mem::size_of_val(self.transforms.as_slice())
            + std::mem::size_of_val(self.sprite_rects.as_slice())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use magnet_core::{Quat, Vec3};

    fn pose() -> Transform {
        Transform::new(Vec3::ONE, Quat::IDENTITY, Vec3::ONE)
    }

    #[test]
    fn test_push_until_full() {
        let mut buffer = BatchBuffer::new(3);
        for _ in 0..3 {
            assert!(buffer.push(&pose(), Vec4::ZERO));
        }
        assert!(!buffer.push(&pose(), Vec4::ZERO));
        assert_eq!(buffer.len(), 3);
        assert_eq!(buffer.byte_len(), 3 * (64 + 16));
    }

    #[test]
    fn test_clear_keeps_capacity() {
        let mut buffer = BatchBuffer::new(4);
        buffer.push(&pose(), Vec4::ZERO);
        buffer.clear();
        assert!(buffer.is_empty());
        assert_eq!(buffer.capacity(), 4);
    }
}
