//! # Render Backend
//!
//! The seam between the renderers and whatever actually draws. A GPU
//! backend uploads the slices it is given; [`HeadlessBackend`] only counts
//! them, which is what benchmarks and tests run against.

use magnet_core::{Mat4, Quat, Transform, Vec3, Vec4};

use crate::instancing::InstanceData;

/// Structure-of-arrays columns for one procedural draw.
///
/// Every slice has the same length, the live range `[0, high_water_mark)`.
#[derive(Clone, Copy, Debug)]
pub struct ProceduralBuffers<'a> {
    /// Render positions. Inactive slots sit at the hidden position.
    pub positions: &'a [Vec3],
    /// Rotations.
    pub rotations: &'a [Quat],
    /// Scales.
    pub scales: &'a [Vec3],
    /// Sprite rects.
    pub sprite_rects: &'a [Vec4],
}

impl ProceduralBuffers<'_> {
    /// Instances covered.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Returns true if no instances are covered.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Bytes uploaded by one draw of these buffers.
    #[must_use]
    pub fn byte_len(&self) -> usize {
        std::mem::size_of_val(self.positions)
            + std::mem::size_of_val(self.rotations)
            + std::mem::size_of_val(self.scales)
            + std::mem::size_of_val(self.sprite_rects)
    }

    /// What the vertex shader builds for instance `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    #[must_use]
    pub fn instance(&self, index: usize) -> InstanceData {
        let pose = Transform::new(
            self.positions[index],
            self.rotations[index],
            self.scales[index],
        );
        InstanceData::from_pose(&pose, self.sprite_rects[index])
    }
}

/// A target that accepts item draws.
pub trait RenderBackend {
    /// One instanced call. Both slices have the same length, at most the
    /// configured batch size.
    fn draw_instanced(&mut self, transforms: &[Mat4], sprite_rects: &[Vec4]);

    /// One procedural call covering `instance_count` instances of `buffers`.
    fn draw_procedural(&mut self, buffers: &ProceduralBuffers<'_>, instance_count: usize);
}

/// Backend that draws nothing and records what it was asked to draw.
#[derive(Debug, Default)]
pub struct HeadlessBackend {
    draw_calls: u64,
    instances: u64,
    bytes_uploaded: u64,
    largest_call: usize,
    /// Every submitted instance, when capturing.
    captured: Option<Vec<InstanceData>>,
}

impl HeadlessBackend {
    /// Counting-only backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Backend that also keeps every submitted instance.
    #[must_use]
    pub fn capturing() -> Self {
        Self {
            captured: Some(Vec::new()),
            ..Self::default()
        }
    }

    /// Draw calls received.
    #[must_use]
    pub const fn draw_calls(&self) -> u64 {
        self.draw_calls
    }

    /// Instances received across all calls.
    #[must_use]
    pub const fn instances(&self) -> u64 {
        self.instances
    }

    /// Bytes received across all calls.
    #[must_use]
    pub const fn bytes_uploaded(&self) -> u64 {
        self.bytes_uploaded
    }

    /// Instances in the biggest single call.
    #[must_use]
    pub const fn largest_call(&self) -> usize {
        self.largest_call
    }

    /// Captured instances, empty unless built with [`capturing`](Self::capturing).
    #[must_use]
    pub fn captured(&self) -> &[InstanceData] {
        self.captured.as_deref().unwrap_or_default()
    }

    /// Zeroes the counters and drops captured instances.
    pub fn reset(&mut self) {
        self.draw_calls = 0;
        self.instances = 0;
        self.bytes_uploaded = 0;
        self.largest_call = 0;
        if let Some(captured) = &mut self.captured {
            captured.clear();
        }
    }

    fn record(&mut self, instances: usize, bytes: usize) {
        self.draw_calls += 1;
        self.instances += instances as u64;
        self.bytes_uploaded += bytes as u64;
        self.largest_call = self.largest_call.max(instances);
    }
}

impl RenderBackend for HeadlessBackend {
    fn draw_instanced(&mut self, transforms: &[Mat4], sprite_rects: &[Vec4]) {
        debug_assert_eq!(transforms.len(), sprite_rects.len());
        self.record(
            transforms.len(),
            std::mem::size_of_val(transforms) + std::mem::size_of_val(sprite_rects),
        );

        if let Some(captured) = &mut self.captured {
            captured.extend(
                transforms
                    .iter()
                    .zip(sprite_rects)
                    .map(|(&model, &sprite_rect)| InstanceData { model, sprite_rect }),
            );
        }
    }

    fn draw_procedural(&mut self, buffers: &ProceduralBuffers<'_>, instance_count: usize) {
        self.record(instance_count, buffers.byte_len());

        if let Some(captured) = &mut self.captured {
            captured.extend((0..instance_count).map(|i| buffers.instance(i)));
        }
    }
}
