//! # Item Store
//!
//! Fixed-capacity structure-of-arrays holding every item slot.
//! Index `i` in every column refers to the same item.

use super::component::{AnimationState, ItemState, Transform};
use super::storage::ComponentStorage;
use crate::math::{Quat, Vec3, Vec4};

/// One logical row of the store, assembled from all columns.
///
/// This is what the update kernel consumes and produces.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ItemRecord {
    /// Slot holds a live item.
    pub active: bool,
    /// Item is travelling toward the target.
    pub pulling: bool,
    /// Index into the kind table.
    pub kind: u32,
    /// Position captured when the pull began.
    pub start_position: Vec3,
    /// Current world position.
    pub position: Vec3,
    /// Seconds since the pull began.
    pub pull_elapsed: f32,
    /// Animation state (frame, color, timing, atlas).
    pub animation: AnimationState,
    /// Derived atlas cell for the current frame and color.
    pub sprite_rect: Vec4,
    /// Derived render pose.
    pub transform: Transform,
}

impl ItemRecord {
    /// Assembles a record from its column values.
    #[inline]
    #[must_use]
    pub fn gather(
        state: &ItemState,
        position: Vec3,
        animation: AnimationState,
        sprite_rect: Vec4,
        transform: Transform,
    ) -> Self {
        Self {
            active: state.is_active(),
            pulling: state.is_pulling(),
            kind: state.kind,
            start_position: state.start_position,
            position,
            pull_elapsed: state.pull_elapsed,
            animation,
            sprite_rect,
            transform,
        }
    }

    /// Packs the lifecycle fields back into their column layout.
    #[inline]
    #[must_use]
    pub fn state(&self) -> ItemState {
        let mut flags = 0;
        if self.active {
            flags |= ItemState::FLAG_ACTIVE;
        }
        if self.pulling {
            flags |= ItemState::FLAG_PULLING;
        }
        ItemState {
            flags,
            kind: self.kind,
            start_position: self.start_position,
            pull_elapsed: self.pull_elapsed,
        }
    }

    /// Record of a never-used slot.
    #[must_use]
    pub fn empty(hidden_position: Vec3) -> Self {
        Self {
            position: hidden_position,
            transform: Transform::hidden(hidden_position),
            ..Self::default()
        }
    }
}

/// Mutable view of one row, as handed to a worker for a single index.
pub struct ItemRowMut<'a> {
    /// Lifecycle column.
    pub state: &'a mut ItemState,
    /// Simulation position column.
    pub position: &'a mut Vec3,
    /// Animation column.
    pub animation: &'a mut AnimationState,
    /// Sprite-rect column.
    pub sprite_rect: &'a mut Vec4,
    /// Render position column.
    pub render_position: &'a mut Vec3,
    /// Rotation column.
    pub rotation: &'a mut Quat,
    /// Scale column.
    pub scale: &'a mut Vec3,
}

impl ItemRowMut<'_> {
    /// Reads the row.
    #[inline]
    #[must_use]
    pub fn load(&self) -> ItemRecord {
        ItemRecord::gather(
            self.state,
            *self.position,
            *self.animation,
            *self.sprite_rect,
            Transform::new(*self.render_position, *self.rotation, *self.scale),
        )
    }

    /// Writes the row.
    #[inline]
    pub fn store(&mut self, record: &ItemRecord) {
        *self.state = record.state();
        *self.position = record.position;
        *self.animation = record.animation;
        *self.sprite_rect = record.sprite_rect;
        *self.render_position = record.transform.position;
        *self.rotation = record.transform.rotation;
        *self.scale = record.transform.scale;
    }
}

/// Disjoint mutable slices over a prefix of every column.
///
/// Produced by [`ItemStore::columns_mut`] for the parallel update pass.
pub struct ItemColumnsMut<'a> {
    /// Lifecycle column.
    pub states: &'a mut [ItemState],
    /// Simulation position column.
    pub positions: &'a mut [Vec3],
    /// Animation column.
    pub animations: &'a mut [AnimationState],
    /// Sprite-rect column.
    pub sprite_rects: &'a mut [Vec4],
    /// Render position column.
    pub render_positions: &'a mut [Vec3],
    /// Rotation column.
    pub rotations: &'a mut [Quat],
    /// Scale column.
    pub scales: &'a mut [Vec3],
}

impl ItemColumnsMut<'_> {
    /// Number of rows covered.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Returns true if no rows are covered.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Mutable view of row `index`.
    #[inline]
    pub fn row(&mut self, index: usize) -> ItemRowMut<'_> {
        ItemRowMut {
            state: &mut self.states[index],
            position: &mut self.positions[index],
            animation: &mut self.animations[index],
            sprite_rect: &mut self.sprite_rects[index],
            render_position: &mut self.render_positions[index],
            rotation: &mut self.rotations[index],
            scale: &mut self.scales[index],
        }
    }
}

/// The item store.
///
/// All memory is allocated at creation. Capacity never changes, which is
/// what lets the update pass hand out disjoint column slices without locks.
///
/// # Example
///
/// ```rust,ignore
/// let mut store = ItemStore::new(1_000_000, HIDDEN_POSITION);
/// let mut record = store.get(0);
/// record.active = true;
/// store.set(0, &record);
/// ```
pub struct ItemStore {
    states: ComponentStorage<ItemState>,
    positions: ComponentStorage<Vec3>,
    animations: ComponentStorage<AnimationState>,
    sprite_rects: ComponentStorage<Vec4>,
    render_positions: ComponentStorage<Vec3>,
    rotations: ComponentStorage<Quat>,
    scales: ComponentStorage<Vec3>,
    capacity: usize,
    hidden_position: Vec3,
}

impl ItemStore {
    /// Creates a store with every slot inactive and parked at `hidden_position`.
    ///
    /// # Panics
    ///
    /// Panics if capacity is zero.
    #[must_use]
    pub fn new(capacity: usize, hidden_position: Vec3) -> Self {
        Self {
            states: ComponentStorage::new(capacity),
            positions: ComponentStorage::filled(capacity, hidden_position),
            animations: ComponentStorage::new(capacity),
            sprite_rects: ComponentStorage::new(capacity),
            render_positions: ComponentStorage::filled(capacity, hidden_position),
            rotations: ComponentStorage::filled(capacity, Quat::IDENTITY),
            scales: ComponentStorage::filled(capacity, Vec3::ONE),
            capacity,
            hidden_position,
        }
    }

    /// Returns the fixed capacity.
    #[inline]
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Off-screen park position for inactive slots.
    #[inline]
    #[must_use]
    pub const fn hidden_position(&self) -> Vec3 {
        self.hidden_position
    }

    #[inline]
    #[track_caller]
    fn check(&self, index: usize) {
        assert!(
            index < self.capacity,
            "item index {index} out of range for capacity {}",
            self.capacity
        );
    }

    /// Reads slot `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= capacity`. That means the allocator or compactor
    /// handed out a bad index.
    #[must_use]
    #[track_caller]
    pub fn get(&self, index: usize) -> ItemRecord {
        self.check(index);
        ItemRecord::gather(
            &self.states[index],
            self.positions[index],
            self.animations[index],
            self.sprite_rects[index],
            Transform::new(
                self.render_positions[index],
                self.rotations[index],
                self.scales[index],
            ),
        )
    }

    /// Writes slot `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= capacity`.
    #[track_caller]
    pub fn set(&mut self, index: usize, record: &ItemRecord) {
        self.check(index);
        let end = index + 1;
        self.columns_mut(end).row(index).store(record);
    }

    /// Returns true if slot `index` holds a live item.
    ///
    /// # Panics
    ///
    /// Panics if `index >= capacity`.
    #[inline]
    #[must_use]
    #[track_caller]
    pub fn is_active(&self, index: usize) -> bool {
        self.check(index);
        self.states[index].is_active()
    }

    /// Splits the first `len` rows of every column into disjoint slices.
    ///
    /// # Panics
    ///
    /// Panics if `len > capacity`.
    #[track_caller]
    pub fn columns_mut(&mut self, len: usize) -> ItemColumnsMut<'_> {
        assert!(
            len <= self.capacity,
            "column range {len} exceeds capacity {}",
            self.capacity
        );
        ItemColumnsMut {
            states: &mut self.states.as_mut_slice()[..len],
            positions: &mut self.positions.as_mut_slice()[..len],
            animations: &mut self.animations.as_mut_slice()[..len],
            sprite_rects: &mut self.sprite_rects.as_mut_slice()[..len],
            render_positions: &mut self.render_positions.as_mut_slice()[..len],
            rotations: &mut self.rotations.as_mut_slice()[..len],
            scales: &mut self.scales.as_mut_slice()[..len],
        }
    }

    /// Lifecycle column.
    #[inline]
    #[must_use]
    pub fn states(&self) -> &[ItemState] {
        self.states.as_slice()
    }

    /// Simulation position column.
    #[inline]
    #[must_use]
    pub fn positions(&self) -> &[Vec3] {
        self.positions.as_slice()
    }

    /// Animation column.
    #[inline]
    #[must_use]
    pub fn animations(&self) -> &[AnimationState] {
        self.animations.as_slice()
    }

    /// Sprite-rect column.
    #[inline]
    #[must_use]
    pub fn sprite_rects(&self) -> &[Vec4] {
        self.sprite_rects.as_slice()
    }

    /// Render position column.
    #[inline]
    #[must_use]
    pub fn render_positions(&self) -> &[Vec3] {
        self.render_positions.as_slice()
    }

    /// Rotation column.
    #[inline]
    #[must_use]
    pub fn rotations(&self) -> &[Quat] {
        self.rotations.as_slice()
    }

    /// Scale column.
    #[inline]
    #[must_use]
    pub fn scales(&self) -> &[Vec3] {
        self.scales.as_slice()
    }

    /// Render pose of slot `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= capacity`.
    #[inline]
    #[must_use]
    #[track_caller]
    pub fn transform(&self, index: usize) -> Transform {
        self.check(index);
        Transform::new(
            self.render_positions[index],
            self.rotations[index],
            self.scales[index],
        )
    }

    /// Returns every slot to its initial inactive, parked state.
    pub fn clear(&mut self) {
        self.states.fill(ItemState::default());
        self.positions.fill(self.hidden_position);
        self.animations.fill(AnimationState::default());
        self.sprite_rects.fill(Vec4::ZERO);
        self.render_positions.fill(self.hidden_position);
        self.rotations.fill(Quat::IDENTITY);
        self.scales.fill(Vec3::ONE);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HIDDEN_POSITION;

    #[test]
    fn test_new_store_is_inactive_and_parked() {
        let store = ItemStore::new(16, HIDDEN_POSITION);
        assert_eq!(store.capacity(), 16);
        for i in 0..16 {
            let record = store.get(i);
            assert!(!record.active);
            assert_eq!(record.transform, Transform::hidden(HIDDEN_POSITION));
        }
    }

    #[test]
    fn test_set_get_roundtrip_preserves_flags() {
        let mut store = ItemStore::new(4, HIDDEN_POSITION);
        let record = ItemRecord {
            active: true,
            pulling: true,
            kind: 2,
            position: Vec3::new(1.0, 2.0, 0.0),
            pull_elapsed: 0.1,
            ..ItemRecord::empty(HIDDEN_POSITION)
        };
        store.set(3, &record);
        assert_eq!(store.get(3), record);
        assert!(store.is_active(3));
        assert!(!store.is_active(2));
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_out_of_range_get_panics() {
        let store = ItemStore::new(4, HIDDEN_POSITION);
        let _ = store.get(4);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_out_of_range_set_panics() {
        let mut store = ItemStore::new(4, HIDDEN_POSITION);
        store.set(10, &ItemRecord::default());
    }

    #[test]
    fn test_clear_resets_slots() {
        let mut store = ItemStore::new(2, HIDDEN_POSITION);
        let record = ItemRecord {
            active: true,
            ..ItemRecord::empty(HIDDEN_POSITION)
        };
        store.set(1, &record);
        store.clear();
        assert!(!store.is_active(1));
    }
}
