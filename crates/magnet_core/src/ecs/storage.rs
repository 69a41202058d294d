//! # Column Storage
//!
//! Pre-allocated, dense storage for one column of the item store.
//!
//! - All slots are allocated at creation and never grow
//! - Access is O(1) via slot index
//! - Iteration is cache-friendly (contiguous memory)

use super::component::Component;

/// Pre-allocated storage for a single column.
///
/// # Example
///
/// ```rust,ignore
/// let mut storage: ComponentStorage<Vec3> = ComponentStorage::filled(1_000_000, HIDDEN_POSITION);
/// storage[0] = Vec3::new(1.0, 2.0, 3.0);
/// ```
pub struct ComponentStorage<C: Component> {
    /// The dense array of values.
    data: Box<[C]>,
}

impl<C: Component> ComponentStorage<C> {
    /// Creates storage with every slot set to `C::default()`.
    ///
    /// # Panics
    ///
    /// Panics if capacity is zero.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self::filled(capacity, C::default())
    }

    /// Creates storage with every slot set to `value`.
    ///
    /// # Panics
    ///
    /// Panics if capacity is zero.
    #[must_use]
    pub fn filled(capacity: usize, value: C) -> Self {
        assert!(capacity > 0, "Capacity must be greater than zero");

        Self {
            data: vec![value; capacity].into_boxed_slice(),
        }
    }

    /// Returns the capacity of this storage.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Gets a value by slot index, or None if out of bounds.
    #[inline]
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&C> {
        self.data.get(index)
    }

    /// Returns a slice of all values.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[C] {
        &self.data
    }

    /// Returns a mutable slice of all values.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [C] {
        &mut self.data
    }

    /// Overwrites every slot with `value`.
    pub fn fill(&mut self, value: C) {
        self.data.fill(value);
    }
}

impl<C: Component> std::ops::Index<usize> for ComponentStorage<C> {
    type Output = C;

    #[inline]
    fn index(&self, index: usize) -> &C {
        &self.data[index]
    }
}

impl<C: Component> std::ops::IndexMut<usize> for ComponentStorage<C> {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut C {
        &mut self.data[index]
    }
}
