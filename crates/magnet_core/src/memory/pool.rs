//! # Pool Allocator
//!
//! Free-list allocation with an explicit live set, for hosts that prefer
//! recycle bookkeeping over scanning the lifecycle column.

use crate::ecs::ItemState;

use super::slots::SlotAllocator;

/// A free list of slot indices plus the set of indices currently handed out.
///
/// Allocation is O(1). Reclaim walks only the live set, returning every slot
/// the update pass deactivated to the free list.
///
/// # Thread Safety
///
/// Not shared across threads. The frame loop owns it and touches it only
/// between update passes.
///
/// # Example
///
/// ```rust,ignore
/// let mut pool = PoolAllocator::new(10_000);
///
/// // Allocate - O(1), no heap allocation
/// let index = pool.allocate(store.states()).unwrap();
///
/// // After the update pass
/// pool.reclaim(store.states());
/// ```
#[derive(Debug)]
pub struct PoolAllocator {
    /// Indices of available slots, lowest on top.
    free_list: Vec<u32>,
    /// Indices handed out and not yet reclaimed.
    live: Vec<u32>,
    high_water_mark: usize,
    capacity: usize,
}

impl PoolAllocator {
    /// Creates a pool with every slot free.
    ///
    /// # Panics
    ///
    /// Panics if capacity is zero or exceeds `u32::MAX`.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "Capacity must be greater than zero");
        assert!(
            u32::try_from(capacity).is_ok(),
            "capacity {capacity} exceeds the u32 index range"
        );

        Self {
            free_list: (0..capacity as u32).rev().collect(),
            live: Vec::with_capacity(capacity),
            high_water_mark: 0,
            capacity,
        }
    }

    /// Number of slots handed out and not yet reclaimed.
    #[inline]
    #[must_use]
    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    /// Number of free slots.
    #[inline]
    #[must_use]
    pub fn free_count(&self) -> usize {
        self.free_list.len()
    }

    /// Slots handed out and not yet reclaimed, in allocation order.
    #[inline]
    #[must_use]
    pub fn live(&self) -> &[u32] {
        &self.live
    }
}

impl SlotAllocator for PoolAllocator {
    #[inline]
    fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    fn high_water_mark(&self) -> usize {
        self.high_water_mark
    }

    fn allocate(&mut self, _states: &[ItemState]) -> Option<usize> {
        let index = self.free_list.pop()?;
        self.live.push(index);

        let index = index as usize;
        self.high_water_mark = self.high_water_mark.max(index + 1);
        Some(index)
    }

    fn reclaim(&mut self, states: &[ItemState]) {
        let free_list = &mut self.free_list;
        self.live.retain(|&index| {
            if states[index as usize].is_active() {
                true
            } else {
                free_list.push(index);
                false
            }
        });
    }

    fn reset(&mut self) {
        self.live.clear();
        self.free_list.clear();
        self.free_list.extend((0..self.capacity as u32).rev());
        self.high_water_mark = 0;
    }
}
