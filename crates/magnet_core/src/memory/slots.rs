//! # Scan Allocator
//!
//! High-water-mark allocation with a first-inactive scan once full.

use crate::config::SlotPolicy;
use crate::ecs::ItemState;

use super::pool::PoolAllocator;

/// Picks a slot for each new item.
///
/// Implementations only ever read the lifecycle column; the caller activates
/// the returned slot before asking for the next one.
pub trait SlotAllocator: Send {
    /// Hard slot capacity.
    fn capacity(&self) -> usize;

    /// One past the highest index ever handed out.
    fn high_water_mark(&self) -> usize;

    /// Returns a free index, or `None` when every slot is active.
    fn allocate(&mut self, states: &[ItemState]) -> Option<usize>;

    /// Called once per frame after the update pass has deactivated items.
    fn reclaim(&mut self, states: &[ItemState]);

    /// Forgets every allocation.
    fn reset(&mut self);
}

/// Builds the allocator selected by `policy`.
#[must_use]
pub fn new_allocator(policy: SlotPolicy, capacity: usize) -> Box<dyn SlotAllocator> {
    match policy {
        SlotPolicy::Scan => Box::new(ScanAllocator::new(capacity)),
        SlotPolicy::Pool => Box::new(PoolAllocator::new(capacity)),
    }
}

/// Grows to capacity, then reuses the first inactive slot.
///
/// # Example
///
/// ```rust,ignore
/// let mut slots = ScanAllocator::new(10);
/// let index = slots.allocate(store.states()).unwrap(); // 0
/// ```
#[derive(Debug)]
pub struct ScanAllocator {
    capacity: usize,
    high_water_mark: usize,
    /// Everything below this is known active since the last reclaim.
    cursor: usize,
}

impl ScanAllocator {
    /// Creates an allocator with nothing handed out.
    ///
    /// # Panics
    ///
    /// Panics if capacity is zero.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "Capacity must be greater than zero");
        Self {
            capacity,
            high_water_mark: 0,
            cursor: 0,
        }
    }
}

impl SlotAllocator for ScanAllocator {
    #[inline]
    fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    fn high_water_mark(&self) -> usize {
        self.high_water_mark
    }

    fn allocate(&mut self, states: &[ItemState]) -> Option<usize> {
        if self.high_water_mark < self.capacity {
            let index = self.high_water_mark;
            self.high_water_mark += 1;
            return Some(index);
        }

        let offset = states[self.cursor..self.high_water_mark]
            .iter()
            .position(|state| !state.is_active());

        match offset {
            Some(offset) => {
                let index = self.cursor + offset;
                self.cursor = index + 1;
                Some(index)
            }
            None => {
                self.cursor = self.high_water_mark;
                None
            }
        }
    }

    #[inline]
    fn reclaim(&mut self, _states: &[ItemState]) {
        self.cursor = 0;
    }

    fn reset(&mut self) {
        self.high_water_mark = 0;
        self.cursor = 0;
    }
}
