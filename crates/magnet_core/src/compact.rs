//! # Active-Set Compaction
//!
//! Rebuilds the ascending list of live slot indices after each update pass.
//! It is a full rescan of `[0, high_water_mark)` every frame, with no
//! incremental diffing.

use crate::ecs::ItemState;

/// Reusable buffer holding the live indices of the last compaction.
///
/// The buffer is sized to the store capacity up front, so compaction never
/// allocates.
#[derive(Debug, Default)]
pub struct ActiveSetCompactor {
    indices: Vec<u32>,
}

impl ActiveSetCompactor {
    /// Creates a compactor for a store of `capacity` slots.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            indices: Vec::with_capacity(capacity),
        }
    }

    /// Rescans the first `high_water_mark` slots and returns the live indices.
    ///
    /// Calling this again without an intervening update yields the same list.
    pub fn compact(&mut self, states: &[ItemState], high_water_mark: usize) -> &[u32] {
        self.indices.clear();
        self.indices.extend(
            states[..high_water_mark]
                .iter()
                .enumerate()
                .filter(|(_, state)| state.is_active())
                .map(|(index, _)| index as u32),
        );
        &self.indices
    }

    /// Indices found by the last [`compact`](Self::compact).
    #[inline]
    #[must_use]
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Number of indices found by the last compaction.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Returns true if the last compaction found nothing live.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Forgets the last result.
    pub fn clear(&mut self) {
        self.indices.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn states(pattern: &[bool]) -> Vec<ItemState> {
        pattern
            .iter()
            .map(|&active| ItemState {
                flags: if active { ItemState::FLAG_ACTIVE } else { 0 },
                ..ItemState::default()
            })
            .collect()
    }

    #[test]
    fn test_ascending_live_indices() {
        let states = states(&[true, false, true, true, false, true]);
        let mut compactor = ActiveSetCompactor::new(states.len());
        assert_eq!(compactor.compact(&states, 6), &[0, 2, 3, 5]);
        assert_eq!(compactor.len(), 4);
    }

    #[test]
    fn test_ignores_slots_past_high_water_mark() {
        let states = states(&[true, true, true, true]);
        let mut compactor = ActiveSetCompactor::new(4);
        assert_eq!(compactor.compact(&states, 2), &[0, 1]);
    }

    #[test]
    fn test_idempotent() {
        let states = states(&[false, true, false, true]);
        let mut compactor = ActiveSetCompactor::new(4);
        let first = compactor.compact(&states, 4).to_vec();
        for _ in 0..5 {
            assert_eq!(compactor.compact(&states, 4), first.as_slice());
        }
    }

    #[test]
    fn test_empty() {
        let states = states(&[false, false]);
        let mut compactor = ActiveSetCompactor::new(2);
        assert!(compactor.compact(&states, 2).is_empty());
        assert!(compactor.is_empty());
    }
}
