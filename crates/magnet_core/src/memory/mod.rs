//! # Slot Allocation
//!
//! Decides which store index a newly spawned item occupies.
//!
//! ## Design Philosophy
//!
//! All bookkeeping is allocated once at startup. During gameplay:
//! - No heap allocations
//! - Capacity exhaustion is a saturation signal, never an error
//! - An index is never handed out while its slot is still active

mod pool;
mod slots;

pub use pool::PoolAllocator;
pub use slots::{new_allocator, ScanAllocator, SlotAllocator};
