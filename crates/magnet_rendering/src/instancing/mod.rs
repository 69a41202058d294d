//! Instanced submission of the item store.
//!
//! ## Strategies
//!
//! - **Batched**: compacted active set, chunked to the per-call ceiling
//! - **Procedural**: whole live range uploaded once, off-screen slots culled
//!   by position instead of by compaction

mod batched;
mod buffer;
mod instance_data;
mod procedural;

pub use batched::BatchedRenderer;
pub use buffer::BatchBuffer;
pub use instance_data::InstanceData;
pub use procedural::ProceduralRenderer;
