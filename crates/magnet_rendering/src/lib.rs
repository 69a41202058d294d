//! # MAGNET Rendering
//!
//! Turns the item store into backend draw calls:
//! - Up to 1,000,000 items per frame
//! - Never more than the backend's per-call instance ceiling
//! - No allocations in the render loop
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │ Batched:    active set → chunks of B → draw_instanced × ⌈C/B⌉ │
//! │ Procedural: [0, hwm) columns → draw_procedural × 1          │
//! └────────────────────────────────────────────────────────────┘
//! ```
//!
//! Both produce the same picture: every active item at its pose with its
//! sprite rect, every inactive slot off-screen.

#![deny(missing_docs)]

pub mod backend;
pub mod config;
pub mod error;
pub mod instancing;
pub mod pipeline;

pub use backend::{HeadlessBackend, ProceduralBuffers, RenderBackend};
pub use config::{RenderConfig, RenderStrategy, DEFAULT_BATCH_SIZE, MAX_BATCH_SIZE};
pub use error::{RenderError, RenderResult};
pub use instancing::{BatchBuffer, BatchedRenderer, InstanceData, ProceduralRenderer};
pub use pipeline::{RenderStats, Renderer};
