//! Frame-level render dispatch.

mod renderer;
mod stats;

pub use renderer::Renderer;
pub use stats::RenderStats;
