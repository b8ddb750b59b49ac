//! Shadow pass interface: light-space setup, frame description, renderer seam.
//!
//! # Invariants
//! - Renderers read the frame; they never mutate chunk data.
//! - The per-vertex decode is identical across backends: shift-and-mask the
//!   packed attribute, add the chunk offset, then apply the light matrix.
//! - The light-space matrix is applied explicitly, after the decode; the
//!   decode itself never bakes a projection in.

mod frame;
mod light;
mod renderer;

pub use frame::{ChunkDraw, ShadowFrame};
pub use light::DirectionalLight;
pub use renderer::{DebugShadowRenderer, ShadowRenderer, ShadowStats};

pub fn crate_info() -> &'static str {
    "shadowcast-render v0.1.0"
}
