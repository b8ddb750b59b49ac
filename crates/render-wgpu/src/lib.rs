//! wgpu shadow map backend.
//!
//! Rasterizes chunk geometry into a depth texture from the light's point of
//! view. The vertex stage consumes one `u32` attribute per vertex and
//! performs the same shift-and-mask decode as the CPU reference.
//!
//! # Invariants
//! - The backend never mutates chunk data; uploads copy it.
//! - The per-draw chunk offset lives in a per-chunk uniform, written once at
//!   upload time.
//! - The depth pass has no color target; only the shadow map is written.

mod pass;
mod shaders;

pub use pass::{GpuChunk, ShadowMapRenderer, SHADOW_MAP_FORMAT};
