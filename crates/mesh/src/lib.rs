//! Chunk volumes and the face mesher feeding the shadow pass.
//!
//! # Invariants
//! - Every emitted vertex decodes back to the geometric corner it denotes.
//! - Face corner coordinates stay inside the packed field ranges: X/Y in
//!   `0..=CHUNK_SIZE`, Z inside the biased 16-bit range.
//! - Meshing reads the volume only; it never mutates it.

mod mesher;
mod volume;

pub use mesher::{mesh_chunk, ChunkMeshData, MeshError};
pub use volume::{ChunkVolume, VolumeError, Z_LOCAL_MAX, Z_LOCAL_MIN};

pub fn crate_info() -> &'static str {
    "shadowcast-mesh v0.1.0"
}
