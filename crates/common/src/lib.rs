//! Shared types for chunked voxel geometry.
//!
//! # Invariants
//! - Chunk horizontal dimensions pack into the per-vertex bit budget: a
//!   face corner coordinate never exceeds `CHUNK_SIZE` (32), which fits the
//!   6-bit X/Y fields of the packed vertex format.
//! - A chunk offset is derived from its coordinate once and never mutated
//!   by downstream stages.

mod chunk;

pub use chunk::{ChunkPos, CHUNK_BLOCKS_LG, CHUNK_SIZE};

pub fn crate_info() -> &'static str {
    "shadowcast-common v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("common"));
    }
}
