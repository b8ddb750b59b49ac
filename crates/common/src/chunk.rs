use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Base two logarithm of the number of blocks along either horizontal axis
/// of a chunk.
///
/// NOTE: the two horizontal dimensions are equal on purpose; the packed
/// vertex format reserves 6 bits per horizontal component, enough for face
/// corners in `0..=CHUNK_SIZE`.
pub const CHUNK_BLOCKS_LG: u32 = 5;

/// Blocks along either horizontal axis of a chunk.
pub const CHUNK_SIZE: u32 = 1 << CHUNK_BLOCKS_LG;

/// Coordinate of a chunk column in the world grid.
///
/// Chunks are vertical columns: X and Y index the horizontal grid, the
/// vertical axis lives inside the per-vertex Z field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ChunkPos {
    pub x: i32,
    pub y: i32,
}

impl ChunkPos {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// World-space origin of this chunk, supplied to the shadow pass as the
    /// per-draw chunk offset.
    pub fn world_offset(&self) -> Vec3 {
        Vec3::new(
            (self.x * CHUNK_SIZE as i32) as f32,
            (self.y * CHUNK_SIZE as i32) as f32,
            0.0,
        )
    }

    /// Chunk containing the given world position.
    pub fn from_world(pos: Vec3) -> Self {
        Self {
            x: (pos.x / CHUNK_SIZE as f32).floor() as i32,
            y: (pos.y / CHUNK_SIZE as f32).floor() as i32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chunk_size_is_consistent() {
        assert_eq!(CHUNK_SIZE, 32);
        assert_eq!(1 << CHUNK_BLOCKS_LG, CHUNK_SIZE);
    }

    #[test]
    fn world_offset_scales_by_chunk_size() {
        let pos = ChunkPos::new(2, -1);
        assert_eq!(pos.world_offset(), Vec3::new(64.0, -32.0, 0.0));
    }

    #[test]
    fn origin_chunk_has_zero_offset() {
        assert_eq!(ChunkPos::new(0, 0).world_offset(), Vec3::ZERO);
    }

    #[test]
    fn from_world_round_trips_origin() {
        let pos = ChunkPos::new(3, 4);
        assert_eq!(ChunkPos::from_world(pos.world_offset()), pos);
    }

    #[test]
    fn from_world_handles_negative_positions() {
        assert_eq!(
            ChunkPos::from_world(Vec3::new(-1.0, -33.0, 10.0)),
            ChunkPos::new(-1, -2)
        );
    }
}
