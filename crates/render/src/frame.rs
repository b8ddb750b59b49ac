use glam::Vec3;
use shadowcast_common::ChunkPos;
use shadowcast_mesh::ChunkMeshData;

/// One chunk's contribution to a shadow frame.
///
/// The offset is fixed when the draw is built and shared read-only by every
/// vertex of the draw.
#[derive(Debug, Clone)]
pub struct ChunkDraw {
    pub chunk: ChunkPos,
    pub offset: Vec3,
    pub mesh: ChunkMeshData,
}

impl ChunkDraw {
    /// Build a draw from a chunk position and its meshed buffers.
    pub fn new(chunk: ChunkPos, mesh: ChunkMeshData) -> Self {
        Self {
            chunk,
            offset: chunk.world_offset(),
            mesh,
        }
    }
}

/// Everything a shadow renderer consumes for one pass: the chunk draws plus
/// the scalar time forwarded to the uniform block (unused by the decode
/// itself).
#[derive(Debug, Clone, Default)]
pub struct ShadowFrame {
    pub draws: Vec<ChunkDraw>,
    pub time: f32,
}

impl ShadowFrame {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, draw: ChunkDraw) {
        self.draws.push(draw);
    }

    /// Total vertices across all draws.
    pub fn vertex_count(&self) -> usize {
        self.draws.iter().map(|d| d.mesh.vertex_count()).sum()
    }

    /// Total triangle-list indices across all draws.
    pub fn index_count(&self) -> usize {
        self.draws.iter().map(|d| d.mesh.indices.len()).sum()
    }
}
