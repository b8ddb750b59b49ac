use crate::volume::ChunkVolume;
use glam::IVec3;
use shadowcast_vertex::{PackError, PackedVertex};

/// Output buffers for one chunk, ready for upload to the shadow pass.
#[derive(Debug, Clone, Default)]
pub struct ChunkMeshData {
    /// One packed position attribute per vertex.
    pub vertices: Vec<PackedVertex>,
    /// Triangle-list indices.
    pub indices: Vec<u32>,
}

impl ChunkMeshData {
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn quad_count(&self) -> usize {
        self.indices.len() / 6
    }
}

/// Error from meshing a chunk volume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MeshError {
    #[error("face corner does not fit the packed vertex format: {0}")]
    Pack(#[from] PackError),
}

/// The six face directions of a cell, with the four corner offsets of each
/// face wound counter-clockwise as seen from outside the cell.
#[rustfmt::skip]
const FACES: [(IVec3, [IVec3; 4]); 6] = [
    // +X
    (IVec3::new(1, 0, 0), [
        IVec3::new(1, 0, 0), IVec3::new(1, 1, 0), IVec3::new(1, 1, 1), IVec3::new(1, 0, 1),
    ]),
    // -X
    (IVec3::new(-1, 0, 0), [
        IVec3::new(0, 1, 0), IVec3::new(0, 0, 0), IVec3::new(0, 0, 1), IVec3::new(0, 1, 1),
    ]),
    // +Y
    (IVec3::new(0, 1, 0), [
        IVec3::new(1, 1, 0), IVec3::new(0, 1, 0), IVec3::new(0, 1, 1), IVec3::new(1, 1, 1),
    ]),
    // -Y
    (IVec3::new(0, -1, 0), [
        IVec3::new(0, 0, 0), IVec3::new(1, 0, 0), IVec3::new(1, 0, 1), IVec3::new(0, 0, 1),
    ]),
    // +Z
    (IVec3::new(0, 0, 1), [
        IVec3::new(0, 0, 1), IVec3::new(1, 0, 1), IVec3::new(1, 1, 1), IVec3::new(0, 1, 1),
    ]),
    // -Z
    (IVec3::new(0, 0, -1), [
        IVec3::new(0, 1, 0), IVec3::new(1, 1, 0), IVec3::new(1, 0, 0), IVec3::new(0, 0, 0),
    ]),
];

/// Mesh the exposed faces of a chunk volume into packed shadow-pass buffers.
///
/// One quad (4 vertices, 6 indices) per filled-cell face whose neighbor is
/// empty. Emission order is deterministic for a given volume.
pub fn mesh_chunk(volume: &ChunkVolume) -> Result<ChunkMeshData, MeshError> {
    let mut data = ChunkMeshData::default();

    for cell in volume.cells_sorted() {
        for (normal, corners) in &FACES {
            if volume.is_filled(cell + *normal) {
                continue;
            }
            let base = data.vertices.len() as u32;
            for corner in corners {
                let p = cell + *corner;
                data.vertices
                    .push(PackedVertex::pack(p.x as u32, p.y as u32, p.z)?);
            }
            for idx in [0, 1, 2, 0, 2, 3] {
                data.indices.push(base + idx);
            }
        }
    }

    tracing::debug!(
        cells = volume.len(),
        quads = data.quad_count(),
        vertices = data.vertex_count(),
        "meshed chunk"
    );
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn empty_volume_meshes_to_nothing() {
        let data = mesh_chunk(&ChunkVolume::new()).unwrap();
        assert!(data.vertices.is_empty());
        assert!(data.indices.is_empty());
    }

    #[test]
    fn lone_cell_exposes_six_faces() {
        let mut vol = ChunkVolume::new();
        vol.fill(4, 5, 6).unwrap();
        let data = mesh_chunk(&vol).unwrap();
        assert_eq!(data.quad_count(), 6);
        assert_eq!(data.vertex_count(), 24);
        assert_eq!(data.indices.len(), 36);
    }

    #[test]
    fn touching_cells_hide_shared_faces() {
        let mut vol = ChunkVolume::new();
        vol.fill(0, 0, 0).unwrap();
        vol.fill(1, 0, 0).unwrap();
        // 12 faces total minus the 2 shared ones.
        let data = mesh_chunk(&vol).unwrap();
        assert_eq!(data.quad_count(), 10);
    }

    #[test]
    fn vertices_decode_to_cell_corners() {
        let mut vol = ChunkVolume::new();
        vol.fill(7, 3, -12).unwrap();
        let data = mesh_chunk(&vol).unwrap();

        for v in &data.vertices {
            let p = v.decode(Vec3::ZERO);
            assert_eq!(p.w, 1.0);
            assert!(p.x == 7.0 || p.x == 8.0);
            assert!(p.y == 3.0 || p.y == 4.0);
            assert!(p.z == -12.0 || p.z == -11.0);
        }
    }

    #[test]
    fn boundary_cells_stay_inside_the_packed_ranges() {
        let mut vol = ChunkVolume::new();
        vol.fill(31, 31, crate::volume::Z_LOCAL_MAX).unwrap();
        vol.fill(0, 0, crate::volume::Z_LOCAL_MIN).unwrap();
        // Corners reach x/y = 32 and z = 32767; both must pack.
        let data = mesh_chunk(&vol).unwrap();
        assert_eq!(data.quad_count(), 12);
    }

    #[test]
    fn indices_reference_emitted_vertices() {
        let mut vol = ChunkVolume::new();
        vol.fill(1, 2, 3).unwrap();
        vol.fill(1, 2, 4).unwrap();
        let data = mesh_chunk(&vol).unwrap();
        let max = *data.indices.iter().max().unwrap();
        assert!((max as usize) < data.vertex_count());
    }
}
