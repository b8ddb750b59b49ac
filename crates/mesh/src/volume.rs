use glam::IVec3;
use shadowcast_common::CHUNK_SIZE;
use shadowcast_vertex::Z_BIAS;
use std::collections::HashSet;

/// Lowest fillable local Z cell.
pub const Z_LOCAL_MIN: i32 = -Z_BIAS;
/// Highest fillable local Z cell. A cell's top corners sit at `z + 1`, which
/// still has to fit the biased 16-bit field.
pub const Z_LOCAL_MAX: i32 = Z_BIAS - 2;

/// Error from placing a cell outside the chunk bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("cell ({x}, {y}, {z}) outside chunk bounds")]
pub struct VolumeError {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

/// Sparse occupancy of one chunk column.
///
/// X and Y are chunk-local in `0..CHUNK_SIZE`; Z is the signed local
/// vertical coordinate covered by the packed Z bias.
#[derive(Debug, Clone, Default)]
pub struct ChunkVolume {
    cells: HashSet<IVec3>,
}

impl ChunkVolume {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a cell as filled.
    pub fn fill(&mut self, x: i32, y: i32, z: i32) -> Result<(), VolumeError> {
        let horizontal = 0..CHUNK_SIZE as i32;
        if !horizontal.contains(&x)
            || !horizontal.contains(&y)
            || !(Z_LOCAL_MIN..=Z_LOCAL_MAX).contains(&z)
        {
            return Err(VolumeError { x, y, z });
        }
        self.cells.insert(IVec3::new(x, y, z));
        Ok(())
    }

    /// Whether the cell at the given local coordinate is filled.
    ///
    /// Coordinates outside the chunk read as empty, so boundary faces are
    /// always exposed.
    pub fn is_filled(&self, cell: IVec3) -> bool {
        self.cells.contains(&cell)
    }

    /// Number of filled cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Iterate filled cells in a deterministic order.
    pub fn cells_sorted(&self) -> Vec<IVec3> {
        let mut cells: Vec<_> = self.cells.iter().copied().collect();
        cells.sort_by_key(|c| (c.z, c.y, c.x));
        cells
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fill_and_query() {
        let mut vol = ChunkVolume::new();
        vol.fill(0, 0, 0).unwrap();
        assert!(vol.is_filled(IVec3::ZERO));
        assert!(!vol.is_filled(IVec3::new(1, 0, 0)));
        assert_eq!(vol.len(), 1);
    }

    #[test]
    fn fill_rejects_out_of_bounds() {
        let mut vol = ChunkVolume::new();
        assert!(vol.fill(32, 0, 0).is_err());
        assert!(vol.fill(-1, 0, 0).is_err());
        assert!(vol.fill(0, 0, Z_LOCAL_MAX + 1).is_err());
        assert!(vol.fill(0, 0, Z_LOCAL_MIN - 1).is_err());
        assert!(vol.is_empty());
    }

    #[test]
    fn fill_accepts_extremes() {
        let mut vol = ChunkVolume::new();
        vol.fill(31, 31, Z_LOCAL_MAX).unwrap();
        vol.fill(0, 0, Z_LOCAL_MIN).unwrap();
        assert_eq!(vol.len(), 2);
    }

    #[test]
    fn cells_sorted_is_deterministic() {
        let mut vol = ChunkVolume::new();
        vol.fill(5, 1, 0).unwrap();
        vol.fill(0, 2, -3).unwrap();
        vol.fill(9, 0, 0).unwrap();
        let a = vol.cells_sorted();
        let b = vol.cells_sorted();
        assert_eq!(a, b);
        assert_eq!(a[0], IVec3::new(0, 2, -3));
    }
}
