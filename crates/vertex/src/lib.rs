//! Packed vertex positions for chunked voxel geometry.
//!
//! One `u32` per vertex encodes three unsigned fields in the low 28 bits:
//! 6-bit X, 6-bit Y and a 16-bit biased Z. Decoding is a pure shift-and-mask
//! sequence with no representable error states; the high 4 bits are
//! reserved for other per-vertex data and never influence the position.
//!
//! # Invariants
//! - The three fields tile the low 28 bits with no overlap and no padding.
//! - `Z_BIAS` equals exactly half the Z field's value range, so the decoded
//!   Z range is symmetric around zero.
//! - Decode is stateless: the same input always yields the same output,
//!   independent of invocation order.

mod packed;

pub use packed::{
    PackError, PackedVertex, RESERVED_MASK, X_BITS, X_MASK, Y_BITS, Y_MASK, Y_SHIFT, Z_BIAS,
    Z_BITS, Z_MASK, Z_SHIFT,
};

pub fn crate_info() -> &'static str {
    "shadowcast-vertex v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("vertex"));
    }
}
