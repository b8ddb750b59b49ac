use bytemuck::{Pod, Zeroable};
use glam::{IVec3, Vec3, Vec4};
use serde::{Deserialize, Serialize};

/// Width of the X field in bits.
pub const X_BITS: u32 = 6;
/// Width of the Y field in bits.
pub const Y_BITS: u32 = 6;
/// Width of the Z field in bits.
pub const Z_BITS: u32 = 16;

/// Bit offset of the Y field.
pub const Y_SHIFT: u32 = X_BITS;
/// Bit offset of the Z field.
pub const Z_SHIFT: u32 = X_BITS + Y_BITS;

/// Mask for the X field after shifting.
pub const X_MASK: u32 = (1 << X_BITS) - 1;
/// Mask for the Y field after shifting.
pub const Y_MASK: u32 = (1 << Y_BITS) - 1;
/// Mask for the Z field after shifting.
pub const Z_MASK: u32 = (1 << Z_BITS) - 1;

/// Offset subtracted from the raw Z field so signed local Z coordinates fit
/// in unsigned storage. Must equal exactly half the Z field's value range or
/// decoded Z values become asymmetric.
pub const Z_BIAS: i32 = 1 << (Z_BITS - 1);

/// Bits above the three position fields, reserved for normal/light data.
pub const RESERVED_MASK: u32 = !((1 << (X_BITS + Y_BITS + Z_BITS)) - 1);

/// Error from packing out-of-range field values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PackError {
    #[error("x component {0} exceeds the 6-bit field range 0..=63")]
    XOutOfRange(u32),
    #[error("y component {0} exceeds the 6-bit field range 0..=63")]
    YOutOfRange(u32),
    #[error("z component {0} outside the biased 16-bit range -32768..=32767")]
    ZOutOfRange(i32),
}

/// A single packed per-vertex position attribute.
///
/// Layout (low to high): X bits [0,6), Y bits [6,12), Z bits [12,28),
/// bits [28,32) reserved and ignored by this decode path.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Pod, Zeroable, Serialize, Deserialize)]
pub struct PackedVertex(pub u32);

impl PackedVertex {
    /// Pack local coordinates into the 28 used bits.
    ///
    /// The reserved high bits of the result are always zero.
    pub fn pack(x: u32, y: u32, z: i32) -> Result<Self, PackError> {
        if x > X_MASK {
            return Err(PackError::XOutOfRange(x));
        }
        if y > Y_MASK {
            return Err(PackError::YOutOfRange(y));
        }
        let z_raw = i64::from(z) + i64::from(Z_BIAS);
        if !(0..=i64::from(Z_MASK)).contains(&z_raw) {
            return Err(PackError::ZOutOfRange(z));
        }
        Ok(Self(x | (y << Y_SHIFT) | ((z_raw as u32) << Z_SHIFT)))
    }

    /// Raw attribute value as uploaded to the GPU.
    pub fn raw(self) -> u32 {
        self.0
    }

    /// Reinterpret a raw attribute value. Garbage in the reserved bits is
    /// accepted silently; it cannot affect the decoded position.
    pub fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// Extract the signed local integer coordinate.
    pub fn unpack(self) -> IVec3 {
        let x = self.0 & X_MASK;
        let y = (self.0 >> Y_SHIFT) & Y_MASK;
        let z_raw = (self.0 >> Z_SHIFT) & Z_MASK;
        IVec3::new(x as i32, y as i32, z_raw as i32 - Z_BIAS)
    }

    /// Decode to a homogeneous world-space position.
    ///
    /// Output w is exactly 1.0: an affine point, ready for a light-space or
    /// view-projection multiply. No perspective divide happens here.
    pub fn decode(self, chunk_offset: Vec3) -> Vec4 {
        let world = self.unpack().as_vec3() + chunk_offset;
        world.extend(1.0)
    }
}
