//! Packed encoding: 48 geometry bits plus a lossless RGBA color, stored as
//! three `u32` words so a queued quad takes 12 bytes with no padding.
//!
//! ```text
//! geometry (bits 0..48, low half in words[0], high half in words[1])
//!  63      48 47    40 39    32 31 30 29     20 19     10 9      0
//! ┌──────────┬────────┬────────┬─────┬─────────┬─────────┬────────┐
//! │  unused  │ v (8)  │ u (8)  │face │  z (10) │  y (10) │ x (10) │
//! └──────────┴────────┴────────┴─────┴─────────┴─────────┴────────┘
//! words[2]: color, 0xRRGGBBAA
//! ```

use super::{dequantize, position_field, position_value, quantize, Quad};
use canopy_cull::{BlockPos, Face};

/// Bit offset of x.
pub const X_SHIFT: u32 = 0;
/// Bit offset of y.
pub const Y_SHIFT: u32 = 10;
/// Bit offset of z.
pub const Z_SHIFT: u32 = 20;
/// Bit offset of the face.
pub const FACE_SHIFT: u32 = 30;
/// Width of the face field. Too narrow for six faces.
pub const FACE_BITS: u32 = 2;
/// Bit offset of u.
pub const U_SHIFT: u32 = 32;
/// Bit offset of v.
pub const V_SHIFT: u32 = 40;
/// Width of each texture coordinate field.
pub const UV_BITS: u32 = 8;
/// Highest quantized texture coordinate.
pub const UV_MAX: u32 = (1 << UV_BITS) - 1;

const FACE_MASK: u64 = (1 << FACE_BITS) - 1;
const UV_MASK: u64 = (1 << UV_BITS) - 1;

/// Quad in packed form.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct PackedQuad {
    /// Geometry low word, geometry high word, color.
    pub words: [u32; 3],
}

impl PackedQuad {
    /// Position, face and texture anchor as one word.
    #[inline]
    #[must_use]
    pub const fn geometry(&self) -> u64 {
        self.words[0] as u64 | ((self.words[1] as u64) << 32)
    }

    /// Color as `0xRRGGBBAA`.
    #[inline]
    #[must_use]
    pub const fn color(&self) -> u32 {
        self.words[2]
    }

    /// Encodes a quad. Position wraps at 1024; South and North alias onto
    /// East and West.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn encode(quad: &Quad) -> Self {
        let geometry: u64 = (position_field(quad.pos.x) << X_SHIFT)
            | (position_field(quad.pos.y) << Y_SHIFT)
            | (position_field(quad.pos.z) << Z_SHIFT)
            | ((quad.face.index() as u64 & FACE_MASK) << FACE_SHIFT)
            | (quantize(quad.u, UV_MAX) << U_SHIFT)
            | (quantize(quad.v, UV_MAX) << V_SHIFT);
        Self {
            words: [geometry as u32, (geometry >> 32) as u32, quad.color],
        }
    }

    /// Decodes the quad.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn decode(&self) -> Quad {
        let word = self.geometry();
        Quad {
            pos: BlockPos::new(
                position_value(word, X_SHIFT),
                position_value(word, Y_SHIFT),
                position_value(word, Z_SHIFT),
            ),
            face: Face::from_index(((word >> FACE_SHIFT) & FACE_MASK) as usize),
            u: dequantize((word >> U_SHIFT) & UV_MASK, UV_MAX),
            v: dequantize((word >> V_SHIFT) & UV_MASK, UV_MAX),
            color: self.color(),
        }
    }
}
