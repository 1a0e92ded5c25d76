//! Ultra encoding: everything in one 64-bit word.
//!
//! ```text
//!  63  59 58         43 42   38 37   33 32  30 29    20 19    10 9     0
//! ┌──────┬─────────────┬───────┬───────┬──────┬────────┬────────┬───────┐
//! │unused│ RGB565 (16) │ v (5) │ u (5) │ face │ z (10) │ y (10) │ x (10)│
//! └──────┴─────────────┴───────┴───────┴──────┴────────┴────────┴───────┘
//! ```
//!
//! Alpha is dropped and decodes as opaque.

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
/// Width of the face field.
pub const FACE_BITS: u32 = 3;
/// Bit offset of u.
pub const U_SHIFT: u32 = 33;
/// Bit offset of v.
pub const V_SHIFT: u32 = 38;
/// Width of each texture coordinate field.
pub const UV_BITS: u32 = 5;
/// Highest quantized texture coordinate.
pub const UV_MAX: u32 = (1 << UV_BITS) - 1;
/// Bit offset of the RGB565 color.
pub const COLOR_SHIFT: u32 = 43;

const FACE_MASK: u64 = (1 << FACE_BITS) - 1;
const UV_MASK: u64 = (1 << UV_BITS) - 1;
const COLOR_MASK: u64 = 0xFFFF;

/// Quad in ultra form.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct UltraQuad {
    /// Position, face, texture anchor and color.
    pub word: u64,
}

impl UltraQuad {
    /// Encodes a quad. Position wraps at 1024; color loses precision and alpha.
    #[must_use]
    pub fn encode(quad: &Quad) -> Self {
        let word = (position_field(quad.pos.x) << X_SHIFT)
            | (position_field(quad.pos.y) << Y_SHIFT)
            | (position_field(quad.pos.z) << Z_SHIFT)
            | ((quad.face.index() as u64 & FACE_MASK) << FACE_SHIFT)
            | (quantize(quad.u, UV_MAX) << U_SHIFT)
            | (quantize(quad.v, UV_MAX) << V_SHIFT)
            | (u64::from(rgba_to_rgb565(quad.color)) << COLOR_SHIFT);
        Self { word }
    }

    /// Decodes the quad.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn decode(&self) -> Quad {
        let word = self.word;
        Quad {
            pos: BlockPos::new(
                position_value(word, X_SHIFT),
                position_value(word, Y_SHIFT),
                position_value(word, Z_SHIFT),
            ),
            face: Face::from_index(((word >> FACE_SHIFT) & FACE_MASK) as usize),
            u: dequantize((word >> U_SHIFT) & UV_MASK, UV_MAX),
            v: dequantize((word >> V_SHIFT) & UV_MASK, UV_MAX),
            color: rgb565_to_rgba(((word >> COLOR_SHIFT) & COLOR_MASK) as u16),
        }
    }
}

/// Down-samples `0xRRGGBBAA` to RGB565.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub const fn rgba_to_rgb565(rgba: u32) -> u16 {
    let r = (rgba >> 24) & 0xFF;
    let g = (rgba >> 16) & 0xFF;
    let b = (rgba >> 8) & 0xFF;
    (((r >> 3) << 11) | ((g >> 2) << 5) | (b >> 3)) as u16
}

/// Expands RGB565 to `0xRRGGBBFF`, replicating high bits into the low ones.
#[must_use]
pub const fn rgb565_to_rgba(rgb: u16) -> u32 {
    let rgb = rgb as u32;
    let r5 = (rgb >> 11) & 0x1F;
    let g6 = (rgb >> 5) & 0x3F;
    let b5 = rgb & 0x1F;
    let r = (r5 << 3) | (r5 >> 2);
    let g = (g6 << 2) | (g6 >> 4);
    let b = (b5 << 3) | (b5 >> 2);
    (r << 24) | (g << 16) | (b << 8) | 0xFF
}
