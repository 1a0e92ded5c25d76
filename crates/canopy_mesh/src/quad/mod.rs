//! # Compact Quads
//!
//! A queued, not-yet-culled face is stored in one of two bit-packed forms
//! until the batch is flushed:
//!
//! | Encoding | Position    | Face   | u / v           | Color         |
//! |----------|-------------|--------|-----------------|---------------|
//! | `Packed` | 3 x 10 bits | 2 bits | 8 bits, 255 max | RGBA8888, 32  |
//! | `Ultra`  | 3 x 10 bits | 3 bits | 5 bits, 31 max  | RGB565, 16    |
//!
//! A packed quad is 12 bytes and an ultra quad 8.
//!
//! Positions are chunk-local and wrap at 1024. The packed face field only has
//! room for East, West, Up and Down: South decodes as East and North as West.

mod packed;
mod ultra;

pub use packed::PackedQuad;
pub use ultra::UltraQuad;

use canopy_cull::{BlockPos, Face};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Width of each position field.
pub const POSITION_BITS: u32 = 10;
/// Mask for one position field.
pub const POSITION_MASK: u64 = (1 << POSITION_BITS) - 1;

/// A quad before encoding or after decoding.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Quad {
    /// Block position. Only the low 10 bits of each axis survive encoding.
    pub pos: BlockPos,
    /// Face the quad belongs to.
    pub face: Face,
    /// Texture anchor u in `[0, 1]`.
    pub u: f32,
    /// Texture anchor v in `[0, 1]`.
    pub v: f32,
    /// Color as `0xRRGGBBAA`.
    pub color: u32,
}

impl Quad {
    /// Creates a quad.
    #[must_use]
    pub const fn new(pos: BlockPos, face: Face, u: f32, v: f32, color: u32) -> Self {
        Self {
            pos,
            face,
            u,
            v,
            color,
        }
    }
}

/// Which compact form new quads are stored in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
#[repr(u8)]
pub enum QuadEncoding {
    /// Lossless color, 8-bit texture coordinates, 4 faces.
    #[default]
    Packed = 0,
    /// RGB565 color, 5-bit texture coordinates, all 6 faces.
    Ultra = 1,
}

impl QuadEncoding {
    /// Numeric identifier.
    #[must_use]
    pub const fn id(self) -> u8 {
        self as u8
    }

    /// Encoding for an identifier. Unknown identifiers fall back to `Packed`.
    #[must_use]
    pub fn from_id(id: u8) -> Self {
        match id {
            0 => Self::Packed,
            1 => Self::Ultra,
            other => {
                tracing::warn!("unknown quad encoding id {}, using packed", other);
                Self::Packed
            }
        }
    }

    /// Encoding for a name (`"packed"`, `"ultra"`, case-insensitive).
    /// Unknown names fall back to `Packed`.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "packed" => Self::Packed,
            "ultra" => Self::Ultra,
            other => {
                tracing::warn!("unknown quad encoding {:?}, using packed", other);
                Self::Packed
            }
        }
    }

    /// Lower-case name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Packed => "packed",
            Self::Ultra => "ultra",
        }
    }

    /// Bytes one queued quad occupies.
    #[must_use]
    pub const fn payload_bytes(self) -> usize {
        match self {
            Self::Packed => std::mem::size_of::<PackedQuad>(),
            Self::Ultra => std::mem::size_of::<UltraQuad>(),
        }
    }

    /// Highest quantized texture coordinate value.
    #[must_use]
    pub const fn uv_max(self) -> u32 {
        match self {
            Self::Packed => packed::UV_MAX,
            Self::Ultra => ultra::UV_MAX,
        }
    }
}

impl fmt::Display for QuadEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<String> for QuadEncoding {
    fn from(name: String) -> Self {
        Self::from_name(&name)
    }
}

impl From<QuadEncoding> for String {
    fn from(encoding: QuadEncoding) -> Self {
        encoding.name().to_string()
    }
}

/// A quad in either compact form.
///
/// Carries a tag, so queues store [`PackedQuad`] and [`UltraQuad`] directly
/// instead.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CompactQuad {
    /// 48 geometry bits plus RGBA color.
    Packed(PackedQuad),
    /// Single 64-bit word.
    Ultra(UltraQuad),
}

impl CompactQuad {
    /// Encodes a quad.
    #[must_use]
    pub fn encode(encoding: QuadEncoding, quad: &Quad) -> Self {
        match encoding {
            QuadEncoding::Packed => Self::Packed(PackedQuad::encode(quad)),
            QuadEncoding::Ultra => Self::Ultra(UltraQuad::encode(quad)),
        }
    }

    /// Decodes back to a quad, with quantization loss.
    #[must_use]
    pub fn decode(&self) -> Quad {
        match self {
            Self::Packed(q) => q.decode(),
            Self::Ultra(q) => q.decode(),
        }
    }

    /// Encoding this quad was stored with.
    #[must_use]
    pub const fn encoding(&self) -> QuadEncoding {
        match self {
            Self::Packed(_) => QuadEncoding::Packed,
            Self::Ultra(_) => QuadEncoding::Ultra,
        }
    }
}

/// Truncates a coordinate to its 10-bit field.
#[inline]
pub(crate) const fn position_field(coord: i32) -> u64 {
    coord as u64 & POSITION_MASK
}

/// Reads a 10-bit position field back as a coordinate in `0..1024`.
#[inline]
#[allow(clippy::cast_possible_truncation)]
pub(crate) const fn position_value(word: u64, shift: u32) -> i32 {
    ((word >> shift) & POSITION_MASK) as i32
}

/// Quantizes `value` in `[0, 1]` to `0..=max` with round-to-nearest.
#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub(crate) fn quantize(value: f32, max: u32) -> u64 {
    let clamped = if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) };
    (clamped * max as f32).round() as u64
}

/// Inverse of [`quantize`].
#[inline]
#[allow(clippy::cast_precision_loss)]
pub(crate) fn dequantize(level: u64, max: u32) -> f32 {
    level as f32 / max as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantize_bounds() {
        assert_eq!(quantize(0.0, 31), 0);
        assert_eq!(quantize(1.0, 31), 31);
        assert_eq!(quantize(2.0, 255), 255);
        assert_eq!(quantize(-1.0, 255), 0);
        assert_eq!(quantize(f32::NAN, 255), 0);
        assert_eq!(quantize(0.5, 31), 16);
    }

    #[test]
    fn test_payload_bytes_match_storage() {
        assert_eq!(QuadEncoding::Packed.payload_bytes(), 12);
        assert_eq!(QuadEncoding::Ultra.payload_bytes(), 8);
    }

    #[test]
    fn test_encoding_fallback() {
        assert_eq!(QuadEncoding::from_id(1), QuadEncoding::Ultra);
        assert_eq!(QuadEncoding::from_id(9), QuadEncoding::Packed);
        assert_eq!(QuadEncoding::from_name("ULTRA"), QuadEncoding::Ultra);
        assert_eq!(QuadEncoding::from_name("sixteen-byte"), QuadEncoding::Packed);
    }

    #[test]
    fn test_compact_quad_remembers_encoding() {
        let quad = Quad::new(BlockPos::new(1, 2, 3), Face::Up, 0.0, 1.0, 0xFFFF_FFFF);
        for encoding in [QuadEncoding::Packed, QuadEncoding::Ultra] {
            let compact = CompactQuad::encode(encoding, &quad);
            assert_eq!(compact.encoding(), encoding);
            assert_eq!(compact.decode().pos, quad.pos);
        }
    }
}
