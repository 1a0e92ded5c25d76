//! # Geometry Primitives
//!
//! Block coordinates, the six face directions, and the 64-bit coordinate key
//! used by the decision cache.
//!
//! ## Key Layout
//!
//! ```text
//!  63                38 37        26 25                 0
//! ┌────────────────────┬────────────┬────────────────────┐
//! │   x (26, signed)   │ y (12, u)  │   z (26, signed)   │
//! └────────────────────┴────────────┴────────────────────┘
//! ```
//!
//! Coordinates outside `|x|, |z| < 2^25` and `0 <= y < 2^12` alias silently.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Width of the x field in a packed key.
pub const PACKED_X_BITS: u32 = 26;
/// Width of the y field in a packed key.
pub const PACKED_Y_BITS: u32 = 12;
/// Width of the z field in a packed key.
pub const PACKED_Z_BITS: u32 = 26;

/// Bit offset of the z field.
pub const PACKED_Z_SHIFT: u32 = 0;
/// Bit offset of the y field.
pub const PACKED_Y_SHIFT: u32 = PACKED_Z_BITS;
/// Bit offset of the x field.
pub const PACKED_X_SHIFT: u32 = PACKED_Z_BITS + PACKED_Y_BITS;

const PACKED_X_MASK: u64 = (1 << PACKED_X_BITS) - 1;
const PACKED_Y_MASK: u64 = (1 << PACKED_Y_BITS) - 1;
const PACKED_Z_MASK: u64 = (1 << PACKED_Z_BITS) - 1;

/// Integer position of a block in the world grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BlockPos {
    /// X coordinate.
    pub x: i32,
    /// Y coordinate (height). Assumed non-negative for packing.
    pub y: i32,
    /// Z coordinate.
    pub z: i32,
}

impl BlockPos {
    /// The origin block.
    pub const ORIGIN: Self = Self::new(0, 0, 0);

    /// Creates a new block position.
    #[inline]
    #[must_use]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Packs this position into a 64-bit key.
    ///
    /// Out-of-range values wrap into their field and alias other positions.
    #[inline]
    #[must_use]
    pub const fn pack(self) -> u64 {
        ((self.x as u64 & PACKED_X_MASK) << PACKED_X_SHIFT)
            | ((self.y as u64 & PACKED_Y_MASK) << PACKED_Y_SHIFT)
            | ((self.z as u64 & PACKED_Z_MASK) << PACKED_Z_SHIFT)
    }

    /// Unpacks a 64-bit key produced by [`BlockPos::pack`].
    ///
    /// x and z are sign-extended, y is read as unsigned.
    #[inline]
    #[must_use]
    pub const fn unpack(key: u64) -> Self {
        // x sits at the top of the word, so an arithmetic shift sign-extends it.
        let x = (key as i64) >> PACKED_X_SHIFT;
        let y = (key >> PACKED_Y_SHIFT) & PACKED_Y_MASK;
        let z = ((key << (64 - PACKED_Z_BITS)) as i64) >> (64 - PACKED_Z_BITS);
        Self {
            x: x as i32,
            y: y as i32,
            z: z as i32,
        }
    }

    /// Returns the position one step in the given direction.
    #[inline]
    #[must_use]
    pub const fn step(self, face: Face) -> Self {
        self.offset_by(face, 1)
    }

    /// Returns the position `distance` steps in the given direction.
    #[inline]
    #[must_use]
    pub const fn offset_by(self, face: Face, distance: i32) -> Self {
        let [dx, dy, dz] = face.offset();
        Self::new(
            self.x.wrapping_add(dx * distance),
            self.y.wrapping_add(dy * distance),
            self.z.wrapping_add(dz * distance),
        )
    }

    /// Returns the position shifted by an arbitrary delta.
    #[inline]
    #[must_use]
    pub const fn offset(self, dx: i32, dy: i32, dz: i32) -> Self {
        Self::new(
            self.x.wrapping_add(dx),
            self.y.wrapping_add(dy),
            self.z.wrapping_add(dz),
        )
    }

    /// Returns the center of this block in world space.
    #[inline]
    #[must_use]
    pub fn center(self) -> [f64; 3] {
        [
            f64::from(self.x) + 0.5,
            f64::from(self.y) + 0.5,
            f64::from(self.z) + 0.5,
        ]
    }

    /// Euclidean distance from the block center to a point.
    #[must_use]
    pub fn distance_to(self, point: [f64; 3]) -> f64 {
        let [cx, cy, cz] = self.center();
        let (dx, dy, dz) = (cx - point[0], cy - point[1], cz - point[2]);
        (dx * dx + dy * dy + dz * dz).sqrt()
    }
}

impl fmt::Display for BlockPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

impl From<[i32; 3]> for BlockPos {
    fn from(arr: [i32; 3]) -> Self {
        Self::new(arr[0], arr[1], arr[2])
    }
}

/// One of the six axis-aligned face directions.
///
/// Directions come in opposite pairs, so flipping the lowest bit of the index
/// yields the opposite face.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum Face {
    /// +X
    East = 0,
    /// -X
    West = 1,
    /// +Y
    Up = 2,
    /// -Y
    Down = 3,
    /// +Z
    South = 4,
    /// -Z
    North = 5,
}

impl Face {
    /// All faces in index order.
    pub const ALL: [Self; 6] = [
        Self::East,
        Self::West,
        Self::Up,
        Self::Down,
        Self::South,
        Self::North,
    ];

    /// The four faces perpendicular to the Y axis.
    pub const HORIZONTAL: [Self; 4] = [Self::East, Self::West, Self::South, Self::North];

    /// Returns the face index (0-5).
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Converts an index back to a face. Only the low three bits are read;
    /// indices 6 and 7 wrap onto `East` and `West`.
    #[inline]
    #[must_use]
    pub const fn from_index(index: usize) -> Self {
        match index & 0b111 {
            0 | 6 => Self::East,
            1 | 7 => Self::West,
            2 => Self::Up,
            3 => Self::Down,
            4 => Self::South,
            _ => Self::North,
        }
    }

    /// Returns the opposite face.
    #[inline]
    #[must_use]
    pub const fn opposite(self) -> Self {
        Self::from_index(self.index() ^ 1)
    }

    /// Unit offset of this face.
    #[inline]
    #[must_use]
    pub const fn offset(self) -> [i32; 3] {
        match self {
            Self::East => [1, 0, 0],
            Self::West => [-1, 0, 0],
            Self::Up => [0, 1, 0],
            Self::Down => [0, -1, 0],
            Self::South => [0, 0, 1],
            Self::North => [0, 0, -1],
        }
    }

    /// Unit normal of this face as floats.
    #[inline]
    #[must_use]
    pub fn normal(self) -> [f32; 3] {
        match self {
            Self::East => [1.0, 0.0, 0.0],
            Self::West => [-1.0, 0.0, 0.0],
            Self::Up => [0.0, 1.0, 0.0],
            Self::Down => [0.0, -1.0, 0.0],
            Self::South => [0.0, 0.0, 1.0],
            Self::North => [0.0, 0.0, -1.0],
        }
    }

    /// True for `Up` and `Down`.
    #[inline]
    #[must_use]
    pub const fn is_vertical(self) -> bool {
        matches!(self, Self::Up | Self::Down)
    }

    /// Lower-case name of the face.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::East => "east",
            Self::West => "west",
            Self::Up => "up",
            Self::Down => "down",
            Self::South => "south",
            Self::North => "north",
        }
    }
}

impl fmt::Display for Face {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pack_x_field() {
        let key = BlockPos::new(-3, 0, 0).pack();
        assert_eq!(key & ((1 << PACKED_X_SHIFT) - 1), 0);
        assert_eq!(BlockPos::unpack(key).x, -3);
        assert_eq!(BlockPos::new(1, 0, 0).pack(), 1 << PACKED_X_SHIFT);
    }

    #[test]
    fn test_pack_y_field() {
        let key = BlockPos::new(0, 4095, 0).pack();
        assert_eq!(key, PACKED_Y_MASK << PACKED_Y_SHIFT);
        assert_eq!(BlockPos::unpack(key).y, 4095);
    }

    #[test]
    fn test_pack_z_field() {
        let key = BlockPos::new(0, 0, -1).pack();
        assert_eq!(key, PACKED_Z_MASK);
        assert_eq!(BlockPos::unpack(key).z, -1);
    }

    #[test]
    fn test_pack_roundtrip_extremes() {
        let limit = (1 << 25) - 1;
        for pos in [
            BlockPos::new(limit, 4095, -limit),
            BlockPos::new(-limit, 0, limit),
            BlockPos::new(123_456, 64, -987_654),
            BlockPos::ORIGIN,
        ] {
            assert_eq!(BlockPos::unpack(pos.pack()), pos);
        }
    }

    #[test]
    fn test_out_of_range_y_aliases() {
        // y has no sign handling: 4096 wraps onto 0.
        assert_eq!(BlockPos::new(7, 4096, 7).pack(), BlockPos::new(7, 0, 7).pack());
    }

    #[test]
    fn test_opposite_faces() {
        for face in Face::ALL {
            assert_ne!(face, face.opposite());
            assert_eq!(face.opposite().opposite(), face);
            let [a, b, c] = face.offset();
            assert_eq!(face.opposite().offset(), [-a, -b, -c]);
        }
    }

    #[test]
    fn test_step() {
        let pos = BlockPos::new(1, 2, 3);
        assert_eq!(pos.step(Face::Up), BlockPos::new(1, 3, 3));
        assert_eq!(pos.offset_by(Face::West, 3), BlockPos::new(-2, 2, 3));
    }
}
