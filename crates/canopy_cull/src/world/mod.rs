//! # World Query Contract
//!
//! The block world is owned elsewhere. Heuristics only see it through
//! [`WorldQuery`], which must be side-effect free and consistent for the
//! duration of a frame.

mod grid;

pub use grid::GridWorld;

use crate::geometry::BlockPos;

/// Classification of a block for culling purposes.
///
/// Only `Leaf` and `Solid` drive culling. `Air` and `Transparent` both behave
/// as see-through for neighbor checks.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum BlockClass {
    /// Empty cell.
    #[default]
    Air,
    /// Foliage block.
    Leaf {
        /// Leaf variant (species, texture set).
        variant: u16,
        /// Foliage density (0-255).
        density: u8,
    },
    /// Fully opaque block.
    Solid,
    /// Partially transparent block (glass, water, ...).
    Transparent {
        /// Opacity (0 = invisible, 255 = nearly opaque).
        opacity: u8,
    },
}

impl BlockClass {
    /// Default leaf with full density.
    pub const LEAF: Self = Self::Leaf {
        variant: 0,
        density: u8::MAX,
    };

    /// True for foliage.
    #[inline]
    #[must_use]
    pub const fn is_leaf(self) -> bool {
        matches!(self, Self::Leaf { .. })
    }

    /// True for opaque blocks.
    #[inline]
    #[must_use]
    pub const fn is_solid(self) -> bool {
        matches!(self, Self::Solid)
    }

    /// True for empty cells.
    #[inline]
    #[must_use]
    pub const fn is_air(self) -> bool {
        matches!(self, Self::Air)
    }

    /// True if this block hides what lies behind it (foliage or solid).
    #[inline]
    #[must_use]
    pub const fn occludes(self) -> bool {
        matches!(self, Self::Leaf { .. } | Self::Solid)
    }
}

/// Read-only view of the block world consumed by every heuristic.
///
/// Implementations may be called many times per face per frame from several
/// worker threads at once.
pub trait WorldQuery {
    /// Classifies the block at `pos`.
    fn classify(&self, pos: BlockPos) -> BlockClass;

    /// Light level at `pos` in `[0, 1]`.
    fn light_level(&self, _pos: BlockPos) -> f32 {
        1.0
    }

    /// True if the block at `pos` is foliage.
    #[inline]
    fn is_leaf(&self, pos: BlockPos) -> bool {
        self.classify(pos).is_leaf()
    }

    /// True if the block at `pos` is solid.
    #[inline]
    fn is_solid(&self, pos: BlockPos) -> bool {
        self.classify(pos).is_solid()
    }

    /// True if the block at `pos` is air.
    #[inline]
    fn is_air(&self, pos: BlockPos) -> bool {
        self.classify(pos).is_air()
    }

    /// True if the block at `pos` is foliage or solid.
    #[inline]
    fn occludes(&self, pos: BlockPos) -> bool {
        self.classify(pos).occludes()
    }
}

impl<W: WorldQuery + ?Sized> WorldQuery for &W {
    fn classify(&self, pos: BlockPos) -> BlockClass {
        (**self).classify(pos)
    }

    fn light_level(&self, pos: BlockPos) -> f32 {
        (**self).light_level(pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Checkerboard;

    impl WorldQuery for Checkerboard {
        fn classify(&self, pos: BlockPos) -> BlockClass {
            if (pos.x + pos.y + pos.z) % 2 == 0 {
                BlockClass::LEAF
            } else {
                BlockClass::Transparent { opacity: 128 }
            }
        }
    }

    #[test]
    fn test_derived_predicates() {
        let world = Checkerboard;
        assert!(world.is_leaf(BlockPos::ORIGIN));
        assert!(world.occludes(BlockPos::ORIGIN));
        assert!(!world.is_air(BlockPos::new(1, 0, 0)));
        assert!(!world.occludes(BlockPos::new(1, 0, 0)));
        assert!(!world.is_solid(BlockPos::new(1, 0, 0)));
    }

    #[test]
    fn test_default_light_level() {
        assert!((Checkerboard.light_level(BlockPos::ORIGIN) - 1.0).abs() < f32::EPSILON);
    }
}
