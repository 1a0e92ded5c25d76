//! In-memory sparse block world.
//!
//! Stores only non-air blocks. Thread-safe for concurrent reads from meshing
//! workers while an editor thread writes between frames.

use parking_lot::RwLock;
use std::collections::HashMap;

use super::{BlockClass, WorldQuery};
use crate::geometry::BlockPos;

/// Pre-allocated block capacity.
const INITIAL_BLOCK_CAPACITY: usize = 4096;

/// Sparse world keyed by block position.
pub struct GridWorld {
    /// Non-air blocks.
    blocks: RwLock<HashMap<BlockPos, BlockClass>>,
    /// Per-block light overrides. Unlisted blocks are fully lit.
    light: RwLock<HashMap<BlockPos, f32>>,
}

impl GridWorld {
    /// Creates an empty world.
    #[must_use]
    pub fn new() -> Self {
        Self {
            blocks: RwLock::new(HashMap::with_capacity(INITIAL_BLOCK_CAPACITY)),
            light: RwLock::new(HashMap::new()),
        }
    }

    /// Sets a block. Setting `Air` removes it.
    pub fn set(&self, pos: BlockPos, class: BlockClass) {
        let mut blocks = self.blocks.write();
        if class.is_air() {
            blocks.remove(&pos);
        } else {
            blocks.insert(pos, class);
        }
    }

    /// Fills the inclusive box `min..=max` with `class`.
    pub fn fill(&self, min: BlockPos, max: BlockPos, class: BlockClass) {
        let mut blocks = self.blocks.write();
        for x in min.x..=max.x {
            for y in min.y..=max.y {
                for z in min.z..=max.z {
                    let pos = BlockPos::new(x, y, z);
                    if class.is_air() {
                        blocks.remove(&pos);
                    } else {
                        blocks.insert(pos, class);
                    }
                }
            }
        }
    }

    /// Sets the light level of a block, clamped to `[0, 1]`.
    pub fn set_light(&self, pos: BlockPos, level: f32) {
        self.light.write().insert(pos, level.clamp(0.0, 1.0));
    }

    /// Number of non-air blocks.
    #[must_use]
    pub fn block_count(&self) -> usize {
        self.blocks.read().len()
    }

    /// Positions of every block matching `predicate`, sorted.
    #[must_use]
    pub fn positions_where<F>(&self, predicate: F) -> Vec<BlockPos>
    where
        F: Fn(BlockClass) -> bool,
    {
        let mut positions: Vec<BlockPos> = self
            .blocks
            .read()
            .iter()
            .filter(|(_, class)| predicate(**class))
            .map(|(pos, _)| *pos)
            .collect();
        positions.sort_unstable();
        positions
    }
}

impl Default for GridWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl WorldQuery for GridWorld {
    fn classify(&self, pos: BlockPos) -> BlockClass {
        self.blocks.read().get(&pos).copied().unwrap_or_default()
    }

    fn light_level(&self, pos: BlockPos) -> f32 {
        self.light.read().get(&pos).copied().unwrap_or(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_world_operations() {
        let world = GridWorld::new();

        world.set(BlockPos::new(5, 10, 15), BlockClass::LEAF);
        assert!(world.is_leaf(BlockPos::new(5, 10, 15)));
        assert!(world.is_air(BlockPos::new(5, 10, 16)));

        world.set(BlockPos::new(5, 10, 15), BlockClass::Air);
        assert_eq!(world.block_count(), 0);
    }

    #[test]
    fn test_fill_box() {
        let world = GridWorld::new();
        world.fill(BlockPos::new(-1, 0, -1), BlockPos::new(1, 2, 1), BlockClass::Solid);
        assert_eq!(world.block_count(), 27);
        assert!(world.is_solid(BlockPos::new(-1, 2, 1)));

        let solids = world.positions_where(BlockClass::is_solid);
        assert_eq!(solids.first(), Some(&BlockPos::new(-1, 0, -1)));
    }

    #[test]
    fn test_light_defaults_and_clamps() {
        let world = GridWorld::new();
        let pos = BlockPos::new(0, 64, 0);
        assert!((world.light_level(pos) - 1.0).abs() < f32::EPSILON);

        world.set_light(pos, -2.0);
        assert!(world.light_level(pos).abs() < f32::EPSILON);
    }
}
