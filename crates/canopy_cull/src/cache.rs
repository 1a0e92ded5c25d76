//! # Decision Cache
//!
//! Memoizes heuristic output per `(position, face)` for the active heuristic.
//!
//! The key is the packed block coordinate XORed with the face index shifted
//! into the top three bits. Those bits overlap the sign extension of x, so
//! positions with `|x| >= 2^23` can collide across faces; the aliasing is
//! accepted like the coordinate packing itself.
//!
//! There is no capacity bound and no eviction. Callers clear the cache when
//! the heuristic changes or the world is edited.
//!
//! ## Concurrency
//!
//! Reads and inserts go through a sharded [`DashMap`] and need no outer lock.
//! Two threads missing on the same key both compute; heuristics are pure, so
//! both store the same value.

use dashmap::DashMap;

use crate::decision::CullDecision;
use crate::geometry::{BlockPos, Face};

/// Bit offset of the face index inside a cache key.
pub const FACE_KEY_SHIFT: u32 = 61;

/// Initial capacity, in decisions.
const INITIAL_CAPACITY: usize = 1 << 14;

/// Builds the cache key for a face.
#[inline]
#[must_use]
pub const fn cache_key(pos: BlockPos, face: Face) -> u64 {
    pos.pack() ^ ((face as u64) << FACE_KEY_SHIFT)
}

/// Concurrent `(position, face) -> decision` table.
pub struct DecisionCache {
    entries: DashMap<u64, CullDecision>,
}

impl DecisionCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: DashMap::with_capacity(INITIAL_CAPACITY),
        }
    }

    /// Returns the cached decision, if any.
    #[inline]
    #[must_use]
    pub fn get(&self, pos: BlockPos, face: Face) -> Option<CullDecision> {
        self.entries.get(&cache_key(pos, face)).map(|entry| *entry)
    }

    /// Stores a decision, replacing any previous one.
    #[inline]
    pub fn insert(&self, pos: BlockPos, face: Face, decision: CullDecision) {
        self.entries.insert(cache_key(pos, face), decision);
    }

    /// Returns the cached decision or computes and stores it.
    ///
    /// The second element is `true` on a hit. The shard lock is not held while
    /// `compute` runs.
    pub fn get_or_compute<F>(&self, pos: BlockPos, face: Face, compute: F) -> (CullDecision, bool)
    where
        F: FnOnce() -> CullDecision,
    {
        let key = cache_key(pos, face);
        if let Some(entry) = self.entries.get(&key) {
            return (*entry, true);
        }

        let decision = compute();
        self.entries.insert(key, decision);
        (decision, false)
    }

    /// Drops every entry and returns how many were dropped.
    pub fn clear(&self) -> usize {
        let dropped = self.entries.len();
        self.entries.clear();
        dropped
    }

    /// Number of cached decisions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if nothing is cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for DecisionCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_faces_get_distinct_keys() {
        let pos = BlockPos::new(12, 70, -40);
        let mut keys: Vec<u64> = Face::ALL.iter().map(|&f| cache_key(pos, f)).collect();
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), 6);
    }

    #[test]
    fn test_face_bits_live_at_top() {
        let pos = BlockPos::new(5, 5, 5);
        assert_eq!(cache_key(pos, Face::East), pos.pack());
        assert_eq!(cache_key(pos, Face::North) ^ pos.pack(), 5 << FACE_KEY_SHIFT);
    }

    #[test]
    fn test_get_or_compute_runs_once() {
        let cache = DecisionCache::new();
        let pos = BlockPos::new(1, 2, 3);

        let (first, hit) = cache.get_or_compute(pos, Face::Up, || CullDecision::ENCLOSED);
        assert!(!hit);
        assert_eq!(first, CullDecision::ENCLOSED);

        let (second, hit) = cache.get_or_compute(pos, Face::Up, || CullDecision::RENDER);
        assert!(hit);
        assert_eq!(second, CullDecision::ENCLOSED);

        assert_eq!(cache.len(), 1);
        assert_eq!(cache.clear(), 1);
        assert!(cache.is_empty());
        assert_eq!(cache.get(pos, Face::Up), None);
    }
}
