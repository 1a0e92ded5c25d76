//! Culling statistics.
//!
//! Lock-free counters incremented from every meshing thread.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::decision::{CullDecision, CullReason};

/// Live counters.
#[derive(Debug, Default)]
pub struct CullStats {
    /// Faces evaluated.
    checks: AtomicU64,
    /// Faces culled.
    culled: AtomicU64,
    /// Decisions by reason. `Visible` counts rendered faces.
    by_reason: [AtomicU64; CullReason::COUNT],
    /// Decisions served from the cache.
    cache_hits: AtomicU64,
    /// Decisions computed by a heuristic.
    cache_misses: AtomicU64,
}

impl CullStats {
    /// Creates zeroed counters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one evaluated face and its outcome.
    #[inline]
    pub fn record_decision(&self, decision: &CullDecision) {
        self.checks.fetch_add(1, Ordering::Relaxed);
        if decision.should_cull {
            self.culled.fetch_add(1, Ordering::Relaxed);
        }
        self.by_reason[decision.reason.index()].fetch_add(1, Ordering::Relaxed);
    }

    /// Records a cache lookup.
    #[inline]
    pub fn record_lookup(&self, hit: bool) {
        if hit {
            self.cache_hits.fetch_add(1, Ordering::Relaxed);
        } else {
            self.cache_misses.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Zeroes every counter.
    pub fn reset(&self) {
        self.checks.store(0, Ordering::Relaxed);
        self.culled.store(0, Ordering::Relaxed);
        for counter in &self.by_reason {
            counter.store(0, Ordering::Relaxed);
        }
        self.cache_hits.store(0, Ordering::Relaxed);
        self.cache_misses.store(0, Ordering::Relaxed);
    }

    /// Copies the counters. Not atomic across fields.
    ///
    /// `culled` is read before `checks`, mirroring the increment order in
    /// [`CullStats::record_decision`], so a snapshot taken under load does
    /// not report more culls than checks.
    #[must_use]
    pub fn snapshot(&self) -> CullStatsSnapshot {
        let culled = self.culled.load(Ordering::Relaxed);
        let checks = self.checks.load(Ordering::Relaxed);
        let mut by_reason = [0u64; CullReason::COUNT];
        for (slot, counter) in by_reason.iter_mut().zip(&self.by_reason) {
            *slot = counter.load(Ordering::Relaxed);
        }
        CullStatsSnapshot {
            checks,
            culled,
            by_reason,
            cache_hits: self.cache_hits.load(Ordering::Relaxed),
            cache_misses: self.cache_misses.load(Ordering::Relaxed),
        }
    }
}

/// Plain copy of [`CullStats`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CullStatsSnapshot {
    /// Faces evaluated.
    pub checks: u64,
    /// Faces culled.
    pub culled: u64,
    /// Decisions by reason, indexed by [`CullReason::index`].
    pub by_reason: [u64; CullReason::COUNT],
    /// Cache hits.
    pub cache_hits: u64,
    /// Cache misses.
    pub cache_misses: u64,
}

impl CullStatsSnapshot {
    /// Count for one reason.
    #[must_use]
    pub const fn reason_count(&self, reason: CullReason) -> u64 {
        self.by_reason[reason.index()]
    }

    /// Faces rendered. Zero if a torn snapshot shows more culls than checks.
    #[must_use]
    pub const fn rendered(&self) -> u64 {
        self.checks.saturating_sub(self.culled)
    }

    /// Fraction of checks that culled.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn cull_ratio(&self) -> f64 {
        if self.checks == 0 {
            0.0
        } else {
            self.culled as f64 / self.checks as f64
        }
    }

    /// Fraction of lookups served from the cache.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn cache_hit_ratio(&self) -> f64 {
        let lookups = self.cache_hits + self.cache_misses;
        if lookups == 0 {
            0.0
        } else {
            self.cache_hits as f64 / lookups as f64
        }
    }
}

impl fmt::Display for CullStatsSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "checks: {}  culled: {} ({:.1}%)  rendered: {}",
            self.checks,
            self.culled,
            self.cull_ratio() * 100.0,
            self.rendered()
        )?;
        writeln!(
            f,
            "cache: {} hits / {} misses ({:.1}% hit rate)",
            self.cache_hits,
            self.cache_misses,
            self.cache_hit_ratio() * 100.0
        )?;
        write!(f, "reasons:")?;
        for reason in CullReason::ALL {
            let count = self.reason_count(reason);
            if reason != CullReason::Visible && count > 0 {
                write!(f, " {}={}", reason.tag(), count)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_and_snapshot() {
        let stats = CullStats::new();
        stats.record_decision(&CullDecision::RENDER);
        stats.record_decision(&CullDecision::ENCLOSED);
        stats.record_decision(&CullDecision::ENCLOSED);
        stats.record_lookup(true);
        stats.record_lookup(false);

        let snap = stats.snapshot();
        assert_eq!(snap.checks, 3);
        assert_eq!(snap.culled, 2);
        assert_eq!(snap.rendered(), 1);
        assert_eq!(snap.reason_count(CullReason::Enclosed), 2);
        assert_eq!(snap.reason_count(CullReason::Visible), 1);
        assert!((snap.cache_hit_ratio() - 0.5).abs() < 1e-12);

        let text = snap.to_string();
        assert!(text.contains("enclosed=2"));

        stats.reset();
        assert_eq!(stats.snapshot(), CullStatsSnapshot::default());
    }

    #[test]
    fn test_concurrent_increments() {
        let stats = CullStats::new();
        std::thread::scope(|scope| {
            for _ in 0..8 {
                scope.spawn(|| {
                    for _ in 0..1000 {
                        stats.record_decision(&CullDecision::ADJACENT);
                        stats.record_lookup(false);
                    }
                });
            }
        });
        let snap = stats.snapshot();
        assert_eq!(snap.checks, 8000);
        assert_eq!(snap.reason_count(CullReason::Adjacent), 8000);
        assert_eq!(snap.cache_misses, 8000);
    }

    #[test]
    fn test_snapshot_during_increments() {
        let stats = CullStats::new();
        let done = std::sync::atomic::AtomicBool::new(false);
        std::thread::scope(|scope| {
            for _ in 0..3 {
                scope.spawn(|| {
                    while !done.load(Ordering::Relaxed) {
                        stats.record_decision(&CullDecision::ENCLOSED);
                    }
                });
            }
            for _ in 0..10_000 {
                let snap = stats.snapshot();
                assert!(snap.rendered() <= snap.checks);
                assert!(!snap.to_string().is_empty());
            }
            done.store(true, Ordering::Relaxed);
        });
        let snap = stats.snapshot();
        assert_eq!(snap.culled, snap.checks);
        assert_eq!(snap.rendered(), 0);
    }

    #[test]
    fn test_rendered_saturates() {
        let snap = CullStatsSnapshot {
            checks: 5,
            culled: 7,
            ..CullStatsSnapshot::default()
        };
        assert_eq!(snap.rendered(), 0);
        assert!(snap.to_string().contains("rendered: 0"));
    }
}
