//! # Foliage Culler
//!
//! The engine instance owning the active heuristic, the culling context, the
//! decision cache and the statistics. One instance per render session;
//! nothing here is global, so tests get isolated engines.
//!
//! ## Threading
//!
//! ```text
//! Frame start (render thread, &mut self):
//!   set_camera / record_frame / set_mode
//!
//! Meshing (any number of workers, &self):
//!   evaluate(world, pos, face)  → cache → heuristic → stats
//! ```

use std::fmt;

use crate::cache::DecisionCache;
use crate::config::CullConfig;
use crate::context::CullingContext;
use crate::decision::CullDecision;
use crate::geometry::{BlockPos, Face};
use crate::heuristics::CullMode;
use crate::stats::{CullStats, CullStatsSnapshot};
use crate::world::WorldQuery;

/// Per-session foliage culling engine.
pub struct FoliageCuller {
    /// Active heuristic.
    mode: CullMode,
    /// Camera, render distance and timing.
    context: CullingContext,
    /// Decisions of the active heuristic.
    cache: DecisionCache,
    /// Counters.
    stats: CullStats,
}

impl FoliageCuller {
    /// Creates an engine from configuration.
    #[must_use]
    pub fn new(config: &CullConfig) -> Self {
        Self {
            mode: config.mode,
            context: config.context(),
            cache: DecisionCache::new(),
            stats: CullStats::new(),
        }
    }

    /// Creates an engine with default settings and the given mode.
    #[must_use]
    pub fn with_mode(mode: CullMode) -> Self {
        Self::new(&CullConfig::with_mode(mode))
    }

    /// Active heuristic.
    #[inline]
    #[must_use]
    pub const fn mode(&self) -> CullMode {
        self.mode
    }

    /// Switches the active heuristic.
    ///
    /// Cached decisions belong to the previous heuristic, so a real change
    /// clears the cache. Setting the current mode again is a no-op.
    pub fn set_mode(&mut self, mode: CullMode) {
        if mode == self.mode {
            return;
        }
        let previous = self.mode;
        self.mode = mode;
        let dropped = self.cache.clear();
        tracing::info!(
            "culling mode {} -> {} ({} cached decisions dropped)",
            previous,
            mode,
            dropped
        );
    }

    /// Advances to the next heuristic and returns it.
    pub fn cycle_mode(&mut self) -> CullMode {
        self.set_mode(self.mode.next());
        self.mode
    }

    /// Culling context.
    #[inline]
    #[must_use]
    pub const fn context(&self) -> &CullingContext {
        &self.context
    }

    /// Moves the camera. Cached distance decisions are not refreshed; call
    /// [`FoliageCuller::clear_cache`] when that matters.
    pub fn set_camera(&mut self, camera: [f64; 3]) {
        self.context.set_camera(camera);
    }

    /// Sets the render distance.
    pub fn set_render_distance(&mut self, distance: f64) {
        self.context.set_render_distance(distance);
    }

    /// Feeds one frame-time sample into the rolling average.
    pub fn record_frame(&mut self, frame_time_ms: f64) {
        self.context.record_frame(frame_time_ms);
    }

    /// Pins the rolling frame time to a value.
    pub fn set_average_frame_time_ms(&mut self, ms: f64) {
        self.context.set_average_frame_time_ms(ms);
    }

    /// Decides whether a face should be culled, using the cache.
    ///
    /// Identical `(pos, face)` pairs return identical answers for a fixed
    /// heuristic and world state.
    #[inline]
    pub fn evaluate(&self, world: &dyn WorldQuery, pos: BlockPos, face: Face) -> bool {
        self.evaluate_decision(world, pos, face).should_cull
    }

    /// Like [`FoliageCuller::evaluate`] but returns the full decision.
    pub fn evaluate_decision(&self, world: &dyn WorldQuery, pos: BlockPos, face: Face) -> CullDecision {
        let (decision, hit) = self.cache.get_or_compute(pos, face, || {
            let decision = self.mode.decide(world, pos, face, &self.context);
            tracing::trace!(
                "miss {} {}: {} ({})",
                pos,
                face,
                decision.reason,
                decision.confidence
            );
            decision
        });
        self.stats.record_lookup(hit);
        self.stats.record_decision(&decision);
        decision
    }

    /// Runs the active heuristic directly, bypassing cache and statistics.
    #[must_use]
    pub fn decide(&self, world: &dyn WorldQuery, pos: BlockPos, face: Face) -> CullDecision {
        self.mode.decide(world, pos, face, &self.context)
    }

    /// Drops every cached decision. Call after world edits.
    pub fn clear_cache(&self) {
        let dropped = self.cache.clear();
        tracing::info!("decision cache cleared ({} entries)", dropped);
    }

    /// Number of cached decisions.
    #[must_use]
    pub fn cached_decisions(&self) -> usize {
        self.cache.len()
    }

    /// Current counters.
    #[must_use]
    pub fn stats(&self) -> CullStatsSnapshot {
        self.stats.snapshot()
    }

    /// Zeroes the counters.
    pub fn reset_stats(&self) {
        self.stats.reset();
    }

    /// Human-readable summary of configuration and counters.
    ///
    /// Same text as the [`fmt::Display`] impl.
    #[must_use]
    pub fn summary(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for FoliageCuller {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ctx = &self.context;
        let [cx, cy, cz] = ctx.camera();
        writeln!(f, "mode: {} - {}", self.mode, self.mode.description())?;
        writeln!(
            f,
            "render distance: {:.0}  camera: ({:.1}, {:.1}, {:.1})",
            ctx.render_distance(),
            cx,
            cy,
            cz
        )?;
        writeln!(
            f,
            "frame: {}  avg frame time: {:.2} ms ({:.0} fps)",
            ctx.frame(),
            ctx.average_frame_time_ms(),
            ctx.fps()
        )?;
        writeln!(f, "cached decisions: {}", self.cache.len())?;
        write!(f, "{}", self.stats.snapshot())
    }
}

impl Default for FoliageCuller {
    fn default() -> Self {
        Self::new(&CullConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::{BlockClass, GridWorld};

    #[test]
    fn test_second_lookup_hits() {
        let world = GridWorld::new();
        let pos = BlockPos::new(0, 10, 0);
        world.set(pos.step(Face::Up), BlockClass::Solid);

        let culler = FoliageCuller::with_mode(CullMode::UltraAggressive);
        assert!(culler.evaluate(&world, pos, Face::Up));
        assert!(culler.evaluate(&world, pos, Face::Up));

        let stats = culler.stats();
        assert_eq!(stats.cache_misses, 1);
        assert_eq!(stats.cache_hits, 1);
        assert_eq!(stats.checks, 2);
        assert_eq!(stats.culled, 2);
    }

    #[test]
    fn test_same_mode_keeps_cache() {
        let world = GridWorld::new();
        let mut culler = FoliageCuller::with_mode(CullMode::Hollow);
        let _ = culler.evaluate(&world, BlockPos::ORIGIN, Face::East);
        culler.set_mode(CullMode::Hollow);
        assert_eq!(culler.cached_decisions(), 1);

        culler.set_mode(CullMode::Solid);
        assert_eq!(culler.cached_decisions(), 0);
    }

    #[test]
    fn test_cycle_mode() {
        let mut culler = FoliageCuller::with_mode(CullMode::Adaptive);
        assert_eq!(culler.cycle_mode(), CullMode::UltraAggressive);
        assert_eq!(culler.cycle_mode(), CullMode::None);
    }

    #[test]
    fn test_summary_mentions_configuration() {
        let culler = FoliageCuller::with_mode(CullMode::LightAware);
        let summary = culler.summary();
        assert!(summary.contains("light_aware"));
        assert!(summary.contains("render distance: 256"));
        assert!(summary.contains("checks: 0"));
        assert_eq!(summary, culler.to_string());
    }

    #[test]
    fn test_summary_while_evaluating() {
        let world = GridWorld::new();
        world.fill(BlockPos::new(0, 0, 0), BlockPos::new(7, 7, 7), BlockClass::LEAF);
        let culler = FoliageCuller::with_mode(CullMode::Hollow);
        let done = std::sync::atomic::AtomicBool::new(false);

        std::thread::scope(|scope| {
            for _ in 0..3 {
                scope.spawn(|| {
                    while !done.load(std::sync::atomic::Ordering::Relaxed) {
                        for face in Face::ALL {
                            let _ = culler.evaluate(&world, BlockPos::new(2, 2, 2), face);
                        }
                    }
                });
            }
            for _ in 0..2_000 {
                assert!(culler.summary().contains("rendered: "));
            }
            done.store(true, std::sync::atomic::Ordering::Relaxed);
        });
    }
}
