//! # Canopy Cull
//!
//! Decides, per block face, whether foliage geometry should be emitted or
//! skipped because it can never be seen.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                       FoliageCuller                          │
//! ├──────────────────────────────────────────────────────────────┤
//! │  evaluate(world, pos, face)                                  │
//! │       ↓                                                      │
//! │  DecisionCache ──hit──────────────────────────→ bool         │
//! │       ↓ miss                                                 │
//! │  HEURISTICS[mode](world, pos, face, context) → CullDecision  │
//! │       ↓                                                      │
//! │  CullStats (atomic counters)                                 │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use canopy_cull::{BlockClass, BlockPos, CullMode, Face, FoliageCuller, GridWorld};
//!
//! let world = GridWorld::new();
//! world.set(BlockPos::new(0, 65, 0), BlockClass::Solid);
//!
//! let culler = FoliageCuller::with_mode(CullMode::UltraAggressive);
//! assert!(culler.evaluate(&world, BlockPos::new(0, 64, 0), Face::Up));
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod cache;
pub mod config;
pub mod context;
pub mod decision;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod heuristics;
pub mod stats;
pub mod world;

pub use cache::{cache_key, DecisionCache};
pub use config::CullConfig;
pub use context::CullingContext;
pub use decision::{CullDecision, CullReason};
pub use engine::FoliageCuller;
pub use error::{CullError, CullResult};
pub use geometry::{BlockPos, Face};
pub use heuristics::{CullMode, HeuristicFn, HEURISTICS};
pub use stats::{CullStats, CullStatsSnapshot};
pub use world::{BlockClass, GridWorld, WorldQuery};
