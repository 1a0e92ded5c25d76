//! # Visibility Heuristics
//!
//! Twelve interchangeable strategies deciding whether a foliage face can be
//! skipped. Every strategy is a pure function of
//! `(world, position, face, context)`; none touches shared state, so any of
//! them may run on many meshing threads at once.
//!
//! `position` is the foliage block being meshed and `face` the side being
//! emitted. "Beyond the face" means `position.step(face)`.
//!
//! Dispatch goes through [`HEURISTICS`], a table indexed by [`CullMode`].
//! Adding a mode without a table entry fails to compile.

mod strategies;

pub use strategies::{
    adaptive, depth_gradient, distance, edge_only, hollow, light_aware, none, occlusion, smart,
    solid, solid_aggressive, ultra_aggressive,
};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::context::CullingContext;
use crate::decision::CullDecision;
use crate::error::CullError;
use crate::geometry::{BlockPos, Face};
use crate::world::WorldQuery;

/// Foliage fraction SMART must exceed.
pub const SMART_DENSITY_THRESHOLD: f32 = 0.7;
/// Fraction of the render distance beyond which DISTANCE culls.
pub const DISTANCE_CULL_FRACTION: f64 = 0.8;
/// Steps walked by OCCLUSION.
pub const OCCLUSION_RAY_STEPS: i32 = 3;
/// Blocked steps needed for OCCLUSION to cull.
pub const OCCLUSION_MIN_BLOCKED: u32 = 2;
/// Light level below which LIGHT_AWARE culls.
pub const LIGHT_CULL_THRESHOLD: f32 = 0.3;
/// Maximum depth walked by DEPTH_GRADIENT.
pub const DEPTH_MAX_STEPS: i32 = 5;
/// Depth ratio DEPTH_GRADIENT must exceed.
pub const DEPTH_CULL_RATIO: f32 = 0.6;
/// Frame time above which ADAPTIVE switches to ULTRA_AGGRESSIVE.
pub const ADAPTIVE_CRITICAL_FRAME_MS: f64 = 20.0;
/// Frame time above which ADAPTIVE switches to SOLID_AGGRESSIVE.
pub const ADAPTIVE_SLOW_FRAME_MS: f64 = 16.67;

/// A heuristic: pure decision over one face.
pub type HeuristicFn = fn(&dyn WorldQuery, BlockPos, Face, &CullingContext) -> CullDecision;

/// Identifier of a culling heuristic.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
#[repr(u8)]
pub enum CullMode {
    /// Always render.
    None = 0,
    /// Two foliage layers in front of the face.
    Hollow = 1,
    /// All six neighbors of the block beyond the face occlude.
    Solid = 2,
    /// Like `Solid`, horizontal neighbors only.
    SolidAggressive = 3,
    /// Dense 3x3x3 foliage neighborhood beyond the face.
    #[default]
    Smart = 4,
    /// Foliage-backed faces far from the camera.
    Distance = 5,
    /// Short ray along the normal is mostly blocked.
    Occlusion = 6,
    /// Foliage-backed faces in the dark.
    LightAware = 7,
    /// Only faces on the surface of a foliage mass survive.
    EdgeOnly = 8,
    /// Deep foliage along the normal.
    DepthGradient = 9,
    /// Picks a strategy from the rolling frame time.
    Adaptive = 10,
    /// Any occluding neighbor hides the face.
    UltraAggressive = 11,
}

impl CullMode {
    /// Number of modes.
    pub const COUNT: usize = 12;

    /// All modes in index order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::None,
        Self::Hollow,
        Self::Solid,
        Self::SolidAggressive,
        Self::Smart,
        Self::Distance,
        Self::Occlusion,
        Self::LightAware,
        Self::EdgeOnly,
        Self::DepthGradient,
        Self::Adaptive,
        Self::UltraAggressive,
    ];

    /// Index of this mode (0-11).
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Mode at `index`, if any.
    #[must_use]
    pub const fn from_index(index: usize) -> Option<Self> {
        if index < Self::COUNT {
            Some(Self::ALL[index])
        } else {
            None
        }
    }

    /// The next mode, wrapping around. Handy for a debug key that cycles modes.
    #[must_use]
    pub const fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::COUNT]
    }

    /// snake_case name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Hollow => "hollow",
            Self::Solid => "solid",
            Self::SolidAggressive => "solid_aggressive",
            Self::Smart => "smart",
            Self::Distance => "distance",
            Self::Occlusion => "occlusion",
            Self::LightAware => "light_aware",
            Self::EdgeOnly => "edge_only",
            Self::DepthGradient => "depth_gradient",
            Self::Adaptive => "adaptive",
            Self::UltraAggressive => "ultra_aggressive",
        }
    }

    /// One-line description for menus and reports.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::None => "render every foliage face",
            Self::Hollow => "cull behind two layers of leaves",
            Self::Solid => "cull when the next block is enclosed on six sides",
            Self::SolidAggressive => "cull when the next block is enclosed horizontally",
            Self::Smart => "cull inside dense 3x3x3 foliage",
            Self::Distance => "cull leaf-backed faces near the render limit",
            Self::Occlusion => "cull when a short ray is mostly blocked",
            Self::LightAware => "cull leaf-backed faces in darkness",
            Self::EdgeOnly => "keep only the outer shell of foliage",
            Self::DepthGradient => "cull behind deep foliage",
            Self::Adaptive => "pick a strategy from frame time",
            Self::UltraAggressive => "cull anything touching leaves or solids",
        }
    }

    /// The heuristic implementing this mode.
    #[inline]
    #[must_use]
    pub const fn heuristic(self) -> HeuristicFn {
        HEURISTICS[self.index()]
    }

    /// Runs this mode's heuristic.
    #[inline]
    #[must_use]
    pub fn decide(
        self,
        world: &dyn WorldQuery,
        pos: BlockPos,
        face: Face,
        ctx: &CullingContext,
    ) -> CullDecision {
        (self.heuristic())(world, pos, face, ctx)
    }
}

/// Heuristic table indexed by [`CullMode::index`].
pub const HEURISTICS: [HeuristicFn; CullMode::COUNT] = [
    none,
    hollow,
    solid,
    solid_aggressive,
    smart,
    distance,
    occlusion,
    light_aware,
    edge_only,
    depth_gradient,
    adaptive,
    ultra_aggressive,
];

impl fmt::Display for CullMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CullMode {
    type Err = CullError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|mode| mode.name() == normalized)
            .ok_or_else(|| CullError::UnknownMode(s.to_string()))
    }
}

impl TryFrom<String> for CullMode {
    type Error = CullError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CullMode> for String {
    fn from(mode: CullMode) -> Self {
        mode.name().to_string()
    }
}
