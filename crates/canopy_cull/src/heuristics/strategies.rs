//! Heuristic implementations.
//!
//! Each runs in constant time over a fixed neighborhood of at most 26 cells.

use super::{
    ADAPTIVE_CRITICAL_FRAME_MS, ADAPTIVE_SLOW_FRAME_MS, DEPTH_CULL_RATIO, DEPTH_MAX_STEPS,
    DISTANCE_CULL_FRACTION, LIGHT_CULL_THRESHOLD, OCCLUSION_MIN_BLOCKED, OCCLUSION_RAY_STEPS,
    SMART_DENSITY_THRESHOLD,
};
use crate::context::CullingContext;
use crate::decision::{CullDecision, CullReason};
use crate::geometry::{BlockPos, Face};
use crate::world::WorldQuery;

/// Cells in a 3x3x3 neighborhood, center excluded.
const NEIGHBORHOOD_CELLS: u32 = 26;

/// True if every one of the six face neighbors of `pos` occludes.
fn enclosed_on_all_sides(world: &dyn WorldQuery, pos: BlockPos) -> bool {
    Face::ALL.iter().all(|&dir| world.occludes(pos.step(dir)))
}

/// Always render.
pub fn none(_world: &dyn WorldQuery, _pos: BlockPos, _face: Face, _ctx: &CullingContext) -> CullDecision {
    CullDecision::RENDER
}

/// Culls when the cells one and two steps beyond the face are both leaves.
pub fn hollow(world: &dyn WorldQuery, pos: BlockPos, face: Face, _ctx: &CullingContext) -> CullDecision {
    if world.is_leaf(pos.offset_by(face, 1)) && world.is_leaf(pos.offset_by(face, 2)) {
        CullDecision::HOLLOW
    } else {
        CullDecision::RENDER
    }
}

/// Culls when all six neighbors of the block beyond the face are leaf or solid.
pub fn solid(world: &dyn WorldQuery, pos: BlockPos, face: Face, _ctx: &CullingContext) -> CullDecision {
    if enclosed_on_all_sides(world, pos.step(face)) {
        CullDecision::ENCLOSED
    } else {
        CullDecision::RENDER
    }
}

/// Like [`solid`] but ignores the vertical neighbors.
pub fn solid_aggressive(
    world: &dyn WorldQuery,
    pos: BlockPos,
    face: Face,
    _ctx: &CullingContext,
) -> CullDecision {
    let beyond = pos.step(face);
    if Face::HORIZONTAL.iter().all(|&dir| world.occludes(beyond.step(dir))) {
        CullDecision::ENCLOSED_HORIZONTAL
    } else {
        CullDecision::RENDER
    }
}

/// Culls when more than 70% of the 26 cells around the block beyond the face
/// are leaves. Confidence is the leaf fraction.
#[allow(clippy::cast_precision_loss)]
pub fn smart(world: &dyn WorldQuery, pos: BlockPos, face: Face, _ctx: &CullingContext) -> CullDecision {
    let center = pos.step(face);
    let mut leaves = 0u32;
    for dx in -1..=1 {
        for dy in -1..=1 {
            for dz in -1..=1 {
                if (dx, dy, dz) != (0, 0, 0) && world.is_leaf(center.offset(dx, dy, dz)) {
                    leaves += 1;
                }
            }
        }
    }

    let fraction = leaves as f32 / NEIGHBORHOOD_CELLS as f32;
    if fraction > SMART_DENSITY_THRESHOLD {
        CullDecision::cull(CullReason::Dense, fraction)
    } else {
        CullDecision::RENDER
    }
}

/// Culls a leaf-backed face once the camera is farther than 80% of the render
/// distance. Confidence grows with distance.
#[allow(clippy::cast_possible_truncation)]
pub fn distance(world: &dyn WorldQuery, pos: BlockPos, face: Face, ctx: &CullingContext) -> CullDecision {
    if !world.is_leaf(pos.step(face)) {
        return CullDecision::RENDER;
    }

    let render_distance = ctx.render_distance();
    let dist = pos.distance_to(ctx.camera());
    if dist > render_distance * DISTANCE_CULL_FRACTION {
        let confidence = if render_distance > 0.0 {
            (dist / render_distance).min(1.0)
        } else {
            1.0
        };
        CullDecision::cull(CullReason::Distant, confidence as f32)
    } else {
        CullDecision::RENDER
    }
}

/// Walks three steps along the normal when the immediate neighbor is a leaf
/// and culls if at least two of them are leaf or solid.
#[allow(clippy::cast_precision_loss)]
pub fn occlusion(world: &dyn WorldQuery, pos: BlockPos, face: Face, _ctx: &CullingContext) -> CullDecision {
    if !world.is_leaf(pos.step(face)) {
        return CullDecision::RENDER;
    }

    let blocked: u32 = (1..=OCCLUSION_RAY_STEPS)
        .map(|step| u32::from(world.occludes(pos.offset_by(face, step))))
        .sum();

    if blocked >= OCCLUSION_MIN_BLOCKED {
        CullDecision::cull(CullReason::Occluded, blocked as f32 / OCCLUSION_RAY_STEPS as f32)
    } else {
        CullDecision::RENDER
    }
}

/// Culls a leaf-backed face when the block's own light level is below 0.3.
pub fn light_aware(world: &dyn WorldQuery, pos: BlockPos, face: Face, _ctx: &CullingContext) -> CullDecision {
    if !world.is_leaf(pos.step(face)) {
        return CullDecision::RENDER;
    }

    let light = world.light_level(pos);
    if light < LIGHT_CULL_THRESHOLD {
        CullDecision::cull(CullReason::Dark, (1.0 - light).clamp(0.0, 1.0))
    } else {
        CullDecision::RENDER
    }
}

/// Culls only when the neighbor beyond the face is a leaf and all six of the
/// block's own neighbors are leaves.
pub fn edge_only(world: &dyn WorldQuery, pos: BlockPos, face: Face, _ctx: &CullingContext) -> CullDecision {
    if world.is_leaf(pos.step(face)) && Face::ALL.iter().all(|&dir| world.is_leaf(pos.step(dir))) {
        CullDecision::INTERIOR
    } else {
        CullDecision::RENDER
    }
}

/// Counts consecutive leaves along the normal (up to five) and culls when the
/// depth ratio exceeds 0.6. Confidence is the depth ratio either way.
#[allow(clippy::cast_precision_loss)]
pub fn depth_gradient(
    world: &dyn WorldQuery,
    pos: BlockPos,
    face: Face,
    _ctx: &CullingContext,
) -> CullDecision {
    let depth = (1..=DEPTH_MAX_STEPS)
        .take_while(|&step| world.is_leaf(pos.offset_by(face, step)))
        .count();

    let ratio = depth as f32 / DEPTH_MAX_STEPS as f32;
    if ratio > DEPTH_CULL_RATIO {
        CullDecision::cull(CullReason::Deep, ratio)
    } else {
        CullDecision::keep(ratio)
    }
}

/// Delegates on the rolling frame time: above 20 ms to [`ultra_aggressive`],
/// above 16.67 ms to [`solid_aggressive`], otherwise to [`smart`].
pub fn adaptive(world: &dyn WorldQuery, pos: BlockPos, face: Face, ctx: &CullingContext) -> CullDecision {
    let frame_ms = ctx.average_frame_time_ms();
    if frame_ms > ADAPTIVE_CRITICAL_FRAME_MS {
        ultra_aggressive(world, pos, face, ctx)
    } else if frame_ms > ADAPTIVE_SLOW_FRAME_MS {
        solid_aggressive(world, pos, face, ctx)
    } else {
        smart(world, pos, face, ctx)
    }
}

/// Culls whenever the immediate neighbor is leaf or solid.
pub fn ultra_aggressive(
    world: &dyn WorldQuery,
    pos: BlockPos,
    face: Face,
    _ctx: &CullingContext,
) -> CullDecision {
    if world.occludes(pos.step(face)) {
        CullDecision::ADJACENT
    } else {
        CullDecision::RENDER
    }
}
