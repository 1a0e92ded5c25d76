//! Face emission: asks the culler about each face of a foliage block and
//! queues the survivors.

use crate::batch::QuadBatch;
use crate::quad::Quad;
use canopy_cull::{BlockPos, Face, FoliageCuller, WorldQuery};
use rayon::prelude::*;

/// Queues every face of `pos` the culler keeps. Returns how many were queued.
///
/// Positions are queued relative to the batch origin.
pub fn emit_block(
    culler: &FoliageCuller,
    world: &dyn WorldQuery,
    batch: &mut QuadBatch,
    pos: BlockPos,
    uv: [f32; 2],
    color: u32,
) -> usize {
    let origin = batch.origin();
    let local = pos.offset(
        origin[0].wrapping_neg(),
        origin[1].wrapping_neg(),
        origin[2].wrapping_neg(),
    );
    let mut queued = 0;
    for face in Face::ALL {
        if !culler.evaluate(world, pos, face) {
            batch.push(&Quad::new(local, face, uv[0], uv[1], color));
            queued += 1;
        }
    }
    queued
}

/// Evaluates every face of `positions` across the rayon pool and returns the
/// visible ones in input order.
pub fn visible_faces_parallel<W>(
    culler: &FoliageCuller,
    world: &W,
    positions: &[BlockPos],
) -> Vec<(BlockPos, Face)>
where
    W: WorldQuery + Sync,
{
    positions
        .par_iter()
        .flat_map_iter(|&pos| {
            Face::ALL
                .into_iter()
                .filter(move |&face| !culler.evaluate(world, pos, face))
                .map(move |face| (pos, face))
        })
        .collect()
}
