//! # Heuristic Benchmark
//!
//! Measures per-face decision cost for every heuristic, uncached and through
//! the decision cache, over a dense 32x32x32 foliage block.

#![allow(missing_docs)]

use canopy_cull::{BlockClass, BlockPos, CullMode, Face, FoliageCuller, GridWorld};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

const EXTENT: i32 = 32;

fn canopy_world() -> GridWorld {
    let world = GridWorld::new();
    for x in 0..EXTENT {
        for y in 0..EXTENT {
            for z in 0..EXTENT {
                // Sparse holes keep the heuristics from short-circuiting.
                let class = if (x * 7 + y * 13 + z * 3) % 11 == 0 {
                    BlockClass::Air
                } else {
                    BlockClass::LEAF
                };
                world.set(BlockPos::new(x, y, z), class);
            }
        }
    }
    world
}

fn faces() -> Vec<(BlockPos, Face)> {
    let mut out = Vec::new();
    for x in 4..12 {
        for y in 4..12 {
            for z in 4..12 {
                for face in Face::ALL {
                    out.push((BlockPos::new(x, y, z), face));
                }
            }
        }
    }
    out
}

fn bench_uncached(c: &mut Criterion) {
    let world = canopy_world();
    let faces = faces();
    let mut group = c.benchmark_group("heuristic_uncached");
    group.throughput(Throughput::Elements(faces.len() as u64));

    for mode in CullMode::ALL {
        let culler = FoliageCuller::with_mode(mode);
        group.bench_with_input(BenchmarkId::new("decide", mode.name()), &mode, |b, _| {
            b.iter(|| {
                let mut culled = 0u32;
                for &(pos, face) in &faces {
                    culled += u32::from(culler.decide(&world, pos, face).should_cull);
                }
                black_box(culled)
            });
        });
    }

    group.finish();
}

fn bench_cached(c: &mut Criterion) {
    let world = canopy_world();
    let faces = faces();
    let mut group = c.benchmark_group("heuristic_cached");
    group.throughput(Throughput::Elements(faces.len() as u64));

    for mode in [CullMode::Smart, CullMode::Solid, CullMode::DepthGradient] {
        let culler = FoliageCuller::with_mode(mode);
        for &(pos, face) in &faces {
            let _ = culler.evaluate(&world, pos, face);
        }
        group.bench_with_input(BenchmarkId::new("evaluate", mode.name()), &mode, |b, _| {
            b.iter(|| {
                let mut culled = 0u32;
                for &(pos, face) in &faces {
                    culled += u32::from(culler.evaluate(&world, pos, face));
                }
                black_box(culled)
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_uncached, bench_cached);
criterion_main!(benches);
