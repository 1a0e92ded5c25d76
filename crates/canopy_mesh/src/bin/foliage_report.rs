//! # Foliage Report
//!
//! Builds a synthetic canopy, runs every culling mode over it and prints how
//! many faces each one keeps and what the resulting batch costs.
//!
//! Usage: `foliage_report [config.toml]`

use canopy_cull::{BlockClass, BlockPos, CullMode, GridWorld};
use canopy_mesh::{emit_block, FoliageConfig, FoliageVertex, RecordingBackend};

/// Trees along each horizontal axis.
const GRID: i32 = 4;
/// Spacing between trunks.
const SPACING: i32 = 9;
/// Trunk height above ground.
const TRUNK: i32 = 6;
/// Crown radius.
const CROWN: i32 = 3;
/// Ground level.
const GROUND: i32 = 64;

fn build_canopy() -> GridWorld {
    let world = GridWorld::new();
    world.fill(
        BlockPos::new(0, GROUND - 1, 0),
        BlockPos::new(GRID * SPACING, GROUND - 1, GRID * SPACING),
        BlockClass::Solid,
    );

    for tx in 0..GRID {
        for tz in 0..GRID {
            let base = BlockPos::new(tx * SPACING + SPACING / 2, GROUND, tz * SPACING + SPACING / 2);
            let top = base.offset(0, TRUNK, 0);
            for dx in -CROWN..=CROWN {
                for dy in -CROWN..=CROWN {
                    for dz in -CROWN..=CROWN {
                        if dx * dx + dy * dy + dz * dz <= CROWN * CROWN + 1 {
                            world.set(top.offset(dx, dy, dz), BlockClass::LEAF);
                        }
                    }
                }
            }
            world.fill(base, base.offset(0, TRUNK - 1, 0), BlockClass::Solid);
            // A few shaded pockets for the light-aware mode.
            for dy in -1..=1 {
                world.set_light(top.offset(0, dy, 0), 0.1);
            }
        }
    }
    world
}

fn main() {
    println!("╔══════════════════════════════════════════════════════════════════╗");
    println!("║         CANOPY FOLIAGE REPORT                                    ║");
    println!("╚══════════════════════════════════════════════════════════════════╝");
    println!();

    let args: Vec<String> = std::env::args().collect();
    let config = match args.get(1) {
        Some(path) => match FoliageConfig::from_file(path) {
            Ok(config) => {
                println!("Loaded config: {path}");
                config
            }
            Err(e) => {
                println!("Error: Could not load config: {e}");
                return;
            }
        },
        None => FoliageConfig::default(),
    };

    let world = build_canopy();
    let leaves = world.positions_where(BlockClass::is_leaf);
    let total_faces = leaves.len() * 6;
    let center = f64::from(GRID * SPACING) / 2.0;

    println!("Canopy: {} trees, {} leaf blocks, {} faces", GRID * GRID, leaves.len(), total_faces);
    println!(
        "Encoding: {} ({} bytes per queued quad)",
        config.mesh.encoding,
        config.mesh.encoding.payload_bytes()
    );
    println!();
    println!("┌──────────────────┬─────────┬─────────┬─────────────┬──────────┬──────────────┐");
    println!("│ mode             │  kept   │ culled  │ queue bytes │ vertices │ buffer bytes │");
    println!("├──────────────────┼─────────┼─────────┼─────────────┼──────────┼──────────────┤");

    let (mut culler, mut batch) = config.build();
    culler.set_camera([center, f64::from(GROUND + TRUNK), center]);
    let configured = culler.mode();

    for mode in CullMode::ALL {
        culler.set_mode(mode);
        culler.reset_stats();

        let mut kept = 0;
        for &pos in &leaves {
            kept += emit_block(&culler, &world, &mut batch, pos, [0.0, 0.0], 0x3A_7D_2C_FF);
        }

        let queued_bytes = batch.queued_bytes();
        let mut backend = RecordingBackend::new();
        let report = match batch.flush(&mut backend) {
            Ok(report) => report,
            Err(e) => {
                println!("Error: flush failed: {e}");
                return;
            }
        };
        let bytes = report.vertices * FoliageVertex::STRIDE + report.indices * std::mem::size_of::<u32>();
        println!(
            "│ {:<16} │ {:>7} │ {:>6.1}% │ {:>11} │ {:>8} │ {:>12} │",
            mode.name(),
            kept,
            culler.stats().cull_ratio() * 100.0,
            queued_bytes,
            report.vertices,
            bytes
        );
    }
    println!("└──────────────────┴─────────┴─────────┴─────────────┴──────────┴──────────────┘");
    println!();

    culler.set_mode(configured);
    culler.reset_stats();
    for &pos in &leaves {
        emit_block(&culler, &world, &mut batch, pos, [0.0, 0.0], 0x3A_7D_2C_FF);
    }
    batch.clear();

    println!("┌─ CONFIGURED MODE ────────────────────────────────────────────────┐");
    for line in culler.summary().lines() {
        println!("│ {line}");
    }
    println!("└──────────────────────────────────────────────────────────────────┘");
}
