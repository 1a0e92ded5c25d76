//! End-to-end checks from culler to backend.

use canopy_cull::{BlockClass, BlockPos, CullMode, Face, FoliageCuller, GridWorld};
use canopy_mesh::{
    emit_block, CompactQuad, FoliageConfig, Quad, QuadBatch, QuadEncoding, RecordingBackend,
};

fn assert_uv_close(actual: f32, expected: f32, encoding: QuadEncoding) {
    let tolerance = 0.5 / encoding.uv_max() as f32 + 1e-6;
    assert!(
        (actual - expected).abs() <= tolerance,
        "{encoding}: {actual} vs {expected}"
    );
}

#[test]
fn test_east_quad_round_trips_under_both_encodings() {
    let quad = Quad::new(BlockPos::new(5, 10, 20), Face::East, 0.5, 0.5, 0xFF33_66CC);

    for encoding in [QuadEncoding::Packed, QuadEncoding::Ultra] {
        let decoded = CompactQuad::encode(encoding, &quad).decode();
        assert_eq!(decoded.pos, quad.pos);
        assert_eq!(decoded.face, Face::East);
        assert_uv_close(decoded.u, 0.5, encoding);
        assert_uv_close(decoded.v, 0.5, encoding);
    }

    let packed = CompactQuad::encode(QuadEncoding::Packed, &quad).decode();
    assert_eq!(packed.color, 0xFF33_66CC);

    // RGB565 keeps the top bits of each channel; alpha comes back opaque.
    let ultra = CompactQuad::encode(QuadEncoding::Ultra, &quad).decode();
    assert_eq!(ultra.color, 0xFF30_63FF);
}

#[test]
fn test_ultra_keeps_every_face() {
    for face in Face::ALL {
        let quad = Quad::new(BlockPos::new(1, 2, 3), face, 0.0, 0.0, 0);
        assert_eq!(CompactQuad::encode(QuadEncoding::Ultra, &quad).decode().face, face);
    }
}

#[test]
fn test_batch_sizes_follow_quad_count() {
    let mut batch = QuadBatch::new(QuadEncoding::Packed);
    let n = 37;
    for i in 0..n {
        let face = Face::from_index(i as usize % 6);
        batch.push(&Quad::new(BlockPos::new(i, i % 7, 0), face, 0.25, 0.75, 0xFFFF_FFFF));
    }

    let mut backend = RecordingBackend::new();
    let report = batch.flush(&mut backend).unwrap();
    assert_eq!(report.quads, n as usize);
    assert_eq!(backend.vertices.len(), 4 * n as usize);
    assert_eq!(backend.indices.len(), 6 * n as usize);

    for (q, indices) in backend.indices.chunks(6).enumerate() {
        let base = (q * 4) as u32;
        assert_eq!(indices, [base, base + 1, base + 2, base, base + 2, base + 3]);
    }
}

#[test]
fn test_up_face_corners_are_fixed_regardless_of_mode() {
    let world = GridWorld::new();
    let pos = BlockPos::new(2, 64, 2);
    world.set(pos, BlockClass::LEAF);

    let mut first: Option<Vec<[f32; 3]>> = None;
    for mode in [CullMode::None, CullMode::Hollow, CullMode::Smart] {
        let culler = FoliageCuller::with_mode(mode);
        let mut batch = QuadBatch::new(QuadEncoding::Ultra);
        emit_block(&culler, &world, &mut batch, pos, [0.0, 0.0], 0);

        let mut backend = RecordingBackend::new();
        batch.flush(&mut backend).unwrap();
        let up = backend
            .vertices
            .chunks(4)
            .find(|corners| corners[0].normal == [0.0, 1.0, 0.0])
            .unwrap()
            .iter()
            .map(|v| v.position)
            .collect::<Vec<_>>();

        if let Some(expected) = &first {
            assert_eq!(&up, expected, "{mode}");
        } else {
            first = Some(up);
        }
    }
}

#[test]
fn test_dense_canopy_emits_fewer_quads_than_sparse_modes() {
    let world = GridWorld::new();
    world.fill(BlockPos::new(0, 60, 0), BlockPos::new(7, 67, 7), BlockClass::LEAF);
    let leaves = world.positions_where(BlockClass::is_leaf);

    let mut counts = Vec::new();
    for mode in [CullMode::None, CullMode::Hollow, CullMode::Solid] {
        let culler = FoliageCuller::with_mode(mode);
        let mut batch = QuadBatch::new(QuadEncoding::Ultra);
        let queued: usize = leaves
            .iter()
            .map(|&pos| emit_block(&culler, &world, &mut batch, pos, [0.0, 0.0], 0))
            .sum();
        assert_eq!(queued, batch.len());
        counts.push(queued);
    }

    assert_eq!(counts[0], leaves.len() * 6);
    assert!(counts[1] < counts[0]);
    assert!(counts[2] < counts[0]);
}

#[test]
fn test_config_drives_culler_and_batch() {
    let config = FoliageConfig::from_toml_str(
        r#"
        [culling]
        mode = "none"

        [mesh]
        encoding = "packed"
        origin = [100, 0, 0]
        "#,
    )
    .unwrap();
    let (culler, mut batch) = config.build();

    let world = GridWorld::new();
    let queued = emit_block(&culler, &world, &mut batch, BlockPos::new(101, 5, 0), [0.0, 0.0], 0);
    assert_eq!(queued, 6);

    let (vertices, _) = batch.assemble();
    // First corner of the East face of block (101, 5, 0).
    assert_eq!(vertices[0].position, [102.0, 5.0, 1.0]);
}
