//! # Batch Benchmark
//!
//! Measures quad encoding and batch assembly for both encodings.

#![allow(missing_docs)]

use canopy_cull::{BlockPos, Face};
use canopy_mesh::{CompactQuad, Quad, QuadBatch, QuadEncoding, RecordingBackend};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

const QUADS: usize = 16_384;

fn quads() -> Vec<Quad> {
    (0..QUADS)
        .map(|i| {
            let i = i as i32;
            Quad::new(
                BlockPos::new(i % 32, (i / 32) % 32, i / 1024),
                Face::from_index(i as usize % 6),
                0.25,
                0.5,
                0x4C_8B_3A_FF,
            )
        })
        .collect()
}

fn bench_encode(c: &mut Criterion) {
    let quads = quads();
    let mut group = c.benchmark_group("quad_encode");
    group.throughput(Throughput::Elements(QUADS as u64));

    for encoding in [QuadEncoding::Packed, QuadEncoding::Ultra] {
        group.bench_with_input(BenchmarkId::new("encode_decode", encoding.name()), &encoding, |b, &encoding| {
            b.iter(|| {
                let mut acc = 0i32;
                for quad in &quads {
                    acc ^= CompactQuad::encode(encoding, quad).decode().pos.x;
                }
                black_box(acc)
            });
        });
    }

    group.finish();
}

fn bench_flush(c: &mut Criterion) {
    let quads = quads();
    let mut group = c.benchmark_group("batch_flush");
    group.throughput(Throughput::Elements(QUADS as u64));

    for encoding in [QuadEncoding::Packed, QuadEncoding::Ultra] {
        let mut batch = QuadBatch::with_capacity(encoding, QUADS);
        let mut backend = RecordingBackend::new();
        group.bench_with_input(BenchmarkId::new("push_flush", encoding.name()), &encoding, |b, _| {
            b.iter(|| {
                for quad in &quads {
                    batch.push(quad);
                }
                black_box(batch.flush(&mut backend).map(|r| r.indices).unwrap_or(0))
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_encode, bench_flush);
criterion_main!(benches);
