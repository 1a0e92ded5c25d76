//! # Canopy Mesh
//!
//! Turns the faces [`canopy_cull`] admits into compact quads, and compact
//! quads into one vertex/index buffer pair per flush.
//!
//! ## Pipeline
//!
//! ```text
//! foliage block ──► emit_block ──► FoliageCuller::evaluate (per face)
//!                        │ kept
//!                        ▼
//!                  QuadBatch::push ──► CompactQuad (Packed | Ultra)
//!                        │ flush
//!                        ▼
//!              [FoliageVertex; 4N] + [u32; 6N] ──► RenderBackend
//! ```
//!
//! ## Example
//!
//! ```rust
//! use canopy_cull::{BlockClass, BlockPos, CullMode, FoliageCuller, GridWorld};
//! use canopy_mesh::{emit_block, QuadBatch, QuadEncoding, RecordingBackend};
//!
//! let world = GridWorld::new();
//! world.set(BlockPos::new(0, 64, 0), BlockClass::LEAF);
//!
//! let culler = FoliageCuller::with_mode(CullMode::Smart);
//! let mut batch = QuadBatch::new(QuadEncoding::Ultra);
//! emit_block(&culler, &world, &mut batch, BlockPos::new(0, 64, 0), [0.0, 0.0], 0x33AA_33FF);
//!
//! let mut backend = RecordingBackend::new();
//! let report = batch.flush(&mut backend).unwrap();
//! assert_eq!(report.indices, report.quads * 6);
//! ```

#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod backend;
pub mod batch;
pub mod config;
pub mod emit;
pub mod error;
pub mod quad;
pub mod vertex;

pub use backend::{RecordingBackend, RenderBackend};
pub use batch::{FlushReport, QuadBatch, CORNER_UV, FACE_CORNERS, QUAD_INDICES};
pub use config::{FoliageConfig, MeshConfig};
pub use emit::{emit_block, visible_faces_parallel};
pub use error::{MeshError, MeshResult};
pub use quad::{CompactQuad, PackedQuad, Quad, QuadEncoding, UltraQuad};
pub use vertex::FoliageVertex;
