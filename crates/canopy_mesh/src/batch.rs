//! # Quad Batch
//!
//! Collects admitted faces in compact form and expands them into one
//! indexed draw on flush.
//!
//! ```text
//! push(Quad) ──► encode ──► packed: [PackedQuad]   12 bytes each
//!                            ultra:  [UltraQuad]     8 bytes each
//!                            runs:   push order across both
//!                                   │ flush
//!                                   ▼
//!                  vertices: 4N × FoliageVertex  (48-byte stride)
//!                  indices:  6N × u32            ({0,1,2,0,2,3} per quad)
//!                                   │
//!                                   ▼
//!                  RenderBackend::upload_and_draw ──► queue cleared
//! ```
//!
//! Not thread-safe: index offsets are computed sequentially as quads are
//! appended, so push and flush belong to one thread.

use crate::backend::RenderBackend;
use crate::error::MeshResult;
use crate::quad::{CompactQuad, PackedQuad, Quad, QuadEncoding, UltraQuad};
use crate::vertex::FoliageVertex;
use canopy_cull::Face;

/// Vertices emitted per quad.
pub const VERTICES_PER_QUAD: usize = 4;

/// Indices emitted per quad.
pub const INDICES_PER_QUAD: usize = 6;

/// Two counter-clockwise triangles over corners 0..4.
pub const QUAD_INDICES: [u32; INDICES_PER_QUAD] = [0, 1, 2, 0, 2, 3];

/// Default queue capacity in quads.
pub const DEFAULT_CAPACITY: usize = 4096;

/// Corner offsets from a block's minimum corner, per face, counter-clockwise
/// when viewed from outside. Indexed by [`Face::index`].
pub const FACE_CORNERS: [[[f32; 3]; 4]; 6] = [
    // East (+X)
    [[1.0, 0.0, 1.0], [1.0, 0.0, 0.0], [1.0, 1.0, 0.0], [1.0, 1.0, 1.0]],
    // West (-X)
    [[0.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0, 1.0], [0.0, 1.0, 0.0]],
    // Up (+Y)
    [[0.0, 1.0, 1.0], [1.0, 1.0, 1.0], [1.0, 1.0, 0.0], [0.0, 1.0, 0.0]],
    // Down (-Y)
    [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 0.0, 1.0], [0.0, 0.0, 1.0]],
    // South (+Z)
    [[0.0, 0.0, 1.0], [1.0, 0.0, 1.0], [1.0, 1.0, 1.0], [0.0, 1.0, 1.0]],
    // North (-Z)
    [[1.0, 0.0, 0.0], [0.0, 0.0, 0.0], [0.0, 1.0, 0.0], [1.0, 1.0, 0.0]],
];

/// Texture offset added to the quad's anchor for corner `i`: `(i % 2, i / 2)`.
pub const CORNER_UV: [[f32; 2]; 4] = [[0.0, 0.0], [1.0, 0.0], [0.0, 1.0], [1.0, 1.0]];

/// Outcome of a successful flush.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FlushReport {
    /// Quads drawn.
    pub quads: usize,
    /// Vertices uploaded.
    pub vertices: usize,
    /// Indices uploaded.
    pub indices: usize,
}

/// Consecutive queued quads sharing one encoding.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct QuadRun {
    encoding: QuadEncoding,
    /// First index into the storage of `encoding`.
    start: usize,
    len: usize,
}

/// Queue of compact quads with reusable staging buffers.
///
/// Each encoding has its own untagged storage. The run list restores push
/// order when encodings were switched mid-batch.
#[derive(Debug)]
pub struct QuadBatch {
    encoding: QuadEncoding,
    /// World offset of the chunk-local positions.
    origin: [i32; 3],
    packed: Vec<PackedQuad>,
    ultra: Vec<UltraQuad>,
    runs: Vec<QuadRun>,
    vertices: Vec<FoliageVertex>,
    indices: Vec<u32>,
}

impl Default for QuadBatch {
    fn default() -> Self {
        Self::new(QuadEncoding::default())
    }
}

impl QuadBatch {
    /// Creates an empty batch.
    #[must_use]
    pub fn new(encoding: QuadEncoding) -> Self {
        Self::with_capacity(encoding, DEFAULT_CAPACITY)
    }

    /// Creates an empty batch sized for `quads` quads.
    #[must_use]
    pub fn with_capacity(encoding: QuadEncoding, quads: usize) -> Self {
        Self {
            encoding,
            origin: [0; 3],
            packed: Vec::with_capacity(match encoding {
                QuadEncoding::Packed => quads,
                QuadEncoding::Ultra => 0,
            }),
            ultra: Vec::with_capacity(match encoding {
                QuadEncoding::Packed => 0,
                QuadEncoding::Ultra => quads,
            }),
            runs: Vec::new(),
            vertices: Vec::with_capacity(quads * VERTICES_PER_QUAD),
            indices: Vec::with_capacity(quads * INDICES_PER_QUAD),
        }
    }

    /// Encoding applied to quads pushed from now on.
    #[inline]
    #[must_use]
    pub const fn encoding(&self) -> QuadEncoding {
        self.encoding
    }

    /// Switches the encoding. Quads already queued keep theirs.
    pub fn set_encoding(&mut self, encoding: QuadEncoding) {
        if encoding != self.encoding {
            tracing::info!("Quad encoding: {} -> {}", self.encoding, encoding);
            self.encoding = encoding;
        }
    }

    /// World offset added to decoded positions.
    #[inline]
    #[must_use]
    pub const fn origin(&self) -> [i32; 3] {
        self.origin
    }

    /// Sets the world offset added to decoded positions.
    pub fn set_origin(&mut self, origin: [i32; 3]) {
        self.origin = origin;
    }

    /// Queues one quad in the current encoding.
    pub fn push(&mut self, quad: &Quad) {
        let start = match self.encoding {
            QuadEncoding::Packed => {
                self.packed.push(PackedQuad::encode(quad));
                self.packed.len() - 1
            }
            QuadEncoding::Ultra => {
                self.ultra.push(UltraQuad::encode(quad));
                self.ultra.len() - 1
            }
        };
        match self.runs.last_mut() {
            Some(run) if run.encoding == self.encoding => run.len += 1,
            _ => self.runs.push(QuadRun {
                encoding: self.encoding,
                start,
                len: 1,
            }),
        }
    }

    /// Queued quads.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.packed.len() + self.ultra.len()
    }

    /// True when nothing is queued.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Bytes held by queued quads, excluding spare capacity.
    #[must_use]
    pub fn queued_bytes(&self) -> usize {
        self.packed.len() * QuadEncoding::Packed.payload_bytes()
            + self.ultra.len() * QuadEncoding::Ultra.payload_bytes()
    }

    /// Queued quads in push order.
    pub fn quads(&self) -> impl Iterator<Item = CompactQuad> + '_ {
        self.runs.iter().flat_map(move |run| {
            (run.start..run.start + run.len).map(move |i| match run.encoding {
                QuadEncoding::Packed => CompactQuad::Packed(self.packed[i]),
                QuadEncoding::Ultra => CompactQuad::Ultra(self.ultra[i]),
            })
        })
    }

    /// Drops every queued quad without drawing.
    pub fn clear(&mut self) {
        self.packed.clear();
        self.ultra.clear();
        self.runs.clear();
    }

    /// Expands the queue into the staging buffers and returns them.
    ///
    /// The queue is left untouched.
    pub fn assemble(&mut self) -> (&[FoliageVertex], &[u32]) {
        self.vertices.clear();
        self.indices.clear();
        let quads = self.len();
        self.vertices.reserve(quads * VERTICES_PER_QUAD);
        self.indices.reserve(quads * INDICES_PER_QUAD);

        for run in &self.runs {
            for i in run.start..run.start + run.len {
                let quad = match run.encoding {
                    QuadEncoding::Packed => self.packed[i].decode(),
                    QuadEncoding::Ultra => self.ultra[i].decode(),
                };
                #[allow(clippy::cast_possible_truncation)]
                let base = self.vertices.len() as u32;
                append_quad(&mut self.vertices, self.origin, &quad);
                self.indices.extend(QUAD_INDICES.iter().map(|offset| base + offset));
            }
        }

        (&self.vertices, &self.indices)
    }

    /// Assembles the queue, hands both buffers to `backend` and clears the
    /// queue.
    ///
    /// The queue is cleared whether or not the backend succeeds.
    ///
    /// # Errors
    ///
    /// Returns the backend's error when the upload or draw fails.
    #[allow(clippy::cast_possible_truncation)]
    pub fn flush(&mut self, backend: &mut dyn RenderBackend) -> MeshResult<FlushReport> {
        if self.is_empty() {
            return Ok(FlushReport::default());
        }

        let quads = self.len();
        self.assemble();
        let result = backend.upload_and_draw(
            &self.vertices,
            self.vertices.len() as u32,
            &self.indices,
            self.indices.len() as u32,
        );
        self.clear();

        match result {
            Ok(()) => {
                let report = FlushReport {
                    quads,
                    vertices: self.vertices.len(),
                    indices: self.indices.len(),
                };
                tracing::debug!(
                    "Flushed {} quads ({} vertices, {} indices, encoding {})",
                    report.quads,
                    report.vertices,
                    report.indices,
                    self.encoding
                );
                Ok(report)
            }
            Err(e) => {
                tracing::warn!("Dropped {} quads: {}", quads, e);
                Err(e)
            }
        }
    }
}

/// Appends the four corners of `quad`.
#[allow(clippy::cast_precision_loss)]
fn append_quad(vertices: &mut Vec<FoliageVertex>, origin: [i32; 3], quad: &Quad) {
    let base = [
        origin[0].wrapping_add(quad.pos.x) as f32,
        origin[1].wrapping_add(quad.pos.y) as f32,
        origin[2].wrapping_add(quad.pos.z) as f32,
    ];
    let normal = quad.face.normal();

    for (corner, uv) in corners(quad.face).iter().zip(CORNER_UV) {
        vertices.push(FoliageVertex::new(
            [base[0] + corner[0], base[1] + corner[1], base[2] + corner[2]],
            normal,
            [quad.u + uv[0], quad.v + uv[1]],
            quad.color,
        ));
    }
}

/// Corner table for a face.
#[inline]
#[must_use]
pub const fn corners(face: Face) -> &'static [[f32; 3]; 4] {
    &FACE_CORNERS[face.index()]
}
