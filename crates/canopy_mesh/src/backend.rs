//! Render backend contract.
//!
//! The batch owns the staging layout; a backend only uploads and draws.
//! Graphics API bindings live outside this crate.

use crate::error::{MeshError, MeshResult};
use crate::vertex::FoliageVertex;

/// Consumer of assembled foliage buffers.
pub trait RenderBackend {
    /// Uploads both buffers and issues one indexed draw.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::Backend`] when the upload or draw fails.
    fn upload_and_draw(
        &mut self,
        vertices: &[FoliageVertex],
        vertex_count: u32,
        indices: &[u32],
        index_count: u32,
    ) -> MeshResult<()>;
}

/// Backend that keeps the last upload in memory. For headless runs and tests.
#[derive(Debug, Default)]
pub struct RecordingBackend {
    /// Vertices of the last upload.
    pub vertices: Vec<FoliageVertex>,
    /// Indices of the last upload.
    pub indices: Vec<u32>,
    /// Draw calls issued.
    pub draw_calls: u32,
    /// Vertices drawn across all calls.
    pub total_vertices: u64,
    /// When set, every upload fails with this message.
    fail_with: Option<String>,
}

impl RecordingBackend {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a recorder whose uploads always fail.
    #[must_use]
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            fail_with: Some(message.into()),
            ..Self::default()
        }
    }

    /// Triangles in the last upload.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

impl RenderBackend for RecordingBackend {
    fn upload_and_draw(
        &mut self,
        vertices: &[FoliageVertex],
        vertex_count: u32,
        indices: &[u32],
        index_count: u32,
    ) -> MeshResult<()> {
        if let Some(message) = &self.fail_with {
            return Err(MeshError::Backend(message.clone()));
        }
        self.vertices.clear();
        self.vertices.extend_from_slice(vertices);
        self.indices.clear();
        self.indices.extend_from_slice(indices);
        self.draw_calls += 1;
        self.total_vertices += u64::from(vertex_count);
        debug_assert_eq!(indices.len(), index_count as usize);
        Ok(())
    }
}
