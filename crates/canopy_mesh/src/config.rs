//! Foliage configuration file.
//!
//! ```toml
//! [culling]
//! mode = "smart"
//! render_distance = 256.0
//!
//! [mesh]
//! encoding = "ultra"
//! origin = [0, 0, 0]
//! initial_capacity = 4096
//! ```
//!
//! Both tables are optional; missing keys take their defaults.

use canopy_cull::{CullConfig, FoliageCuller};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::batch::{QuadBatch, DEFAULT_CAPACITY};
use crate::error::{MeshError, MeshResult};
use crate::quad::QuadEncoding;

/// Largest accepted `initial_capacity`, in quads.
pub const MAX_INITIAL_CAPACITY: usize = 1 << 20;

/// Batch settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeshConfig {
    /// Encoding for queued quads.
    pub encoding: QuadEncoding,
    /// World offset of chunk-local positions.
    pub origin: [i32; 3],
    /// Queue capacity reserved up front, in quads.
    pub initial_capacity: usize,
}

impl Default for MeshConfig {
    fn default() -> Self {
        Self {
            encoding: QuadEncoding::default(),
            origin: [0; 3],
            initial_capacity: DEFAULT_CAPACITY,
        }
    }
}

impl MeshConfig {
    /// Checks value ranges.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::InvalidConfig`] when the capacity is out of range.
    pub fn validate(&self) -> MeshResult<()> {
        if self.initial_capacity > MAX_INITIAL_CAPACITY {
            return Err(MeshError::InvalidConfig(format!(
                "initial_capacity must be at most {MAX_INITIAL_CAPACITY}, got {}",
                self.initial_capacity
            )));
        }
        Ok(())
    }

    /// Builds an empty batch from these settings.
    #[must_use]
    pub fn batch(&self) -> QuadBatch {
        let mut batch = QuadBatch::with_capacity(self.encoding, self.initial_capacity);
        batch.set_origin(self.origin);
        batch
    }
}

/// Whole configuration document.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FoliageConfig {
    /// `[culling]` table.
    pub culling: CullConfig,
    /// `[mesh]` table.
    pub mesh: MeshConfig,
}

impl FoliageConfig {
    /// Parses a TOML document.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is malformed or either table fails
    /// validation.
    pub fn from_toml_str(source: &str) -> MeshResult<Self> {
        let config: Self = toml::from_str(source)?;
        config.culling.validate()?;
        config.mesh.validate()?;
        Ok(config)
    }

    /// Reads and parses a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: impl AsRef<Path>) -> MeshResult<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    /// Builds a culler and an empty batch.
    #[must_use]
    pub fn build(&self) -> (FoliageCuller, QuadBatch) {
        (FoliageCuller::new(&self.culling), self.mesh.batch())
    }
}
