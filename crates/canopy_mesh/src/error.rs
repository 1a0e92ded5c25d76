//! # Mesh Error Types

use canopy_cull::CullError;
use thiserror::Error;

/// Errors raised by batch flushing and configuration loading.
#[derive(Error, Debug)]
pub enum MeshError {
    /// The render backend rejected the upload or draw.
    #[error("render backend failed: {0}")]
    Backend(String),

    /// Culling section of the configuration is invalid.
    #[error(transparent)]
    Cull(#[from] CullError),

    /// Mesh section of the configuration is invalid.
    #[error("invalid mesh configuration: {0}")]
    InvalidConfig(String),

    /// Configuration file is not valid TOML.
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),

    /// Configuration file could not be read.
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for mesh operations.
pub type MeshResult<T> = Result<T, MeshError>;
