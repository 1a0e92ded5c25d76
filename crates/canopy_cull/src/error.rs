//! # Culling Error Types
//!
//! The decision path is infallible. These errors only come out of
//! configuration parsing and validation.

use thiserror::Error;

/// Errors raised while configuring the culler.
#[derive(Error, Debug)]
pub enum CullError {
    /// Heuristic name not recognized.
    #[error("unknown culling mode: {0:?}")]
    UnknownMode(String),

    /// A configuration value is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Configuration file is not valid TOML.
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),

    /// Configuration file could not be read.
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for culler configuration.
pub type CullResult<T> = Result<T, CullError>;
