//! Culler configuration.
//!
//! Loaded once at startup, usually from the `[culling]` table of a TOML file:
//!
//! ```toml
//! [culling]
//! mode = "solid_aggressive"
//! render_distance = 192.0
//! camera = [0.0, 80.0, 0.0]
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::context::{CullingContext, DEFAULT_RENDER_DISTANCE};
use crate::error::{CullError, CullResult};
use crate::heuristics::CullMode;

/// Injected configuration for a [`crate::FoliageCuller`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CullConfig {
    /// Active heuristic.
    pub mode: CullMode,
    /// Render distance in blocks.
    pub render_distance: f64,
    /// Initial camera position.
    pub camera: [f64; 3],
}

impl Default for CullConfig {
    fn default() -> Self {
        Self {
            mode: CullMode::default(),
            render_distance: DEFAULT_RENDER_DISTANCE,
            camera: [0.0; 3],
        }
    }
}

impl CullConfig {
    /// Config with the given mode and defaults elsewhere.
    #[must_use]
    pub fn with_mode(mode: CullMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    /// Parses a bare `CullConfig` TOML document (no `[culling]` header).
    ///
    /// # Errors
    ///
    /// Returns an error if the document is malformed or fails validation.
    pub fn from_toml_str(source: &str) -> CullResult<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: impl AsRef<Path>) -> CullResult<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    /// Checks value ranges.
    ///
    /// # Errors
    ///
    /// Returns [`CullError::InvalidConfig`] for a non-positive or non-finite
    /// render distance, or a non-finite camera coordinate.
    pub fn validate(&self) -> CullResult<()> {
        if !self.render_distance.is_finite() || self.render_distance <= 0.0 {
            return Err(CullError::InvalidConfig(format!(
                "render_distance must be positive, got {}",
                self.render_distance
            )));
        }
        if self.camera.iter().any(|c| !c.is_finite()) {
            return Err(CullError::InvalidConfig(format!(
                "camera must be finite, got {:?}",
                self.camera
            )));
        }
        Ok(())
    }

    /// Builds the initial culling context.
    #[must_use]
    pub fn context(&self) -> CullingContext {
        CullingContext::with_view(self.camera, self.render_distance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = CullConfig::from_toml_str("").unwrap();
        assert_eq!(config, CullConfig::default());
        assert_eq!(config.mode, CullMode::Smart);
    }

    #[test]
    fn test_parse_full_document() {
        let config = CullConfig::from_toml_str(
            r#"
            mode = "depth_gradient"
            render_distance = 96.0
            camera = [1.0, 70.0, -4.0]
            "#,
        )
        .unwrap();
        assert_eq!(config.mode, CullMode::DepthGradient);
        assert_eq!(config.camera, [1.0, 70.0, -4.0]);
        assert_eq!(config.context().render_distance(), 96.0);
    }

    #[test]
    fn test_rejects_unknown_mode() {
        assert!(CullConfig::from_toml_str(r#"mode = "frustum""#).is_err());
    }

    #[test]
    fn test_rejects_bad_render_distance() {
        let err = CullConfig::from_toml_str("render_distance = 0.0").unwrap_err();
        assert!(matches!(err, CullError::InvalidConfig(_)));
    }
}
