//! Build and predicate configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::octree::MAX_HEIGHT;
use crate::GEOMETRY_EPSILON;

/// Octree sizing parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OctreeConfig {
    /// Upper bound for the tree height. Values above [`MAX_HEIGHT`] are clamped.
    pub max_height: usize,
    /// Clearance a shape must keep from a splitting plane to descend past it.
    /// Must be at least half the predicate tolerance.
    pub margin: f64,
}

impl Default for OctreeConfig {
    fn default() -> Self {
        Self {
            max_height: MAX_HEIGHT,
            margin: GEOMETRY_EPSILON,
        }
    }
}

impl OctreeConfig {
    /// Sets the height bound.
    pub fn with_max_height(mut self, max_height: usize) -> Self {
        self.max_height = max_height;
        self
    }

    /// Sets the splitting plane clearance.
    pub fn with_margin(mut self, margin: f64) -> Self {
        self.margin = margin;
        self
    }

    /// Returns the height bound actually applied, never above [`MAX_HEIGHT`].
    pub fn effective_max_height(&self) -> usize {
        self.max_height.min(MAX_HEIGHT)
    }
}

/// Full configuration for an [`Intersector`](crate::Intersector).
///
/// Deserialized from TOML, every field optional:
///
/// ```toml
/// max_height = 4
/// epsilon = 1e-7
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntersectorConfig {
    /// Upper bound for the octree height.
    pub max_height: usize,
    /// Tolerance of the exact predicates.
    pub epsilon: f64,
}

impl Default for IntersectorConfig {
    fn default() -> Self {
        Self {
            max_height: MAX_HEIGHT,
            epsilon: GEOMETRY_EPSILON,
        }
    }
}

impl IntersectorConfig {
    /// Parses and validates a TOML document.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Checks that the values can be used.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.epsilon.is_finite() || self.epsilon < 0.0 {
            return Err(ConfigError::InvalidEpsilon(self.epsilon));
        }
        Ok(())
    }

    /// Returns the octree part of the configuration, with the tolerance as
    /// splitting plane clearance.
    pub fn octree(&self) -> OctreeConfig {
        OctreeConfig {
            max_height: self.max_height,
            margin: self.epsilon,
        }
    }
}

/// Errors raised while loading a configuration.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// The file could not be read.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The contents are not valid TOML for this configuration.
    #[error("parse error: {0}")]
    Parse(String),

    /// The tolerance is negative or not finite.
    #[error("epsilon must be a finite non-negative number, got {0}")]
    InvalidEpsilon(f64),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = IntersectorConfig::default();
        assert_eq!(config.max_height, MAX_HEIGHT);
        assert_eq!(config.epsilon, GEOMETRY_EPSILON);
        assert_eq!(config.octree(), OctreeConfig::default());
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = IntersectorConfig::from_toml_str("max_height = 3\n").unwrap();
        assert_eq!(config.max_height, 3);
        assert_eq!(config.epsilon, GEOMETRY_EPSILON);
    }

    #[test]
    fn full_toml() {
        let config = IntersectorConfig::from_toml_str("max_height = 2\nepsilon = 0.001\n").unwrap();
        assert_eq!(config.max_height, 2);
        assert_eq!(config.epsilon, 0.001);
    }

    #[test]
    fn octree_view_carries_epsilon_as_margin() {
        let config = IntersectorConfig::from_toml_str("epsilon = 0.5").unwrap();
        assert_eq!(config.octree().margin, 0.5);
    }

    #[test]
    fn rejects_negative_epsilon() {
        let err = IntersectorConfig::from_toml_str("epsilon = -1.0").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEpsilon(e) if e == -1.0));
    }

    #[test]
    fn rejects_malformed_toml() {
        let err = IntersectorConfig::from_toml_str("max_height = \"tall\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn max_height_is_clamped() {
        let config = OctreeConfig::default().with_max_height(40);
        assert_eq!(config.effective_max_height(), MAX_HEIGHT);
        assert_eq!(OctreeConfig::default().with_max_height(2).effective_max_height(), 2);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = IntersectorConfig::load("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
