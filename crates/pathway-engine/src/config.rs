//! Engine configuration
//!
//! Read from TOML at startup; every field has a default so an empty file is
//! a valid configuration.
//!
//! ```toml
//! mode = "guided"
//! relevance_threshold = "medium"
//! cache_capacity = 256
//! ```

use crate::error::ConfigError;
use pathway_model::RelevanceThreshold;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Which UI flow the engine serves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExplorerMode {
    /// Free exploration; emptying a stage keeps downstream selections
    #[default]
    Explorer,
    /// Left-to-right guided pathway; emptying a stage clears downstream
    Guided,
}

/// Pathway engine configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Default cascade behaviour for session toggles
    pub mode: ExplorerMode,
    /// Minimum grade for an outcome to follow from a worldview
    pub relevance_threshold: RelevanceThreshold,
    /// Maximum cached views; 0 disables caching
    pub cache_capacity: u64,
}

impl EngineConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With mode
    #[inline]
    #[must_use]
    pub fn with_mode(mut self, mode: ExplorerMode) -> Self {
        self.mode = mode;
        self
    }

    /// With relevance threshold
    #[inline]
    #[must_use]
    pub fn with_threshold(mut self, threshold: RelevanceThreshold) -> Self {
        self.relevance_threshold = threshold;
        self
    }

    /// With cache capacity
    #[inline]
    #[must_use]
    pub fn with_cache_capacity(mut self, capacity: u64) -> Self {
        self.cache_capacity = capacity;
        self
    }

    /// Parse from TOML text
    ///
    /// # Errors
    /// Returns [`ConfigError::Parse`] on malformed TOML or unknown values
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Read from a TOML file
    ///
    /// # Errors
    /// - [`ConfigError::Io`] if the file cannot be read
    /// - [`ConfigError::Parse`] if its contents are invalid
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| ConfigError::io_error(path, e))?;
        Self::from_toml_str(&text)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            mode: ExplorerMode::Explorer,
            relevance_threshold: RelevanceThreshold::Medium,
            cache_capacity: 256,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_toml_is_default() {
        let config = EngineConfig::from_toml_str("").unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn toml_overrides() {
        let config = EngineConfig::from_toml_str(
            "mode = \"guided\"\nrelevance_threshold = \"high\"\ncache_capacity = 0\n",
        )
        .unwrap();

        assert_eq!(config.mode, ExplorerMode::Guided);
        assert_eq!(config.relevance_threshold, RelevanceThreshold::High);
        assert_eq!(config.cache_capacity, 0);
    }

    #[test]
    fn unknown_mode_is_rejected() {
        let err = EngineConfig::from_toml_str("mode = \"wizard\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn reads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "mode = \"guided\"").unwrap();

        let config = EngineConfig::from_file(file.path()).unwrap();
        assert_eq!(config.mode, ExplorerMode::Guided);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = EngineConfig::from_file("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn builder() {
        let config = EngineConfig::new()
            .with_mode(ExplorerMode::Guided)
            .with_threshold(RelevanceThreshold::Low)
            .with_cache_capacity(8);

        assert_eq!(config.mode, ExplorerMode::Guided);
        assert_eq!(config.cache_capacity, 8);
    }
}
