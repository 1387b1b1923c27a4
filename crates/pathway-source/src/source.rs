//! Upstream data sources
//!
//! A [`DataSource`] performs one bulk read of all four collections. It does
//! not check completeness; that is the loader's job.

use crate::error::LoadError;
use crate::snapshot::{RawSnapshot, SnapshotFormat};
use pathway_model::Dataset;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// One bulk read of the four collections
#[async_trait::async_trait]
pub trait DataSource: Send + Sync {
    /// Fetch every collection in a single request
    async fn fetch(&self) -> Result<RawSnapshot, LoadError>;

    /// Short human-readable description for logs
    fn describe(&self) -> String;
}

/// In-memory source returning a fixed snapshot
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    snapshot: RawSnapshot,
}

impl StaticSource {
    /// Source returning `snapshot` on every fetch
    #[inline]
    #[must_use]
    pub fn new(snapshot: RawSnapshot) -> Self {
        Self { snapshot }
    }

    /// Source returning a complete dataset
    #[inline]
    #[must_use]
    pub fn from_dataset(dataset: Dataset) -> Self {
        Self::new(RawSnapshot::complete(dataset))
    }
}

#[async_trait::async_trait]
impl DataSource for StaticSource {
    async fn fetch(&self) -> Result<RawSnapshot, LoadError> {
        Ok(self.snapshot.clone())
    }

    fn describe(&self) -> String {
        "static snapshot".to_string()
    }
}

/// File source limits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Largest snapshot accepted, in bytes
    pub max_file_size: u64,
}

impl SourceConfig {
    /// Default limit (16 MiB)
    pub const DEFAULT_MAX_FILE_SIZE: u64 = 16 * 1024 * 1024;

    /// With maximum file size
    #[inline]
    #[must_use]
    pub fn with_max_file_size(mut self, bytes: u64) -> Self {
        self.max_file_size = bytes;
        self
    }
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            max_file_size: Self::DEFAULT_MAX_FILE_SIZE,
        }
    }
}

/// Snapshot file on disk, JSON or YAML by extension
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
    config: SourceConfig,
}

impl FileSource {
    /// Source reading `path` with default limits
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            config: SourceConfig::default(),
        }
    }

    /// With source configuration
    #[inline]
    #[must_use]
    pub fn with_config(mut self, config: SourceConfig) -> Self {
        self.config = config;
        self
    }

    /// Snapshot path
    #[inline]
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait::async_trait]
impl DataSource for FileSource {
    async fn fetch(&self) -> Result<RawSnapshot, LoadError> {
        let format = SnapshotFormat::from_path(&self.path)?;

        let metadata = tokio::fs::metadata(&self.path)
            .await
            .map_err(|e| LoadError::io_error(&self.path, e))?;
        if metadata.len() > self.config.max_file_size {
            return Err(LoadError::TooLarge {
                path: self.path.clone(),
                size: metadata.len(),
                max: self.config.max_file_size,
            });
        }

        let text = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| LoadError::io_error(&self.path, e))?;

        tracing::debug!(path = %self.path.display(), %format, bytes = text.len(), "read snapshot");
        RawSnapshot::parse(&text, format)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pathway_test_utils::{sample_dataset, sample_snapshot_json};
    use std::io::Write;

    fn snapshot_file(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[tokio::test]
    async fn static_source_returns_its_snapshot() {
        let source = StaticSource::from_dataset(sample_dataset());
        let raw = source.fetch().await.unwrap();
        assert!(raw.missing().is_empty());
        assert_eq!(raw.into_dataset().unwrap(), sample_dataset());
    }

    #[tokio::test]
    async fn file_source_reads_json() {
        let file = snapshot_file(".json", &sample_snapshot_json());
        let source = FileSource::new(file.path());

        let dataset = source.fetch().await.unwrap().into_dataset().unwrap();
        assert_eq!(dataset, sample_dataset());
    }

    #[tokio::test]
    async fn file_source_enforces_size_limit() {
        let file = snapshot_file(".json", &sample_snapshot_json());
        let source = FileSource::new(file.path())
            .with_config(SourceConfig::default().with_max_file_size(16));

        let err = source.fetch().await.unwrap_err();
        assert!(matches!(err, LoadError::TooLarge { max: 16, .. }));
    }

    #[tokio::test]
    async fn file_source_rejects_unknown_extension() {
        let file = snapshot_file(".csv", "id,name\n");
        let err = FileSource::new(file.path()).fetch().await.unwrap_err();
        assert!(matches!(err, LoadError::UnsupportedFormat(_)));
    }

    #[tokio::test]
    async fn missing_file_is_retryable_io() {
        let err = FileSource::new("/no/such/snapshot.json").fetch().await.unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
        assert!(err.is_retryable());
    }
}
