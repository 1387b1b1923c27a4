//! Error types for dataset loading
//!
//! A load either yields all four collections or one [`LoadError`].

use crate::snapshot::SnapshotFormat;
use pathway_model::Collection;
use std::path::PathBuf;

/// Errors while fetching or decoding a snapshot
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// IO error during file read
    #[error("io error reading {path}: {source}")]
    Io {
        /// Snapshot path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Snapshot text could not be decoded
    #[error("invalid {format} snapshot: {message}")]
    Parse {
        /// Format that was attempted
        format: SnapshotFormat,
        /// Decoder message
        message: String,
    },

    /// No decoder for the file extension
    #[error("unsupported snapshot format: '{0}'")]
    UnsupportedFormat(String),

    /// Snapshot exceeds the configured size limit
    #[error("snapshot {path} is {size} bytes, limit is {max}")]
    TooLarge {
        /// Snapshot path
        path: PathBuf,
        /// Actual size in bytes
        size: u64,
        /// Configured limit in bytes
        max: u64,
    },

    /// One of the four collections is absent
    #[error("snapshot is missing the {0} collection")]
    MissingCollection(Collection),

    /// Upstream source failure
    #[error("data source failed: {0}")]
    Source(String),
}

impl LoadError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create parse error for a format
    pub fn parse_error(format: SnapshotFormat, message: impl Into<String>) -> Self {
        Self::Parse {
            format,
            message: message.into(),
        }
    }

    /// Check if retrying the same source might succeed
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Io { .. } | Self::Source(_))
    }
}
