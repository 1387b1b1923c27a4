//! Pathway Data Sources
//!
//! The single asynchronous boundary of the pathway: one bulk read of the four
//! collections, accepted only when every collection is present.
//!
//! # Overview
//!
//! - **DataSource**: the upstream contract, one `fetch` per load
//! - **StaticSource / FileSource**: in-memory and JSON/YAML file sources
//! - **RawSnapshot**: decoded collections before the completeness check
//! - **DatasetLoader**: load state with a single manual retry
//!
//! # Example
//!
//! ```rust
//! use pathway_model::{Dataset, Worldview};
//! use pathway_source::{DatasetLoader, StaticSource};
//!
//! let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
//! rt.block_on(async {
//!     let dataset = Dataset::new(vec![Worldview::new("w1", "Stewards")], vec![], vec![], vec![]);
//!     let mut loader = DatasetLoader::new(StaticSource::from_dataset(dataset));
//!
//!     assert!(loader.load().await.is_ready());
//! });
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod error;
pub mod loader;
pub mod snapshot;
pub mod source;

// Re-exports
pub use error::LoadError;
pub use loader::{DatasetLoader, LoadState};
pub use snapshot::{RawSnapshot, SnapshotFormat};
pub use source::{DataSource, FileSource, SourceConfig, StaticSource};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
