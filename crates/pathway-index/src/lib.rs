//! Pathway Relevance Index
//!
//! Precomputed adjacency over the four-stage pathway graph
//! (Worldview → Outcome → Problem → Project).
//!
//! # Overview
//!
//! - **Forward queries**: which outcomes matter to a worldview selection,
//!   which problems block an outcome selection, which projects address a
//!   problem selection
//! - **Reverse queries**: the same edges walked right-to-left
//! - **Grades**: relevance is graded, never collapsed to a boolean
//!
//! Dangling references are dropped when the index is built, so no query can
//! ever match them.
//!
//! # Example
//!
//! ```rust
//! use pathway_index::RelevanceIndex;
//! use pathway_model::{Dataset, Outcome, RelevanceGrade, Worldview, WorldviewId};
//!
//! let dataset = Dataset::new(
//!     vec![Worldview::new("w1", "Builders")],
//!     vec![
//!         Outcome::new("o1", "Housing").with_grade("w1", RelevanceGrade::High),
//!         Outcome::new("o2", "Transit").with_grade("w1", RelevanceGrade::Low),
//!     ],
//!     vec![],
//!     vec![],
//! );
//!
//! let index = RelevanceIndex::build(&dataset);
//! let relevant = index.outcomes_relevant_to([&WorldviewId::new("w1")]);
//! assert_eq!(relevant.len(), 1);
//! assert!(relevant.contains("o1"));
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod index;

// Re-exports
pub use index::{DroppedReferences, RelevanceIndex};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
