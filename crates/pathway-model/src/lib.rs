//! Pathway Model
//!
//! Immutable entities of the Theory-of-Change dataset.
//!
//! # Overview
//!
//! - **Worldview**: a stakeholder perspective
//! - **Outcome**: a five-year goal, graded for relevance per worldview
//! - **Problem**: a barrier blocking one or more outcomes
//! - **Project**: an initiative addressing one or more problems
//! - **Dataset**: the four collections, loaded together and never mutated
//!
//! # Example
//!
//! ```rust
//! use pathway_model::{Dataset, Outcome, RelevanceGrade, Worldview};
//!
//! let dataset = Dataset::new(
//!     vec![Worldview::new("w1", "Systems thinkers")],
//!     vec![Outcome::new("o1", "Resilient food systems").with_grade("w1", RelevanceGrade::High)],
//!     vec![],
//!     vec![],
//! );
//!
//! assert!(dataset.outcome(&"o1".into()).is_some());
//! assert!(dataset.integrity_report().is_clean());
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod dataset;
pub mod entity;
pub mod error;
pub mod grade;
pub mod id;
pub mod integrity;

// Re-exports
pub use dataset::{Collection, Dataset};
pub use entity::{Outcome, Problem, Project, Worldview};
pub use error::GradeParseError;
pub use grade::{RelevanceGrade, RelevanceThreshold};
pub use id::{CategoryId, OutcomeId, ProblemId, ProjectId, WorldviewId};
pub use integrity::{IntegrityIssue, IntegrityReport};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with the dataset
    pub use crate::{
        CategoryId, Collection, Dataset, Outcome, OutcomeId, Problem, ProblemId, Project,
        ProjectId, RelevanceGrade, RelevanceThreshold, Worldview, WorldviewId,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
