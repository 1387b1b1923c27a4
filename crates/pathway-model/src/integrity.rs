//! Data-quality findings
//!
//! Source rows are stakeholder submitted and known to be imperfect. Findings
//! here are surfaced to logs and the `check` command; they never block a load.

use crate::dataset::Collection;
use crate::id::{OutcomeId, ProblemId, ProjectId, WorldviewId};
use serde::Serialize;
use std::fmt;

/// One data-quality finding
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IntegrityIssue {
    /// Problem references an outcome that does not exist
    DanglingOutcome {
        /// Referencing problem
        problem: ProblemId,
        /// Missing outcome
        outcome: OutcomeId,
    },
    /// Project references a problem that does not exist
    DanglingProblem {
        /// Referencing project
        project: ProjectId,
        /// Missing problem
        problem: ProblemId,
    },
    /// Outcome grades a worldview that does not exist
    UnknownWorldview {
        /// Grading outcome
        outcome: OutcomeId,
        /// Missing worldview
        worldview: WorldviewId,
    },
    /// Same id appears twice in one collection
    DuplicateId {
        /// Collection holding the duplicate
        collection: Collection,
        /// Repeated id
        id: String,
    },
    /// Entity has an empty display name
    BlankName {
        /// Collection holding the entity
        collection: Collection,
        /// Entity id
        id: String,
    },
}

impl IntegrityIssue {
    /// Check if this is a dangling relationship reference
    #[inline]
    #[must_use]
    pub fn is_dangling(&self) -> bool {
        matches!(
            self,
            Self::DanglingOutcome { .. } | Self::DanglingProblem { .. }
        )
    }
}

impl fmt::Display for IntegrityIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DanglingOutcome { problem, outcome } => {
                write!(f, "problem {problem} references unknown outcome {outcome}")
            }
            Self::DanglingProblem { project, problem } => {
                write!(f, "project {project} references unknown problem {problem}")
            }
            Self::UnknownWorldview { outcome, worldview } => {
                write!(f, "outcome {outcome} grades unknown worldview {worldview}")
            }
            Self::DuplicateId { collection, id } => {
                write!(f, "duplicate id {id} in {collection}")
            }
            Self::BlankName { collection, id } => {
                write!(f, "{collection} entry {id} has a blank name")
            }
        }
    }
}

/// All findings for one dataset
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IntegrityReport {
    /// Findings in discovery order
    pub issues: Vec<IntegrityIssue>,
}

impl IntegrityReport {
    /// No findings
    #[inline]
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    /// Number of findings
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.issues.len()
    }

    /// Check if there are no findings
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    /// Number of dangling relationship references
    #[must_use]
    pub fn dangling_count(&self) -> usize {
        self.issues.iter().filter(|i| i.is_dangling()).count()
    }
}
