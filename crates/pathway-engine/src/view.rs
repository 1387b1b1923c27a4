//! Derived candidate sets handed to the presentation layer

use indexmap::IndexSet;
use pathway_model::{OutcomeId, ProblemId, ProjectId, RelevanceGrade, WorldviewId};
use serde::Serialize;

/// An outcome offered at the second stage
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutcomeCandidate {
    /// Outcome id
    pub id: OutcomeId,
    /// Strongest grade across the selected worldviews; `None` when no
    /// worldview is selected or none grades it
    pub grade: Option<RelevanceGrade>,
}

/// Candidate counts per stage
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StageCounts {
    /// Worldviews offered
    pub worldviews: usize,
    /// Outcome candidates
    pub outcomes: usize,
    /// Problem candidates
    pub problems: usize,
    /// Projects reached by the pathway alone
    pub pathway_projects: usize,
    /// Projects after the attribute filter
    pub projects: usize,
}

/// Everything the pathway UI renders for one selection and filter
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PathwayView {
    /// Every worldview, source order
    pub worldviews: IndexSet<WorldviewId>,
    /// Outcome candidates, source order
    pub outcomes: Vec<OutcomeCandidate>,
    /// Problem candidates, source order
    pub problems: IndexSet<ProblemId>,
    /// Projects reached through the pathway, before the attribute filter
    pub pathway_projects: IndexSet<ProjectId>,
    /// Pathway projects that also pass the attribute filter
    pub projects: IndexSet<ProjectId>,
}

impl PathwayView {
    /// Check if an outcome is a candidate
    #[must_use]
    pub fn has_outcome(&self, id: &OutcomeId) -> bool {
        self.outcomes.iter().any(|candidate| &candidate.id == id)
    }

    /// Outcome candidate ids, source order
    #[must_use]
    pub fn outcome_ids(&self) -> IndexSet<OutcomeId> {
        self.outcomes.iter().map(|c| c.id.clone()).collect()
    }

    /// Outcome candidates strongest grade first; ties keep source order
    #[must_use]
    pub fn ranked_outcomes(&self) -> Vec<&OutcomeCandidate> {
        let mut ranked: Vec<&OutcomeCandidate> = self.outcomes.iter().collect();
        ranked.sort_by(|a, b| b.grade.cmp(&a.grade));
        ranked
    }

    /// Per-stage counts
    #[must_use]
    pub fn counts(&self) -> StageCounts {
        StageCounts {
            worldviews: self.worldviews.len(),
            outcomes: self.outcomes.len(),
            problems: self.problems.len(),
            pathway_projects: self.pathway_projects.len(),
            projects: self.projects.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranking_is_stable_and_grade_descending() {
        let view = PathwayView {
            outcomes: vec![
                OutcomeCandidate { id: "a".into(), grade: Some(RelevanceGrade::Medium) },
                OutcomeCandidate { id: "b".into(), grade: None },
                OutcomeCandidate { id: "c".into(), grade: Some(RelevanceGrade::High) },
                OutcomeCandidate { id: "d".into(), grade: Some(RelevanceGrade::Medium) },
            ],
            ..PathwayView::default()
        };

        let order: Vec<&str> = view.ranked_outcomes().iter().map(|c| c.id.as_str()).collect();
        assert_eq!(order, vec!["c", "a", "d", "b"]);
        assert!(view.has_outcome(&"b".into()));
        assert_eq!(view.counts().outcomes, 4);
    }
}
