//! The loaded dataset
//!
//! A [`Dataset`] is built once per page view from a bulk read and is never
//! mutated afterwards. Collections keep their source order, which is also the
//! presentation order of every derived set.

use crate::entity::{Outcome, Problem, Project, Worldview};
use crate::id::{OutcomeId, ProblemId, ProjectId, WorldviewId};
use crate::integrity::{IntegrityIssue, IntegrityReport};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// One of the four entity collections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Collection {
    /// Worldviews
    Worldviews,
    /// Outcomes
    Outcomes,
    /// Problems
    Problems,
    /// Projects
    Projects,
}

impl Collection {
    /// All collections in pathway order
    pub const ALL: [Self; 4] = [
        Self::Worldviews,
        Self::Outcomes,
        Self::Problems,
        Self::Projects,
    ];

    /// Key used in snapshots
    #[inline]
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Self::Worldviews => "worldviews",
            Self::Outcomes => "outcomes",
            Self::Problems => "problems",
            Self::Projects => "projects",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// The four immutable collections
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dataset {
    /// Stakeholder perspectives
    pub worldviews: Vec<Worldview>,
    /// Five-year goals
    pub outcomes: Vec<Outcome>,
    /// Barriers
    pub problems: Vec<Problem>,
    /// Initiatives
    pub projects: Vec<Project>,
}

impl Dataset {
    /// Create dataset from its collections
    #[inline]
    #[must_use]
    pub fn new(
        worldviews: Vec<Worldview>,
        outcomes: Vec<Outcome>,
        problems: Vec<Problem>,
        projects: Vec<Project>,
    ) -> Self {
        Self {
            worldviews,
            outcomes,
            problems,
            projects,
        }
    }

    /// Find worldview by id
    #[must_use]
    pub fn worldview(&self, id: &WorldviewId) -> Option<&Worldview> {
        self.worldviews.iter().find(|w| &w.id == id)
    }

    /// Find outcome by id
    #[must_use]
    pub fn outcome(&self, id: &OutcomeId) -> Option<&Outcome> {
        self.outcomes.iter().find(|o| &o.id == id)
    }

    /// Find problem by id
    #[must_use]
    pub fn problem(&self, id: &ProblemId) -> Option<&Problem> {
        self.problems.iter().find(|p| &p.id == id)
    }

    /// Find project by id
    #[must_use]
    pub fn project(&self, id: &ProjectId) -> Option<&Project> {
        self.projects.iter().find(|p| &p.id == id)
    }

    /// Number of entities in one collection
    #[inline]
    #[must_use]
    pub fn count(&self, collection: Collection) -> usize {
        match collection {
            Collection::Worldviews => self.worldviews.len(),
            Collection::Outcomes => self.outcomes.len(),
            Collection::Problems => self.problems.len(),
            Collection::Projects => self.projects.len(),
        }
    }

    /// Total entity count
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        Collection::ALL.iter().map(|c| self.count(*c)).sum()
    }

    /// Check if every collection is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Blake3 digest of the canonical JSON form, hex encoded
    ///
    /// # Errors
    ///
    /// Returns the serializer's error if the dataset cannot be written as JSON.
    pub fn fingerprint(&self) -> Result<String, serde_json::Error> {
        let mut hasher = blake3::Hasher::new();
        serde_json::to_writer(&mut hasher, self)?;
        Ok(hasher.finalize().to_hex().to_string())
    }

    /// Collect dangling references, duplicate ids and blank names
    ///
    /// Findings are diagnostic only; traversal treats every dangling
    /// reference as "no match".
    #[must_use]
    pub fn integrity_report(&self) -> IntegrityReport {
        let mut issues = Vec::new();

        let worldview_ids = unique_ids(
            Collection::Worldviews,
            self.worldviews.iter().map(|w| (w.id.as_str(), w.name.as_str())),
            &mut issues,
        );
        let outcome_ids = unique_ids(
            Collection::Outcomes,
            self.outcomes.iter().map(|o| (o.id.as_str(), o.name.as_str())),
            &mut issues,
        );
        let problem_ids = unique_ids(
            Collection::Problems,
            self.problems.iter().map(|p| (p.id.as_str(), p.name.as_str())),
            &mut issues,
        );
        unique_ids(
            Collection::Projects,
            self.projects.iter().map(|p| (p.id.as_str(), p.name.as_str())),
            &mut issues,
        );

        for outcome in &self.outcomes {
            for worldview in outcome.worldview_relevance.keys() {
                if !worldview_ids.contains(worldview.as_str()) {
                    issues.push(IntegrityIssue::UnknownWorldview {
                        outcome: outcome.id.clone(),
                        worldview: worldview.clone(),
                    });
                }
            }
        }

        for problem in &self.problems {
            for outcome in &problem.affected_outcomes {
                if !outcome_ids.contains(outcome.as_str()) {
                    issues.push(IntegrityIssue::DanglingOutcome {
                        problem: problem.id.clone(),
                        outcome: outcome.clone(),
                    });
                }
            }
        }

        for project in &self.projects {
            for problem in &project.addressed_problems {
                if !problem_ids.contains(problem.as_str()) {
                    issues.push(IntegrityIssue::DanglingProblem {
                        project: project.id.clone(),
                        problem: problem.clone(),
                    });
                }
            }
        }

        IntegrityReport { issues }
    }
}

fn unique_ids<'a>(
    collection: Collection,
    rows: impl Iterator<Item = (&'a str, &'a str)>,
    issues: &mut Vec<IntegrityIssue>,
) -> HashSet<&'a str> {
    let mut seen = HashSet::new();
    for (id, name) in rows {
        if !seen.insert(id) {
            issues.push(IntegrityIssue::DuplicateId {
                collection,
                id: id.to_string(),
            });
        }
        if name.trim().is_empty() {
            issues.push(IntegrityIssue::BlankName {
                collection,
                id: id.to_string(),
            });
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grade::RelevanceGrade;
    use pretty_assertions::assert_eq;

    fn sample() -> Dataset {
        Dataset::new(
            vec![Worldview::new("w1", "Ecologists")],
            vec![
                Outcome::new("o1", "Clean rivers").with_grade("w1", RelevanceGrade::High),
                Outcome::new("o2", "Living wages").with_grade("w9", RelevanceGrade::Low),
            ],
            vec![Problem::new("p1", "Runoff").affecting("o1").affecting("o404")],
            vec![
                Project::new("pr1", "Buffer strips").addressing("p1"),
                Project::new("pr1", "").addressing("p0"),
            ],
        )
    }

    #[test]
    fn lookups_by_id() {
        let dataset = sample();
        assert_eq!(dataset.outcome(&"o2".into()).map(|o| o.name.as_str()), Some("Living wages"));
        assert!(dataset.problem(&"p9".into()).is_none());
        assert_eq!(dataset.count(Collection::Projects), 2);
        assert_eq!(dataset.len(), 6);
    }

    #[test]
    fn integrity_report_finds_every_issue_kind() {
        let report = sample().integrity_report();

        assert_eq!(
            report.issues,
            vec![
                IntegrityIssue::DuplicateId {
                    collection: Collection::Projects,
                    id: "pr1".to_string()
                },
                IntegrityIssue::BlankName {
                    collection: Collection::Projects,
                    id: "pr1".to_string()
                },
                IntegrityIssue::UnknownWorldview {
                    outcome: "o2".into(),
                    worldview: "w9".into()
                },
                IntegrityIssue::DanglingOutcome {
                    problem: "p1".into(),
                    outcome: "o404".into()
                },
                IntegrityIssue::DanglingProblem {
                    project: "pr1".into(),
                    problem: "p0".into()
                },
            ]
        );
        assert_eq!(report.dangling_count(), 2);
    }

    #[test]
    fn fingerprint_tracks_content() {
        let a = sample();
        let mut b = sample();
        assert_eq!(a.fingerprint().unwrap(), b.fingerprint().unwrap());

        b.worldviews[0].name.push('!');
        assert_ne!(a.fingerprint().unwrap(), b.fingerprint().unwrap());
        assert_eq!(a.fingerprint().unwrap().len(), 64);

        let hashed = blake3::hash(&serde_json::to_vec(&a).unwrap()).to_hex().to_string();
        assert_eq!(a.fingerprint().unwrap(), hashed);
    }

    #[test]
    fn empty_dataset_is_clean() {
        let dataset = Dataset::default();
        assert!(dataset.is_empty());
        assert!(dataset.integrity_report().is_clean());
    }
}
