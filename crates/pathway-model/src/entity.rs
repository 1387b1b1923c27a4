//! Dataset entities
//!
//! Field names follow the upstream store (camelCase on the wire). Relationship
//! fields default to empty when missing or null, and unrecognised relevance
//! grades are dropped, because rows are hand-entered by stakeholders.

use crate::grade::RelevanceGrade;
use crate::id::{CategoryId, OutcomeId, ProblemId, ProjectId, WorldviewId};
use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Deserializer, Serialize};

/// A stakeholder perspective
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Worldview {
    /// Stable identifier
    pub id: WorldviewId,
    /// Display name
    #[serde(default, deserialize_with = "nullable")]
    pub name: String,
    /// Optional long-form text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Worldview {
    /// Create worldview
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<WorldviewId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
        }
    }

    /// With description
    #[inline]
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// A five-year goal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Outcome {
    /// Stable identifier
    pub id: OutcomeId,
    /// Display name
    #[serde(default, deserialize_with = "nullable")]
    pub name: String,
    /// Optional long-form text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Grade per worldview; a worldview missing here has no grade
    #[serde(default, deserialize_with = "lenient_grades")]
    pub worldview_relevance: IndexMap<WorldviewId, RelevanceGrade>,
}

impl Outcome {
    /// Create outcome with no grades
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<OutcomeId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            worldview_relevance: IndexMap::new(),
        }
    }

    /// With a grade for one worldview
    #[inline]
    #[must_use]
    pub fn with_grade(mut self, worldview: impl Into<WorldviewId>, grade: RelevanceGrade) -> Self {
        self.worldview_relevance.insert(worldview.into(), grade);
        self
    }

    /// With description
    #[inline]
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Grade for a worldview, `None` when absent
    #[inline]
    #[must_use]
    pub fn grade_for(&self, worldview: &WorldviewId) -> Option<RelevanceGrade> {
        self.worldview_relevance.get(worldview).copied()
    }
}

/// A barrier blocking one or more outcomes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Problem {
    /// Stable identifier
    pub id: ProblemId,
    /// Display name
    #[serde(default, deserialize_with = "nullable")]
    pub name: String,
    /// Optional long-form text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Outcomes this problem blocks
    #[serde(default, deserialize_with = "nullable")]
    pub affected_outcomes: IndexSet<OutcomeId>,
    /// Categories this problem belongs to
    #[serde(default, deserialize_with = "nullable")]
    pub problem_category: IndexSet<CategoryId>,
}

impl Problem {
    /// Create problem with no links
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<ProblemId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            affected_outcomes: IndexSet::new(),
            problem_category: IndexSet::new(),
        }
    }

    /// With an affected outcome
    #[inline]
    #[must_use]
    pub fn affecting(mut self, outcome: impl Into<OutcomeId>) -> Self {
        self.affected_outcomes.insert(outcome.into());
        self
    }

    /// With a category
    #[inline]
    #[must_use]
    pub fn in_category(mut self, category: impl Into<CategoryId>) -> Self {
        self.problem_category.insert(category.into());
        self
    }

    /// With description
    #[inline]
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// A real-world initiative
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Stable identifier
    pub id: ProjectId,
    /// Display name
    #[serde(default, deserialize_with = "nullable")]
    pub name: String,
    /// Optional long-form text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Problems this project works on
    #[serde(default, deserialize_with = "nullable")]
    pub addressed_problems: IndexSet<ProblemId>,
    /// Organizations running the project, in source order
    #[serde(default, deserialize_with = "nullable")]
    pub organizations: Vec<String>,
}

impl Project {
    /// Create project with no links
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<ProjectId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            addressed_problems: IndexSet::new(),
            organizations: Vec::new(),
        }
    }

    /// With an addressed problem
    #[inline]
    #[must_use]
    pub fn addressing(mut self, problem: impl Into<ProblemId>) -> Self {
        self.addressed_problems.insert(problem.into());
        self
    }

    /// With an organization appended
    #[inline]
    #[must_use]
    pub fn with_organization(mut self, organization: impl Into<String>) -> Self {
        self.organizations.push(organization.into());
        self
    }

    /// With description
    #[inline]
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// `null` and missing both mean "empty"
fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn lenient_grades<'de, D>(deserializer: D) -> Result<IndexMap<WorldviewId, RelevanceGrade>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<IndexMap<WorldviewId, Option<String>>> = Option::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .filter_map(|(worldview, grade)| {
            grade
                .as_deref()
                .and_then(RelevanceGrade::parse_lenient)
                .map(|grade| (worldview, grade))
        })
        .collect())
}
