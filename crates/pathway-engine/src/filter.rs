//! Project attribute filter
//!
//! Free-text plus exact-match category and organization filters used by the
//! project discovery views. The filter is independent of the pathway
//! selection; the two compose by intersection.

use indexmap::IndexSet;
use pathway_index::RelevanceIndex;
use pathway_model::{CategoryId, Dataset, ProblemId, Project, ProjectId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Attribute filter over projects
///
/// An unset field matches every project. Text and organization are trimmed
/// when set; blank values unset the field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectFilter {
    text: Option<String>,
    category: Option<CategoryId>,
    organization: Option<String>,
}

/// Distinct filter values present in a dataset
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Facets {
    /// Problem categories, first-seen order
    pub categories: IndexSet<CategoryId>,
    /// Organization names, first-seen order
    pub organizations: IndexSet<String>,
}

impl ProjectFilter {
    /// Filter matching every project
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With case-insensitive substring on name or description
    #[must_use]
    pub fn with_text(mut self, text: impl AsRef<str>) -> Self {
        self.text = non_blank(text.as_ref());
        self
    }

    /// With exact problem category
    #[must_use]
    pub fn with_category(mut self, category: impl Into<CategoryId>) -> Self {
        let category = category.into();
        self.category = (!category.as_str().trim().is_empty()).then_some(category);
        self
    }

    /// With exact organization name
    #[must_use]
    pub fn with_organization(mut self, organization: impl AsRef<str>) -> Self {
        self.organization = non_blank(organization.as_ref());
        self
    }

    /// Drop the text filter only
    #[inline]
    #[must_use]
    pub fn clear_text(mut self) -> Self {
        self.text = None;
        self
    }

    /// Drop the category filter only
    #[inline]
    #[must_use]
    pub fn clear_category(mut self) -> Self {
        self.category = None;
        self
    }

    /// Drop the organization filter only
    #[inline]
    #[must_use]
    pub fn clear_organization(mut self) -> Self {
        self.organization = None;
        self
    }

    /// Drop every attribute filter
    #[inline]
    #[must_use]
    pub fn clear(self) -> Self {
        Self::default()
    }

    /// Current text
    #[inline]
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Current category
    #[inline]
    #[must_use]
    pub fn category(&self) -> Option<&CategoryId> {
        self.category.as_ref()
    }

    /// Current organization
    #[inline]
    #[must_use]
    pub fn organization(&self) -> Option<&str> {
        self.organization.as_deref()
    }

    /// Check if any field is set
    #[inline]
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.text.is_some() || self.category.is_some() || self.organization.is_some()
    }

    /// Projects passing every set field, in source order
    #[must_use]
    pub fn apply(&self, dataset: &Dataset, index: &RelevanceIndex) -> IndexSet<ProjectId> {
        let matcher = Matcher::new(self, dataset, index);
        dataset
            .projects
            .iter()
            .filter(|project| matcher.matches(project))
            .map(|project| project.id.clone())
            .collect()
    }

    /// Check a single project
    #[must_use]
    pub fn matches(&self, project: &Project, dataset: &Dataset, index: &RelevanceIndex) -> bool {
        Matcher::new(self, dataset, index).matches(project)
    }

    /// Distinct categories and organizations offered by a dataset
    #[must_use]
    pub fn facets(dataset: &Dataset) -> Facets {
        let categories = dataset
            .problems
            .iter()
            .flat_map(|problem| problem.problem_category.iter().cloned())
            .collect();
        let organizations = dataset
            .projects
            .iter()
            .flat_map(|project| project.organizations.iter())
            .filter_map(|org| non_blank(org))
            .collect();

        Facets {
            categories,
            organizations,
        }
    }
}

/// Filter compiled against one dataset
struct Matcher<'a> {
    filter: &'a ProjectFilter,
    needle: Option<String>,
    categories: HashMap<&'a ProblemId, &'a IndexSet<CategoryId>>,
    index: &'a RelevanceIndex,
}

impl<'a> Matcher<'a> {
    fn new(filter: &'a ProjectFilter, dataset: &'a Dataset, index: &'a RelevanceIndex) -> Self {
        let mut categories = HashMap::new();
        if filter.category.is_some() {
            for problem in &dataset.problems {
                categories
                    .entry(&problem.id)
                    .or_insert(&problem.problem_category);
            }
        }

        Self {
            filter,
            needle: filter.text.as_deref().map(str::to_lowercase),
            categories,
            index,
        }
    }

    fn matches(&self, project: &Project) -> bool {
        self.matches_text(project) && self.matches_category(project) && self.matches_organization(project)
    }

    fn matches_text(&self, project: &Project) -> bool {
        let Some(needle) = &self.needle else {
            return true;
        };
        project.name.to_lowercase().contains(needle)
            || project
                .description
                .as_deref()
                .is_some_and(|d| d.to_lowercase().contains(needle))
    }

    fn matches_category(&self, project: &Project) -> bool {
        let Some(category) = &self.filter.category else {
            return true;
        };
        // Only resolved problems count; dangling links carry no category.
        self.index
            .problems_addressed_by(&project.id)
            .into_iter()
            .flatten()
            .filter_map(|problem| self.categories.get(problem))
            .any(|categories| categories.contains(category))
    }

    fn matches_organization(&self, project: &Project) -> bool {
        let Some(organization) = &self.filter.organization else {
            return true;
        };
        project
            .organizations
            .iter()
            .any(|org| org.trim() == organization)
    }
}

fn non_blank(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
