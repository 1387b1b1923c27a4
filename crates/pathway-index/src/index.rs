//! Relevance index
//!
//! Provides [`RelevanceIndex`], built once per dataset. Forward maps keep the
//! source order of the collections; reverse maps answer right-to-left
//! lookups without scanning.

use indexmap::{IndexMap, IndexSet};
use pathway_model::{
    Dataset, OutcomeId, ProblemId, ProjectId, RelevanceGrade, RelevanceThreshold, WorldviewId,
};
use std::collections::{HashMap, HashSet};

/// Adjacency index over the pathway graph
///
/// All queries are pure: they borrow the index and return a fresh set.
/// Result sets are ordered by the source order of the collection they
/// contain.
#[derive(Debug, Clone, Default)]
pub struct RelevanceIndex {
    /// outcome -> (worldview -> grade), known worldviews only
    grades: IndexMap<OutcomeId, IndexMap<WorldviewId, RelevanceGrade>>,

    /// worldview -> graded outcomes, in outcome order
    by_worldview: HashMap<WorldviewId, Vec<(OutcomeId, RelevanceGrade)>>,

    /// problem -> resolved affected outcomes
    problem_outcomes: IndexMap<ProblemId, IndexSet<OutcomeId>>,

    /// outcome -> problems blocking it, in problem order
    outcome_problems: HashMap<OutcomeId, IndexSet<ProblemId>>,

    /// project -> resolved addressed problems
    project_problems: IndexMap<ProjectId, IndexSet<ProblemId>>,

    /// problem -> projects addressing it, in project order
    problem_projects: HashMap<ProblemId, IndexSet<ProjectId>>,

    /// Worldview ids in source order
    worldviews: IndexSet<WorldviewId>,

    dropped: DroppedReferences,
}

/// Counts of references discarded while building the index
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DroppedReferences {
    /// Grades keyed by an unknown worldview
    pub grades: usize,
    /// Problem → outcome links to unknown outcomes
    pub outcome_links: usize,
    /// Project → problem links to unknown problems
    pub problem_links: usize,
}

impl DroppedReferences {
    /// Total dropped references
    #[inline]
    #[must_use]
    pub fn total(&self) -> usize {
        self.grades + self.outcome_links + self.problem_links
    }
}

impl RelevanceIndex {
    /// Build the index from a dataset
    ///
    /// When an id appears more than once in a collection the first row wins.
    #[must_use]
    pub fn build(dataset: &Dataset) -> Self {
        let mut index = Self::default();

        for worldview in &dataset.worldviews {
            index.worldviews.insert(worldview.id.clone());
        }

        for outcome in &dataset.outcomes {
            if index.grades.contains_key(&outcome.id) {
                continue;
            }
            let mut grades = IndexMap::new();
            for (worldview, grade) in &outcome.worldview_relevance {
                if index.worldviews.contains(worldview) {
                    grades.insert(worldview.clone(), *grade);
                    index
                        .by_worldview
                        .entry(worldview.clone())
                        .or_default()
                        .push((outcome.id.clone(), *grade));
                } else {
                    index.dropped.grades += 1;
                }
            }
            index.grades.insert(outcome.id.clone(), grades);
        }

        for problem in &dataset.problems {
            if index.problem_outcomes.contains_key(&problem.id) {
                continue;
            }
            let mut resolved = IndexSet::new();
            for outcome in &problem.affected_outcomes {
                if index.grades.contains_key(outcome) {
                    resolved.insert(outcome.clone());
                    index
                        .outcome_problems
                        .entry(outcome.clone())
                        .or_default()
                        .insert(problem.id.clone());
                } else {
                    index.dropped.outcome_links += 1;
                }
            }
            index.problem_outcomes.insert(problem.id.clone(), resolved);
        }

        for project in &dataset.projects {
            if index.project_problems.contains_key(&project.id) {
                continue;
            }
            let mut resolved = IndexSet::new();
            for problem in &project.addressed_problems {
                if index.problem_outcomes.contains_key(problem) {
                    resolved.insert(problem.clone());
                    index
                        .problem_projects
                        .entry(problem.clone())
                        .or_default()
                        .insert(project.id.clone());
                } else {
                    index.dropped.problem_links += 1;
                }
            }
            index.project_problems.insert(project.id.clone(), resolved);
        }

        if index.dropped.total() > 0 {
            tracing::warn!(
                grades = index.dropped.grades,
                outcome_links = index.dropped.outcome_links,
                problem_links = index.dropped.problem_links,
                "dropped dangling references while building relevance index"
            );
        }
        tracing::debug!(
            outcomes = index.grades.len(),
            problems = index.problem_outcomes.len(),
            projects = index.project_problems.len(),
            "built relevance index"
        );

        index
    }

    /// Outcomes graded High or Medium by any of the given worldviews
    #[must_use]
    pub fn outcomes_relevant_to<'a>(
        &self,
        worldviews: impl IntoIterator<Item = &'a WorldviewId>,
    ) -> IndexSet<OutcomeId> {
        self.outcomes_relevant_to_with_threshold(worldviews, RelevanceThreshold::default())
    }

    /// Outcomes whose grade passes `threshold` for any of the given worldviews
    #[must_use]
    pub fn outcomes_relevant_to_with_threshold<'a>(
        &self,
        worldviews: impl IntoIterator<Item = &'a WorldviewId>,
        threshold: RelevanceThreshold,
    ) -> IndexSet<OutcomeId> {
        let selected: Vec<&WorldviewId> = worldviews.into_iter().collect();
        if selected.is_empty() {
            return IndexSet::new();
        }

        self.grades
            .iter()
            .filter(|(_, grades)| {
                selected.iter().any(|worldview| {
                    grades
                        .get(*worldview)
                        .is_some_and(|grade| threshold.admits(*grade))
                })
            })
            .map(|(outcome, _)| outcome.clone())
            .collect()
    }

    /// Problems blocking at least one of the given outcomes
    #[must_use]
    pub fn problems_affecting<'a>(
        &self,
        outcomes: impl IntoIterator<Item = &'a OutcomeId>,
    ) -> IndexSet<ProblemId> {
        let selected: HashSet<&OutcomeId> = outcomes.into_iter().collect();
        if selected.is_empty() {
            return IndexSet::new();
        }

        self.problem_outcomes
            .iter()
            .filter(|(_, affected)| affected.iter().any(|o| selected.contains(o)))
            .map(|(problem, _)| problem.clone())
            .collect()
    }

    /// Projects addressing at least one of the given problems
    #[must_use]
    pub fn projects_addressing<'a>(
        &self,
        problems: impl IntoIterator<Item = &'a ProblemId>,
    ) -> IndexSet<ProjectId> {
        let selected: HashSet<&ProblemId> = problems.into_iter().collect();
        if selected.is_empty() {
            return IndexSet::new();
        }

        self.project_problems
            .iter()
            .filter(|(_, addressed)| addressed.iter().any(|p| selected.contains(p)))
            .map(|(project, _)| project.clone())
            .collect()
    }

    /// Grade of one outcome for one worldview
    #[inline]
    #[must_use]
    pub fn grade(&self, worldview: &WorldviewId, outcome: &OutcomeId) -> Option<RelevanceGrade> {
        self.grades.get(outcome)?.get(worldview).copied()
    }

    /// Strongest grade of an outcome across the given worldviews
    #[must_use]
    pub fn best_grade<'a>(
        &self,
        outcome: &OutcomeId,
        worldviews: impl IntoIterator<Item = &'a WorldviewId>,
    ) -> Option<RelevanceGrade> {
        let grades = self.grades.get(outcome)?;
        worldviews
            .into_iter()
            .filter_map(|worldview| grades.get(worldview).copied())
            .max()
    }

    /// Every known grade of an outcome, keyed by worldview
    #[must_use]
    pub fn worldviews_for(&self, outcome: &OutcomeId) -> Option<&IndexMap<WorldviewId, RelevanceGrade>> {
        self.grades.get(outcome)
    }

    /// Every graded outcome of a worldview, in outcome order
    #[must_use]
    pub fn outcomes_for_worldview(&self, worldview: &WorldviewId) -> &[(OutcomeId, RelevanceGrade)] {
        self.by_worldview
            .get(worldview)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Resolved outcomes a problem blocks
    #[must_use]
    pub fn outcomes_affected_by(&self, problem: &ProblemId) -> Option<&IndexSet<OutcomeId>> {
        self.problem_outcomes.get(problem)
    }

    /// Problems blocking an outcome
    #[must_use]
    pub fn problems_for_outcome(&self, outcome: &OutcomeId) -> Option<&IndexSet<ProblemId>> {
        self.outcome_problems.get(outcome)
    }

    /// Resolved problems a project addresses
    #[must_use]
    pub fn problems_addressed_by(&self, project: &ProjectId) -> Option<&IndexSet<ProblemId>> {
        self.project_problems.get(project)
    }

    /// Projects addressing a problem
    #[must_use]
    pub fn projects_for_problem(&self, problem: &ProblemId) -> Option<&IndexSet<ProjectId>> {
        self.problem_projects.get(problem)
    }

    /// Every worldview id, in source order
    #[inline]
    #[must_use]
    pub fn all_worldviews(&self) -> &IndexSet<WorldviewId> {
        &self.worldviews
    }

    /// Every outcome id, in source order
    #[must_use]
    pub fn all_outcomes(&self) -> IndexSet<OutcomeId> {
        self.grades.keys().cloned().collect()
    }

    /// Every problem id, in source order
    #[must_use]
    pub fn all_problems(&self) -> IndexSet<ProblemId> {
        self.problem_outcomes.keys().cloned().collect()
    }

    /// Every project id, in source order
    #[must_use]
    pub fn all_projects(&self) -> IndexSet<ProjectId> {
        self.project_problems.keys().cloned().collect()
    }

    /// References discarded during build
    #[inline]
    #[must_use]
    pub fn dropped(&self) -> DroppedReferences {
        self.dropped
    }
}
