//! Pure derivation functions
//!
//! Each stage's candidate pool comes from the selection at the previous
//! stage, or, when that stage has nothing selected, from the previous
//! stage's own candidate pool. While nothing upstream is selected at all a
//! stage offers its whole collection, so unlinked problems and projects stay
//! reachable as cold entry points.

use crate::filter::ProjectFilter;
use crate::selection::SelectionState;
use crate::view::{OutcomeCandidate, PathwayView};
use indexmap::IndexSet;
use pathway_index::RelevanceIndex;
use pathway_model::{Dataset, OutcomeId, ProblemId, ProjectId, RelevanceThreshold};

/// Outcomes offered for the current worldview selection
///
/// With no worldview selected the whole outcome collection is offered.
#[must_use]
pub fn outcome_candidates(
    index: &RelevanceIndex,
    selection: &SelectionState,
    threshold: RelevanceThreshold,
) -> IndexSet<OutcomeId> {
    if selection.worldviews().is_empty() {
        index.all_outcomes()
    } else {
        index.outcomes_relevant_to_with_threshold(selection.worldviews(), threshold)
    }
}

/// Problems offered for the current outcome selection
///
/// With neither worldviews nor outcomes selected the whole problem
/// collection is offered.
#[must_use]
pub fn problem_candidates(
    index: &RelevanceIndex,
    selection: &SelectionState,
    outcome_pool: &IndexSet<OutcomeId>,
) -> IndexSet<ProblemId> {
    if !selection.outcomes().is_empty() {
        index.problems_affecting(selection.outcomes())
    } else if selection.worldviews().is_empty() {
        index.all_problems()
    } else {
        index.problems_affecting(outcome_pool)
    }
}

/// Projects reached by the current problem selection
///
/// With an empty selection the whole project collection is offered.
#[must_use]
pub fn project_candidates(
    index: &RelevanceIndex,
    selection: &SelectionState,
    problem_pool: &IndexSet<ProblemId>,
) -> IndexSet<ProjectId> {
    if !selection.problems().is_empty() {
        index.projects_addressing(selection.problems())
    } else if selection.is_empty() {
        index.all_projects()
    } else {
        index.projects_addressing(problem_pool)
    }
}

/// Full view for one selection and attribute filter
///
/// The final project list is the intersection of the pathway projects and
/// the projects passing `filter`, in source order. With an empty selection
/// the pathway projects are the whole collection, so the result equals the
/// filter's own matches.
#[must_use]
pub fn derive_view(
    dataset: &Dataset,
    index: &RelevanceIndex,
    selection: &SelectionState,
    filter: &ProjectFilter,
    threshold: RelevanceThreshold,
) -> PathwayView {
    let outcome_pool = outcome_candidates(index, selection, threshold);
    let problems = problem_candidates(index, selection, &outcome_pool);
    let pathway_projects = project_candidates(index, selection, &problems);

    let projects = if filter.is_active() {
        let matching = filter.apply(dataset, index);
        pathway_projects.intersection(&matching).cloned().collect()
    } else {
        pathway_projects.clone()
    };

    let outcomes = outcome_pool
        .into_iter()
        .map(|id| {
            let grade = index.best_grade(&id, selection.worldviews());
            OutcomeCandidate { id, grade }
        })
        .collect();

    let view = PathwayView {
        worldviews: index.all_worldviews().clone(),
        outcomes,
        problems,
        pathway_projects,
        projects,
    };

    tracing::debug!(
        stage = ?selection.stage(),
        counts = ?view.counts(),
        filtered = filter.is_active(),
        "derived pathway view"
    );

    view
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::CascadePolicy;
    use pathway_model::RelevanceGrade;
    use pathway_test_utils::sample_dataset;
    use pretty_assertions::assert_eq;

    fn names<T: AsRef<str>>(set: &IndexSet<T>) -> Vec<&str> {
        set.iter().map(|id| id.as_ref()).collect()
    }

    fn view(selection: &SelectionState, filter: &ProjectFilter) -> PathwayView {
        let dataset = sample_dataset();
        let index = RelevanceIndex::build(&dataset);
        derive_view(&dataset, &index, selection, filter, RelevanceThreshold::default())
    }

    #[test]
    fn empty_selection_offers_every_collection() {
        let view = view(&SelectionState::new(), &ProjectFilter::new());

        assert_eq!(names(&view.outcome_ids()), vec!["o1", "o2", "o3", "o4"]);
        assert_eq!(names(&view.problems), vec!["p1", "p2", "p3", "p4", "p5"]);
        assert_eq!(
            names(&view.projects),
            vec!["pr1", "pr2", "pr3", "pr4", "pr5", "pr6"]
        );
        assert!(view.outcomes.iter().all(|c| c.grade.is_none()));
    }

    #[test]
    fn unlinked_rows_leave_once_a_worldview_is_selected() {
        let selection = SelectionState::new().with_worldviews(["w2"]);
        let view = view(&selection, &ProjectFilter::new());

        assert_eq!(names(&view.problems), vec!["p2", "p3"]);
        assert!(!view.projects.contains("pr6"));
        assert!(!view.projects.contains("pr5"));
    }

    #[test]
    fn empty_selection_with_filter_matches_filter_alone() {
        let dataset = sample_dataset();
        let index = RelevanceIndex::build(&dataset);
        let filter = ProjectFilter::new().with_text("survey");
        let view = derive_view(
            &dataset,
            &index,
            &SelectionState::new(),
            &filter,
            RelevanceThreshold::default(),
        );

        assert_eq!(names(&view.projects), vec!["pr6"]);
        assert_eq!(view.projects, filter.apply(&dataset, &index));
    }

    #[test]
    fn worldview_narrows_every_stage() {
        let selection = SelectionState::new().toggle_worldview("w1", CascadePolicy::Retain);
        let view = view(&selection, &ProjectFilter::new());

        assert_eq!(names(&view.outcome_ids()), vec!["o1", "o2"]);
        assert_eq!(view.outcomes[0].grade, Some(RelevanceGrade::High));
        assert_eq!(view.outcomes[1].grade, Some(RelevanceGrade::Medium));
        assert_eq!(names(&view.problems), vec!["p1"]);
        assert_eq!(names(&view.projects), vec!["pr1", "pr2"]);
    }

    #[test]
    fn outcome_selection_overrides_pool() {
        let selection = SelectionState::new()
            .with_worldviews(["w1"])
            .with_outcomes(["o4"]);
        let view = view(&selection, &ProjectFilter::new());

        assert_eq!(names(&view.outcome_ids()), vec!["o1", "o2"]);
        assert_eq!(names(&view.problems), vec!["p3"]);
        assert_eq!(names(&view.projects), vec!["pr3", "pr4"]);
    }

    #[test]
    fn unknown_selection_yields_empty_downstream() {
        let selection = SelectionState::new().with_outcomes(["nope"]);
        let view = view(&selection, &ProjectFilter::new());

        assert_eq!(view.outcomes.len(), 4);
        assert!(view.problems.is_empty());
        assert!(view.projects.is_empty());
    }

    #[test]
    fn filter_intersects_pathway() {
        let selection = SelectionState::new().with_problems(["p2", "p1"]);
        let filter = ProjectFilter::new().with_organization("Sun Works");
        let view = view(&selection, &filter);

        assert_eq!(names(&view.pathway_projects), vec!["pr1", "pr2", "pr3"]);
        assert_eq!(names(&view.projects), vec!["pr3"]);
    }

    #[test]
    fn threshold_is_honoured() {
        let dataset = sample_dataset();
        let index = RelevanceIndex::build(&dataset);
        let selection = SelectionState::new().with_worldviews(["w1"]);

        let low = outcome_candidates(&index, &selection, RelevanceThreshold::Low);
        assert_eq!(names(&low), vec!["o1", "o2", "o3"]);

        let high = outcome_candidates(&index, &selection, RelevanceThreshold::High);
        assert_eq!(names(&high), vec!["o1"]);
    }
}
