//! Property tests for relevance queries.

use pathway_index::RelevanceIndex;
use pathway_model::{OutcomeId, ProblemId, RelevanceGrade, WorldviewId};
use pathway_test_utils::{arb_dataset, grade_scenario, sample_dataset};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use proptest::sample::subsequence;

#[test]
fn high_in_low_out() {
    let index = RelevanceIndex::build(&grade_scenario());
    let relevant = index.outcomes_relevant_to([&WorldviewId::new("w1")]);

    assert_eq!(relevant.len(), 1);
    assert!(relevant.contains("o1"));
}

#[test]
fn problem_matches_on_either_outcome() {
    let index = RelevanceIndex::build(&sample_dataset());

    let only_o2 = index.problems_affecting([&OutcomeId::new("o2")]);
    assert!(only_o2.contains("p1"));

    let only_o1 = index.problems_affecting([&OutcomeId::new("o1")]);
    assert!(only_o1.contains("p1"));
}

#[test]
fn orphaned_problem_is_never_reachable() {
    let index = RelevanceIndex::build(&sample_dataset());
    let every_outcome: Vec<OutcomeId> = ["o1", "o2", "o3", "o4", "o404"]
        .into_iter()
        .map(OutcomeId::from)
        .collect();

    let problems = index.problems_affecting(&every_outcome);
    assert!(!problems.contains("p4"));
    assert_eq!(problems.len(), 3);
}

proptest! {
    #[test]
    fn prop_widening_worldviews_never_shrinks_outcomes(
        (dataset, picks) in arb_dataset().prop_flat_map(|d| {
            let ids: Vec<usize> = (0..d.worldviews.len()).collect();
            let len = ids.len();
            (Just(d), subsequence(ids, 0..=len))
        }),
        split in 0usize..=7,
    ) {
        let index = RelevanceIndex::build(&dataset);
        let all: Vec<WorldviewId> = picks.iter().map(|w| WorldviewId::new(format!("w{w}"))).collect();
        let subset = &all[..split.min(all.len())];

        let narrow = index.outcomes_relevant_to(subset);
        let wide = index.outcomes_relevant_to(&all);

        prop_assert!(narrow.is_subset(&wide));
    }

    #[test]
    fn prop_only_high_or_medium_qualifies(dataset in arb_dataset()) {
        let index = RelevanceIndex::build(&dataset);
        let worldviews: Vec<WorldviewId> = dataset.worldviews.iter().map(|w| w.id.clone()).collect();

        let relevant = index.outcomes_relevant_to(&worldviews);

        for outcome in &dataset.outcomes {
            let best = outcome.worldview_relevance.values().copied().max();
            let qualifies = matches!(best, Some(RelevanceGrade::High | RelevanceGrade::Medium));
            prop_assert_eq!(relevant.contains(&outcome.id), qualifies);
        }
    }

    #[test]
    fn prop_dangling_links_never_surface(dataset in arb_dataset()) {
        let index = RelevanceIndex::build(&dataset);
        let ghost_outcome = OutcomeId::new(format!("o{}", dataset.outcomes.len()));
        let ghost_problem = ProblemId::new(format!("p{}", dataset.problems.len()));

        prop_assert!(index.problems_affecting([&ghost_outcome]).is_empty());
        prop_assert!(index.projects_addressing([&ghost_problem]).is_empty());
    }

    #[test]
    fn prop_forward_and_reverse_agree(dataset in arb_dataset()) {
        let index = RelevanceIndex::build(&dataset);

        for outcome in index.all_outcomes() {
            let forward = index.problems_affecting([&outcome]);
            let reverse = index.problems_for_outcome(&outcome).cloned().unwrap_or_default();
            prop_assert_eq!(forward, reverse);
        }
    }
}
