//! Testing utilities for the pathway workspace
//!
//! Shared fixtures, snapshot text and proptest strategies.

#![allow(missing_docs)]

use pathway_model::{Dataset, Outcome, Problem, Project, RelevanceGrade, Worldview};
use proptest::collection::vec;
use proptest::prelude::*;

/// One worldview, one High outcome, one Low outcome.
pub fn grade_scenario() -> Dataset {
    Dataset::new(
        vec![Worldview::new("w1", "Community builders")],
        vec![
            Outcome::new("o1", "Affordable housing").with_grade("w1", RelevanceGrade::High),
            Outcome::new("o2", "Regional transit").with_grade("w1", RelevanceGrade::Low),
        ],
        vec![],
        vec![],
    )
}

/// A small but complete pathway graph.
///
/// - `w1` rates `o1` High, `o2` Medium, `o3` Low
/// - `w2` rates `o3` High, `o4` Medium
/// - `w3` grades nothing
/// - `p1` blocks `o1` and `o2`, `p2` blocks `o3`, `p3` blocks `o4`
/// - `p4` only references the missing outcome `o404`
/// - `p5` blocks no outcome at all
/// - `pr5` only references the missing problem `p999`
/// - `pr6` addresses no problem at all
pub fn sample_dataset() -> Dataset {
    Dataset::new(
        vec![
            Worldview::new("w1", "Ecological stewards"),
            Worldview::new("w2", "Market pragmatists"),
            Worldview::new("w3", "Faith communities"),
        ],
        vec![
            Outcome::new("o1", "Healthy watersheds")
                .with_grade("w1", RelevanceGrade::High)
                .with_grade("w2", RelevanceGrade::Low),
            Outcome::new("o2", "Regenerative farms").with_grade("w1", RelevanceGrade::Medium),
            Outcome::new("o3", "Local green jobs")
                .with_grade("w1", RelevanceGrade::Low)
                .with_grade("w2", RelevanceGrade::High),
            Outcome::new("o4", "Clean energy access").with_grade("w2", RelevanceGrade::Medium),
        ],
        vec![
            Problem::new("p1", "Agricultural runoff")
                .affecting("o1")
                .affecting("o2")
                .in_category("land"),
            Problem::new("p2", "Skills gap")
                .affecting("o3")
                .in_category("economy"),
            Problem::new("p3", "Grid bottlenecks")
                .affecting("o4")
                .in_category("energy")
                .in_category("economy"),
            Problem::new("p4", "Stale row").affecting("o404"),
            Problem::new("p5", "Missing baseline data"),
        ],
        vec![
            Project::new("pr1", "Riparian Buffers")
                .addressing("p1")
                .with_organization("River Trust")
                .with_description("Planting native strips along creeks"),
            Project::new("pr2", "Cover Crop Collective")
                .addressing("p1")
                .with_organization("Farmers Union")
                .with_organization("River Trust"),
            Project::new("pr3", "Solar Apprenticeships")
                .addressing("p2")
                .addressing("p3")
                .with_organization("Sun Works")
                .with_description("Training for WATERSHED-area installers"),
            Project::new("pr4", "Community Microgrids")
                .addressing("p3")
                .with_organization("Sun Works"),
            Project::new("pr5", "Ghost Project")
                .addressing("p999")
                .with_organization("Nobody"),
            Project::new("pr6", "Wetland Survey")
                .with_description("Volunteer bird counts"),
        ],
    )
}

/// [`sample_dataset`] as a JSON snapshot.
pub fn sample_snapshot_json() -> String {
    serde_json::to_string_pretty(&sample_dataset()).expect("fixture serializes")
}

fn arb_grade() -> impl Strategy<Value = Option<RelevanceGrade>> {
    prop_oneof![
        Just(None),
        Just(Some(RelevanceGrade::Low)),
        Just(Some(RelevanceGrade::Medium)),
        Just(Some(RelevanceGrade::High)),
    ]
}

/// Random dataset with up to 7 worldviews.
///
/// Relationship fields may reference ids one past the end of the target
/// collection, which never exist, so dangling links are always in play.
pub fn arb_dataset() -> impl Strategy<Value = Dataset> {
    (1usize..=7, 1usize..=12, 0usize..=12, 0usize..=12).prop_flat_map(
        |(worldviews, outcomes, problems, projects)| {
            let grades = vec(vec(arb_grade(), worldviews), outcomes);
            let problem_links = vec(vec(0..=outcomes, 0..=3), problems);
            let project_links = vec(vec(0..=problems, 0..=3), projects);
            (Just(worldviews), grades, problem_links, project_links).prop_map(
                |(worldviews, grades, problem_links, project_links)| {
                    build_dataset(worldviews, &grades, &problem_links, &project_links)
                },
            )
        },
    )
}

fn build_dataset(
    worldviews: usize,
    grades: &[Vec<Option<RelevanceGrade>>],
    problem_links: &[Vec<usize>],
    project_links: &[Vec<usize>],
) -> Dataset {
    let worldviews_vec = (0..worldviews)
        .map(|w| Worldview::new(format!("w{w}"), format!("Worldview {w}")))
        .collect();

    let outcomes = grades
        .iter()
        .enumerate()
        .map(|(o, row)| {
            row.iter().enumerate().fold(
                Outcome::new(format!("o{o}"), format!("Outcome {o}")),
                |outcome, (w, grade)| match grade {
                    Some(grade) => outcome.with_grade(format!("w{w}"), *grade),
                    None => outcome,
                },
            )
        })
        .collect();

    let problems = problem_links
        .iter()
        .enumerate()
        .map(|(p, links)| {
            links.iter().fold(
                Problem::new(format!("p{p}"), format!("Problem {p}")),
                |problem, o| problem.affecting(format!("o{o}")),
            )
        })
        .collect();

    let projects = project_links
        .iter()
        .enumerate()
        .map(|(r, links)| {
            links.iter().fold(
                Project::new(format!("r{r}"), format!("Project {r}")),
                |project, p| project.addressing(format!("p{p}")),
            )
        })
        .collect();

    Dataset::new(worldviews_vec, outcomes, problems, projects)
}
