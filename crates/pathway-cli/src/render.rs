//! Plain-text output

use indexmap::IndexSet;
use pathway_engine::{Facets, PathwayView, ProjectFilter, SelectionState};
use pathway_model::{Collection, Dataset, IntegrityReport, ProjectId};

fn mark(selected: bool) -> &'static str {
    if selected {
        "[x]"
    } else {
        "[ ]"
    }
}

pub(crate) fn integrity(dataset: &Dataset, fingerprint: &str, report: &IntegrityReport) {
    println!("fingerprint {fingerprint}");
    for collection in Collection::ALL {
        println!("  {:<10} {}", collection.key(), dataset.count(collection));
    }

    if report.is_clean() {
        println!("no integrity issues");
        return;
    }

    println!(
        "{} integrity issues ({} dangling references)",
        report.len(),
        report.dangling_count()
    );
    for issue in &report.issues {
        println!("  - {issue}");
    }
}

pub(crate) fn trace(dataset: &Dataset, selection: &SelectionState, view: &PathwayView) {
    println!("stage: {:?}", selection.stage());

    println!("\nWorldviews ({})", view.worldviews.len());
    for id in &view.worldviews {
        let selected = selection.worldviews().contains(id);
        let name = dataset.worldview(id).map_or("", |w| w.name.as_str());
        println!("  {} {id}  {name}", mark(selected));
    }

    println!("\nOutcomes ({})", view.outcomes.len());
    for candidate in view.ranked_outcomes() {
        let selected = selection.outcomes().contains(&candidate.id);
        let grade = candidate.grade.map_or("", |g| g.as_str());
        let name = dataset.outcome(&candidate.id).map_or("", |o| o.name.as_str());
        println!("  {} {}  {name}  {grade}", mark(selected), candidate.id);
    }

    println!("\nProblems ({})", view.problems.len());
    for id in &view.problems {
        let selected = selection.problems().contains(id);
        let name = dataset.problem(id).map_or("", |p| p.name.as_str());
        println!("  {} {id}  {name}", mark(selected));
    }

    println!(
        "\nProjects ({} of {} on pathway)",
        view.projects.len(),
        view.pathway_projects.len()
    );
    projects(dataset, view.projects.iter());
}

pub(crate) fn search(
    dataset: &Dataset,
    filter: &ProjectFilter,
    matching: &IndexSet<ProjectId>,
    facets: &Facets,
) {
    if !filter.is_active() {
        println!("no filter set; listing every project");
    }
    println!("Projects ({})", matching.len());
    projects(dataset, matching.iter());

    let categories: Vec<&str> = facets.categories.iter().map(|c| c.as_str()).collect();
    let organizations: Vec<&str> = facets.organizations.iter().map(String::as_str).collect();
    println!("\ncategories: {}", categories.join(", "));
    println!("organizations: {}", organizations.join(", "));
}

fn projects<'a>(dataset: &Dataset, ids: impl Iterator<Item = &'a ProjectId>) {
    for id in ids {
        if let Some(project) = dataset.project(id) {
            println!("  {id}  {}  ({})", project.name, project.organizations.join(", "));
        }
    }
}
