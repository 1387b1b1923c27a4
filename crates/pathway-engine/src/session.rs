//! Interactive session over a shared engine
//!
//! A [`Session`] pairs one user's selection and filter with a shared
//! [`PathwayEngine`]. Toggles use the engine's configured cascade policy
//! unless a policy is passed explicitly.

use crate::engine::PathwayEngine;
use crate::filter::ProjectFilter;
use crate::selection::{CascadePolicy, SelectionState};
use crate::view::PathwayView;
use pathway_model::{CategoryId, OutcomeId, ProblemId, WorldviewId};
use std::sync::Arc;

/// One user's pathway state
#[derive(Debug, Clone)]
pub struct Session {
    engine: Arc<PathwayEngine>,
    selection: SelectionState,
    filter: ProjectFilter,
}

impl Session {
    /// Fresh session with nothing selected
    #[must_use]
    pub fn new(engine: Arc<PathwayEngine>) -> Self {
        Self {
            engine,
            selection: SelectionState::new(),
            filter: ProjectFilter::new(),
        }
    }

    /// Resume with an existing selection and filter
    #[must_use]
    pub fn resume(engine: Arc<PathwayEngine>, selection: SelectionState, filter: ProjectFilter) -> Self {
        Self {
            engine,
            selection,
            filter,
        }
    }

    /// Shared engine
    #[inline]
    #[must_use]
    pub fn engine(&self) -> &Arc<PathwayEngine> {
        &self.engine
    }

    /// Current selection
    #[inline]
    #[must_use]
    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    /// Current attribute filter
    #[inline]
    #[must_use]
    pub fn filter(&self) -> &ProjectFilter {
        &self.filter
    }

    /// Flip a worldview under the configured policy
    pub fn toggle_worldview(&mut self, id: impl Into<WorldviewId>) {
        let policy = self.engine.cascade_policy();
        self.toggle_worldview_with(id, policy);
    }

    /// Flip a worldview under an explicit policy
    pub fn toggle_worldview_with(&mut self, id: impl Into<WorldviewId>, policy: CascadePolicy) {
        self.update(|s| s.toggle_worldview(id, policy));
    }

    /// Flip an outcome under the configured policy
    pub fn toggle_outcome(&mut self, id: impl Into<OutcomeId>) {
        let policy = self.engine.cascade_policy();
        self.toggle_outcome_with(id, policy);
    }

    /// Flip an outcome under an explicit policy
    pub fn toggle_outcome_with(&mut self, id: impl Into<OutcomeId>, policy: CascadePolicy) {
        self.update(|s| s.toggle_outcome(id, policy));
    }

    /// Flip a problem under the configured policy
    pub fn toggle_problem(&mut self, id: impl Into<ProblemId>) {
        let policy = self.engine.cascade_policy();
        self.toggle_problem_with(id, policy);
    }

    /// Flip a problem under an explicit policy
    pub fn toggle_problem_with(&mut self, id: impl Into<ProblemId>, policy: CascadePolicy) {
        self.update(|s| s.toggle_problem(id, policy));
    }

    /// Reset the selection; the attribute filter is kept
    pub fn clear_all(&mut self) {
        self.update(SelectionState::clear_all);
    }

    /// Set or replace the text filter
    pub fn set_text(&mut self, text: impl AsRef<str>) {
        self.update_filter(|f| f.with_text(text));
    }

    /// Set or replace the category filter
    pub fn set_category(&mut self, category: impl Into<CategoryId>) {
        self.update_filter(|f| f.with_category(category));
    }

    /// Set or replace the organization filter
    pub fn set_organization(&mut self, organization: impl AsRef<str>) {
        self.update_filter(|f| f.with_organization(organization));
    }

    /// Drop the text filter
    pub fn clear_text(&mut self) {
        self.update_filter(ProjectFilter::clear_text);
    }

    /// Drop the category filter
    pub fn clear_category(&mut self) {
        self.update_filter(ProjectFilter::clear_category);
    }

    /// Drop the organization filter
    pub fn clear_organization(&mut self) {
        self.update_filter(ProjectFilter::clear_organization);
    }

    /// Drop every attribute filter
    pub fn clear_filter(&mut self) {
        self.update_filter(ProjectFilter::clear);
    }

    /// View for the current selection and filter
    #[must_use]
    pub fn view(&self) -> Arc<PathwayView> {
        self.engine.view(&self.selection, &self.filter)
    }

    /// Deselect outcomes and problems the current view no longer offers
    ///
    /// Repeats until the selection is stable, since dropping an outcome can
    /// shrink the problem candidates in turn.
    pub fn prune_unreachable(&mut self) {
        loop {
            let view = self.view();
            let pruned = self.selection.clone().prune_unreachable(&view);
            if pruned == self.selection {
                break;
            }
            self.selection = pruned;
        }
    }

    fn update(&mut self, transition: impl FnOnce(SelectionState) -> SelectionState) {
        let current = std::mem::take(&mut self.selection);
        self.selection = transition(current);
    }

    fn update_filter(&mut self, transition: impl FnOnce(ProjectFilter) -> ProjectFilter) {
        let current = std::mem::take(&mut self.filter);
        self.filter = transition(current);
    }
}
