//! Selection state and its transitions
//!
//! [`SelectionState`] is a plain value. Every transition consumes the current
//! state and returns the next one, so the caller always holds the state
//! explicitly and transitions can be tested without any UI harness.

use crate::config::ExplorerMode;
use crate::view::PathwayView;
use pathway_model::{OutcomeId, ProblemId, WorldviewId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// What happens downstream when a stage loses its last selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CascadePolicy {
    /// Keep downstream selections (explorer mode)
    #[default]
    Retain,
    /// Clear every downstream selection (guided pathway mode)
    Clear,
}

impl CascadePolicy {
    /// Policy from a `cascade_clear` flag
    #[inline]
    #[must_use]
    pub fn from_flag(cascade_clear: bool) -> Self {
        if cascade_clear {
            Self::Clear
        } else {
            Self::Retain
        }
    }

    /// Check if this policy clears downstream stages
    #[inline]
    #[must_use]
    pub fn clears(self) -> bool {
        matches!(self, Self::Clear)
    }
}

impl From<ExplorerMode> for CascadePolicy {
    fn from(mode: ExplorerMode) -> Self {
        match mode {
            ExplorerMode::Explorer => Self::Retain,
            ExplorerMode::Guided => Self::Clear,
        }
    }
}

/// Furthest pathway stage holding a selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SelectionStage {
    /// Nothing selected
    Empty,
    /// At least one worldview, nothing further right
    WorldviewsSelected,
    /// At least one outcome, no problem
    OutcomesSelected,
    /// At least one problem
    ProblemsSelected,
}

/// Chosen ids at each selectable stage
///
/// Stages are independent: an outcome may be selected with no worldview.
/// Ids are kept even when they match nothing in the dataset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SelectionState {
    #[serde(default)]
    worldviews: BTreeSet<WorldviewId>,
    #[serde(default)]
    outcomes: BTreeSet<OutcomeId>,
    #[serde(default)]
    problems: BTreeSet<ProblemId>,
}

impl SelectionState {
    /// Empty selection
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Selected worldviews
    #[inline]
    #[must_use]
    pub fn worldviews(&self) -> &BTreeSet<WorldviewId> {
        &self.worldviews
    }

    /// Selected outcomes
    #[inline]
    #[must_use]
    pub fn outcomes(&self) -> &BTreeSet<OutcomeId> {
        &self.outcomes
    }

    /// Selected problems
    #[inline]
    #[must_use]
    pub fn problems(&self) -> &BTreeSet<ProblemId> {
        &self.problems
    }

    /// Check if nothing is selected
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.worldviews.is_empty() && self.outcomes.is_empty() && self.problems.is_empty()
    }

    /// Furthest stage with a selection
    #[must_use]
    pub fn stage(&self) -> SelectionStage {
        if !self.problems.is_empty() {
            SelectionStage::ProblemsSelected
        } else if !self.outcomes.is_empty() {
            SelectionStage::OutcomesSelected
        } else if !self.worldviews.is_empty() {
            SelectionStage::WorldviewsSelected
        } else {
            SelectionStage::Empty
        }
    }

    /// Flip one worldview
    ///
    /// Deselecting the last worldview clears outcomes and problems under
    /// [`CascadePolicy::Clear`].
    #[must_use]
    pub fn toggle_worldview(mut self, id: impl Into<WorldviewId>, cascade: CascadePolicy) -> Self {
        let id = id.into();
        let emptied = flip(&mut self.worldviews, id.clone());
        if emptied && cascade.clears() {
            self.outcomes.clear();
            self.problems.clear();
        }
        tracing::debug!(worldview = %id, emptied, ?cascade, "toggled worldview");
        self
    }

    /// Flip one outcome
    ///
    /// Deselecting the last outcome clears problems under
    /// [`CascadePolicy::Clear`].
    #[must_use]
    pub fn toggle_outcome(mut self, id: impl Into<OutcomeId>, cascade: CascadePolicy) -> Self {
        let id = id.into();
        let emptied = flip(&mut self.outcomes, id.clone());
        if emptied && cascade.clears() {
            self.problems.clear();
        }
        tracing::debug!(outcome = %id, emptied, ?cascade, "toggled outcome");
        self
    }

    /// Flip one problem
    ///
    /// Problems are the last selectable stage, so the policy has nothing to
    /// clear; it is accepted for symmetry with the other toggles.
    #[must_use]
    pub fn toggle_problem(mut self, id: impl Into<ProblemId>, cascade: CascadePolicy) -> Self {
        let id = id.into();
        let emptied = flip(&mut self.problems, id.clone());
        tracing::debug!(problem = %id, emptied, ?cascade, "toggled problem");
        self
    }

    /// Reset every stage
    #[inline]
    #[must_use]
    pub fn clear_all(self) -> Self {
        Self::default()
    }

    /// Drop selected outcomes and problems that are not candidates in `view`
    ///
    /// Worldviews are never pruned since every worldview is always offered.
    #[must_use]
    pub fn prune_unreachable(mut self, view: &PathwayView) -> Self {
        self.outcomes.retain(|o| view.has_outcome(o));
        self.problems.retain(|p| view.problems.contains(p));
        self
    }

    /// With worldviews preselected
    #[must_use]
    pub fn with_worldviews<I, T>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<WorldviewId>,
    {
        self.worldviews.extend(ids.into_iter().map(Into::into));
        self
    }

    /// With outcomes preselected
    #[must_use]
    pub fn with_outcomes<I, T>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OutcomeId>,
    {
        self.outcomes.extend(ids.into_iter().map(Into::into));
        self
    }

    /// With problems preselected
    #[must_use]
    pub fn with_problems<I, T>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<ProblemId>,
    {
        self.problems.extend(ids.into_iter().map(Into::into));
        self
    }
}

/// Toggle membership; true when the set just became empty
fn flip<T: Ord>(set: &mut BTreeSet<T>, id: T) -> bool {
    if set.remove(&id) {
        set.is_empty()
    } else {
        set.insert(id);
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn populated() -> SelectionState {
        SelectionState::new()
            .with_worldviews(["w1"])
            .with_outcomes(["o1", "o2"])
            .with_problems(["p1"])
    }

    #[test]
    fn toggle_twice_restores_state() {
        let start = populated();
        let after = start
            .clone()
            .toggle_worldview("w2", CascadePolicy::Retain)
            .toggle_worldview("w2", CascadePolicy::Retain);
        assert_eq!(after, start);
    }

    #[test]
    fn retain_keeps_downstream_when_last_worldview_leaves() {
        let state = populated().toggle_worldview("w1", CascadePolicy::Retain);

        assert!(state.worldviews().is_empty());
        assert_eq!(state.outcomes().len(), 2);
        assert_eq!(state.problems().len(), 1);
        assert_eq!(state.stage(), SelectionStage::ProblemsSelected);
    }

    #[test]
    fn clear_drops_downstream_when_last_worldview_leaves() {
        let state = populated().toggle_worldview("w1", CascadePolicy::Clear);

        assert!(state.is_empty());
        assert_eq!(state.stage(), SelectionStage::Empty);
    }

    #[test]
    fn clear_waits_for_the_last_worldview() {
        let state = populated()
            .toggle_worldview("w2", CascadePolicy::Clear)
            .toggle_worldview("w1", CascadePolicy::Clear);

        assert_eq!(state.worldviews().len(), 1);
        assert_eq!(state.outcomes().len(), 2);
        assert_eq!(state.problems().len(), 1);
    }

    #[test]
    fn outcome_cascade_only_touches_problems() {
        let state = populated()
            .toggle_outcome("o1", CascadePolicy::Clear)
            .toggle_outcome("o2", CascadePolicy::Clear);

        assert_eq!(state.worldviews().len(), 1);
        assert!(state.outcomes().is_empty());
        assert!(state.problems().is_empty());
        assert_eq!(state.stage(), SelectionStage::WorldviewsSelected);
    }

    #[test]
    fn cold_entry_at_problems() {
        let state = SelectionState::new().toggle_problem("p3", CascadePolicy::Clear);
        assert_eq!(state.stage(), SelectionStage::ProblemsSelected);
        assert!(state.worldviews().is_empty());
    }

    #[test]
    fn unknown_ids_are_kept() {
        let state = SelectionState::new().toggle_outcome("does-not-exist", CascadePolicy::Retain);
        assert!(state.outcomes().contains("does-not-exist"));
    }

    #[test]
    fn clear_all_is_idempotent() {
        let once = populated().clear_all();
        let twice = once.clone().clear_all();
        assert_eq!(once, SelectionState::default());
        assert_eq!(once, twice);
    }

    #[test]
    fn policy_from_mode_and_flag() {
        assert_eq!(CascadePolicy::from(ExplorerMode::Guided), CascadePolicy::Clear);
        assert_eq!(CascadePolicy::from(ExplorerMode::Explorer), CascadePolicy::Retain);
        assert_eq!(CascadePolicy::from_flag(true), CascadePolicy::Clear);
        assert!(!CascadePolicy::from_flag(false).clears());
    }

    #[test]
    fn selection_round_trips_through_json() {
        let state = populated();
        let json = serde_json::to_string(&state).unwrap();
        let back: SelectionState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, state);

        let partial: SelectionState = serde_json::from_str(r#"{"outcomes": ["o9"]}"#).unwrap();
        assert_eq!(partial.stage(), SelectionStage::OutcomesSelected);
    }
}
