//! Pathway engine
//!
//! Owns one immutable dataset, its relevance index and the configuration,
//! and answers view queries for any selection and filter.

use crate::cache::{CacheStats, ViewCache};
use crate::config::EngineConfig;
use crate::derive;
use crate::filter::{Facets, ProjectFilter};
use crate::selection::{CascadePolicy, SelectionState};
use crate::view::PathwayView;
use indexmap::IndexSet;
use pathway_index::RelevanceIndex;
use pathway_model::{Dataset, OutcomeId, ProblemId, ProjectId};
use std::sync::Arc;

/// Read-only query engine over a loaded dataset
#[derive(Debug)]
pub struct PathwayEngine {
    dataset: Arc<Dataset>,
    index: RelevanceIndex,
    config: EngineConfig,
    cache: Option<ViewCache>,
}

impl PathwayEngine {
    /// Build the index and engine for a dataset
    #[must_use]
    pub fn new(dataset: Arc<Dataset>, config: EngineConfig) -> Self {
        let index = RelevanceIndex::build(&dataset);
        let cache = (config.cache_capacity > 0).then(|| ViewCache::new(config.cache_capacity));

        tracing::info!(
            worldviews = dataset.worldviews.len(),
            outcomes = dataset.outcomes.len(),
            problems = dataset.problems.len(),
            projects = dataset.projects.len(),
            dropped = index.dropped().total(),
            mode = ?config.mode,
            threshold = ?config.relevance_threshold,
            "pathway engine ready"
        );

        Self {
            dataset,
            index,
            config,
            cache,
        }
    }

    /// Engine with default configuration
    #[must_use]
    pub fn with_defaults(dataset: Arc<Dataset>) -> Self {
        Self::new(dataset, EngineConfig::default())
    }

    /// Loaded dataset
    #[inline]
    #[must_use]
    pub fn dataset(&self) -> &Arc<Dataset> {
        &self.dataset
    }

    /// Relevance index
    #[inline]
    #[must_use]
    pub fn index(&self) -> &RelevanceIndex {
        &self.index
    }

    /// Active configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Cascade policy implied by the configured mode
    #[inline]
    #[must_use]
    pub fn cascade_policy(&self) -> CascadePolicy {
        self.config.mode.into()
    }

    /// Outcome candidates for a selection
    #[must_use]
    pub fn outcome_candidates(&self, selection: &SelectionState) -> IndexSet<OutcomeId> {
        derive::outcome_candidates(&self.index, selection, self.config.relevance_threshold)
    }

    /// Problem candidates for a selection
    #[must_use]
    pub fn problem_candidates(&self, selection: &SelectionState) -> IndexSet<ProblemId> {
        let pool = self.outcome_candidates(selection);
        derive::problem_candidates(&self.index, selection, &pool)
    }

    /// Projects reached by a selection, before any attribute filter
    #[must_use]
    pub fn project_candidates(&self, selection: &SelectionState) -> IndexSet<ProjectId> {
        let pool = self.problem_candidates(selection);
        derive::project_candidates(&self.index, selection, &pool)
    }

    /// Projects passing an attribute filter, ignoring the pathway
    #[must_use]
    pub fn filtered_projects(&self, filter: &ProjectFilter) -> IndexSet<ProjectId> {
        filter.apply(&self.dataset, &self.index)
    }

    /// Full view for a selection and filter
    #[must_use]
    pub fn view(&self, selection: &SelectionState, filter: &ProjectFilter) -> Arc<PathwayView> {
        let compute = || {
            derive::derive_view(
                &self.dataset,
                &self.index,
                selection,
                filter,
                self.config.relevance_threshold,
            )
        };

        match &self.cache {
            Some(cache) => cache.get_or_derive(selection, filter, compute),
            None => Arc::new(compute()),
        }
    }

    /// Distinct filter values in the dataset
    #[must_use]
    pub fn facets(&self) -> Facets {
        ProjectFilter::facets(&self.dataset)
    }

    /// Cache statistics; `None` when caching is disabled
    #[must_use]
    pub fn cache_stats(&self) -> Option<CacheStats> {
        self.cache.as_ref().map(ViewCache::stats)
    }
}
