//! All-or-nothing dataset loading
//!
//! [`DatasetLoader`] runs one fetch per call and records the outcome as a
//! [`LoadState`]. A failure is surfaced once and stays put until the caller
//! asks for a [`retry`](DatasetLoader::retry); nothing is retried
//! automatically.

use crate::error::LoadError;
use crate::source::DataSource;
use pathway_model::Dataset;
use std::sync::Arc;

/// Where a loader stands
#[derive(Debug, Clone, Default)]
pub enum LoadState {
    /// Nothing fetched yet
    #[default]
    Idle,
    /// All four collections loaded
    Ready(Arc<Dataset>),
    /// The last fetch failed
    Failed(Arc<LoadError>),
}

impl LoadState {
    /// Loaded dataset, if ready
    #[must_use]
    pub fn dataset(&self) -> Option<&Arc<Dataset>> {
        match self {
            Self::Ready(dataset) => Some(dataset),
            _ => None,
        }
    }

    /// Failure, if failed
    #[must_use]
    pub fn error(&self) -> Option<&Arc<LoadError>> {
        match self {
            Self::Failed(error) => Some(error),
            _ => None,
        }
    }

    /// Check if loaded
    #[inline]
    #[must_use]
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    /// Check if the last fetch failed
    #[inline]
    #[must_use]
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

/// Loads a dataset from one source
#[derive(Debug)]
pub struct DatasetLoader<S> {
    source: S,
    state: LoadState,
    attempts: u32,
}

impl<S: DataSource> DatasetLoader<S> {
    /// Idle loader over a source
    #[must_use]
    pub fn new(source: S) -> Self {
        Self {
            source,
            state: LoadState::Idle,
            attempts: 0,
        }
    }

    /// Current state
    #[inline]
    #[must_use]
    pub fn state(&self) -> &LoadState {
        &self.state
    }

    /// Fetches performed so far
    #[inline]
    #[must_use]
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Underlying source
    #[inline]
    #[must_use]
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Run one fetch and replace the state with its result
    pub async fn load(&mut self) -> &LoadState {
        self.attempts += 1;
        let source = self.source.describe();

        self.state = match self.fetch_dataset().await {
            Ok(dataset) => {
                let fingerprint = dataset.fingerprint().ok();
                tracing::info!(
                    %source,
                    attempt = self.attempts,
                    worldviews = dataset.worldviews.len(),
                    outcomes = dataset.outcomes.len(),
                    problems = dataset.problems.len(),
                    projects = dataset.projects.len(),
                    fingerprint = fingerprint.as_deref().unwrap_or("unavailable"),
                    "dataset loaded"
                );
                LoadState::Ready(Arc::new(dataset))
            }
            Err(error) => {
                tracing::warn!(
                    %source,
                    attempt = self.attempts,
                    retryable = error.is_retryable(),
                    %error,
                    "dataset load failed"
                );
                LoadState::Failed(Arc::new(error))
            }
        };

        &self.state
    }

    /// Fetch again after a failure
    ///
    /// Only acts from [`LoadState::Failed`]; in any other state this returns
    /// the current state without fetching.
    pub async fn retry(&mut self) -> &LoadState {
        if self.state.is_failed() {
            tracing::info!(source = %self.source.describe(), "retrying dataset load");
            self.load().await
        } else {
            &self.state
        }
    }

    async fn fetch_dataset(&self) -> Result<Dataset, LoadError> {
        let dataset = self.source.fetch().await?.into_dataset()?;

        let report = dataset.integrity_report();
        if !report.is_clean() {
            tracing::warn!(
                issues = report.len(),
                dangling = report.dangling_count(),
                "dataset has integrity issues"
            );
            for issue in &report.issues {
                tracing::debug!(%issue, "integrity issue");
            }
        }

        Ok(dataset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::RawSnapshot;
    use crate::source::StaticSource;
    use pathway_model::Collection;
    use pathway_test_utils::sample_dataset;

    #[tokio::test]
    async fn starts_idle_and_loads_once() {
        let mut loader = DatasetLoader::new(StaticSource::from_dataset(sample_dataset()));
        assert!(matches!(loader.state(), LoadState::Idle));

        let state = loader.load().await;
        assert_eq!(state.dataset().map(|d| d.projects.len()), Some(6));
        assert_eq!(loader.attempts(), 1);
    }

    #[tokio::test]
    async fn partial_snapshot_is_a_failure() {
        let mut raw = RawSnapshot::complete(sample_dataset());
        raw.worldviews = None;
        let mut loader = DatasetLoader::new(StaticSource::new(raw));

        let state = loader.load().await;
        assert!(matches!(
            state.error().map(|e| &**e),
            Some(LoadError::MissingCollection(Collection::Worldviews))
        ));
    }

    #[tokio::test]
    async fn retry_is_a_no_op_unless_failed() {
        let mut loader = DatasetLoader::new(StaticSource::from_dataset(sample_dataset()));

        loader.retry().await;
        assert_eq!(loader.attempts(), 0);

        loader.load().await;
        loader.retry().await;
        assert_eq!(loader.attempts(), 1);
        assert!(loader.state().is_ready());
    }
}
