//! Memoised pathway views using moka
//!
//! A view is a pure function of the dataset, the selection and the attribute
//! filter. The dataset is fixed for the life of an engine, so the cache is
//! keyed by selection and filter alone.

use crate::filter::ProjectFilter;
use crate::selection::SelectionState;
use crate::view::PathwayView;
use moka::sync::Cache;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Statistics for cache performance monitoring
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Number of entries in cache
    pub entry_count: u64,
    /// Lookups answered from the cache
    pub hits: u64,
    /// Lookups that derived a fresh view
    pub misses: u64,
}

type ViewKey = (SelectionState, ProjectFilter);

/// Bounded cache of derived views
#[derive(Debug, Clone)]
pub struct ViewCache {
    inner: Cache<ViewKey, Arc<PathwayView>>,
    counters: Arc<Counters>,
}

#[derive(Debug, Default)]
struct Counters {
    hits: AtomicU64,
    misses: AtomicU64,
}

impl ViewCache {
    /// Create new cache with max capacity
    #[inline]
    #[must_use]
    pub fn new(max_capacity: u64) -> Self {
        Self {
            inner: Cache::new(max_capacity),
            counters: Arc::default(),
        }
    }

    /// Get or derive the view for a selection and filter
    pub fn get_or_derive<F>(
        &self,
        selection: &SelectionState,
        filter: &ProjectFilter,
        derive: F,
    ) -> Arc<PathwayView>
    where
        F: FnOnce() -> PathwayView,
    {
        let key = (selection.clone(), filter.clone());
        if let Some(view) = self.inner.get(&key) {
            self.counters.hits.fetch_add(1, Ordering::Relaxed);
            return view;
        }

        self.counters.misses.fetch_add(1, Ordering::Relaxed);
        self.inner.get_with(key, || Arc::new(derive()))
    }

    /// Invalidate all entries
    #[inline]
    pub fn invalidate_all(&self) {
        self.inner.invalidate_all();
    }

    /// Get approximate entry count
    #[inline]
    #[must_use]
    pub fn entry_count(&self) -> u64 {
        self.inner.entry_count()
    }

    /// Get cache statistics
    #[must_use]
    pub fn stats(&self) -> CacheStats {
        self.inner.run_pending_tasks();
        CacheStats {
            entry_count: self.inner.entry_count(),
            hits: self.counters.hits.load(Ordering::Relaxed),
            misses: self.counters.misses.load(Ordering::Relaxed),
        }
    }
}

impl Default for ViewCache {
    /// Create cache with default capacity (256 views)
    fn default() -> Self {
        Self::new(256)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::CascadePolicy;
    use std::sync::atomic::AtomicUsize;

    #[test]
    fn second_lookup_is_a_hit() {
        let cache = ViewCache::new(16);
        let selection = SelectionState::new().toggle_worldview("w1", CascadePolicy::Retain);
        let filter = ProjectFilter::new();
        let calls = AtomicUsize::new(0);

        let first = cache.get_or_derive(&selection, &filter, || {
            calls.fetch_add(1, Ordering::SeqCst);
            PathwayView::default()
        });
        let second = cache.get_or_derive(&selection, &filter, || {
            calls.fetch_add(1, Ordering::SeqCst);
            PathwayView::default()
        });

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.entry_count, 1);
    }

    #[test]
    fn filter_is_part_of_the_key() {
        let cache = ViewCache::default();
        let selection = SelectionState::new();

        cache.get_or_derive(&selection, &ProjectFilter::new(), PathwayView::default);
        cache.get_or_derive(
            &selection,
            &ProjectFilter::new().with_text("solar"),
            PathwayView::default,
        );

        assert_eq!(cache.stats().misses, 2);
    }

    #[test]
    fn invalidation_empties_cache() {
        let cache = ViewCache::new(16);
        cache.get_or_derive(&SelectionState::new(), &ProjectFilter::new(), PathwayView::default);

        cache.invalidate_all();
        assert_eq!(cache.stats().entry_count, 0);
    }
}
