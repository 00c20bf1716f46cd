//! Caller-owned TTL memo for recommendation pages.
//!
//! The pipeline itself is a pure function of (catalog snapshot, history,
//! filters), so results are memoizable by that triple. The cache is plain
//! owned state handed to whoever orchestrates requests - the core keeps no
//! globals - and the owner is responsible for keying with the current
//! catalog version so a snapshot refresh invalidates naturally.

use crate::context::RecommendFilters;
use crate::recommend::RecommendationPage;
use catalog::HistoryEntry;
use std::collections::HashMap;
use std::hash::{DefaultHasher, Hash, Hasher};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Memo key over everything the pipeline output depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CacheKey(u64);

impl CacheKey {
    pub fn new(catalog_version: u64, history: &[HistoryEntry], filters: &RecommendFilters) -> Self {
        let mut hasher = DefaultHasher::new();
        catalog_version.hash(&mut hasher);
        history.hash(&mut hasher);
        filters.hash(&mut hasher);
        CacheKey(hasher.finish())
    }
}

struct CacheEntry {
    inserted_at: Instant,
    page: Arc<RecommendationPage>,
}

/// TTL cache for recommendation pages.
pub struct RecommendCache {
    ttl: Duration,
    entries: HashMap<CacheKey, CacheEntry>,
}

impl RecommendCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: HashMap::new(),
        }
    }

    /// Fetch a live entry. Expired entries read as absent (and are removed
    /// by the next `purge_expired`).
    pub fn get(&self, key: &CacheKey) -> Option<Arc<RecommendationPage>> {
        let entry = self.entries.get(key)?;
        (entry.inserted_at.elapsed() < self.ttl).then(|| entry.page.clone())
    }

    /// Store a page and return the shared handle.
    pub fn insert(&mut self, key: CacheKey, page: RecommendationPage) -> Arc<RecommendationPage> {
        let page = Arc::new(page);
        self.entries.insert(
            key,
            CacheEntry {
                inserted_at: Instant::now(),
                page: page.clone(),
            },
        );
        page
    }

    /// Drop every expired entry.
    pub fn purge_expired(&mut self) {
        let ttl = self.ttl;
        self.entries
            .retain(|_, entry| entry.inserted_at.elapsed() < ttl);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
