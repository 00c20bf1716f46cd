//! # Recommendation Orchestrator
//!
//! This module coordinates the entire recommendation pipeline:
//! 1. Split the user's history into excluded ids and profile input
//! 2. Build the taste profile against the catalog stats
//! 3. Run every candidate through the filter pipeline
//! 4. Score survivors with the taste scorer, or the cold-start scorer when
//!    the profile carries no signal
//! 5. Rank, partition by format, and cap each partition

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use rayon::prelude::*;
use serde::Serialize;
use tracing::{info, instrument};

use catalog::{
    CatalogIndex, CatalogItem, GlobalStats, HistoryEntry, MediaFormat, MediaId, WatchStatus,
};
use relations::{ChainMap, RelationIndex};
use scoring::{ScoringConfig, cold_start_score, score_item};
use taste::{TasteConfig, build_taste_profile};

use crate::context::{RecommendContext, RecommendFilters};
use crate::filter_pipeline::FilterPipeline;
use crate::filters::{
    AlreadyListedFilter, ChainFirstUnseenFilter, GenreTagFilter, RangeFilter, ReleaseFilter,
};

/// Pipeline-level knobs.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// List statuses that make an item non-recommendable.
    pub excluded_statuses: HashSet<WatchStatus>,
    /// Cap per format partition of the result.
    pub per_format_cap: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            excluded_statuses: HashSet::from([
                WatchStatus::Completed,
                WatchStatus::Current,
                WatchStatus::Planning,
                WatchStatus::Dropped,
                WatchStatus::Paused,
                WatchStatus::Repeating,
            ]),
            per_format_cap: 100,
        }
    }
}

/// Final recommendation returned to the caller.
#[derive(Debug, Clone, Serialize)]
pub struct RecommendationItem {
    pub id: MediaId,
    pub title: String,
    pub format: MediaFormat,
    pub score: f32,
    pub average_score: Option<u8>,
    pub start_year: Option<u16>,
    pub matched_genres: Vec<String>,
    pub matched_tags: Vec<String>,
}

/// Ranked, capped, format-partitioned result.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RecommendationPage {
    pub tv: Vec<RecommendationItem>,
    pub movies: Vec<RecommendationItem>,
    pub total: usize,
}

/// Main orchestrator that coordinates the recommendation pipeline.
///
/// Holds the snapshot-scoped immutable inputs (catalog, stats, chains), so
/// one instance is built per catalog refresh and shared across requests.
#[derive(Clone)]
pub struct Recommender {
    catalog: Arc<CatalogIndex>,
    stats: Arc<GlobalStats>,
    chains: Arc<ChainMap>,
    taste_config: TasteConfig,
    scoring_config: ScoringConfig,
    config: PipelineConfig,
}

impl Recommender {
    /// Create a recommender for one catalog snapshot with default
    /// configuration. Stats and chains are derived here, once.
    pub fn new(catalog: Arc<CatalogIndex>) -> Self {
        let stats = Arc::new(GlobalStats::from_catalog(&catalog));
        let known: HashSet<MediaId> = catalog.sorted_ids().into_iter().collect();
        let chains = Arc::new(RelationIndex::new(catalog.relations(), &known).chain_map());
        Self {
            catalog,
            stats,
            chains,
            taste_config: TasteConfig::default(),
            scoring_config: ScoringConfig::default(),
            config: PipelineConfig::default(),
        }
    }

    /// Assemble a recommender from already-derived snapshot artifacts.
    ///
    /// Stats and chains are per-snapshot, so callers that refresh on a
    /// cycle can derive them once and share them across recommenders.
    pub fn from_parts(
        catalog: Arc<CatalogIndex>,
        stats: Arc<GlobalStats>,
        chains: Arc<ChainMap>,
    ) -> Self {
        Self {
            catalog,
            stats,
            chains,
            taste_config: TasteConfig::default(),
            scoring_config: ScoringConfig::default(),
            config: PipelineConfig::default(),
        }
    }

    pub fn with_taste_config(mut self, config: TasteConfig) -> Self {
        self.taste_config = config;
        self
    }

    pub fn with_scoring_config(mut self, config: ScoringConfig) -> Self {
        self.scoring_config = config;
        self
    }

    pub fn with_pipeline_config(mut self, config: PipelineConfig) -> Self {
        self.config = config;
        self
    }

    /// Validate the configuration once at startup.
    pub fn validate(&self) -> Result<()> {
        self.taste_config
            .validate()
            .context("invalid taste configuration")?;
        self.scoring_config
            .validate()
            .context("invalid scoring configuration")?;
        Ok(())
    }

    pub fn stats(&self) -> &GlobalStats {
        &self.stats
    }

    pub fn chains(&self) -> &Arc<ChainMap> {
        &self.chains
    }

    /// Main entry point: produce ranked recommendations for one user.
    ///
    /// Always returns a (possibly empty) page; malformed history references
    /// are dropped along the way, never raised.
    #[instrument(skip_all, fields(history_len = history.len()))]
    pub fn recommend(
        &self,
        history: &[HistoryEntry],
        filters: &RecommendFilters,
    ) -> Result<RecommendationPage> {
        let start_time = Instant::now();

        // Split the history: exclusion set and profile input
        let excluded: HashSet<MediaId> = history
            .iter()
            .filter(|entry| self.config.excluded_statuses.contains(&entry.status))
            .map(|entry| entry.media_id)
            .collect();
        let completed: Vec<MediaId> = history
            .iter()
            .filter(|entry| entry.status.is_completed())
            .map(|entry| entry.media_id)
            .collect();
        let scores: HashMap<MediaId, Option<u8>> = history
            .iter()
            .filter(|entry| entry.status.is_completed())
            .map(|entry| (entry.media_id, entry.score))
            .collect();

        let profile = build_taste_profile(
            &completed,
            &scores,
            &self.catalog,
            &self.stats,
            &self.taste_config,
        );
        info!(
            "profile: {} liked genres, {} liked tags, signal={}",
            profile.genres.len(),
            profile.tags.len(),
            profile.has_signal()
        );

        let ctx = RecommendContext::new(excluded, filters.clone(), self.chains.clone());
        let pipeline = FilterPipeline::new()
            .add_filter(AlreadyListedFilter)
            .add_filter(ReleaseFilter::new(self.catalog.clone()))
            .add_filter(RangeFilter::new(self.catalog.clone()))
            .add_filter(GenreTagFilter::new(self.catalog.clone()))
            .add_filter(ChainFirstUnseenFilter);

        let candidates = pipeline
            .apply(self.catalog.sorted_ids(), &ctx)
            .context("filter pipeline failed")?;
        info!("{} candidates after filtering", candidates.len());

        let mut scored: Vec<RecommendationItem> = if profile.has_signal() {
            candidates
                .par_iter()
                .filter_map(|&id| {
                    let item = self.catalog.get(id)?;
                    // Hard block: anything touching a never-rated genre
                    if item
                        .genres
                        .iter()
                        .any(|genre| profile.unseen_genres.contains_key(genre))
                    {
                        return None;
                    }
                    let result = score_item(item, &profile, &self.scoring_config);
                    if result.score > 0.0 && !result.matched_tags.is_empty() {
                        Some(build_recommendation(
                            item,
                            result.score,
                            result.matched_genres,
                            result.matched_tags,
                        ))
                    } else {
                        None
                    }
                })
                .collect()
        } else {
            // No taste signal: rank by the cold-start blend instead
            candidates
                .par_iter()
                .filter_map(|&id| {
                    let item = self.catalog.get(id)?;
                    if item.genres.is_empty() && item.tags.is_empty() {
                        return None;
                    }
                    let score = cold_start_score(item, &self.stats);
                    (score > 0.0)
                        .then(|| build_recommendation(item, score, Vec::new(), Vec::new()))
                })
                .collect()
        };

        // Rank: score descending, id ascending on ties for reproducibility
        scored.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.id.cmp(&b.id))
        });

        let mut page = RecommendationPage::default();
        for item in scored {
            let bucket = if item.format.is_movie() {
                &mut page.movies
            } else {
                &mut page.tv
            };
            if bucket.len() < self.config.per_format_cap {
                bucket.push(item);
            }
        }
        page.total = page.tv.len() + page.movies.len();

        info!(
            "recommended {} items ({} tv, {} movies) in {:.2?}",
            page.total,
            page.tv.len(),
            page.movies.len(),
            start_time.elapsed()
        );
        Ok(page)
    }
}

impl Recommender {
    /// `recommend`, memoized through a caller-owned cache.
    ///
    /// The caller keys the memo with its current catalog version, so a
    /// snapshot refresh invalidates every stale entry naturally.
    pub fn recommend_cached(
        &self,
        history: &[HistoryEntry],
        filters: &RecommendFilters,
        cache: &mut crate::cache::RecommendCache,
        catalog_version: u64,
    ) -> Result<Arc<RecommendationPage>> {
        let key = crate::cache::CacheKey::new(catalog_version, history, filters);
        if let Some(page) = cache.get(&key) {
            return Ok(page);
        }
        let page = self.recommend(history, filters)?;
        Ok(cache.insert(key, page))
    }
}

fn build_recommendation(
    item: &CatalogItem,
    score: f32,
    matched_genres: Vec<String>,
    matched_tags: Vec<String>,
) -> RecommendationItem {
    RecommendationItem {
        id: item.id,
        title: item.title.clone(),
        format: item.format,
        score,
        average_score: item.average_score,
        start_year: item.start_year,
        matched_genres,
        matched_tags,
    }
}
