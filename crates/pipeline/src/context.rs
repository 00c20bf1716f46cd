//! Per-request context shared by all filters.

use catalog::{MediaId, MediaSeason, TagId};
use relations::ChainMap;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;

/// Request-supplied filter parameters.
///
/// Include lists require every listed value to be present on an item;
/// exclude lists reject an item carrying any listed value. All bounds are
/// inclusive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommendFilters {
    pub season: Option<MediaSeason>,
    pub min_year: Option<u16>,
    pub max_year: Option<u16>,
    pub min_episodes: Option<u32>,
    pub max_episodes: Option<u32>,
    pub min_average_score: Option<u8>,
    pub max_average_score: Option<u8>,
    pub include_genres: Vec<String>,
    pub exclude_genres: Vec<String>,
    pub include_tags: Vec<TagId>,
    pub exclude_tags: Vec<TagId>,
    /// Keep items that have not started releasing yet.
    pub include_unreleased: bool,
}

/// Everything a filter may consult for one request.
#[derive(Debug, Clone)]
pub struct RecommendContext {
    /// Items on the user's list with an excluded status.
    pub excluded: HashSet<MediaId>,
    pub filters: RecommendFilters,
    /// Story chains of the current snapshot.
    pub chains: Arc<ChainMap>,
}

impl RecommendContext {
    pub fn new(
        excluded: HashSet<MediaId>,
        filters: RecommendFilters,
        chains: Arc<ChainMap>,
    ) -> Self {
        Self {
            excluded,
            filters,
            chains,
        }
    }
}
