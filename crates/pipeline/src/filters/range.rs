//! Season, year, episode, and average-score range filters.

use crate::context::RecommendContext;
use crate::traits::Filter;
use anyhow::Result;
use catalog::{CatalogIndex, CatalogItem, MediaId};
use std::sync::Arc;

/// Keeps candidates inside the request's numeric ranges.
///
/// Bounds are inclusive; a bound on a field the item does not carry drops
/// the item (an unknown episode count cannot satisfy an episode range).
pub struct RangeFilter {
    catalog: Arc<CatalogIndex>,
}

impl RangeFilter {
    pub fn new(catalog: Arc<CatalogIndex>) -> Self {
        Self { catalog }
    }

    fn matches(item: &CatalogItem, ctx: &RecommendContext) -> bool {
        let filters = &ctx.filters;

        if let Some(season) = filters.season {
            if item.season() != Some(season) {
                return false;
            }
        }
        if !in_range(item.start_year, filters.min_year, filters.max_year) {
            return false;
        }
        if !in_range(item.episodes, filters.min_episodes, filters.max_episodes) {
            return false;
        }
        if !in_range(
            item.average_score,
            filters.min_average_score,
            filters.max_average_score,
        ) {
            return false;
        }
        true
    }
}

fn in_range<T: PartialOrd>(value: Option<T>, min: Option<T>, max: Option<T>) -> bool {
    match (value, min, max) {
        (_, None, None) => true,
        (None, _, _) => false,
        (Some(v), min, max) => {
            min.map_or(true, |lo| v >= lo) && max.map_or(true, |hi| v <= hi)
        }
    }
}

impl Filter for RangeFilter {
    fn name(&self) -> &str {
        "RangeFilter"
    }

    fn apply(&self, candidates: Vec<MediaId>, ctx: &RecommendContext) -> Result<Vec<MediaId>> {
        Ok(candidates
            .into_iter()
            .filter(|&id| {
                self.catalog
                    .get(id)
                    .is_some_and(|item| Self::matches(item, ctx))
            })
            .collect())
    }
}
