//! Include/exclude filters over genres and tags.

use crate::context::RecommendContext;
use crate::traits::Filter;
use anyhow::Result;
use catalog::{CatalogIndex, CatalogItem, MediaId};
use std::sync::Arc;

/// Applies the request's genre and tag include/exclude lists.
///
/// Include lists are conjunctive (every listed value must be present);
/// exclude lists reject on any hit.
pub struct GenreTagFilter {
    catalog: Arc<CatalogIndex>,
}

impl GenreTagFilter {
    pub fn new(catalog: Arc<CatalogIndex>) -> Self {
        Self { catalog }
    }

    fn matches(item: &CatalogItem, ctx: &RecommendContext) -> bool {
        let filters = &ctx.filters;

        if !filters.include_genres.iter().all(|g| item.has_genre(g)) {
            return false;
        }
        if filters.exclude_genres.iter().any(|g| item.has_genre(g)) {
            return false;
        }
        if !filters.include_tags.iter().all(|&t| item.has_tag(t)) {
            return false;
        }
        if filters.exclude_tags.iter().any(|&t| item.has_tag(t)) {
            return false;
        }
        true
    }
}

impl Filter for GenreTagFilter {
    fn name(&self) -> &str {
        "GenreTagFilter"
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
