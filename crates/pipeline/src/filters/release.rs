//! Filter on release state.
//!
//! An item without a start date cannot be placed on a timeline and is
//! dropped unconditionally; unreleased items are dropped unless the request
//! asks for them.

use crate::context::RecommendContext;
use crate::traits::Filter;
use anyhow::Result;
use catalog::{CatalogIndex, MediaId, MediaStatus};
use std::sync::Arc;

/// Keeps dated, released candidates.
pub struct ReleaseFilter {
    catalog: Arc<CatalogIndex>,
}

impl ReleaseFilter {
    pub fn new(catalog: Arc<CatalogIndex>) -> Self {
        Self { catalog }
    }
}

impl Filter for ReleaseFilter {
    fn name(&self) -> &str {
        "ReleaseFilter"
    }

    fn apply(&self, candidates: Vec<MediaId>, ctx: &RecommendContext) -> Result<Vec<MediaId>> {
        Ok(candidates
            .into_iter()
            .filter(|&id| {
                let Some(item) = self.catalog.get(id) else {
                    return false;
                };
                if !item.has_start_date() {
                    return false;
                }
                item.status != MediaStatus::NotYetReleased || ctx.filters.include_unreleased
            })
            .collect())
    }
}
