//! Filter to remove items already on the user's list.
//!
//! This is the first filter in the pipeline: anything the user has listed
//! with an excluded status is never recommendable.

use crate::context::RecommendContext;
use crate::traits::Filter;
use anyhow::Result;
use catalog::MediaId;

/// Removes candidates contained in the request's excluded set.
pub struct AlreadyListedFilter;

impl Filter for AlreadyListedFilter {
    fn name(&self) -> &str {
        "AlreadyListedFilter"
    }

    fn apply(&self, candidates: Vec<MediaId>, ctx: &RecommendContext) -> Result<Vec<MediaId>> {
        Ok(candidates
            .into_iter()
            .filter(|id| !ctx.excluded.contains(id))
            .collect())
    }
}
