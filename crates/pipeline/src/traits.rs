//! Core traits for the filtering pipeline.
//!
//! This module defines the Filter trait that allows composable,
//! extensible filters to be applied to candidate sets.

use crate::context::RecommendContext;
use anyhow::Result;
use catalog::MediaId;

/// Core trait for filtering candidate ids.
///
/// Filters take ownership of the candidate vector and return the subset
/// that survives; `Send + Sync` lets a built pipeline be shared across
/// concurrent requests.
pub trait Filter: Send + Sync {
    /// Returns the name of this filter (for logging/debugging)
    fn name(&self) -> &str;

    /// Apply this filter to a set of candidates.
    ///
    /// # Arguments
    /// * `candidates` - The candidate ids to filter (takes ownership)
    /// * `ctx` - Request context: excluded ids, filter params, chains
    fn apply(&self, candidates: Vec<MediaId>, ctx: &RecommendContext) -> Result<Vec<MediaId>>;
}
