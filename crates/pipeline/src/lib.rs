//! Recommendation pipeline: filtering, scoring, ranking.
//!
//! This crate provides:
//! - Filter trait and implementations for candidate filtering
//! - FilterPipeline for composing filters
//! - Recommender, the orchestrator from user history to ranked page
//! - RecommendCache, a caller-owned TTL memo over pipeline results
//!
//! ## Architecture
//! The pipeline processes candidates in stages:
//! 1. Filters remove non-recommendable candidates (already listed, undated,
//!    out of the requested ranges, not first-unseen in their chain)
//! 2. The taste scorer ranks survivors against the user's profile, or the
//!    cold-start scorer takes over when the profile has no signal
//! 3. Results are sorted, partitioned by format, and capped
//!
//! ## Example Usage
//! ```ignore
//! use pipeline::{Recommender, RecommendFilters};
//!
//! let recommender = Recommender::new(catalog.clone());
//! recommender.validate()?;
//!
//! let page = recommender.recommend(&history, &RecommendFilters::default())?;
//! println!("{} recommendations", page.total);
//! ```

pub mod cache;
pub mod context;
pub mod filter_pipeline;
pub mod filters;
pub mod recommend;
pub mod traits;

// Re-export main types
pub use cache::{CacheKey, RecommendCache};
pub use context::{RecommendContext, RecommendFilters};
pub use filter_pipeline::FilterPipeline;
pub use recommend::{PipelineConfig, RecommendationItem, RecommendationPage, Recommender};
pub use traits::Filter;
