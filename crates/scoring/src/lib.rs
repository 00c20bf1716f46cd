//! # Scoring Crate
//!
//! Scores candidate items, either against a user's taste profile or - when
//! the user has no taste signal - with the cold-start blend of community
//! quality and catalog-wide genre/tag commonality.
//!
//! Both scorers are pure functions over immutable inputs: no randomness,
//! stable iteration order, identical inputs reproduce identical bits.
//!
//! ## Example Usage
//!
//! ```ignore
//! use scoring::{ScoringConfig, cold_start_score, score_item};
//!
//! let config = ScoringConfig::default();
//! config.validate()?;
//!
//! let result = if profile.has_signal() {
//!     score_item(item, &profile, &config).score
//! } else {
//!     cold_start_score(item, &stats)
//! };
//! ```

pub mod cold_start;
pub mod config;
pub mod scorer;

pub use cold_start::cold_start_score;
pub use config::{Normalization, ScoringConfig};
pub use scorer::{ScoreResult, score_item};
