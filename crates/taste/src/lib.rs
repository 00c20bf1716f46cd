//! # Taste Crate
//!
//! Converts a user's rated history into a weighted taste profile over the
//! catalog's genres and tags.
//!
//! A rating's distance from the neutral midpoint (5 on the 0-10 scale)
//! becomes a signed weight; rarity (idf against the catalog-wide counts)
//! scales how much each genre/tag on the rated item moves its bucket.
//! The result splits into liked, disliked, and unseen buckets that the
//! scoring crate consumes.
//!
//! ## Example Usage
//!
//! ```ignore
//! use taste::{TasteConfig, build_taste_profile};
//!
//! let config = TasteConfig::default();
//! config.validate()?;
//!
//! let profile = build_taste_profile(&completed, &scores, &catalog, &stats, &config);
//! if !profile.has_signal() {
//!     // fall back to the cold-start scorer
//! }
//! ```

pub mod config;
pub mod profile;

pub use config::TasteConfig;
pub use profile::{TasteProfile, build_taste_profile};
