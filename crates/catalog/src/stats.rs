//! Catalog-wide genre and tag frequency statistics.
//!
//! `GlobalStats` is the rarity source for the taste profile builder: a
//! genre or tag that appears on few items carries more information about a
//! user's preferences than one that appears everywhere, so accumulation is
//! weighted by inverse document frequency.

use crate::types::{CatalogIndex, TagId};
use rayon::prelude::*;
use std::collections::{HashMap, HashSet};

/// Frequency counts over one catalog snapshot.
///
/// Derived once per snapshot and read-only afterwards; safe to share behind
/// an `Arc` across concurrent requests.
#[derive(Debug, Clone, Default)]
pub struct GlobalStats {
    /// Number of items carrying each genre.
    pub genre_count: HashMap<String, u32>,
    /// Number of items carrying each tag.
    pub tag_count: HashMap<TagId, u32>,
    /// Total items in the snapshot.
    pub total_items: u32,
}

impl GlobalStats {
    /// Count genre and tag frequencies over the full snapshot.
    ///
    /// Each distinct genre/tag on an item increments its count once, even if
    /// the snapshot repeats it on the same item.
    pub fn from_catalog(catalog: &CatalogIndex) -> Self {
        let items: Vec<_> = catalog.items().collect();
        let (genre_count, tag_count) = items
            .par_iter()
            .fold(
                || (HashMap::new(), HashMap::new()),
                |(mut genres, mut tags), item| {
                    let mut seen_genres = HashSet::new();
                    for genre in &item.genres {
                        if seen_genres.insert(genre.as_str()) {
                            *genres.entry(genre.clone()).or_insert(0u32) += 1;
                        }
                    }
                    let mut seen_tags = HashSet::new();
                    for tag in &item.tags {
                        if seen_tags.insert(tag.id) {
                            *tags.entry(tag.id).or_insert(0u32) += 1;
                        }
                    }
                    (genres, tags)
                },
            )
            .reduce(
                || (HashMap::new(), HashMap::new()),
                |(mut genres, mut tags), (local_genres, local_tags)| {
                    for (genre, count) in local_genres {
                        *genres.entry(genre).or_insert(0) += count;
                    }
                    for (tag, count) in local_tags {
                        *tags.entry(tag).or_insert(0) += count;
                    }
                    (genres, tags)
                },
            );

        Self {
            genre_count,
            tag_count,
            total_items: items.len() as u32,
        }
    }

    /// Inverse document frequency of a genre. Rarer genres weigh more; a
    /// genre missing from the snapshot gets the maximum weight.
    pub fn genre_idf(&self, genre: &str) -> f32 {
        idf(self.genre_count.get(genre).copied().unwrap_or(0), self.total_items)
    }

    /// Inverse document frequency of a tag.
    pub fn tag_idf(&self, tag: TagId) -> f32 {
        idf(self.tag_count.get(&tag).copied().unwrap_or(0), self.total_items)
    }

    /// Share of the catalog carrying this genre, in [0, 1].
    pub fn genre_share(&self, genre: &str) -> f32 {
        self.genre_count.get(genre).copied().unwrap_or(0) as f32
            / self.total_items.max(1) as f32
    }

    /// Share of the catalog carrying this tag, in [0, 1].
    pub fn tag_share(&self, tag: TagId) -> f32 {
        self.tag_count.get(&tag).copied().unwrap_or(0) as f32 / self.total_items.max(1) as f32
    }
}

/// `ln((1 + n) / (1 + c))` - the add-one keeps the ratio finite for empty
/// snapshots and zero counts.
fn idf(count: u32, total: u32) -> f32 {
    ((1 + total) as f32 / (1 + count) as f32).ln()
}
