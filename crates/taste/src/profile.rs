//! Taste profile construction from a user's rated history.
//!
//! The profile is a signed, rarity-weighted summary of everything the user
//! has rated: liked and disliked genres/tags, plus a flat penalty bucket
//! for parts of the catalog the user has never touched. It is built once
//! per request and never mutated afterwards.

use crate::config::TasteConfig;
use catalog::{CatalogIndex, GlobalStats, MediaId, TagId};
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Per-user weighted preference vector over genres and tags.
///
/// All weights are non-negative after construction; the bucket a key sits
/// in carries the sign. A key appears in at most one of the positive and
/// negative buckets.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TasteProfile {
    /// Liked genres and their weights.
    pub genres: HashMap<String, f32>,
    /// Disliked genres (stored as positive magnitudes).
    pub negative_genres: HashMap<String, f32>,
    /// Liked tags by tag id.
    pub tags: HashMap<TagId, f32>,
    /// Disliked tags (stored as positive magnitudes).
    pub negative_tags: HashMap<TagId, f32>,
    /// Catalog genres the user has never rated.
    pub unseen_genres: HashMap<String, f32>,
    /// Well-supported catalog tags the user has never rated.
    pub unseen_tags: HashMap<TagId, f32>,
}

impl TasteProfile {
    /// Whether the profile carries any positive taste signal. When false,
    /// the pipeline falls back to the cold-start scorer.
    pub fn has_signal(&self) -> bool {
        !self.genres.is_empty() || !self.tags.is_empty()
    }
}

/// Build a taste profile from the user's completed, rated items.
///
/// ## Algorithm
/// 1. Skip neutral ratings (absent score or exactly 5)
/// 2. Accumulate `(score - 5)/5 × idf` per genre/tag, tracking exposure
/// 3. Bucket accumulated values against the thresholds; core genres
///    (high exposure share) are boosted when liked and never demoted;
///    disliked keys get a scarcity boost `1 + α/√exposure`
/// 4. Penalize unseen genres, and unseen tags with enough global support
/// 5. Soften every bucket with `ln(1 + v)`
/// 6. Demote weak non-core positives into mild negatives
///
/// Items missing from the catalog are skipped. A history without a single
/// signal-bearing rating yields the all-empty no-signal profile.
pub fn build_taste_profile(
    completed: &[MediaId],
    scores: &HashMap<MediaId, Option<u8>>,
    catalog: &CatalogIndex,
    stats: &GlobalStats,
    config: &TasteConfig,
) -> TasteProfile {
    let mut genre_net: HashMap<String, f32> = HashMap::new();
    let mut genre_exposure: HashMap<String, u32> = HashMap::new();
    let mut tag_net: HashMap<TagId, f32> = HashMap::new();
    let mut tag_exposure: HashMap<TagId, u32> = HashMap::new();
    let mut rated = 0u32;

    for &id in completed {
        let Some(item) = catalog.get(id) else {
            continue;
        };
        let Some(score) = scores.get(&id).copied().flatten() else {
            continue;
        };
        if score == 5 {
            continue;
        }
        let signed = (score as f32 - 5.0) / 5.0;
        rated += 1;

        let mut seen_genres = HashSet::new();
        for genre in &item.genres {
            if !seen_genres.insert(genre.as_str()) {
                continue;
            }
            *genre_net.entry(genre.clone()).or_insert(0.0) += signed * stats.genre_idf(genre);
            *genre_exposure.entry(genre.clone()).or_insert(0) += 1;
        }
        let mut seen_tags = HashSet::new();
        for tag in &item.tags {
            if !seen_tags.insert(tag.id) {
                continue;
            }
            *tag_net.entry(tag.id).or_insert(0.0) += signed * stats.tag_idf(tag.id);
            *tag_exposure.entry(tag.id).or_insert(0) += 1;
        }
    }

    if rated == 0 {
        return TasteProfile::default();
    }
    let rated_total = rated.max(1) as f32;

    let mut profile = TasteProfile::default();

    // Genre bucketing with the core exemption
    let mut core_genres: HashSet<String> = HashSet::new();
    for (genre, net) in genre_net {
        let exposure = genre_exposure.get(&genre).copied().unwrap_or(0);
        let is_core = exposure as f32 / rated_total >= config.core_genre_min_share;
        if is_core {
            core_genres.insert(genre.clone());
        }

        if net > config.genre_threshold {
            let mut weight = net;
            if is_core {
                weight *= config.core_genre_exposure_boost;
            }
            profile.genres.insert(genre, weight);
        } else if net < -config.genre_threshold && !is_core {
            let scarcity =
                1.0 + config.genre_scarcity_alpha / (exposure.max(1) as f32).sqrt();
            profile.negative_genres.insert(genre, -net * scarcity);
        }
    }

    // Tag bucketing, same rule without a core exemption
    for (tag, net) in tag_net {
        let exposure = tag_exposure.get(&tag).copied().unwrap_or(0);
        if net > config.tag_threshold {
            profile.tags.insert(tag, net);
        } else if net < -config.tag_threshold {
            let scarcity = 1.0 + config.tag_scarcity_alpha / (exposure.max(1) as f32).sqrt();
            profile.negative_tags.insert(tag, -net * scarcity);
        }
    }

    // Unseen passes
    for genre in stats.genre_count.keys() {
        if !genre_exposure.contains_key(genre) {
            profile
                .unseen_genres
                .insert(genre.clone(), config.unseen_genre_penalty);
        }
    }
    for (&tag, &count) in &stats.tag_count {
        if count >= config.min_global_tag_count && !tag_exposure.contains_key(&tag) {
            profile.unseen_tags.insert(tag, config.unseen_tag_penalty);
        }
    }

    // Soften every bucket to compress outliers
    for value in profile
        .genres
        .values_mut()
        .chain(profile.negative_genres.values_mut())
        .chain(profile.unseen_genres.values_mut())
    {
        *value = value.ln_1p();
    }
    for value in profile
        .tags
        .values_mut()
        .chain(profile.negative_tags.values_mut())
        .chain(profile.unseen_tags.values_mut())
    {
        *value = value.ln_1p();
    }

    // Weak non-core positives read as mild disinterest, not enthusiasm
    let weak: Vec<String> = profile
        .genres
        .iter()
        .filter(|&(genre, &weight)| {
            weight < config.positive_genre_min && !core_genres.contains(genre)
        })
        .map(|(genre, _)| genre.clone())
        .collect();
    for genre in weak {
        if let Some(weight) = profile.genres.remove(&genre) {
            *profile.negative_genres.entry(genre).or_insert(0.0) +=
                weight * config.weak_genre_negative_factor;
        }
    }

    debug!(
        "built taste profile: {} liked genres, {} disliked, {} unseen, {} liked tags",
        profile.genres.len(),
        profile.negative_genres.len(),
        profile.unseen_genres.len(),
        profile.tags.len()
    );
    profile
}
