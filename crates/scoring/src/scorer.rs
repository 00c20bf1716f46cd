//! Scoring a candidate item against a taste profile.
//!
//! Deterministic by construction: genres and tags are iterated in their
//! stored order on the item, and the whole computation is a fixed sequence
//! of float operations over the profile maps. Identical item, profile, and
//! configuration always reproduce the same bits.

use crate::config::{Normalization, ScoringConfig};
use catalog::CatalogItem;
use taste::TasteProfile;

/// Result of scoring one candidate against a profile.
///
/// Matches are reported even when the score is forced to zero, so callers
/// can explain why an item was rejected.
#[derive(Debug, Clone, Default)]
pub struct ScoreResult {
    pub score: f32,
    pub matched_genres: Vec<String>,
    pub matched_tags: Vec<String>,
}

/// Score `item` against `profile`.
///
/// ## Algorithm
/// 1. Sum the weights of matched genres and (capped) matched tags
/// 2. Zero out below the minimum match count
/// 3. Normalize by the match count, then apply the progressive match-count
///    multiplier
/// 4. Subtract ambivalence penalties for matches that also sit in a
///    negative bucket
/// 5. Penalize single-tag-only and one-sided matches
/// 6. Apply the logarithmic breadth bonus and the multi-genre bonus
/// 7. Gate and scale by the community average score
pub fn score_item(item: &CatalogItem, profile: &TasteProfile, config: &ScoringConfig) -> ScoreResult {
    let mut raw = 0.0f32;
    let mut matched_genres: Vec<String> = Vec::new();
    let mut matched_tags: Vec<String> = Vec::new();
    let mut matched_tag_ids = Vec::new();

    for genre in &item.genres {
        if let Some(&weight) = profile.genres.get(genre) {
            raw += weight * config.genre_weight;
            matched_genres.push(genre.clone());
        }
    }
    for tag in &item.tags {
        if let Some(&weight) = profile.tags.get(&tag.id) {
            raw += weight.min(config.max_single_tag_contribution) * config.tag_weight;
            matched_tag_ids.push(tag.id);
            matched_tags.push(tag.name.clone());
        }
    }

    let match_count = matched_genres.len() + matched_tags.len();
    if match_count == 0 || match_count < config.min_match_count {
        return ScoreResult {
            score: 0.0,
            matched_genres,
            matched_tags,
        };
    }

    let mut score = match config.normalization {
        Normalization::Sqrt => raw / (match_count.max(1) as f32).sqrt(),
        Normalization::Linear => raw / match_count.max(1) as f32,
    };

    score *= config
        .match_count_penalties
        .get(&match_count)
        .copied()
        .unwrap_or(1.0);

    // Ambivalent signals reduce confidence even on a positive match
    for genre in &matched_genres {
        if let Some(&negative) = profile.negative_genres.get(genre) {
            score -= negative * config.negative_genre_penalty;
        }
    }
    for tag_id in &matched_tag_ids {
        if let Some(&negative) = profile.negative_tags.get(tag_id) {
            score -= negative * config.negative_tag_penalty;
        }
    }

    if matched_genres.is_empty() && matched_tags.len() == 1 {
        score *= config.single_tag_penalty;
    } else if matched_genres.is_empty() || matched_tags.is_empty() {
        score *= config.partial_signal_penalty;
    }

    score *= (1.0 + match_count as f32).log2();

    if matched_genres.len() >= 2 {
        score *= config.multi_genre_bonus;
    }

    if config.use_average_score {
        if let Some(average) = item.average_score {
            if average < config.min_average_score {
                return ScoreResult {
                    score: 0.0,
                    matched_genres,
                    matched_tags,
                };
            }
            let quality = (average as f32 / config.average_score_baseline).clamp(
                config.quality_min_multiplier,
                config.quality_max_multiplier,
            );
            score *= quality;
        }
        // Missing average score data is not evidence of low quality:
        // neither gated nor scaled.
    }

    ScoreResult {
        score: score.max(0.0),
        matched_genres,
        matched_tags,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::{MediaTag, TagId};

    fn tag(id: TagId, name: &str) -> MediaTag {
        MediaTag {
            id,
            name: name.to_string(),
            rank: Some(50),
        }
    }

    fn item(genres: &[&str], tags: &[(TagId, &str)], average_score: Option<u8>) -> CatalogItem {
        CatalogItem {
            id: 1,
            genres: genres.iter().map(|g| g.to_string()).collect(),
            tags: tags.iter().map(|&(id, name)| tag(id, name)).collect(),
            average_score,
            ..Default::default()
        }
    }

    fn profile(genres: &[(&str, f32)], tags: &[(TagId, f32)]) -> TasteProfile {
        TasteProfile {
            genres: genres.iter().map(|&(g, w)| (g.to_string(), w)).collect(),
            tags: tags.iter().copied().collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_no_match_scores_zero() {
        let result = score_item(
            &item(&["Action"], &[], Some(80)),
            &profile(&[("Comedy", 0.5)], &[]),
            &ScoringConfig::default(),
        );

        assert_eq!(result.score, 0.0);
        assert!(result.matched_genres.is_empty());
    }

    #[test]
    fn test_matches_reported_when_below_min_count() {
        let config = ScoringConfig {
            min_match_count: 3,
            ..Default::default()
        };
        let result = score_item(
            &item(&["Action"], &[(10, "Shounen")], Some(80)),
            &profile(&[("Action", 0.5)], &[(10, 0.3)]),
            &config,
        );

        assert_eq!(result.score, 0.0);
        assert_eq!(result.matched_genres, vec!["Action"]);
        assert_eq!(result.matched_tags, vec!["Shounen"]);
    }

    #[test]
    fn test_genre_and_tag_match_scores_positive() {
        let result = score_item(
            &item(&["Action"], &[(10, "Shounen")], Some(80)),
            &profile(&[("Action", 0.5)], &[(10, 0.3)]),
            &ScoringConfig::default(),
        );

        assert!(result.score > 0.0);
        assert_eq!(result.matched_genres, vec!["Action"]);
        assert_eq!(result.matched_tags, vec!["Shounen"]);
    }

    #[test]
    fn test_raw_total_monotone_in_genre_weight() {
        // Increasing a matched genre's taste weight never lowers the result
        let config = ScoringConfig::default();
        let candidate = item(&["Action"], &[(10, "Shounen")], Some(80));

        let low = score_item(&candidate, &profile(&[("Action", 0.3)], &[(10, 0.3)]), &config);
        let high = score_item(&candidate, &profile(&[("Action", 0.9)], &[(10, 0.3)]), &config);

        assert!(high.score >= low.score);
    }

    #[test]
    fn test_tag_contribution_capped() {
        let config = ScoringConfig::default();
        let candidate = item(&[], &[(10, "Shounen"), (11, "Mecha")], Some(80));

        let at_cap = score_item(
            &candidate,
            &profile(&[], &[(10, 1.5), (11, 0.3)]),
            &config,
        );
        let above_cap = score_item(
            &candidate,
            &profile(&[], &[(10, 9.0), (11, 0.3)]),
            &config,
        );

        assert!((at_cap.score - above_cap.score).abs() < 1e-6);
    }

    #[test]
    fn test_single_tag_penalty_harsher_than_partial() {
        let config = ScoringConfig::default();

        // One tag, no genres: harsh single-signal penalty
        let single_tag = score_item(
            &item(&[], &[(10, "Shounen")], Some(75)),
            &profile(&[], &[(10, 0.5)]),
            &config,
        );
        // Two tags, no genres: softer incomplete-signal penalty
        let two_tags = score_item(
            &item(&[], &[(10, "Shounen"), (11, "Mecha")], Some(75)),
            &profile(&[], &[(10, 0.5), (11, 0.5)]),
            &config,
        );

        assert!(single_tag.score < two_tags.score);
    }

    #[test]
    fn test_negative_bucket_subtracts() {
        let config = ScoringConfig::default();
        let candidate = item(&["Action", "Drama"], &[(10, "Shounen")], Some(75));
        let clean = profile(&[("Action", 0.5), ("Drama", 0.5)], &[(10, 0.4)]);

        let mut ambivalent = clean.clone();
        ambivalent
            .negative_genres
            .insert("Drama".to_string(), 0.4);

        let clean_score = score_item(&candidate, &clean, &config).score;
        let ambivalent_score = score_item(&candidate, &ambivalent, &config).score;
        assert!(ambivalent_score < clean_score);
    }

    #[test]
    fn test_quality_floor_forces_zero() {
        let config = ScoringConfig::default();
        let result = score_item(
            &item(&["Action"], &[(10, "Shounen")], Some(40)),
            &profile(&[("Action", 0.5)], &[(10, 0.3)]),
            &config,
        );

        assert_eq!(result.score, 0.0);
        // Matches still reported
        assert_eq!(result.matched_genres, vec!["Action"]);
    }

    #[test]
    fn test_missing_average_score_not_gated() {
        let result = score_item(
            &item(&["Action"], &[(10, "Shounen")], None),
            &profile(&[("Action", 0.5)], &[(10, 0.3)]),
            &ScoringConfig::default(),
        );

        assert!(result.score > 0.0);
    }

    #[test]
    fn test_deterministic() {
        let candidate = item(
            &["Action", "Drama"],
            &[(10, "Shounen"), (11, "Mecha")],
            Some(82),
        );
        let taste = profile(
            &[("Action", 0.7), ("Drama", 0.2)],
            &[(10, 0.4), (11, 0.9)],
        );
        let config = ScoringConfig::default();

        let first = score_item(&candidate, &taste, &config);
        let second = score_item(&candidate, &taste, &config);
        assert_eq!(first.score.to_bits(), second.score.to_bits());
        assert_eq!(first.matched_genres, second.matched_genres);
    }

    #[test]
    fn test_linear_normalization() {
        let config = ScoringConfig {
            normalization: Normalization::Linear,
            ..Default::default()
        };
        let candidate = item(&["Action"], &[(10, "Shounen")], Some(75));
        let taste = profile(&[("Action", 0.5)], &[(10, 0.5)]);

        let sqrt_score = score_item(&candidate, &taste, &ScoringConfig::default()).score;
        let linear_score = score_item(&candidate, &taste, &config).score;

        // Linear divides by the full count, sqrt only by its root
        assert!(linear_score < sqrt_score);
    }

    // Scoring accepts any input shape without panicking
    #[test]
    fn test_empty_item_and_empty_profile() {
        let result = score_item(
            &CatalogItem::default(),
            &TasteProfile::default(),
            &ScoringConfig::default(),
        );
        assert_eq!(result.score, 0.0);
    }
}
