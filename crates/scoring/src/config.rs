//! Tunable constants of the taste scorer.

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// How the raw match total is normalized by the number of matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Normalization {
    /// Divide by `sqrt(match_count)` - the default, rewards breadth.
    Sqrt,
    /// Divide by `match_count`.
    Linear,
}

/// Configuration for [`score_item`](crate::score_item).
///
/// Defaults are the compatibility surface; every constant named by the
/// scoring design is an overridable field here.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Weight multiplier for matched genres.
    pub genre_weight: f32,
    /// Weight multiplier for matched tags.
    pub tag_weight: f32,
    /// Cap on a single tag's taste weight before it enters the total.
    pub max_single_tag_contribution: f32,
    /// Fewer matches than this score zero outright.
    pub min_match_count: usize,
    pub normalization: Normalization,
    /// Progressive multiplier keyed by exact match count; unlisted counts
    /// pass through unchanged. Must be non-decreasing.
    pub match_count_penalties: BTreeMap<usize, f32>,
    /// Subtraction rate per matched genre that also sits in the negative
    /// bucket.
    pub negative_genre_penalty: f32,
    /// Subtraction rate per matched tag that also sits in the negative
    /// bucket.
    pub negative_tag_penalty: f32,
    /// Multiplier when the only match is a single tag.
    pub single_tag_penalty: f32,
    /// Multiplier when only one of the two signal kinds matched.
    pub partial_signal_penalty: f32,
    /// Multiplier once two or more genres matched.
    pub multi_genre_bonus: f32,
    /// Whether community average scores gate and scale the result.
    pub use_average_score: bool,
    /// Items below this average score are forced to zero.
    pub min_average_score: u8,
    /// Average score treated as quality-neutral.
    pub average_score_baseline: f32,
    pub quality_min_multiplier: f32,
    pub quality_max_multiplier: f32,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            genre_weight: 2.0,
            tag_weight: 1.0,
            max_single_tag_contribution: 1.5,
            min_match_count: 1,
            normalization: Normalization::Sqrt,
            match_count_penalties: BTreeMap::from([(1, 0.15), (2, 0.45), (3, 0.8)]),
            negative_genre_penalty: 0.35,
            negative_tag_penalty: 0.25,
            single_tag_penalty: 0.2,
            partial_signal_penalty: 0.3,
            multi_genre_bonus: 1.15,
            use_average_score: true,
            min_average_score: 55,
            average_score_baseline: 75.0,
            quality_min_multiplier: 0.7,
            quality_max_multiplier: 1.15,
        }
    }
}

impl ScoringConfig {
    /// Reject configurations that would produce nonsense scores. Called
    /// once at startup, not per call.
    pub fn validate(&self) -> Result<()> {
        if self.genre_weight < 0.0 || self.tag_weight < 0.0 {
            bail!("match weights must be non-negative");
        }
        if self.max_single_tag_contribution <= 0.0 {
            bail!("max_single_tag_contribution must be positive");
        }
        let mut previous = 0.0f32;
        for (&count, &multiplier) in &self.match_count_penalties {
            if multiplier <= 0.0 {
                bail!("penalty multiplier for {} matches must be positive", count);
            }
            if multiplier < previous {
                bail!("match count penalty curve must be non-decreasing");
            }
            previous = multiplier;
        }
        if self.negative_genre_penalty < 0.0 || self.negative_tag_penalty < 0.0 {
            bail!("negative penalties must be non-negative");
        }
        if self.average_score_baseline <= 0.0 {
            bail!("average_score_baseline must be positive");
        }
        if self.quality_min_multiplier > self.quality_max_multiplier {
            bail!("quality multiplier range is inverted");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        assert!(ScoringConfig::default().validate().is_ok());
    }

    #[test]
    fn test_non_monotonic_curve_rejected() {
        let config = ScoringConfig {
            match_count_penalties: BTreeMap::from([(1, 0.8), (2, 0.45)]),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_negative_weight_rejected() {
        let config = ScoringConfig {
            genre_weight: -1.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_inverted_quality_range_rejected() {
        let config = ScoringConfig {
            quality_min_multiplier: 1.2,
            quality_max_multiplier: 0.9,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
