//! Tunable constants of the taste profile builder.

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};

/// Configuration for [`build_taste_profile`](crate::build_taste_profile).
///
/// The defaults are the compatibility surface: changing any of them changes
/// existing rankings, so overrides are per-field and explicit.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TasteConfig {
    /// Net accumulated score above which a genre counts as liked.
    pub genre_threshold: f32,
    /// Net accumulated score above which a tag counts as liked.
    pub tag_threshold: f32,
    /// Scarcity boost strength for disliked genres: `1 + α/√exposure`.
    pub genre_scarcity_alpha: f32,
    /// Scarcity boost strength for disliked tags.
    pub tag_scarcity_alpha: f32,
    /// Flat penalty weight for catalog genres the user never rated.
    pub unseen_genre_penalty: f32,
    /// Flat penalty weight for tags the user never rated.
    pub unseen_tag_penalty: f32,
    /// Tags below this global count never enter the unseen bucket.
    pub min_global_tag_count: u32,
    /// Softened positive weight below which a non-core genre is demoted.
    pub positive_genre_min: f32,
    /// Fraction of a demoted weak positive merged into the negatives.
    pub weak_genre_negative_factor: f32,
    /// Exposure share at which a genre becomes core and immune to demotion.
    pub core_genre_min_share: f32,
    /// Multiplier applied to liked core genres.
    pub core_genre_exposure_boost: f32,
}

impl Default for TasteConfig {
    fn default() -> Self {
        Self {
            genre_threshold: 0.2,
            tag_threshold: 0.15,
            genre_scarcity_alpha: 0.6,
            tag_scarcity_alpha: 0.5,
            unseen_genre_penalty: 0.2,
            unseen_tag_penalty: 0.1,
            min_global_tag_count: 10,
            positive_genre_min: 0.3,
            weak_genre_negative_factor: 0.5,
            core_genre_min_share: 0.25,
            core_genre_exposure_boost: 1.35,
        }
    }
}

impl TasteConfig {
    /// Reject configurations the builder cannot work with. Called once at
    /// startup, not per request.
    pub fn validate(&self) -> Result<()> {
        if self.genre_threshold <= 0.0 || self.tag_threshold <= 0.0 {
            bail!("taste thresholds must be positive");
        }
        if self.genre_scarcity_alpha < 0.0 || self.tag_scarcity_alpha < 0.0 {
            bail!("scarcity alphas must be non-negative");
        }
        if self.unseen_genre_penalty < 0.0 || self.unseen_tag_penalty < 0.0 {
            bail!("unseen penalties must be non-negative");
        }
        if !(0.0..=1.0).contains(&self.weak_genre_negative_factor) {
            bail!(
                "weak_genre_negative_factor must be in [0, 1], got {}",
                self.weak_genre_negative_factor
            );
        }
        if !(0.0..=1.0).contains(&self.core_genre_min_share) {
            bail!(
                "core_genre_min_share must be in [0, 1], got {}",
                self.core_genre_min_share
            );
        }
        if self.core_genre_exposure_boost < 1.0 {
            bail!("core_genre_exposure_boost must not demote core genres");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        assert!(TasteConfig::default().validate().is_ok());
    }

    #[test]
    fn test_negative_alpha_rejected() {
        let config = TasteConfig {
            genre_scarcity_alpha: -0.1,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_threshold_rejected() {
        let config = TasteConfig {
            genre_threshold: 0.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
