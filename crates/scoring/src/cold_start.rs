//! Cold-start scoring for users without any taste signal.
//!
//! With an empty profile there is nothing personal to match against, so
//! candidates are ranked by community quality and by how recognizable their
//! genre/tag makeup is catalog-wide. The output is a fixed-weight blend in
//! [0, 1].

use catalog::{CatalogItem, GlobalStats};

const QUALITY_WEIGHT: f32 = 0.45;
const GENRE_WEIGHT: f32 = 0.30;
const TAG_WEIGHT: f32 = 0.15;
const DIVERSITY_WEIGHT: f32 = 0.10;

/// Genre-count x tag-count product treated as full combination breadth.
const COMBINATION_SPAN: f32 = 25.0;
/// Genre-count + tag-count sum treated as full richness.
const RICHNESS_SPAN: f32 = 15.0;

/// Score an item for a user with no taste signal. Always in [0, 1].
pub fn cold_start_score(item: &CatalogItem, stats: &GlobalStats) -> f32 {
    let quality = item
        .average_score
        .map(|score| (score as f32 / 100.0).clamp(0.0, 1.0))
        .unwrap_or(0.0);

    let genre_strength = mean(item.genres.iter().map(|genre| stats.genre_share(genre)));
    let tag_strength = mean(item.tags.iter().map(|tag| stats.tag_share(tag.id)));

    let genres = item.genres.len() as f32;
    let tags = item.tags.len() as f32;
    let combination_breadth = (genres * tags / COMBINATION_SPAN).clamp(0.0, 1.0);
    let richness = ((genres + tags) / RICHNESS_SPAN).clamp(0.0, 1.0);
    let diversity = combination_breadth.max(richness);

    QUALITY_WEIGHT * quality
        + GENRE_WEIGHT * genre_strength
        + TAG_WEIGHT * tag_strength
        + DIVERSITY_WEIGHT * diversity
}

fn mean(values: impl Iterator<Item = f32>) -> f32 {
    let mut sum = 0.0f32;
    let mut count = 0u32;
    for value in values {
        sum += value;
        count += 1;
    }
    sum / count.max(1) as f32
}
