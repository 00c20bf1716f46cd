//! Integration tests for the recommendation pipeline.
//!
//! These exercise the full path from a user history to a ranked page:
//! profile building, chain handling, filtering, scoring, and partitioning
//! together on a realistic mini-catalog.

use catalog::{
    CatalogIndex, CatalogItem, HistoryEntry, MediaFormat, MediaId, MediaStatus, MediaTag,
    RelationEdge, RelationType, WatchStatus,
};
use pipeline::{RecommendFilters, Recommender};
use std::sync::Arc;

fn tag(id: u32, name: &str) -> MediaTag {
    MediaTag {
        id,
        name: name.to_string(),
        rank: Some(70),
    }
}

fn item(
    id: MediaId,
    format: MediaFormat,
    genres: &[&str],
    tags: &[(u32, &str)],
    avg: u8,
    year: u16,
) -> CatalogItem {
    CatalogItem {
        id,
        title: format!("Item {}", id),
        format,
        status: MediaStatus::Finished,
        start_year: Some(year),
        start_month: Some(4),
        start_day: None,
        episodes: Some(12),
        average_score: Some(avg),
        genres: genres.iter().map(|g| g.to_string()).collect(),
        tags: tags.iter().map(|&(id, name)| tag(id, name)).collect(),
    }
}

/// Items 10 and 11 form the chain [10, 11]; 20 shares their genre/tag but
/// is unrelated; 30-32 are comedy items the test user never touched.
fn create_test_setup() -> Recommender {
    let mut catalog = CatalogIndex::new();
    catalog.insert_item(item(10, MediaFormat::Tv, &["Action"], &[(1, "Shounen")], 80, 2020));
    catalog.insert_item(item(11, MediaFormat::Tv, &["Action"], &[(1, "Shounen")], 80, 2021));
    catalog.insert_item(item(20, MediaFormat::Tv, &["Action"], &[(1, "Shounen")], 62, 2020));
    catalog.insert_item(item(30, MediaFormat::Tv, &["Comedy"], &[(2, "Iyashikei")], 90, 2019));
    catalog.insert_item(item(31, MediaFormat::Movie, &["Comedy"], &[(2, "Iyashikei")], 85, 2018));
    catalog.insert_item(item(32, MediaFormat::Tv, &["Comedy"], &[(3, "Parody")], 70, 2022));

    catalog.insert_relation(RelationEdge {
        from_id: 10,
        to_id: 11,
        relation: RelationType::Sequel,
    });
    catalog.insert_relation(RelationEdge {
        from_id: 11,
        to_id: 10,
        relation: RelationType::Prequel,
    });
    catalog.build_secondary_indices();

    Recommender::new(Arc::new(catalog))
}

fn entry(media_id: MediaId, status: WatchStatus, score: Option<u8>) -> HistoryEntry {
    HistoryEntry {
        media_id,
        status,
        score,
    }
}

#[test]
fn test_sequel_of_loved_item_ranks_first() {
    let recommender = create_test_setup();
    recommender.validate().unwrap();

    // Completed the chain opener with a 9: strong Action/Shounen signal
    let history = [entry(10, WatchStatus::Completed, Some(9))];
    let page = recommender
        .recommend(&history, &RecommendFilters::default())
        .unwrap();

    let ids: Vec<MediaId> = page.tv.iter().map(|item| item.id).collect();

    // The sequel leads; the unrelated genre-mate trails on quality
    assert_eq!(ids, vec![11, 20]);
    // The completed item itself never surfaces
    assert!(!ids.contains(&10));
    // Comedy was never rated: hard-blocked everywhere
    assert!(!ids.contains(&30) && !ids.contains(&32));
    assert!(page.movies.is_empty());
    assert_eq!(page.total, 2);

    // Matches are reported for explanation
    let sequel = &page.tv[0];
    assert_eq!(sequel.matched_genres, vec!["Action"]);
    assert_eq!(sequel.matched_tags, vec!["Shounen"]);
}

#[test]
fn test_excluded_sequel_never_resurfaces() {
    let recommender = create_test_setup();

    let history = [
        entry(10, WatchStatus::Completed, Some(9)),
        entry(11, WatchStatus::Dropped, None),
    ];
    let page = recommender
        .recommend(&history, &RecommendFilters::default())
        .unwrap();

    let ids: Vec<MediaId> = page.tv.iter().map(|item| item.id).collect();
    assert_eq!(ids, vec![20]);
}

#[test]
fn test_cold_start_ranks_by_quality_and_commonality() {
    let recommender = create_test_setup();

    let page = recommender
        .recommend(&[], &RecommendFilters::default())
        .unwrap();

    let tv_ids: Vec<MediaId> = page.tv.iter().map(|item| item.id).collect();

    // Chain [10, 11]: only the opener is recommendable to a new user
    assert!(!tv_ids.contains(&11));
    // Highest community score leads the tv partition
    assert_eq!(tv_ids[0], 30);
    assert!(tv_ids.contains(&10));

    // Format partitioning: the movie lands in its own bucket
    let movie_ids: Vec<MediaId> = page.movies.iter().map(|item| item.id).collect();
    assert_eq!(movie_ids, vec![31]);
    assert_eq!(page.total, page.tv.len() + page.movies.len());
}

#[test]
fn test_neutral_history_takes_cold_path() {
    let recommender = create_test_setup();

    // A score of 5 carries no signal, so scoring falls back to the cold
    // path even though the list is not empty
    let neutral = [entry(10, WatchStatus::Completed, Some(5))];
    let page = recommender
        .recommend(&neutral, &RecommendFilters::default())
        .unwrap();

    let ids: Vec<MediaId> = page.tv.iter().map(|item| item.id).collect();

    // The listed item is excluded; with 10 seen, the chain's first unseen
    // entry is now the sequel, which becomes recommendable
    assert!(!ids.contains(&10));
    assert!(ids.contains(&11));
    // Cold path reports no taste matches
    assert!(page.tv.iter().all(|item| item.matched_tags.is_empty()));
}

#[test]
fn test_request_filters_narrow_results() {
    let recommender = create_test_setup();

    let filters = RecommendFilters {
        min_year: Some(2021),
        ..Default::default()
    };
    let page = recommender.recommend(&[], &filters).unwrap();

    let ids: Vec<MediaId> = page.tv.iter().map(|item| item.id).collect();
    // 2021+ and first-unseen-in-chain leaves only item 32 (11 is mid-chain)
    assert_eq!(ids, vec![32]);
}
