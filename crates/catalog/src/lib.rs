//! # Catalog Crate
//!
//! This crate holds the catalog snapshot: domain types, the in-memory
//! `CatalogIndex`, JSON snapshot loading, and catalog-wide frequency
//! statistics.
//!
//! ## Main Components
//!
//! - **types**: Core domain types (CatalogItem, RelationEdge, HistoryEntry, CatalogIndex)
//! - **snapshot**: Load snapshot and history JSON files into the index
//! - **stats**: GlobalStats frequency counts and idf weights
//! - **error**: Error types for loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use catalog::{CatalogIndex, GlobalStats};
//! use std::path::Path;
//!
//! let index = CatalogIndex::load_from_file(Path::new("data/catalog.json"))?;
//! let stats = GlobalStats::from_catalog(&index);
//!
//! let item = index.get(21).unwrap();
//! println!("{} carries {} genres", item.title, item.genres.len());
//! ```

// Public modules
pub mod error;
pub mod snapshot;
pub mod stats;
pub mod types;

// Re-export commonly used types for convenience
pub use error::{CatalogError, Result};
pub use snapshot::{CatalogSnapshot, load_history};
pub use stats::GlobalStats;
pub use types::{
    // Type aliases
    MediaId,
    TagId,
    // Core types
    CatalogIndex,
    CatalogItem,
    HistoryEntry,
    MediaTag,
    RelationEdge,
    // Enums
    MediaFormat,
    MediaSeason,
    MediaStatus,
    RelationType,
    WatchStatus,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_index_creation() {
        let index = CatalogIndex::new();
        let (items, relations) = index.counts();

        assert_eq!(items, 0);
        assert_eq!(relations, 0);
    }

    #[test]
    fn test_insert_item() {
        let mut index = CatalogIndex::new();

        index.insert_item(CatalogItem {
            id: 21,
            title: "One Piece".to_string(),
            start_year: Some(1999),
            genres: vec!["Action".to_string(), "Adventure".to_string()],
            ..Default::default()
        });

        let retrieved = index.get(21).unwrap();
        assert_eq!(retrieved.id, 21);
        assert_eq!(retrieved.genres.len(), 2);
        assert!(index.contains(21));
    }

    #[test]
    fn test_secondary_indices() {
        let mut index = CatalogIndex::new();
        index.insert_item(CatalogItem {
            id: 1,
            format: MediaFormat::Tv,
            start_year: Some(2020),
            ..Default::default()
        });
        index.insert_item(CatalogItem {
            id: 2,
            format: MediaFormat::Movie,
            start_year: Some(2020),
            ..Default::default()
        });
        index.build_secondary_indices();

        assert_eq!(index.items_by_format(MediaFormat::Tv), &[1]);
        assert_eq!(index.items_by_format(MediaFormat::Movie), &[2]);
        assert_eq!(index.items_by_year(2020), &[1, 2]);
        assert!(index.items_by_year(1999).is_empty());
    }

    #[test]
    fn test_season_from_month() {
        assert_eq!(MediaSeason::from_month(1), Some(MediaSeason::Winter));
        assert_eq!(MediaSeason::from_month(4), Some(MediaSeason::Spring));
        assert_eq!(MediaSeason::from_month(7), Some(MediaSeason::Summer));
        assert_eq!(MediaSeason::from_month(10), Some(MediaSeason::Fall));
        assert_eq!(MediaSeason::from_month(12), Some(MediaSeason::Winter));
        assert_eq!(MediaSeason::from_month(0), None);
    }

    #[test]
    fn test_empty_queries() {
        let index = CatalogIndex::new();

        assert!(index.get(999).is_none());
        assert!(index.sorted_ids().is_empty());
        assert!(index.items_by_format(MediaFormat::Tv).is_empty());
    }
}
