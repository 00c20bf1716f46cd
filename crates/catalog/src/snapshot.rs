//! Loading catalog snapshots and user histories from JSON files.
//!
//! The snapshot file is the boundary to the external catalog store: a single
//! JSON document with an `items` array and an optional `relations` array.
//! User histories are a plain JSON array of list entries. Everything past
//! this module works on in-memory structures only.

use crate::error::{CatalogError, Result};
use crate::types::{CatalogIndex, CatalogItem, HistoryEntry, RelationEdge};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::info;

/// On-disk shape of a catalog snapshot.
#[derive(Debug, Deserialize)]
pub struct CatalogSnapshot {
    pub items: Vec<CatalogItem>,
    #[serde(default)]
    pub relations: Vec<RelationEdge>,
}

impl CatalogIndex {
    /// Build an index from a parsed snapshot.
    ///
    /// Duplicate item ids are last-write-wins; relation edges are stored
    /// as-is (consumers drop edges with unknown endpoints).
    pub fn from_snapshot(snapshot: CatalogSnapshot) -> Self {
        let mut index = CatalogIndex::new();
        for item in snapshot.items {
            index.insert_item(item);
        }
        for edge in snapshot.relations {
            index.insert_relation(edge);
        }
        index.build_secondary_indices();
        index
    }

    /// Load a snapshot file and build the index.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let snapshot: CatalogSnapshot =
            serde_json::from_str(&content).map_err(|source| CatalogError::Parse {
                file: path.display().to_string(),
                source,
            })?;

        let index = Self::from_snapshot(snapshot);
        let (items, relations) = index.counts();
        info!("loaded catalog snapshot: {} items, {} relations", items, relations);
        Ok(index)
    }
}

/// Load a user history file (a JSON array of list entries).
///
/// Scores outside the 0-10 scale are rejected here so the core can assume
/// the documented range.
pub fn load_history(path: &Path) -> Result<Vec<HistoryEntry>> {
    let content = fs::read_to_string(path)?;
    let entries: Vec<HistoryEntry> =
        serde_json::from_str(&content).map_err(|source| CatalogError::Parse {
            file: path.display().to_string(),
            source,
        })?;

    for entry in &entries {
        if let Some(score) = entry.score {
            if score > 10 {
                return Err(CatalogError::InvalidValue {
                    field: "score".to_string(),
                    value: score.to_string(),
                });
            }
        }
    }
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{MediaFormat, RelationType};

    #[test]
    fn test_snapshot_parsing() {
        let json = r#"{
            "items": [
                {
                    "id": 1,
                    "title": "First Season",
                    "format": "TV",
                    "status": "FINISHED",
                    "start_year": 2020,
                    "start_month": 4,
                    "average_score": 82,
                    "genres": ["Action"],
                    "tags": [{"id": 10, "name": "Shounen", "rank": 85}]
                },
                {
                    "id": 2,
                    "title": "The Movie",
                    "format": "MOVIE",
                    "status": "FINISHED",
                    "genres": [],
                    "tags": []
                }
            ],
            "relations": [
                {"from_id": 1, "to_id": 2, "relation": "SIDE_STORY"}
            ]
        }"#;

        let snapshot: CatalogSnapshot = serde_json::from_str(json).unwrap();
        let index = CatalogIndex::from_snapshot(snapshot);

        assert_eq!(index.len(), 2);
        let first = index.get(1).unwrap();
        assert_eq!(first.title, "First Season");
        assert_eq!(first.start_year, Some(2020));
        assert_eq!(first.tags[0].id, 10);

        // Absent optional fields become None
        let movie = index.get(2).unwrap();
        assert_eq!(movie.start_year, None);
        assert_eq!(movie.average_score, None);

        assert_eq!(index.relations().len(), 1);
        assert_eq!(index.relations()[0].relation, RelationType::SideStory);
        assert_eq!(index.items_by_format(MediaFormat::Movie), &[2]);
    }

    #[test]
    fn test_history_parsing() {
        let json = r#"[
            {"media_id": 1, "status": "COMPLETED", "score": 9},
            {"media_id": 2, "status": "DROPPED", "score": null}
        ]"#;

        let entries: Vec<HistoryEntry> = serde_json::from_str(json).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].score, Some(9));
        assert_eq!(entries[1].score, None);
    }

    #[test]
    fn test_duplicate_item_last_wins() {
        let snapshot = CatalogSnapshot {
            items: vec![
                CatalogItem {
                    id: 1,
                    title: "old".to_string(),
                    ..Default::default()
                },
                CatalogItem {
                    id: 1,
                    title: "new".to_string(),
                    ..Default::default()
                },
            ],
            relations: vec![],
        };

        let index = CatalogIndex::from_snapshot(snapshot);
        assert_eq!(index.len(), 1);
        assert_eq!(index.get(1).unwrap().title, "new");
    }
}
