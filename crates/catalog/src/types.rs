//! Core domain types for the anime catalog.
//!
//! This module defines the strict data shapes shared by every crate in the
//! workspace: catalog items with their genres and tags, relation edges
//! between items, user history entries, and the in-memory `CatalogIndex`
//! that the taste and recommendation crates read from.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

// =============================================================================
// Type Aliases
// =============================================================================
// These make the domain clearer and prevent mixing up media ids with tag ids

/// Unique identifier for a catalog item, as assigned by the upstream catalog.
pub type MediaId = u32;

/// Unique identifier for a tag in the catalog-wide tag vocabulary.
pub type TagId = u32;

// =============================================================================
// Media Enums
// =============================================================================

/// Release format of a catalog item.
///
/// The recommendation output is partitioned on this: `Movie` goes into its
/// own bucket, every other format counts as series content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MediaFormat {
    Tv,
    TvShort,
    Movie,
    Special,
    Ova,
    Ona,
    Music,
}

impl MediaFormat {
    pub fn is_movie(self) -> bool {
        self == MediaFormat::Movie
    }
}

/// Airing status of a catalog item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MediaStatus {
    Finished,
    Releasing,
    NotYetReleased,
    Cancelled,
    Hiatus,
}

/// Broadcast season, derived from an item's start month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MediaSeason {
    Winter,
    Spring,
    Summer,
    Fall,
}

impl MediaSeason {
    /// Map a calendar month (1-12) to its broadcast season.
    pub fn from_month(month: u8) -> Option<MediaSeason> {
        match month {
            12 | 1 | 2 => Some(MediaSeason::Winter),
            3..=5 => Some(MediaSeason::Spring),
            6..=8 => Some(MediaSeason::Summer),
            9..=11 => Some(MediaSeason::Fall),
            _ => None,
        }
    }
}

/// How one catalog item relates to another.
///
/// Edges are directional as stored; the meaning is not guaranteed to be
/// symmetric in snapshot data, so consumers must never assume the reverse
/// edge exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RelationType {
    Prequel,
    Sequel,
    Parent,
    SideStory,
    SpinOff,
    Adaptation,
    Alternative,
    Character,
    Summary,
    Other,
}

impl RelationType {
    /// Chain relations link entries of the same linear story.
    pub fn is_chain(self) -> bool {
        matches!(self, RelationType::Prequel | RelationType::Sequel)
    }

    /// Relations followed when walking backwards towards a chain root.
    pub fn is_backward(self) -> bool {
        matches!(self, RelationType::Prequel | RelationType::Parent)
    }
}

// =============================================================================
// Catalog Item Types
// =============================================================================

/// A tag attached to a catalog item.
///
/// `rank` is the upstream relevance percentage of the tag for this item and
/// may be absent for freshly submitted tags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaTag {
    pub id: TagId,
    pub name: String,
    pub rank: Option<u8>,
}

/// A single item of the catalog snapshot.
///
/// Immutable per request; identity is `id`. Fields that the upstream catalog
/// can omit are explicit `Option`s and default to `None` when missing from a
/// snapshot file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: MediaId,
    pub title: String,
    pub format: MediaFormat,
    pub status: MediaStatus,
    pub start_year: Option<u16>,
    pub start_month: Option<u8>,
    pub start_day: Option<u8>,
    pub episodes: Option<u32>,
    /// Community average score on a 0-100 scale.
    pub average_score: Option<u8>,
    pub genres: Vec<String>,
    pub tags: Vec<MediaTag>,
}

impl CatalogItem {
    /// An item without any start date cannot be placed on a timeline and is
    /// never recommendable.
    pub fn has_start_date(&self) -> bool {
        self.start_year.is_some()
    }

    /// Broadcast season derived from the start month, if known.
    pub fn season(&self) -> Option<MediaSeason> {
        self.start_month.and_then(MediaSeason::from_month)
    }

    pub fn has_genre(&self, genre: &str) -> bool {
        self.genres.iter().any(|g| g == genre)
    }

    pub fn has_tag(&self, tag_id: TagId) -> bool {
        self.tags.iter().any(|t| t.id == tag_id)
    }
}

impl Default for CatalogItem {
    fn default() -> Self {
        Self {
            id: 0,
            title: String::new(),
            format: MediaFormat::Tv,
            status: MediaStatus::Finished,
            start_year: None,
            start_month: None,
            start_day: None,
            episodes: None,
            average_score: None,
            genres: Vec::new(),
            tags: Vec::new(),
        }
    }
}

/// A directed relation between two catalog items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RelationEdge {
    pub from_id: MediaId,
    pub to_id: MediaId,
    pub relation: RelationType,
}

// =============================================================================
// User History Types
// =============================================================================

/// List status of a history entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WatchStatus {
    Completed,
    Current,
    Planning,
    Dropped,
    Paused,
    Repeating,
}

impl WatchStatus {
    /// Entries that feed the taste profile. A rewatch counts as a completion.
    pub fn is_completed(self) -> bool {
        matches!(self, WatchStatus::Completed | WatchStatus::Repeating)
    }
}

/// One entry of a user's list.
///
/// `score` is on the user-facing 0-10 scale; `None` and `5` both carry no
/// taste signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub media_id: MediaId,
    pub status: WatchStatus,
    pub score: Option<u8>,
}

// =============================================================================
// CatalogIndex - The In-Memory Catalog Snapshot
// =============================================================================

/// Owning store for one catalog snapshot.
///
/// Built once per snapshot, then shared read-only (typically behind an
/// `Arc`) across requests. Getters return references; nothing here mutates
/// after `build_secondary_indices` has run.
#[derive(Debug, Default)]
pub struct CatalogIndex {
    pub(crate) items: HashMap<MediaId, CatalogItem>,
    pub(crate) relations: Vec<RelationEdge>,

    // Secondary indices for specialized queries
    pub(crate) format_index: HashMap<MediaFormat, Vec<MediaId>>,
    pub(crate) year_index: BTreeMap<u16, Vec<MediaId>>,
}

impl CatalogIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: MediaId) -> Option<&CatalogItem> {
        self.items.get(&id)
    }

    pub fn contains(&self, id: MediaId) -> bool {
        self.items.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// All item ids in ascending order.
    ///
    /// The pipeline seeds its candidate list from this, so downstream
    /// iteration order is reproducible across runs.
    pub fn sorted_ids(&self) -> Vec<MediaId> {
        let mut ids: Vec<MediaId> = self.items.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    pub fn items(&self) -> impl Iterator<Item = &CatalogItem> {
        self.items.values()
    }

    /// All relation edges of the snapshot, including ones whose endpoints
    /// are unknown. Consumers drop dangling edges themselves.
    pub fn relations(&self) -> &[RelationEdge] {
        &self.relations
    }

    pub fn items_by_format(&self, format: MediaFormat) -> &[MediaId] {
        self.format_index
            .get(&format)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    pub fn items_by_year(&self, year: u16) -> &[MediaId] {
        self.year_index
            .get(&year)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    // Mutators - used while a snapshot is being built

    /// Insert an item. A duplicate id replaces the previous item (snapshots
    /// are last-write-wins).
    pub fn insert_item(&mut self, item: CatalogItem) {
        self.items.insert(item.id, item);
    }

    pub fn insert_relation(&mut self, edge: RelationEdge) {
        self.relations.push(edge);
    }

    /// Build the format and year indices after all items are inserted.
    pub fn build_secondary_indices(&mut self) {
        self.format_index.clear();
        self.year_index.clear();
        for (id, item) in &self.items {
            self.format_index.entry(item.format).or_default().push(*id);
            if let Some(year) = item.start_year {
                self.year_index.entry(year).or_default().push(*id);
            }
        }
        for ids in self.format_index.values_mut() {
            ids.sort_unstable();
        }
        for ids in self.year_index.values_mut() {
            ids.sort_unstable();
        }
    }

    /// Item and relation counts, for logging and validation.
    pub fn counts(&self) -> (usize, usize) {
        (self.items.len(), self.relations.len())
    }
}
