//! # Relations Crate
//!
//! Builds story chains and related-item groups from the flat relation edge
//! list of a catalog snapshot.
//!
//! ## Components
//!
//! ### Chain builder
//! Walks the directed relation graph to each item's canonical root, then
//! forward along SEQUEL edges, producing a `ChainMap` where every member of
//! a chain shares the identical ordered chain array.
//!
//! ### Related grouping
//! Reuses the same adjacency index to attach non-chain relations (side
//! stories, spin-offs, adaptations, ...) to the first chain member they
//! appear on.
//!
//! ## Example Usage
//!
//! ```ignore
//! use relations::RelationIndex;
//!
//! let known = catalog.sorted_ids().into_iter().collect();
//! let index = RelationIndex::new(catalog.relations(), &known);
//!
//! let chains = index.chain_map();
//! let related = index.related_for_chain(&chains[&media_id]);
//! ```
//!
//! All walks are iterative with explicit visited sets; cyclic or dangling
//! edge data degrades to shorter chains, never to an error.

pub mod chain;
pub mod related;

pub use chain::{ChainMap, RelationIndex, build_chain_map};
pub use related::RelatedEntry;
