//! Story-chain construction over the relation graph.
//!
//! A chain is the linear PREQUEL/SEQUEL spine of a story: walk backwards
//! from any entry to the deterministically chosen root, then forwards along
//! SEQUEL edges. All members of one chain share the identical chain array.
//!
//! ## Algorithm
//! 1. Index edges by source id, each adjacency list sorted by target id
//! 2. Root-finding: follow the smallest-target PREQUEL/PARENT edge until
//!    none qualifies, the target was already visited, or it is unknown
//! 3. Forward walk: from the root, follow the smallest-target SEQUEL edge
//!    under the same guards, collecting the ordered chain
//! 4. Map every id visited by the walk to the entire chain
//!
//! Walks are iterative with explicit visited sets, so a cyclic relation
//! graph terminates with a finite chain containing each id once.

use catalog::{MediaId, RelationEdge, RelationType};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::debug;

/// Map from item id to the full ordered chain it belongs to (root first).
///
/// Members of one chain hold clones of the same `Arc`, so the "identical
/// chain array" guarantee is structural, not just by value.
pub type ChainMap = HashMap<MediaId, Arc<[MediaId]>>;

/// Adjacency index over the relation edges of one catalog snapshot.
///
/// Built once per snapshot and reused for both chain construction and
/// related-item grouping. Edges with an endpoint outside the known id set
/// are dropped at indexing time; they can neither extend a chain nor appear
/// in output.
#[derive(Debug)]
pub struct RelationIndex {
    pub(crate) adjacency: HashMap<MediaId, Vec<(MediaId, RelationType)>>,
    known_ids: Vec<MediaId>,
}

impl RelationIndex {
    /// Index `edges` restricted to endpoints inside `known`.
    pub fn new(edges: &[RelationEdge], known: &HashSet<MediaId>) -> Self {
        let mut adjacency: HashMap<MediaId, Vec<(MediaId, RelationType)>> = HashMap::new();
        let mut dropped = 0usize;
        for edge in edges {
            if !known.contains(&edge.from_id) || !known.contains(&edge.to_id) {
                dropped += 1;
                continue;
            }
            adjacency
                .entry(edge.from_id)
                .or_default()
                .push((edge.to_id, edge.relation));
        }
        if dropped > 0 {
            debug!("dropped {} relation edges with unknown endpoints", dropped);
        }

        // Sorted adjacency lists make every smallest-target scan a plain
        // front-to-back find.
        for targets in adjacency.values_mut() {
            targets.sort_unstable();
            targets.dedup();
        }

        let mut known_ids: Vec<MediaId> = known.iter().copied().collect();
        known_ids.sort_unstable();

        Self { adjacency, known_ids }
    }

    /// Build the chain map for every known id.
    ///
    /// Ids with no qualifying edges map to a singleton chain of themselves.
    /// Forward walks are cached per root, so all members of one chain share
    /// a single allocation.
    pub fn chain_map(&self) -> ChainMap {
        let mut chains_by_root: HashMap<MediaId, Arc<[MediaId]>> = HashMap::new();
        let mut map: ChainMap = HashMap::with_capacity(self.known_ids.len());

        for &id in &self.known_ids {
            let root = self.find_root(id);
            let chain = chains_by_root
                .entry(root)
                .or_insert_with(|| self.walk_forward(root).into())
                .clone();

            // Asymmetric edge data can lead to a root whose sequel walk
            // never reaches `id`; fall back to walking from `id` itself so
            // every id is a member of its own chain.
            let chain = if chain.contains(&id) {
                chain
            } else {
                chains_by_root
                    .entry(id)
                    .or_insert_with(|| self.walk_forward(id).into())
                    .clone()
            };

            map.insert(id, chain);
        }
        map
    }

    /// Walk PREQUEL/PARENT edges to the chain root.
    ///
    /// At each step the candidate is the smallest-target qualifying edge;
    /// the walk stops when none exists or the candidate was already visited.
    fn find_root(&self, start: MediaId) -> MediaId {
        let mut current = start;
        let mut visited = HashSet::new();
        visited.insert(current);

        loop {
            let next = self.step(current, |relation| relation.is_backward());
            match next {
                Some(target) if !visited.contains(&target) => {
                    visited.insert(target);
                    current = target;
                }
                _ => return current,
            }
        }
    }

    /// Walk SEQUEL edges from the root, collecting the ordered chain.
    fn walk_forward(&self, root: MediaId) -> Vec<MediaId> {
        let mut chain = vec![root];
        let mut visited = HashSet::new();
        visited.insert(root);
        let mut current = root;

        loop {
            let next = self.step(current, |relation| relation == RelationType::Sequel);
            match next {
                Some(target) if !visited.contains(&target) => {
                    visited.insert(target);
                    chain.push(target);
                    current = target;
                }
                _ => return chain,
            }
        }
    }

    /// The smallest-target outgoing edge of `from` matching `qualifies`,
    /// ignoring self-loops.
    fn step(&self, from: MediaId, qualifies: impl Fn(RelationType) -> bool) -> Option<MediaId> {
        self.adjacency.get(&from)?.iter().find_map(|&(to, relation)| {
            (qualifies(relation) && to != from).then_some(to)
        })
    }
}

/// Build a chain map from a flat edge list and the set of known item ids.
///
/// Convenience wrapper for callers that do not need to keep the adjacency
/// index around for related-item grouping.
pub fn build_chain_map(edges: &[RelationEdge], known: &HashSet<MediaId>) -> ChainMap {
    RelationIndex::new(edges, known).chain_map()
}
