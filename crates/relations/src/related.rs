//! Related-item grouping for a story chain.
//!
//! Side stories, spin-offs, and other non-chain relations are attached to
//! the chain member they hang off. An item related to several chain members
//! is attached only to the first one in chain order, tracked by a single
//! "already attached" set shared across the whole chain.

use crate::chain::RelationIndex;
use catalog::{MediaId, RelationType};
use std::collections::HashSet;

/// Non-chain relations attached to one chain member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelatedEntry {
    pub anchor: MediaId,
    pub related: Vec<(MediaId, RelationType)>,
}

impl RelationIndex {
    /// Group the non-chain relations of `chain`, in chain order.
    ///
    /// Targets already inside the chain and PREQUEL/SEQUEL edges are
    /// skipped; each target appears at most once across the whole result.
    pub fn related_for_chain(&self, chain: &[MediaId]) -> Vec<RelatedEntry> {
        let in_chain: HashSet<MediaId> = chain.iter().copied().collect();
        let mut attached: HashSet<MediaId> = HashSet::new();

        chain
            .iter()
            .map(|&anchor| {
                let mut related = Vec::new();
                if let Some(targets) = self.adjacency.get(&anchor) {
                    for &(to, relation) in targets {
                        if relation.is_chain() || in_chain.contains(&to) {
                            continue;
                        }
                        if attached.insert(to) {
                            related.push((to, relation));
                        }
                    }
                }
                RelatedEntry { anchor, related }
            })
            .collect()
    }
}
