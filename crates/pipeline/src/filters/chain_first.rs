//! The chain-first-unseen rule.
//!
//! Within a story chain only one entry is ever recommendable: the first
//! member, in chain order, that the user has not already excluded.
//! Recommending a mid-chain sequel to someone who never saw its beginning
//! is a bad recommendation regardless of its score.

use crate::context::RecommendContext;
use crate::traits::Filter;
use anyhow::Result;
use catalog::MediaId;
use std::collections::HashSet;

/// Keeps a candidate only if it is the first unseen entry of its chain.
pub struct ChainFirstUnseenFilter;

/// Whether `id` is the first member of `chain` not contained in `excluded`.
pub fn is_first_unseen_in_chain(
    chain: &[MediaId],
    excluded: &HashSet<MediaId>,
    id: MediaId,
) -> bool {
    chain.iter().copied().find(|m| !excluded.contains(m)) == Some(id)
}

impl Filter for ChainFirstUnseenFilter {
    fn name(&self) -> &str {
        "ChainFirstUnseenFilter"
    }

    fn apply(&self, candidates: Vec<MediaId>, ctx: &RecommendContext) -> Result<Vec<MediaId>> {
        Ok(candidates
            .into_iter()
            .filter(|&id| match ctx.chains.get(&id) {
                Some(chain) => is_first_unseen_in_chain(chain, &ctx.excluded, id),
                // An id outside the chain map is its own singleton chain
                None => true,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::RecommendFilters;
    use relations::ChainMap;
    use std::sync::Arc;

    fn chain_ctx(excluded: &[MediaId]) -> RecommendContext {
        let chain: Arc<[MediaId]> = vec![1, 2, 3].into();
        let mut chains = ChainMap::new();
        for &id in chain.iter() {
            chains.insert(id, chain.clone());
        }
        RecommendContext::new(
            excluded.iter().copied().collect(),
            RecommendFilters::default(),
            Arc::new(chains),
        )
    }

    #[test]
    fn test_nothing_seen_first_entry_passes() {
        let ctx = chain_ctx(&[]);
        let filter = ChainFirstUnseenFilter;

        let surviving = filter.apply(vec![1, 2, 3], &ctx).unwrap();
        assert_eq!(surviving, vec![1]);
    }

    #[test]
    fn test_first_seen_second_passes() {
        let ctx = chain_ctx(&[1]);
        let filter = ChainFirstUnseenFilter;

        // 2 is the first unseen entry; 3 is still behind it
        let surviving = filter.apply(vec![2, 3], &ctx).unwrap();
        assert_eq!(surviving, vec![2]);
    }

    #[test]
    fn test_unchained_id_passes() {
        let ctx = chain_ctx(&[]);
        let filter = ChainFirstUnseenFilter;

        let surviving = filter.apply(vec![42], &ctx).unwrap();
        assert_eq!(surviving, vec![42]);
    }

    #[test]
    fn test_property_table() {
        let chain = [1, 2, 3];

        let excluded: HashSet<MediaId> = [1].into_iter().collect();
        assert!(!is_first_unseen_in_chain(&chain, &excluded, 1));
        assert!(is_first_unseen_in_chain(&chain, &excluded, 2));
        assert!(!is_first_unseen_in_chain(&chain, &excluded, 3));

        let nothing_seen = HashSet::new();
        assert!(is_first_unseen_in_chain(&chain, &nothing_seen, 1));
        assert!(!is_first_unseen_in_chain(&chain, &nothing_seen, 2));
    }
}
