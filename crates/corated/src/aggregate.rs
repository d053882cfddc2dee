//! Pairwise aggregation: every co-rated item pair folded into its
//! sufficient statistics.
//!
//! Each user with N rated items contributes O(N²) pair emissions, so the
//! total cost is O(Σ N_u²) over users — the dominant cost of the whole
//! pipeline and the reason aggregation is parallelized per user. Workers own
//! disjoint user slices and fold partition-local maps; the maps combine via
//! the associative keywise merge, so no shared state is mutated concurrently.

use std::borrow::Cow;
use std::collections::HashMap;

use rayon::prelude::*;
use tracing::debug;

use crate::store::RatingStore;
use crate::types::{ItemId, PairKey, PairStats};

/// Aggregation tuning knobs.
#[derive(Debug, Clone, Default)]
pub struct AggregateConfig {
    /// Cap on the number of items per user considered for pair enumeration.
    ///
    /// A user who rated thousands of items produces millions of pairs alone;
    /// the cap bounds that blowup explicitly instead of leaking memory. When
    /// set, a user's items are sorted by item id and the first N kept, so
    /// truncation is deterministic. `None` disables the cap.
    pub max_items_per_user: Option<usize>,
}

/// Fold every 2-combination of one user's items into `acc`.
///
/// Pairs are canonicalized so the smaller item id is always slot A, with the
/// rating values rebound to their canonical slot.
fn accumulate_user(items: &[(ItemId, f32)], acc: &mut HashMap<PairKey, PairStats>) {
    for (idx, &(i, ri)) in items.iter().enumerate() {
        for &(j, rj) in &items[idx + 1..] {
            if let Some((key, ra, rb)) = PairKey::with_ratings(i, ri, j, rj) {
                acc.entry(key).or_default().observe(ra, rb);
            }
        }
    }
}

/// Apply the per-user item cap, if any. Only a user over the cap pays for a
/// copy; everyone else's items are borrowed straight from the store.
fn capped_items<'a>(items: &'a [(ItemId, f32)], config: &AggregateConfig) -> Cow<'a, [(ItemId, f32)]> {
    match config.max_items_per_user {
        Some(cap) if items.len() > cap => {
            let mut owned = items.to_vec();
            owned.sort_by_key(|&(item, _)| item);
            owned.truncate(cap);
            Cow::Owned(owned)
        }
        _ => Cow::Borrowed(items),
    }
}

/// Merge `b` into `a` by keywise field addition and return `a`.
///
/// Associative and commutative, so partial maps from any partitioning of the
/// input can be combined in any order or tree shape.
pub fn merge_maps(
    mut a: HashMap<PairKey, PairStats>,
    b: HashMap<PairKey, PairStats>,
) -> HashMap<PairKey, PairStats> {
    if a.len() < b.len() {
        return merge_maps(b, a);
    }
    for (key, stats) in b {
        a.entry(key).or_default().merge(&stats);
    }
    a
}

/// Single-pass sequential aggregation over the whole store.
pub fn aggregate(store: &RatingStore, config: &AggregateConfig) -> HashMap<PairKey, PairStats> {
    let mut acc = HashMap::new();
    for (_, items) in store.users() {
        accumulate_user(&capped_items(items, config), &mut acc);
    }
    debug!(pairs = acc.len(), "sequential aggregation complete");
    acc
}

/// Parallel aggregation: users partitioned across rayon workers, each worker
/// folding a partition-local map, maps combined by [`merge_maps`].
///
/// Produces the same map as [`aggregate`] for any input, any worker count,
/// and any reduction order.
pub fn aggregate_parallel(
    store: &RatingStore,
    config: &AggregateConfig,
) -> HashMap<PairKey, PairStats> {
    let users: Vec<&[(ItemId, f32)]> = store.users().map(|(_, items)| items).collect();

    let acc = users
        .par_iter()
        .fold(HashMap::new, |mut local, items| {
            accumulate_user(&capped_items(items, config), &mut local);
            local
        })
        .reduce(HashMap::new, merge_maps);

    debug!(pairs = acc.len(), users = users.len(), "parallel aggregation complete");
    acc
}
