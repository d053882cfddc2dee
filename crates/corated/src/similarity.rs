//! Cosine similarity scoring and the queryable similarity table.

use std::collections::HashMap;

use tracing::info;

use crate::aggregate::{aggregate_parallel, AggregateConfig};
use crate::store::RatingStore;
use crate::types::{ItemId, PairStats, SimilarityRecord};

/// Cosine similarity from a pair's sufficient statistics.
///
/// A zero denominator (all-zero ratings on one side) is defined as zero
/// similarity, not an error and not NaN.
pub fn cosine_score(stats: &PairStats) -> f64 {
    let denom = stats.sum_xx.sqrt() * stats.sum_yy.sqrt();
    if denom == 0.0 {
        return 0.0;
    }
    stats.sum_xy / denom
}

/// The full pairwise similarity table.
///
/// Built once (the expensive step) and reused across many queries; read-only
/// after construction, so concurrent queries need no synchronization.
#[derive(Debug, Clone)]
pub struct SimilarityTable {
    records: Vec<SimilarityRecord>,
    by_item: HashMap<ItemId, Vec<usize>>,
}

impl SimilarityTable {
    /// Aggregate every co-rated pair in `store` and score it.
    ///
    /// Idempotent given the same input: record order is canonicalized by pair
    /// key, so the table is identical regardless of input order, partitioning,
    /// or merge-tree shape.
    pub fn build(store: &RatingStore, config: &AggregateConfig) -> Self {
        let acc = aggregate_parallel(store, config);

        let mut keyed: Vec<_> = acc.into_iter().collect();
        keyed.sort_by_key(|(key, _)| *key);

        let records: Vec<SimilarityRecord> = keyed
            .into_iter()
            .map(|(key, stats)| SimilarityRecord {
                item_a: key.a(),
                item_b: key.b(),
                score: cosine_score(&stats),
                pair_count: stats.count,
            })
            .collect();

        let mut by_item: HashMap<ItemId, Vec<usize>> = HashMap::new();
        for (idx, rec) in records.iter().enumerate() {
            by_item.entry(rec.item_a).or_default().push(idx);
            by_item.entry(rec.item_b).or_default().push(idx);
        }

        info!(pairs = records.len(), ratings = store.len(), "similarity table built");

        Self { records, by_item }
    }

    /// All records, sorted by pair key.
    pub fn records(&self) -> &[SimilarityRecord] {
        &self.records
    }

    /// Number of scored pairs.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True if no pair was scored.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Every record with `item` on either side, in pair-key order.
    pub fn records_for(&self, item: ItemId) -> impl Iterator<Item = &SimilarityRecord> {
        self.by_item
            .get(&item)
            .into_iter()
            .flatten()
            .map(move |&idx| &self.records[idx])
    }
}
