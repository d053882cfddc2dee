//! Core data types for ratings, item pairs, and similarity results.

use serde::{Deserialize, Serialize};

/// Identifier for a user in the rating data.
pub type UserId = u32;

/// Identifier for an item in the rating data.
pub type ItemId = u32;

/// A single (user, item, rating) observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    pub user: UserId,
    pub item: ItemId,
    pub value: f32,
}

impl Rating {
    pub fn new(user: UserId, item: ItemId, value: f32) -> Self {
        Self { user, item, value }
    }
}

/// Canonical key for an unordered pair of co-rated items.
///
/// Invariant: `a < b`. Every unordered pair of distinct items maps to exactly
/// one key regardless of the order the two ratings were observed in; without
/// this the same pair would accumulate under two different keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PairKey {
    a: ItemId,
    b: ItemId,
}

impl PairKey {
    /// Canonicalize two distinct items into a key. Returns `None` when
    /// `i == j` — a pair of an item with itself is never meaningful here.
    pub fn new(i: ItemId, j: ItemId) -> Option<Self> {
        match i.cmp(&j) {
            std::cmp::Ordering::Less => Some(Self { a: i, b: j }),
            std::cmp::Ordering::Greater => Some(Self { a: j, b: i }),
            std::cmp::Ordering::Equal => None,
        }
    }

    /// Canonicalize two rated observations. The rating values are rebound so
    /// they travel with their canonical slot, not with enumeration order.
    pub fn with_ratings(i: ItemId, ri: f32, j: ItemId, rj: f32) -> Option<(Self, f32, f32)> {
        let key = Self::new(i, j)?;
        if key.a == i {
            Some((key, ri, rj))
        } else {
            Some((key, rj, ri))
        }
    }

    /// The smaller item id.
    pub fn a(&self) -> ItemId {
        self.a
    }

    /// The larger item id.
    pub fn b(&self) -> ItemId {
        self.b
    }

    /// True if either side of the pair is `item`.
    pub fn contains(&self, item: ItemId) -> bool {
        self.a == item || self.b == item
    }

    /// The side of the pair that is not `item`, if `item` is a member.
    pub fn other(&self, item: ItemId) -> Option<ItemId> {
        if self.a == item {
            Some(self.b)
        } else if self.b == item {
            Some(self.a)
        } else {
            None
        }
    }
}

/// Sufficient statistics for the cosine similarity of one item pair.
///
/// Sums are kept in f64 even though ratings are f32; the widening keeps long
/// accumulations numerically stable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PairStats {
    pub sum_xy: f64,
    pub sum_xx: f64,
    pub sum_yy: f64,
    pub count: u64,
}

impl PairStats {
    /// Fold one co-rating into the running sums. `rating_a` belongs to the
    /// pair's smaller item, `rating_b` to the larger.
    pub fn observe(&mut self, rating_a: f32, rating_b: f32) {
        let x = rating_a as f64;
        let y = rating_b as f64;
        self.sum_xy += x * y;
        self.sum_xx += x * x;
        self.sum_yy += y * y;
        self.count += 1;
    }

    /// Pointwise field addition. Associative and commutative, which is what
    /// makes partition-local aggregation plus merge equivalent to a single
    /// sequential pass.
    pub fn merge(&mut self, other: &PairStats) {
        self.sum_xy += other.sum_xy;
        self.sum_xx += other.sum_xx;
        self.sum_yy += other.sum_yy;
        self.count += other.count;
    }
}

/// Finalized similarity for one item pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimilarityRecord {
    pub item_a: ItemId,
    pub item_b: ItemId,
    pub score: f64,
    pub pair_count: u64,
}

impl SimilarityRecord {
    /// The side of the pair that is not `item`, if `item` is a member.
    pub fn other(&self, item: ItemId) -> Option<ItemId> {
        if self.item_a == item {
            Some(self.item_b)
        } else if self.item_b == item {
            Some(self.item_a)
        } else {
            None
        }
    }
}

/// One row of a recommendation query result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub item: ItemId,
    pub score: f64,
    pub pair_count: u64,
    pub avg_rating: f32,
    pub name: String,
}

/// Errors surfaced by the similarity core.
#[derive(thiserror::Error, Debug)]
pub enum SimError {
    #[error("Item not found in catalog: {0}")]
    ItemNotFound(ItemId),

    #[error("Invalid rating value {value} for user {user}, item {item}")]
    InvalidRating { user: UserId, item: ItemId, value: f32 },
}

/// Convenience result type.
pub type SimResult<T> = Result<T, SimError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pair_key_canonical_order() {
        let k1 = PairKey::new(7, 3).unwrap();
        let k2 = PairKey::new(3, 7).unwrap();
        assert_eq!(k1, k2);
        assert_eq!(k1.a(), 3);
        assert_eq!(k1.b(), 7);
    }

    #[test]
    fn test_pair_key_rejects_self_pair() {
        assert!(PairKey::new(5, 5).is_none());
    }

    #[test]
    fn test_ratings_travel_with_canonical_slot() {
        let (key, ra, rb) = PairKey::with_ratings(9, 1.0, 2, 4.5).unwrap();
        assert_eq!(key.a(), 2);
        assert_eq!(key.b(), 9);
        assert_eq!(ra, 4.5);
        assert_eq!(rb, 1.0);
    }

    #[test]
    fn test_pair_key_other() {
        let key = PairKey::new(1, 2).unwrap();
        assert_eq!(key.other(1), Some(2));
        assert_eq!(key.other(2), Some(1));
        assert_eq!(key.other(3), None);
    }

    #[test]
    fn test_stats_observe() {
        let mut stats = PairStats::default();
        stats.observe(5.0, 4.0);
        stats.observe(3.0, 2.0);
        assert_eq!(stats.sum_xy, 26.0);
        assert_eq!(stats.sum_xx, 34.0);
        assert_eq!(stats.sum_yy, 20.0);
        assert_eq!(stats.count, 2);
    }

    #[test]
    fn test_stats_merge_matches_sequential() {
        let mut whole = PairStats::default();
        whole.observe(5.0, 4.0);
        whole.observe(3.0, 2.0);
        whole.observe(1.0, 1.0);

        let mut left = PairStats::default();
        left.observe(5.0, 4.0);
        let mut right = PairStats::default();
        right.observe(3.0, 2.0);
        right.observe(1.0, 1.0);
        left.merge(&right);

        assert_eq!(left, whole);
    }
}
