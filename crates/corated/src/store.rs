//! In-memory rating store with per-user and per-item indexes.

use std::collections::HashMap;

use crate::types::{ItemId, Rating, SimError, SimResult, UserId};

/// Running sum and count for one item's ratings.
#[derive(Debug, Clone, Copy, Default)]
struct ItemTotals {
    sum: f64,
    count: u64,
}

/// Read-only collection of rating observations.
///
/// Built once at load time and never mutated afterwards; queries and
/// aggregation only borrow it. Duplicate (user, item) rows are kept as
/// independent observations.
#[derive(Debug, Clone)]
pub struct RatingStore {
    ratings: Vec<Rating>,
    by_user: HashMap<UserId, Vec<(ItemId, f32)>>,
    item_totals: HashMap<ItemId, ItemTotals>,
}

impl RatingStore {
    /// Build a store from raw observations.
    ///
    /// Rejects non-finite rating values with [`SimError::InvalidRating`]
    /// rather than letting NaN poison every downstream sum.
    pub fn from_ratings<I>(ratings: I) -> SimResult<Self>
    where
        I: IntoIterator<Item = Rating>,
    {
        let ratings: Vec<Rating> = ratings.into_iter().collect();

        let mut by_user: HashMap<UserId, Vec<(ItemId, f32)>> = HashMap::new();
        let mut item_totals: HashMap<ItemId, ItemTotals> = HashMap::new();

        for r in &ratings {
            if !r.value.is_finite() {
                return Err(SimError::InvalidRating {
                    user: r.user,
                    item: r.item,
                    value: r.value,
                });
            }
            by_user.entry(r.user).or_default().push((r.item, r.value));
            let totals = item_totals.entry(r.item).or_default();
            totals.sum += r.value as f64;
            totals.count += 1;
        }

        Ok(Self {
            ratings,
            by_user,
            item_totals,
        })
    }

    /// Number of rating observations.
    pub fn len(&self) -> usize {
        self.ratings.len()
    }

    /// True if the store holds no observations.
    pub fn is_empty(&self) -> bool {
        self.ratings.is_empty()
    }

    /// Number of distinct users.
    pub fn user_count(&self) -> usize {
        self.by_user.len()
    }

    /// All rating observations, in load order.
    pub fn ratings(&self) -> &[Rating] {
        &self.ratings
    }

    /// The (item, rating) observations of one user, in load order.
    pub fn items_of(&self, user: UserId) -> &[(ItemId, f32)] {
        self.by_user.get(&user).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Iterate users and their (item, rating) observations.
    pub fn users(&self) -> impl Iterator<Item = (UserId, &[(ItemId, f32)])> {
        self.by_user.iter().map(|(u, items)| (*u, items.as_slice()))
    }

    /// Arithmetic mean of all ratings for `item` across all users.
    ///
    /// `None` means the item has no ratings at all — distinct from a
    /// legitimately low average, and never coerced to a numeric default.
    pub fn average_rating(&self, item: ItemId) -> Option<f32> {
        let totals = self.item_totals.get(&item)?;
        if totals.count == 0 {
            return None;
        }
        Some((totals.sum / totals.count as f64) as f32)
    }
}
