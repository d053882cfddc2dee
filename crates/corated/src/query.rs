//! Top-K recommendation queries over a built similarity table.

use tracing::debug;

use crate::catalog::ItemCatalog;
use crate::similarity::SimilarityTable;
use crate::store::RatingStore;
use crate::types::{ItemId, Recommendation, SimError, SimResult, SimilarityRecord};

/// Quality thresholds and result bounds for one query.
///
/// All knobs are explicit parameters rather than baked-in constants so each
/// can be exercised independently in tests.
#[derive(Debug, Clone)]
pub struct QueryParams {
    /// Candidates must score strictly above this.
    pub score_threshold: f64,
    /// Candidates must have been co-rated by strictly more users than this.
    pub co_occurrence_threshold: u64,
    /// Candidates with an average rating below this are skipped.
    pub rating_threshold: f32,
    /// Maximum number of results returned.
    pub top_k: usize,
    /// Shortlist size after the score gate, before the rating gate.
    pub candidate_cap: usize,
}

impl Default for QueryParams {
    fn default() -> Self {
        Self {
            score_threshold: 0.95,
            co_occurrence_threshold: 100,
            rating_threshold: 3.5,
            top_k: 10,
            candidate_cap: 100,
        }
    }
}

/// Find the top-K most similar, highest-quality items to `target`.
///
/// Two-stage filter: a cheap score/co-occurrence gate shortlists and caps the
/// candidates, then the per-candidate average-rating lookup runs only on the
/// shortlist. Returns [`SimError::ItemNotFound`] when `target` is absent from
/// the catalog; an empty result is not an error.
///
/// Pure read over the table and store, safe to call concurrently.
pub fn recommend(
    table: &SimilarityTable,
    store: &RatingStore,
    catalog: &impl ItemCatalog,
    target: ItemId,
    params: &QueryParams,
) -> SimResult<Vec<Recommendation>> {
    if catalog.name(target).is_none() {
        return Err(SimError::ItemNotFound(target));
    }

    let mut candidates: Vec<&SimilarityRecord> = table
        .records_for(target)
        .filter(|r| r.score > params.score_threshold)
        .filter(|r| r.pair_count > params.co_occurrence_threshold)
        .collect();

    // Score descending; equal scores break ties on the candidate item id so
    // ordering is reproducible.
    candidates.sort_by(|x, y| {
        y.score
            .partial_cmp(&x.score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| x.other(target).cmp(&y.other(target)))
    });
    candidates.truncate(params.candidate_cap);

    debug!(target, shortlisted = candidates.len(), "score gate applied");

    let mut results = Vec::new();
    for record in candidates {
        if results.len() >= params.top_k {
            break;
        }
        let Some(candidate) = record.other(target) else {
            continue;
        };
        // No ratings at all fails the gate the same way a low average does;
        // it is never coerced to a numeric zero.
        let Some(avg_rating) = store.average_rating(candidate) else {
            continue;
        };
        if avg_rating < params.rating_threshold {
            continue;
        }
        let Some(name) = catalog.name(candidate) else {
            continue;
        };
        results.push(Recommendation {
            item: candidate,
            score: record.score,
            pair_count: record.pair_count,
            avg_rating,
            name: name.to_string(),
        });
    }

    Ok(results)
}
