//! Corated — item-to-item cosine similarity over sparse user-item ratings.
//!
//! The pipeline runs strictly forward: a read-only [`RatingStore`] feeds the
//! pair aggregator, whose sufficient statistics are scored into an immutable
//! [`SimilarityTable`], against which [`recommend`] serves cheap, repeatable
//! top-K queries.

pub mod aggregate;
pub mod catalog;
pub mod query;
pub mod similarity;
pub mod store;
pub mod types;

pub use aggregate::{aggregate, aggregate_parallel, merge_maps, AggregateConfig};
pub use catalog::{ItemCatalog, MemoryCatalog};
pub use query::{recommend, QueryParams};
pub use similarity::{cosine_score, SimilarityTable};
pub use store::RatingStore;
pub use types::*;
