//! Corated CLI — entry point.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use corated::{recommend, AggregateConfig, ItemCatalog, QueryParams, RatingStore, SimilarityTable};
use corated_cli::{loader, output};

#[derive(Parser)]
#[command(
    name = "corated",
    about = "Find the most similar, highest-quality items to a target item from sparse rating data",
    version
)]
struct Cli {
    /// Target item id to query.
    item: u32,

    /// Path to the ratings CSV (userId,movieId,rating[,timestamp]).
    #[arg(long, default_value = "ml-latest-small/ratings.csv")]
    ratings: PathBuf,

    /// Path to the item catalog CSV (movieId,title[,...]).
    #[arg(long, default_value = "ml-latest-small/movies.csv")]
    movies: PathBuf,

    /// Minimum similarity score (strict).
    #[arg(long, default_value_t = 0.95)]
    score_threshold: f64,

    /// Minimum number of co-rating users (strict).
    #[arg(long, default_value_t = 100)]
    co_occurrence_threshold: u64,

    /// Minimum average rating for a candidate.
    #[arg(long, default_value_t = 3.5)]
    rating_threshold: f32,

    /// Number of results to return.
    #[arg(long, short = 'k', default_value_t = 10)]
    top_k: usize,

    /// Shortlist cap applied before the rating gate.
    #[arg(long, default_value_t = 100)]
    candidate_cap: usize,

    /// Cap on rated items considered per user (bounds the pair blowup).
    #[arg(long)]
    max_items_per_user: Option<usize>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let start = Instant::now();
    let ratings = loader::load_ratings(&cli.ratings)
        .with_context(|| format!("loading ratings from {}", cli.ratings.display()))?;
    let catalog = loader::load_catalog(&cli.movies)
        .with_context(|| format!("loading catalog from {}", cli.movies.display()))?;
    let store = RatingStore::from_ratings(ratings)?;
    info!(elapsed = ?start.elapsed(), ratings = store.len(), "input loaded");

    let aggregate_config = AggregateConfig {
        max_items_per_user: cli.max_items_per_user,
    };
    let build_start = Instant::now();
    let table = SimilarityTable::build(&store, &aggregate_config);
    info!(elapsed = ?build_start.elapsed(), pairs = table.len(), "similarity table built");

    let params = QueryParams {
        score_threshold: cli.score_threshold,
        co_occurrence_threshold: cli.co_occurrence_threshold,
        rating_threshold: cli.rating_threshold,
        top_k: cli.top_k,
        candidate_cap: cli.candidate_cap,
    };
    let results = recommend(&table, &store, &catalog, cli.item, &params)?;

    let target_name = catalog.name(cli.item).unwrap_or("<unknown>");
    for line in output::render(params.top_k, target_name, &results) {
        println!("{line}");
    }
    if results.is_empty() {
        println!("{}", output::empty_note(cli.item));
    }

    Ok(())
}
