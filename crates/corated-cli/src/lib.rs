//! Corated CLI library — CSV loading and console formatting around the core.

pub mod loader;
pub mod output;

pub use loader::{load_catalog, load_ratings, LoadError, LoadResult};
pub use output::{fit_name, header_line, render, result_line};
