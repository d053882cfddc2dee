//! Console formatting for recommendation results.

use corated::{ItemId, Recommendation};

const NAME_WIDTH: usize = 40;

/// Truncate a display name to the column width, marking the cut with `...`.
pub fn fit_name(name: &str) -> String {
    if name.chars().count() > NAME_WIDTH {
        let cut: String = name.chars().take(NAME_WIDTH - 3).collect();
        format!("{cut}...")
    } else {
        name.to_string()
    }
}

/// The header line above a result listing.
pub fn header_line(top_k: usize, target_name: &str) -> String {
    format!("Top {top_k} similar movies for {target_name} :")
}

/// One aligned result row.
pub fn result_line(rec: &Recommendation) -> String {
    format!(
        "{:<40} \tscore: {:<6.4} \tstrength: {:<6} \trating: {:<6.2}",
        fit_name(&rec.name),
        rec.score,
        rec.pair_count,
        rec.avg_rating
    )
}

/// Render a whole query result as lines, header included.
pub fn render(top_k: usize, target_name: &str, results: &[Recommendation]) -> Vec<String> {
    let mut lines = Vec::with_capacity(results.len() + 1);
    lines.push(header_line(top_k, target_name));
    lines.extend(results.iter().map(result_line));
    lines
}

/// A short note for queries that matched nothing.
pub fn empty_note(target: ItemId) -> String {
    format!("No similar movies passed the thresholds for item {target}.")
}
