//! CSV loading for MovieLens-style rating and catalog files.

use std::path::Path;

use corated::{ItemId, MemoryCatalog, Rating, UserId};
use tracing::info;

/// Errors raised while loading input files.
#[derive(thiserror::Error, Debug)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Malformed record at line {line}: {message}")]
    MalformedRecord { line: u64, message: String },
}

/// Convenience result type for the loader.
pub type LoadResult<T> = Result<T, LoadError>;

fn malformed(line: u64, message: impl Into<String>) -> LoadError {
    LoadError::MalformedRecord {
        line,
        message: message.into(),
    }
}

fn parse_field<T: std::str::FromStr>(
    record: &csv::StringRecord,
    idx: usize,
    name: &str,
    line: u64,
) -> LoadResult<T> {
    let raw = record
        .get(idx)
        .ok_or_else(|| malformed(line, format!("missing {name} column")))?;
    raw.trim()
        .parse()
        .map_err(|_| malformed(line, format!("invalid {name}: {raw:?}")))
}

/// Load ratings from a headered `userId,movieId,rating[,timestamp]` CSV.
///
/// Any malformed row aborts the load; the aggregator never sees partial
/// input. Trailing columns (the MovieLens timestamp) are ignored.
pub fn load_ratings(path: &Path) -> LoadResult<Vec<Rating>> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut ratings = Vec::new();

    for result in reader.records() {
        let record = result?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        let user: UserId = parse_field(&record, 0, "userId", line)?;
        let item: ItemId = parse_field(&record, 1, "movieId", line)?;
        let value: f32 = parse_field(&record, 2, "rating", line)?;
        ratings.push(Rating::new(user, item, value));
    }

    info!(rows = ratings.len(), path = %path.display(), "ratings loaded");
    Ok(ratings)
}

/// Load the item catalog from a headered `movieId,title[,...]` CSV.
///
/// Titles are decoded lossily: MovieLens ships these files in ISO-8859-1 and
/// a stray non-UTF-8 byte in a title must not abort the load.
pub fn load_catalog(path: &Path) -> LoadResult<MemoryCatalog> {
    let mut reader = csv::ReaderBuilder::new().from_path(path)?;
    let mut catalog = MemoryCatalog::new();

    let mut record = csv::ByteRecord::new();
    while reader.read_byte_record(&mut record)? {
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        let raw_id = record
            .get(0)
            .ok_or_else(|| malformed(line, "missing movieId column"))?;
        let item: ItemId = std::str::from_utf8(raw_id)
            .ok()
            .and_then(|s| s.trim().parse().ok())
            .ok_or_else(|| malformed(line, format!("invalid movieId: {}", String::from_utf8_lossy(raw_id))))?;
        let title = record
            .get(1)
            .ok_or_else(|| malformed(line, "missing title column"))?;
        catalog.insert(item, String::from_utf8_lossy(title).into_owned());
    }

    info!(entries = catalog.len(), path = %path.display(), "catalog loaded");
    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use super::*;
    use corated::ItemCatalog;
    use std::io::Write;

    fn write_temp(contents: &[u8]) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_ratings() {
        let file = write_temp(b"userId,movieId,rating,timestamp\n1,31,2.5,1260759144\n1,1029,3.0,1260759179\n");
        let ratings = load_ratings(file.path()).unwrap();
        assert_eq!(ratings.len(), 2);
        assert_eq!(ratings[0], Rating::new(1, 31, 2.5));
        assert_eq!(ratings[1], Rating::new(1, 1029, 3.0));
    }

    #[test]
    fn test_load_ratings_without_timestamp_column() {
        let file = write_temp(b"userId,movieId,rating\n7,42,4.0\n");
        let ratings = load_ratings(file.path()).unwrap();
        assert_eq!(ratings, vec![Rating::new(7, 42, 4.0)]);
    }

    #[test]
    fn test_malformed_rating_aborts() {
        let file = write_temp(b"userId,movieId,rating\n1,31,2.5\n1,oops,3.0\n");
        let err = load_ratings(file.path()).unwrap_err();
        assert!(matches!(err, LoadError::MalformedRecord { line: 3, .. }));
    }

    #[test]
    fn test_load_catalog() {
        let file = write_temp(b"movieId,title,genres\n1,Toy Story (1995),Animation\n2,Jumanji (1995),Adventure\n");
        let catalog = load_catalog(file.path()).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.name(1), Some("Toy Story (1995)"));
        assert_eq!(catalog.name(2), Some("Jumanji (1995)"));
    }

    #[test]
    fn test_catalog_title_with_non_utf8_bytes() {
        // 0xE9 is 'é' in ISO-8859-1; lossy decoding keeps the row.
        let file = write_temp(b"movieId,title\n3,Am\xE9lie (2001)\n");
        let catalog = load_catalog(file.path()).unwrap();
        assert_eq!(catalog.len(), 1);
        assert!(catalog.name(3).unwrap().starts_with("Am"));
    }

    #[test]
    fn test_catalog_invalid_id_aborts() {
        let file = write_temp(b"movieId,title\nnope,Broken\n");
        assert!(load_catalog(file.path()).is_err());
    }
}
