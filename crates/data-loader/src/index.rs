//! Catalog building.
//!
//! Turns raw dataset text into a `Catalog`. Loading is forgiving at the row
//! level: blank lines, short rows, rows without a usable title and repeated
//! ids are all skipped. Only failing to read the file aborts.

use crate::error::Result;
use crate::parser;
use crate::types::*;
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, info};

/// Counters collected while building a catalog
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadStats {
    pub rows: usize,
    pub loaded: usize,
    pub skipped: usize,
    pub duplicates: usize,
}

impl Catalog {
    /// Load the catalog from a CSV file on disk
    pub fn load_from_file(path: &Path) -> Result<Self> {
        info!("Loading movie catalog from {}", path.display());
        let text = parser::read_text_lossy(path)?;
        let (catalog, stats) = Self::from_csv_str_with_stats(&text);
        info!(
            "Catalog ready: {} movies ({} rows, {} skipped, {} duplicate ids)",
            stats.loaded, stats.rows, stats.skipped, stats.duplicates
        );
        Ok(catalog)
    }

    /// Build a catalog from CSV text. The first line is the header.
    pub fn from_csv_str(text: &str) -> Self {
        Self::from_csv_str_with_stats(text).0
    }

    /// Same as `from_csv_str`, also returning what was skipped
    pub fn from_csv_str_with_stats(text: &str) -> (Self, LoadStats) {
        let mut catalog = Catalog::new();
        let mut stats = LoadStats::default();
        let mut seen: HashSet<MovieId> = HashSet::new();

        for (line_no, line) in text.lines().enumerate().skip(1) {
            if line.trim().is_empty() {
                continue;
            }
            stats.rows += 1;

            let values = match parser::split_row(line, line_no) {
                Ok(values) => values,
                Err(e) => {
                    debug!("Skipping row: {}", e);
                    stats.skipped += 1;
                    continue;
                }
            };

            // The id is claimed even when the row is then rejected
            let id = parser::row_id(&values, line_no);
            if !seen.insert(id) {
                debug!("Skipping duplicate movie id {} at line {}", id, line_no);
                stats.duplicates += 1;
                continue;
            }

            match parser::movie_from_fields(&values, id, line_no) {
                Ok(movie) => {
                    catalog.insert_movie(movie);
                    stats.loaded += 1;
                }
                Err(e) => {
                    debug!("Skipping row: {}", e);
                    stats.skipped += 1;
                }
            }
        }

        (catalog, stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DataLoadError;

    const HEADER: &str = "a,b,genre_ids,id,lang,orig,overview,pop,poster,date,title,video,vote,count";

    fn row(id: &str, title: &str, genres: &str, vote: &str) -> String {
        format!("0,0,\"{genres}\",{id},en,x,Overview,10.0,/p.jpg,2001-01-01,{title},False,{vote},50")
    }

    #[test]
    fn test_load_skips_short_and_blank_rows() {
        let text = [
            HEADER.to_string(),
            row("1", "Alpha", "[18]", "7.1"),
            String::new(),
            "1,2,3".to_string(),
            row("2", "Beta", "[35]", "6.0"),
        ]
        .join("\n");

        let (catalog, stats) = Catalog::from_csv_str_with_stats(&text);
        assert_eq!(catalog.len(), 2);
        assert_eq!(stats.rows, 3);
        assert_eq!(stats.skipped, 1);
    }

    #[test]
    fn test_first_duplicate_id_wins() {
        let text = [
            HEADER.to_string(),
            row("7", "First", "[18]", "7.1"),
            row("7", "Second", "[35]", "9.0"),
        ]
        .join("\n");

        let (catalog, stats) = Catalog::from_csv_str_with_stats(&text);
        assert_eq!(catalog.len(), 1);
        assert_eq!(stats.duplicates, 1);
        assert_eq!(catalog.get_movie(7).unwrap().title, "First");
    }

    #[test]
    fn test_untitled_row_still_claims_its_id() {
        let text = [
            HEADER.to_string(),
            row("7", "Untitled", "[18]", "7.1"),
            row("7", "Later", "[35]", "9.0"),
        ]
        .join("\n");

        let (catalog, stats) = Catalog::from_csv_str_with_stats(&text);
        assert!(catalog.is_empty());
        assert_eq!(stats.skipped, 1);
        assert_eq!(stats.duplicates, 1);
    }

    #[test]
    fn test_header_only() {
        let catalog = Catalog::from_csv_str(HEADER);
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_genre_index_built_on_load() {
        let text = [
            HEADER.to_string(),
            row("1", "Alpha", "[18, 18, 35]", "7.1"),
            row("2", "Beta", "[35]", "6.0"),
        ]
        .join("\n");

        let catalog = Catalog::from_csv_str(&text);
        assert_eq!(catalog.get_movies_by_genre(35), &[1, 2]);
        assert_eq!(catalog.get_movies_by_genre(18), &[1]);
        assert!(catalog.get_movies_by_genre(27).is_empty());
    }

    #[test]
    fn test_missing_file() {
        let err = Catalog::load_from_file(Path::new("does/not/exist.csv")).unwrap_err();
        assert!(matches!(err, DataLoadError::FileNotFound { .. }));
    }
}
