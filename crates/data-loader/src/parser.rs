//! Parser for the movie dataset CSV.
//!
//! Each data row has at least 14 comma-separated columns. The columns we
//! consume, by position:
//!
//! | idx | field             |
//! |-----|-------------------|
//! | 2   | genre ids `"[28, 12]"` |
//! | 3   | id                |
//! | 4   | original language |
//! | 6   | overview          |
//! | 7   | popularity        |
//! | 8   | poster path       |
//! | 9   | release date      |
//! | 10  | title             |
//! | 12  | vote average      |
//! | 13  | vote count        |

use crate::error::{DataLoadError, Result};
use crate::types::*;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Minimum number of columns a data row must have
pub const MIN_COLUMNS: usize = 14;

const COL_GENRE_IDS: usize = 2;
const COL_ID: usize = 3;
const COL_LANGUAGE: usize = 4;
const COL_OVERVIEW: usize = 6;
const COL_POPULARITY: usize = 7;
const COL_POSTER_PATH: usize = 8;
const COL_RELEASE_DATE: usize = 9;
const COL_TITLE: usize = 10;
const COL_VOTE_AVERAGE: usize = 12;
const COL_VOTE_COUNT: usize = 13;

const PLACEHOLDER_TITLE: &str = "Untitled";
const DEFAULT_LANGUAGE: &str = "en";

/// Read a whole file, replacing invalid UTF-8 rather than failing.
///
/// Scraped datasets regularly carry a few mis-encoded bytes; losing a
/// character in an overview is better than losing the row.
pub(crate) fn read_text_lossy(path: &Path) -> Result<String> {
    let mut file = File::open(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => DataLoadError::FileNotFound {
            path: path.display().to_string(),
        },
        _ => DataLoadError::IoError(e),
    })?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Split one CSV line into fields.
///
/// A `"` toggles quoted mode and is dropped; commas inside quotes belong to
/// the field. Doubled quotes are not treated as escapes.
///
/// Example: `1,"Action, Drama",x` -> ["1", "Action, Drama", "x"]
pub fn parse_csv_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => fields.push(std::mem::take(&mut current)),
            _ => current.push(ch),
        }
    }
    fields.push(current);
    fields
}

/// Extract genre ids from a bracketed list such as `"[28, 12, 878]"`.
///
/// Tokens that are not integers are dropped; a field without brackets
/// yields an empty list.
pub fn parse_genre_ids(field: &str) -> Vec<GenreId> {
    let cleaned = field.replace('"', "");
    let Some(start) = cleaned.find('[') else {
        return Vec::new();
    };
    let Some(len) = cleaned[start + 1..].find(']') else {
        return Vec::new();
    };
    cleaned[start + 1..start + 1 + len]
        .split(',')
        .filter_map(|token| token.trim().parse::<GenreId>().ok())
        .collect()
}

/// Split a data row, rejecting rows with fewer than `MIN_COLUMNS` fields
pub fn split_row(line: &str, line_no: usize) -> Result<Vec<String>> {
    let values = parse_csv_line(line);
    if values.len() < MIN_COLUMNS {
        return Err(DataLoadError::FieldCountMismatch {
            expected: MIN_COLUMNS,
            found: values.len(),
            line: line_no,
        });
    }
    Ok(values)
}

/// The row's id, or `line_no` when the id column is missing, zero or not
/// a number.
///
/// Rows claim their id before title validation, so an untitled row still
/// shadows a later row with the same id.
pub fn row_id(values: &[String], line_no: usize) -> MovieId {
    values
        .get(COL_ID)
        .and_then(|raw| parse_u32(raw))
        .filter(|&id| id != 0)
        .unwrap_or(line_no as MovieId)
}

/// Build a Movie from split fields, rejecting rows without a usable title
pub fn movie_from_fields(values: &[String], id: MovieId, line_no: usize) -> Result<Movie> {
    let title = values[COL_TITLE].as_str();
    if title.is_empty() || title == PLACEHOLDER_TITLE {
        return Err(DataLoadError::ValidationError(format!(
            "line {line_no}: missing title"
        )));
    }

    let language = match values[COL_LANGUAGE].as_str() {
        "" => DEFAULT_LANGUAGE.to_string(),
        lang => lang.to_string(),
    };

    Ok(Movie {
        id,
        title: title.to_string(),
        overview: values[COL_OVERVIEW].clone(),
        genre_ids: parse_genre_ids(&values[COL_GENRE_IDS]),
        vote_average: parse_f32(&values[COL_VOTE_AVERAGE]).unwrap_or(0.0),
        vote_count: parse_u32(&values[COL_VOTE_COUNT]).unwrap_or(0),
        popularity: parse_f32(&values[COL_POPULARITY]).unwrap_or(0.0),
        release_date: values[COL_RELEASE_DATE].clone(),
        poster_path: values[COL_POSTER_PATH].clone(),
        original_language: language,
    })
}

/// Parse one data row into a Movie.
///
/// `line_no` is the row's position in the file (the header is line 0) and
/// doubles as the id when the id column is missing, zero or not a number.
pub fn parse_movie_row(line: &str, line_no: usize) -> Result<Movie> {
    let values = split_row(line, line_no)?;
    let id = row_id(&values, line_no);
    movie_from_fields(&values, id, line_no)
}

/// Parse a float column; NaN and infinities count as unparsable.
fn parse_f32(raw: &str) -> Option<f32> {
    raw.trim().parse::<f32>().ok().filter(|v| v.is_finite())
}

/// Parse the leading run of digits, so "1200.0" and "603abc" both count.
///
/// Returns None when the column does not start with a digit or overflows.
fn parse_u32(raw: &str) -> Option<u32> {
    let raw = raw.trim_start();
    let raw = raw.strip_prefix('+').unwrap_or(raw);
    let end = raw
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(raw.len());
    raw[..end].parse().ok()
}
