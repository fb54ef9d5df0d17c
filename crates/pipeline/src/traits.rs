//! The `Filter` trait implemented by every browse filter.

use anyhow::Result;
use data_loader::Movie;

/// A predicate stage over borrowed catalog movies.
///
/// Implementations must keep the relative order of the movies they let
/// through; ranking relies on catalog order to break ties.
pub trait Filter: Send + Sync {
    /// Short name used in pipeline logs
    fn name(&self) -> &str;

    /// Keep the movies that pass, in input order
    fn apply<'a>(&self, movies: Vec<&'a Movie>) -> Result<Vec<&'a Movie>>;
}
