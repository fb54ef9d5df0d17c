//! Free-text search filter.
//!
//! Matches the query, case-insensitively, against the title, the overview,
//! the display names of the movie's genres and the release date string.

use crate::traits::Filter;
use anyhow::Result;
use data_loader::Movie;
use rayon::prelude::*;

/// Keeps movies where any searchable field contains the query.
///
/// The query is lower-cased and trimmed once at construction. An empty
/// query lets everything through.
pub struct SearchFilter {
    query: String,
}

impl SearchFilter {
    pub fn new(query: &str) -> Self {
        Self {
            query: query.trim().to_lowercase(),
        }
    }

    /// The normalised query
    pub fn query(&self) -> &str {
        &self.query
    }

    fn matches(&self, movie: &Movie) -> bool {
        let q = self.query.as_str();
        movie.title.to_lowercase().contains(q)
            || movie.overview.to_lowercase().contains(q)
            || movie
                .genre_names()
                .iter()
                .any(|name| name.to_lowercase().contains(q))
            || movie.release_date.contains(q)
    }
}

impl Filter for SearchFilter {
    fn name(&self) -> &str {
        "SearchFilter"
    }

    fn apply<'a>(&self, movies: Vec<&'a Movie>) -> Result<Vec<&'a Movie>> {
        if self.query.is_empty() {
            return Ok(movies);
        }
        let filtered: Vec<&Movie> = movies
            .into_par_iter()
            .filter(|movie| self.matches(movie))
            .collect();
        Ok(filtered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(id: u32, title: &str, overview: &str, genre_ids: Vec<u32>, date: &str) -> Movie {
        Movie {
            id,
            title: title.to_string(),
            overview: overview.to_string(),
            genre_ids,
            vote_average: 7.0,
            vote_count: 10,
            popularity: 1.0,
            release_date: date.to_string(),
            poster_path: String::new(),
            original_language: "en".to_string(),
        }
    }

    #[test]
    fn test_search_fields() {
        let movies = vec![
            movie(1, "Heat", "A heist in Los Angeles", vec![80], "1995-12-15"),
            movie(2, "Up", "An old man and a balloon house", vec![16], "2009-05-28"),
            movie(3, "Alien", "In space no one can hear you scream", vec![27, 878], "1979-05-25"),
        ];
        let refs: Vec<&Movie> = movies.iter().collect();

        let by_title = SearchFilter::new("  HEAT ").apply(refs.clone()).unwrap();
        assert_eq!(by_title.iter().map(|m| m.id).collect::<Vec<_>>(), vec![1]);

        let by_overview = SearchFilter::new("balloon").apply(refs.clone()).unwrap();
        assert_eq!(by_overview[0].id, 2);

        let by_genre = SearchFilter::new("sci-fi").apply(refs.clone()).unwrap();
        assert_eq!(by_genre[0].id, 3);

        let by_year = SearchFilter::new("1979").apply(refs.clone()).unwrap();
        assert_eq!(by_year[0].id, 3);

        assert!(SearchFilter::new("zzz").apply(refs).unwrap().is_empty());
    }

    #[test]
    fn test_empty_query_passes_everything() {
        let movies = vec![movie(1, "Heat", "", vec![], "")];
        let filtered = SearchFilter::new("   ").apply(movies.iter().collect()).unwrap();
        assert_eq!(filtered.len(), 1);
    }
}
