//! Ranking for browse results.
//!
//! ## Score
//! `0.7 * vote_average + 0.3 * (popularity / 100)`
//!
//! Popularity in the dataset runs into the hundreds, so dividing by 100
//! keeps it from drowning out the vote average.

use crate::filter_pipeline::FilterPipeline;
use crate::filters::{MoodFilter, SearchFilter};
use anyhow::Result;
use classifier::BrowseMood;
use data_loader::{Catalog, Movie};
use std::cmp::Ordering;
use tracing::debug;

const VOTE_WEIGHT: f32 = 0.7;
const POPULARITY_WEIGHT: f32 = 0.3;

/// Weighted score used to order browse results and genre fallbacks
pub fn ranking_score(movie: &Movie) -> f32 {
    VOTE_WEIGHT * movie.vote_average + POPULARITY_WEIGHT * (movie.popularity / 100.0)
}

/// Compare two movies by score, highest first
pub fn by_score_desc(a: &Movie, b: &Movie) -> Ordering {
    ranking_score(b).total_cmp(&ranking_score(a))
}

/// Sort movies for display.
///
/// With a non-empty query, titles starting with it come first. Within each
/// group movies are ordered by `ranking_score`, highest first. The sort is
/// stable, so equal scores keep their catalog order.
pub fn rank(movies: &mut [&Movie], query: Option<&str>) {
    let prefix = query
        .map(|q| q.trim().to_lowercase())
        .filter(|q| !q.is_empty());

    match prefix {
        Some(prefix) => movies.sort_by_cached_key(|movie| {
            let starts = movie.title.to_lowercase().starts_with(&prefix);
            (!starts, ScoreKey(ranking_score(movie)))
        }),
        None => movies.sort_by(|a, b| by_score_desc(a, b)),
    }
}

/// Descending float key for cached-key sorting
#[derive(PartialEq)]
struct ScoreKey(f32);

impl Eq for ScoreKey {}

impl PartialOrd for ScoreKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ScoreKey {
    fn cmp(&self, other: &Self) -> Ordering {
        other.0.total_cmp(&self.0)
    }
}

/// Filter the catalog by mood and search query, then rank.
///
/// Without a mood or query this returns the whole catalog, ranked.
pub fn filter_and_rank<'a>(
    catalog: &'a Catalog,
    mood: Option<BrowseMood>,
    query: Option<&str>,
) -> Result<Vec<&'a Movie>> {
    let mut pipeline = FilterPipeline::new();
    if let Some(mood) = mood {
        pipeline = pipeline.add_filter(MoodFilter::new(mood));
    }
    if let Some(query) = query {
        pipeline = pipeline.add_filter(SearchFilter::new(query));
    }

    let mut movies = pipeline.apply(catalog.movies().iter().collect())?;
    rank(&mut movies, query);
    debug!(
        "Ranked {} of {} movies (mood: {:?}, query: {:?})",
        movies.len(),
        catalog.len(),
        mood,
        query
    );
    Ok(movies)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(id: u32, title: &str, vote: f32, popularity: f32) -> Movie {
        Movie {
            id,
            title: title.to_string(),
            overview: String::new(),
            genre_ids: vec![35],
            vote_average: vote,
            vote_count: 10,
            popularity,
            release_date: String::new(),
            poster_path: String::new(),
            original_language: "en".to_string(),
        }
    }

    #[test]
    fn test_ranking_score() {
        let m = movie(1, "A", 8.0, 200.0);
        assert!((ranking_score(&m) - 6.2).abs() < 1e-5);
    }

    #[test]
    fn test_rank_by_score() {
        let low = movie(1, "Low", 5.0, 10.0);
        let high = movie(2, "High", 9.0, 10.0);
        let mid = movie(3, "Mid", 7.0, 10.0);
        let mut movies = vec![&low, &high, &mid];
        rank(&mut movies, None);
        let ids: Vec<u32> = movies.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }

    #[test]
    fn test_rank_title_prefix_first() {
        let inside = movie(1, "The Star Wars Story", 9.5, 100.0);
        let prefix_low = movie(2, "Star Trek", 6.0, 10.0);
        let prefix_high = movie(3, "Star Wars", 8.0, 10.0);
        let mut movies = vec![&inside, &prefix_low, &prefix_high];
        rank(&mut movies, Some("STAR"));
        let ids: Vec<u32> = movies.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![3, 2, 1]);
    }

    #[test]
    fn test_rank_is_stable_for_ties() {
        let a = movie(1, "A", 7.0, 10.0);
        let b = movie(2, "B", 7.0, 10.0);
        let c = movie(3, "C", 7.0, 10.0);
        let mut movies = vec![&a, &b, &c];
        rank(&mut movies, Some("zzz"));
        let ids: Vec<u32> = movies.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_filter_and_rank_whole_catalog() {
        let mut catalog = Catalog::new();
        catalog.insert_movie(movie(1, "Low", 5.0, 10.0));
        catalog.insert_movie(movie(2, "High", 9.0, 10.0));

        let ranked = filter_and_rank(&catalog, None, None).unwrap();
        assert_eq!(ranked.iter().map(|m| m.id).collect::<Vec<_>>(), vec![2, 1]);
    }
}
