//! Filter to keep only movies that fit a browse mood.

use crate::traits::Filter;
use anyhow::Result;
use classifier::{BrowseMood, MoodProfile};
use data_loader::Movie;
use rayon::prelude::*;

/// Keeps movies that carry at least one of the mood's positive genres and
/// none of its negative ones.
///
/// ## Algorithm
/// Runs the profile check over the movies with a parallel iterator;
/// rayon's `collect` into a Vec keeps input order.
pub struct MoodFilter {
    mood: BrowseMood,
    profile: MoodProfile,
}

impl MoodFilter {
    pub fn new(mood: BrowseMood) -> Self {
        Self {
            mood,
            profile: mood.profile(),
        }
    }

    pub fn mood(&self) -> BrowseMood {
        self.mood
    }
}

impl Filter for MoodFilter {
    fn name(&self) -> &str {
        "MoodFilter"
    }

    fn apply<'a>(&self, movies: Vec<&'a Movie>) -> Result<Vec<&'a Movie>> {
        let filtered: Vec<&Movie> = movies
            .into_par_iter()
            .filter(|movie| self.profile.matches(&movie.genre_ids))
            .collect();
        Ok(filtered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(id: u32, title: &str, genre_ids: Vec<u32>) -> Movie {
        Movie {
            id,
            title: title.to_string(),
            overview: String::new(),
            genre_ids,
            vote_average: 7.0,
            vote_count: 10,
            popularity: 1.0,
            release_date: String::new(),
            poster_path: String::new(),
            original_language: "en".to_string(),
        }
    }

    #[test]
    fn test_romantic_filter() {
        let amelie = movie(1, "Amélie", vec![35, 10749]);
        let dark_knight = movie(2, "The Dark Knight", vec![28, 18, 80]);

        let filter = MoodFilter::new(BrowseMood::Romantic);
        let filtered = filter.apply(vec![&amelie, &dark_knight]).unwrap();

        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].title, "Amélie");
    }

    #[test]
    fn test_movies_without_genres_never_pass() {
        let bare = movie(1, "Bare", vec![]);
        for mood in BrowseMood::ALL {
            let filtered = MoodFilter::new(mood).apply(vec![&bare]).unwrap();
            assert!(filtered.is_empty(), "{mood} let a genre-less movie through");
        }
    }

    #[test]
    fn test_order_is_preserved() {
        let movies: Vec<Movie> = (1..=200).map(|id| movie(id, "Toon", vec![16])).collect();
        let filtered = MoodFilter::new(BrowseMood::Happy)
            .apply(movies.iter().collect())
            .unwrap();
        let ids: Vec<u32> = filtered.iter().map(|m| m.id).collect();
        assert_eq!(ids, (1..=200).collect::<Vec<_>>());
    }
}
