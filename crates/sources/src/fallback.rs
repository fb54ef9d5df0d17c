//! Fallback sources used when the assistant's reply names too few movies.
//!
//! - `GenreFallbackSource`: genres from the mood detected in the user's
//!   message, or failing that the genres it names directly
//! - `TopRatedSource`: anything with a high vote average

use crate::types::{Candidate, CandidateSource};
use classifier::{detect_genres, detect_mood};
use data_loader::{Catalog, GenreId, Movie, MovieId};
use pipeline::{by_score_desc, ranking_score};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Genres inferred from a user's message, and which tier they came from
#[derive(Debug, Clone, PartialEq)]
pub struct GenreHint {
    pub genres: Vec<GenreId>,
    pub source: CandidateSource,
}

impl GenreHint {
    /// Mood genres win; otherwise genres named in the text; otherwise None
    pub fn from_query(query: &str) -> Option<Self> {
        if let Some(mood) = detect_mood(query) {
            debug!("Detected mood '{}' in query", mood);
            return Some(Self {
                genres: mood.genres().to_vec(),
                source: CandidateSource::MoodMatch,
            });
        }
        let genres = detect_genres(query);
        (!genres.is_empty()).then_some(Self {
            genres,
            source: CandidateSource::GenreMatch,
        })
    }
}

/// Suggests movies in the genres the user's message points at
pub struct GenreFallbackSource {
    catalog: Arc<Catalog>,
}

impl GenreFallbackSource {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }

    /// Best-scoring movies for the query's genres, skipping `exclude`
    #[instrument(skip(self, exclude))]
    pub fn get_candidates(
        &self,
        query: &str,
        exclude: &HashSet<MovieId>,
        limit: usize,
    ) -> Vec<Candidate> {
        let Some(hint) = GenreHint::from_query(query) else {
            debug!("No mood or genre detected in query");
            return Vec::new();
        };

        let mut matches: Vec<&Movie> = self
            .catalog
            .movies()
            .iter()
            .filter(|movie| !exclude.contains(&movie.id) && movie.has_any_genre(&hint.genres))
            .collect();
        matches.sort_by(|a, b| by_score_desc(a, b));
        debug!("{} movies match genres {:?}", matches.len(), hint.genres);

        matches
            .into_iter()
            .take(limit)
            .map(|movie| Candidate::new(movie.id, hint.source, ranking_score(movie)))
            .collect()
    }
}

/// Default vote average a movie needs to count as top rated
pub const DEFAULT_MIN_VOTE: f32 = 7.0;

/// Highest vote averages in the catalog
pub struct TopRatedSource {
    catalog: Arc<Catalog>,
    min_vote: f32,
}

impl TopRatedSource {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self {
            catalog,
            min_vote: DEFAULT_MIN_VOTE,
        }
    }

    /// Configure the vote threshold (default: 7.0)
    pub fn with_min_vote(mut self, min_vote: f32) -> Self {
        self.min_vote = min_vote;
        self
    }

    pub fn get_candidates(&self, exclude: &HashSet<MovieId>, limit: usize) -> Vec<Candidate> {
        let mut rated: Vec<&Movie> = self
            .catalog
            .movies()
            .iter()
            .filter(|movie| !exclude.contains(&movie.id) && movie.vote_average >= self.min_vote)
            .collect();
        rated.sort_by(|a, b| b.vote_average.total_cmp(&a.vote_average));

        rated
            .into_iter()
            .take(limit)
            .map(|movie| Candidate::new(movie.id, CandidateSource::TopRated, movie.vote_average))
            .collect()
    }
}
