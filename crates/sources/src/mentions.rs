//! Title Mention Source - movies named in the assistant's reply
//!
//! ## Algorithm
//! 1. At construction, lower-case every title once and keep its first two
//!    space-separated words when it has at least two
//! 2. For a reply, keep every movie whose full title, or first two words,
//!    is a substring of the lower-cased reply
//! 3. Order the matches by vote average, highest first
//!
//! This is a heuristic. "The Matrix" also fires on "The Matrix Reloaded",
//! and short titles like "Up" fire on almost any text.

use crate::types::{Candidate, CandidateSource};
use data_loader::{Catalog, MovieId};
use rayon::prelude::*;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Lower-cased title keys for one movie
struct TitleKey {
    movie_id: MovieId,
    full: String,
    first_two: Option<String>,
}

impl TitleKey {
    fn new(movie_id: MovieId, title: &str) -> Self {
        let full = title.to_lowercase();
        let words: Vec<&str> = full.split(' ').collect();
        let first_two = (words.len() >= 2).then(|| words[..2].join(" "));
        Self {
            movie_id,
            full,
            first_two,
        }
    }

    fn mentioned_in(&self, text: &str) -> bool {
        text.contains(&self.full)
            || self
                .first_two
                .as_deref()
                .is_some_and(|prefix| text.contains(prefix))
    }
}

/// Finds catalog titles mentioned in free text
pub struct TitleMentionSource {
    catalog: Arc<Catalog>,
    keys: Vec<TitleKey>,
}

impl TitleMentionSource {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        let keys = catalog
            .movies()
            .iter()
            .map(|movie| TitleKey::new(movie.id, &movie.title))
            .collect();
        Self { catalog, keys }
    }

    /// Movies mentioned in `text`, best rated first, skipping `exclude`
    #[instrument(skip(self, text, exclude), fields(text_len = text.len()))]
    pub fn get_candidates(
        &self,
        text: &str,
        exclude: &HashSet<MovieId>,
        limit: usize,
    ) -> Vec<Candidate> {
        let text = text.to_lowercase();
        let matched: Vec<MovieId> = self
            .keys
            .par_iter()
            .filter(|key| !exclude.contains(&key.movie_id) && key.mentioned_in(&text))
            .map(|key| key.movie_id)
            .collect();
        debug!("Found {} title mentions", matched.len());

        let mut seen = HashSet::new();
        let mut candidates: Vec<Candidate> = matched
            .into_iter()
            .filter(|id| seen.insert(*id))
            .filter_map(|id| self.catalog.get_movie(id))
            .map(|movie| Candidate::new(movie.id, CandidateSource::TitleMention, movie.vote_average))
            .collect();

        candidates.sort_by(|a, b| b.base_score.total_cmp(&a.base_score));
        candidates.truncate(limit);
        candidates
    }
}
