//! # Recommendation Orchestrator
//!
//! Ties the catalog, the filter engine and the candidate sources together:
//!
//! - `browse`: mood filter, search, ranking and one page of results
//! - `extract_recommendations`: turn an assistant reply into picks using the
//!   title, genre and top-rated tiers in that order
//! - `suggest_from_context`: quick genre picks for when the relay is down

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{debug, info};

use classifier::{context_genres, BrowseMood};
use data_loader::{Catalog, Movie, MovieId};
use pipeline::{filter_and_rank, paginate, Page, PAGE_SIZE};
use sources::{Candidate, CandidateSource, GenreFallbackSource, TitleMentionSource, TopRatedSource};

/// A movie picked for the user, with the reason it was picked
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovieRecommendation {
    pub movie_id: MovieId,
    pub title: String,
    pub genres: Vec<String>,
    pub year: Option<u16>,
    pub score: f32,
    pub vote_average: f32,
    pub source: CandidateSource,
    pub explanation: String,
}

impl MovieRecommendation {
    fn from_candidate(movie: &Movie, candidate: &Candidate) -> Self {
        Self {
            movie_id: movie.id,
            title: movie.title.clone(),
            genres: movie.genre_names().into_iter().map(String::from).collect(),
            year: movie.year(),
            score: candidate.base_score,
            vote_average: movie.vote_average,
            source: candidate.source,
            explanation: explain(candidate.source).to_string(),
        }
    }
}

fn explain(source: CandidateSource) -> &'static str {
    match source {
        CandidateSource::TitleMention => "Mentioned in the conversation",
        CandidateSource::MoodMatch => "Fits the mood you described",
        CandidateSource::GenreMatch => "Matches the genres you asked for",
        CandidateSource::TopRated => "One of the highest rated movies",
    }
}

/// Quick-suggestion score: vote average weighted over raw popularity
fn context_score(movie: &Movie) -> f32 {
    movie.vote_average * 0.7 + movie.popularity * 0.3
}

pub struct RecommendationOrchestrator {
    catalog: Arc<Catalog>,
    mentions: TitleMentionSource,
    genre_fallback: GenreFallbackSource,
    top_rated: TopRatedSource,
}

impl RecommendationOrchestrator {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self {
            mentions: TitleMentionSource::new(catalog.clone()),
            genre_fallback: GenreFallbackSource::new(catalog.clone()),
            top_rated: TopRatedSource::new(catalog.clone()),
            catalog,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// One page of the catalog filtered by mood and search text
    pub fn browse(
        &self,
        mood: Option<BrowseMood>,
        query: Option<&str>,
        page: usize,
    ) -> Result<Page<&Movie>> {
        let start = Instant::now();
        let ranked = filter_and_rank(&self.catalog, mood, query)
            .context("Failed to filter catalog")?;
        let page = paginate(&ranked, page, PAGE_SIZE);
        debug!(
            "Browse matched {} movies, page {}/{} in {:.2?}",
            page.total,
            page.page,
            page.total_pages,
            start.elapsed()
        );
        Ok(page)
    }

    /// Movies for an assistant reply, at most `max_results`, no repeats.
    ///
    /// Titles named in `assistant_text` come first. Any shortfall is filled
    /// from the genres behind `user_query`, then from top-rated movies.
    pub fn extract_recommendations(
        &self,
        assistant_text: &str,
        user_query: &str,
        max_results: usize,
    ) -> Vec<MovieRecommendation> {
        let mut seen: HashSet<MovieId> = HashSet::new();
        let mut picked: Vec<Candidate> = Vec::with_capacity(max_results);

        let mentioned = self.mentions.get_candidates(assistant_text, &seen, max_results);
        let mention_count = mentioned.len();
        Self::take_into(&mut picked, &mut seen, mentioned, max_results);

        let genre_count = self.fill_from_fallbacks(user_query, &mut picked, &mut seen, max_results);

        info!(
            "Extracted {} recommendations: mentions={}, fallbacks={}",
            picked.len(),
            mention_count,
            genre_count
        );
        self.to_recommendations(&picked)
    }

    /// Picks for a failed relay call, based on keywords in `user_query`.
    ///
    /// Falls back to the genre and top-rated tiers when no keyword hits or
    /// nothing in the catalog matches.
    pub fn suggest_from_context(&self, user_query: &str, max_results: usize) -> Vec<MovieRecommendation> {
        let genres = context_genres(user_query);
        let mut matches: Vec<&Movie> = self
            .catalog
            .movies()
            .iter()
            .filter(|movie| !genres.is_empty() && movie.has_any_genre(&genres))
            .collect();
        matches.sort_by(|a, b| context_score(b).total_cmp(&context_score(a)));

        let mut picked: Vec<Candidate> = matches
            .into_iter()
            .take(max_results)
            .map(|movie| Candidate::new(movie.id, CandidateSource::GenreMatch, context_score(movie)))
            .collect();

        if picked.is_empty() {
            debug!("No context genres for query, using fallback tiers");
            let mut seen = HashSet::new();
            self.fill_from_fallbacks(user_query, &mut picked, &mut seen, max_results);
        }
        info!("Suggested {} movies from context", picked.len());
        self.to_recommendations(&picked)
    }

    /// Genre tier then top-rated tier, each only while short.
    /// Returns how many candidates were added.
    fn fill_from_fallbacks(
        &self,
        user_query: &str,
        picked: &mut Vec<Candidate>,
        seen: &mut HashSet<MovieId>,
        max_results: usize,
    ) -> usize {
        let before = picked.len();
        if picked.len() < max_results {
            let wanted = max_results - picked.len();
            let genre = self.genre_fallback.get_candidates(user_query, seen, wanted);
            Self::take_into(picked, seen, genre, max_results);
        }
        if picked.len() < max_results {
            let wanted = max_results - picked.len();
            let top = self.top_rated.get_candidates(seen, wanted);
            Self::take_into(picked, seen, top, max_results);
        }
        picked.len() - before
    }

    fn take_into(
        picked: &mut Vec<Candidate>,
        seen: &mut HashSet<MovieId>,
        candidates: Vec<Candidate>,
        max_results: usize,
    ) {
        for candidate in candidates {
            if picked.len() >= max_results {
                break;
            }
            if seen.insert(candidate.movie_id) {
                picked.push(candidate);
            }
        }
    }

    fn to_recommendations(&self, candidates: &[Candidate]) -> Vec<MovieRecommendation> {
        candidates
            .iter()
            .filter_map(|candidate| {
                let movie = self.catalog.get_movie(candidate.movie_id)?;
                Some(MovieRecommendation::from_candidate(movie, candidate))
            })
            .collect()
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::build_test_catalog;
    use super::*;

    fn ids(recs: &[MovieRecommendation]) -> Vec<MovieId> {
        recs.iter().map(|r| r.movie_id).collect()
    }

    #[test]
    fn test_mentions_come_first() {
        let orchestrator = RecommendationOrchestrator::new(build_test_catalog());
        let recs = orchestrator.extract_recommendations(
            "Try The Matrix or maybe Inception!",
            "something exciting",
            6,
        );
        assert_eq!(&ids(&recs)[..2], &[2, 1]);
        assert_eq!(recs[0].source, CandidateSource::TitleMention);
        assert_eq!(recs[0].explanation, "Mentioned in the conversation");
        assert_eq!(recs.len(), 6);
    }

    #[test]
    fn test_no_duplicates_across_tiers() {
        let orchestrator = RecommendationOrchestrator::new(build_test_catalog());
        let recs = orchestrator.extract_recommendations("Superbad is great", "something funny", 10);
        let unique: HashSet<MovieId> = ids(&recs).into_iter().collect();
        assert_eq!(unique.len(), recs.len());
        assert_eq!(recs[0].movie_id, 4);
    }

    #[test]
    fn test_mood_tier_fills_shortfall() {
        let orchestrator = RecommendationOrchestrator::new(build_test_catalog());
        let recs = orchestrator.extract_recommendations("Here are some ideas.", "I'm feeling sad", 2);
        assert_eq!(recs.len(), 2);
        assert!(recs.iter().all(|r| r.source == CandidateSource::MoodMatch));
        // sad genres are drama, romance, documentary
        assert_eq!(ids(&recs), vec![6, 3]);
    }

    #[test]
    fn test_top_rated_when_nothing_detected() {
        let orchestrator = RecommendationOrchestrator::new(build_test_catalog());
        let recs = orchestrator.extract_recommendations("hmm", "hi", 3);
        assert_eq!(ids(&recs), vec![6, 2, 1]);
        assert!(recs.iter().all(|r| r.source == CandidateSource::TopRated));
        assert!(recs.iter().all(|r| r.vote_average >= 7.0));
    }

    #[test]
    fn test_zero_max_results() {
        let orchestrator = RecommendationOrchestrator::new(build_test_catalog());
        assert!(orchestrator.extract_recommendations("The Matrix", "sad", 0).is_empty());
    }

    #[test]
    fn test_context_suggestions_use_popularity() {
        let orchestrator = RecommendationOrchestrator::new(build_test_catalog());
        let recs = orchestrator.suggest_from_context("something funny please", 2);
        // comedy and animation; Cats wins on raw popularity
        assert_eq!(ids(&recs), vec![8, 4]);
        assert_eq!(recs[0].source, CandidateSource::GenreMatch);
    }

    #[test]
    fn test_context_suggestions_fall_back() {
        let orchestrator = RecommendationOrchestrator::new(build_test_catalog());
        let recs = orchestrator.suggest_from_context("hello", 6);
        assert!(!recs.is_empty());
        assert!(recs.iter().all(|r| r.source == CandidateSource::TopRated));
    }

    #[test]
    fn test_browse_pages() {
        let orchestrator = RecommendationOrchestrator::new(build_test_catalog());
        let page = orchestrator.browse(Some(BrowseMood::Happy), None, 1).unwrap();
        assert!(page.total > 0);
        assert!(page.items.iter().all(|m| !m.genre_ids.contains(&18)));

        let searched = orchestrator.browse(None, Some("matrix"), 1).unwrap();
        assert_eq!(searched.items.len(), 1);
        assert_eq!(searched.items[0].id, 1);

        assert!(orchestrator.browse(None, None, 0).unwrap().is_empty());
    }
}
