//! Shared types for candidate generation.

use data_loader::MovieId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which extraction tier proposed a movie
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidateSource {
    /// The title was mentioned in the assistant's reply
    TitleMention,
    /// Matched the genres of the mood detected in the user's message
    MoodMatch,
    /// Matched genres named in the user's message
    GenreMatch,
    /// Highly rated filler when nothing else is left
    TopRated,
}

impl CandidateSource {
    pub fn as_str(self) -> &'static str {
        match self {
            CandidateSource::TitleMention => "title_mention",
            CandidateSource::MoodMatch => "mood_match",
            CandidateSource::GenreMatch => "genre_match",
            CandidateSource::TopRated => "top_rated",
        }
    }
}

impl fmt::Display for CandidateSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A movie proposed by one of the sources
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub movie_id: MovieId,
    pub source: CandidateSource,
    /// The value the source ordered by (vote average or ranking score)
    pub base_score: f32,
}

impl Candidate {
    pub fn new(movie_id: MovieId, source: CandidateSource, base_score: f32) -> Self {
        Self {
            movie_id,
            source,
            base_score,
        }
    }
}
