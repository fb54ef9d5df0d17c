//! Core domain types for the movie catalog.
//!
//! This module defines the fundamental data structures used throughout the
//! workspace: the movie record, the fixed genre table and the `Catalog`
//! that holds every record for the lifetime of the process.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// =============================================================================
// Type Aliases
// =============================================================================

/// Unique identifier for a movie (TMDB id, or the row number as a fallback)
pub type MovieId = u32;

/// Numeric genre identifier as it appears in the dataset
pub type GenreId = u32;

// =============================================================================
// Genre Table
// =============================================================================

/// Movie genres known to the catalog.
///
/// Genre ids outside this table are kept on the record but have no display
/// name and never match a name search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Genre {
    Action,
    Adventure,
    Animation,
    Comedy,
    Crime,
    Documentary,
    Drama,
    Family,
    Fantasy,
    History,
    Horror,
    Music,
    Mystery,
    Romance,
    SciFi,
    TvMovie,
    Thriller,
    War,
    Western,
}

impl Genre {
    /// Every genre, in table order
    pub const ALL: [Genre; 19] = [
        Genre::Action,
        Genre::Adventure,
        Genre::Animation,
        Genre::Comedy,
        Genre::Crime,
        Genre::Documentary,
        Genre::Drama,
        Genre::Family,
        Genre::Fantasy,
        Genre::History,
        Genre::Horror,
        Genre::Music,
        Genre::Mystery,
        Genre::Romance,
        Genre::SciFi,
        Genre::TvMovie,
        Genre::Thriller,
        Genre::War,
        Genre::Western,
    ];

    /// Dataset id for this genre
    pub const fn id(self) -> GenreId {
        match self {
            Genre::Action => 28,
            Genre::Adventure => 12,
            Genre::Animation => 16,
            Genre::Comedy => 35,
            Genre::Crime => 80,
            Genre::Documentary => 99,
            Genre::Drama => 18,
            Genre::Family => 10751,
            Genre::Fantasy => 14,
            Genre::History => 36,
            Genre::Horror => 27,
            Genre::Music => 10402,
            Genre::Mystery => 9648,
            Genre::Romance => 10749,
            Genre::SciFi => 878,
            Genre::TvMovie => 10770,
            Genre::Thriller => 53,
            Genre::War => 10752,
            Genre::Western => 37,
        }
    }

    /// Human-readable name shown to users and matched by search
    pub const fn name(self) -> &'static str {
        match self {
            Genre::Action => "Action",
            Genre::Adventure => "Adventure",
            Genre::Animation => "Animation",
            Genre::Comedy => "Comedy",
            Genre::Crime => "Crime",
            Genre::Documentary => "Documentary",
            Genre::Drama => "Drama",
            Genre::Family => "Family",
            Genre::Fantasy => "Fantasy",
            Genre::History => "History",
            Genre::Horror => "Horror",
            Genre::Music => "Music",
            Genre::Mystery => "Mystery",
            Genre::Romance => "Romance",
            Genre::SciFi => "Sci-Fi",
            Genre::TvMovie => "TV Movie",
            Genre::Thriller => "Thriller",
            Genre::War => "War",
            Genre::Western => "Western",
        }
    }

    /// Look up a genre by its dataset id
    pub fn from_id(id: GenreId) -> Option<Genre> {
        Genre::ALL.iter().copied().find(|g| g.id() == id)
    }
}

/// Display name for a raw genre id, if it is in the table
pub fn genre_name(id: GenreId) -> Option<&'static str> {
    Genre::from_id(id).map(Genre::name)
}

// =============================================================================
// Movie
// =============================================================================

/// A single catalog entry.
///
/// Records are immutable once the catalog is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: MovieId,
    pub title: String,
    pub overview: String,
    /// Raw genre ids in dataset order; duplicates are preserved
    pub genre_ids: Vec<GenreId>,
    pub vote_average: f32,
    pub vote_count: u32,
    pub popularity: f32,
    /// `YYYY-MM-DD` or empty
    pub release_date: String,
    pub poster_path: String,
    pub original_language: String,
}

impl Movie {
    /// Release year taken from the date prefix
    ///
    /// Example: "1994-09-23" -> Some(1994)
    ///          "" -> None
    pub fn year(&self) -> Option<u16> {
        self.release_date.get(..4)?.parse().ok()
    }

    /// True if any of the movie's genre ids is in `genres`
    pub fn has_any_genre(&self, genres: &[GenreId]) -> bool {
        self.genre_ids.iter().any(|id| genres.contains(id))
    }

    /// Display names for the genres that are in the genre table
    pub fn genre_names(&self) -> Vec<&'static str> {
        self.genre_ids.iter().filter_map(|&id| genre_name(id)).collect()
    }
}

// =============================================================================
// Catalog - The In-Memory Movie Store
// =============================================================================

/// Read-only collection of every loaded movie.
///
/// Keeps records in load order (the order ranking ties fall back to) with a
/// HashMap from id to position for O(1) lookups, plus a genre index.
#[derive(Debug, Default)]
pub struct Catalog {
    pub(crate) movies: Vec<Movie>,
    pub(crate) id_index: HashMap<MovieId, usize>,
    pub(crate) genre_index: HashMap<GenreId, Vec<MovieId>>,
}

impl Catalog {
    /// Creates a new, empty Catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// All movies, in load order
    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    /// Get a movie by ID
    pub fn get_movie(&self, id: MovieId) -> Option<&Movie> {
        self.id_index.get(&id).map(|&pos| &self.movies[pos])
    }

    /// Get ids of all movies tagged with a genre
    pub fn get_movies_by_genre(&self, genre: GenreId) -> &[MovieId] {
        self.genre_index
            .get(&genre)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Insert a movie unless its id is already present.
    ///
    /// Returns false when the movie was discarded as a duplicate.
    pub fn insert_movie(&mut self, movie: Movie) -> bool {
        if self.id_index.contains_key(&movie.id) {
            return false;
        }
        let mut seen = Vec::with_capacity(movie.genre_ids.len());
        for &genre in &movie.genre_ids {
            if !seen.contains(&genre) {
                seen.push(genre);
                self.genre_index.entry(genre).or_default().push(movie.id);
            }
        }
        self.id_index.insert(movie.id, self.movies.len());
        self.movies.push(movie);
        true
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }
}
