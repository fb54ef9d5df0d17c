//! # Sources Crate
//!
//! Candidate sources for turning a chat exchange into movie picks.
//!
//! ## Components
//!
//! ### Title Mention Source
//! Movies the assistant named in its reply, matched by title or by the
//! first two words of longer titles.
//!
//! ### Genre Fallback Source
//! Movies in the genres of the mood detected in the user's message, or in
//! the genres the message names outright.
//!
//! ### Top Rated Source
//! Highly rated movies, used to fill whatever is still missing.
//!
//! ## Example Usage
//!
//! ```ignore
//! use sources::{TitleMentionSource, GenreFallbackSource, TopRatedSource};
//! use std::collections::HashSet;
//!
//! let mentions = TitleMentionSource::new(catalog.clone());
//! let found = mentions.get_candidates(reply, &HashSet::new(), 6);
//! ```
//!
//! Every source takes the ids already picked so callers can stack them
//! without producing duplicates.

// Public modules
pub mod types;
pub mod mentions;
pub mod fallback;

// Re-export commonly used types
pub use types::{Candidate, CandidateSource};
pub use mentions::TitleMentionSource;
pub use fallback::{GenreFallbackSource, GenreHint, TopRatedSource, DEFAULT_MIN_VOTE};
