//! # Classifier Crate
//!
//! Static mood and genre tables plus the keyword detectors that read free
//! text. Everything here is pure: no I/O and no shared state.
//!
//! ## Main Components
//!
//! - **moods**: `BrowseMood` (mood selector) and `ConversationMood` (chat)
//! - **keywords**: `detect_mood` and `detect_genres`
//! - **replies**: canned fallback replies for when the relay is down
//! - **error**: Error types for mood parsing

pub mod error;
pub mod keywords;
pub mod moods;
pub mod replies;

pub use error::{ClassifierError, Result};
pub use keywords::{detect_genres, detect_mood};
pub use moods::{BrowseMood, ConversationMood, MoodProfile};
pub use replies::{context_genres, failure_guidance, fallback_reply};
