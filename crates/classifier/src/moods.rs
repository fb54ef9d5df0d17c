//! Mood tables.
//!
//! There are two tables:
//!
//! - `BrowseMood` drives the mood selector. Each mood has genres a movie
//!   must touch and genres it must avoid.
//! - `ConversationMood` is what `detect_mood` returns for chat messages.
//!   It is finer grained (18 moods) and only lists genres to match.
//!
//! Labels overlap but the genre sets differ. The selector and the chat
//! fallback each read their own table.

use crate::error::{ClassifierError, Result};
use data_loader::{Genre, GenreId};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use Genre::*;

/// Genre constraints for a browse mood
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoodProfile {
    /// A movie must carry at least one of these
    pub positive: &'static [GenreId],
    /// A movie carrying any of these is excluded
    pub negative: &'static [GenreId],
}

impl MoodProfile {
    /// True if the genre list satisfies this profile.
    ///
    /// An empty genre list never matches.
    pub fn matches(&self, genre_ids: &[GenreId]) -> bool {
        let has_negative = genre_ids.iter().any(|id| self.negative.contains(id));
        let has_positive = genre_ids.iter().any(|id| self.positive.contains(id));
        has_positive && !has_negative
    }
}

// =============================================================================
// Browse moods (mood selector)
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BrowseMood {
    Happy,
    Sad,
    Excited,
    Relaxed,
    Scared,
    Romantic,
    Thoughtful,
    Adventurous,
}

const HAPPY: MoodProfile = MoodProfile {
    positive: &[Comedy.id(), Animation.id(), Family.id()],
    negative: &[Horror.id(), Thriller.id(), Crime.id(), Drama.id()],
};
const SAD: MoodProfile = MoodProfile {
    positive: &[Drama.id(), Romance.id()],
    negative: &[Action.id(), Horror.id(), Comedy.id(), Thriller.id()],
};
const EXCITED: MoodProfile = MoodProfile {
    positive: &[Action.id(), Adventure.id(), SciFi.id()],
    negative: &[Drama.id()],
};
const RELAXED: MoodProfile = MoodProfile {
    positive: &[Comedy.id(), Family.id(), Animation.id(), Fantasy.id()],
    negative: &[Horror.id(), Thriller.id(), Crime.id()],
};
const SCARED: MoodProfile = MoodProfile {
    positive: &[Horror.id(), Thriller.id()],
    negative: &[Comedy.id(), Family.id(), Animation.id()],
};
const ROMANTIC: MoodProfile = MoodProfile {
    positive: &[Romance.id()],
    negative: &[Crime.id(), Horror.id(), Action.id(), Thriller.id()],
};
const THOUGHTFUL: MoodProfile = MoodProfile {
    positive: &[Drama.id(), Documentary.id(), History.id()],
    negative: &[Action.id(), Horror.id(), Comedy.id()],
};
const ADVENTUROUS: MoodProfile = MoodProfile {
    positive: &[Adventure.id(), Fantasy.id(), SciFi.id()],
    negative: &[Drama.id(), Crime.id()],
};

impl BrowseMood {
    pub const ALL: [BrowseMood; 8] = [
        BrowseMood::Happy,
        BrowseMood::Sad,
        BrowseMood::Excited,
        BrowseMood::Relaxed,
        BrowseMood::Scared,
        BrowseMood::Romantic,
        BrowseMood::Thoughtful,
        BrowseMood::Adventurous,
    ];

    pub fn profile(self) -> MoodProfile {
        match self {
            BrowseMood::Happy => HAPPY,
            BrowseMood::Sad => SAD,
            BrowseMood::Excited => EXCITED,
            BrowseMood::Relaxed => RELAXED,
            BrowseMood::Scared => SCARED,
            BrowseMood::Romantic => ROMANTIC,
            BrowseMood::Thoughtful => THOUGHTFUL,
            BrowseMood::Adventurous => ADVENTUROUS,
        }
    }

    /// Key used on the wire and on the command line
    pub fn key(self) -> &'static str {
        match self {
            BrowseMood::Happy => "happy",
            BrowseMood::Sad => "sad",
            BrowseMood::Excited => "excited",
            BrowseMood::Relaxed => "relaxed",
            BrowseMood::Scared => "scared",
            BrowseMood::Romantic => "romantic",
            BrowseMood::Thoughtful => "thoughtful",
            BrowseMood::Adventurous => "adventurous",
        }
    }

    /// Label shown in the mood selector
    pub fn label(self) -> &'static str {
        match self {
            BrowseMood::Happy => "Happy",
            BrowseMood::Sad => "Melancholic",
            BrowseMood::Excited => "Excited",
            BrowseMood::Relaxed => "Relaxed",
            BrowseMood::Scared => "Thrilled",
            BrowseMood::Romantic => "Romantic",
            BrowseMood::Thoughtful => "Thoughtful",
            BrowseMood::Adventurous => "Adventurous",
        }
    }
}

impl fmt::Display for BrowseMood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for BrowseMood {
    type Err = ClassifierError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_lowercase();
        BrowseMood::ALL
            .into_iter()
            .find(|mood| mood.key() == wanted)
            .ok_or_else(|| ClassifierError::UnknownMood(s.to_string()))
    }
}

// =============================================================================
// Conversation moods (chat fallback)
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConversationMood {
    Happy,
    Sad,
    Depressed,
    Anxious,
    Excited,
    Bored,
    Relaxed,
    Scared,
    Romantic,
    Lonely,
    Angry,
    Nostalgic,
    Adventurous,
    Thoughtful,
    Curious,
    Stressed,
    Lost,
    Hopeful,
}

// Fallback genre lists for conversation moods
const CHAT_HAPPY: &[GenreId] = &[Comedy.id(), Animation.id(), Family.id(), Fantasy.id()];
const CHAT_SAD: &[GenreId] = &[Drama.id(), Romance.id(), Documentary.id()];
const CHAT_DEPRESSED: &[GenreId] = &[Comedy.id(), Animation.id(), Family.id(), Drama.id()];
const CHAT_ANXIOUS: &[GenreId] = &[Comedy.id(), Animation.id(), Family.id()];
const CHAT_EXCITED: &[GenreId] = &[Action.id(), Adventure.id(), SciFi.id(), Fantasy.id()];
const CHAT_BORED: &[GenreId] = &[Action.id(), Adventure.id(), Thriller.id(), Mystery.id()];
const CHAT_RELAXED: &[GenreId] = &[Comedy.id(), Family.id(), Animation.id(), Fantasy.id()];
const CHAT_SCARED: &[GenreId] = &[Horror.id(), Thriller.id()];
const CHAT_ROMANTIC: &[GenreId] = &[Romance.id(), Comedy.id(), Drama.id()];
const CHAT_LONELY: &[GenreId] = &[Romance.id(), Drama.id(), Comedy.id()];
const CHAT_ANGRY: &[GenreId] = &[Action.id(), Thriller.id(), Crime.id()];
const CHAT_NOSTALGIC: &[GenreId] = &[Drama.id(), History.id(), Romance.id()];
const CHAT_ADVENTUROUS: &[GenreId] = &[Adventure.id(), Fantasy.id(), SciFi.id(), Action.id()];
const CHAT_THOUGHTFUL: &[GenreId] = &[Drama.id(), Documentary.id(), History.id(), Mystery.id()];
const CHAT_CURIOUS: &[GenreId] = &[Documentary.id(), SciFi.id(), Mystery.id(), History.id()];
const CHAT_STRESSED: &[GenreId] = &[Comedy.id(), Animation.id(), Family.id()];
const CHAT_LOST: &[GenreId] = &[Drama.id(), Adventure.id(), SciFi.id()];
const CHAT_HOPEFUL: &[GenreId] = &[Drama.id(), Romance.id(), Adventure.id()];

impl ConversationMood {
    pub const ALL: [ConversationMood; 18] = [
        ConversationMood::Happy,
        ConversationMood::Sad,
        ConversationMood::Depressed,
        ConversationMood::Anxious,
        ConversationMood::Excited,
        ConversationMood::Bored,
        ConversationMood::Relaxed,
        ConversationMood::Scared,
        ConversationMood::Romantic,
        ConversationMood::Lonely,
        ConversationMood::Angry,
        ConversationMood::Nostalgic,
        ConversationMood::Adventurous,
        ConversationMood::Thoughtful,
        ConversationMood::Curious,
        ConversationMood::Stressed,
        ConversationMood::Lost,
        ConversationMood::Hopeful,
    ];

    /// Genres used to pick fallback recommendations for this mood
    pub fn genres(self) -> &'static [GenreId] {
        match self {
            ConversationMood::Happy => CHAT_HAPPY,
            ConversationMood::Sad => CHAT_SAD,
            ConversationMood::Depressed => CHAT_DEPRESSED,
            ConversationMood::Anxious => CHAT_ANXIOUS,
            ConversationMood::Excited => CHAT_EXCITED,
            ConversationMood::Bored => CHAT_BORED,
            ConversationMood::Relaxed => CHAT_RELAXED,
            ConversationMood::Scared => CHAT_SCARED,
            ConversationMood::Romantic => CHAT_ROMANTIC,
            ConversationMood::Lonely => CHAT_LONELY,
            ConversationMood::Angry => CHAT_ANGRY,
            ConversationMood::Nostalgic => CHAT_NOSTALGIC,
            ConversationMood::Adventurous => CHAT_ADVENTUROUS,
            ConversationMood::Thoughtful => CHAT_THOUGHTFUL,
            ConversationMood::Curious => CHAT_CURIOUS,
            ConversationMood::Stressed => CHAT_STRESSED,
            ConversationMood::Lost => CHAT_LOST,
            ConversationMood::Hopeful => CHAT_HOPEFUL,
        }
    }

    /// Descriptive flavours to emphasise when talking about this mood
    pub fn boost(self) -> &'static [&'static str] {
        match self {
            ConversationMood::Happy => &["Comedy", "Animation", "Family", "Fantasy"],
            ConversationMood::Sad => &["Drama", "Romance", "Documentary"],
            ConversationMood::Depressed => &["Comedy", "Animation", "Uplifting Drama"],
            ConversationMood::Anxious => &["Light Comedy", "Animation", "Family"],
            ConversationMood::Excited => &["Action", "Adventure", "Sci-Fi", "Fantasy"],
            ConversationMood::Bored => &["Action", "Adventure", "Thriller", "Mystery"],
            ConversationMood::Relaxed => &["Comedy", "Family", "Animation", "Fantasy"],
            ConversationMood::Scared => &["Horror", "Thriller"],
            ConversationMood::Romantic => &["Romance", "Romantic Comedy", "Drama"],
            ConversationMood::Lonely => &["Romance", "Drama", "Feel-good Comedy"],
            ConversationMood::Angry => &["Action", "Thriller", "Crime"],
            ConversationMood::Nostalgic => &["Drama", "Historical", "Classic Romance"],
            ConversationMood::Adventurous => &["Adventure", "Fantasy", "Sci-Fi", "Action"],
            ConversationMood::Thoughtful => &["Drama", "Documentary", "History", "Mystery"],
            ConversationMood::Curious => &["Documentary", "Sci-Fi", "Mystery", "History"],
            ConversationMood::Stressed => &["Comedy", "Animation", "Light Family"],
            ConversationMood::Lost => &["Inspirational Drama", "Adventure", "Sci-Fi"],
            ConversationMood::Hopeful => &["Uplifting Drama", "Romance", "Adventure"],
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            ConversationMood::Happy => "happy",
            ConversationMood::Sad => "sad",
            ConversationMood::Depressed => "depressed",
            ConversationMood::Anxious => "anxious",
            ConversationMood::Excited => "excited",
            ConversationMood::Bored => "bored",
            ConversationMood::Relaxed => "relaxed",
            ConversationMood::Scared => "scared",
            ConversationMood::Romantic => "romantic",
            ConversationMood::Lonely => "lonely",
            ConversationMood::Angry => "angry",
            ConversationMood::Nostalgic => "nostalgic",
            ConversationMood::Adventurous => "adventurous",
            ConversationMood::Thoughtful => "thoughtful",
            ConversationMood::Curious => "curious",
            ConversationMood::Stressed => "stressed",
            ConversationMood::Lost => "lost",
            ConversationMood::Hopeful => "hopeful",
        }
    }
}

impl fmt::Display for ConversationMood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for ConversationMood {
    type Err = ClassifierError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_lowercase();
        ConversationMood::ALL
            .into_iter()
            .find(|mood| mood.key() == wanted)
            .ok_or_else(|| ClassifierError::UnknownMood(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_happy_profile() {
        let happy = BrowseMood::Happy.profile();
        assert_eq!(happy.positive, &[35, 16, 10751]);
        assert_eq!(happy.negative, &[27, 53, 80, 18]);
    }

    #[test]
    fn test_romantic_profile() {
        let romantic = BrowseMood::Romantic.profile();
        assert_eq!(romantic.positive, &[10749]);
        assert_eq!(romantic.negative, &[80, 27, 28, 53]);
    }

    #[test]
    fn test_profile_matches() {
        let romantic = BrowseMood::Romantic.profile();
        assert!(romantic.matches(&[35, 10749]));
        assert!(!romantic.matches(&[28, 18, 80]));
        assert!(!romantic.matches(&[10749, 53]));
        assert!(!romantic.matches(&[]));
    }

    #[test]
    fn test_tables_differ_for_shared_labels() {
        // happy in the chat table adds Fantasy and has no exclusions
        assert_eq!(ConversationMood::Happy.genres(), &[35, 16, 10751, 14]);
        assert_eq!(ConversationMood::Sad.genres(), &[18, 10749, 99]);
        assert_ne!(BrowseMood::Sad.profile().positive, ConversationMood::Sad.genres());
    }

    #[test]
    fn test_parse_moods() {
        assert_eq!("Happy".parse::<BrowseMood>(), Ok(BrowseMood::Happy));
        assert_eq!(" lost ".parse::<ConversationMood>(), Ok(ConversationMood::Lost));
        assert_eq!(
            "lost".parse::<BrowseMood>(),
            Err(ClassifierError::UnknownMood("lost".to_string()))
        );
    }

    #[test]
    fn test_labels() {
        assert_eq!(BrowseMood::Sad.label(), "Melancholic");
        assert_eq!(BrowseMood::Scared.label(), "Thrilled");
        assert_eq!(BrowseMood::Scared.to_string(), "scared");
    }
}
