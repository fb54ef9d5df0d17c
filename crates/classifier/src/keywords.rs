//! Keyword detection over free text.
//!
//! Both detectors lower-case the input and look for plain substrings, so
//! "madness" counts as "mad". Tables are scanned in order.

use crate::moods::ConversationMood;
use data_loader::GenreId;

/// Mood keywords in priority order; the first mood with any hit wins
const MOOD_KEYWORDS: &[(ConversationMood, &[&str])] = &[
    (
        ConversationMood::Happy,
        &["happy", "cheerful", "joyful", "upbeat", "good mood", "feeling great"],
    ),
    (
        ConversationMood::Sad,
        &["sad", "down", "blue", "melancholy", "unhappy", "crying"],
    ),
    (
        ConversationMood::Depressed,
        &["depressed", "depression", "hopeless", "empty", "numb", "worthless"],
    ),
    (
        ConversationMood::Anxious,
        &["anxious", "anxiety", "worried", "nervous", "stressed out", "panic"],
    ),
    (
        ConversationMood::Stressed,
        &["stressed", "overwhelmed", "pressure", "tense", "burnout"],
    ),
    (
        ConversationMood::Excited,
        &["excited", "pumped", "energetic", "hyped", "thrilled"],
    ),
    (
        ConversationMood::Bored,
        &["bored", "boring", "nothing to do", "uninterested"],
    ),
    (
        ConversationMood::Relaxed,
        &["relaxed", "chill", "calm", "peaceful", "mellow"],
    ),
    (
        ConversationMood::Scared,
        &["scared", "frightened", "terrified", "spooky", "creepy"],
    ),
    (
        ConversationMood::Romantic,
        &["romantic", "love", "date night", "romance", "loving"],
    ),
    (
        ConversationMood::Lonely,
        &["lonely", "alone", "isolated", "lonesome", "solitary"],
    ),
    (
        ConversationMood::Angry,
        &["angry", "mad", "furious", "pissed", "frustrated"],
    ),
    (
        ConversationMood::Nostalgic,
        &["nostalgic", "nostalgia", "reminisce", "old times", "memories"],
    ),
    (
        ConversationMood::Adventurous,
        &["adventurous", "adventure", "explore", "discover"],
    ),
    (
        ConversationMood::Thoughtful,
        &["thoughtful", "thinking", "contemplative", "reflective", "philosophical"],
    ),
    (
        ConversationMood::Curious,
        &["curious", "wondering", "interested", "intrigued"],
    ),
    (
        ConversationMood::Lost,
        &["lost", "confused", "directionless", "unsure", "adrift"],
    ),
    (
        ConversationMood::Hopeful,
        &["hopeful", "optimistic", "positive", "looking forward", "inspired"],
    ),
];

/// Genre keywords, ascending by genre id
const GENRE_KEYWORDS: &[(GenreId, &[&str])] = &[
    (12, &["adventure", "journey", "quest", "explore", "expedition"]),
    (14, &["fantasy", "magical", "magic", "wizards", "mythical"]),
    (16, &["animation", "animated", "cartoon", "anime"]),
    (18, &["drama", "dramatic", "emotional", "serious", "intense"]),
    (27, &["horror", "scary", "terrifying", "creepy", "haunted"]),
    (28, &["action", "fighting", "battles", "explosions", "adrenaline"]),
    (35, &["comedy", "funny", "hilarious", "laugh", "humor", "comedic"]),
    (36, &["history", "historical", "period", "based on true events"]),
    (37, &["western", "cowboy", "frontier", "wild west"]),
    (53, &["thriller", "suspense", "tense", "edge of your seat", "gripping"]),
    (80, &["crime", "detective", "investigation", "heist", "gangster"]),
    (99, &["documentary", "real story", "true story", "educational"]),
    (878, &["sci-fi", "science fiction", "futuristic", "space", "robots", "ai"]),
    (9648, &["mystery", "mysterious", "whodunit", "puzzle", "enigma"]),
    (10402, &["music", "musical", "concert", "singing", "dance"]),
    (10749, &["romance", "romantic", "love story", "relationship"]),
    (10751, &["family", "kids", "children", "family-friendly"]),
    (10752, &["war", "battle", "military", "soldier", "combat"]),
];

fn contains_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|kw| text.contains(kw))
}

/// Detect the speaker's mood from a chat message.
///
/// Example: "I'm feeling really sad today" -> Some(Sad)
///          "sad and stressed" -> Some(Sad), sad is checked first
pub fn detect_mood(text: &str) -> Option<ConversationMood> {
    let text = text.to_lowercase();
    MOOD_KEYWORDS
        .iter()
        .find(|(_, keywords)| contains_any(&text, keywords))
        .map(|(mood, _)| *mood)
}

/// Every genre whose keywords appear in the text, ascending by id
pub fn detect_genres(text: &str) -> Vec<GenreId> {
    let text = text.to_lowercase();
    GENRE_KEYWORDS
        .iter()
        .filter(|(_, keywords)| contains_any(&text, keywords))
        .map(|(genre, _)| *genre)
        .collect()
}
