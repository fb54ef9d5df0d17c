//! Canned replies used when the chat relay is unavailable.

use data_loader::GenreId;

const FALLBACK_REPLIES: &[(&[&str], &str)] = &[
    (
        &["funny", "comedy", "laugh"],
        "Great choice! Comedy is perfect for lifting your mood. Let me show you some hilarious options that'll have you laughing out loud!",
    ),
    (
        &["scary", "horror", "thriller"],
        "Ooh, feeling brave! I've got some spine-tingling thrillers and horror films that'll keep you on the edge of your seat!",
    ),
    (
        &["action", "exciting", "adventure"],
        "Action-packed adventures coming right up! These high-energy films will keep your adrenaline pumping!",
    ),
    (
        &["romantic", "love", "romance"],
        "Aww, romance! I've got some beautiful love stories that'll warm your heart. Perfect for a cozy night in!",
    ),
    (
        &["sad", "drama", "emotional"],
        "Sometimes we need a good emotional journey. Here are some powerful dramas that'll really resonate with you.",
    ),
    (
        &["different", "change", "instead"],
        "Sure! Let me switch gears and show you something completely different!",
    ),
];

const DEFAULT_REPLY: &str =
    "I can help you find the perfect movie! What kind of vibe are you going for tonight?";

const CONTEXT_GENRES: &[(&[&str], &[GenreId])] = &[
    (&["funny", "comedy", "laugh"], &[35, 16]),
    (&["scary", "horror", "thriller"], &[27, 53]),
    (&["action", "exciting", "adventure"], &[28, 12, 878]),
    (&["romantic", "love", "romance"], &[10749, 35]),
    (&["drama", "sad", "emotional"], &[18]),
    (&["sci-fi", "science", "futur"], &[878, 14]),
    (&["family", "kids"], &[10751, 16]),
    (&["mystery", "detective"], &[9648, 53]),
];

const GUIDANCE_LIMIT: &str = "the API key has reached its limit - please update AIML_API_KEY in .env";
const GUIDANCE_KEY: &str = "API key issue - please check your .env configuration";
const GUIDANCE_DEFAULT: &str = "please ensure the proxy server is running";

/// First row whose keywords hit the lower-cased text
fn lookup<T: Copy>(table: &[(&[&str], T)], text: &str) -> Option<T> {
    let text = text.to_lowercase();
    table
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|kw| text.contains(kw)))
        .map(|(_, value)| *value)
}

/// Friendly reply chosen from keywords in the user's message
pub fn fallback_reply(query: &str) -> &'static str {
    lookup(FALLBACK_REPLIES, query).unwrap_or(DEFAULT_REPLY)
}

/// Remediation hint for a failed relay call, based on the error text
pub fn failure_guidance(error_text: &str) -> &'static str {
    let text = error_text.to_lowercase();
    if ["limit", "quota", "forbidden"].iter().any(|kw| text.contains(kw)) {
        GUIDANCE_LIMIT
    } else if ["key", "auth"].iter().any(|kw| text.contains(kw)) {
        GUIDANCE_KEY
    } else {
        GUIDANCE_DEFAULT
    }
}

/// Quick keyword -> genre suggestion used when the relay fails.
///
/// Returns an empty list when nothing in the message is recognised.
pub fn context_genres(query: &str) -> Vec<GenreId> {
    lookup(CONTEXT_GENRES, query)
        .map(<[GenreId]>::to_vec)
        .unwrap_or_default()
}
