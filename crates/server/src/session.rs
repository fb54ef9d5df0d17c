//! Chat sessions: a running transcript plus the relay and the extractor.

use std::sync::Arc;

use classifier::{failure_guidance, fallback_reply};
use data_loader::{Catalog, Movie};
use llm_client::{ChatMessage, ChatRequest, LlmClient, DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::orchestrator::{MovieRecommendation, RecommendationOrchestrator};

/// Reply used when the relay succeeds with no text
pub const EMPTY_REPLY: &str =
    "I'd love to help you find great movies! What kind of mood are you in?";

pub const MAX_RESULTS: usize = 6;

/// Movies listed in the system prompt
const PROMPT_SAMPLE_SIZE: usize = 50;

/// Append-only list of chat messages
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    messages: Vec<ChatMessage>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_user(&mut self, content: impl Into<String>) {
        self.messages.push(ChatMessage::user(content));
    }

    pub fn push_assistant(&mut self, content: impl Into<String>) {
        self.messages.push(ChatMessage::assistant(content));
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

/// Outcome of one user message
#[derive(Debug, Clone, Serialize)]
pub struct ChatTurn {
    pub reply: String,
    pub recommendations: Vec<MovieRecommendation>,
    /// Set when the relay failed and the reply is a canned one
    pub relay_error: Option<String>,
}

pub struct ChatSession {
    orchestrator: Arc<RecommendationOrchestrator>,
    client: LlmClient,
    transcript: Transcript,
    system_prompt: Option<String>,
    max_results: usize,
}

impl ChatSession {
    pub fn new(orchestrator: Arc<RecommendationOrchestrator>, client: LlmClient) -> Self {
        Self {
            orchestrator,
            client,
            transcript: Transcript::new(),
            system_prompt: None,
            max_results: MAX_RESULTS,
        }
    }

    /// Send a catalog-aware system prompt ahead of every request
    pub fn with_system_prompt(mut self) -> Self {
        self.system_prompt = Some(system_prompt(self.orchestrator.catalog()));
        self
    }

    /// Configure how many movies each turn suggests (default: 6)
    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Handle one user message.
    ///
    /// Blank input is ignored and returns `None`. Relay failures never
    /// surface as errors: the turn carries a canned reply and genre picks.
    pub async fn send(&mut self, user_text: &str) -> Option<ChatTurn> {
        if user_text.trim().is_empty() {
            return None;
        }
        let query = user_text;
        self.transcript.push_user(query);

        let request = ChatRequest::new(self.request_messages())
            .with_temperature(DEFAULT_TEMPERATURE)
            .with_max_tokens(DEFAULT_MAX_TOKENS);

        let turn = match self.client.chat(&request).await {
            Ok(completion) => {
                let reply = completion.content().unwrap_or(EMPTY_REPLY).to_string();
                let recommendations =
                    self.orchestrator
                        .extract_recommendations(&reply, query, self.max_results);
                ChatTurn {
                    reply,
                    recommendations,
                    relay_error: None,
                }
            }
            Err(err) => {
                let error_text = err.to_string();
                warn!("Chat relay failed, using fallback reply: {}", error_text);
                let reply = format!(
                    "{} (Note: {})",
                    fallback_reply(query),
                    failure_guidance(&err.caller_message())
                );
                let recommendations = self
                    .orchestrator
                    .suggest_from_context(query, self.max_results);
                ChatTurn {
                    reply,
                    recommendations,
                    relay_error: Some(error_text),
                }
            }
        };

        self.transcript.push_assistant(turn.reply.clone());
        info!(
            "Chat turn complete: {} recommendations, transcript length {}",
            turn.recommendations.len(),
            self.transcript.len()
        );
        Some(turn)
    }

    fn request_messages(&self) -> Vec<ChatMessage> {
        let mut messages = Vec::with_capacity(self.transcript.len() + 1);
        if let Some(prompt) = &self.system_prompt {
            messages.push(ChatMessage::system(prompt.clone()));
        }
        messages.extend_from_slice(self.transcript.messages());
        debug!("Sending {} messages to relay", messages.len());
        messages
    }
}

/// Instructions for the assistant, with a sample of the best-known movies.
///
/// The sample is the top movies by `vote_average * vote_count`.
pub fn system_prompt(catalog: &Catalog) -> String {
    let mut movies: Vec<&Movie> = catalog.movies().iter().collect();
    movies.sort_by(|a, b| weighted_votes(b).total_cmp(&weighted_votes(a)));

    let sample = movies
        .iter()
        .take(PROMPT_SAMPLE_SIZE)
        .map(|movie| {
            let year = movie
                .year()
                .map_or_else(|| "N/A".to_string(), |y| y.to_string());
            format!("{} ({}) - {}", movie.title, year, movie.genre_names().join(", "))
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "You are CineMatch AI, a movie recommendation assistant who pays close attention to how people feel.

**YOUR ROLE:**
Work out the user's mood from what they write and suggest films that suit it, or gently lift it.

**CONVERSATION STYLE:**
Be warm and brief. Ask a follow-up question when the mood is unclear.

**MOVIE RECOMMENDATIONS:**
Suggest 3 to 5 films at a time, give each a one-line reason, and always write the full title.

**AVAILABLE MOVIES SAMPLE:**
{sample}

**IMPORTANT:**
Prefer movies from the sample above. Never invent titles."
    )
}

fn weighted_votes(movie: &Movie) -> f32 {
    movie.vote_average * movie.vote_count as f32
}
