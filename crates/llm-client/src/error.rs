//! Errors returned by the chat client.
//!
//! Each variant maps to the HTTP status the relay answers with, see
//! `LlmClientError::status_code`.

use serde_json::Value;
use thiserror::Error;

/// Errors that can occur when talking to the completion API
#[derive(Error, Debug)]
pub enum LlmClientError {
    /// The request was rejected before anything was sent
    #[error("Invalid or empty messages: {0}")]
    Validation(String),

    /// No API key is configured
    #[error("AiML API key not configured. Please set AIML_API_KEY in .env file")]
    Configuration,

    /// The upstream answered with a non-success status
    #[error("AiML API request failed ({status}): {}", upstream_message(.details))]
    Upstream { status: u16, details: Value },

    /// No response at all (connection refused, DNS, timeout)
    #[error("Network error: {0}")]
    Transport(String),

    /// A success status whose body lacks `choices[0].message`
    #[error("AiML API returned unexpected response format: {0}")]
    InvalidResponse(String),
}

impl LlmClientError {
    /// HTTP status the relay uses for this error
    pub fn status_code(&self) -> u16 {
        match self {
            LlmClientError::Validation(_) => 400,
            LlmClientError::Upstream { status, .. } => *status,
            LlmClientError::Configuration
            | LlmClientError::Transport(_)
            | LlmClientError::InvalidResponse(_) => 500,
        }
    }
}

/// Message the relay attaches to upstream failures
pub const UPSTREAM_HINT: &str = "Please check your API key and request format";

/// Message the relay sends for an unusable 2xx body
pub const INVALID_RESPONSE_MESSAGE: &str = "AiML API returned unexpected response format";

impl LlmClientError {
    /// The message a relay caller gets to see for this error.
    ///
    /// For upstream failures that is the upstream's own `message` or
    /// `error.message`, else the relay's generic hint. Other errors use the
    /// `message` field of the relay's error body.
    pub fn caller_message(&self) -> String {
        match self {
            LlmClientError::Validation(message) | LlmClientError::Transport(message) => {
                message.clone()
            }
            LlmClientError::Configuration => self.to_string(),
            LlmClientError::Upstream { details, .. } => [
                details.get("message"),
                details.pointer("/error/message"),
            ]
            .into_iter()
            .flatten()
            .find_map(Value::as_str)
            .unwrap_or(UPSTREAM_HINT)
            .to_string(),
            LlmClientError::InvalidResponse(_) => INVALID_RESPONSE_MESSAGE.to_string(),
        }
    }
}

/// Best human-readable message inside an upstream error body.
///
/// Looks at `message`, then `error.message`, then `error` as a string,
/// then the raw text.
pub fn upstream_message(details: &Value) -> String {
    let candidates = [
        details.get("message"),
        details.pointer("/error/message"),
        details.get("error"),
        details.get("raw_error"),
    ];
    candidates
        .into_iter()
        .flatten()
        .find_map(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| details.to_string())
}
