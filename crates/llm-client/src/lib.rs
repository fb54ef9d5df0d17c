//! Chat completion client for the AiML API.
//!
//! This crate provides a Rust client for an OpenAI-compatible chat
//! completion endpoint. It handles:
//! - Validating and clamping chat requests
//! - Holding the API key so callers never see it
//! - Mapping every failure mode onto `LlmClientError`
//! - Normalising success bodies into `ChatCompletion`
//!
//! No retries are attempted. A request either succeeds or returns the
//! first error it hits.

pub mod error;
pub mod types;

use std::time::Duration;

use tracing::{debug, error, info, warn};

pub use error::{upstream_message, LlmClientError, INVALID_RESPONSE_MESSAGE, UPSTREAM_HINT};
pub use types::{
    ChatCompletion, ChatMessage, ChatRequest, CompletionMessage, Role, DEFAULT_MAX_TOKENS,
    DEFAULT_TEMPERATURE, MAX_TOKENS_CEILING,
};
use types::UpstreamRequest;

pub const DEFAULT_API_URL: &str = "https://api.aimlapi.com/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "google/gemma-3n-e4b-it";

/// Where and how to reach the completion API
#[derive(Debug, Clone)]
pub struct LlmClientConfig {
    pub api_url: String,
    pub model: String,
    /// `None` or empty makes every chat call fail with `Configuration`
    pub api_key: Option<String>,
    /// `None` waits for as long as the upstream takes
    pub timeout: Option<Duration>,
}

impl Default for LlmClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key: None,
            timeout: None,
        }
    }
}

/// Client for the chat completion service.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct LlmClient {
    http: reqwest::Client,
    config: LlmClientConfig,
}

impl LlmClient {
    /// Build a client from its configuration
    pub fn new(config: LlmClientConfig) -> Result<Self, LlmClientError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| LlmClientError::Transport(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { http, config })
    }

    /// True if an API key is present
    pub fn has_api_key(&self) -> bool {
        self.api_key().is_some()
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    pub fn api_url(&self) -> &str {
        &self.config.api_url
    }

    fn api_key(&self) -> Option<&str> {
        self.config
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }

    /// Send a chat request upstream.
    ///
    /// Checks run in this order, and the first failure is returned:
    /// 1. Empty messages -> `Validation` (nothing is sent)
    /// 2. No API key -> `Configuration` (nothing is sent)
    /// 3. No response -> `Transport`
    /// 4. Non-success status -> `Upstream` with the parsed body
    /// 5. Body without `choices[0].message` -> `InvalidResponse`
    pub async fn chat(&self, request: &ChatRequest) -> Result<ChatCompletion, LlmClientError> {
        request.validate().inspect_err(|_| {
            warn!("Rejected chat request with no messages");
        })?;

        let Some(api_key) = self.api_key() else {
            error!("AiML API key not configured");
            return Err(LlmClientError::Configuration);
        };

        let body = UpstreamRequest {
            model: &self.config.model,
            messages: &request.messages,
            temperature: request.effective_temperature(),
            max_tokens: request.effective_max_tokens(),
        };
        info!(
            "Processing {} messages with model: {}",
            request.messages.len(),
            self.config.model
        );

        let response = self
            .http
            .post(&self.config.api_url)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                error!("AiML API fetch error: {}", e);
                LlmClientError::Transport(e.to_string())
            })?;

        let status = response.status();
        let text = response.text().await.map_err(|e| {
            error!("Failed reading AiML API response body: {}", e);
            LlmClientError::Transport(e.to_string())
        })?;

        if !status.is_success() {
            error!("AiML API error ({}): {}", status.as_u16(), text);
            let details = serde_json::from_str(&text)
                .unwrap_or_else(|_| serde_json::json!({ "raw_error": text }));
            return Err(LlmClientError::Upstream {
                status: status.as_u16(),
                details,
            });
        }

        let completion = ChatCompletion::from_body(&text).inspect_err(|e| {
            error!("Invalid AiML response structure: {}", e);
        })?;
        debug!(
            "Response generated - tokens used: {}",
            completion
                .usage
                .as_ref()
                .and_then(|u| u.get("total_tokens"))
                .map(|t| t.to_string())
                .unwrap_or_else(|| "unknown".to_string())
        );
        Ok(completion)
    }
}
