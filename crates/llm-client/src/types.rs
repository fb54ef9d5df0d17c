//! Wire types for chat completion requests and responses.

use crate::error::LlmClientError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const DEFAULT_TEMPERATURE: f32 = 0.8;
pub const DEFAULT_MAX_TOKENS: u32 = 1000;
/// Upper bound applied to `max_tokens` before forwarding
pub const MAX_TOKENS_CEILING: u32 = 2000;
pub const MIN_TEMPERATURE: f32 = 0.0;
pub const MAX_TEMPERATURE: f32 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// One turn of a conversation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }
}

/// A chat request as accepted by the relay.
///
/// Missing `messages` deserializes as empty so it fails validation rather
/// than JSON decoding.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub messages: Vec<ChatMessage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

impl ChatRequest {
    pub fn new(messages: Vec<ChatMessage>) -> Self {
        Self {
            messages,
            temperature: None,
            max_tokens: None,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    pub fn validate(&self) -> Result<(), LlmClientError> {
        if self.messages.is_empty() {
            return Err(LlmClientError::Validation(
                "Please provide an array of message objects".to_string(),
            ));
        }
        Ok(())
    }

    /// Temperature after defaulting and clamping to `[0, 2]`
    pub fn effective_temperature(&self) -> f32 {
        self.temperature
            .unwrap_or(DEFAULT_TEMPERATURE)
            .clamp(MIN_TEMPERATURE, MAX_TEMPERATURE)
    }

    /// Token budget after defaulting and capping at `MAX_TOKENS_CEILING`
    pub fn effective_max_tokens(&self) -> u32 {
        self.max_tokens
            .unwrap_or(DEFAULT_MAX_TOKENS)
            .min(MAX_TOKENS_CEILING)
    }
}

/// Body posted to the upstream completion endpoint
#[derive(Debug, Serialize)]
pub(crate) struct UpstreamRequest<'a> {
    pub model: &'a str,
    pub messages: &'a [ChatMessage],
    pub temperature: f32,
    pub max_tokens: u32,
}

/// The assistant message inside a completion.
///
/// Kept loose: upstreams disagree on roles and sometimes send a null
/// content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionMessage {
    #[serde(default = "assistant_role")]
    pub role: String,
    #[serde(default)]
    pub content: Option<String>,
}

fn assistant_role() -> String {
    "assistant".to_string()
}

/// A normalised completion, whatever envelope the upstream used
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatCompletion {
    pub message: CompletionMessage,
    pub finish_reason: Option<String>,
    pub usage: Option<Value>,
    pub model: Option<String>,
}

impl ChatCompletion {
    /// Trimmed reply text, if there is any
    pub fn content(&self) -> Option<&str> {
        self.message
            .content
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty())
    }

    /// Parse an upstream success body.
    ///
    /// Requires `choices[0].message` to be an object; everything else is
    /// optional.
    pub fn from_body(body: &str) -> Result<Self, LlmClientError> {
        let value: Value = serde_json::from_str(body)
            .map_err(|e| LlmClientError::InvalidResponse(format!("body is not JSON: {e}")))?;

        let choice = value
            .pointer("/choices/0")
            .ok_or_else(|| LlmClientError::InvalidResponse("missing choices[0]".to_string()))?;
        let message = choice
            .get("message")
            .filter(|m| m.is_object())
            .ok_or_else(|| {
                LlmClientError::InvalidResponse("missing choices[0].message".to_string())
            })?;
        let message: CompletionMessage = serde_json::from_value(message.clone())
            .map_err(|e| LlmClientError::InvalidResponse(e.to_string()))?;

        Ok(Self {
            message,
            finish_reason: choice
                .get("finish_reason")
                .and_then(Value::as_str)
                .map(str::to_string),
            usage: value.get("usage").filter(|u| !u.is_null()).cloned(),
            model: value.get("model").and_then(Value::as_str).map(str::to_string),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_defaults() {
        let request: ChatRequest =
            serde_json::from_str(r#"{"messages":[{"role":"user","content":"hi"}]}"#).unwrap();
        assert_eq!(request.messages, vec![ChatMessage::user("hi")]);
        assert_eq!(request.effective_temperature(), 0.8);
        assert_eq!(request.effective_max_tokens(), 1000);
    }

    #[test]
    fn test_clamping() {
        let msgs = vec![ChatMessage::user("hi")];
        assert_eq!(ChatRequest::new(msgs.clone()).with_temperature(5.0).effective_temperature(), 2.0);
        assert_eq!(ChatRequest::new(msgs.clone()).with_temperature(-1.0).effective_temperature(), 0.0);
        assert_eq!(ChatRequest::new(msgs.clone()).with_temperature(1.3).effective_temperature(), 1.3);
        assert_eq!(ChatRequest::new(msgs).with_max_tokens(5000).effective_max_tokens(), 2000);
    }

    #[test]
    fn test_missing_messages_fail_validation() {
        let request: ChatRequest = serde_json::from_str("{}").unwrap();
        assert!(matches!(request.validate(), Err(LlmClientError::Validation(_))));
    }

    #[test]
    fn test_completion_from_body() {
        let body = r#"{
            "id": "x",
            "model": "google/gemma-3n-e4b-it",
            "choices": [{"index": 0, "message": {"role": "assistant", "content": " Try Heat. "}, "finish_reason": "stop"}],
            "usage": {"total_tokens": 42}
        }"#;
        let completion = ChatCompletion::from_body(body).unwrap();
        assert_eq!(completion.content(), Some("Try Heat."));
        assert_eq!(completion.finish_reason.as_deref(), Some("stop"));
        assert_eq!(completion.model.as_deref(), Some("google/gemma-3n-e4b-it"));
        assert_eq!(completion.usage.unwrap()["total_tokens"], 42);
    }

    #[test]
    fn test_completion_without_message_is_invalid() {
        for body in [r#"{"choices": []}"#, r#"{"choices": [{"text": "hi"}]}"#, "not json"] {
            assert!(matches!(
                ChatCompletion::from_body(body),
                Err(LlmClientError::InvalidResponse(_))
            ));
        }
    }

    #[test]
    fn test_null_content_is_empty() {
        let body = r#"{"choices": [{"message": {"content": null}}]}"#;
        let completion = ChatCompletion::from_body(body).unwrap();
        assert_eq!(completion.content(), None);
        assert_eq!(completion.message.role, "assistant");
    }
}
