//! HTTP error responses for the relay.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use llm_client::{LlmClientError, INVALID_RESPONSE_MESSAGE, UPSTREAM_HINT};
use serde_json::{json, Value};
use thiserror::Error;

/// Paths the relay answers on, listed in 404 bodies
pub const AVAILABLE_ENDPOINTS: [&str; 2] = ["/health", "/api/openai/chat"];

#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Chat(#[from] LlmClientError),

    /// The body was not a valid chat request
    #[error("Malformed request body: {0}")]
    BadRequest(String),

    #[error("Endpoint {0} does not exist")]
    NotFound(String),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Chat(err) => StatusCode::from_u16(err.status_code())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }

    /// JSON body sent to the caller
    pub fn body(&self) -> Value {
        match self {
            ApiError::Chat(LlmClientError::Validation(message)) => json!({
                "error": "Invalid or empty messages",
                "message": message,
            }),
            ApiError::BadRequest(details) => json!({
                "error": "Invalid or empty messages",
                "message": "Please provide an array of message objects",
                "details": details,
            }),
            ApiError::Chat(LlmClientError::Configuration) => json!({
                "error": "API Key Error",
                "message": "AiML API key not configured. Please set AIML_API_KEY in .env file",
                "solution": "Create a .env file with AIML_API_KEY=your-key-here",
            }),
            ApiError::Chat(LlmClientError::Upstream { status, details }) => json!({
                "error": "AiML API Request Failed",
                "status": status,
                "details": details,
                "message": UPSTREAM_HINT,
            }),
            ApiError::Chat(LlmClientError::Transport(message)) => json!({
                "error": "Network Error",
                "message": message,
                "details": "Failed to connect to AiML API",
            }),
            ApiError::Chat(LlmClientError::InvalidResponse(_)) => json!({
                "error": "Invalid API Response",
                "message": INVALID_RESPONSE_MESSAGE,
            }),
            ApiError::NotFound(path) => json!({
                "error": "Not Found",
                "message": format!("Endpoint {path} does not exist"),
                "available": AVAILABLE_ENDPOINTS,
            }),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(self.body())).into_response()
    }
}
