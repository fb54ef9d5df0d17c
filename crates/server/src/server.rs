use axum::extract::rejection::JsonRejection;
use axum::extract::{DefaultBodyLimit, State};
use axum::http::{header, HeaderValue, Method, Uri};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::{SecondsFormat, Utc};
use llm_client::{ChatRequest, LlmClient};
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};

use crate::config::Config;
use crate::error::ApiError;

pub const SERVICE_NAME: &str = "CineMatch AI Proxy";

/// Largest accepted request body; transcripts plus the system prompt get big
pub const BODY_LIMIT_BYTES: usize = 10 * 1024 * 1024;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub client: Arc<LlmClient>,
}

impl AppState {
    pub fn new(config: Config, client: LlmClient) -> Self {
        Self {
            config: Arc::new(config),
            client: Arc::new(client),
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.cors_origins);

    Router::new()
        .route("/health", get(health_handler))
        .route("/api/openai/chat", post(chat_handler))
        .fallback(fallback_handler)
        .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true)
}

async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    let api_key = if state.client.has_api_key() {
        "✅ Configured"
    } else {
        "❌ Missing"
    };
    Json(json!({
        "status": "ok",
        "service": SERVICE_NAME,
        "timestamp": Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        "apiKey": api_key,
    }))
}

/// Forward a chat request upstream and answer in the OpenAI envelope
async fn chat_handler(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(request) = payload.inspect_err(|rejection| {
        warn!("Rejected chat body: {}", rejection.body_text());
    })?;

    let completion = state.client.chat(&request).await?;
    info!("Relayed chat completion");

    Ok(Json(json!({
        "choices": [{
            "message": completion.message,
            "finish_reason": completion.finish_reason,
        }],
        "usage": completion.usage,
        "model": completion.model,
    })))
}

async fn fallback_handler(uri: Uri) -> ApiError {
    ApiError::NotFound(uri.path().to_string())
}
