//! CineMatch server crate.
//!
//! - **config**: environment configuration for the relay
//! - **server**: the axum router that forwards chat requests upstream
//! - **orchestrator**: browse and recommendation extraction over the catalog
//! - **session**: chat sessions that combine the relay with extraction

pub mod config;
pub mod error;
pub mod orchestrator;
pub mod server;
pub mod session;

pub use config::{Config, ConfigError};
pub use error::ApiError;
pub use orchestrator::{MovieRecommendation, RecommendationOrchestrator};
pub use server::{build_router, AppState};
pub use session::{system_prompt, ChatSession, ChatTurn, Transcript};

use std::net::SocketAddr;

use anyhow::{Context, Result};
use llm_client::LlmClient;
use tracing::{info, warn};

/// Run the relay until ctrl-c
pub async fn run(config: Config) -> Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let client = LlmClient::new(config.llm_config()).context("Failed to build HTTP client")?;

    if client.has_api_key() {
        info!("AiML API key configured, model: {}", client.model());
    } else {
        warn!("AIML_API_KEY is not set; chat requests will fail until it is");
    }

    let app = build_router(AppState::new(config, client));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    info!("CineMatch relay listening on http://{}", addr);
    info!("Health check: http://localhost:{}/health", addr.port());

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Relay shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for ctrl-c: {}", e);
        std::future::pending::<()>().await;
    }
}
