//! Conversation orchestrator service
//!
//! axum surface for the chat turn: `POST /api/chat` streams newline-delimited
//! JSON `StreamEvent`s; `GET /api/health` reports liveness. A turn that
//! cannot even start (missing model credentials) fails with a structured
//! error status, never a silent empty response.

pub mod backend;
pub mod config;
pub mod orchestrator;
pub mod prompt;
pub mod providers;

use axum::{
    body::Body,
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use shoal_sui::ChainReader;
use shoal_types::{Message, StreamEvent};
use std::sync::Arc;
use tokio::sync::mpsc;
use tower_http::cors::CorsLayer;
use tracing::{error, info};

use crate::backend::CompletionBackend;
use crate::config::AgentConfig;
use crate::orchestrator::Orchestrator;
use crate::providers::ClaudeBackend;

/// Shared per-process state
#[derive(Clone)]
pub struct AppState {
    pub config: AgentConfig,
    pub chain: Arc<dyn ChainReader>,
    pub orchestrator: Arc<Orchestrator>,
}

/// Chat turn request: the running transcript plus the caller's wallet
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub messages: Vec<Message>,
    #[serde(default)]
    pub address: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Create API router with all endpoints
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health_check))
        .route("/api/chat", post(chat))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// One chat turn, streamed as newline-delimited JSON events
async fn chat(State(state): State<AppState>, Json(request): Json<ChatRequest>) -> Response {
    // Credentials are checked per turn so a missing key is a deterministic,
    // client-visible failure
    let backend = match ClaudeBackend::from_env(state.config.model.clone()) {
        Ok(backend) => Arc::new(backend) as Arc<dyn CompletionBackend>,
        Err(e) => {
            error!("[chat] {e}");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: e.to_string(),
                }),
            )
                .into_response();
        }
    };

    let system = prompt::build_system_prompt(state.chain.as_ref(), request.address.as_deref()).await;
    info!(
        "[chat] Turn with {} prior message(s)",
        request.messages.len()
    );

    let (tx, rx) = mpsc::channel::<StreamEvent>(32);
    let orchestrator = state.orchestrator.clone();
    let history = request.messages;

    tokio::spawn(async move {
        match orchestrator
            .run_turn(backend.as_ref(), &system, &history, &tx)
            .await
        {
            Ok(_) => {}
            Err(orchestrator::OrchestratorError::Cancelled) => {
                // Client is gone; nothing left to notify
                return;
            }
            Err(e) => {
                error!("[chat] Turn failed: {e}");
                let _ = tx
                    .send(StreamEvent::Error {
                        message: "An error occurred while processing your request".to_string(),
                    })
                    .await;
            }
        }
        let _ = tx.send(StreamEvent::Done).await;
    });

    let stream = futures::stream::unfold(rx, |mut rx| async move {
        let event = rx.recv().await?;
        let line = match serde_json::to_string(&event) {
            Ok(json) => json + "\n",
            Err(_) => "{\"type\":\"error\",\"message\":\"serialization failure\"}\n".to_string(),
        };
        Some((Ok::<_, std::convert::Infallible>(line), rx))
    });

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "application/x-ndjson")
        .body(Body::from_stream(stream))
        .unwrap_or_else(|_| StatusCode::INTERNAL_SERVER_ERROR.into_response())
}
