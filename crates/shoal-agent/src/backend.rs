//! Model backend abstraction
//!
//! The orchestrator drives a `CompletionBackend` one decision at a time; the
//! production implementation speaks the Anthropic Messages API and the
//! scripted backend drives the tests.

use async_trait::async_trait;
use rig::completion::ToolDefinition;
use shoal_types::Message;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("Missing {0} environment variable")]
    MissingCredentials(&'static str),
    #[error("transport error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("provider error: {0}")]
    Provider(String),
    #[error("malformed provider response: {0}")]
    Malformed(String),
}

/// One tool call requested by the model
#[derive(Debug, Clone)]
pub struct ModelToolCall {
    pub id: String,
    pub name: String,
    pub arguments: serde_json::Value,
}

/// One model decision: optional text plus the tool calls it requested,
/// in request order
#[derive(Debug, Clone, Default)]
pub struct ModelTurn {
    pub text: Option<String>,
    pub tool_calls: Vec<ModelToolCall>,
}

/// Everything the provider needs for one completion
#[derive(Debug)]
pub struct TurnRequest {
    pub system: String,
    pub messages: Vec<Message>,
    pub tools: Vec<ToolDefinition>,
}

#[async_trait]
pub trait CompletionBackend: Send + Sync {
    async fn complete(&self, request: TurnRequest) -> Result<ModelTurn, BackendError>;
}
