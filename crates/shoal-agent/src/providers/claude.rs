//! Anthropic Messages API backend
//!
//! Speaks the vendor wire format directly over reqwest: the chat transcript
//! maps onto content blocks (`text`, `tool_use`, `tool_result`) and the tool
//! registry onto the provider's tool schema.

use crate::backend::{BackendError, CompletionBackend, ModelToolCall, ModelTurn, TurnRequest};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use shoal_types::{Message, MessagePart, Role};
use tracing::{info, instrument};

const API_URL: &str = "https://api.anthropic.com/v1/messages";
const API_VERSION: &str = "2023-06-01";
const MAX_TOKENS: u32 = 2048;

pub const API_KEY_ENV: &str = "ANTHROPIC_API_KEY";

/// Claude-backed completion backend
#[derive(Clone)]
pub struct ClaudeBackend {
    http: reqwest::Client,
    api_key: String,
    model: String,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
enum ContentBlock {
    #[serde(rename = "text")]
    Text { text: String },
    #[serde(rename = "tool_use")]
    ToolUse {
        id: String,
        name: String,
        input: Value,
    },
    #[serde(other)]
    Other,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: Option<ApiErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
}

impl ClaudeBackend {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: api_key.into(),
            model: model.into(),
        }
    }

    /// Fails deterministically when the key is not configured
    pub fn from_env(model: impl Into<String>) -> Result<Self, BackendError> {
        let api_key = std::env::var(API_KEY_ENV)
            .map_err(|_| BackendError::MissingCredentials(API_KEY_ENV))?;
        Ok(Self::new(api_key, model))
    }

    /// Convert the transcript to provider messages. Each resolved tool
    /// invocation becomes a `tool_use` block in the assistant message plus a
    /// `tool_result` block in a following user message.
    fn convert_messages(messages: &[Message]) -> Vec<Value> {
        let mut converted = Vec::new();
        for message in messages {
            match message.role {
                Role::System => {}
                Role::User => {
                    if !message.content.is_empty() {
                        converted.push(json!({
                            "role": "user",
                            "content": [{"type": "text", "text": message.content}],
                        }));
                    }
                }
                Role::Assistant => {
                    let mut blocks = Vec::new();
                    let mut results = Vec::new();
                    for part in &message.parts {
                        match part {
                            MessagePart::Text { text } => {
                                if !text.is_empty() {
                                    blocks.push(json!({"type": "text", "text": text}));
                                }
                            }
                            MessagePart::ToolInvocation { invocation } => {
                                blocks.push(json!({
                                    "type": "tool_use",
                                    "id": invocation.tool_call_id,
                                    "name": invocation.tool_name,
                                    "input": invocation.args,
                                }));
                                if let Some(result) = &invocation.result {
                                    results.push(json!({
                                        "type": "tool_result",
                                        "tool_use_id": invocation.tool_call_id,
                                        "content": result.to_string(),
                                    }));
                                }
                            }
                        }
                    }
                    if !blocks.is_empty() {
                        converted.push(json!({"role": "assistant", "content": blocks}));
                    }
                    if !results.is_empty() {
                        converted.push(json!({"role": "user", "content": results}));
                    }
                }
            }
        }
        converted
    }
}

#[async_trait]
impl CompletionBackend for ClaudeBackend {
    #[instrument(name = "claude_complete", skip_all, fields(model = %self.model))]
    async fn complete(&self, request: TurnRequest) -> Result<ModelTurn, BackendError> {
        let tools: Vec<Value> = request
            .tools
            .iter()
            .map(|t| {
                json!({
                    "name": t.name,
                    "description": t.description,
                    "input_schema": t.parameters,
                })
            })
            .collect();

        let body = json!({
            "model": self.model,
            "max_tokens": MAX_TOKENS,
            "system": request.system,
            "messages": Self::convert_messages(&request.messages),
            "tools": tools,
        });

        let response = self
            .http
            .post(API_URL)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let detail = response
                .json::<ApiErrorBody>()
                .await
                .ok()
                .and_then(|b| b.error)
                .map(|e| e.message)
                .unwrap_or_else(|| status.to_string());
            return Err(BackendError::Provider(detail));
        }

        let parsed: MessagesResponse = response
            .json()
            .await
            .map_err(|e| BackendError::Malformed(e.to_string()))?;

        let mut turn = ModelTurn::default();
        let mut text_parts = Vec::new();
        for block in parsed.content {
            match block {
                ContentBlock::Text { text } => text_parts.push(text),
                ContentBlock::ToolUse { id, name, input } => {
                    turn.tool_calls.push(ModelToolCall {
                        id,
                        name,
                        arguments: input,
                    });
                }
                ContentBlock::Other => {}
            }
        }
        if !text_parts.is_empty() {
            turn.text = Some(text_parts.join(""));
        }

        info!(
            "[ClaudeBackend] Completion with {} tool call(s)",
            turn.tool_calls.len()
        );
        Ok(turn)
    }
}
