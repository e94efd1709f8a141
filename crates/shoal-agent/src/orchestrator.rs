//! Bounded tool-calling loop
//!
//! An explicit interpreter loop: each iteration submits the transcript to
//! the model backend, streams any text out, then executes the requested tool
//! calls strictly in request order. A fixed step ceiling bounds the number
//! of tool executions per user turn so a model cannot chain autonomously
//! forever. Tool calls are never reordered or parallelized; the model's
//! multi-step reasoning stays causally consistent.

use crate::backend::{CompletionBackend, ModelToolCall, TurnRequest};
use rig::completion::ToolDefinition;
use rig::tool::ToolDyn;
use serde_json::json;
use shoal_types::result::error_codes;
use shoal_types::{Message, StreamEvent, ToolInvocation};
use std::collections::BTreeMap;
use thiserror::Error;
use tokio::sync::mpsc;
use tracing::{info, instrument, warn};

/// Maximum tool executions per user turn
pub const MAX_TOOL_STEPS: usize = 5;

#[derive(Debug, Error)]
pub enum OrchestratorError {
    #[error("model backend failed: {0}")]
    Backend(#[from] crate::backend::BackendError),
    #[error("client went away")]
    Cancelled,
}

/// Name-keyed dynamic tool dispatch
pub struct Orchestrator {
    tools: BTreeMap<String, Box<dyn ToolDyn>>,
}

impl Orchestrator {
    pub fn new() -> Self {
        Self {
            tools: BTreeMap::new(),
        }
    }

    /// Register a tool under its own name
    pub fn register(&mut self, tool: impl ToolDyn + 'static) {
        self.tools.insert(tool.name(), Box::new(tool));
    }

    pub fn tool_names(&self) -> Vec<&str> {
        self.tools.keys().map(|k| k.as_str()).collect()
    }

    async fn tool_definitions(&self) -> Vec<ToolDefinition> {
        let mut definitions = Vec::with_capacity(self.tools.len());
        for tool in self.tools.values() {
            definitions.push(tool.definition(String::new()).await);
        }
        definitions
    }

    /// Execute one tool call. Never fails: unknown tools and execution
    /// errors come back as `success:false` payloads so the model can react.
    async fn execute_tool(&self, call: &ModelToolCall) -> serde_json::Value {
        let Some(tool) = self.tools.get(&call.name) else {
            warn!("[Orchestrator] Unknown tool requested: {}", call.name);
            return json!({
                "success": false,
                "error": error_codes::UNKNOWN_TOOL,
                "detail": call.name,
            });
        };

        match tool.call(call.arguments.to_string()).await {
            Ok(output) => match serde_json::from_str::<serde_json::Value>(&output) {
                // The wire contract needs a boolean `success`; wrap payloads
                // that lack one instead of breaking the invariant
                Ok(value) if value.get("success").map(|v| v.is_boolean()).unwrap_or(false) => value,
                Ok(value) => json!({"success": true, "data": value}),
                Err(_) => json!({"success": true, "data": output}),
            },
            Err(e) => {
                warn!("[Orchestrator] Tool {} failed: {e}", call.name);
                json!({
                    "success": false,
                    "error": error_codes::TOOL_EXECUTION_FAILED,
                    "detail": e.to_string(),
                })
            }
        }
    }

    /// Drive one user turn to completion, streaming events as they happen.
    /// Returns the finalized assistant message.
    #[instrument(name = "run_turn", skip_all)]
    pub async fn run_turn(
        &self,
        backend: &dyn CompletionBackend,
        system: &str,
        history: &[Message],
        events: &mpsc::Sender<StreamEvent>,
    ) -> Result<Message, OrchestratorError> {
        let tools = self.tool_definitions().await;
        let mut assistant = Message::assistant();
        let mut steps_used = 0usize;

        'turn: loop {
            let mut messages = history.to_vec();
            if !assistant.parts.is_empty() {
                messages.push(assistant.clone());
            }

            let turn = backend
                .complete(TurnRequest {
                    system: system.to_string(),
                    messages,
                    tools: tools.clone(),
                })
                .await?;

            if let Some(text) = turn.text {
                if !text.is_empty() {
                    assistant.append_text(&text);
                    emit(events, StreamEvent::TextDelta { delta: text }).await?;
                }
            }

            if turn.tool_calls.is_empty() {
                break;
            }

            for call in turn.tool_calls {
                if steps_used >= MAX_TOOL_STEPS {
                    warn!("[Orchestrator] Tool step ceiling reached ({MAX_TOOL_STEPS}), ending turn");
                    break 'turn;
                }
                steps_used += 1;

                info!(
                    "[Orchestrator] Step {steps_used}/{MAX_TOOL_STEPS}: {} ({})",
                    call.name, call.id
                );
                assistant.push_invocation(ToolInvocation::call(
                    call.id.clone(),
                    call.name.clone(),
                    call.arguments.clone(),
                ));
                emit(
                    events,
                    StreamEvent::ToolCall {
                        tool_call_id: call.id.clone(),
                        tool_name: call.name.clone(),
                        args: call.arguments.clone(),
                    },
                )
                .await?;

                // Strictly sequential: the next call does not start until
                // this result is in
                let result = self.execute_tool(&call).await;

                if let Some(invocation) = assistant.invocation_mut(&call.id) {
                    if let Err(e) = invocation.advance_to_result(result.clone()) {
                        warn!("[Orchestrator] Invocation state error: {e}");
                    }
                }
                emit(
                    events,
                    StreamEvent::ToolResult {
                        tool_call_id: call.id,
                        tool_name: call.name,
                        result,
                    },
                )
                .await?;
            }

            if steps_used >= MAX_TOOL_STEPS {
                break;
            }
        }

        Ok(assistant)
    }
}

impl Default for Orchestrator {
    fn default() -> Self {
        Self::new()
    }
}

/// A dropped receiver means the client navigated away; the in-flight turn is
/// simply abandoned
async fn emit(
    events: &mpsc::Sender<StreamEvent>,
    event: StreamEvent,
) -> Result<(), OrchestratorError> {
    events
        .send(event)
        .await
        .map_err(|_| OrchestratorError::Cancelled)
}
