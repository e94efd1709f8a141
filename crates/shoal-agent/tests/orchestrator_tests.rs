//! Orchestrator loop tests against the scripted backend
//!
//! The tools here are tiny local `rig` tools so the loop mechanics are
//! exercised without any chain or oracle plumbing.

use rig::{completion::ToolDefinition, tool::Tool};
use serde::Deserialize;
use serde_json::json;
use shoal_agent::backend::{ModelToolCall, ModelTurn};
use shoal_agent::orchestrator::{Orchestrator, OrchestratorError, MAX_TOOL_STEPS};
use shoal_agent::providers::ScriptedBackend;
use shoal_types::result::error_codes;
use shoal_types::{InvocationState, Message, StreamEvent};
use thiserror::Error;
use tokio::sync::mpsc;

#[derive(Deserialize)]
struct EchoArgs {
    #[serde(default)]
    tag: Option<String>,
}

#[derive(Debug, Error)]
enum EchoError {
    #[error("echo exploded")]
    Exploded,
}

/// Returns a well-formed success payload
struct EchoTool;

impl Tool for EchoTool {
    const NAME: &'static str = "echo";
    type Error = EchoError;
    type Args = EchoArgs;
    type Output = String;

    async fn definition(&self, _prompt: String) -> ToolDefinition {
        ToolDefinition {
            name: Self::NAME.to_string(),
            description: "Echo the tag back".to_string(),
            parameters: json!({
                "type": "object",
                "properties": {"tag": {"type": "string"}}
            }),
        }
    }

    async fn call(&self, args: Self::Args) -> Result<Self::Output, Self::Error> {
        Ok(json!({"success": true, "tag": args.tag}).to_string())
    }
}

/// Always fails with an unexpected error
struct BrokenTool;

impl Tool for BrokenTool {
    const NAME: &'static str = "broken";
    type Error = EchoError;
    type Args = EchoArgs;
    type Output = String;

    async fn definition(&self, _prompt: String) -> ToolDefinition {
        ToolDefinition {
            name: Self::NAME.to_string(),
            description: "Always fails".to_string(),
            parameters: json!({"type": "object", "properties": {}}),
        }
    }

    async fn call(&self, _args: Self::Args) -> Result<Self::Output, Self::Error> {
        Err(EchoError::Exploded)
    }
}

fn orchestrator() -> Orchestrator {
    let mut orchestrator = Orchestrator::new();
    orchestrator.register(EchoTool);
    orchestrator.register(BrokenTool);
    orchestrator
}

fn tool_call(id: &str, name: &str, tag: &str) -> ModelToolCall {
    ModelToolCall {
        id: id.to_string(),
        name: name.to_string(),
        arguments: json!({"tag": tag}),
    }
}

async fn collect(
    orchestrator: &Orchestrator,
    backend: &ScriptedBackend,
) -> (Result<Message, OrchestratorError>, Vec<StreamEvent>) {
    let (tx, mut rx) = mpsc::channel(64);
    let history = vec![Message::user("hi")];
    let result = orchestrator.run_turn(backend, "system", &history, &tx).await;
    drop(tx);
    let mut events = Vec::new();
    while let Some(event) = rx.recv().await {
        events.push(event);
    }
    (result, events)
}

#[tokio::test]
async fn streams_text_then_tool_events_in_order() {
    let backend = ScriptedBackend::new(vec![
        ModelTurn {
            text: Some("Checking...".to_string()),
            tool_calls: vec![tool_call("c1", "echo", "first")],
        },
        ModelTurn {
            text: Some("All done.".to_string()),
            tool_calls: vec![],
        },
    ]);

    let (result, events) = collect(&orchestrator(), &backend).await;
    let assistant = result.unwrap();

    let kinds: Vec<&str> = events
        .iter()
        .map(|e| match e {
            StreamEvent::TextDelta { .. } => "text",
            StreamEvent::ToolCall { .. } => "call",
            StreamEvent::ToolResult { .. } => "result",
            StreamEvent::Error { .. } => "error",
            StreamEvent::Done => "done",
        })
        .collect();
    assert_eq!(kinds, vec!["text", "call", "result", "text"]);

    assert_eq!(assistant.content, "Checking...All done.");
    let invocation = assistant.latest_invocation().unwrap();
    assert_eq!(invocation.state, InvocationState::Result);
    assert_eq!(invocation.succeeded(), Some(true));
}

#[tokio::test]
async fn executes_multiple_calls_in_request_order() {
    let backend = ScriptedBackend::new(vec![
        ModelTurn {
            text: None,
            tool_calls: vec![
                tool_call("c1", "echo", "balances"),
                tool_call("c2", "echo", "quote"),
            ],
        },
        ModelTurn {
            text: Some("done".to_string()),
            tool_calls: vec![],
        },
    ]);

    let (result, events) = collect(&orchestrator(), &backend).await;
    let assistant = result.unwrap();

    // c1 must fully resolve before c2 starts
    let order: Vec<String> = events
        .iter()
        .filter_map(|e| match e {
            StreamEvent::ToolCall { tool_call_id, .. } => Some(format!("call:{tool_call_id}")),
            StreamEvent::ToolResult { tool_call_id, .. } => Some(format!("result:{tool_call_id}")),
            _ => None,
        })
        .collect();
    assert_eq!(order, vec!["call:c1", "result:c1", "call:c2", "result:c2"]);

    let ids: Vec<&str> = assistant
        .invocations()
        .map(|i| i.tool_call_id.as_str())
        .collect();
    assert_eq!(ids, vec!["c1", "c2"]);
}

#[tokio::test]
async fn enforces_the_tool_step_ceiling() {
    // A backend that always asks for another tool call
    let turns: Vec<ModelTurn> = (0..20)
        .map(|i| ModelTurn {
            text: None,
            tool_calls: vec![tool_call(&format!("c{i}"), "echo", "again")],
        })
        .collect();
    let backend = ScriptedBackend::new(turns);

    let (result, events) = collect(&orchestrator(), &backend).await;
    assert!(result.is_ok());

    let executed = events
        .iter()
        .filter(|e| matches!(e, StreamEvent::ToolResult { .. }))
        .count();
    assert_eq!(executed, MAX_TOOL_STEPS);
}

#[tokio::test]
async fn unknown_tool_becomes_a_structured_failure() {
    let backend = ScriptedBackend::new(vec![ModelTurn {
        text: None,
        tool_calls: vec![tool_call("c1", "definitely_not_registered", "x")],
    }]);

    let (result, events) = collect(&orchestrator(), &backend).await;
    assert!(result.is_ok());

    let payload = events
        .iter()
        .find_map(|e| match e {
            StreamEvent::ToolResult { result, .. } => Some(result.clone()),
            _ => None,
        })
        .unwrap();
    assert_eq!(payload["success"], false);
    assert_eq!(payload["error"], error_codes::UNKNOWN_TOOL);
}

#[tokio::test]
async fn unexpected_tool_errors_become_generic_failures() {
    let backend = ScriptedBackend::new(vec![ModelTurn {
        text: None,
        tool_calls: vec![tool_call("c1", "broken", "x")],
    }]);

    let (result, events) = collect(&orchestrator(), &backend).await;
    let assistant = result.unwrap();

    let payload = events
        .iter()
        .find_map(|e| match e {
            StreamEvent::ToolResult { result, .. } => Some(result.clone()),
            _ => None,
        })
        .unwrap();
    assert_eq!(payload["success"], false);
    assert_eq!(payload["error"], error_codes::TOOL_EXECUTION_FAILED);

    // The invocation still terminates in Result state; failure lives in the
    // payload, not in a separate state
    let invocation = assistant.latest_invocation().unwrap();
    assert_eq!(invocation.state, InvocationState::Result);
    assert_eq!(invocation.succeeded(), Some(false));
}

#[tokio::test]
async fn backend_failure_surfaces_as_an_error() {
    let backend = ScriptedBackend::failing("model unreachable");
    let (result, events) = collect(&orchestrator(), &backend).await;
    assert!(matches!(result, Err(OrchestratorError::Backend(_))));
    assert!(events.is_empty());
}

#[tokio::test]
async fn resolved_results_are_fed_back_to_the_model() {
    let backend = ScriptedBackend::new(vec![
        ModelTurn {
            text: None,
            tool_calls: vec![tool_call("c1", "echo", "first")],
        },
        ModelTurn {
            text: Some("done".to_string()),
            tool_calls: vec![],
        },
    ]);

    let orchestrator = orchestrator();
    let (result, _) = collect(&orchestrator, &backend).await;
    result.unwrap();

    let requests = backend.requests.lock().unwrap();
    assert_eq!(requests.len(), 2);
    // The second completion sees the in-progress assistant message with the
    // resolved invocation
    let second = &requests[1];
    let assistant = second.last().unwrap();
    let invocation = assistant.latest_invocation().unwrap();
    assert_eq!(invocation.state, InvocationState::Result);
}
