//! Streamed turn events
//!
//! The orchestrator emits these incrementally over the chat response body so
//! the client can render partial assistant text before tool results arrive.

use serde::{Deserialize, Serialize};

/// One event in a streamed assistant turn
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum StreamEvent {
    /// Incremental assistant text
    #[serde(rename_all = "camelCase")]
    TextDelta { delta: String },

    /// The model requested a tool call; the tool is now executing
    #[serde(rename_all = "camelCase")]
    ToolCall {
        tool_call_id: String,
        tool_name: String,
        args: serde_json::Value,
    },

    /// The tool produced its result payload
    #[serde(rename_all = "camelCase")]
    ToolResult {
        tool_call_id: String,
        tool_name: String,
        result: serde_json::Value,
    },

    /// The turn failed; the stream ends after this event
    #[serde(rename_all = "camelCase")]
    Error { message: String },

    /// Clean end of turn
    Done,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn tagged_wire_shape_round_trips() {
        let event = StreamEvent::ToolCall {
            tool_call_id: "call_9".to_string(),
            tool_name: "swap".to_string(),
            args: json!({"amount": "1000000000"}),
        };
        let wire = serde_json::to_value(&event).unwrap();
        assert_eq!(wire["type"], "tool-call");
        assert_eq!(wire["toolCallId"], "call_9");

        let back: StreamEvent = serde_json::from_value(wire).unwrap();
        match back {
            StreamEvent::ToolCall { tool_name, .. } => assert_eq!(tool_name, "swap"),
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn done_has_no_payload() {
        let wire = serde_json::to_string(&StreamEvent::Done).unwrap();
        assert_eq!(wire, r#"{"type":"done"}"#);
    }
}
