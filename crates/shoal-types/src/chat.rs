//! Chat transcript model
//!
//! Messages are append-only; a message owns an ordered list of parts where
//! tool invocations live alongside text. Invocation state only ever moves
//! forward: `Pending`/`Call` -> `Result`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Message author role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    System,
}

/// Lifecycle of a single tool invocation inside an assistant message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvocationState {
    /// The model has decided to call the tool but arguments may still stream
    Pending,
    /// The tool has been dispatched, no result yet
    Call,
    /// Terminal: the tool produced a result payload
    Result,
}

#[derive(Debug, Error, PartialEq)]
pub enum InvocationError {
    #[error("invocation {0} already holds a result")]
    AlreadyResolved(String),
    #[error("result payload must carry a boolean `success` field")]
    MissingSuccessFlag,
}

/// One model-requested call to a registered tool, tracked through
/// `Pending`/`Call` -> `Result`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolInvocation {
    pub tool_call_id: String,
    pub tool_name: String,
    pub state: InvocationState,
    pub args: serde_json::Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<serde_json::Value>,
}

impl ToolInvocation {
    /// A freshly dispatched call with no result yet
    pub fn call(tool_call_id: impl Into<String>, tool_name: impl Into<String>, args: serde_json::Value) -> Self {
        Self {
            tool_call_id: tool_call_id.into(),
            tool_name: tool_name.into(),
            state: InvocationState::Call,
            args,
            result: None,
        }
    }

    /// Advance to the terminal `Result` state.
    ///
    /// The wire contract requires `result.success` to be a boolean whenever
    /// `state == Result`, and the transition is one-way.
    pub fn advance_to_result(&mut self, result: serde_json::Value) -> Result<(), InvocationError> {
        if self.state == InvocationState::Result {
            return Err(InvocationError::AlreadyResolved(self.tool_call_id.clone()));
        }
        if !result.get("success").map(|v| v.is_boolean()).unwrap_or(false) {
            return Err(InvocationError::MissingSuccessFlag);
        }
        self.state = InvocationState::Result;
        self.result = Some(result);
        Ok(())
    }

    /// Whether the payload reported a successful operation. `None` until the
    /// invocation resolves.
    pub fn succeeded(&self) -> Option<bool> {
        self.result
            .as_ref()
            .and_then(|r| r.get("success"))
            .and_then(|v| v.as_bool())
    }
}

/// Ordered message content: plain text interleaved with tool invocations
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum MessagePart {
    Text { text: String },
    ToolInvocation { invocation: ToolInvocation },
}

/// A single transcript entry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: String,
    pub role: Role,
    pub content: String,
    #[serde(default)]
    pub parts: Vec<MessagePart>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl Message {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        let content = content.into();
        let parts = if content.is_empty() {
            Vec::new()
        } else {
            vec![MessagePart::Text {
                text: content.clone(),
            }]
        };
        Self {
            id: Uuid::new_v4().to_string(),
            role,
            content,
            parts,
            created_at: Utc::now(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    /// An empty assistant message to be filled in as the stream arrives
    pub fn assistant() -> Self {
        Self::new(Role::Assistant, "")
    }

    /// Append streamed text, extending the trailing text part when possible
    pub fn append_text(&mut self, delta: &str) {
        self.content.push_str(delta);
        match self.parts.last_mut() {
            Some(MessagePart::Text { text }) => text.push_str(delta),
            _ => self.parts.push(MessagePart::Text {
                text: delta.to_string(),
            }),
        }
    }

    pub fn push_invocation(&mut self, invocation: ToolInvocation) {
        self.parts.push(MessagePart::ToolInvocation { invocation });
    }

    /// All tool invocations in original (model-request) order
    pub fn invocations(&self) -> impl Iterator<Item = &ToolInvocation> {
        self.parts.iter().filter_map(|p| match p {
            MessagePart::ToolInvocation { invocation } => Some(invocation),
            MessagePart::Text { .. } => None,
        })
    }

    pub fn invocations_mut(&mut self) -> impl Iterator<Item = &mut ToolInvocation> {
        self.parts.iter_mut().filter_map(|p| match p {
            MessagePart::ToolInvocation { invocation } => Some(invocation),
            MessagePart::Text { .. } => None,
        })
    }

    pub fn invocation_mut(&mut self, tool_call_id: &str) -> Option<&mut ToolInvocation> {
        self.invocations_mut()
            .find(|i| i.tool_call_id == tool_call_id)
    }

    /// Last-wins lookup: the most recently issued invocation, if any
    pub fn latest_invocation(&self) -> Option<&ToolInvocation> {
        self.invocations().last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn state_advances_monotonically() {
        let mut inv = ToolInvocation::call("call_1", "swap", json!({"amount": "1"}));
        assert_eq!(inv.state, InvocationState::Call);

        inv.advance_to_result(json!({"success": true})).unwrap();
        assert_eq!(inv.state, InvocationState::Result);
        assert_eq!(inv.succeeded(), Some(true));

        let err = inv.advance_to_result(json!({"success": false})).unwrap_err();
        assert_eq!(err, InvocationError::AlreadyResolved("call_1".to_string()));
    }

    #[test]
    fn result_requires_boolean_success() {
        let mut inv = ToolInvocation::call("call_2", "swap", json!({}));
        let err = inv.advance_to_result(json!({"route": {}})).unwrap_err();
        assert_eq!(err, InvocationError::MissingSuccessFlag);
        assert_eq!(inv.state, InvocationState::Call);
    }

    #[test]
    fn message_parts_preserve_order() {
        let mut msg = Message::assistant();
        msg.append_text("Here is your portfolio. ");
        msg.push_invocation(ToolInvocation::call("a", "get_all_balances", json!({})));
        msg.append_text("And a quote. ");
        msg.push_invocation(ToolInvocation::call("b", "swap", json!({})));

        let names: Vec<_> = msg.invocations().map(|i| i.tool_name.clone()).collect();
        assert_eq!(names, vec!["get_all_balances", "swap"]);
        assert_eq!(msg.latest_invocation().unwrap().tool_call_id, "b");
        assert_eq!(msg.parts.len(), 4);
    }

    #[test]
    fn append_text_extends_trailing_part() {
        let mut msg = Message::assistant();
        msg.append_text("Hel");
        msg.append_text("lo");
        assert_eq!(msg.content, "Hello");
        assert_eq!(msg.parts.len(), 1);
    }
}
