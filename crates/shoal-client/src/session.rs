//! Session state
//!
//! One owned object with defined mutation points: a user message is pushed,
//! an assistant turn begins, stream events mutate the active assistant
//! message, the wallet connects or disconnects. The message history is
//! append-only and a finalized message is never touched again.

use shoal_types::{InvocationError, Message, StreamEvent, ToolInvocation};
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error, PartialEq)]
pub enum SessionError {
    #[error("no assistant turn is in progress")]
    NoActiveTurn,
    #[error("unknown invocation: {0}")]
    UnknownInvocation(String),
    #[error(transparent)]
    Invocation(#[from] InvocationError),
}

/// Explicitly owned client session
#[derive(Debug, Default)]
pub struct ChatSession {
    messages: Vec<Message>,
    /// Index of the assistant message currently being streamed
    active: Option<usize>,
    wallet_address: Option<String>,
    last_error: Option<String>,
}

impl ChatSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read model for rendering
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn wallet_connected(&self) -> bool {
        self.wallet_address.is_some()
    }

    pub fn wallet_address(&self) -> Option<&str> {
        self.wallet_address.as_deref()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn connect_wallet(&mut self, address: impl Into<String>) {
        self.wallet_address = Some(address.into());
    }

    pub fn disconnect_wallet(&mut self) {
        self.wallet_address = None;
    }

    /// Append the user's message
    pub fn push_user(&mut self, text: impl Into<String>) -> &Message {
        self.messages.push(Message::user(text));
        &self.messages[self.messages.len() - 1]
    }

    /// Start an assistant turn; stream events apply to it until `Done`
    pub fn begin_assistant(&mut self) -> &Message {
        self.messages.push(Message::assistant());
        self.active = Some(self.messages.len() - 1);
        self.last_error = None;
        &self.messages[self.messages.len() - 1]
    }

    fn active_message(&mut self) -> Result<&mut Message, SessionError> {
        let index = self.active.ok_or(SessionError::NoActiveTurn)?;
        self.messages.get_mut(index).ok_or(SessionError::NoActiveTurn)
    }

    /// Apply one stream event to the active assistant message
    pub fn apply_event(&mut self, event: StreamEvent) -> Result<(), SessionError> {
        match event {
            StreamEvent::TextDelta { delta } => {
                self.active_message()?.append_text(&delta);
            }
            StreamEvent::ToolCall {
                tool_call_id,
                tool_name,
                args,
            } => {
                self.active_message()?
                    .push_invocation(ToolInvocation::call(tool_call_id, tool_name, args));
            }
            StreamEvent::ToolResult {
                tool_call_id,
                result,
                ..
            } => {
                let message = self.active_message()?;
                let invocation = message
                    .invocation_mut(&tool_call_id)
                    .ok_or(SessionError::UnknownInvocation(tool_call_id))?;
                invocation.advance_to_result(result)?;
            }
            StreamEvent::Error { message } => {
                warn!("[ChatSession] Turn error: {message}");
                self.last_error = Some(message);
            }
            StreamEvent::Done => {
                // Finalize: the message is immutable from here on
                self.active = None;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use shoal_types::InvocationState;

    fn result_event(id: &str, success: bool) -> StreamEvent {
        StreamEvent::ToolResult {
            tool_call_id: id.to_string(),
            tool_name: "swap".to_string(),
            result: json!({"success": success}),
        }
    }

    #[test]
    fn a_full_turn_builds_an_ordered_message() {
        let mut session = ChatSession::new();
        session.push_user("swap 1 SUI to USDC");
        session.begin_assistant();

        session
            .apply_event(StreamEvent::TextDelta {
                delta: "Quoting...".to_string(),
            })
            .unwrap();
        session
            .apply_event(StreamEvent::ToolCall {
                tool_call_id: "c1".to_string(),
                tool_name: "swap".to_string(),
                args: json!({"amount": "1000000000"}),
            })
            .unwrap();
        session.apply_event(result_event("c1", true)).unwrap();
        session.apply_event(StreamEvent::Done).unwrap();

        let assistant = session.messages().last().unwrap();
        assert_eq!(assistant.content, "Quoting...");
        let invocation = assistant.latest_invocation().unwrap();
        assert_eq!(invocation.state, InvocationState::Result);
    }

    #[test]
    fn events_after_done_are_rejected() {
        let mut session = ChatSession::new();
        session.push_user("hi");
        session.begin_assistant();
        session.apply_event(StreamEvent::Done).unwrap();

        let err = session
            .apply_event(StreamEvent::TextDelta {
                delta: "late".to_string(),
            })
            .unwrap_err();
        assert_eq!(err, SessionError::NoActiveTurn);
    }

    #[test]
    fn results_for_unknown_invocations_are_rejected() {
        let mut session = ChatSession::new();
        session.push_user("hi");
        session.begin_assistant();
        let err = session.apply_event(result_event("ghost", true)).unwrap_err();
        assert_eq!(err, SessionError::UnknownInvocation("ghost".to_string()));
    }

    #[test]
    fn double_results_violate_monotonicity() {
        let mut session = ChatSession::new();
        session.push_user("hi");
        session.begin_assistant();
        session
            .apply_event(StreamEvent::ToolCall {
                tool_call_id: "c1".to_string(),
                tool_name: "swap".to_string(),
                args: json!({}),
            })
            .unwrap();
        session.apply_event(result_event("c1", true)).unwrap();
        assert!(matches!(
            session.apply_event(result_event("c1", false)),
            Err(SessionError::Invocation(_))
        ));
    }

    #[test]
    fn error_events_set_the_session_error() {
        let mut session = ChatSession::new();
        session.push_user("hi");
        session.begin_assistant();
        session
            .apply_event(StreamEvent::Error {
                message: "model unreachable".to_string(),
            })
            .unwrap();
        assert_eq!(session.last_error(), Some("model unreachable"));
    }

    #[test]
    fn wallet_state_transitions() {
        let mut session = ChatSession::new();
        assert!(!session.wallet_connected());
        session.connect_wallet("0xabc");
        assert_eq!(session.wallet_address(), Some("0xabc"));
        session.disconnect_wallet();
        assert!(!session.wallet_connected());
    }
}
