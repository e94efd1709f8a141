//! Scripted backend for tests and offline mode
//!
//! Pops one pre-programmed turn per completion and records every request it
//! saw, so tests can assert on the exact transcript the model would receive.

use crate::backend::{BackendError, CompletionBackend, ModelTurn, TurnRequest};
use async_trait::async_trait;
use shoal_types::Message;
use std::collections::VecDeque;
use std::sync::Mutex;

#[derive(Default)]
pub struct ScriptedBackend {
    turns: Mutex<VecDeque<ModelTurn>>,
    /// Transcript snapshots, one per completion call
    pub requests: Mutex<Vec<Vec<Message>>>,
    fail_with: Option<String>,
}

impl ScriptedBackend {
    pub fn new(turns: Vec<ModelTurn>) -> Self {
        Self {
            turns: Mutex::new(turns.into()),
            requests: Mutex::new(Vec::new()),
            fail_with: None,
        }
    }

    /// A backend whose every completion fails
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            turns: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
            fail_with: Some(message.into()),
        }
    }
}

#[async_trait]
impl CompletionBackend for ScriptedBackend {
    async fn complete(&self, request: TurnRequest) -> Result<ModelTurn, BackendError> {
        if let Some(message) = &self.fail_with {
            return Err(BackendError::Provider(message.clone()));
        }
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request.messages.clone());
        }
        let next = self
            .turns
            .lock()
            .ok()
            .and_then(|mut turns| turns.pop_front());
        // Scripts that run dry fall back to a plain-text close
        Ok(next.unwrap_or(ModelTurn {
            text: Some("Done.".to_string()),
            tool_calls: Vec::new(),
        }))
    }
}
