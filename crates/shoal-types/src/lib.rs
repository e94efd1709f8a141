//! Shared types for the shoal workspace.
//!
//! Everything that crosses a crate boundary lives here: the tool name enum,
//! the chat transcript model, the stream event wire shape and the typed tool
//! result payloads.

pub mod chat;
pub mod result;
pub mod stream;
pub mod tool_registry;
pub mod tools;

pub use chat::*;
pub use result::*;
pub use stream::*;
pub use tool_registry::ToolRegistry;
pub use tools::{ToolCategory, ToolName};
