pub mod claude;
pub mod scripted;

pub use claude::ClaudeBackend;
pub use scripted::ScriptedBackend;
