//! Client session core
//!
//! The pieces a chat front-end needs beyond the HTTP stream: an explicitly
//! owned session state with defined mutation points, the invocation state
//! tracker, the tool-result renderer registry, and the wallet execution
//! bridge for the signing workflow.

pub mod bridge;
pub mod render;
pub mod session;
pub mod tracker;
pub mod wallet;

pub use bridge::{normalize_transaction_payload, ExecutionBridge};
pub use render::RendererRegistry;
pub use session::{ChatSession, SessionError};
pub use wallet::{TxDigest, WalletAdapter, WalletError};
