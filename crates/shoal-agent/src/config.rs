//! Runtime configuration from the environment

use shoal_sui::constants::MAINNET_FULLNODE_URL;

pub const DEFAULT_MODEL: &str = "claude-3-5-haiku-latest";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3001";

#[derive(Debug, Clone)]
pub struct AgentConfig {
    /// Model identifier passed to the Anthropic API
    pub model: String,
    /// Sui fullnode JSON-RPC endpoint
    pub rpc_url: String,
    /// Listen address for the chat API
    pub bind_addr: String,
}

impl AgentConfig {
    pub fn from_env() -> Self {
        Self {
            model: std::env::var("SHOAL_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            rpc_url: std::env::var("SUI_RPC_URL")
                .unwrap_or_else(|_| MAINNET_FULLNODE_URL.to_string()),
            bind_addr: std::env::var("SHOAL_BIND_ADDR")
                .unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string()),
        }
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self::from_env()
    }
}
