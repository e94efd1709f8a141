//! Supported coin listing tool

use rig::{completion::ToolDefinition, tool::Tool};
use serde::Deserialize;
use serde_json::json;
use shoal_sui::constants::supported_coins;
use shoal_sui::{ChainReader, RpcError};
use shoal_types::{ListCoinsResult, SupportedCoin};
use std::sync::Arc;
use thiserror::Error;
use tracing::{instrument, warn};

/// The tool takes no arguments
#[derive(Deserialize, Debug, Default)]
pub struct ListCoinsArgs {}

#[derive(Debug, Error)]
pub enum ListCoinsError {
    #[error("chain query failed: {0}")]
    Chain(#[from] RpcError),
    #[error("failed to serialize result: {0}")]
    Json(#[from] serde_json::Error),
}

/// Lists the coins tradable through the assistant
pub struct ListCoinsTool {
    pub chain: Arc<dyn ChainReader>,
}

impl Tool for ListCoinsTool {
    const NAME: &'static str = "list_coins";
    type Error = ListCoinsError;
    type Args = ListCoinsArgs;
    type Output = String;

    async fn definition(&self, _prompt: String) -> ToolDefinition {
        ToolDefinition {
            name: Self::NAME.to_string(),
            description: "Get a list of all supported coins that can be traded through Aftermath DEX, with their metadata.".to_string(),
            parameters: json!({
                "type": "object",
                "properties": {}
            }),
        }
    }

    #[instrument(name = "list_coins_tool_call", skip_all, fields(tool_name = "list_coins"))]
    async fn call(&self, _args: Self::Args) -> Result<Self::Output, Self::Error> {
        let mut coins = Vec::new();
        for coin_type in supported_coins() {
            // Per-coin best effort: one missing metadata entry does not hide
            // the rest of the list
            let metadata = match self.chain.get_coin_metadata(coin_type).await {
                Ok(meta) => meta,
                Err(e) => {
                    warn!("[ListCoinsTool] Metadata lookup failed for {coin_type}: {e}");
                    None
                }
            };
            coins.push(SupportedCoin {
                coin_type: coin_type.to_string(),
                metadata,
            });
        }

        let result = ListCoinsResult {
            success: true,
            coins,
        };
        Ok(serde_json::to_string(&result)?)
    }
}
