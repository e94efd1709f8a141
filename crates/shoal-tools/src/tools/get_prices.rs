//! Price lookup tool
//!
//! Per-coin best effort: coins with no resolvable price are reported in
//! `missing` instead of carrying a fake zero.

use rig::{completion::ToolDefinition, tool::Tool};
use serde::Deserialize;
use serde_json::json;
use shoal_protocols::{PriceOracle, ProtocolError};
use shoal_types::PricesResult;
use std::sync::Arc;
use thiserror::Error;
use tracing::instrument;

/// The arguments for the prices tool, provided by the model
#[derive(Deserialize, Debug)]
pub struct GetPricesArgs {
    /// Coin types to price
    pub coin_types: Vec<String>,
}

#[derive(Debug, Error)]
pub enum GetPricesError {
    #[error("price oracle failed: {0}")]
    Oracle(#[from] ProtocolError),
    #[error("failed to serialize result: {0}")]
    Json(#[from] serde_json::Error),
}

/// USD price discovery tool
pub struct GetPricesTool {
    pub prices: Arc<dyn PriceOracle>,
}

impl Tool for GetPricesTool {
    const NAME: &'static str = "get_prices";
    type Error = GetPricesError;
    type Args = GetPricesArgs;
    type Output = String;

    async fn definition(&self, _prompt: String) -> ToolDefinition {
        ToolDefinition {
            name: Self::NAME.to_string(),
            description: "Get current USD prices for a list of coin types on Sui. Coins with no resolvable price are listed separately rather than reported as zero.".to_string(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "coin_types": {
                        "type": "array",
                        "items": { "type": "string" },
                        "description": "Coin types to fetch USD prices for"
                    }
                },
                "required": ["coin_types"]
            }),
        }
    }

    #[instrument(name = "get_prices_tool_call", skip(self), fields(tool_name = "get_prices"))]
    async fn call(&self, args: Self::Args) -> Result<Self::Output, Self::Error> {
        let resolved = self.prices.get_prices(&args.coin_types).await?;
        let missing = args
            .coin_types
            .iter()
            .filter(|ct| !resolved.contains_key(*ct))
            .cloned()
            .collect();

        let result = PricesResult {
            success: true,
            prices: resolved.into_iter().collect(),
            missing,
        };
        Ok(serde_json::to_string(&result)?)
    }
}
