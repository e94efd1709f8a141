//! Aftermath swap tool
//!
//! Route finding and transaction building are two independent failure
//! points: a failed build still returns the quoted route so the user sees
//! what was priced.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use rig::{completion::ToolDefinition, tool::Tool};
use serde::Deserialize;
use serde_json::json;
use shoal_protocols::aftermath::DEFAULT_SLIPPAGE;
use shoal_protocols::DexOracle;
use shoal_sui::coin::parse_base_units;
use shoal_sui::constants::{supported_coins, SUI_ICON_URL};
use shoal_sui::{ChainReader, RpcError};
use shoal_types::result::error_codes;
use shoal_types::{CoinMeta, SwapCoinMetadata, SwapResult};
use std::sync::Arc;
use thiserror::Error;
use tracing::{instrument, warn};

/// The arguments for the swap tool, provided by the model
#[derive(Deserialize, Debug)]
pub struct SwapArgs {
    /// Input coin type, e.g. "0x2::sui::SUI"
    pub coin_in_type: String,
    /// Output coin type
    pub coin_out_type: String,
    /// Amount to swap, base units as a decimal-integer string
    pub amount: String,
    /// Slippage tolerance (0.01 = 1%)
    #[serde(default)]
    pub slippage: Option<f64>,
    /// Sui wallet address of the user
    pub address: String,
}

#[derive(Debug, Error)]
pub enum SwapError {
    #[error("invalid amount: {0}")]
    InvalidAmount(String),
    #[error("invalid slippage: {0}")]
    InvalidSlippage(f64),
    #[error("same input and output coin type")]
    SameCoin,
    #[error("chain query failed: {0}")]
    Chain(#[from] RpcError),
    #[error("failed to serialize result: {0}")]
    Json(#[from] serde_json::Error),
}

/// Swap tool backed by the Aftermath router
pub struct SwapTool {
    pub chain: Arc<dyn ChainReader>,
    pub dex: Arc<dyn DexOracle>,
}

impl SwapTool {
    /// The chain has no icon registered for the gas token; patch it in so
    /// the renderer is never missing the one icon everybody expects
    fn patch_sui_icon(coin_type: &str, meta: Option<CoinMeta>) -> Option<CoinMeta> {
        meta.map(|mut m| {
            if coin_type.ends_with("::sui::SUI") && m.icon_url.is_none() {
                m.icon_url = Some(SUI_ICON_URL.to_string());
            }
            m
        })
    }

    async fn metadata(&self, coin_type: &str) -> Option<CoinMeta> {
        match self.chain.get_coin_metadata(coin_type).await {
            Ok(meta) => Self::patch_sui_icon(coin_type, meta),
            Err(e) => {
                warn!("[SwapTool] Metadata lookup failed for {coin_type}: {e}");
                None
            }
        }
    }
}

impl Tool for SwapTool {
    const NAME: &'static str = "swap";
    type Error = SwapError;
    type Args = SwapArgs;
    type Output = String;

    async fn definition(&self, _prompt: String) -> ToolDefinition {
        let description = format!(
            "Execute swaps using Aftermath DEX on Sui. Provide the coin types and amount to swap; the result contains the quoted route and an unsigned transaction for wallet approval. Only use supported coins: {}",
            supported_coins().join(", ")
        );
        ToolDefinition {
            name: Self::NAME.to_string(),
            description,
            parameters: json!({
                "type": "object",
                "properties": {
                    "coin_in_type": {
                        "type": "string",
                        "description": "Input coin type (e.g. \"0x2::sui::SUI\")"
                    },
                    "coin_out_type": {
                        "type": "string",
                        "description": "Output coin type"
                    },
                    "amount": {
                        "type": "string",
                        "description": "Amount to swap in base units, as a decimal-integer string (1 SUI = 1,000,000,000 MIST)"
                    },
                    "slippage": {
                        "type": "number",
                        "description": "Slippage tolerance (e.g. 0.01 for 1%). Defaults to 0.01."
                    },
                    "address": {
                        "type": "string",
                        "description": "Sui wallet address of the user"
                    }
                },
                "required": ["coin_in_type", "coin_out_type", "amount", "address"]
            }),
        }
    }

    #[instrument(
        name = "swap_tool_call",
        skip(self),
        fields(
            tool_name = "swap",
            coin_in = %args.coin_in_type,
            coin_out = %args.coin_out_type,
            amount = %args.amount,
        )
    )]
    async fn call(&self, args: Self::Args) -> Result<Self::Output, Self::Error> {
        let amount = parse_base_units(&args.amount)
            .map_err(|_| SwapError::InvalidAmount(args.amount.clone()))?;
        if amount == 0 {
            return Err(SwapError::InvalidAmount(args.amount));
        }
        if args.coin_in_type == args.coin_out_type {
            return Err(SwapError::SameCoin);
        }
        let slippage = args.slippage.unwrap_or(DEFAULT_SLIPPAGE);
        if !(0.0..=1.0).contains(&slippage) {
            return Err(SwapError::InvalidSlippage(slippage));
        }

        let coin_in_meta = self.metadata(&args.coin_in_type).await;
        let coin_out_meta = self.metadata(&args.coin_out_type).await;
        let coin_metadata = SwapCoinMetadata {
            coin_in: coin_in_meta,
            coin_out: coin_out_meta,
        };

        // Failure point 1: route finding
        let quoted = match self
            .dex
            .find_route(&args.coin_in_type, &args.coin_out_type, amount)
            .await
        {
            Ok(quoted) => quoted,
            Err(e) => {
                warn!("[SwapTool] No route for {} -> {}: {e}", args.coin_in_type, args.coin_out_type);
                let result = SwapResult {
                    success: false,
                    error: Some(error_codes::NO_ROUTE.to_string()),
                    transaction_bytes: None,
                    route: None,
                    coin_metadata: Some(coin_metadata),
                };
                return Ok(serde_json::to_string(&result)?);
            }
        };

        // Failure point 2: transaction building. The route survives so the
        // quote can still be shown.
        let result = match self
            .dex
            .build_swap_transaction(&args.address, &quoted, slippage)
            .await
        {
            Ok(tx_bytes) => SwapResult {
                success: true,
                error: None,
                transaction_bytes: Some(BASE64.encode(tx_bytes)),
                route: Some(quoted.route),
                coin_metadata: Some(coin_metadata),
            },
            Err(e) => {
                warn!("[SwapTool] Transaction build failed: {e}");
                SwapResult {
                    success: false,
                    error: Some(error_codes::TX_BUILD_FAILED.to_string()),
                    transaction_bytes: None,
                    route: Some(quoted.route),
                    coin_metadata: Some(coin_metadata),
                }
            }
        };

        Ok(serde_json::to_string(&result)?)
    }
}
