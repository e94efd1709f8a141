//! Spring liquid staking tool
//!
//! Mint deposits SUI and receives sSUI; redeem is the reverse. For redeem,
//! every owned sSUI coin object is passed to the transaction factory so the
//! transaction merges them into a single balance before splitting off the
//! requested amount. Splitting against the first object alone would fail
//! whenever no single object covers the amount.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use rig::{completion::ToolDefinition, tool::Tool};
use serde::Deserialize;
use serde_json::json;
use shoal_protocols::LstProtocol;
use shoal_sui::coin::{normalize_amount, parse_base_units};
use shoal_sui::constants::{SPRING_LST, SUI_COIN_TYPE, SUI_DECIMALS, SUI_ICON_URL};
use shoal_sui::{ChainReader, RpcError};
use shoal_types::result::error_codes;
use shoal_types::{LiquidStakingResult, StakeAction, StakeLeg};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, instrument, warn};

/// Mint-side estimate of sSUI received per SUI deposited
const MINT_RATE_ESTIMATE: f64 = 0.988;

/// The arguments for the liquid staking tool, provided by the model
#[derive(Deserialize, Debug)]
pub struct LiquidStakingArgs {
    /// Whether to mint or redeem sSUI
    pub action: StakeAction,
    /// Amount in base units as a decimal-integer string
    pub amount: String,
    /// The Sui address to perform the action on
    pub address: String,
}

#[derive(Debug, Error)]
pub enum LiquidStakingError {
    #[error("invalid amount: {0}")]
    InvalidAmount(String),
    #[error("chain query failed: {0}")]
    Chain(#[from] RpcError),
    #[error("failed to serialize result: {0}")]
    Json(#[from] serde_json::Error),
}

/// Liquid staking tool backed by the Spring protocol
pub struct LiquidStakingTool {
    pub chain: Arc<dyn ChainReader>,
    pub lst: Arc<dyn LstProtocol>,
}

impl LiquidStakingTool {
    async fn leg(&self, coin_type: &str, amount: f64) -> StakeLeg {
        let metadata = match self.chain.get_coin_metadata(coin_type).await {
            Ok(Some(mut meta)) => {
                if coin_type == SUI_COIN_TYPE && meta.icon_url.is_none() {
                    meta.icon_url = Some(SUI_ICON_URL.to_string());
                }
                Some(meta)
            }
            Ok(None) => None,
            Err(e) => {
                warn!("[LiquidStakingTool] Metadata lookup failed for {coin_type}: {e}");
                None
            }
        };
        StakeLeg {
            coin_type: coin_type.to_string(),
            metadata,
            amount,
        }
    }

    fn failure(code: &str) -> LiquidStakingResult {
        LiquidStakingResult {
            success: false,
            error: Some(code.to_string()),
            tx_bytes: None,
            action: None,
            token_in: None,
            token_out: None,
        }
    }
}

impl Tool for LiquidStakingTool {
    const NAME: &'static str = "liquid_staking";
    type Error = LiquidStakingError;
    type Args = LiquidStakingArgs;
    type Output = String;

    async fn definition(&self, _prompt: String) -> ToolDefinition {
        ToolDefinition {
            name: Self::NAME.to_string(),
            description: "Mint or redeem sSUI tokens using the Spring liquid staking protocol. Mint deposits SUI and receives the yield-bearing sSUI; redeem converts sSUI back to SUI. Returns an unsigned transaction for wallet approval.".to_string(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "action": {
                        "type": "string",
                        "enum": ["mint", "redeem"],
                        "description": "Whether to mint or redeem sSUI"
                    },
                    "amount": {
                        "type": "string",
                        "description": "Amount in base units (MIST) as a decimal-integer string"
                    },
                    "address": {
                        "type": "string",
                        "description": "The Sui address to perform the action on"
                    }
                },
                "required": ["action", "amount", "address"]
            }),
        }
    }

    #[instrument(
        name = "liquid_staking_tool_call",
        skip(self),
        fields(tool_name = "liquid_staking", action = ?args.action, amount = %args.amount)
    )]
    async fn call(&self, args: Self::Args) -> Result<Self::Output, Self::Error> {
        let amount = parse_base_units(&args.amount)
            .map_err(|_| LiquidStakingError::InvalidAmount(args.amount.clone()))?;
        if amount == 0 {
            return Err(LiquidStakingError::InvalidAmount(args.amount));
        }

        let (token_in_type, token_out_type) = match args.action {
            StakeAction::Mint => (SUI_COIN_TYPE, SPRING_LST.coin_type),
            StakeAction::Redeem => (SPRING_LST.coin_type, SUI_COIN_TYPE),
        };

        let build = match args.action {
            StakeAction::Mint => self.lst.build_mint_transaction(&args.address, amount).await,
            StakeAction::Redeem => {
                let lst_coins = self.chain.get_coins(&args.address, SPRING_LST.coin_type).await?;
                if lst_coins.is_empty() {
                    return Ok(serde_json::to_string(&Self::failure(
                        error_codes::NO_STAKED_COINS,
                    ))?);
                }
                // Merge-then-split: every owned object participates, so the
                // request succeeds whenever the combined balance covers it
                let object_ids: Vec<String> = lst_coins
                    .iter()
                    .map(|c| c.coin_object_id.clone())
                    .collect();
                info!(
                    "[LiquidStakingTool] Redeeming {} from {} merged coin objects",
                    amount,
                    object_ids.len()
                );
                self.lst
                    .build_redeem_transaction(&args.address, &object_ids, amount)
                    .await
            }
        };

        let tx_bytes = match build {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!("[LiquidStakingTool] Transaction build failed: {e}");
                return Ok(serde_json::to_string(&Self::failure(
                    error_codes::TX_BUILD_FAILED,
                ))?);
            }
        };

        let token_in_amount = normalize_amount(amount, SUI_DECIMALS);
        let token_out_amount = match args.action {
            StakeAction::Mint => token_in_amount * MINT_RATE_ESTIMATE,
            StakeAction::Redeem => token_in_amount,
        };

        let result = LiquidStakingResult {
            success: true,
            error: None,
            tx_bytes: Some(BASE64.encode(tx_bytes)),
            action: Some(args.action),
            token_in: Some(self.leg(token_in_type, token_in_amount).await),
            token_out: Some(self.leg(token_out_type, token_out_amount).await),
        };

        Ok(serde_json::to_string(&result)?)
    }
}
