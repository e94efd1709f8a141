//! SUI transfer tool
//!
//! Builds an unsigned transfer transaction for wallet approval. Nothing is
//! sent until the user signs.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use rig::{completion::ToolDefinition, tool::Tool};
use serde::Deserialize;
use serde_json::json;
use shoal_protocols::TransferBuilder;
use shoal_sui::coin::{normalize_amount, parse_base_units};
use shoal_sui::constants::SUI_DECIMALS;
use shoal_types::result::error_codes;
use shoal_types::SendResult;
use std::sync::Arc;
use thiserror::Error;
use tracing::{instrument, warn};

/// The arguments for the send tool, provided by the model
#[derive(Deserialize, Debug)]
pub struct SendSuiArgs {
    /// The recipient Sui address
    pub to: String,
    /// Amount in MIST as a decimal-integer string
    pub amount: String,
    /// The sender's wallet address
    pub address: String,
}

#[derive(Debug, Error)]
pub enum SendSuiError {
    #[error("invalid amount: {0}")]
    InvalidAmount(String),
    #[error("failed to serialize result: {0}")]
    Json(#[from] serde_json::Error),
}

/// Transfer tool
pub struct SendSuiTool {
    pub transfers: Arc<dyn TransferBuilder>,
}

impl Tool for SendSuiTool {
    const NAME: &'static str = "send_sui";
    type Error = SendSuiError;
    type Args = SendSuiArgs;
    type Output = String;

    async fn definition(&self, _prompt: String) -> ToolDefinition {
        ToolDefinition {
            name: Self::NAME.to_string(),
            description: "Send SUI tokens to another address on the Sui blockchain. The amount is specified in MIST units (1 SUI = 1,000,000,000 MIST). Returns an unsigned transaction for wallet approval; nothing is transferred until the user signs.".to_string(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "to": {
                        "type": "string",
                        "description": "The recipient Sui address to send tokens to"
                    },
                    "amount": {
                        "type": "string",
                        "description": "The amount to send in MIST units, as a decimal-integer string"
                    },
                    "address": {
                        "type": "string",
                        "description": "The sender's wallet address"
                    }
                },
                "required": ["to", "amount", "address"]
            }),
        }
    }

    #[instrument(
        name = "send_sui_tool_call",
        skip(self),
        fields(tool_name = "send_sui", to = %args.to, amount = %args.amount)
    )]
    async fn call(&self, args: Self::Args) -> Result<Self::Output, Self::Error> {
        let amount = parse_base_units(&args.amount)
            .map_err(|_| SendSuiError::InvalidAmount(args.amount.clone()))?;
        if amount == 0 {
            return Err(SendSuiError::InvalidAmount(args.amount));
        }
        let normalized_amount = normalize_amount(amount, SUI_DECIMALS);

        let result = match self
            .transfers
            .build_transfer_transaction(&args.address, &args.to, amount)
            .await
        {
            Ok(tx_bytes) => SendResult {
                success: true,
                error: None,
                transaction_bytes: Some(BASE64.encode(tx_bytes)),
                to: args.to,
                amount: args.amount,
                normalized_amount,
            },
            Err(e) => {
                warn!("[SendSuiTool] Transfer build failed: {e}");
                SendResult {
                    success: false,
                    error: Some(error_codes::TX_BUILD_FAILED.to_string()),
                    transaction_bytes: None,
                    to: args.to,
                    amount: args.amount,
                    normalized_amount,
                }
            }
        };

        Ok(serde_json::to_string(&result)?)
    }
}
