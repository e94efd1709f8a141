//! Portfolio balances tool
//!
//! Fetches raw coin balances, resolves decimals and USD unit prices
//! per coin (best-effort, per item), normalizes amounts and sums a
//! portfolio-level USD total including staked farm positions. A coin whose
//! price cannot be resolved keeps `usd_value` absent and contributes nothing
//! to the total. Dust filtering happens at display time, not here.

use rig::{completion::ToolDefinition, tool::Tool};
use serde::Deserialize;
use serde_json::json;
use shoal_protocols::{FarmsOracle, PriceOracle};
use shoal_sui::coin::{normalize_amount, parse_base_units, symbol_from_type};
use shoal_sui::constants::{DEFAULT_DECIMALS, SUI_COIN_TYPE};
use shoal_sui::{ChainReader, RpcError};
use shoal_types::{BalanceEntry, BalancesResult, StakedPosition};
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tracing::{instrument, warn};

/// The arguments for the balances tool, provided by the model
#[derive(Deserialize, Debug)]
pub struct GetAllBalancesArgs {
    /// The Sui address to get balances for
    pub address: String,
}

#[derive(Debug, Error)]
pub enum GetAllBalancesError {
    #[error("chain query failed: {0}")]
    Chain(#[from] RpcError),
    #[error("failed to serialize result: {0}")]
    Json(#[from] serde_json::Error),
}

/// Balances discovery tool
pub struct GetAllBalancesTool {
    pub chain: Arc<dyn ChainReader>,
    pub prices: Arc<dyn PriceOracle>,
    pub farms: Arc<dyn FarmsOracle>,
}

impl GetAllBalancesTool {
    /// Price lookup tolerant of gas-token variants: a variant form of SUI
    /// falls back to the canonical SUI price
    fn price_for(prices: &HashMap<String, f64>, coin_type: &str) -> Option<f64> {
        if let Some(price) = prices.get(coin_type) {
            return Some(*price);
        }
        if coin_type.ends_with("::sui::SUI") {
            return prices.get(SUI_COIN_TYPE).copied();
        }
        None
    }

    async fn coin_meta(&self, coin_type: &str) -> (Option<String>, u8) {
        match self.chain.get_coin_metadata(coin_type).await {
            Ok(Some(meta)) => (Some(meta.symbol), meta.decimals),
            Ok(None) => (Some(symbol_from_type(coin_type)), DEFAULT_DECIMALS),
            Err(e) => {
                warn!("[GetAllBalancesTool] Metadata lookup failed for {coin_type}: {e}");
                (Some(symbol_from_type(coin_type)), DEFAULT_DECIMALS)
            }
        }
    }
}

impl Tool for GetAllBalancesTool {
    const NAME: &'static str = "get_all_balances";
    type Error = GetAllBalancesError;
    type Args = GetAllBalancesArgs;
    type Output = String;

    async fn definition(&self, _prompt: String) -> ToolDefinition {
        ToolDefinition {
            name: Self::NAME.to_string(),
            description: "Get all coin balances for a given address on the Sui blockchain, with USD valuation and staked farm positions folded into the portfolio total. Use this to show the user's portfolio or to verify funds before a swap, transfer or deposit.".to_string(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "address": {
                        "type": "string",
                        "description": "The Sui address to get balances for"
                    }
                },
                "required": ["address"]
            }),
        }
    }

    #[instrument(
        name = "get_all_balances_tool_call",
        skip(self),
        fields(tool_name = "get_all_balances", address = %args.address)
    )]
    async fn call(&self, args: Self::Args) -> Result<Self::Output, Self::Error> {
        let raw_balances = self.chain.get_all_balances(&args.address).await?;

        // Staked positions are best-effort: an oracle outage degrades to an
        // empty list rather than failing the whole call
        let staked = match self.farms.get_staked_positions(&args.address).await {
            Ok(positions) => positions,
            Err(e) => {
                warn!("[GetAllBalancesTool] Staked position lookup failed: {e}");
                Vec::new()
            }
        };

        // One price request covering wallet coins and staked LP types; make
        // sure the canonical SUI type is present so variant forms can fall
        // back to it
        let mut price_request: Vec<String> =
            raw_balances.iter().map(|b| b.coin_type.clone()).collect();
        price_request.extend(staked.iter().map(|p| p.coin_type.clone()));
        if !price_request.iter().any(|ct| ct == SUI_COIN_TYPE)
            && price_request.iter().any(|ct| ct.ends_with("::sui::SUI"))
        {
            price_request.push(SUI_COIN_TYPE.to_string());
        }

        let prices = match self.prices.get_prices(&price_request).await {
            Ok(prices) => prices,
            Err(e) => {
                warn!("[GetAllBalancesTool] Price lookup failed: {e}");
                HashMap::new()
            }
        };

        let mut total_usd_value = 0.0;
        let mut balances = Vec::with_capacity(raw_balances.len());

        for raw in &raw_balances {
            let base_units = match parse_base_units(&raw.total_balance) {
                Ok(units) => units,
                Err(e) => {
                    warn!("[GetAllBalancesTool] Skipping {}: {e}", raw.coin_type);
                    continue;
                }
            };
            let (symbol, decimals) = self.coin_meta(&raw.coin_type).await;
            let normalized_balance = normalize_amount(base_units, decimals);
            let usd_value =
                Self::price_for(&prices, &raw.coin_type).map(|price| normalized_balance * price);
            if let Some(usd) = usd_value {
                total_usd_value += usd;
            }
            balances.push(BalanceEntry {
                coin_type: raw.coin_type.clone(),
                total_balance: raw.total_balance.clone(),
                decimals,
                normalized_balance,
                usd_value,
                symbol,
            });
        }

        let mut staked_positions = Vec::with_capacity(staked.len());
        for position in &staked {
            let base_units = match parse_base_units(&position.amount) {
                Ok(units) => units,
                Err(e) => {
                    warn!(
                        "[GetAllBalancesTool] Skipping staked {}: {e}",
                        position.coin_type
                    );
                    continue;
                }
            };
            let (symbol, decimals) = self.coin_meta(&position.coin_type).await;
            let normalized_balance = normalize_amount(base_units, decimals);
            let usd_value = Self::price_for(&prices, &position.coin_type)
                .map(|price| normalized_balance * price);
            if let Some(usd) = usd_value {
                total_usd_value += usd;
            }
            staked_positions.push(StakedPosition {
                coin_type: position.coin_type.clone(),
                symbol,
                normalized_balance,
                usd_value,
            });
        }

        let result = BalancesResult {
            success: true,
            error: None,
            balances,
            staked_positions,
            total_usd_value,
        };

        Ok(serde_json::to_string(&result)?)
    }
}
