//! Pool deposit / farm stake tool
//!
//! Three modes: deposit-only, stake-only, deposit-then-stake. Deposits are
//! pre-checked against the caller's balances so a shortfall comes back as a
//! structured INSUFFICIENT_BALANCE naming exactly the under-funded coins.
//! The pre-check is advisory; the deposit transaction itself is the
//! authoritative check at submission time. In `both` mode the staked amount
//! is the estimated LP output of the deposit, never the raw input amounts.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use rig::{completion::ToolDefinition, tool::Tool};
use serde::Deserialize;
use serde_json::json;
use shoal_protocols::{FarmsOracle, PoolsOracle};
use shoal_sui::balance_check::BalanceSheet;
use shoal_sui::coin::{parse_base_units, same_coin_type, symbol_from_type};
use shoal_sui::constants::DEFAULT_DECIMALS;
use shoal_sui::{ChainReader, RpcError};
use shoal_types::result::error_codes;
use shoal_types::{
    AddLiquidityResult, AddLiquidityTransactions, DepositEntry, FarmSummary, MissingToken,
    PoolSummary, UnsignedTransaction,
};
use std::collections::BTreeMap;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, instrument, warn};

const MS_PER_DAY: u64 = 24 * 60 * 60 * 1000;
const DEFAULT_SLIPPAGE: f64 = 0.01;

/// Operating mode for one invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LiquidityMode {
    Deposit,
    Stake,
    Both,
}

impl Default for LiquidityMode {
    fn default() -> Self {
        Self::Deposit
    }
}

/// The arguments for the add-liquidity tool, provided by the model
#[derive(Deserialize, Debug)]
pub struct AddLiquidityArgs {
    /// The pool object ID to add liquidity to
    pub pool_id: String,
    /// Coin type -> base-unit amount to deposit (required for deposit modes)
    #[serde(default)]
    pub amounts_in: Option<BTreeMap<String, String>>,
    /// Farm ID to stake LP tokens in
    #[serde(default)]
    pub farm_id: Option<String>,
    /// Lock duration in days for farming
    #[serde(default)]
    pub lock_duration_days: Option<u64>,
    /// Slippage tolerance (0.01 = 1%)
    #[serde(default)]
    pub slippage: Option<f64>,
    /// User's wallet address
    pub wallet_address: String,
    #[serde(default)]
    pub mode: LiquidityMode,
    /// LP base units to stake (required for stake-only mode)
    #[serde(default)]
    pub lp_amount: Option<String>,
    /// LP coin type to stake (required for stake-only mode)
    #[serde(default)]
    pub lp_coin_type: Option<String>,
}

#[derive(Debug, Error)]
pub enum AddLiquidityError {
    #[error("amounts_in is required for deposit mode")]
    MissingAmounts,
    #[error("lp_amount and lp_coin_type are required for stake-only mode")]
    MissingLpArgs,
    #[error("farm_id and lock_duration_days are required for staking")]
    MissingFarmArgs,
    #[error("invalid amount for {coin_type}: {amount}")]
    InvalidAmount { coin_type: String, amount: String },
    #[error("chain query failed: {0}")]
    Chain(#[from] RpcError),
    #[error("failed to serialize result: {0}")]
    Json(#[from] serde_json::Error),
}

/// Liquidity provisioning tool backed by Aftermath pools and farms
pub struct AddLiquidityTool {
    pub chain: Arc<dyn ChainReader>,
    pub pools: Arc<dyn PoolsOracle>,
    pub farms: Arc<dyn FarmsOracle>,
}

impl AddLiquidityTool {
    fn failure(code: &str, message: Option<String>) -> AddLiquidityResult {
        AddLiquidityResult {
            success: false,
            error: Some(code.to_string()),
            missing_tokens: None,
            message,
            transactions: None,
            pool_info: None,
            deposits_info: None,
            farm_info: None,
        }
    }

    async fn symbol_for(&self, coin_type: &str) -> String {
        match self.chain.get_coin_metadata(coin_type).await {
            Ok(Some(meta)) => meta.symbol,
            _ => symbol_from_type(coin_type),
        }
    }
}

impl Tool for AddLiquidityTool {
    const NAME: &'static str = "add_liquidity";
    type Error = AddLiquidityError;
    type Args = AddLiquidityArgs;
    type Output = String;

    async fn definition(&self, _prompt: String) -> ToolDefinition {
        ToolDefinition {
            name: Self::NAME.to_string(),
            description: "Add liquidity to an Aftermath pool and/or stake LP tokens in a farm. Mode 'deposit' builds a deposit transaction, 'stake' builds a stake transaction for LP tokens already held, 'both' chains deposit then stake. Each transaction needs its own wallet approval. If the user lacks a required coin the result names exactly which coins are missing so a swap can be suggested.".to_string(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "pool_id": {
                        "type": "string",
                        "description": "The pool object ID to add liquidity to"
                    },
                    "amounts_in": {
                        "type": "object",
                        "description": "Map of coin types to base-unit amounts to deposit (required for deposit mode)",
                        "additionalProperties": { "type": "string" }
                    },
                    "farm_id": {
                        "type": "string",
                        "description": "Farm ID to stake LP tokens in"
                    },
                    "lock_duration_days": {
                        "type": "integer",
                        "description": "Lock duration in days for farming"
                    },
                    "slippage": {
                        "type": "number",
                        "description": "Slippage tolerance (0.01 = 1%). Defaults to 0.01."
                    },
                    "wallet_address": {
                        "type": "string",
                        "description": "User's wallet address"
                    },
                    "mode": {
                        "type": "string",
                        "enum": ["deposit", "stake", "both"],
                        "description": "Mode: 'deposit' for liquidity only, 'stake' for farming only, 'both' for deposit then stake"
                    },
                    "lp_amount": {
                        "type": "string",
                        "description": "LP base units to stake (required for stake-only mode)"
                    },
                    "lp_coin_type": {
                        "type": "string",
                        "description": "LP coin type to stake (required for stake-only mode)"
                    }
                },
                "required": ["pool_id", "wallet_address"]
            }),
        }
    }

    #[instrument(
        name = "add_liquidity_tool_call",
        skip(self),
        fields(tool_name = "add_liquidity", pool_id = %args.pool_id, mode = ?args.mode)
    )]
    async fn call(&self, args: Self::Args) -> Result<Self::Output, Self::Error> {
        let slippage = args.slippage.unwrap_or(DEFAULT_SLIPPAGE);

        let mut deposit_tx: Option<UnsignedTransaction> = None;
        let mut pool_info: Option<PoolSummary> = None;
        let mut deposits_info: Option<Vec<DepositEntry>> = None;
        let mut lp_estimate: u128 = 0;

        if matches!(args.mode, LiquidityMode::Deposit | LiquidityMode::Both) {
            let amounts_in = args
                .amounts_in
                .as_ref()
                .ok_or(AddLiquidityError::MissingAmounts)?;

            let pool = match self.pools.get_pool(&args.pool_id).await {
                Ok(Some(pool)) => pool,
                Ok(None) => {
                    return Ok(serde_json::to_string(&Self::failure(
                        error_codes::POOL_NOT_FOUND,
                        Some(format!("Pool {} was not found.", args.pool_id)),
                    ))?)
                }
                Err(e) => {
                    warn!("[AddLiquidityTool] Pool lookup failed: {e}");
                    return Ok(serde_json::to_string(&Self::failure(
                        error_codes::POOL_NOT_FOUND,
                        Some(e.to_string()),
                    ))?);
                }
            };

            let mut requested: Vec<(String, u128)> = Vec::with_capacity(amounts_in.len());
            for (coin_type, amount) in amounts_in {
                let units = parse_base_units(amount).map_err(|_| {
                    AddLiquidityError::InvalidAmount {
                        coin_type: coin_type.clone(),
                        amount: amount.clone(),
                    }
                })?;
                requested.push((coin_type.clone(), units));
            }

            // Advisory pre-check so a shortfall becomes a remediation hint
            // instead of a failed transaction later
            let sheet =
                BalanceSheet::from_raw(&self.chain.get_all_balances(&args.wallet_address).await?);
            let missing = sheet.missing(&requested);
            if !missing.is_empty() {
                let mut missing_tokens = Vec::with_capacity(missing.len());
                for coin_type in &missing {
                    missing_tokens.push(MissingToken {
                        coin_type: coin_type.to_string(),
                        symbol: self.symbol_for(coin_type).await,
                    });
                }
                let symbols = missing_tokens
                    .iter()
                    .map(|t| t.symbol.as_str())
                    .collect::<Vec<_>>()
                    .join(", ");
                let result = AddLiquidityResult {
                    success: false,
                    error: Some(error_codes::INSUFFICIENT_BALANCE.to_string()),
                    missing_tokens: Some(missing_tokens),
                    message: Some(format!("You need more {symbols} to add liquidity.")),
                    transactions: None,
                    pool_info: None,
                    deposits_info: None,
                    farm_info: None,
                };
                return Ok(serde_json::to_string(&result)?);
            }

            // Map user-supplied coin types onto the pool's internal types;
            // representational variants of the same token must match
            let mut pool_amounts: Vec<(String, u128)> = Vec::with_capacity(requested.len());
            for (user_type, units) in &requested {
                match pool.coin_types().find(|pt| same_coin_type(pt, user_type)) {
                    Some(pool_type) => pool_amounts.push((pool_type.to_string(), *units)),
                    None => {
                        return Ok(serde_json::to_string(&Self::failure(
                            error_codes::COIN_NOT_IN_POOL,
                            Some(format!("Token {user_type} not found in pool")),
                        ))?)
                    }
                }
            }

            lp_estimate = match self.pools.estimate_lp_out(&args.pool_id, &pool_amounts).await {
                Ok(lp) => lp,
                Err(e) => {
                    warn!("[AddLiquidityTool] Could not estimate LP amount: {e}");
                    0
                }
            };
            info!("[AddLiquidityTool] Estimated LP tokens: {lp_estimate}");

            let tx_bytes = match self
                .pools
                .build_deposit_transaction(&args.wallet_address, &args.pool_id, &pool_amounts, slippage)
                .await
            {
                Ok(bytes) => bytes,
                Err(e) => {
                    warn!("[AddLiquidityTool] Deposit build failed: {e}");
                    return Ok(serde_json::to_string(&Self::failure(
                        error_codes::TX_BUILD_FAILED,
                        Some(e.to_string()),
                    ))?);
                }
            };

            deposit_tx = Some(UnsignedTransaction {
                transaction_bytes: BASE64.encode(tx_bytes),
                description: "Add liquidity to pool".to_string(),
            });
            pool_info = Some(PoolSummary {
                pool_id: pool.object_id.clone(),
                pool_name: pool.name.clone(),
                lp_coin_type: pool.lp_coin_type.clone(),
                estimated_lp_tokens: lp_estimate.to_string(),
            });

            let mut entries = Vec::with_capacity(amounts_in.len());
            for (coin_type, amount) in amounts_in {
                let (symbol, decimals) = match self.chain.get_coin_metadata(coin_type).await {
                    Ok(Some(meta)) => (meta.symbol, meta.decimals),
                    _ => (symbol_from_type(coin_type), DEFAULT_DECIMALS),
                };
                entries.push(DepositEntry {
                    coin_type: coin_type.clone(),
                    amount: amount.clone(),
                    symbol,
                    decimals,
                });
            }
            deposits_info = Some(entries);
        }

        let mut stake_tx: Option<UnsignedTransaction> = None;
        let mut farm_info: Option<FarmSummary> = None;

        // In `both` mode a missing farm spec just skips the stake leg; only
        // stake-only mode hard-requires it
        let wants_stake = match args.mode {
            LiquidityMode::Stake => true,
            LiquidityMode::Both => args.farm_id.is_some() && args.lock_duration_days.is_some(),
            LiquidityMode::Deposit => false,
        };

        if wants_stake {
            let farm_id = args
                .farm_id
                .as_ref()
                .ok_or(AddLiquidityError::MissingFarmArgs)?;
            let lock_duration_days = args
                .lock_duration_days
                .ok_or(AddLiquidityError::MissingFarmArgs)?;

            let (stake_amount, stake_lp_type) = match args.mode {
                LiquidityMode::Stake => {
                    let lp_amount = args
                        .lp_amount
                        .as_ref()
                        .ok_or(AddLiquidityError::MissingLpArgs)?;
                    let lp_coin_type = args
                        .lp_coin_type
                        .clone()
                        .ok_or(AddLiquidityError::MissingLpArgs)?;
                    let units = parse_base_units(lp_amount).map_err(|_| {
                        AddLiquidityError::InvalidAmount {
                            coin_type: lp_coin_type.clone(),
                            amount: lp_amount.clone(),
                        }
                    })?;
                    (units, lp_coin_type)
                }
                _ => {
                    // LP tokens minted by the deposit, never the sum of the
                    // deposited coin amounts
                    if lp_estimate == 0 {
                        return Ok(serde_json::to_string(&Self::failure(
                            error_codes::TX_BUILD_FAILED,
                            Some("Could not estimate LP amount for staking".to_string()),
                        ))?);
                    }
                    let lp_type = pool_info
                        .as_ref()
                        .map(|p| p.lp_coin_type.clone())
                        .unwrap_or_default();
                    (lp_estimate, lp_type)
                }
            };

            match self.farms.get_farm(farm_id).await {
                Ok(Some(_)) => {}
                Ok(None) => {
                    return Ok(serde_json::to_string(&Self::failure(
                        error_codes::FARM_NOT_FOUND,
                        Some(format!("Farm {farm_id} was not found.")),
                    ))?)
                }
                Err(e) => {
                    warn!("[AddLiquidityTool] Farm lookup failed: {e}");
                    return Ok(serde_json::to_string(&Self::failure(
                        error_codes::FARM_NOT_FOUND,
                        Some(e.to_string()),
                    ))?);
                }
            }

            let lock_duration_ms = lock_duration_days * MS_PER_DAY;
            let tx_bytes = match self
                .farms
                .build_stake_transaction(&args.wallet_address, farm_id, stake_amount, lock_duration_ms)
                .await
            {
                Ok(bytes) => bytes,
                Err(e) => {
                    warn!("[AddLiquidityTool] Stake build failed: {e}");
                    return Ok(serde_json::to_string(&Self::failure(
                        error_codes::TX_BUILD_FAILED,
                        Some(e.to_string()),
                    ))?);
                }
            };

            stake_tx = Some(UnsignedTransaction {
                transaction_bytes: BASE64.encode(tx_bytes),
                description: "Stake LP tokens in farm".to_string(),
            });
            farm_info = Some(FarmSummary {
                farm_id: farm_id.clone(),
                lock_duration_days,
                lp_amount_to_stake: stake_amount.to_string(),
                lp_coin_type: stake_lp_type,
            });
        }

        let result = AddLiquidityResult {
            success: true,
            error: None,
            missing_tokens: None,
            message: None,
            transactions: Some(AddLiquidityTransactions {
                deposit: deposit_tx,
                stake: stake_tx,
            }),
            pool_info,
            deposits_info,
            farm_info,
        };

        Ok(serde_json::to_string(&result)?)
    }
}
