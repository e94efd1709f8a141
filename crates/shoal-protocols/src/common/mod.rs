//! Shared protocol types and traits

pub mod traits;

use serde::{Deserialize, Serialize};
use shoal_types::SwapRoute;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("transport error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("protocol api error: {0}")]
    Api(String),
    #[error("malformed protocol response: {0}")]
    Malformed(String),
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },
}

/// A quoted route plus the provider's raw payload, which must be echoed back
/// verbatim when requesting the transaction build
#[derive(Debug, Clone)]
pub struct QuotedRoute {
    pub route: SwapRoute,
    pub raw: serde_json::Value,
}

/// One coin slot of a liquidity pool
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolCoin {
    pub coin_type: String,
    pub weight: f64,
    /// Pooled base units as a decimal-integer string
    pub balance: String,
    pub decimals: u8,
}

/// A liquidity pool
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pool {
    pub object_id: String,
    pub name: String,
    pub lp_coin_type: String,
    pub coins: Vec<PoolCoin>,
}

impl Pool {
    pub fn coin_types(&self) -> impl Iterator<Item = &str> {
        self.coins.iter().map(|c| c.coin_type.as_str())
    }
}

/// Pool-level statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolStats {
    pub tvl_usd: f64,
    pub volume_24h_usd: f64,
    /// Trading-fee APR, as a fraction (0.05 = 5%)
    pub fee_apr: f64,
}

/// LP tokens an address has locked in a farm
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StakedLpPosition {
    pub farm_id: String,
    pub coin_type: String,
    /// Base units as a decimal-integer string
    pub amount: String,
}

/// A farm (staking pool) paying reward emissions on locked LP tokens
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Farm {
    pub object_id: String,
    pub stake_coin_type: String,
    pub reward_coin_types: Vec<String>,
    /// Unboosted emission APR, as a fraction
    pub base_apr: f64,
    pub max_lock_duration_ms: u64,
    /// Yield multiplier at the maximum lock duration
    pub max_lock_multiplier: f64,
}
