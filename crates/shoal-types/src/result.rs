//! Typed tool result payloads
//!
//! Every payload is discriminated by a boolean `success`. `success: true`
//! means the operation's parameters/transaction were computed, never that
//! anything was executed on chain; signing is a separate user-approved step.
//! Expected domain failures are `success: false` with a stable error code.
//! Absent optional values (e.g. an unresolvable USD price) serialize as
//! missing fields, never as zero.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Stable error codes for expected domain failures
pub mod error_codes {
    pub const INSUFFICIENT_BALANCE: &str = "INSUFFICIENT_BALANCE";
    pub const NO_STAKED_COINS: &str = "NO_STAKED_COINS";
    pub const NO_ROUTE: &str = "NO_ROUTE";
    pub const TX_BUILD_FAILED: &str = "TX_BUILD_FAILED";
    pub const POOL_NOT_FOUND: &str = "POOL_NOT_FOUND";
    pub const FARM_NOT_FOUND: &str = "FARM_NOT_FOUND";
    pub const COIN_NOT_IN_POOL: &str = "COIN_NOT_IN_POOL";
    pub const TOOL_EXECUTION_FAILED: &str = "TOOL_EXECUTION_FAILED";
    pub const UNKNOWN_TOOL: &str = "UNKNOWN_TOOL";
}

/// Raw per-coin balance as reported by the chain
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCoinBalance {
    pub coin_type: String,
    /// Base units as a decimal-integer string
    pub total_balance: String,
    #[serde(default)]
    pub coin_object_count: u64,
}

/// Human-readable coin metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoinMeta {
    pub symbol: String,
    pub decimals: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,
}

/// One enriched balance entry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceEntry {
    pub coin_type: String,
    /// Base units as a decimal-integer string
    pub total_balance: String,
    pub decimals: u8,
    /// `total_balance / 10^decimals`
    pub normalized_balance: f64,
    /// Absent when no price is resolvable; never zero-as-unknown
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usd_value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
}

/// A staked/farmed position folded into the portfolio total
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StakedPosition {
    pub coin_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    pub normalized_balance: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usd_value: Option<f64>,
}

/// `get_all_balances` payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalancesResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default)]
    pub balances: Vec<BalanceEntry>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub staked_positions: Vec<StakedPosition>,
    /// Sum over every entry with a resolvable price, staked positions
    /// included; unpriced coins are excluded, not counted as zero
    #[serde(default)]
    pub total_usd_value: f64,
}

/// `get_prices` payload; unresolvable coins land in `missing`, never at 0.0
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricesResult {
    pub success: bool,
    #[serde(default)]
    pub prices: BTreeMap<String, f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub missing: Vec<String>,
}

/// `list_coins` payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListCoinsResult {
    pub success: bool,
    #[serde(default)]
    pub coins: Vec<SupportedCoin>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupportedCoin {
    pub coin_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<CoinMeta>,
}

/// One leg of a quoted route, amount in base units
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteLeg {
    pub coin_type: String,
    pub amount: String,
}

/// A priced conversion path from the DEX oracle
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapRoute {
    pub coin_in: RouteLeg,
    pub coin_out: RouteLeg,
    pub spot_price: f64,
    /// Aggregate route fee in base units of the input coin
    pub fee_amount: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapCoinMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coin_in: Option<CoinMeta>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coin_out: Option<CoinMeta>,
}

/// `swap` payload. A build failure still carries the route and metadata so
/// the quote can be shown to the user.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Unsigned transaction, base64
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_bytes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route: Option<SwapRoute>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coin_metadata: Option<SwapCoinMetadata>,
}

/// Liquid staking direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StakeAction {
    Mint,
    Redeem,
}

/// One side of a liquid staking operation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StakeLeg {
    #[serde(rename = "type")]
    pub coin_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<CoinMeta>,
    /// Normalized (human) amount
    pub amount: f64,
}

/// `liquid_staking` payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiquidStakingResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Unsigned transaction, base64
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tx_bytes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<StakeAction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_in: Option<StakeLeg>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_out: Option<StakeLeg>,
}

/// An unsigned transaction handed to the wallet approval flow
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnsignedTransaction {
    /// base64
    pub transaction_bytes: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddLiquidityTransactions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deposit: Option<UnsignedTransaction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stake: Option<UnsignedTransaction>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolSummary {
    pub pool_id: String,
    pub pool_name: String,
    pub lp_coin_type: String,
    /// Estimated LP output of the deposit step, base units
    pub estimated_lp_tokens: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepositEntry {
    pub coin_type: String,
    pub amount: String,
    pub symbol: String,
    pub decimals: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FarmSummary {
    pub farm_id: String,
    pub lock_duration_days: u64,
    /// Base units of LP actually staked (the deposit estimate in `both` mode)
    pub lp_amount_to_stake: String,
    pub lp_coin_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MissingToken {
    pub coin_type: String,
    pub symbol: String,
}

/// `add_liquidity` payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddLiquidityResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Exactly the under-funded coin types on INSUFFICIENT_BALANCE
    #[serde(skip_serializing_if = "Option::is_none")]
    pub missing_tokens: Option<Vec<MissingToken>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transactions: Option<AddLiquidityTransactions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pool_info: Option<PoolSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deposits_info: Option<Vec<DepositEntry>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub farm_info: Option<FarmSummary>,
}

/// `send_sui` payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Unsigned transaction, base64
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_bytes: Option<String>,
    pub to: String,
    /// Base units as a decimal-integer string
    pub amount: String,
    pub normalized_amount: f64,
}

/// APR breakdown for a pool/farm pair
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AprBreakdown {
    pub pool_fee_apr: f64,
    pub farming_apr: f64,
    pub total_apr: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub farming_apr_range: Option<AprRange>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AprRange {
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LockOption {
    pub duration_days: u64,
    pub multiplier: f64,
    pub boosted_apr: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FarmYield {
    pub farm_id: String,
    #[serde(default)]
    pub reward_symbols: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub lock_options: Vec<LockOption>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YieldOpportunity {
    pub pool_id: String,
    pub name: String,
    pub lp_coin_type: String,
    pub tvl_usd: f64,
    pub volume_24h_usd: f64,
    pub apr: AprBreakdown,
    pub user_holds_all_tokens: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub farm: Option<FarmYield>,
}

/// `get_yield_opportunities` payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YieldOpportunitiesResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default)]
    pub opportunities: Vec<YieldOpportunity>,
}

/// Generic failure payload for unexpected (infrastructure) tool errors
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolFailure {
    pub success: bool,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ToolFailure {
    pub fn new(code: &str, detail: impl Into<String>) -> Self {
        Self {
            success: false,
            error: code.to_string(),
            detail: Some(detail.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_usd_value_is_omitted_from_the_wire() {
        let entry = BalanceEntry {
            coin_type: "0x2::sui::SUI".to_string(),
            total_balance: "2500000000".to_string(),
            decimals: 9,
            normalized_balance: 2.5,
            usd_value: None,
            symbol: Some("SUI".to_string()),
        };
        let wire = serde_json::to_value(&entry).unwrap();
        assert!(wire.get("usdValue").is_none());
        assert_eq!(wire["totalBalance"], "2500000000");
    }

    #[test]
    fn swap_failure_can_still_carry_route() {
        let result = SwapResult {
            success: false,
            error: Some(error_codes::TX_BUILD_FAILED.to_string()),
            transaction_bytes: None,
            route: Some(SwapRoute {
                coin_in: RouteLeg {
                    coin_type: "0x2::sui::SUI".to_string(),
                    amount: "1000000000".to_string(),
                },
                coin_out: RouteLeg {
                    coin_type: "0xdead::usdc::USDC".to_string(),
                    amount: "4000000".to_string(),
                },
                spot_price: 4.0,
                fee_amount: "500000".to_string(),
            }),
            coin_metadata: None,
        };
        let wire = serde_json::to_value(&result).unwrap();
        assert_eq!(wire["success"], false);
        assert_eq!(wire["route"]["coinOut"]["amount"], "4000000");
    }
}
