//! Yield opportunity discovery tool
//!
//! Walks the curated pool/farm list, assembles an APR breakdown per pair
//! (trading-fee APR plus farming APR with its lock-multiplier range) and
//! flags pools whose coins the user already holds. Every per-pair lookup is
//! best-effort; one broken pool drops out of the list instead of failing the
//! call.

use rig::{completion::ToolDefinition, tool::Tool};
use serde::Deserialize;
use serde_json::json;
use shoal_protocols::{FarmsOracle, PoolsOracle};
use shoal_sui::balance_check::BalanceSheet;
use shoal_sui::coin::trailing_segment;
use shoal_sui::ChainReader;
use shoal_types::{
    AprBreakdown, AprRange, FarmYield, LockOption, YieldOpportunitiesResult, YieldOpportunity,
};
use std::sync::Arc;
use thiserror::Error;
use tracing::{instrument, warn};

use crate::curated::CURATED_POOLS_AND_FARMS;

const DEFAULT_LIMIT: usize = 5;
const MS_PER_DAY: u64 = 24 * 60 * 60 * 1000;

/// Sort criterion for opportunities
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum SortBy {
    TotalApr,
    PoolFeeApr,
    FarmingApr,
    Tvl,
    Volume24h,
}

/// The arguments for the yield opportunities tool, provided by the model
#[derive(Deserialize, Debug)]
pub struct GetYieldOpportunitiesArgs {
    /// The Sui address to get recommendations for
    pub address: String,
    #[serde(default)]
    pub sort_by: Option<SortBy>,
    /// Minimum TVL filter in USD
    #[serde(default)]
    pub min_tvl: Option<f64>,
    /// Only show pools containing tokens the user already holds
    #[serde(default)]
    pub only_user_tokens: Option<bool>,
    /// Number of opportunities to return (default 5)
    #[serde(default)]
    pub limit: Option<usize>,
}

#[derive(Debug, Error)]
pub enum GetYieldOpportunitiesError {
    #[error("failed to serialize result: {0}")]
    Json(#[from] serde_json::Error),
}

/// Curated yield discovery tool
pub struct GetYieldOpportunitiesTool {
    pub chain: Arc<dyn ChainReader>,
    pub pools: Arc<dyn PoolsOracle>,
    pub farms: Arc<dyn FarmsOracle>,
}

impl Tool for GetYieldOpportunitiesTool {
    const NAME: &'static str = "get_yield_opportunities";
    type Error = GetYieldOpportunitiesError;
    type Args = GetYieldOpportunitiesArgs;
    type Output = String;

    async fn definition(&self, _prompt: String) -> ToolDefinition {
        ToolDefinition {
            name: Self::NAME.to_string(),
            description: "Get curated liquidity pool and farming yield opportunities with a detailed APR breakdown (pool fee APR plus farming APR with lock-duration boost range). Flags pools whose tokens the user already holds.".to_string(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "address": {
                        "type": "string",
                        "description": "The Sui address to get recommendations for"
                    },
                    "sort_by": {
                        "type": "string",
                        "enum": ["totalApr", "poolFeeApr", "farmingApr", "tvl", "volume24h"],
                        "description": "Criteria to sort opportunities by"
                    },
                    "min_tvl": {
                        "type": "number",
                        "description": "Minimum TVL filter in USD"
                    },
                    "only_user_tokens": {
                        "type": "boolean",
                        "description": "Filter to only show pools containing tokens the user already holds"
                    },
                    "limit": {
                        "type": "integer",
                        "description": "Number of opportunities to return (default 5)"
                    }
                },
                "required": ["address"]
            }),
        }
    }

    #[instrument(
        name = "get_yield_opportunities_tool_call",
        skip(self),
        fields(tool_name = "get_yield_opportunities", address = %args.address)
    )]
    async fn call(&self, args: Self::Args) -> Result<Self::Output, Self::Error> {
        // User holdings feed the holds-all-tokens flag; an outage degrades
        // to "holds nothing", not a failed call
        let sheet = match self.chain.get_all_balances(&args.address).await {
            Ok(raw) => BalanceSheet::from_raw(&raw),
            Err(e) => {
                warn!("[GetYieldOpportunitiesTool] Balance lookup failed: {e}");
                BalanceSheet::default()
            }
        };

        let mut opportunities = Vec::new();
        for pair in CURATED_POOLS_AND_FARMS {
            let pool = match self.pools.get_pool(pair.pool_id).await {
                Ok(Some(pool)) => pool,
                Ok(None) => {
                    warn!("[GetYieldOpportunitiesTool] Curated pool missing: {}", pair.pool_id);
                    continue;
                }
                Err(e) => {
                    warn!("[GetYieldOpportunitiesTool] Pool lookup failed for {}: {e}", pair.pool_id);
                    continue;
                }
            };
            let stats = match self.pools.get_pool_stats(pair.pool_id).await {
                Ok(Some(stats)) => stats,
                _ => {
                    warn!("[GetYieldOpportunitiesTool] No stats for {}", pair.pool_id);
                    continue;
                }
            };

            let farm = match pair.farm_id {
                Some(farm_id) => match self.farms.get_farm(farm_id).await {
                    Ok(farm) => farm,
                    Err(e) => {
                        warn!("[GetYieldOpportunitiesTool] Farm lookup failed for {farm_id}: {e}");
                        None
                    }
                },
                None => None,
            };

            let (farming_apr, farming_apr_range, farm_yield) = match &farm {
                Some(farm) => {
                    let max_apr = farm.base_apr * farm.max_lock_multiplier;
                    let max_lock_days = farm.max_lock_duration_ms / MS_PER_DAY;
                    let lock_options = vec![
                        LockOption {
                            duration_days: 0,
                            multiplier: 1.0,
                            boosted_apr: farm.base_apr,
                        },
                        LockOption {
                            duration_days: max_lock_days,
                            multiplier: farm.max_lock_multiplier,
                            boosted_apr: max_apr,
                        },
                    ];
                    (
                        farm.base_apr,
                        Some(AprRange {
                            min: farm.base_apr,
                            max: max_apr,
                        }),
                        Some(FarmYield {
                            farm_id: farm.object_id.clone(),
                            reward_symbols: farm
                                .reward_coin_types
                                .iter()
                                .map(|ct| trailing_segment(ct).to_string())
                                .collect(),
                            lock_options,
                        }),
                    )
                }
                None => (0.0, None, None),
            };

            let user_holds_all_tokens = pool
                .coins
                .iter()
                .all(|c| sheet.available(&c.coin_type) > 0);

            opportunities.push(YieldOpportunity {
                pool_id: pool.object_id.clone(),
                name: pair.name.to_string(),
                lp_coin_type: pool.lp_coin_type.clone(),
                tvl_usd: stats.tvl_usd,
                volume_24h_usd: stats.volume_24h_usd,
                apr: AprBreakdown {
                    pool_fee_apr: stats.fee_apr,
                    farming_apr,
                    total_apr: stats.fee_apr + farming_apr,
                    farming_apr_range,
                },
                user_holds_all_tokens,
                farm: farm_yield,
            });
        }

        if let Some(min_tvl) = args.min_tvl {
            opportunities.retain(|o| o.tvl_usd >= min_tvl);
        }
        if args.only_user_tokens.unwrap_or(false) {
            opportunities.retain(|o| o.user_holds_all_tokens);
        }

        let sort_by = args.sort_by.unwrap_or(SortBy::TotalApr);
        opportunities.sort_by(|a, b| {
            let key = |o: &YieldOpportunity| match sort_by {
                SortBy::TotalApr => o.apr.total_apr,
                SortBy::PoolFeeApr => o.apr.pool_fee_apr,
                SortBy::FarmingApr => o.apr.farming_apr,
                SortBy::Tvl => o.tvl_usd,
                SortBy::Volume24h => o.volume_24h_usd,
            };
            key(b).partial_cmp(&key(a)).unwrap_or(std::cmp::Ordering::Equal)
        });
        opportunities.truncate(args.limit.unwrap_or(DEFAULT_LIMIT));

        let result = YieldOpportunitiesResult {
            success: true,
            error: None,
            opportunities,
        };
        Ok(serde_json::to_string(&result)?)
    }
}
