//! Deterministic in-memory oracles
//!
//! Scriptable implementations of the protocol traits for tests and mock
//! mode. Transaction "bytes" are stable synthetic payloads so assertions can
//! compare them exactly.

use crate::common::traits::{
    DexOracle, FarmsOracle, LstProtocol, PoolsOracle, PriceOracle, TransferBuilder,
};
use crate::common::{Farm, Pool, PoolStats, ProtocolError, QuotedRoute, StakedLpPosition};
use async_trait::async_trait;
use serde_json::json;
use shoal_types::{RouteLeg, SwapRoute};
use std::collections::HashMap;
use std::sync::Mutex;

/// Fixed-price oracle; anything not configured is unresolvable
#[derive(Default)]
pub struct MockPrices {
    prices: HashMap<String, f64>,
}

impl MockPrices {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_price(mut self, coin_type: &str, price: f64) -> Self {
        self.prices.insert(coin_type.to_string(), price);
        self
    }
}

#[async_trait]
impl PriceOracle for MockPrices {
    async fn get_prices(
        &self,
        coin_types: &[String],
    ) -> Result<HashMap<String, f64>, ProtocolError> {
        Ok(coin_types
            .iter()
            .filter_map(|ct| self.prices.get(ct).map(|p| (ct.clone(), *p)))
            .collect())
    }
}

struct MockRate {
    numerator: u128,
    denominator: u128,
    spot_price: f64,
}

/// Linear-rate DEX: `amount_out = amount_in * numerator / denominator`
#[derive(Default)]
pub struct MockDex {
    rates: HashMap<(String, String), MockRate>,
    fail_build: bool,
}

impl MockDex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_route(
        mut self,
        coin_in: &str,
        coin_out: &str,
        numerator: u128,
        denominator: u128,
        spot_price: f64,
    ) -> Self {
        self.rates.insert(
            (coin_in.to_string(), coin_out.to_string()),
            MockRate {
                numerator,
                denominator,
                spot_price,
            },
        );
        self
    }

    /// Route quoting keeps working but transaction building fails
    pub fn failing_build(mut self) -> Self {
        self.fail_build = true;
        self
    }
}

#[async_trait]
impl DexOracle for MockDex {
    async fn find_route(
        &self,
        coin_in: &str,
        coin_out: &str,
        amount_in: u128,
    ) -> Result<QuotedRoute, ProtocolError> {
        let rate = self
            .rates
            .get(&(coin_in.to_string(), coin_out.to_string()))
            .ok_or_else(|| ProtocolError::NotFound {
                entity: "route",
                id: format!("{coin_in} -> {coin_out}"),
            })?;
        let amount_out = amount_in * rate.numerator / rate.denominator;
        let route = SwapRoute {
            coin_in: RouteLeg {
                coin_type: coin_in.to_string(),
                amount: amount_in.to_string(),
            },
            coin_out: RouteLeg {
                coin_type: coin_out.to_string(),
                amount: amount_out.to_string(),
            },
            spot_price: rate.spot_price,
            fee_amount: "0".to_string(),
        };
        Ok(QuotedRoute {
            raw: json!({"coinIn": coin_in, "coinOut": coin_out, "amountIn": amount_in.to_string()}),
            route,
        })
    }

    async fn build_swap_transaction(
        &self,
        address: &str,
        route: &QuotedRoute,
        _slippage: f64,
    ) -> Result<Vec<u8>, ProtocolError> {
        if self.fail_build {
            return Err(ProtocolError::Api("mock build failure".to_string()));
        }
        Ok(format!("swap:{address}:{}", route.route.coin_out.amount).into_bytes())
    }
}

/// Pools with a scripted LP estimate
#[derive(Default)]
pub struct MockPools {
    pools: HashMap<String, Pool>,
    stats: HashMap<String, PoolStats>,
    lp_estimates: HashMap<String, u128>,
}

impl MockPools {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pool(mut self, pool: Pool) -> Self {
        self.pools.insert(pool.object_id.clone(), pool);
        self
    }

    pub fn with_stats(mut self, pool_id: &str, stats: PoolStats) -> Self {
        self.stats.insert(pool_id.to_string(), stats);
        self
    }

    pub fn with_lp_estimate(mut self, pool_id: &str, lp_out: u128) -> Self {
        self.lp_estimates.insert(pool_id.to_string(), lp_out);
        self
    }
}

#[async_trait]
impl PoolsOracle for MockPools {
    async fn get_pool(&self, pool_id: &str) -> Result<Option<Pool>, ProtocolError> {
        Ok(self.pools.get(pool_id).cloned())
    }

    async fn get_pool_stats(&self, pool_id: &str) -> Result<Option<PoolStats>, ProtocolError> {
        Ok(self.stats.get(pool_id).cloned())
    }

    async fn estimate_lp_out(
        &self,
        pool_id: &str,
        _amounts_in: &[(String, u128)],
    ) -> Result<u128, ProtocolError> {
        self.lp_estimates
            .get(pool_id)
            .copied()
            .ok_or_else(|| ProtocolError::NotFound {
                entity: "lp estimate",
                id: pool_id.to_string(),
            })
    }

    async fn build_deposit_transaction(
        &self,
        address: &str,
        pool_id: &str,
        amounts_in: &[(String, u128)],
        _slippage: f64,
    ) -> Result<Vec<u8>, ProtocolError> {
        Ok(format!("deposit:{address}:{pool_id}:{}", amounts_in.len()).into_bytes())
    }
}

/// Farms that record every stake build
#[derive(Default)]
pub struct MockFarms {
    farms: HashMap<String, Farm>,
    positions: HashMap<String, Vec<StakedLpPosition>>,
    /// (farm_id, lp_amount, lock_duration_ms) in call order
    pub stake_calls: Mutex<Vec<(String, u128, u64)>>,
}

impl MockFarms {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_farm(mut self, farm: Farm) -> Self {
        self.farms.insert(farm.object_id.clone(), farm);
        self
    }

    pub fn with_staked_position(
        mut self,
        address: &str,
        farm_id: &str,
        coin_type: &str,
        amount: &str,
    ) -> Self {
        self.positions
            .entry(address.to_string())
            .or_default()
            .push(StakedLpPosition {
                farm_id: farm_id.to_string(),
                coin_type: coin_type.to_string(),
                amount: amount.to_string(),
            });
        self
    }
}

#[async_trait]
impl FarmsOracle for MockFarms {
    async fn get_farm(&self, farm_id: &str) -> Result<Option<Farm>, ProtocolError> {
        Ok(self.farms.get(farm_id).cloned())
    }

    async fn get_staked_positions(
        &self,
        address: &str,
    ) -> Result<Vec<StakedLpPosition>, ProtocolError> {
        Ok(self.positions.get(address).cloned().unwrap_or_default())
    }

    async fn build_stake_transaction(
        &self,
        address: &str,
        farm_id: &str,
        lp_amount: u128,
        lock_duration_ms: u64,
    ) -> Result<Vec<u8>, ProtocolError> {
        if let Ok(mut calls) = self.stake_calls.lock() {
            calls.push((farm_id.to_string(), lp_amount, lock_duration_ms));
        }
        Ok(format!("stake:{address}:{farm_id}:{lp_amount}").into_bytes())
    }
}

/// Liquid staking factory that records redeem participants
#[derive(Default)]
pub struct MockLst {
    /// (address, coin_object_ids, amount) in call order
    pub redeem_calls: Mutex<Vec<(String, Vec<String>, u128)>>,
}

impl MockLst {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LstProtocol for MockLst {
    async fn build_mint_transaction(
        &self,
        address: &str,
        amount: u128,
    ) -> Result<Vec<u8>, ProtocolError> {
        Ok(format!("mint:{address}:{amount}").into_bytes())
    }

    async fn build_redeem_transaction(
        &self,
        address: &str,
        coin_object_ids: &[String],
        amount: u128,
    ) -> Result<Vec<u8>, ProtocolError> {
        if let Ok(mut calls) = self.redeem_calls.lock() {
            calls.push((address.to_string(), coin_object_ids.to_vec(), amount));
        }
        Ok(format!("redeem:{address}:{}:{amount}", coin_object_ids.len()).into_bytes())
    }
}

/// Transfer factory
#[derive(Default)]
pub struct MockTransfer;

impl MockTransfer {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl TransferBuilder for MockTransfer {
    async fn build_transfer_transaction(
        &self,
        sender: &str,
        recipient: &str,
        amount: u128,
    ) -> Result<Vec<u8>, ProtocolError> {
        Ok(format!("transfer:{sender}:{recipient}:{amount}").into_bytes())
    }
}
