//! Protocol trait definitions
//!
//! The seams between the tools and the external financial services. Every
//! builder returns *unsigned* transaction bytes; signing always happens in
//! the wallet, never here.

use crate::common::{Farm, Pool, PoolStats, ProtocolError, QuotedRoute, StakedLpPosition};
use async_trait::async_trait;
use std::collections::HashMap;

/// Best-effort USD pricing
#[async_trait]
pub trait PriceOracle: Send + Sync {
    /// Unit prices for the requested coin types. Coins with no resolvable
    /// price are simply absent from the map; absence is never 0.0.
    async fn get_prices(
        &self,
        coin_types: &[String],
    ) -> Result<HashMap<String, f64>, ProtocolError>;
}

/// Route quoting and swap transaction building
#[async_trait]
pub trait DexOracle: Send + Sync {
    /// Best-effort trade route for `amount_in` base units of `coin_in`
    async fn find_route(
        &self,
        coin_in: &str,
        coin_out: &str,
        amount_in: u128,
    ) -> Result<QuotedRoute, ProtocolError>;

    /// Unsigned transaction executing a previously quoted route
    async fn build_swap_transaction(
        &self,
        address: &str,
        route: &QuotedRoute,
        slippage: f64,
    ) -> Result<Vec<u8>, ProtocolError>;
}

/// Liquidity pool queries and deposit building
#[async_trait]
pub trait PoolsOracle: Send + Sync {
    async fn get_pool(&self, pool_id: &str) -> Result<Option<Pool>, ProtocolError>;

    async fn get_pool_stats(&self, pool_id: &str) -> Result<Option<PoolStats>, ProtocolError>;

    /// Estimated LP base units minted for a deposit of `amounts_in`
    /// (pool coin type -> base units)
    async fn estimate_lp_out(
        &self,
        pool_id: &str,
        amounts_in: &[(String, u128)],
    ) -> Result<u128, ProtocolError>;

    /// Unsigned deposit transaction
    async fn build_deposit_transaction(
        &self,
        address: &str,
        pool_id: &str,
        amounts_in: &[(String, u128)],
        slippage: f64,
    ) -> Result<Vec<u8>, ProtocolError>;
}

/// Farm queries and stake building
#[async_trait]
pub trait FarmsOracle: Send + Sync {
    async fn get_farm(&self, farm_id: &str) -> Result<Option<Farm>, ProtocolError>;

    /// LP positions `address` has locked across all farms
    async fn get_staked_positions(
        &self,
        address: &str,
    ) -> Result<Vec<StakedLpPosition>, ProtocolError>;

    /// Unsigned stake transaction locking `lp_amount` for `lock_duration_ms`
    async fn build_stake_transaction(
        &self,
        address: &str,
        farm_id: &str,
        lp_amount: u128,
        lock_duration_ms: u64,
    ) -> Result<Vec<u8>, ProtocolError>;
}

/// Liquid staking transaction factory
#[async_trait]
pub trait LstProtocol: Send + Sync {
    /// Unsigned mint: deposit `amount` base units of the base token
    async fn build_mint_transaction(
        &self,
        address: &str,
        amount: u128,
    ) -> Result<Vec<u8>, ProtocolError>;

    /// Unsigned redeem of `amount` base units of the yield token. Every
    /// object id in `coin_object_ids` participates: the transaction merges
    /// them into one balance before splitting off `amount`, so a request
    /// exceeding any single object but not their sum still succeeds.
    async fn build_redeem_transaction(
        &self,
        address: &str,
        coin_object_ids: &[String],
        amount: u128,
    ) -> Result<Vec<u8>, ProtocolError>;
}

/// Native transfer transaction factory
#[async_trait]
pub trait TransferBuilder: Send + Sync {
    /// Unsigned transfer of `amount` base units of SUI to `recipient`
    async fn build_transfer_transaction(
        &self,
        sender: &str,
        recipient: &str,
        amount: u128,
    ) -> Result<Vec<u8>, ProtocolError>;
}
