//! Deterministic in-memory chain for tests and mock mode

use crate::rpc::{ChainReader, CoinObject, RpcError};
use async_trait::async_trait;
use shoal_types::{CoinMeta, RawCoinBalance};
use std::collections::HashMap;
use std::sync::Mutex;

/// A scriptable `ChainReader` with fixed balances, metadata and coin objects
#[derive(Default)]
pub struct MockChain {
    balances: HashMap<String, Vec<RawCoinBalance>>,
    metadata: HashMap<String, CoinMeta>,
    coins: HashMap<(String, String), Vec<CoinObject>>,
    fail_balances: bool,
    /// Method names recorded in call order
    pub calls: Mutex<Vec<String>>,
}

impl MockChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_balance(mut self, address: &str, coin_type: &str, total_balance: &str) -> Self {
        self.balances
            .entry(address.to_string())
            .or_default()
            .push(RawCoinBalance {
                coin_type: coin_type.to_string(),
                total_balance: total_balance.to_string(),
                coin_object_count: 1,
            });
        self
    }

    pub fn with_metadata(mut self, coin_type: &str, symbol: &str, decimals: u8) -> Self {
        self.metadata.insert(
            coin_type.to_string(),
            CoinMeta {
                symbol: symbol.to_string(),
                decimals,
                name: Some(symbol.to_string()),
                icon_url: None,
            },
        );
        self
    }

    pub fn with_coin_object(
        mut self,
        owner: &str,
        coin_type: &str,
        object_id: &str,
        balance: &str,
    ) -> Self {
        self.coins
            .entry((owner.to_string(), coin_type.to_string()))
            .or_default()
            .push(CoinObject {
                coin_object_id: object_id.to_string(),
                coin_type: coin_type.to_string(),
                balance: balance.to_string(),
            });
        self
    }

    /// Make balance queries fail, to exercise degraded paths
    pub fn failing_balances(mut self) -> Self {
        self.fail_balances = true;
        self
    }

    fn record(&self, method: &str) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(method.to_string());
        }
    }
}

#[async_trait]
impl ChainReader for MockChain {
    async fn get_all_balances(&self, address: &str) -> Result<Vec<RawCoinBalance>, RpcError> {
        self.record("get_all_balances");
        if self.fail_balances {
            return Err(RpcError::Rpc {
                code: -32000,
                message: "mock outage".to_string(),
            });
        }
        Ok(self.balances.get(address).cloned().unwrap_or_default())
    }

    async fn get_balance(
        &self,
        address: &str,
        coin_type: &str,
    ) -> Result<RawCoinBalance, RpcError> {
        self.record("get_balance");
        if self.fail_balances {
            return Err(RpcError::Rpc {
                code: -32000,
                message: "mock outage".to_string(),
            });
        }
        let entry = self
            .balances
            .get(address)
            .and_then(|all| all.iter().find(|b| b.coin_type == coin_type))
            .cloned();
        Ok(entry.unwrap_or(RawCoinBalance {
            coin_type: coin_type.to_string(),
            total_balance: "0".to_string(),
            coin_object_count: 0,
        }))
    }

    async fn get_coin_metadata(&self, coin_type: &str) -> Result<Option<CoinMeta>, RpcError> {
        self.record("get_coin_metadata");
        Ok(self.metadata.get(coin_type).cloned())
    }

    async fn get_coins(&self, owner: &str, coin_type: &str) -> Result<Vec<CoinObject>, RpcError> {
        self.record("get_coins");
        Ok(self
            .coins
            .get(&(owner.to_string(), coin_type.to_string()))
            .cloned()
            .unwrap_or_default())
    }
}
