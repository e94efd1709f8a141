//! Sui JSON-RPC reader
//!
//! Read-only queries against a fullnode. The `ChainReader` trait is the seam
//! the tools depend on; `SuiClient` is the production implementation and the
//! mocks in [`crate::mock`] back the tests.

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Deserialize};
use serde_json::json;
use shoal_types::{CoinMeta, RawCoinBalance};
use thiserror::Error;
use tracing::instrument;

use crate::constants::MAINNET_FULLNODE_URL;

#[derive(Debug, Error)]
pub enum RpcError {
    #[error("transport error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("rpc error {code}: {message}")]
    Rpc { code: i64, message: String },
    #[error("malformed rpc response: {0}")]
    Malformed(String),
}

/// One coin object owned by an address
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoinObject {
    pub coin_object_id: String,
    pub coin_type: String,
    /// Base units as a decimal-integer string
    pub balance: String,
}

/// Read-only chain queries
#[async_trait]
pub trait ChainReader: Send + Sync {
    /// Every coin balance held by `address`
    async fn get_all_balances(&self, address: &str) -> Result<Vec<RawCoinBalance>, RpcError>;

    /// Balance of one coin type
    async fn get_balance(&self, address: &str, coin_type: &str)
        -> Result<RawCoinBalance, RpcError>;

    /// Metadata for a coin type; `None` when the chain has none registered
    async fn get_coin_metadata(&self, coin_type: &str) -> Result<Option<CoinMeta>, RpcError>;

    /// Individual coin objects of one type owned by `owner`
    async fn get_coins(&self, owner: &str, coin_type: &str) -> Result<Vec<CoinObject>, RpcError>;
}

#[derive(Debug, Deserialize)]
struct RpcEnvelope<T> {
    result: Option<T>,
    error: Option<RpcErrorBody>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorBody {
    code: i64,
    message: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CoinPage {
    data: Vec<CoinObject>,
}

/// JSON-RPC client for a Sui fullnode
#[derive(Debug, Clone)]
pub struct SuiClient {
    http: reqwest::Client,
    url: String,
}

impl SuiClient {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            url: url.into(),
        }
    }

    pub fn mainnet() -> Self {
        Self::new(MAINNET_FULLNODE_URL)
    }

    async fn call<R: DeserializeOwned>(
        &self,
        method: &str,
        params: serde_json::Value,
    ) -> Result<R, RpcError> {
        let body = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": method,
            "params": params,
        });

        let envelope: RpcEnvelope<R> = self
            .http
            .post(&self.url)
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        if let Some(err) = envelope.error {
            return Err(RpcError::Rpc {
                code: err.code,
                message: err.message,
            });
        }
        envelope
            .result
            .ok_or_else(|| RpcError::Malformed(format!("{method}: empty result")))
    }

    /// Like [`Self::call`] but a `null` result is a valid answer
    async fn call_nullable<R: DeserializeOwned>(
        &self,
        method: &str,
        params: serde_json::Value,
    ) -> Result<Option<R>, RpcError> {
        let body = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": method,
            "params": params,
        });

        let envelope: RpcEnvelope<R> = self
            .http
            .post(&self.url)
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        if let Some(err) = envelope.error {
            return Err(RpcError::Rpc {
                code: err.code,
                message: err.message,
            });
        }
        Ok(envelope.result)
    }
}

#[async_trait]
impl ChainReader for SuiClient {
    #[instrument(name = "sui_get_all_balances", skip(self))]
    async fn get_all_balances(&self, address: &str) -> Result<Vec<RawCoinBalance>, RpcError> {
        self.call("suix_getAllBalances", json!([address])).await
    }

    #[instrument(name = "sui_get_balance", skip(self))]
    async fn get_balance(
        &self,
        address: &str,
        coin_type: &str,
    ) -> Result<RawCoinBalance, RpcError> {
        self.call("suix_getBalance", json!([address, coin_type]))
            .await
    }

    #[instrument(name = "sui_get_coin_metadata", skip(self))]
    async fn get_coin_metadata(&self, coin_type: &str) -> Result<Option<CoinMeta>, RpcError> {
        self.call_nullable("suix_getCoinMetadata", json!([coin_type]))
            .await
    }

    #[instrument(name = "sui_get_coins", skip(self))]
    async fn get_coins(&self, owner: &str, coin_type: &str) -> Result<Vec<CoinObject>, RpcError> {
        // A single page of up to 1000 objects covers any realistic wallet
        let page: CoinPage = self
            .call(
                "suix_getCoins",
                json!([owner, coin_type, null, 1000]),
            )
            .await?;
        Ok(page.data)
    }
}
