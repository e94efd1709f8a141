use crate::common::traits::{DexOracle, FarmsOracle, PoolsOracle, PriceOracle};
use crate::common::{Farm, Pool, PoolStats, ProtocolError, QuotedRoute, StakedLpPosition};
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use serde::Deserialize;
use serde_json::json;
use shoal_sui::constants::AFTERMATH_REFERRER;
use shoal_types::{RouteLeg, SwapRoute};
use std::collections::HashMap;
use tracing::instrument;

/// HTTP client for the Aftermath API
#[derive(Debug, Clone)]
pub struct AftermathClient {
    http: reqwest::Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiRouteLeg {
    #[serde(rename = "type")]
    coin_type: String,
    amount: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiTradeRoute {
    coin_in: ApiRouteLeg,
    coin_out: ApiRouteLeg,
    spot_price: f64,
    #[serde(default)]
    fee_amount: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TxBytesResponse {
    tx_bytes: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LpEstimateResponse {
    lp_amount_out: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PriceInfo {
    price: f64,
}

impl AftermathClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    pub fn mainnet() -> Self {
        Self::new(super::DEFAULT_API_URL)
    }

    async fn post<R: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        body: &serde_json::Value,
    ) -> Result<R, ProtocolError> {
        let response = self
            .http
            .post(format!("{}/{path}", self.base_url))
            .json(body)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(ProtocolError::Api(format!(
                "{path}: {}",
                response.status()
            )));
        }
        Ok(response.json().await?)
    }

    async fn get<R: serde::de::DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<Option<R>, ProtocolError> {
        let response = self
            .http
            .get(format!("{}/{path}", self.base_url))
            .send()
            .await?;
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(ProtocolError::Api(format!(
                "{path}: {}",
                response.status()
            )));
        }
        Ok(Some(response.json().await?))
    }

    fn decode_tx(&self, tx_bytes: &str) -> Result<Vec<u8>, ProtocolError> {
        BASE64
            .decode(tx_bytes)
            .map_err(|e| ProtocolError::Malformed(format!("transaction bytes: {e}")))
    }

    fn amounts_map(amounts_in: &[(String, u128)]) -> serde_json::Value {
        let map: serde_json::Map<String, serde_json::Value> = amounts_in
            .iter()
            .map(|(coin_type, amount)| (coin_type.clone(), json!(amount.to_string())))
            .collect();
        serde_json::Value::Object(map)
    }
}

#[async_trait]
impl PriceOracle for AftermathClient {
    #[instrument(name = "aftermath_get_prices", skip(self))]
    async fn get_prices(
        &self,
        coin_types: &[String],
    ) -> Result<HashMap<String, f64>, ProtocolError> {
        let raw: HashMap<String, PriceInfo> = self
            .post("price-info", &json!({ "coins": coin_types }))
            .await?;
        // Providers report unknown coins as negative sentinels; drop them so
        // absence stays distinguishable from a real price
        Ok(raw
            .into_iter()
            .filter(|(_, info)| info.price > 0.0)
            .map(|(coin_type, info)| (coin_type, info.price))
            .collect())
    }
}

#[async_trait]
impl DexOracle for AftermathClient {
    #[instrument(name = "aftermath_find_route", skip(self))]
    async fn find_route(
        &self,
        coin_in: &str,
        coin_out: &str,
        amount_in: u128,
    ) -> Result<QuotedRoute, ProtocolError> {
        let raw: serde_json::Value = self
            .post(
                "router/trade-route",
                &json!({
                    "coinInType": coin_in,
                    "coinOutType": coin_out,
                    "coinInAmount": amount_in.to_string(),
                    "referrer": AFTERMATH_REFERRER,
                }),
            )
            .await?;

        let parsed: ApiTradeRoute = serde_json::from_value(raw.clone())
            .map_err(|e| ProtocolError::Malformed(format!("trade route: {e}")))?;

        Ok(QuotedRoute {
            route: SwapRoute {
                coin_in: RouteLeg {
                    coin_type: parsed.coin_in.coin_type,
                    amount: parsed.coin_in.amount,
                },
                coin_out: RouteLeg {
                    coin_type: parsed.coin_out.coin_type,
                    amount: parsed.coin_out.amount,
                },
                spot_price: parsed.spot_price,
                fee_amount: parsed.fee_amount.unwrap_or_else(|| "0".to_string()),
            },
            raw,
        })
    }

    #[instrument(name = "aftermath_build_swap", skip(self, route))]
    async fn build_swap_transaction(
        &self,
        address: &str,
        route: &QuotedRoute,
        slippage: f64,
    ) -> Result<Vec<u8>, ProtocolError> {
        let response: TxBytesResponse = self
            .post(
                "router/transactions/trade",
                &json!({
                    "walletAddress": address,
                    "completeRoute": route.raw,
                    "slippage": slippage,
                }),
            )
            .await?;
        self.decode_tx(&response.tx_bytes)
    }
}

#[async_trait]
impl PoolsOracle for AftermathClient {
    #[instrument(name = "aftermath_get_pool", skip(self))]
    async fn get_pool(&self, pool_id: &str) -> Result<Option<Pool>, ProtocolError> {
        self.get(&format!("pools/{pool_id}")).await
    }

    #[instrument(name = "aftermath_get_pool_stats", skip(self))]
    async fn get_pool_stats(&self, pool_id: &str) -> Result<Option<PoolStats>, ProtocolError> {
        self.get(&format!("pools/{pool_id}/stats")).await
    }

    #[instrument(name = "aftermath_estimate_lp", skip(self))]
    async fn estimate_lp_out(
        &self,
        pool_id: &str,
        amounts_in: &[(String, u128)],
    ) -> Result<u128, ProtocolError> {
        let response: LpEstimateResponse = self
            .post(
                &format!("pools/{pool_id}/deposit-amount-out"),
                &json!({ "amountsIn": Self::amounts_map(amounts_in) }),
            )
            .await?;
        response
            .lp_amount_out
            .parse::<u128>()
            .map_err(|_| ProtocolError::Malformed(format!("lp estimate: {}", response.lp_amount_out)))
    }

    #[instrument(name = "aftermath_build_deposit", skip(self))]
    async fn build_deposit_transaction(
        &self,
        address: &str,
        pool_id: &str,
        amounts_in: &[(String, u128)],
        slippage: f64,
    ) -> Result<Vec<u8>, ProtocolError> {
        let response: TxBytesResponse = self
            .post(
                &format!("pools/{pool_id}/transactions/deposit"),
                &json!({
                    "walletAddress": address,
                    "amountsIn": Self::amounts_map(amounts_in),
                    "slippage": slippage,
                }),
            )
            .await?;
        self.decode_tx(&response.tx_bytes)
    }
}

#[async_trait]
impl FarmsOracle for AftermathClient {
    #[instrument(name = "aftermath_get_farm", skip(self))]
    async fn get_farm(&self, farm_id: &str) -> Result<Option<Farm>, ProtocolError> {
        self.get(&format!("farms/{farm_id}")).await
    }

    #[instrument(name = "aftermath_get_staked_positions", skip(self))]
    async fn get_staked_positions(
        &self,
        address: &str,
    ) -> Result<Vec<StakedLpPosition>, ProtocolError> {
        Ok(self
            .get(&format!("farms/positions/{address}"))
            .await?
            .unwrap_or_default())
    }

    #[instrument(name = "aftermath_build_stake", skip(self))]
    async fn build_stake_transaction(
        &self,
        address: &str,
        farm_id: &str,
        lp_amount: u128,
        lock_duration_ms: u64,
    ) -> Result<Vec<u8>, ProtocolError> {
        let response: TxBytesResponse = self
            .post(
                &format!("farms/{farm_id}/transactions/stake"),
                &json!({
                    "walletAddress": address,
                    "stakeAmount": lp_amount.to_string(),
                    "lockDurationMs": lock_duration_ms,
                }),
            )
            .await?;
        self.decode_tx(&response.tx_bytes)
    }
}
