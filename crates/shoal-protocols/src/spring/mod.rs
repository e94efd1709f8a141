//! Spring liquid staking client
//!
//! Builds mint/redeem transactions for the sSUI liquid staking pool over the
//! Spring API. Which coin objects participate in a redeem is the caller's
//! decision; the redeem transaction merges every listed object before
//! splitting off the requested amount.

use crate::common::traits::LstProtocol;
use crate::common::ProtocolError;
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use serde::Deserialize;
use serde_json::json;
use shoal_sui::constants::SPRING_LST;
use tracing::instrument;

pub const DEFAULT_API_URL: &str = "https://api.springsui.com/v1";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TxBytesResponse {
    tx_bytes: String,
}

/// HTTP client for the Spring staking API
#[derive(Debug, Clone)]
pub struct SpringClient {
    http: reqwest::Client,
    base_url: String,
}

impl SpringClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    pub fn mainnet() -> Self {
        Self::new(DEFAULT_API_URL)
    }

    async fn build_tx(
        &self,
        path: &str,
        body: &serde_json::Value,
    ) -> Result<Vec<u8>, ProtocolError> {
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
        let parsed: TxBytesResponse = response.json().await?;
        BASE64
            .decode(&parsed.tx_bytes)
            .map_err(|e| ProtocolError::Malformed(format!("transaction bytes: {e}")))
    }
}

#[async_trait]
impl LstProtocol for SpringClient {
    #[instrument(name = "spring_build_mint", skip(self))]
    async fn build_mint_transaction(
        &self,
        address: &str,
        amount: u128,
    ) -> Result<Vec<u8>, ProtocolError> {
        self.build_tx(
            "transactions/mint",
            &json!({
                "stakingPoolId": SPRING_LST.id,
                "weightHookId": SPRING_LST.weight_hook_id,
                "sender": address,
                "amount": amount.to_string(),
            }),
        )
        .await
    }

    #[instrument(name = "spring_build_redeem", skip(self))]
    async fn build_redeem_transaction(
        &self,
        address: &str,
        coin_object_ids: &[String],
        amount: u128,
    ) -> Result<Vec<u8>, ProtocolError> {
        self.build_tx(
            "transactions/redeem",
            &json!({
                "stakingPoolId": SPRING_LST.id,
                "weightHookId": SPRING_LST.weight_hook_id,
                "sender": address,
                "coinObjectIds": coin_object_ids,
                "amount": amount.to_string(),
            }),
        )
        .await
    }
}
