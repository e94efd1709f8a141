//! Native transfer transaction building
//!
//! Uses the fullnode's unsigned-transaction RPCs (`unsafe_paySui`) so no
//! local transaction assembly is needed. The returned bytes are unsigned and
//! go through the wallet approval flow like every other transaction.

use crate::common::traits::TransferBuilder;
use crate::common::ProtocolError;
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use serde::Deserialize;
use serde_json::json;
use shoal_sui::constants::SUI_COIN_TYPE;
use shoal_sui::ChainReader;
use std::sync::Arc;
use tracing::instrument;

const TRANSFER_GAS_BUDGET: u64 = 10_000_000;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TransactionBytes {
    tx_bytes: String,
}

#[derive(Debug, Deserialize)]
struct RpcEnvelope {
    result: Option<TransactionBytes>,
    error: Option<RpcErrorBody>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorBody {
    code: i64,
    message: String,
}

/// Builds SUI transfer transactions against a fullnode
pub struct NativeGateway {
    http: reqwest::Client,
    url: String,
    chain: Arc<dyn ChainReader>,
}

impl NativeGateway {
    pub fn new(url: impl Into<String>, chain: Arc<dyn ChainReader>) -> Self {
        Self {
            http: reqwest::Client::new(),
            url: url.into(),
            chain,
        }
    }
}

#[async_trait]
impl TransferBuilder for NativeGateway {
    #[instrument(name = "native_build_transfer", skip(self))]
    async fn build_transfer_transaction(
        &self,
        sender: &str,
        recipient: &str,
        amount: u128,
    ) -> Result<Vec<u8>, ProtocolError> {
        // Gather the sender's SUI coin objects; the node merges them as
        // needed to cover the amount plus gas
        let coins = self
            .chain
            .get_coins(sender, SUI_COIN_TYPE)
            .await
            .map_err(|e| ProtocolError::Api(format!("coin lookup failed: {e}")))?;
        if coins.is_empty() {
            return Err(ProtocolError::Api("sender holds no SUI coins".to_string()));
        }
        let input_coins: Vec<&str> = coins.iter().map(|c| c.coin_object_id.as_str()).collect();

        let body = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "unsafe_paySui",
            "params": [
                sender,
                input_coins,
                [recipient],
                [amount.to_string()],
                TRANSFER_GAS_BUDGET.to_string(),
            ],
        });

        let envelope: RpcEnvelope = self
            .http
            .post(&self.url)
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        if let Some(err) = envelope.error {
            return Err(ProtocolError::Api(format!(
                "unsafe_paySui {}: {}",
                err.code, err.message
            )));
        }
        let tx = envelope
            .result
            .ok_or_else(|| ProtocolError::Malformed("unsafe_paySui: empty result".to_string()))?;
        BASE64
            .decode(&tx.tx_bytes)
            .map_err(|e| ProtocolError::Malformed(format!("transaction bytes: {e}")))
    }
}
