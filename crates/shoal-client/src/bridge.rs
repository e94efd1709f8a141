//! Transaction execution bridge
//!
//! Takes whatever shape a tool delivered the transaction in, normalizes it
//! to bytes, and asks the wallet to sign-and-execute. Connectivity is
//! checked before any payload work. Failures are terminal and reported;
//! retrying is an explicit user action (clicking again), never automatic.

use crate::wallet::{TxDigest, WalletAdapter, WalletError};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use serde_json::Value;
use tracing::{error, info};

/// Normalize a transaction payload to raw bytes.
///
/// Upstream tools are inconsistent in how they serialize transactions; all
/// of these produce bit-identical bytes:
/// - a JSON array of byte values
/// - a byte-indexed object (`{"0": 12, "1": 34, ...}`)
/// - a string containing either of the above as JSON, or base64
pub fn normalize_transaction_payload(payload: &Value) -> Result<Vec<u8>, WalletError> {
    match payload {
        Value::Array(items) => {
            let mut bytes = Vec::with_capacity(items.len());
            for item in items {
                let byte = item
                    .as_u64()
                    .filter(|b| *b <= u8::MAX as u64)
                    .ok_or_else(|| {
                        WalletError::MalformedPayload(format!("not a byte value: {item}"))
                    })?;
                bytes.push(byte as u8);
            }
            Ok(bytes)
        }
        Value::Object(map) => {
            let mut indexed = Vec::with_capacity(map.len());
            for (key, value) in map {
                let index: usize = key.parse().map_err(|_| {
                    WalletError::MalformedPayload(format!("non-numeric byte index: {key}"))
                })?;
                let byte = value
                    .as_u64()
                    .filter(|b| *b <= u8::MAX as u64)
                    .ok_or_else(|| {
                        WalletError::MalformedPayload(format!("not a byte value: {value}"))
                    })?;
                indexed.push((index, byte as u8));
            }
            indexed.sort_by_key(|(index, _)| *index);
            Ok(indexed.into_iter().map(|(_, byte)| byte).collect())
        }
        Value::String(s) => {
            if let Ok(inner) = serde_json::from_str::<Value>(s) {
                if matches!(inner, Value::Array(_) | Value::Object(_)) {
                    return normalize_transaction_payload(&inner);
                }
            }
            BASE64
                .decode(s)
                .map_err(|e| WalletError::MalformedPayload(format!("not base64: {e}")))
        }
        Value::Null => Err(WalletError::MalformedPayload(
            "empty transaction received".to_string(),
        )),
        other => Err(WalletError::MalformedPayload(format!(
            "unsupported payload shape: {other}"
        ))),
    }
}

/// Signing workflow entry point
pub struct ExecutionBridge;

impl ExecutionBridge {
    /// One signing attempt. Never retries; a second attempt is a second
    /// explicit call.
    pub async fn execute(
        wallet: &dyn WalletAdapter,
        payload: &Value,
    ) -> Result<TxDigest, WalletError> {
        // Fail fast before touching the payload
        if !wallet.connected() {
            error!("[ExecutionBridge] Wallet not connected");
            return Err(WalletError::NotConnected);
        }

        let tx_bytes = normalize_transaction_payload(payload).map_err(|e| {
            error!("[ExecutionBridge] {e}");
            e
        })?;

        match wallet.sign_and_execute(&tx_bytes).await {
            Ok(digest) => {
                info!("[ExecutionBridge] Transaction executed: {}", digest.digest);
                Ok(digest)
            }
            Err(e) => {
                // Rejection and execution failures are terminal outcomes,
                // surfaced to the user, never silently swallowed
                error!("[ExecutionBridge] {e}");
                Err(e)
            }
        }
    }
}
