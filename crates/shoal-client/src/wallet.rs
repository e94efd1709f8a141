//! Wallet adapter seam
//!
//! The browser extension (or any signer) sits behind this trait. A user
//! closing the signing prompt must reject the call, never hang it.

use async_trait::async_trait;
use std::sync::Mutex;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum WalletError {
    #[error("Wallet not connected. Please connect your wallet first.")]
    NotConnected,
    #[error("Transaction rejected in wallet")]
    Rejected,
    #[error("Malformed transaction payload: {0}")]
    MalformedPayload(String),
    #[error("Transaction failed: {0}")]
    Execution(String),
}

/// Successful execution receipt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxDigest {
    pub digest: String,
}

#[async_trait]
pub trait WalletAdapter: Send + Sync {
    fn connected(&self) -> bool;

    fn address(&self) -> Option<String>;

    /// Sign and submit. Rejection resolves to `Err(Rejected)`, never an
    /// indefinitely pending future.
    async fn sign_and_execute(&self, tx_bytes: &[u8]) -> Result<TxDigest, WalletError>;
}

/// Scriptable wallet for tests
pub struct MockWallet {
    connected: bool,
    reject: bool,
    /// Exact bytes passed to each signing call
    pub signed: Mutex<Vec<Vec<u8>>>,
}

impl MockWallet {
    pub fn connected() -> Self {
        Self {
            connected: true,
            reject: false,
            signed: Mutex::new(Vec::new()),
        }
    }

    pub fn disconnected() -> Self {
        Self {
            connected: false,
            reject: false,
            signed: Mutex::new(Vec::new()),
        }
    }

    /// A wallet whose user dismisses every prompt
    pub fn rejecting() -> Self {
        Self {
            connected: true,
            reject: true,
            signed: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl WalletAdapter for MockWallet {
    fn connected(&self) -> bool {
        self.connected
    }

    fn address(&self) -> Option<String> {
        self.connected.then(|| "0xmock".to_string())
    }

    async fn sign_and_execute(&self, tx_bytes: &[u8]) -> Result<TxDigest, WalletError> {
        if !self.connected {
            return Err(WalletError::NotConnected);
        }
        if self.reject {
            return Err(WalletError::Rejected);
        }
        if let Ok(mut signed) = self.signed.lock() {
            signed.push(tx_bytes.to_vec());
        }
        Ok(TxDigest {
            digest: format!("digest-{}", tx_bytes.len()),
        })
    }
}
