//! Aftermath Finance client
//!
//! Route quoting, pool/farm queries and transaction building over the
//! Aftermath HTTP API. Routing and pricing internals are the provider's
//! business; this module only normalizes the payloads.

mod client;

pub use client::AftermathClient;

pub const DEFAULT_API_URL: &str = "https://aftermath.finance/api";

/// Default slippage tolerance (1%)
pub const DEFAULT_SLIPPAGE: f64 = 0.01;
