//! Sui chain access for shoal
//!
//! A thin JSON-RPC reader over the public fullnode plus the coin-type and
//! base-unit arithmetic the tools share. Nothing in this crate signs or
//! submits anything.

pub mod balance_check;
pub mod coin;
pub mod constants;
pub mod mock;
pub mod rpc;

pub use balance_check::{BalanceCheckError, BalanceSheet};
pub use coin::{normalize_amount, normalize_coin_type, parse_base_units, same_coin_type};
pub use rpc::{ChainReader, CoinObject, RpcError, SuiClient};
