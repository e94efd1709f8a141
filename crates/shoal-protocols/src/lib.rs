//! Protocol clients for shoal
//!
//! The DEX, farms, liquid staking and native transfer building are consumed
//! as opaque oracles/transaction factories behind the traits in
//! [`common::traits`]. HTTP implementations live per protocol; deterministic
//! mocks back the tests.

pub mod aftermath;
pub mod common;
pub mod mock;
pub mod native;
pub mod spring;

pub use common::traits::{
    DexOracle, FarmsOracle, LstProtocol, PoolsOracle, PriceOracle, TransferBuilder,
};
pub use common::{Farm, Pool, PoolCoin, PoolStats, ProtocolError, QuotedRoute, StakedLpPosition};
