//! Curated pools and farms
//!
//! Yield discovery works off a vetted list instead of the full on-chain pool
//! universe, so low-liquidity traps never reach the user.

/// A vetted pool, optionally paired with its farm
pub struct CuratedPair {
    pub name: &'static str,
    pub pool_id: &'static str,
    pub farm_id: Option<&'static str>,
}

pub const CURATED_POOLS_AND_FARMS: &[CuratedPair] = &[
    CuratedPair {
        name: "SUI/USDC",
        pool_id: "0x97aae7a80abb29c9feabbe7075028550230401ffe7fb745757d3c28a30437408",
        farm_id: Some("0xb4d9d9f5e38b8d17d0e4f854e6d3b18df3bbd8e5a2d1b2c4a0e2dfc97df6ab05"),
    },
    CuratedPair {
        name: "sSUI/SUI",
        pool_id: "0x0e33f61b9d3ba3c57425fbbcdbc8d8e0e18b1f64072bca0dd437bbf5d09ba654",
        farm_id: None,
    },
    CuratedPair {
        name: "CETUS/SUI",
        pool_id: "0xd35e605fb2f0d4b6bd2e5b9f1b4e9ad45c0f373f2c5881b01b9f2ee0b388a72a",
        farm_id: Some("0x45a7de1f0c9823d1dbd00ffa0ec6ad54e0b235a1a0a9f44c04a410de1fa0a5c7"),
    },
    CuratedPair {
        name: "NAVX/USDC",
        pool_id: "0x13b7c7cbbe24aad6b9b8fcb6e7f10c74ca9b1fd0b3b9f85d16b7e4d0ad4e3aa1",
        farm_id: Some("0x9a5b0dcaf6a26f0a0b3aefa9cfc6ac2a1b31da0ec25a3bbd07e3b4cf2a6e92d0"),
    },
];
