//! Chain and protocol constants

/// Canonical short form of the native gas token type
pub const SUI_COIN_TYPE: &str = "0x2::sui::SUI";

/// Long (zero-padded) form some RPC surfaces return for the same token
pub const SUI_COIN_TYPE_LONG: &str =
    "0x0000000000000000000000000000000000000000000000000000000000000002::sui::SUI";

/// Base units per SUI
pub const MIST_PER_SUI: u64 = 1_000_000_000;

pub const SUI_DECIMALS: u8 = 9;

/// Fallback when metadata resolution fails
pub const DEFAULT_DECIMALS: u8 = 9;

/// Normalized balances below this are hidden from display (totals still
/// include them when priced)
pub const DUST_THRESHOLD: f64 = 1e-6;

pub const MAINNET_FULLNODE_URL: &str = "https://fullnode.mainnet.sui.io:443";

pub const SUI_ICON_URL: &str =
    "https://raw.githubusercontent.com/MystenLabs/sui/main/apps/icons/sui.svg";

/// Spring liquid staking deployment
pub struct LiquidStakingInfo {
    pub id: &'static str,
    pub coin_type: &'static str,
    pub weight_hook_id: &'static str,
}

pub const SPRING_LST: LiquidStakingInfo = LiquidStakingInfo {
    id: "0x15eda7330c8f99c30e430b4d82fd7ab2af3ead4ae17046fcb224aa9bad394f6b",
    coin_type: "0x83556891f4a0f233ce7b05cfe7f957d4020492a34f5405b2cb9377d060bef4bf::spring_sui::SPRING_SUI",
    weight_hook_id: "0xbbafcb2d7399c0846f8185da3f273ad5b26b3b35993050affa44cfa890f1f144",
};

/// Referral address attached to route quotes
pub const AFTERMATH_REFERRER: &str =
    "0x06c08cca282ea5f05ed81d3ce08872a99451571971f7ff4b63ee8dddad4b43c4";

/// Coin types tradable through the assistant
pub fn supported_coins() -> &'static [&'static str] {
    &[
        SUI_COIN_TYPE,
        "0x5d4b302506645c37ff133b98c4b50a5ae14841659738d6d733d59d0d217a93bf::coin::COIN",
        "0xc060006111016b8a020ad5b33834984a437aaa7d3c74c18e09a95d48aceab08c::coin::COIN",
        "0x06864a6f921804860930db6ddbe2e16acdf8504495ea7481637a1c8b9a8fe54b::cetus::CETUS",
        "0xa99b8952d4f7d947ea77fe0ecdcc9e5fc0bcab2841d6e2a5aa00c3044e5544b5::navx::NAVX",
        SPRING_LST.coin_type,
    ]
}
