//! Tool name constants
//!
//! Centralized so other crates never hardcode the wire strings. These must
//! stay in lockstep with `shoal_types::ToolName`.

/// Portfolio balances tool name
pub const GET_ALL_BALANCES: &str = "get_all_balances";

/// Price lookup tool name
pub const GET_PRICES: &str = "get_prices";

/// Supported coin listing tool name
pub const LIST_COINS: &str = "list_coins";

/// SUI transfer tool name
pub const SEND_SUI: &str = "send_sui";

/// Aftermath swap tool name
pub const SWAP: &str = "swap";

/// Spring liquid staking tool name
pub const LIQUID_STAKING: &str = "liquid_staking";

/// Pool deposit / farm stake tool name
pub const ADD_LIQUIDITY: &str = "add_liquidity";

/// Yield opportunity discovery tool name
pub const GET_YIELD_OPPORTUNITIES: &str = "get_yield_opportunities";

#[cfg(test)]
mod tests {
    use shoal_types::ToolName;

    #[test]
    fn constants_match_the_enum() {
        assert_eq!(super::GET_ALL_BALANCES, ToolName::GetAllBalances.as_str());
        assert_eq!(super::GET_PRICES, ToolName::GetPrices.as_str());
        assert_eq!(super::LIST_COINS, ToolName::ListCoins.as_str());
        assert_eq!(super::SEND_SUI, ToolName::SendSui.as_str());
        assert_eq!(super::SWAP, ToolName::Swap.as_str());
        assert_eq!(super::LIQUID_STAKING, ToolName::LiquidStaking.as_str());
        assert_eq!(super::ADD_LIQUIDITY, ToolName::AddLiquidity.as_str());
        assert_eq!(
            super::GET_YIELD_OPPORTUNITIES,
            ToolName::GetYieldOpportunities.as_str()
        );
    }
}
