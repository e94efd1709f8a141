//! Tool definitions with type-safe enums
//!
//! Tool names are the one string contract shared by the orchestrator, the
//! model and the client renderer, so they are kept as a strum enum instead of
//! loose strings.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

/// Available tool names with type safety
#[derive(
    Debug,
    Clone,
    Copy,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
)]
pub enum ToolName {
    /// Portfolio balances with USD valuation
    #[strum(serialize = "get_all_balances")]
    GetAllBalances,

    /// USD unit prices for a set of coin types
    #[strum(serialize = "get_prices")]
    GetPrices,

    /// Metadata for the supported trading coins
    #[strum(serialize = "list_coins")]
    ListCoins,

    /// Unsigned SUI transfer transaction
    #[strum(serialize = "send_sui")]
    SendSui,

    /// Aftermath swap: route quote plus unsigned transaction
    #[strum(serialize = "swap")]
    Swap,

    /// Spring liquid staking mint/redeem
    #[strum(serialize = "liquid_staking")]
    LiquidStaking,

    /// Pool deposit and/or farm stake
    #[strum(serialize = "add_liquidity")]
    AddLiquidity,

    /// Curated pool/farm APR opportunities
    #[strum(serialize = "get_yield_opportunities")]
    GetYieldOpportunities,
}

impl ToolName {
    /// Check if the tool operates on a specific wallet address
    pub fn requires_wallet(&self) -> bool {
        !matches!(self, ToolName::ListCoins | ToolName::GetPrices)
    }

    /// Check if the tool returns unsigned transaction bytes that need a
    /// wallet approval step before anything happens on chain
    pub fn produces_transaction(&self) -> bool {
        matches!(
            self,
            ToolName::SendSui
                | ToolName::Swap
                | ToolName::LiquidStaking
                | ToolName::AddLiquidity
        )
    }

    /// Get tool category for grouping
    pub fn category(&self) -> ToolCategory {
        match self {
            ToolName::GetAllBalances
            | ToolName::GetPrices
            | ToolName::ListCoins
            | ToolName::GetYieldOpportunities => ToolCategory::Discovery,
            ToolName::SendSui => ToolCategory::Transfer,
            ToolName::Swap => ToolCategory::Trading,
            ToolName::LiquidStaking => ToolCategory::Staking,
            ToolName::AddLiquidity => ToolCategory::Liquidity,
        }
    }
}

/// Tool categories for organization
#[derive(Debug, Clone, Copy, Display, PartialEq, Eq, Hash)]
pub enum ToolCategory {
    /// Read-only discovery and information tools
    Discovery,
    /// Token transfer tools
    Transfer,
    /// Swap and exchange tools
    Trading,
    /// Liquid staking tools
    Staking,
    /// Pool liquidity and farming tools
    Liquidity,
}

impl ToolName {
    /// Convert from string (with validation)
    pub fn from_str_safe(s: &str) -> Option<Self> {
        s.parse::<Self>().ok()
    }

    /// Get string representation for serialization
    pub fn as_str(&self) -> &'static str {
        self.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_name_serialization() {
        let tool = ToolName::Swap;
        assert_eq!(tool.to_string(), "swap");
        assert_eq!(tool.as_str(), "swap");
    }

    #[test]
    fn test_tool_name_deserialization() {
        let parsed: ToolName = "liquid_staking".parse().unwrap();
        assert_eq!(parsed, ToolName::LiquidStaking);
        assert!(ToolName::from_str_safe("definitely_not_a_tool").is_none());
    }

    #[test]
    fn test_wallet_requirements() {
        assert!(ToolName::GetAllBalances.requires_wallet());
        assert!(!ToolName::ListCoins.requires_wallet());
        assert!(!ToolName::GetPrices.requires_wallet());
    }

    #[test]
    fn test_transaction_producers() {
        assert!(ToolName::Swap.produces_transaction());
        assert!(ToolName::AddLiquidity.produces_transaction());
        assert!(!ToolName::GetAllBalances.produces_transaction());
    }

    #[test]
    fn test_tool_categories() {
        assert_eq!(ToolName::Swap.category(), ToolCategory::Trading);
        assert_eq!(
            ToolName::GetYieldOpportunities.category(),
            ToolCategory::Discovery
        );
        assert_eq!(ToolName::AddLiquidity.category(), ToolCategory::Liquidity);
    }
}
