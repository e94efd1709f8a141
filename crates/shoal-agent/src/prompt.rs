//! System prompt assembly

use shoal_sui::coin::normalize_amount;
use shoal_sui::coin::parse_base_units;
use shoal_sui::constants::{SUI_COIN_TYPE, SUI_DECIMALS};
use shoal_sui::ChainReader;
use tracing::warn;

/// Persona and ground rules for the assistant
pub const SYSTEM_PREAMBLE: &str = "I'm an Aftermath Finance DEX assistant on Sui. \
I specialize in helping users with DeFi operations. \
My responses should be organic, friendly and focused on providing a clear and succinct path forward.

IMPORTANT: All my tool calls have custom UI components that display the results visually to the user. \
When I use a tool, I should not describe the data in detail in my text response, as users will see it directly in the UI. \
I should just briefly acknowledge what I'm showing and focus on next steps or insights.

When a user first greets me or starts a conversation, I should immediately use the get_all_balances tool \
to show their portfolio overview as a starting point for the conversation.

I am NOT an autonomous agent - every transaction I prepare requires the user's wallet approval before anything happens on chain.

I can help you with:
- Token swaps with optimal routing through Aftermath Finance (swap tool)
- Checking token prices and market rates (get_prices tool)
- Viewing your token balances (get_all_balances tool)
- Listing available tokens for trading (list_coins tool)
- Sending SUI tokens (send_sui tool)
- Liquid staking SUI into sSUI (liquid_staking tool)
- Providing pool liquidity and farming (add_liquidity tool)
- Finding yield opportunities (get_yield_opportunities tool)

DONT describe the data from the tool response.";

const FALLBACK_PROMPT: &str = "I'm an Aftermath Finance DEX assistant. I can help with DeFi operations \
on the Sui blockchain through Aftermath Finance, but there was an issue looking up the account.";

/// Build the turn's system directive. The live balance snapshot is
/// best-effort: a failed lookup degrades to a generic directive and never
/// aborts the conversation.
pub async fn build_system_prompt(chain: &dyn ChainReader, address: Option<&str>) -> String {
    let Some(address) = address else {
        return format!("{SYSTEM_PREAMBLE}\n\nNo wallet is connected yet; suggest connecting one before any transaction.");
    };

    match chain.get_balance(address, SUI_COIN_TYPE).await {
        Ok(balance) => {
            let normalized = parse_base_units(&balance.total_balance)
                .map(|units| normalize_amount(units, SUI_DECIMALS))
                .unwrap_or(0.0);
            format!(
                "{SYSTEM_PREAMBLE}\n\nCurrent address: {address}\nCurrent balance: {normalized} SUI"
            )
        }
        Err(e) => {
            warn!("[prompt] Balance snapshot failed for {address}: {e}");
            FALLBACK_PROMPT.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shoal_sui::mock::MockChain;

    #[tokio::test]
    async fn embeds_the_live_balance_snapshot() {
        let chain = MockChain::new().with_balance("0xabc", SUI_COIN_TYPE, "2500000000");
        let prompt = build_system_prompt(&chain, Some("0xabc")).await;
        assert!(prompt.contains("Current address: 0xabc"));
        assert!(prompt.contains("Current balance: 2.5 SUI"));
    }

    #[tokio::test]
    async fn snapshot_failure_degrades_to_the_generic_directive() {
        let chain = MockChain::new().failing_balances();
        let prompt = build_system_prompt(&chain, Some("0xabc")).await;
        assert_eq!(prompt, FALLBACK_PROMPT);
    }

    #[tokio::test]
    async fn missing_wallet_gets_the_connect_hint() {
        let chain = MockChain::new();
        let prompt = build_system_prompt(&chain, None).await;
        assert!(prompt.contains("No wallet is connected"));
    }
}
