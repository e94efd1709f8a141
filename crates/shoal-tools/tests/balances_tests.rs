//! Behavior tests for the balances tool against mock oracles

use rig::tool::Tool;
use shoal_protocols::mock::{MockFarms, MockPrices};
use shoal_sui::mock::MockChain;
use shoal_tools::tools::get_all_balances::{GetAllBalancesArgs, GetAllBalancesTool};
use shoal_types::BalancesResult;
use std::sync::Arc;

const ADDR: &str = "0xuser";
const SUI: &str = "0x2::sui::SUI";
const SUI_LONG: &str =
    "0x0000000000000000000000000000000000000000000000000000000000000002::sui::SUI";
const USDC: &str = "0xaaa::usdc::USDC";

fn tool(chain: MockChain, prices: MockPrices, farms: MockFarms) -> GetAllBalancesTool {
    GetAllBalancesTool {
        chain: Arc::new(chain),
        prices: Arc::new(prices),
        farms: Arc::new(farms),
    }
}

async fn run(tool: &GetAllBalancesTool) -> BalancesResult {
    let output = tool
        .call(GetAllBalancesArgs {
            address: ADDR.to_string(),
        })
        .await
        .unwrap();
    serde_json::from_str(&output).unwrap()
}

#[tokio::test]
async fn normalizes_and_prices_a_sui_balance() {
    let tool = tool(
        MockChain::new()
            .with_balance(ADDR, SUI, "2500000000")
            .with_metadata(SUI, "SUI", 9),
        MockPrices::new().with_price(SUI, 1.25),
        MockFarms::new(),
    );

    let result = run(&tool).await;
    assert!(result.success);
    assert_eq!(result.balances.len(), 1);
    let entry = &result.balances[0];
    assert_eq!(entry.total_balance, "2500000000");
    assert_eq!(entry.normalized_balance, 2.5);
    assert_eq!(entry.usd_value, Some(3.125));
    assert_eq!(result.total_usd_value, 3.125);
}

#[tokio::test]
async fn unpriced_coins_have_no_usd_value_and_do_not_count() {
    let tool = tool(
        MockChain::new()
            .with_balance(ADDR, SUI, "1000000000")
            .with_balance(ADDR, USDC, "4000000")
            .with_metadata(SUI, "SUI", 9)
            .with_metadata(USDC, "USDC", 6),
        MockPrices::new().with_price(SUI, 2.0),
        MockFarms::new(),
    );

    let result = run(&tool).await;
    let usdc = result
        .balances
        .iter()
        .find(|b| b.coin_type == USDC)
        .unwrap();
    assert_eq!(usdc.usd_value, None);
    assert_eq!(usdc.normalized_balance, 4.0);
    // USDC is unpriced, so only SUI contributes
    assert_eq!(result.total_usd_value, 2.0);
}

#[tokio::test]
async fn sui_variant_falls_back_to_canonical_price() {
    let tool = tool(
        MockChain::new()
            .with_balance(ADDR, SUI_LONG, "2000000000")
            .with_metadata(SUI_LONG, "SUI", 9),
        MockPrices::new().with_price(SUI, 1.5),
        MockFarms::new(),
    );

    let result = run(&tool).await;
    assert_eq!(result.balances[0].usd_value, Some(3.0));
    assert_eq!(result.total_usd_value, 3.0);
}

#[tokio::test]
async fn staked_positions_fold_into_total() {
    let lp = "0xpool::af_lp::AF_LP";
    let tool = tool(
        MockChain::new()
            .with_balance(ADDR, SUI, "1000000000")
            .with_metadata(SUI, "SUI", 9)
            .with_metadata(lp, "afSUI-LP", 9),
        MockPrices::new().with_price(SUI, 1.0).with_price(lp, 2.0),
        MockFarms::new().with_staked_position(ADDR, "0xfarm", lp, "3000000000"),
    );

    let result = run(&tool).await;
    assert_eq!(result.staked_positions.len(), 1);
    assert_eq!(result.staked_positions[0].usd_value, Some(6.0));
    assert_eq!(result.total_usd_value, 7.0);
}

#[tokio::test]
async fn price_outage_degrades_to_no_usd_values() {
    // MockPrices with nothing configured behaves like a full price outage
    let tool = tool(
        MockChain::new()
            .with_balance(ADDR, SUI, "1000000000")
            .with_metadata(SUI, "SUI", 9),
        MockPrices::new(),
        MockFarms::new(),
    );

    let result = run(&tool).await;
    assert!(result.success);
    assert_eq!(result.balances[0].usd_value, None);
    assert_eq!(result.total_usd_value, 0.0);
}

#[tokio::test]
async fn repeated_calls_are_idempotent() {
    let tool = tool(
        MockChain::new()
            .with_balance(ADDR, SUI, "2500000000")
            .with_metadata(SUI, "SUI", 9),
        MockPrices::new().with_price(SUI, 1.25),
        MockFarms::new(),
    );

    let first = run(&tool).await;
    let second = run(&tool).await;
    assert_eq!(first.total_usd_value, second.total_usd_value);
}
