//! Behavior tests for the add-liquidity state machine

use rig::tool::Tool;
use shoal_protocols::mock::{MockFarms, MockPools};
use shoal_protocols::{Farm, Pool, PoolCoin};
use shoal_sui::mock::MockChain;
use shoal_tools::tools::add_liquidity::{AddLiquidityArgs, AddLiquidityTool, LiquidityMode};
use shoal_types::result::error_codes;
use shoal_types::AddLiquidityResult;
use std::collections::BTreeMap;
use std::sync::Arc;

const ADDR: &str = "0xuser";
const POOL: &str = "0xpool";
const FARM: &str = "0xfarm";
const SUI: &str = "0x2::sui::SUI";
const SUI_LONG: &str =
    "0x0000000000000000000000000000000000000000000000000000000000000002::sui::SUI";
const USDC: &str = "0xaaa::usdc::USDC";
const LP: &str = "0xpool::af_lp::AF_LP";

fn pool() -> Pool {
    Pool {
        object_id: POOL.to_string(),
        name: "SUI/USDC".to_string(),
        lp_coin_type: LP.to_string(),
        coins: vec![
            PoolCoin {
                // Pool-internal type uses the long form of the gas token
                coin_type: SUI_LONG.to_string(),
                weight: 0.5,
                balance: "100000000000".to_string(),
                decimals: 9,
            },
            PoolCoin {
                coin_type: USDC.to_string(),
                weight: 0.5,
                balance: "400000000".to_string(),
                decimals: 6,
            },
        ],
    }
}

fn farm() -> Farm {
    Farm {
        object_id: FARM.to_string(),
        stake_coin_type: LP.to_string(),
        reward_coin_types: vec![SUI.to_string()],
        base_apr: 0.12,
        max_lock_duration_ms: 365 * 24 * 60 * 60 * 1000,
        max_lock_multiplier: 2.5,
    }
}

fn amounts(sui: &str, usdc: &str) -> BTreeMap<String, String> {
    let mut map = BTreeMap::new();
    map.insert(SUI.to_string(), sui.to_string());
    map.insert(USDC.to_string(), usdc.to_string());
    map
}

fn deposit_args(mode: LiquidityMode, amounts_in: BTreeMap<String, String>) -> AddLiquidityArgs {
    AddLiquidityArgs {
        pool_id: POOL.to_string(),
        amounts_in: Some(amounts_in),
        farm_id: Some(FARM.to_string()),
        lock_duration_days: Some(30),
        slippage: None,
        wallet_address: ADDR.to_string(),
        mode,
        lp_amount: None,
        lp_coin_type: None,
    }
}

async fn run(tool: &AddLiquidityTool, args: AddLiquidityArgs) -> AddLiquidityResult {
    serde_json::from_str(&tool.call(args).await.unwrap()).unwrap()
}

#[tokio::test]
async fn shortfall_names_exactly_the_underfunded_coins() {
    let tool = AddLiquidityTool {
        chain: Arc::new(
            MockChain::new()
                .with_balance(ADDR, SUI, "10000000000")
                .with_balance(ADDR, USDC, "1000000")
                .with_metadata(USDC, "USDC", 6),
        ),
        pools: Arc::new(MockPools::new().with_pool(pool())),
        farms: Arc::new(MockFarms::new()),
    };

    // USDC request exceeds the holding; SUI is covered
    let result = run(
        &tool,
        deposit_args(LiquidityMode::Deposit, amounts("1000000000", "4000000")),
    )
    .await;

    assert!(!result.success);
    assert_eq!(
        result.error.as_deref(),
        Some(error_codes::INSUFFICIENT_BALANCE)
    );
    let missing = result.missing_tokens.unwrap();
    assert_eq!(missing.len(), 1);
    assert_eq!(missing[0].coin_type, USDC);
    assert_eq!(missing[0].symbol, "USDC");
    assert!(result.message.unwrap().contains("USDC"));
    assert!(result.transactions.is_none());
}

#[tokio::test]
async fn deposit_maps_user_types_onto_pool_types() {
    let tool = AddLiquidityTool {
        chain: Arc::new(
            MockChain::new()
                .with_balance(ADDR, SUI, "10000000000")
                .with_balance(ADDR, USDC, "100000000"),
        ),
        pools: Arc::new(
            MockPools::new()
                .with_pool(pool())
                .with_lp_estimate(POOL, 55_000_000),
        ),
        farms: Arc::new(MockFarms::new()),
    };

    // User supplies the short SUI form; the pool stores the long form
    let result = run(
        &tool,
        deposit_args(LiquidityMode::Deposit, amounts("1000000000", "4000000")),
    )
    .await;

    assert!(result.success);
    let txs = result.transactions.unwrap();
    assert!(txs.deposit.is_some());
    assert!(txs.stake.is_none());
    let pool_info = result.pool_info.unwrap();
    assert_eq!(pool_info.estimated_lp_tokens, "55000000");
    assert_eq!(result.deposits_info.unwrap().len(), 2);
}

#[tokio::test]
async fn both_mode_stakes_the_lp_estimate_not_the_inputs() {
    let farms = Arc::new(MockFarms::new().with_farm(farm()));
    let tool = AddLiquidityTool {
        chain: Arc::new(
            MockChain::new()
                .with_balance(ADDR, SUI, "10000000000")
                .with_balance(ADDR, USDC, "100000000"),
        ),
        pools: Arc::new(
            MockPools::new()
                .with_pool(pool())
                // Unequal-value inputs: the LP estimate is nothing like the
                // sum of the deposited amounts
                .with_lp_estimate(POOL, 7_777),
        ),
        farms: farms.clone(),
    };

    let result = run(
        &tool,
        deposit_args(LiquidityMode::Both, amounts("9000000000", "4000000")),
    )
    .await;

    assert!(result.success);
    let farm_info = result.farm_info.unwrap();
    assert_eq!(farm_info.lp_amount_to_stake, "7777");
    assert_eq!(farm_info.lp_coin_type, LP);
    assert_eq!(farm_info.lock_duration_days, 30);

    let calls = farms.stake_calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    let (farm_id, lp_amount, lock_ms) = &calls[0];
    assert_eq!(farm_id, FARM);
    assert_eq!(*lp_amount, 7_777);
    assert_eq!(*lock_ms, 30 * 24 * 60 * 60 * 1000);

    let txs = result.transactions.unwrap();
    assert!(txs.deposit.is_some());
    assert!(txs.stake.is_some());
}

#[tokio::test]
async fn stake_only_mode_uses_the_provided_lp_amount() {
    let tool = AddLiquidityTool {
        chain: Arc::new(MockChain::new()),
        pools: Arc::new(MockPools::new()),
        farms: Arc::new(MockFarms::new().with_farm(farm())),
    };

    let args = AddLiquidityArgs {
        pool_id: POOL.to_string(),
        amounts_in: None,
        farm_id: Some(FARM.to_string()),
        lock_duration_days: Some(7),
        slippage: None,
        wallet_address: ADDR.to_string(),
        mode: LiquidityMode::Stake,
        lp_amount: Some("123456".to_string()),
        lp_coin_type: Some(LP.to_string()),
    };
    let result = run(&tool, args).await;

    assert!(result.success);
    let farm_info = result.farm_info.unwrap();
    assert_eq!(farm_info.lp_amount_to_stake, "123456");
    let txs = result.transactions.unwrap();
    assert!(txs.deposit.is_none());
    assert!(txs.stake.is_some());
}

#[tokio::test]
async fn unknown_pool_is_a_domain_failure() {
    let tool = AddLiquidityTool {
        chain: Arc::new(MockChain::new().with_balance(ADDR, SUI, "10000000000")),
        pools: Arc::new(MockPools::new()),
        farms: Arc::new(MockFarms::new()),
    };

    let result = run(
        &tool,
        deposit_args(LiquidityMode::Deposit, amounts("1", "1")),
    )
    .await;
    assert!(!result.success);
    assert_eq!(result.error.as_deref(), Some(error_codes::POOL_NOT_FOUND));
}
