//! Behavior tests for liquid staking, in particular the merge-then-split
//! redeem policy

use rig::tool::Tool;
use shoal_protocols::mock::MockLst;
use shoal_sui::constants::SPRING_LST;
use shoal_sui::mock::MockChain;
use shoal_tools::tools::liquid_staking::{LiquidStakingArgs, LiquidStakingTool};
use shoal_types::result::error_codes;
use shoal_types::{LiquidStakingResult, StakeAction};
use std::sync::Arc;

const ADDR: &str = "0xuser";
const SUI: &str = "0x2::sui::SUI";

fn args(action: StakeAction, amount: &str) -> LiquidStakingArgs {
    LiquidStakingArgs {
        action,
        amount: amount.to_string(),
        address: ADDR.to_string(),
    }
}

#[tokio::test]
async fn mint_builds_transaction_and_estimates_output() {
    let tool = LiquidStakingTool {
        chain: Arc::new(
            MockChain::new()
                .with_metadata(SUI, "SUI", 9)
                .with_metadata(SPRING_LST.coin_type, "sSUI", 9),
        ),
        lst: Arc::new(MockLst::new()),
    };

    let output = tool
        .call(args(StakeAction::Mint, "1000000000"))
        .await
        .unwrap();
    let result: LiquidStakingResult = serde_json::from_str(&output).unwrap();
    assert!(result.success);
    assert!(result.tx_bytes.is_some());
    assert_eq!(result.action, Some(StakeAction::Mint));
    let token_in = result.token_in.unwrap();
    let token_out = result.token_out.unwrap();
    assert_eq!(token_in.coin_type, SUI);
    assert_eq!(token_in.amount, 1.0);
    assert_eq!(token_out.coin_type, SPRING_LST.coin_type);
    assert!((token_out.amount - 0.988).abs() < 1e-12);
}

#[tokio::test]
async fn redeem_merges_all_coin_objects_before_splitting() {
    // Two objects each below the requested amount; together they cover it.
    // A naive split against the first object alone would fail here.
    let lst = Arc::new(MockLst::new());
    let tool = LiquidStakingTool {
        chain: Arc::new(
            MockChain::new()
                .with_metadata(SUI, "SUI", 9)
                .with_metadata(SPRING_LST.coin_type, "sSUI", 9)
                .with_coin_object(ADDR, SPRING_LST.coin_type, "0xcoin1", "600000000")
                .with_coin_object(ADDR, SPRING_LST.coin_type, "0xcoin2", "600000000"),
        ),
        lst: lst.clone(),
    };

    let output = tool
        .call(args(StakeAction::Redeem, "1000000000"))
        .await
        .unwrap();
    let result: LiquidStakingResult = serde_json::from_str(&output).unwrap();
    assert!(result.success);

    let calls = lst.redeem_calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    let (address, object_ids, amount) = &calls[0];
    assert_eq!(address, ADDR);
    assert_eq!(object_ids, &vec!["0xcoin1".to_string(), "0xcoin2".to_string()]);
    assert_eq!(*amount, 1_000_000_000);
}

#[tokio::test]
async fn redeem_with_no_staked_coins_is_a_domain_failure() {
    let tool = LiquidStakingTool {
        chain: Arc::new(MockChain::new()),
        lst: Arc::new(MockLst::new()),
    };

    let output = tool
        .call(args(StakeAction::Redeem, "1000000000"))
        .await
        .unwrap();
    let result: LiquidStakingResult = serde_json::from_str(&output).unwrap();
    assert!(!result.success);
    assert_eq!(result.error.as_deref(), Some(error_codes::NO_STAKED_COINS));
    assert!(result.tx_bytes.is_none());
}
