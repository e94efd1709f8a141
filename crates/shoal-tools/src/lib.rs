//! Financial action tools
//!
//! Each tool is a `rig::tool::Tool`: schema-validated arguments in, a
//! serialized result payload out. Expected domain failures (insufficient
//! balance, no route, nothing staked) come back as `success:false` payloads;
//! only unexpected infrastructure failures use the tool's error type and are
//! converted to a generic failure at the orchestrator boundary.

pub mod curated;
pub mod tool_names;
pub mod tools;

pub use tools::add_liquidity::AddLiquidityTool;
pub use tools::get_all_balances::GetAllBalancesTool;
pub use tools::get_prices::GetPricesTool;
pub use tools::list_coins::ListCoinsTool;
pub use tools::liquid_staking::LiquidStakingTool;
pub use tools::send_sui::SendSuiTool;
pub use tools::swap::SwapTool;
pub use tools::yield_opportunities::GetYieldOpportunitiesTool;
