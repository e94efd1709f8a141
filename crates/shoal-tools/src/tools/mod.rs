pub mod add_liquidity;
pub mod get_all_balances;
pub mod get_prices;
pub mod list_coins;
pub mod liquid_staking;
pub mod send_sui;
pub mod swap;
pub mod yield_opportunities;

pub use add_liquidity::AddLiquidityTool;
pub use get_all_balances::GetAllBalancesTool;
pub use get_prices::GetPricesTool;
pub use list_coins::ListCoinsTool;
pub use liquid_staking::LiquidStakingTool;
pub use send_sui::SendSuiTool;
pub use swap::SwapTool;
pub use yield_opportunities::GetYieldOpportunitiesTool;
