//! Result-to-renderer resolution
//!
//! A static registry mapping tool name to a render function plus an optional
//! loading placeholder. Adding a tool means adding one entry here; unknown
//! tool names fall back to a pretty-printed payload view and never panic. A
//! payload that fails to parse as its typed shape falls back the same way.

use shoal_sui::coin::{is_dust, normalize_amount, parse_base_units};
use shoal_types::{
    AddLiquidityResult, BalancesResult, LiquidStakingResult, ListCoinsResult, PricesResult,
    SendResult, StakeAction, SwapResult, ToolInvocation, ToolName, ToolRegistry,
    YieldOpportunitiesResult,
};
use std::collections::HashMap;

pub type RenderFn = fn(&serde_json::Value) -> String;
pub type LoadingFn = fn() -> String;

/// One registry entry
#[derive(Clone, Copy)]
pub struct ToolRenderer {
    pub render: RenderFn,
    pub loading: Option<LoadingFn>,
}

/// Tool name -> renderer registry
pub struct RendererRegistry {
    renderers: HashMap<String, ToolRenderer>,
}

impl RendererRegistry {
    pub fn empty() -> Self {
        Self {
            renderers: HashMap::new(),
        }
    }

    /// The full registry: one entry per registered tool
    pub fn with_defaults() -> Self {
        let mut registry = Self::empty();
        registry.register(ToolName::GetAllBalances, ToolRenderer {
            render: render_balances,
            loading: Some(|| "Loading your portfolio…".to_string()),
        });
        registry.register(ToolName::GetPrices, ToolRenderer {
            render: render_prices,
            loading: None,
        });
        registry.register(ToolName::ListCoins, ToolRenderer {
            render: render_list_coins,
            loading: None,
        });
        registry.register(ToolName::SendSui, ToolRenderer {
            render: render_send,
            loading: Some(|| "Preparing transfer…".to_string()),
        });
        registry.register(ToolName::Swap, ToolRenderer {
            render: render_swap,
            loading: Some(|| "Finding the best route…".to_string()),
        });
        registry.register(ToolName::LiquidStaking, ToolRenderer {
            render: render_liquid_staking,
            loading: Some(|| "Preparing staking transaction…".to_string()),
        });
        registry.register(ToolName::AddLiquidity, ToolRenderer {
            render: render_add_liquidity,
            loading: Some(|| "Preparing liquidity transactions…".to_string()),
        });
        registry.register(ToolName::GetYieldOpportunities, ToolRenderer {
            render: render_yield,
            loading: Some(|| "Scanning yield opportunities…".to_string()),
        });
        registry
    }

    pub fn register(&mut self, name: ToolName, renderer: ToolRenderer) {
        self.renderers.insert(name.to_string(), renderer);
    }

    pub fn has_renderer(&self, tool_name: &str) -> bool {
        self.renderers.contains_key(tool_name)
    }

    /// Every registered tool must have a renderer; used by the
    /// exhaustiveness test
    pub fn covers_all_tools(&self) -> bool {
        ToolRegistry::all_tools()
            .iter()
            .all(|tool| self.has_renderer(&tool.to_string()))
    }

    /// Resolve and render one invocation according to its state
    pub fn render_invocation(&self, invocation: &ToolInvocation) -> String {
        let entry = self.renderers.get(&invocation.tool_name);
        match &invocation.result {
            None => match entry.and_then(|e| e.loading) {
                Some(loading) => loading(),
                None => format!("Running {}…", invocation.tool_name),
            },
            Some(result) => match entry {
                Some(e) => (e.render)(result),
                None => fallback_json(result),
            },
        }
    }
}

/// Generic pretty-printed payload view
pub fn fallback_json(value: &serde_json::Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

fn error_line(code: Option<&str>) -> String {
    format!("Something went wrong ({}).", code.unwrap_or("unknown error"))
}

fn render_balances(value: &serde_json::Value) -> String {
    let Ok(result) = serde_json::from_value::<BalancesResult>(value.clone()) else {
        return fallback_json(value);
    };
    if !result.success {
        return error_line(result.error.as_deref());
    }

    let mut lines = vec!["Your portfolio".to_string()];
    for entry in &result.balances {
        // Dust is hidden here but already counted in the payload total
        if is_dust(entry.normalized_balance) {
            continue;
        }
        let symbol = entry.symbol.as_deref().unwrap_or(&entry.coin_type);
        match entry.usd_value {
            Some(usd) => lines.push(format!(
                "  {symbol}: {:.4} (${usd:.2})",
                entry.normalized_balance
            )),
            None => lines.push(format!("  {symbol}: {:.4}", entry.normalized_balance)),
        }
    }
    for position in &result.staked_positions {
        let symbol = position.symbol.as_deref().unwrap_or(&position.coin_type);
        match position.usd_value {
            Some(usd) => lines.push(format!(
                "  {symbol} (staked): {:.4} (${usd:.2})",
                position.normalized_balance
            )),
            None => lines.push(format!(
                "  {symbol} (staked): {:.4}",
                position.normalized_balance
            )),
        }
    }
    lines.push(format!("Total: ${:.2}", result.total_usd_value));
    lines.join("\n")
}

fn render_swap(value: &serde_json::Value) -> String {
    let Ok(result) = serde_json::from_value::<SwapResult>(value.clone()) else {
        return fallback_json(value);
    };

    let quote = result.route.as_ref().map(|route| {
        let meta = result.coin_metadata.as_ref();
        let in_decimals = meta.and_then(|m| m.coin_in.as_ref()).map(|m| m.decimals).unwrap_or(9);
        let out_decimals = meta.and_then(|m| m.coin_out.as_ref()).map(|m| m.decimals).unwrap_or(9);
        let in_symbol = meta
            .and_then(|m| m.coin_in.as_ref())
            .map(|m| m.symbol.clone())
            .unwrap_or_else(|| route.coin_in.coin_type.clone());
        let out_symbol = meta
            .and_then(|m| m.coin_out.as_ref())
            .map(|m| m.symbol.clone())
            .unwrap_or_else(|| route.coin_out.coin_type.clone());

        let from_amount = parse_base_units(&route.coin_in.amount)
            .map(|units| normalize_amount(units, in_decimals))
            .unwrap_or(0.0);
        let to_amount = parse_base_units(&route.coin_out.amount)
            .map(|units| normalize_amount(units, out_decimals))
            .unwrap_or(0.0);
        let rate = if from_amount > 0.0 {
            to_amount / from_amount
        } else {
            0.0
        };
        format!(
            "Swap {from_amount:.4} {in_symbol} -> {to_amount:.4} {out_symbol} (rate {rate:.6})"
        )
    });

    match (result.success, quote) {
        (true, Some(quote)) => format!("{quote}\nReady to sign."),
        // Build failed but the quote survived: show it with the error
        (false, Some(quote)) => format!("{quote}\n{}", error_line(result.error.as_deref())),
        (true, None) => "Swap prepared.".to_string(),
        (false, None) => error_line(result.error.as_deref()),
    }
}

fn render_liquid_staking(value: &serde_json::Value) -> String {
    let Ok(result) = serde_json::from_value::<LiquidStakingResult>(value.clone()) else {
        return fallback_json(value);
    };
    if !result.success {
        return error_line(result.error.as_deref());
    }
    let action = match result.action {
        Some(StakeAction::Mint) => "Stake",
        Some(StakeAction::Redeem) => "Unstake",
        None => "Stake",
    };
    let leg = |leg: &Option<shoal_types::StakeLeg>| {
        leg.as_ref()
            .map(|l| {
                let symbol = l
                    .metadata
                    .as_ref()
                    .map(|m| m.symbol.clone())
                    .unwrap_or_else(|| l.coin_type.clone());
                format!("{:.4} {symbol}", l.amount)
            })
            .unwrap_or_else(|| "?".to_string())
    };
    format!(
        "{action}: {} -> {}\nReady to sign.",
        leg(&result.token_in),
        leg(&result.token_out)
    )
}

fn render_add_liquidity(value: &serde_json::Value) -> String {
    let Ok(result) = serde_json::from_value::<AddLiquidityResult>(value.clone()) else {
        return fallback_json(value);
    };

    // Insufficient balance gets its own remediation view, not a generic
    // error banner
    if let Some(missing) = &result.missing_tokens {
        let symbols: Vec<&str> = missing.iter().map(|t| t.symbol.as_str()).collect();
        return format!(
            "Insufficient balance: you need more {}. Try swapping into {} first.",
            symbols.join(", "),
            if symbols.len() == 1 { "it" } else { "them" }
        );
    }
    if !result.success {
        return error_line(result.error.as_deref());
    }

    let mut lines = Vec::new();
    if let Some(pool) = &result.pool_info {
        lines.push(format!(
            "Deposit into {} (est. {} LP)",
            pool.pool_name, pool.estimated_lp_tokens
        ));
    }
    if let Some(deposits) = &result.deposits_info {
        for entry in deposits {
            let normalized = parse_base_units(&entry.amount)
                .map(|units| normalize_amount(units, entry.decimals))
                .unwrap_or(0.0);
            lines.push(format!("  {}: {normalized:.4}", entry.symbol));
        }
    }
    if let Some(farm) = &result.farm_info {
        lines.push(format!(
            "Then stake {} LP for {} day(s)",
            farm.lp_amount_to_stake, farm.lock_duration_days
        ));
    }
    match &result.transactions {
        Some(txs) if txs.stake.is_some() && txs.deposit.is_some() => {
            lines.push("Two signatures needed: deposit, then stake.".to_string());
        }
        Some(_) => lines.push("Ready to sign.".to_string()),
        None => {}
    }
    lines.join("\n")
}

fn render_send(value: &serde_json::Value) -> String {
    let Ok(result) = serde_json::from_value::<SendResult>(value.clone()) else {
        return fallback_json(value);
    };
    if !result.success {
        return error_line(result.error.as_deref());
    }
    format!(
        "Send {:.4} SUI to {}\nReady to sign.",
        result.normalized_amount, result.to
    )
}

fn render_list_coins(value: &serde_json::Value) -> String {
    let Ok(result) = serde_json::from_value::<ListCoinsResult>(value.clone()) else {
        return fallback_json(value);
    };
    let mut lines = vec!["Supported coins".to_string()];
    for coin in &result.coins {
        match &coin.metadata {
            Some(meta) => lines.push(format!("  {} ({})", meta.symbol, coin.coin_type)),
            None => lines.push(format!("  {}", coin.coin_type)),
        }
    }
    lines.join("\n")
}

fn render_prices(value: &serde_json::Value) -> String {
    let Ok(result) = serde_json::from_value::<PricesResult>(value.clone()) else {
        return fallback_json(value);
    };
    let mut lines = Vec::new();
    for (coin_type, price) in &result.prices {
        lines.push(format!("  {coin_type}: ${price}"));
    }
    for coin_type in &result.missing {
        lines.push(format!("  {coin_type}: no price available"));
    }
    lines.join("\n")
}

fn render_yield(value: &serde_json::Value) -> String {
    let Ok(result) = serde_json::from_value::<YieldOpportunitiesResult>(value.clone()) else {
        return fallback_json(value);
    };
    if !result.success {
        return error_line(result.error.as_deref());
    }
    let mut lines = vec!["Yield opportunities".to_string()];
    for opp in &result.opportunities {
        let apr_pct = opp.apr.total_apr * 100.0;
        let range = opp
            .apr
            .farming_apr_range
            .as_ref()
            .map(|r| format!(" (farming {:.1}%-{:.1}%)", r.min * 100.0, r.max * 100.0))
            .unwrap_or_default();
        let held = if opp.user_holds_all_tokens {
            " [you hold these]"
        } else {
            ""
        };
        lines.push(format!(
            "  {}: {apr_pct:.1}% APR{range}, TVL ${:.0}{held}",
            opp.name, opp.tvl_usd
        ));
    }
    lines.join("\n")
}
