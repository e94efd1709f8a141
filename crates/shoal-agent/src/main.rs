use anyhow::{Context, Result};
use shoal_agent::config::AgentConfig;
use shoal_agent::orchestrator::Orchestrator;
use shoal_agent::{create_router, AppState};
use shoal_protocols::aftermath::AftermathClient;
use shoal_protocols::native::NativeGateway;
use shoal_protocols::spring::SpringClient;
use shoal_sui::SuiClient;
use shoal_tools::{
    AddLiquidityTool, GetAllBalancesTool, GetPricesTool, GetYieldOpportunitiesTool, ListCoinsTool,
    LiquidStakingTool, SendSuiTool, SwapTool,
};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AgentConfig::from_env();
    info!("[shoal-agent] Starting with model {}", config.model);

    let chain = Arc::new(SuiClient::new(config.rpc_url.clone()));
    let aftermath = Arc::new(AftermathClient::mainnet());
    let spring = Arc::new(SpringClient::mainnet());
    let transfers = Arc::new(NativeGateway::new(config.rpc_url.clone(), chain.clone()));

    let mut orchestrator = Orchestrator::new();
    orchestrator.register(GetAllBalancesTool {
        chain: chain.clone(),
        prices: aftermath.clone(),
        farms: aftermath.clone(),
    });
    orchestrator.register(GetPricesTool {
        prices: aftermath.clone(),
    });
    orchestrator.register(ListCoinsTool {
        chain: chain.clone(),
    });
    orchestrator.register(SendSuiTool { transfers });
    orchestrator.register(SwapTool {
        chain: chain.clone(),
        dex: aftermath.clone(),
    });
    orchestrator.register(LiquidStakingTool {
        chain: chain.clone(),
        lst: spring,
    });
    orchestrator.register(AddLiquidityTool {
        chain: chain.clone(),
        pools: aftermath.clone(),
        farms: aftermath.clone(),
    });
    orchestrator.register(GetYieldOpportunitiesTool {
        chain: chain.clone(),
        pools: aftermath.clone(),
        farms: aftermath,
    });
    info!(
        "[shoal-agent] Registered tools: {:?}",
        orchestrator.tool_names()
    );

    let state = AppState {
        config: config.clone(),
        chain,
        orchestrator: Arc::new(orchestrator),
    };

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;
    info!("[shoal-agent] Listening on {}", config.bind_addr);
    axum::serve(listener, create_router(state)).await?;
    Ok(())
}
