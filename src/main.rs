//! Testnet AutoSwap Bot
//!
//! One run per invocation: claim from the faucet, mint both test tokens,
//! then swap back and forth between them with simulated, slippage-bounded
//! `exactInputSingle` calls. Exits 0 once the run completes, whatever the
//! individual phases reported; exits 1 on configuration errors.
//!
//! Created: 2026-10-19

use alloy::providers::ProviderBuilder;
use anyhow::{Context, Result};
use autoswap_bot::chain::{AlloyChainClient, ChainClient, WalletContext};
use autoswap_bot::config::{load_config, load_config_from_file, validate, TuningConfig};
use autoswap_bot::delay::DelayScheduler;
use autoswap_bot::faucet::HttpFaucet;
use autoswap_bot::notify::DiscordNotifier;
use autoswap_bot::orchestrator::{PhaseOrchestrator, RunContext};
use clap::Parser;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Testnet AutoSwap Bot: faucet → mint → swap
#[derive(Parser)]
#[command(name = "autoswap-bot")]
struct Args {
    /// Env file to load instead of .env
    #[arg(long, env = "ENV_FILE")]
    env_file: Option<String>,

    /// TOML file overriding swap and delay tuning
    #[arg(long)]
    tuning: Option<String>,

    /// Number of swaps this run (default: NUM_SWAPS, else random 5-10)
    #[arg(long)]
    swaps: Option<u32>,

    /// Skip the faucet claim
    #[arg(long)]
    skip_faucet: bool,

    /// Skip minting
    #[arg(long)]
    skip_mint: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    json_logs: bool,
}

fn init_logging(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if json {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.json_logs);

    info!("AutoSwap Bot starting...");

    let mut config = match &args.env_file {
        Some(path) => load_config_from_file(path)?,
        None => load_config()?,
    };
    if let Some(path) = &args.tuning {
        TuningConfig::load(path)?.apply(&mut config)?;
        info!("Tuning overrides applied from {}", path);
    }
    if let Some(n) = args.swaps {
        config.swap.swaps_per_run = Some(n);
    }
    if args.skip_faucet {
        config.faucet_enabled = false;
    }
    if args.skip_mint {
        config.mint_enabled = false;
    }
    validate(&config)?;

    info!("RPC URL: {}", &config.rpc_url[..40.min(config.rpc_url.len())]);
    info!("Router: {:?}", config.router);
    info!(
        "Tokens: {} {:?} / {} {:?}",
        config.token_a_name, config.token_a, config.token_b_name, config.token_b
    );
    info!(
        "Swap size {}%-{}%, slippage {}%, fee tier {}",
        config.swap.min_swap_percent,
        config.swap.max_swap_percent,
        config.swap.slippage_percent,
        config.swap.pool_fee
    );

    let wallet = WalletContext::from_private_key(&config.private_key)?;
    let rpc_url: reqwest::Url = config
        .rpc_url
        .parse()
        .with_context(|| format!("RPC_URL is not a valid URL: {}", config.rpc_url))?;
    let provider = ProviderBuilder::new()
        .wallet(wallet.ethereum_wallet())
        .connect_http(rpc_url);

    let client = AlloyChainClient::new(Arc::new(provider), wallet.address(), config.router);

    let chain_id = client.chain_id().await.context("cannot reach RPC endpoint")?;
    if let Some(expected) = config.chain_id {
        anyhow::ensure!(
            expected == chain_id,
            "CHAIN_ID {} does not match RPC chain id {}",
            expected,
            chain_id
        );
    }
    let block = client.block_number().await?;
    info!("Connected! Chain {} at block {}", chain_id, block);
    info!("Wallet: {:?}", client.wallet_address());

    let faucet = Arc::new(HttpFaucet::new(config.faucet_url.clone())?);
    let notifier = Arc::new(DiscordNotifier::new(config.discord_webhook.clone()));

    let chain: Arc<dyn ChainClient> = Arc::new(client);
    let ctx = RunContext::new(config, chain, DelayScheduler::new());
    let summary = PhaseOrchestrator::new(ctx, faucet, notifier, Some(chain_id))
        .run()
        .await;

    if summary.all_phases_succeeded() {
        info!("AutoSwap run completed");
    } else {
        warn!("AutoSwap run completed with failed phases");
    }
    Ok(())
}
