//! Swap phase
//!
//! Runs up to `planned` iterations. Each one re-reads both balances, picks a
//! direction, sizes the swap, ensures allowance, simulates, and only then
//! submits. Iteration failures are counted and skipped; a failed balance
//! read ends the phase early.

use super::RunContext;
use crate::error::BotError;
use crate::swap::Selection;
use crate::types::{PhaseName, PhaseResult, SwapIntent, TokenSide, TxOutcome};
use serde::Serialize;
use tracing::{error, info, warn};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SwapStats {
    pub planned: u32,
    /// Swaps actually submitted
    pub attempted: u32,
    pub confirmed: u32,
    /// Dropped before submission (zero size, approval, simulation)
    pub skipped: u32,
    /// Submitted but reverted or never confirmed
    pub failed: u32,
}

#[derive(Debug)]
pub enum IterationOutcome {
    Confirmed(TxOutcome),
    Skipped(String),
    /// Sized to zero; only the short skip pause follows
    TooSmall(String),
    Failed(BotError),
    /// No balance left worth swapping
    Terminal,
    /// Balance read failed, stop the phase
    Aborted(BotError),
}

pub async fn run(ctx: &RunContext, planned: u32) -> (PhaseResult, SwapStats) {
    let mut stats = SwapStats {
        planned,
        ..Default::default()
    };
    let wallet = ctx.chain.wallet_address();

    match ctx.balances.native_balance(wallet).await {
        Ok((_, native)) => {
            info!("Native balance: {} {}", native, ctx.config.native_symbol);
            if native < ctx.config.swap.min_native_balance {
                warn!(
                    "Native balance below {} {}, transactions may fail for gas",
                    ctx.config.swap.min_native_balance, ctx.config.native_symbol
                );
            }
        }
        Err(e) => {
            error!("Native balance read failed, skipping swaps: {}", e);
            return (PhaseResult::failed(PhaseName::Swap, e.to_string()), stats);
        }
    }

    let mut stopped_early = None;
    for i in 1..=planned {
        info!("--- Swap {}/{} ---", i, planned);

        match iterate(ctx).await {
            IterationOutcome::Confirmed(outcome) => {
                stats.attempted += 1;
                stats.confirmed += 1;
                info!(
                    "Swap confirmed: {} (block {}, gas {})",
                    ctx.config.tx_link(&outcome.tx_hash),
                    outcome.block_number,
                    outcome.gas_used
                );
                log_balances(ctx).await;
            }
            IterationOutcome::Skipped(reason) => {
                stats.skipped += 1;
                warn!("Swap {} skipped: {}", i, reason);
            }
            IterationOutcome::TooSmall(reason) => {
                stats.skipped += 1;
                warn!("Swap {} skipped: {}", i, reason);
                ctx.scheduler.pause(ctx.config.delays.skipped_iteration, "zero swap size").await;
                continue;
            }
            IterationOutcome::Failed(e) => {
                stats.attempted += 1;
                stats.failed += 1;
                error!("Swap {} failed: {}", i, e.with_tx_link(&ctx.config.tx_explorer));
            }
            IterationOutcome::Terminal => {
                info!("No token balance left worth swapping, ending swap phase");
                break;
            }
            IterationOutcome::Aborted(e) => {
                error!("Swap phase aborted: {}", e);
                stopped_early = Some(e);
                break;
            }
        }

        if i < planned {
            ctx.scheduler.pause(ctx.config.delays.between_swaps, "between swaps").await;
        }
    }

    let detail = format!(
        "{}/{} swaps confirmed ({} skipped, {} failed)",
        stats.confirmed, planned, stats.skipped, stats.failed
    );
    let result = match stopped_early {
        Some(e) => PhaseResult::failed(PhaseName::Swap, format!("{}; aborted: {}", detail, e)),
        None => PhaseResult::ok(PhaseName::Swap, detail),
    };
    (result, stats)
}

async fn iterate(ctx: &RunContext) -> IterationOutcome {
    let wallet = ctx.chain.wallet_address();
    let cfg = &ctx.config;

    let bal_a = match ctx.balances.balance_of(cfg.token_a, wallet).await {
        Ok(b) => b,
        Err(e) => return IterationOutcome::Aborted(e),
    };
    let bal_b = match ctx.balances.balance_of(cfg.token_b, wallet).await {
        Ok(b) => b,
        Err(e) => return IterationOutcome::Aborted(e),
    };
    info!(
        "Balances: {} {} | {} {}",
        bal_a.formatted, bal_a.token.symbol, bal_b.formatted, bal_b.token.symbol
    );

    let side = match ctx.selector.select(bal_a.formatted, bal_b.formatted) {
        Selection::Sell(side) => side,
        Selection::Terminal => return IterationOutcome::Terminal,
    };
    let (sell, buy) = match side {
        TokenSide::A => (bal_a, bal_b),
        TokenSide::B => (bal_b, bal_a),
    };

    let size = ctx.sizer.size(&sell);
    if size.raw.is_zero() {
        return IterationOutcome::TooSmall(format!(
            "{}% of {} {} rounds to zero",
            size.percent, sell.formatted, sell.token.symbol
        ));
    }
    info!(
        "Selling {} {} ({}%) for {}",
        size.amount, sell.token.symbol, size.percent, buy.token.symbol
    );

    if !ctx.approvals.ensure_approved(&sell.token, cfg.router, size.raw).await {
        return IterationOutcome::Skipped(format!("{} approval failed", sell.token.symbol));
    }

    let deadline = chrono::Utc::now().timestamp().max(0) as u64 + cfg.swap.deadline_secs;
    let intent = SwapIntent::new(
        sell.token.address,
        buy.token.address,
        cfg.swap.pool_fee,
        wallet,
        size.raw,
        deadline,
    );

    let intent = match ctx.simulator.finalize(intent, cfg.swap.slippage_percent).await {
        Ok((intent, expected)) => {
            info!(
                "Simulation: expect {} raw {} out, minimum {}",
                expected,
                buy.token.symbol,
                intent.amount_out_minimum.unwrap_or_default()
            );
            intent
        }
        Err(e) => return IterationOutcome::Skipped(e.to_string()),
    };

    match ctx.executor.execute(&intent).await {
        Ok(outcome) => IterationOutcome::Confirmed(outcome),
        Err(e) => IterationOutcome::Failed(e),
    }
}

async fn log_balances(ctx: &RunContext) {
    let wallet = ctx.chain.wallet_address();
    for token in [ctx.config.token_a, ctx.config.token_b] {
        match ctx.balances.balance_of(token, wallet).await {
            Ok(b) => info!("  {} balance: {}", b.token.symbol, b.formatted),
            Err(e) => warn!("  Post-swap balance read failed: {}", e),
        }
    }
}
