// Mint phase: public `mint()` on both managed tokens, one after the other

use super::RunContext;
use crate::types::{PhaseName, PhaseResult, TokenSide};
use tracing::{error, info, warn};

pub async fn run(ctx: &RunContext) -> PhaseResult {
    let wallet = ctx.chain.wallet_address();
    let mut minted = Vec::new();
    let mut failed = Vec::new();

    for side in [TokenSide::A, TokenSide::B] {
        let asset = ctx.tokens.resolve(ctx.config.token(side)).await;
        info!("Minting {}...", asset.symbol);

        match ctx.chain.mint(asset.address).await {
            Ok(outcome) => {
                info!(
                    "Minted {}: {} (block {}, gas {})",
                    asset.symbol,
                    ctx.config.tx_link(&outcome.tx_hash),
                    outcome.block_number,
                    outcome.gas_used
                );
                minted.push(asset.symbol.clone());
            }
            Err(e) => {
                let reason = e.with_tx_link(&ctx.config.tx_explorer);
                error!("Mint of {} failed: {}", asset.symbol, reason);
                failed.push(format!("{} ({})", asset.symbol, reason));
            }
        }

        ctx.scheduler.pause(ctx.config.delays.after_tx, "after mint").await;
    }

    for side in [TokenSide::A, TokenSide::B] {
        match ctx.balances.balance_of(ctx.config.token(side), wallet).await {
            Ok(b) => info!("{} balance after mint: {}", b.token.symbol, b.formatted),
            Err(e) => warn!("Could not read balance after mint: {}", e),
        }
    }

    if failed.is_empty() {
        PhaseResult::ok(PhaseName::Mint, format!("minted {}", minted.join(", ")))
    } else {
        PhaseResult::failed(
            PhaseName::Mint,
            format!("{}/2 minted, failed: {}", minted.len(), failed.join(", ")),
        )
    }
}
