// Faucet claim phase: best-effort, never blocks minting

use super::RunContext;
use crate::faucet::Faucet;
use crate::types::{PhaseName, PhaseResult};
use tracing::{info, warn};

pub async fn run(ctx: &RunContext, faucet: &dyn Faucet) -> PhaseResult {
    let wallet = ctx.chain.wallet_address();
    info!("Claiming {} from faucet for {:?}", ctx.config.native_symbol, wallet);

    let result = match faucet.claim(wallet).await {
        Ok(receipt) => {
            info!("Faucet claim accepted (HTTP {}): {}", receipt.status, receipt.body);
            PhaseResult::ok(PhaseName::Faucet, format!("claim accepted (HTTP {})", receipt.status))
        }
        Err(e) => {
            warn!("Faucet claim failed, continuing: {}", e);
            PhaseResult::failed(PhaseName::Faucet, e.to_string())
        }
    };

    ctx.scheduler.pause(ctx.config.delays.after_tx, "after faucet claim").await;
    result
}
