//! Quote simulation
//!
//! Runs `exactInputSingle` as a read-only call with no output bound and
//! turns the router's answer into the expected output. Any failure, and
//! any zero quote, means the swap is skipped: nothing is ever submitted
//! without a successful simulation behind it.

use super::slippage::{min_amount_out, slippage_bps};
use crate::chain::ChainClient;
use crate::error::{BotError, BotResult, SimulationKind};
use crate::types::SwapIntent;
use alloy::primitives::U256;
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::debug;

/// Substrings (lowercase) that mark an error as a would-be revert
const REVERT_MARKERS: [&str; 5] = [
    "revert",
    "call_exception",
    "call exception",
    "failed",
    "insufficient",
];

/// Sort a raw RPC error message into a simulation failure kind
pub fn classify_failure(message: &str) -> SimulationKind {
    let lower = message.to_lowercase();
    if REVERT_MARKERS.iter().any(|m| lower.contains(m)) {
        SimulationKind::LikelyRevert
    } else {
        SimulationKind::Unclassified
    }
}

pub struct QuoteSimulator {
    chain: Arc<dyn ChainClient>,
}

impl QuoteSimulator {
    pub fn new(chain: Arc<dyn ChainClient>) -> Self {
        Self { chain }
    }

    /// Expected output for `intent`. Zero output is reported as a failure.
    pub async fn simulate(&self, intent: &SwapIntent) -> BotResult<U256> {
        let quoted = self.chain.simulate_swap(intent).await.map_err(|e| {
            let reason = match e {
                BotError::Query(msg) => msg,
                other => other.to_string(),
            };
            BotError::Simulation {
                kind: classify_failure(&reason),
                reason,
            }
        })?;

        if quoted.is_zero() {
            return Err(BotError::Simulation {
                kind: SimulationKind::LikelyRevert,
                reason: "router quoted zero output".to_string(),
            });
        }

        debug!("Simulated output: {} for input {}", quoted, intent.amount_in);
        Ok(quoted)
    }

    /// Simulate, then fill in the slippage-bounded minimum
    pub async fn finalize(
        &self,
        intent: SwapIntent,
        slippage_percent: Decimal,
    ) -> BotResult<(SwapIntent, U256)> {
        let expected = self.simulate(&intent).await?;
        let minimum = min_amount_out(expected, slippage_bps(slippage_percent));
        Ok((intent.with_minimum(minimum), expected))
    }
}
