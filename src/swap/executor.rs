//! Swap submission
//!
//! Only finalized intents (simulation done, minimum set) are submitted.
//! Send and confirmation failures come back as `BotError::Execution` so
//! the swap phase can log them and move to the next iteration.

use crate::chain::ChainClient;
use crate::error::{BotError, BotResult};
use crate::types::{SwapIntent, TxOutcome};
use std::sync::Arc;
use tracing::info;

pub struct SwapExecutor {
    chain: Arc<dyn ChainClient>,
}

impl SwapExecutor {
    pub fn new(chain: Arc<dyn ChainClient>) -> Self {
        Self { chain }
    }

    pub async fn execute(&self, intent: &SwapIntent) -> BotResult<TxOutcome> {
        let minimum = intent.amount_out_minimum.ok_or_else(|| BotError::Execution {
            reason: "refusing to submit swap without a simulated minimum output".to_string(),
            tx_hash: None,
        })?;

        info!(
            "Submitting swap: {} in, min {} out (fee tier {})",
            intent.amount_in, minimum, intent.fee_tier
        );

        match self.chain.submit_swap(intent, minimum).await {
            Ok(outcome) => Ok(outcome),
            Err(err @ BotError::Execution { .. }) => Err(err),
            Err(other) => Err(BotError::Execution {
                reason: other.to_string(),
                tx_hash: None,
            }),
        }
    }
}
