//! Allowance management
//!
//! Approves `U256::MAX` the first time a token's allowance falls short, so
//! later swaps of the same token need no further approval transaction.

use crate::chain::ChainClient;
use crate::delay::DelayScheduler;
use crate::error::BotError;
use crate::types::{DelayWindow, TokenAsset};
use alloy::primitives::{Address, U256};
use std::sync::Arc;
use tracing::{debug, error, info};

pub struct ApprovalManager {
    chain: Arc<dyn ChainClient>,
    scheduler: DelayScheduler,
    /// Pause after a confirmed approval, before the swap is attempted
    settle: DelayWindow,
    tx_explorer: String,
}

impl ApprovalManager {
    pub fn new(
        chain: Arc<dyn ChainClient>,
        scheduler: DelayScheduler,
        settle: DelayWindow,
        tx_explorer: impl Into<String>,
    ) -> Self {
        Self {
            chain,
            scheduler,
            settle,
            tx_explorer: tx_explorer.into(),
        }
    }

    /// Make sure `spender` may pull at least `amount` of `token`.
    ///
    /// Returns false on any query or transaction failure; the caller skips
    /// the swap instead of aborting the run.
    pub async fn ensure_approved(
        &self,
        token: &TokenAsset,
        spender: Address,
        amount: U256,
    ) -> bool {
        let owner = self.chain.wallet_address();

        let allowance = match self.chain.allowance(token.address, owner, spender).await {
            Ok(a) => a,
            Err(e) => {
                let err = BotError::Approval(format!(
                    "allowance check for {} failed: {}",
                    token.symbol, e
                ));
                error!("{}", err);
                return false;
            }
        };

        if allowance >= amount {
            debug!("Sufficient {} allowance: {} >= {}", token.symbol, allowance, amount);
            return true;
        }

        info!("Approving {} for router {:?}", token.symbol, spender);
        match self.chain.approve(token.address, spender, U256::MAX).await {
            Ok(outcome) => {
                info!(
                    "Approval confirmed: {}{:?} (block {})",
                    self.tx_explorer, outcome.tx_hash, outcome.block_number
                );
                self.scheduler.pause(self.settle, "post-approval").await;
                true
            }
            Err(e) => {
                let err = BotError::Approval(format!(
                    "approve({}) failed: {}",
                    token.symbol,
                    e.with_tx_link(&self.tx_explorer)
                ));
                error!("{}", err);
                false
            }
        }
    }
}
