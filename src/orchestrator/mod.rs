//! Phase Orchestrator
//!
//! Drives one run through a fixed state machine:
//!
//! ```text
//! Init → FaucetClaim → Minting → InterPhaseDelay → Swapping → Done
//! ```
//!
//! Every transition is unconditional. A failed phase is recorded in the
//! summary and the machine moves on. The one exception: swapping is
//! skipped when minting failed AND both token balances are negligible.
//! Reaching `Done` sends the run summary to the notifier.
//!
//! Created: 2026-10-19

pub mod faucet_phase;
pub mod mint_phase;
pub mod summary;
pub mod swap_phase;

pub use summary::RunSummary;
pub use swap_phase::{IterationOutcome, SwapStats};

use crate::chain::ChainClient;
use crate::delay::DelayScheduler;
use crate::faucet::Faucet;
use crate::notify::Notifier;
use crate::swap::{ApprovalManager, DirectionSelector, QuoteSimulator, SwapExecutor, SwapSizer};
use crate::tokens::{BalanceReader, TokenInfoCache};
use crate::types::{BotConfig, PhaseName, PhaseResult};
use chrono::Utc;
use rand::Rng;
use std::fmt;
use std::sync::Arc;
use tracing::{info, warn};

/// Components shared by every phase of a run
pub struct RunContext {
    pub config: BotConfig,
    pub chain: Arc<dyn ChainClient>,
    pub tokens: Arc<TokenInfoCache>,
    pub balances: BalanceReader,
    pub scheduler: DelayScheduler,
    pub selector: DirectionSelector,
    pub sizer: SwapSizer,
    pub approvals: ApprovalManager,
    pub simulator: QuoteSimulator,
    pub executor: SwapExecutor,
}

impl RunContext {
    pub fn new(config: BotConfig, chain: Arc<dyn ChainClient>, scheduler: DelayScheduler) -> Self {
        let tokens = Arc::new(TokenInfoCache::new(
            chain.clone(),
            [
                (config.token_a, config.token_a_name.clone()),
                (config.token_b, config.token_b_name.clone()),
            ],
        ));

        Self {
            balances: BalanceReader::new(chain.clone(), tokens.clone()),
            selector: DirectionSelector::new(config.swap.negligible_balance),
            sizer: SwapSizer::new(config.swap.min_swap_percent, config.swap.max_swap_percent),
            approvals: ApprovalManager::new(
                chain.clone(),
                scheduler.clone(),
                config.delays.after_approval,
                config.tx_explorer.clone(),
            ),
            simulator: QuoteSimulator::new(chain.clone()),
            executor: SwapExecutor::new(chain.clone()),
            tokens,
            scheduler,
            chain,
            config,
        }
    }

    #[cfg(test)]
    pub fn for_tests(config: BotConfig, chain: Arc<crate::test_support::MockChain>) -> Self {
        let chain: Arc<dyn ChainClient> = chain;
        Self::new(config, chain, DelayScheduler::disabled())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Init,
    FaucetClaim,
    Minting,
    InterPhaseDelay,
    Swapping,
    Done,
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            RunState::Init => "Init",
            RunState::FaucetClaim => "FaucetClaim",
            RunState::Minting => "Minting",
            RunState::InterPhaseDelay => "InterPhaseDelay",
            RunState::Swapping => "Swapping",
            RunState::Done => "Done",
        };
        write!(f, "{}", name)
    }
}

pub struct PhaseOrchestrator {
    ctx: RunContext,
    faucet: Arc<dyn Faucet>,
    notifier: Arc<dyn Notifier>,
    chain_id: Option<u64>,
}

impl PhaseOrchestrator {
    pub fn new(
        ctx: RunContext,
        faucet: Arc<dyn Faucet>,
        notifier: Arc<dyn Notifier>,
        chain_id: Option<u64>,
    ) -> Self {
        Self {
            ctx,
            faucet,
            notifier,
            chain_id,
        }
    }

    /// Fixed count from config, otherwise a fresh draw in 5..=10
    fn planned_swaps(&self) -> u32 {
        self.ctx
            .config
            .swap
            .swaps_per_run
            .unwrap_or_else(|| rand::thread_rng().gen_range(5..=10))
    }

    /// Run every phase once. Never fails: phase errors end up in the summary.
    pub async fn run(&self) -> RunSummary {
        let started_at = Utc::now();
        let wallet = self.ctx.chain.wallet_address();
        let mut phases = Vec::new();
        let mut swaps = SwapStats::default();
        let mut mint_failed = false;

        let mut state = RunState::Init;
        loop {
            info!("=== {} ===", state);
            state = match state {
                RunState::Init => {
                    info!("Wallet: {:?}", wallet);
                    if let Some(id) = self.chain_id {
                        info!("Chain ID: {}", id);
                    }
                    RunState::FaucetClaim
                }
                RunState::FaucetClaim => {
                    if self.ctx.config.faucet_enabled {
                        let result = faucet_phase::run(&self.ctx, self.faucet.as_ref()).await;
                        info!("{}", result);
                        phases.push(result);
                    } else {
                        info!("Faucet phase disabled");
                    }
                    RunState::Minting
                }
                RunState::Minting => {
                    if self.ctx.config.mint_enabled {
                        let result = mint_phase::run(&self.ctx).await;
                        info!("{}", result);
                        mint_failed = !result.succeeded;
                        phases.push(result);
                    } else {
                        info!("Mint phase disabled");
                    }
                    RunState::InterPhaseDelay
                }
                RunState::InterPhaseDelay => {
                    self.ctx
                        .scheduler
                        .pause(self.ctx.config.delays.between_phases, "before swap phase")
                        .await;
                    RunState::Swapping
                }
                RunState::Swapping => {
                    if mint_failed && self.balances_negligible().await {
                        warn!("Minting failed and both balances are negligible, skipping swaps");
                        phases.push(PhaseResult::failed(
                            PhaseName::Swap,
                            "skipped: mint failed and no token balance to swap",
                        ));
                    } else {
                        let planned = self.planned_swaps();
                        info!("Planning {} swaps", planned);
                        let (result, stats) = swap_phase::run(&self.ctx, planned).await;
                        info!("{}", result);
                        phases.push(result);
                        swaps = stats;
                    }
                    RunState::Done
                }
                RunState::Done => break,
            };
        }

        let summary = RunSummary {
            wallet,
            chain_id: self.chain_id,
            phases,
            swaps,
            started_at,
            finished_at: Utc::now(),
        };
        info!("{}", summary.render());
        self.notifier.run_finished(&summary).await;
        summary
    }

    /// Both managed balances at or below the negligible threshold.
    /// A failed read counts as "not negligible" so the swap phase decides.
    async fn balances_negligible(&self) -> bool {
        let wallet = self.ctx.chain.wallet_address();
        let threshold = self.ctx.config.swap.negligible_balance;
        for token in [self.ctx.config.token_a, self.ctx.config.token_b] {
            match self.ctx.balances.balance_of(token, wallet).await {
                Ok(b) if b.formatted <= threshold => continue,
                Ok(_) => return false,
                Err(e) => {
                    warn!("Balance check before swap phase failed: {}", e);
                    return false;
                }
            }
        }
        true
    }
}
