// Core data structures for the faucet → mint → swap run

use alloy::primitives::{Address, TxHash, U160, U256};
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;

/// Resolved ERC20 metadata. Immutable once resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenAsset {
    pub address: Address,
    pub symbol: String,
    pub decimals: u8,
}

/// Point-in-time balance. Never cached, every read is fresh.
#[derive(Debug, Clone)]
pub struct BalanceSnapshot {
    pub token: TokenAsset,
    /// Smallest-unit integer amount
    pub raw: U256,
    /// Human units, using the token's decimals
    pub formatted: Decimal,
}

/// Which of the two managed tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenSide {
    A,
    B,
}

/// Parameters for one `exactInputSingle` swap.
///
/// `amount_out_minimum` stays `None` until a simulation succeeded and the
/// slippage bound was applied. The executor refuses unset minimums.
#[derive(Debug, Clone)]
pub struct SwapIntent {
    pub token_in: Address,
    pub token_out: Address,
    /// Pool fee tier (500 = 0.05%)
    pub fee_tier: u32,
    pub recipient: Address,
    pub amount_in: U256,
    pub amount_out_minimum: Option<U256>,
    /// sqrtPriceLimitX96, zero means no limit
    pub price_limit: U160,
    /// Unix timestamp after which the router rejects the swap
    pub deadline: u64,
}

impl SwapIntent {
    pub fn new(
        token_in: Address,
        token_out: Address,
        fee_tier: u32,
        recipient: Address,
        amount_in: U256,
        deadline: u64,
    ) -> Self {
        Self {
            token_in,
            token_out,
            fee_tier,
            recipient,
            amount_in,
            amount_out_minimum: None,
            price_limit: U160::ZERO,
            deadline,
        }
    }

    /// Returns a copy with the slippage-bounded minimum filled in
    pub fn with_minimum(mut self, amount_out_minimum: U256) -> Self {
        self.amount_out_minimum = Some(amount_out_minimum);
        self
    }

    pub fn is_finalized(&self) -> bool {
        self.amount_out_minimum.is_some()
    }
}

/// Confirmed transaction summary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxOutcome {
    pub tx_hash: TxHash,
    pub block_number: u64,
    pub gas_used: u64,
}

/// Phases of a run, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PhaseName {
    Faucet,
    Mint,
    Swap,
}

impl fmt::Display for PhaseName {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PhaseName::Faucet => write!(f, "Faucet"),
            PhaseName::Mint => write!(f, "Mint"),
            PhaseName::Swap => write!(f, "Swap"),
        }
    }
}

/// Outcome of one phase. Logged and used for continuation decisions only.
#[derive(Debug, Clone, Serialize)]
pub struct PhaseResult {
    pub phase: PhaseName,
    pub succeeded: bool,
    pub detail: String,
}

impl PhaseResult {
    pub fn ok(phase: PhaseName, detail: impl Into<String>) -> Self {
        Self {
            phase,
            succeeded: true,
            detail: detail.into(),
        }
    }

    pub fn failed(phase: PhaseName, detail: impl Into<String>) -> Self {
        Self {
            phase,
            succeeded: false,
            detail: detail.into(),
        }
    }
}

impl fmt::Display for PhaseResult {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let status = if self.succeeded { "OK" } else { "FAILED" };
        write!(f, "[{}] {}: {}", status, self.phase, self.detail)
    }
}

/// Base + uniform jitter, in seconds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DelayWindow {
    pub base_secs: f64,
    pub jitter_secs: f64,
}

impl DelayWindow {
    pub const fn new(base_secs: f64, jitter_secs: f64) -> Self {
        Self {
            base_secs,
            jitter_secs,
        }
    }
}

/// Swap policy parameters
#[derive(Debug, Clone)]
pub struct SwapSettings {
    /// Lower bound of the share of the sell-token balance to swap, in percent
    pub min_swap_percent: Decimal,
    pub max_swap_percent: Decimal,
    /// Tolerated shortfall versus the simulated quote, in percent (0.5 = 0.5%)
    pub slippage_percent: Decimal,
    pub pool_fee: u32,
    pub deadline_secs: u64,
    /// Fixed swap count; `None` draws 5..=10 at startup
    pub swaps_per_run: Option<u32>,
    /// Balances at or below this are treated as empty
    pub negligible_balance: Decimal,
    /// Native balance below this triggers a low-gas warning
    pub min_native_balance: Decimal,
}

/// Pause windows between on-chain actions
#[derive(Debug, Clone)]
pub struct DelaySettings {
    pub between_swaps: DelayWindow,
    /// After faucet claims and mints
    pub after_tx: DelayWindow,
    /// After an approval confirms
    pub after_approval: DelayWindow,
    pub between_phases: DelayWindow,
    /// Short pause when an iteration is skipped before any transaction
    pub skipped_iteration: DelayWindow,
}

/// Bot configuration
#[derive(Debug, Clone)]
pub struct BotConfig {
    // Network
    pub rpc_url: String,
    /// `None` = take whatever the RPC reports
    pub chain_id: Option<u64>,
    pub tx_explorer: String,
    pub native_symbol: String,

    // Wallet
    pub private_key: String,

    // Contracts
    pub router: Address,
    pub token_a: Address,
    pub token_b: Address,
    /// Fallback symbols when the token contract cannot be queried
    pub token_a_name: String,
    pub token_b_name: String,

    // Faucet
    pub faucet_url: String,
    pub faucet_enabled: bool,
    pub mint_enabled: bool,

    pub swap: SwapSettings,
    pub delays: DelaySettings,

    // Notifications
    pub discord_webhook: Option<String>,
}

impl BotConfig {
    pub fn token(&self, side: TokenSide) -> Address {
        match side {
            TokenSide::A => self.token_a,
            TokenSide::B => self.token_b,
        }
    }

    /// Explorer link for a transaction hash (bare hash when no explorer is set)
    pub fn tx_link(&self, tx_hash: &TxHash) -> String {
        format!("{}{:?}", self.tx_explorer, tx_hash)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intent_starts_unfinalized() {
        let intent = SwapIntent::new(
            Address::repeat_byte(1),
            Address::repeat_byte(2),
            500,
            Address::repeat_byte(3),
            U256::from(1000u64),
            1_700_000_000,
        );
        assert!(!intent.is_finalized());
        assert_eq!(intent.price_limit, U160::ZERO);

        let intent = intent.with_minimum(U256::from(990u64));
        assert_eq!(intent.amount_out_minimum, Some(U256::from(990u64)));
    }

    #[test]
    fn test_phase_result_display() {
        let r = PhaseResult::failed(PhaseName::Faucet, "HTTP 500");
        assert_eq!(r.to_string(), "[FAILED] Faucet: HTTP 500");
        assert!(PhaseResult::ok(PhaseName::Mint, "2/2 minted").succeeded);
    }
}
