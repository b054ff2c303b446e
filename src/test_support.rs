// In-memory chain, faucet and notifier for unit and scenario tests

use crate::chain::ChainClient;
use crate::error::{BotError, BotResult, FaucetErrorCode};
use crate::faucet::{Faucet, FaucetReceipt};
use crate::notify::Notifier;
use crate::orchestrator::RunSummary;
use crate::types::{
    BotConfig, DelaySettings, DelayWindow, SwapIntent, SwapSettings, TokenAsset, TxOutcome,
};
use alloy::primitives::{address, Address, B256, U256};
use async_trait::async_trait;
use rust_decimal_macros::dec;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

pub const WALLET: Address = address!("1111111111111111111111111111111111111111");
pub const ROUTER: Address = address!("2222222222222222222222222222222222222222");
pub const TOKEN_A: Address = address!("aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa");
pub const TOKEN_B: Address = address!("bbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb");

/// `n` whole tokens at 18 decimals
pub fn units(n: u64) -> U256 {
    U256::from(n) * U256::from(10u64).pow(U256::from(18u64))
}

pub fn asset(address: Address, symbol: &str) -> TokenAsset {
    TokenAsset {
        address,
        symbol: symbol.to_string(),
        decimals: 18,
    }
}

/// Valid config pointing at the mock addresses, one swap per run
pub fn test_config() -> BotConfig {
    let zero = DelayWindow::new(0.0, 0.0);
    BotConfig {
        rpc_url: "http://127.0.0.1:8545".to_string(),
        chain_id: Some(31337),
        tx_explorer: "https://explorer.test/tx/".to_string(),
        native_symbol: "STT".to_string(),
        private_key: "0x59c6995e998f97a5a0044966f0945389dc9e86dae88c7a8412f4603b6b78690d"
            .to_string(),
        router: ROUTER,
        token_a: TOKEN_A,
        token_b: TOKEN_B,
        token_a_name: "PONG".to_string(),
        token_b_name: "PING".to_string(),
        faucet_url: "http://127.0.0.1:1/api/faucet".to_string(),
        faucet_enabled: true,
        mint_enabled: true,
        swap: SwapSettings {
            min_swap_percent: dec!(5),
            max_swap_percent: dec!(15),
            slippage_percent: dec!(0.5),
            pool_fee: 500,
            deadline_secs: 600,
            swaps_per_run: Some(1),
            negligible_balance: dec!(0.00001),
            min_native_balance: dec!(0.001),
        },
        delays: DelaySettings {
            between_swaps: zero,
            after_tx: zero,
            after_approval: zero,
            between_phases: zero,
            skipped_iteration: zero,
        },
        discord_webhook: None,
    }
}

#[derive(Default)]
struct MockState {
    tokens: HashMap<Address, (String, u8)>,
    broken_metadata: HashSet<Address>,
    balances: HashMap<Address, U256>,
    allowances: HashMap<Address, U256>,
    native: U256,
    /// Swap output = amount_in * rate.0 / rate.1
    rate: (u64, u64),
    mint_amount: U256,

    fail_balance_reads: bool,
    fail_approvals: bool,
    fail_mints: bool,
    revert_mints: bool,
    fail_allowance_reads: bool,
    simulation_error: Option<String>,
    revert_swaps: bool,
    fail_swap_submission: bool,

    metadata_queries: usize,
    approve_calls: usize,
    mint_calls: usize,
    simulate_calls: usize,
    swap_calls: usize,
    last_swap_minimum: Option<U256>,
    block: u64,
}

/// Scripted `ChainClient`. Swaps move balances at a fixed rate and revert
/// when the output falls below the minimum or the balance is short.
pub struct MockChain {
    state: Mutex<MockState>,
}

impl Default for MockChain {
    fn default() -> Self {
        Self::new()
    }
}

impl MockChain {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(MockState {
                rate: (1, 1),
                native: units(1),
                mint_amount: units(1000),
                block: 100,
                ..Default::default()
            }),
        }
    }

    fn with<R>(&self, f: impl FnOnce(&mut MockState) -> R) -> R {
        f(&mut self.state.lock().unwrap())
    }

    pub fn set_token(&self, token: Address, symbol: &str, decimals: u8) {
        self.with(|s| s.tokens.insert(token, (symbol.to_string(), decimals)));
    }
    pub fn fail_metadata(&self, token: Address) {
        self.with(|s| s.broken_metadata.insert(token));
    }
    pub fn set_balance(&self, token: Address, amount: U256) {
        self.with(|s| s.balances.insert(token, amount));
    }
    pub fn balance(&self, token: Address) -> U256 {
        self.with(|s| s.balances.get(&token).copied().unwrap_or_default())
    }
    pub fn set_native_balance(&self, amount: U256) {
        self.with(|s| s.native = amount);
    }
    pub fn set_allowance(&self, token: Address, amount: U256) {
        self.with(|s| s.allowances.insert(token, amount));
    }
    pub fn allowance_of(&self, token: Address) -> U256 {
        self.with(|s| s.allowances.get(&token).copied().unwrap_or_default())
    }
    pub fn set_rate(&self, numerator: u64, denominator: u64) {
        self.with(|s| s.rate = (numerator, denominator));
    }
    pub fn set_mint_amount(&self, amount: U256) {
        self.with(|s| s.mint_amount = amount);
    }
    pub fn fail_balance_reads(&self, fail: bool) {
        self.with(|s| s.fail_balance_reads = fail);
    }
    pub fn fail_approvals(&self, fail: bool) {
        self.with(|s| s.fail_approvals = fail);
    }
    pub fn fail_mints(&self, fail: bool) {
        self.with(|s| s.fail_mints = fail);
    }
    /// Mints are mined but revert, so the failure carries a tx hash
    pub fn revert_mints(&self, revert: bool) {
        self.with(|s| s.revert_mints = revert);
    }
    pub fn fail_allowance_reads(&self, fail: bool) {
        self.with(|s| s.fail_allowance_reads = fail);
    }
    pub fn fail_simulation(&self, message: &str) {
        self.with(|s| s.simulation_error = Some(message.to_string()));
    }
    pub fn revert_swaps(&self, revert: bool) {
        self.with(|s| s.revert_swaps = revert);
    }
    pub fn fail_swap_submission(&self, fail: bool) {
        self.with(|s| s.fail_swap_submission = fail);
    }

    pub fn metadata_queries(&self) -> usize {
        self.with(|s| s.metadata_queries)
    }
    pub fn approve_calls(&self) -> usize {
        self.with(|s| s.approve_calls)
    }
    pub fn mint_calls(&self) -> usize {
        self.with(|s| s.mint_calls)
    }
    pub fn simulate_calls(&self) -> usize {
        self.with(|s| s.simulate_calls)
    }
    pub fn swap_calls(&self) -> usize {
        self.with(|s| s.swap_calls)
    }
    pub fn last_swap_minimum(&self) -> Option<U256> {
        self.with(|s| s.last_swap_minimum)
    }
}

fn quote(state: &MockState, amount_in: U256) -> U256 {
    amount_in * U256::from(state.rate.0) / U256::from(state.rate.1.max(1))
}

fn confirm(state: &mut MockState) -> TxOutcome {
    state.block += 1;
    TxOutcome {
        tx_hash: B256::left_padding_from(&state.block.to_be_bytes()),
        block_number: state.block,
        gas_used: 120_000,
    }
}

#[async_trait]
impl ChainClient for MockChain {
    fn wallet_address(&self) -> Address {
        WALLET
    }

    async fn native_balance(&self, _owner: Address) -> BotResult<U256> {
        self.with(|s| {
            if s.fail_balance_reads {
                return Err(BotError::query("eth_getBalance: connection refused"));
            }
            Ok(s.native)
        })
    }

    async fn token_balance(&self, token: Address, _owner: Address) -> BotResult<U256> {
        self.with(|s| {
            if s.fail_balance_reads {
                return Err(BotError::query("balanceOf: connection refused"));
            }
            Ok(s.balances.get(&token).copied().unwrap_or_default())
        })
    }

    async fn token_decimals(&self, token: Address) -> BotResult<u8> {
        self.with(|s| {
            s.metadata_queries += 1;
            if s.broken_metadata.contains(&token) {
                return Err(BotError::query("decimals() reverted"));
            }
            Ok(s.tokens.get(&token).map(|t| t.1).unwrap_or(18))
        })
    }

    async fn token_symbol(&self, token: Address) -> BotResult<String> {
        self.with(|s| {
            s.metadata_queries += 1;
            if s.broken_metadata.contains(&token) {
                return Err(BotError::query("symbol() reverted"));
            }
            Ok(s.tokens.get(&token).map(|t| t.0.clone()).unwrap_or_else(|| "MOCK".to_string()))
        })
    }

    async fn allowance(
        &self,
        token: Address,
        _owner: Address,
        _spender: Address,
    ) -> BotResult<U256> {
        self.with(|s| {
            if s.fail_allowance_reads {
                return Err(BotError::query("allowance: connection refused"));
            }
            Ok(s.allowances.get(&token).copied().unwrap_or_default())
        })
    }

    async fn approve(
        &self,
        token: Address,
        _spender: Address,
        amount: U256,
    ) -> BotResult<TxOutcome> {
        self.with(|s| {
            s.approve_calls += 1;
            if s.fail_approvals {
                let outcome = confirm(s);
                return Err(BotError::Execution {
                    reason: "Approval transaction reverted".to_string(),
                    tx_hash: Some(format!("{:?}", outcome.tx_hash)),
                });
            }
            s.allowances.insert(token, amount);
            Ok(confirm(s))
        })
    }

    async fn mint(&self, token: Address) -> BotResult<TxOutcome> {
        self.with(|s| {
            s.mint_calls += 1;
            if s.fail_mints {
                return Err(BotError::Execution {
                    reason: "Mint transaction never confirmed".to_string(),
                    tx_hash: None,
                });
            }
            if s.revert_mints {
                let outcome = confirm(s);
                return Err(BotError::Execution {
                    reason: "Mint transaction reverted".to_string(),
                    tx_hash: Some(format!("{:?}", outcome.tx_hash)),
                });
            }
            let minted = s.mint_amount;
            *s.balances.entry(token).or_default() += minted;
            Ok(confirm(s))
        })
    }

    async fn simulate_swap(&self, intent: &SwapIntent) -> BotResult<U256> {
        self.with(|s| {
            s.simulate_calls += 1;
            if let Some(msg) = &s.simulation_error {
                return Err(BotError::query(msg.clone()));
            }
            Ok(quote(s, intent.amount_in))
        })
    }

    async fn submit_swap(
        &self,
        intent: &SwapIntent,
        amount_out_minimum: U256,
    ) -> BotResult<TxOutcome> {
        self.with(|s| {
            s.swap_calls += 1;
            s.last_swap_minimum = Some(amount_out_minimum);
            if s.fail_swap_submission {
                return Err(BotError::submission("swap: insufficient funds for gas"));
            }

            let held = s.balances.get(&intent.token_in).copied().unwrap_or_default();
            let out = quote(s, intent.amount_in);
            if s.revert_swaps || held < intent.amount_in || out < amount_out_minimum {
                let outcome = confirm(s);
                return Err(BotError::Execution {
                    reason: "Swap transaction reverted".to_string(),
                    tx_hash: Some(format!("{:?}", outcome.tx_hash)),
                });
            }

            s.balances.insert(intent.token_in, held - intent.amount_in);
            *s.balances.entry(intent.token_out).or_default() += out;
            Ok(confirm(s))
        })
    }
}

/// Faucet that answers with a fixed HTTP status
pub struct MockFaucet {
    status: u16,
    calls: Mutex<Vec<Address>>,
}

impl MockFaucet {
    pub fn with_status(status: u16) -> Self {
        Self {
            status,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl Faucet for MockFaucet {
    async fn claim(&self, address: Address) -> BotResult<FaucetReceipt> {
        self.calls.lock().unwrap().push(address);
        if (200..300).contains(&self.status) {
            Ok(FaucetReceipt {
                status: self.status,
                body: serde_json::json!({ "success": true }),
            })
        } else {
            Err(BotError::Faucet {
                code: FaucetErrorCode::Status(self.status),
                message: "Internal Server Error".to_string(),
            })
        }
    }
}

/// Keeps every summary it is handed
#[derive(Default)]
pub struct RecordingNotifier {
    pub summaries: Mutex<Vec<RunSummary>>,
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn run_finished(&self, summary: &RunSummary) {
        self.summaries.lock().unwrap().push(summary.clone());
    }
}
