//! Chain Access
//!
//! The engine talks to the network only through [`ChainClient`]: reads
//! (balances, allowance, metadata), a read-only swap simulation, and
//! submissions that block until one confirmation is observed.
//! [`AlloyChainClient`] is the production implementation.

pub mod alloy_client;
pub mod fees;
pub mod wallet;

pub use alloy_client::AlloyChainClient;
pub use fees::{BaseFeeMultiplier, FeeStrategy};
pub use wallet::WalletContext;

use crate::error::BotResult;
use crate::types::{SwapIntent, TxOutcome};
use alloy::primitives::{Address, U256};
use async_trait::async_trait;

/// Blockchain RPC + signing capability for a single wallet.
///
/// Read failures surface as `BotError::Query`. Send failures surface as
/// `BotError::Submission`; a mined-but-reverted transaction surfaces as
/// `BotError::Execution` carrying its hash.
#[async_trait]
pub trait ChainClient: Send + Sync {
    /// Address of the signing wallet
    fn wallet_address(&self) -> Address;

    async fn native_balance(&self, owner: Address) -> BotResult<U256>;

    async fn token_balance(&self, token: Address, owner: Address) -> BotResult<U256>;

    async fn token_decimals(&self, token: Address) -> BotResult<u8>;

    async fn token_symbol(&self, token: Address) -> BotResult<String>;

    async fn allowance(&self, token: Address, owner: Address, spender: Address) -> BotResult<U256>;

    /// Submit `approve(spender, amount)` and wait for one confirmation
    async fn approve(
        &self,
        token: Address,
        spender: Address,
        amount: U256,
    ) -> BotResult<TxOutcome>;

    /// Submit the test token's public `mint()` and wait for one confirmation
    async fn mint(&self, token: Address) -> BotResult<TxOutcome>;

    /// Read-only `exactInputSingle` with `amountOutMinimum = 0`.
    /// Returns the amount the router would pay out.
    async fn simulate_swap(&self, intent: &SwapIntent) -> BotResult<U256>;

    /// Submit `exactInputSingle` with the given minimum and wait for one confirmation
    async fn submit_swap(
        &self,
        intent: &SwapIntent,
        amount_out_minimum: U256,
    ) -> BotResult<TxOutcome>;
}
