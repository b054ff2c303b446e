//! Testnet AutoSwap Bot Library
//!
//! Faucet claim, token mint and slippage-bounded V3 swaps for a single
//! wallet, run as one sequential pass through a phase state machine.
//!
//! Created: 2026-10-19

pub mod chain;
pub mod config;
pub mod contracts;
pub mod delay;
pub mod error;
pub mod faucet;
pub mod notify;
pub mod orchestrator;
pub mod swap;
pub mod tokens;
pub mod types;

#[cfg(test)]
mod test_support;

// Re-export commonly used types
pub use chain::{AlloyChainClient, ChainClient, WalletContext};
pub use config::{load_config, load_config_from_file, TuningConfig};
pub use error::{BotError, BotResult};
pub use orchestrator::{PhaseOrchestrator, RunContext, RunSummary};
pub use types::{BotConfig, PhaseResult, SwapIntent, TokenAsset};
