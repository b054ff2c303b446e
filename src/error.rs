//! Error taxonomy for the swap/mint engine
//!
//! Every failure below `Config` is caught at an iteration or phase boundary
//! and turned into a log line plus a continue/skip decision. Only `Config`
//! (and anything escaping the orchestrator) ends the process with status 1.
//!
//! Created: 2026-10-19

use std::fmt;
use thiserror::Error;

/// How a failed quote simulation was classified.
///
/// Only changes the log message; a failed simulation always skips the swap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimulationKind {
    /// Revert, insufficient liquidity, stale parameters
    LikelyRevert,
    Unclassified,
}

impl fmt::Display for SimulationKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SimulationKind::LikelyRevert => write!(f, "likely on-chain revert"),
            SimulationKind::Unclassified => write!(f, "unclassified"),
        }
    }
}

/// Failure codes returned by the faucet client
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaucetErrorCode {
    /// Server answered with a non-2xx status
    Status(u16),
    /// Request went out but nothing came back
    NoResponse,
    /// Request could not be built or sent
    RequestSetup,
}

impl fmt::Display for FaucetErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FaucetErrorCode::Status(code) => write!(f, "HTTP {}", code),
            FaucetErrorCode::NoResponse => write!(f, "NO_RESPONSE"),
            FaucetErrorCode::RequestSetup => write!(f, "REQUEST_SETUP_ERROR"),
        }
    }
}

#[derive(Debug, Error)]
pub enum BotError {
    /// Invalid or missing configuration. Fatal before any phase runs.
    #[error("configuration error: {0}")]
    Config(String),

    /// Balance, allowance or metadata read failed
    #[error("query failed: {0}")]
    Query(String),

    /// Transaction could not be signed, sent or confirmed
    #[error("submission failed: {0}")]
    Submission(String),

    #[error("approval failed: {0}")]
    Approval(String),

    #[error("simulation failed ({kind}): {reason}")]
    Simulation { kind: SimulationKind, reason: String },

    /// Swap reverted on-chain or never made it into a block
    #[error("execution failed: {reason}")]
    Execution {
        reason: String,
        tx_hash: Option<String>,
    },

    #[error("faucet error [{code}]: {message}")]
    Faucet {
        code: FaucetErrorCode,
        message: String,
    },
}

impl BotError {
    pub fn config(msg: impl Into<String>) -> Self {
        BotError::Config(msg.into())
    }

    pub fn query(msg: impl Into<String>) -> Self {
        BotError::Query(msg.into())
    }

    pub fn submission(msg: impl Into<String>) -> Self {
        BotError::Submission(msg.into())
    }

    /// True for errors that must stop the process before the run starts
    pub fn is_fatal(&self) -> bool {
        matches!(self, BotError::Config(_))
    }

    /// Transaction hash attached to the failure, if one was broadcast
    pub fn tx_hash(&self) -> Option<&str> {
        match self {
            BotError::Execution { tx_hash, .. } => tx_hash.as_deref(),
            _ => None,
        }
    }

    /// Display text plus an explorer link when a transaction was broadcast
    pub fn with_tx_link(&self, tx_explorer: &str) -> String {
        match self.tx_hash() {
            Some(hash) => format!("{} (tx {}{})", self, tx_explorer, hash),
            None => self.to_string(),
        }
    }
}

pub type BotResult<T> = std::result::Result<T, BotError>;
