//! Swap pipeline: direction → size → approve → simulate → execute

pub mod approval;
pub mod direction;
pub mod executor;
pub mod quote;
pub mod sizing;
pub mod slippage;

pub use approval::ApprovalManager;
pub use direction::{DirectionSelector, Selection};
pub use executor::SwapExecutor;
pub use quote::QuoteSimulator;
pub use sizing::{SwapSize, SwapSizer};
pub use slippage::{min_amount_out, slippage_bps};
