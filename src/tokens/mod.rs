//! Token metadata, balances and unit conversion

pub mod balance;
pub mod cache;
pub mod units;

pub use balance::BalanceReader;
pub use cache::TokenInfoCache;
pub use units::{decimal_to_raw, raw_to_decimal, truncate_dp};
