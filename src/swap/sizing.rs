//! Swap sizing
//!
//! Each swap sells a random share of the current sell-token balance,
//! drawn uniformly from the configured percentage range and truncated to
//! six decimal places in human units.

use crate::tokens::{decimal_to_raw, truncate_dp};
use crate::types::BalanceSnapshot;
use alloy::primitives::U256;
use rand::Rng;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;

const AMOUNT_DP: u32 = 6;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwapSize {
    pub percent: Decimal,
    /// Human units, six decimal places at most
    pub amount: Decimal,
    pub raw: U256,
}

#[derive(Debug, Clone, Copy)]
pub struct SwapSizer {
    min_percent: Decimal,
    max_percent: Decimal,
}

impl SwapSizer {
    pub fn new(min_percent: Decimal, max_percent: Decimal) -> Self {
        Self {
            min_percent,
            max_percent,
        }
    }

    /// Uniform draw in [min, max]
    pub fn draw_percent(&self) -> Decimal {
        if self.max_percent <= self.min_percent {
            return self.min_percent;
        }
        let r: f64 = rand::thread_rng().gen();
        let span = self.max_percent - self.min_percent;
        let offset = Decimal::from_f64(r).unwrap_or(Decimal::ZERO) * span;
        (self.min_percent + offset).min(self.max_percent).round_dp(4)
    }

    /// Amount for a given percentage, never more than the balance held
    pub fn size_with(&self, balance: &BalanceSnapshot, percent: Decimal) -> SwapSize {
        let amount = truncate_dp(balance.formatted * percent / Decimal::ONE_HUNDRED, AMOUNT_DP);
        let raw = decimal_to_raw(amount, balance.token.decimals)
            .unwrap_or(U256::ZERO)
            .min(balance.raw);
        SwapSize {
            percent,
            amount,
            raw,
        }
    }

    pub fn size(&self, balance: &BalanceSnapshot) -> SwapSize {
        self.size_with(balance, self.draw_percent())
    }
}
