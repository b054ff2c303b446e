// Which side of the pair to sell next

use crate::types::TokenSide;
use rust_decimal::Decimal;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    Sell(TokenSide),
    /// Neither balance is worth swapping, stop the swap phase
    Terminal,
}

/// Sells whichever token has the larger unit count.
///
/// Ignores relative token value on purpose; the goal is keeping both
/// balances moving, not profit. Deterministic for a given input.
#[derive(Debug, Clone, Copy)]
pub struct DirectionSelector {
    /// Balances at or below this count as empty
    pub negligible: Decimal,
}

impl DirectionSelector {
    pub fn new(negligible: Decimal) -> Self {
        Self { negligible }
    }

    pub fn select(&self, bal_a: Decimal, bal_b: Decimal) -> Selection {
        let a_usable = bal_a > self.negligible;
        let b_usable = bal_b > self.negligible;

        if a_usable && bal_a > bal_b {
            Selection::Sell(TokenSide::A)
        } else if b_usable {
            // also covers the tie: B is drained first
            Selection::Sell(TokenSide::B)
        } else {
            Selection::Terminal
        }
    }
}
