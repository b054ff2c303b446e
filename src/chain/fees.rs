//! Gas fee suggestion
//!
//! The base-fee multiplier is a heuristic with no guarantee against
//! underpriced transactions, so it sits behind [`FeeStrategy`] and can be
//! swapped out without touching the client.

/// Picks a gas price from the latest block's base fee.
pub trait FeeStrategy: Send + Sync {
    /// `None` leaves pricing to the provider's fee filler
    fn gas_price(&self, latest_base_fee: Option<u128>) -> Option<u128>;
}

/// `base_fee * numerator / denominator` (defaults to × 1.2)
#[derive(Debug, Clone, Copy)]
pub struct BaseFeeMultiplier {
    pub numerator: u128,
    pub denominator: u128,
}

impl Default for BaseFeeMultiplier {
    fn default() -> Self {
        Self {
            numerator: 12,
            denominator: 10,
        }
    }
}

impl FeeStrategy for BaseFeeMultiplier {
    fn gas_price(&self, latest_base_fee: Option<u128>) -> Option<u128> {
        let base = latest_base_fee.filter(|b| *b > 0)?;
        if self.denominator == 0 {
            return None;
        }
        Some(base.saturating_mul(self.numerator) / self.denominator)
    }
}

/// Gas limit with a 20% buffer over the node's estimate
pub fn gas_limit_with_buffer(estimate: u64) -> u64 {
    estimate.saturating_mul(120) / 100
}
