//! Conversions between on-chain integer amounts and human-unit decimals

use alloy::primitives::U256;
use rust_decimal::prelude::RoundingStrategy;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Significant digits a `Decimal` can hold without overflow
const MAX_DECIMAL_DIGITS: usize = 28;

/// Raw smallest-unit amount → human units.
///
/// Fractional digits beyond what `Decimal` can represent are truncated.
/// Integer parts too large for `Decimal` saturate at `Decimal::MAX`.
pub fn raw_to_decimal(raw: U256, decimals: u8) -> Decimal {
    let digits = raw.to_string();
    let decimals = decimals as usize;

    let (int_part, frac_part) = if digits.len() > decimals {
        let (i, f) = digits.split_at(digits.len() - decimals);
        (i.to_string(), f.to_string())
    } else {
        ("0".to_string(), format!("{:0>width$}", digits, width = decimals))
    };

    let keep = MAX_DECIMAL_DIGITS.saturating_sub(int_part.len()).min(frac_part.len());
    let text = if keep == 0 {
        int_part
    } else {
        format!("{}.{}", int_part, &frac_part[..keep])
    };

    Decimal::from_str(&text)
        .map(|d| d.normalize())
        .unwrap_or(Decimal::MAX)
}

/// Human units → raw smallest-unit amount. Excess precision is truncated.
/// Returns `None` for negative input or overflow.
pub fn decimal_to_raw(amount: Decimal, decimals: u8) -> Option<U256> {
    if amount.is_sign_negative() && !amount.is_zero() {
        return None;
    }
    let mantissa = u128::try_from(amount.mantissa()).ok()?;
    let scale = amount.scale();
    let decimals = u32::from(decimals);
    let ten = U256::from(10u8);
    let base = U256::from(mantissa);

    if decimals >= scale {
        let factor = ten.checked_pow(U256::from(decimals - scale))?;
        base.checked_mul(factor)
    } else {
        let divisor = ten.checked_pow(U256::from(scale - decimals))?;
        Some(base / divisor)
    }
}

/// Truncate (toward zero) to `dp` decimal places
pub fn truncate_dp(amount: Decimal, dp: u32) -> Decimal {
    amount.round_dp_with_strategy(dp, RoundingStrategy::ToZero)
}
