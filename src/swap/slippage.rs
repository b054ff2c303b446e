// Slippage bound on a simulated quote, in integer basis points

use alloy::primitives::U256;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

pub const BPS_DENOMINATOR: u32 = 10_000;

/// Slippage percent → basis points, floored (0.5% → 50, 0.555% → 55).
/// Clamped to [0, 10000].
pub fn slippage_bps(slippage_percent: Decimal) -> u32 {
    let bps = (slippage_percent * Decimal::ONE_HUNDRED).floor();
    bps.to_u32().unwrap_or(0).min(BPS_DENOMINATOR)
}

/// `floor(expected * (10000 - bps) / 10000)`, exact for every U256.
///
/// Split `expected = q * 10000 + r` so neither partial product can
/// overflow: `q * keep <= expected` and `r * keep < 10000^2`.
pub fn min_amount_out(expected: U256, bps: u32) -> U256 {
    let keep = U256::from(BPS_DENOMINATOR - bps.min(BPS_DENOMINATOR));
    let denom = U256::from(BPS_DENOMINATOR);
    let (q, r) = expected.div_rem(denom);
    q * keep + r * keep / denom
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::U512;
    use rust_decimal_macros::dec;

    #[test]
    fn test_bps_floor() {
        assert_eq!(slippage_bps(dec!(0.5)), 50);
        assert_eq!(slippage_bps(dec!(1)), 100);
        assert_eq!(slippage_bps(dec!(0.555)), 55);
        assert_eq!(slippage_bps(dec!(0)), 0);
        assert_eq!(slippage_bps(dec!(-1)), 0);
        assert_eq!(slippage_bps(dec!(250)), 10_000);
    }

    #[test]
    fn test_min_amount_out() {
        assert_eq!(min_amount_out(U256::from(1_000_000u64), 50), U256::from(995_000u64));
        // truncation
        assert_eq!(min_amount_out(U256::from(999u64), 50), U256::from(994u64));
        assert_eq!(min_amount_out(U256::from(1_000u64), 0), U256::from(1_000u64));
        assert_eq!(min_amount_out(U256::from(1_000u64), 10_000), U256::ZERO);
    }

    /// Reference floor computed in 512 bits
    fn wide_min_out(expected: U256, bps: u32) -> U256 {
        let limbs = expected.as_limbs();
        let wide = U512::from_limbs([limbs[0], limbs[1], limbs[2], limbs[3], 0, 0, 0, 0]);
        let keep = U512::from(BPS_DENOMINATOR - bps);
        let out = wide * keep / U512::from(BPS_DENOMINATOR);
        let out = out.as_limbs();
        assert!(out[4..].iter().all(|l| *l == 0));
        U256::from_limbs([out[0], out[1], out[2], out[3]])
    }

    #[test]
    fn test_min_amount_out_exact_near_max() {
        let near_max = [U256::MAX, U256::MAX - U256::from(1u64), U256::MAX / U256::from(3u64)];
        for expected in near_max {
            for bps in [0u32, 1, 50, 9_999, 10_000] {
                assert_eq!(min_amount_out(expected, bps), wide_min_out(expected, bps));
            }
        }
        assert_eq!(min_amount_out(U256::MAX, 0), U256::MAX);
    }

    #[test]
    fn test_min_amount_out_never_exceeds_expected() {
        for bps in [0u32, 1, 50, 9_999] {
            assert!(min_amount_out(U256::from(12_345u64), bps) <= U256::from(12_345u64));
            assert_eq!(
                min_amount_out(U256::from(12_345u64), bps),
                wide_min_out(U256::from(12_345u64), bps)
            );
        }
    }
}
