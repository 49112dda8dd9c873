use crate::error::{MathError, MathResult};
use crate::math::fixed_point::{RESOLUTION_96, q96};
use crate::math::full_math::{div_rounding_up, mul_div, mul_div_rounding_up};
use primitive_types::U256;

fn sorted(a: U256, b: U256) -> (U256, U256) {
    if a > b { (b, a) } else { (a, b) }
}

/// Amount of token0 between two sqrt prices for a given liquidity.
///
/// `delta_x = L * (sqrt(P_b) - sqrt(P_a)) / (sqrt(P_a) * sqrt(P_b))`
///
/// Pools round up when receiving tokens and down when paying them out.
pub fn get_amount0_delta(
    sqrt_ratio_a: U256,
    sqrt_ratio_b: U256,
    liquidity: u128,
    round_up: bool,
) -> MathResult<U256> {
    let (lower, upper) = sorted(sqrt_ratio_a, sqrt_ratio_b);
    if lower.is_zero() {
        return Err(MathError::ZeroSqrtPrice);
    }

    let numerator1 = U256::from(liquidity) << RESOLUTION_96;
    let numerator2 = upper - lower;

    if round_up {
        div_rounding_up(mul_div_rounding_up(numerator1, numerator2, upper)?, lower)
    } else {
        Ok(mul_div(numerator1, numerator2, upper)? / lower)
    }
}

/// Amount of token1 between two sqrt prices for a given liquidity.
///
/// `delta_y = L * (sqrt(P_b) - sqrt(P_a))`
pub fn get_amount1_delta(
    sqrt_ratio_a: U256,
    sqrt_ratio_b: U256,
    liquidity: u128,
    round_up: bool,
) -> MathResult<U256> {
    let (lower, upper) = sorted(sqrt_ratio_a, sqrt_ratio_b);
    let diff = upper - lower;

    if round_up {
        mul_div_rounding_up(U256::from(liquidity), diff, q96())
    } else {
        mul_div(U256::from(liquidity), diff, q96())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // sqrt prices 1 and 2 in Q64.96
    fn one() -> U256 {
        q96()
    }

    fn two() -> U256 {
        q96() * U256::from(2u64)
    }

    #[test]
    fn test_amount_deltas() {
        // L = 1000, sqrt price 1 -> 2
        // delta_y = 1000 * (2 - 1) = 1000
        // delta_x = 1000 * (1/1 - 1/2) = 500
        let dy = get_amount1_delta(one(), two(), 1000, false).unwrap();
        assert_eq!(dy, U256::from(1000u64));

        let dx = get_amount0_delta(one(), two(), 1000, false).unwrap();
        assert_eq!(dx, U256::from(500u64));
    }

    #[test]
    fn test_argument_order_is_irrelevant() {
        assert_eq!(
            get_amount0_delta(two(), one(), 1000, false).unwrap(),
            get_amount0_delta(one(), two(), 1000, false).unwrap()
        );
        assert_eq!(
            get_amount1_delta(two(), one(), 1000, true).unwrap(),
            get_amount1_delta(one(), two(), 1000, true).unwrap()
        );
    }

    #[test]
    fn test_rounding_direction() {
        // sqrt price 1 -> 1.5 with L = 1 gives fractional amounts.
        let mid = q96() * U256::from(3u64) / U256::from(2u64);
        let down = get_amount1_delta(one(), mid, 1, false).unwrap();
        let up = get_amount1_delta(one(), mid, 1, true).unwrap();
        assert_eq!(down, U256::zero());
        assert_eq!(up, U256::one());

        let down0 = get_amount0_delta(one(), mid, 1, false).unwrap();
        let up0 = get_amount0_delta(one(), mid, 1, true).unwrap();
        assert_eq!(up0, down0 + U256::one());
    }

    #[test]
    fn test_zero_price_rejected() {
        assert_eq!(
            get_amount0_delta(U256::zero(), one(), 10, false),
            Err(MathError::ZeroSqrtPrice)
        );
    }
}
