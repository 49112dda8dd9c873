use crate::error::{MathError, MathResult};
use crate::math::fixed_point::{RESOLUTION_96, q96};
use crate::math::full_math::{mul_div, to_u128};
use primitive_types::U256;

fn sorted(a: U256, b: U256) -> MathResult<(U256, U256)> {
    let (lower, upper) = if a > b { (b, a) } else { (a, b) };
    if lower.is_zero() {
        return Err(MathError::ZeroSqrtPrice);
    }
    Ok((lower, upper))
}

/// Calculates liquidity for a given amount of token0 and price range.
/// L = amount0 * (sqrt(P_a) * sqrt(P_b)) / (sqrt(P_b) - sqrt(P_a))
pub fn get_liquidity_for_amount0(
    sqrt_ratio_a: U256,
    sqrt_ratio_b: U256,
    amount0: u128,
) -> MathResult<u128> {
    let (lower, upper) = sorted(sqrt_ratio_a, sqrt_ratio_b)?;
    if lower == upper {
        return Err(MathError::DivisionByZero);
    }
    let intermediate = mul_div(lower, upper, q96())?;
    to_u128(mul_div(U256::from(amount0), intermediate, upper - lower)?)
}

/// Calculates liquidity for a given amount of token1 and price range.
/// L = amount1 / (sqrt(P_b) - sqrt(P_a))
pub fn get_liquidity_for_amount1(
    sqrt_ratio_a: U256,
    sqrt_ratio_b: U256,
    amount1: u128,
) -> MathResult<u128> {
    let (lower, upper) = sorted(sqrt_ratio_a, sqrt_ratio_b)?;
    to_u128(mul_div(U256::from(amount1), q96(), upper - lower)?)
}

/// Maximum liquidity obtainable from both amounts at the current price.
pub fn get_liquidity_for_amounts(
    sqrt_price: U256,
    sqrt_ratio_a: U256,
    sqrt_ratio_b: U256,
    amount0: u128,
    amount1: u128,
) -> MathResult<u128> {
    let (lower, upper) = sorted(sqrt_ratio_a, sqrt_ratio_b)?;

    if sqrt_price <= lower {
        get_liquidity_for_amount0(lower, upper, amount0)
    } else if sqrt_price < upper {
        let liquidity0 = get_liquidity_for_amount0(sqrt_price, upper, amount0)?;
        let liquidity1 = get_liquidity_for_amount1(lower, sqrt_price, amount1)?;
        Ok(liquidity0.min(liquidity1))
    } else {
        get_liquidity_for_amount1(lower, upper, amount1)
    }
}

/// Calculates the amount of token0 (x) for a liquidity over a price range, rounded down.
/// delta_x = L * (1/sqrt(P_a) - 1/sqrt(P_b))
pub fn get_amount0_for_liquidity(
    sqrt_ratio_a: U256,
    sqrt_ratio_b: U256,
    liquidity: u128,
) -> MathResult<u128> {
    let (lower, upper) = sorted(sqrt_ratio_a, sqrt_ratio_b)?;
    let amount = mul_div(U256::from(liquidity) << RESOLUTION_96, upper - lower, upper)? / lower;
    to_u128(amount)
}

/// Calculates the amount of token1 (y) for a liquidity over a price range, rounded down.
/// delta_y = L * (sqrt(P_b) - sqrt(P_a))
pub fn get_amount1_for_liquidity(
    sqrt_ratio_a: U256,
    sqrt_ratio_b: U256,
    liquidity: u128,
) -> MathResult<u128> {
    let (lower, upper) = sorted(sqrt_ratio_a, sqrt_ratio_b)?;
    to_u128(mul_div(U256::from(liquidity), upper - lower, q96())?)
}

/// Token amounts represented by `liquidity` at the current price.
pub fn get_amounts_for_liquidity(
    sqrt_price: U256,
    sqrt_ratio_a: U256,
    sqrt_ratio_b: U256,
    liquidity: u128,
) -> MathResult<(u128, u128)> {
    let (lower, upper) = sorted(sqrt_ratio_a, sqrt_ratio_b)?;

    if sqrt_price <= lower {
        Ok((get_amount0_for_liquidity(lower, upper, liquidity)?, 0))
    } else if sqrt_price < upper {
        Ok((
            get_amount0_for_liquidity(sqrt_price, upper, liquidity)?,
            get_amount1_for_liquidity(lower, sqrt_price, liquidity)?,
        ))
    } else {
        Ok((0, get_amount1_for_liquidity(lower, upper, liquidity)?))
    }
}
