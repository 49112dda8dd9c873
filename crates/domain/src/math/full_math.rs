use crate::error::{MathError, MathResult};
use primitive_types::{U256, U512};

/// Calculates `floor(a * b / denominator)` with a 512-bit intermediate.
///
/// Fails if `denominator` is zero or the quotient does not fit in 256 bits.
pub fn mul_div(a: U256, b: U256, denominator: U256) -> MathResult<U256> {
    if denominator.is_zero() {
        return Err(MathError::DivisionByZero);
    }
    let product = a.full_mul(b);
    let quotient = product / U512::from(denominator);
    U256::try_from(quotient).map_err(|_| MathError::Overflow)
}

/// Calculates `ceil(a * b / denominator)` with a 512-bit intermediate.
pub fn mul_div_rounding_up(a: U256, b: U256, denominator: U256) -> MathResult<U256> {
    let result = mul_div(a, b, denominator)?;
    let remainder = a.full_mul(b) % U512::from(denominator);
    if remainder.is_zero() {
        Ok(result)
    } else {
        result.checked_add(U256::one()).ok_or(MathError::Overflow)
    }
}

/// Calculates `ceil(a / b)`.
pub fn div_rounding_up(a: U256, b: U256) -> MathResult<U256> {
    if b.is_zero() {
        return Err(MathError::DivisionByZero);
    }
    let quotient = a / b;
    if (a % b).is_zero() {
        Ok(quotient)
    } else {
        Ok(quotient + U256::one())
    }
}

/// Narrows a `U256` to `u128`, failing instead of truncating.
pub fn to_u128(value: U256) -> MathResult<u128> {
    if value > U256::from(u128::MAX) {
        return Err(MathError::Overflow);
    }
    Ok(value.low_u128())
}
