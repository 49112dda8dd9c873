use crate::error::{MathError, MathResult};
use crate::math::fixed_point::q96;
use primitive_types::U256;
use rust_decimal::Decimal;
use rust_decimal::prelude::*;

/// Returns the price corresponding to a given tick.
/// P = 1.0001 ^ tick
pub fn tick_to_price(tick: i32) -> MathResult<Decimal> {
    let base = 1.0001f64;
    let price_f64 = base.powi(tick);
    Decimal::from_f64(price_f64).ok_or(MathError::Conversion("price out of decimal range"))
}

/// Converts a Q64.96 sqrt price into a human readable price (token1 per token0).
///
/// Lossy, only for display.
pub fn sqrt_price_x96_to_price(sqrt_price_x96: U256) -> MathResult<Decimal> {
    let sqrt = u256_to_f64(sqrt_price_x96)? / u256_to_f64(q96())?;
    Decimal::from_f64(sqrt * sqrt).ok_or(MathError::Conversion("price out of decimal range"))
}

fn u256_to_f64(value: U256) -> MathResult<f64> {
    value
        .to_string()
        .parse::<f64>()
        .map_err(|_| MathError::Conversion("u256 to float"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::tick_math::get_sqrt_ratio_at_tick;
    use rust_decimal_macros::dec;

    #[test]
    fn test_tick_to_price() {
        // Tick 0 -> Price 1
        let p = tick_to_price(0).unwrap();
        assert_eq!(p, Decimal::from(1));

        // Tick 100 -> 1.0001^100 ~= 1.010049
        let p100 = tick_to_price(100).unwrap();
        let expected = 1.01004966;
        let diff = (p100.to_f64().unwrap() - expected).abs();
        assert!(diff < 0.000001);
    }

    #[test]
    fn test_sqrt_price_to_price() {
        let p = sqrt_price_x96_to_price(q96() * U256::from(2u64)).unwrap();
        assert_eq!(p, dec!(4));

        let p = sqrt_price_x96_to_price(get_sqrt_ratio_at_tick(100).unwrap()).unwrap();
        assert!((p - tick_to_price(100).unwrap()).abs() < dec!(0.000001));
    }
}
