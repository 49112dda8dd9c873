use crate::error::{MathError, MathResult};
use primitive_types::U256;

/// Lowest tick whose sqrt price is representable in Q64.96.
pub const MIN_TICK: i32 = -887_272;

/// Highest tick whose sqrt price is representable in Q64.96.
pub const MAX_TICK: i32 = -MIN_TICK;

/// Sqrt price at [`MIN_TICK`].
#[must_use]
pub fn min_sqrt_ratio() -> U256 {
    U256::from(4_295_128_739u64)
}

/// Sqrt price at [`MAX_TICK`].
#[must_use]
pub fn max_sqrt_ratio() -> U256 {
    // 0xfffd8963efd1fc6a506488495d951d5263988d26
    U256([0x5d95_1d52_6398_8d26, 0xefd1_fc6a_5064_8849, 0xfffd_8963, 0])
}

/// Per-bit multipliers, `sqrt(1.0001)^(-2^i)` in Q128, for bits 1..=19.
const BIT_MULTIPLIERS: [(u32, u128); 19] = [
    (0x2, 0xfff97272373d413259a46990580e213a),
    (0x4, 0xfff2e50f5f656932ef12357cf3c7fdcc),
    (0x8, 0xffe5caca7e10e4e61c3624eaa0941cd0),
    (0x10, 0xffcb9843d60f6159c9db58835c926644),
    (0x20, 0xff973b41fa98c081472e6896dfb254c0),
    (0x40, 0xff2ea16466c96a3843ec78b326b52861),
    (0x80, 0xfe5dee046a99a2a811c461f1969c3053),
    (0x100, 0xfcbe86c7900a88aedcffc83b479aa3a4),
    (0x200, 0xf987a7253ac413176f2b074cf7815e54),
    (0x400, 0xf3392b0822b70005940c7a398e4b70f3),
    (0x800, 0xe7159475a2c29b7443b29c7fa6e889d9),
    (0x1000, 0xd097f3bdfd2022b8845ad8f792aa5825),
    (0x2000, 0xa9f746462d870fdf8a65dc1f90e061e5),
    (0x4000, 0x70d869a156d2a1b890bb3df62baf32f7),
    (0x8000, 0x31be135f97d08fd981231505542fcfa6),
    (0x10000, 0x9aa508b5b7a84e1c677de54f3e99bc9),
    (0x20000, 0x5d6af8dedb81196699c329225ee604),
    (0x40000, 0x2216e584f5fa1ea926041bedfe98),
    (0x80000, 0x48a170391f7dc42444e8fa2),
];

/// Returns `sqrt(1.0001^tick) * 2^96`.
///
/// This is the `priceAtBound` conversion for range bounds.
pub fn get_sqrt_ratio_at_tick(tick: i32) -> MathResult<U256> {
    if !(MIN_TICK..=MAX_TICK).contains(&tick) {
        return Err(MathError::TickOutOfBounds(tick));
    }
    let abs_tick = tick.unsigned_abs();

    let mut ratio = if abs_tick & 0x1 != 0 {
        U256::from(0xfffcb933bd6fad37aa2d162d1a594001u128)
    } else {
        U256::one() << 128
    };
    for (bit, multiplier) in BIT_MULTIPLIERS {
        if abs_tick & bit != 0 {
            // ratio <= 2^128 and multiplier < 2^128, so the product fits.
            ratio = (ratio * U256::from(multiplier)) >> 128;
        }
    }

    if tick > 0 {
        ratio = U256::MAX / ratio;
    }

    // Q128.128 -> Q64.96, rounding up so the result is never below the true value.
    let shifted = ratio >> 32;
    let remainder = ratio & U256::from(u32::MAX);
    Ok(if remainder.is_zero() {
        shifted
    } else {
        shifted + U256::one()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::fixed_point::q96;

    fn to_f64(value: U256) -> f64 {
        value.to_string().parse::<f64>().unwrap()
    }

    #[test]
    fn test_tick_zero_is_one() {
        assert_eq!(get_sqrt_ratio_at_tick(0).unwrap(), q96());
    }

    #[test]
    fn test_out_of_bounds() {
        assert_eq!(
            get_sqrt_ratio_at_tick(MAX_TICK + 1),
            Err(MathError::TickOutOfBounds(MAX_TICK + 1))
        );
        assert_eq!(
            get_sqrt_ratio_at_tick(MIN_TICK - 1),
            Err(MathError::TickOutOfBounds(MIN_TICK - 1))
        );
    }

    #[test]
    fn test_matches_float_approximation() {
        let q = to_f64(q96());
        for tick in [-60_000, -887, -10, -1, 1, 10, 887, 60_000] {
            let exact = to_f64(get_sqrt_ratio_at_tick(tick).unwrap()) / q;
            let approx = 1.0001f64.powf(tick as f64 / 2.0);
            assert!(
                ((exact - approx) / approx).abs() < 1e-9,
                "tick {tick}: {exact} vs {approx}"
            );
        }
    }

    #[test]
    fn test_monotonic() {
        let mut previous = get_sqrt_ratio_at_tick(-1000).unwrap();
        for tick in -999..=1000 {
            let current = get_sqrt_ratio_at_tick(tick).unwrap();
            assert!(current > previous);
            previous = current;
        }
    }

    #[test]
    fn test_extremes_within_bounds() {
        let low = get_sqrt_ratio_at_tick(MIN_TICK).unwrap();
        let high = get_sqrt_ratio_at_tick(MAX_TICK).unwrap();
        assert!(low >= min_sqrt_ratio() - U256::one());
        assert!(high <= max_sqrt_ratio() + U256::one());
        assert!(low < high);
    }
}
