//! Conversion between vault shares and liquidity units.
//!
//! All conversions floor, so the vault never mints or returns more than a
//! holder proportionally earned.

use crate::error::{MathError, MathResult};
use crate::math::full_math::{mul_div, to_u128};
use primitive_types::U256;

/// One full fixed point unit of liquidity per share.
pub const PRECISION: u128 = 1_000_000_000_000_000_000;

/// Shares to mint for `added_liquidity`, given pre-deposit state.
///
/// The first deposit mints 1:1.
pub fn shares_for_deposit(
    added_liquidity: u128,
    existing_liquidity: u128,
    existing_total_supply: u128,
) -> MathResult<u128> {
    if existing_total_supply == 0 {
        return Ok(added_liquidity);
    }
    to_u128(mul_div(
        U256::from(existing_total_supply),
        U256::from(added_liquidity),
        U256::from(existing_liquidity),
    )?)
}

/// Liquidity released by burning `shares_burned`, given pre-burn state.
///
/// Callers must ensure `shares_burned <= existing_total_supply`.
pub fn liquidity_for_withdraw(
    shares_burned: u128,
    existing_liquidity: u128,
    existing_total_supply: u128,
) -> MathResult<u128> {
    if shares_burned > existing_total_supply {
        return Err(MathError::Overflow);
    }
    to_u128(mul_div(
        U256::from(existing_liquidity),
        U256::from(shares_burned),
        U256::from(existing_total_supply),
    )?)
}

/// Liquidity backing one full share, scaled by [`PRECISION`].
pub fn liquidity_per_share(liquidity: u128, total_supply: u128) -> MathResult<u128> {
    if total_supply == 0 {
        return Ok(PRECISION);
    }
    to_u128(mul_div(
        U256::from(liquidity),
        U256::from(PRECISION),
        U256::from(total_supply),
    )?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bootstrap_is_one_to_one() {
        assert_eq!(shares_for_deposit(12_345, 0, 0).unwrap(), 12_345);
    }

    #[test]
    fn test_proportional_deposit_floors() {
        // 1000 shares over 3000 liquidity; adding 1000 liquidity -> 333.33 -> 333
        assert_eq!(shares_for_deposit(1000, 3000, 1000).unwrap(), 333);
        // Compounded vault: 2000 liquidity backs 1000 shares.
        assert_eq!(shares_for_deposit(500, 2000, 1000).unwrap(), 250);
    }

    #[test]
    fn test_withdraw_floors_and_is_bounded() {
        assert_eq!(liquidity_for_withdraw(1, 10, 3).unwrap(), 3);
        assert_eq!(liquidity_for_withdraw(3, 10, 3).unwrap(), 10);
        assert_eq!(liquidity_for_withdraw(4, 10, 3), Err(MathError::Overflow));
        assert_eq!(
            liquidity_for_withdraw(0, 10, 0),
            Err(MathError::DivisionByZero)
        );
    }

    #[test]
    fn test_wide_intermediate() {
        let big = u128::MAX / 2;
        assert_eq!(shares_for_deposit(big, big, big).unwrap(), big);
        assert_eq!(liquidity_for_withdraw(big, big, big).unwrap(), big);
    }

    #[test]
    fn test_monotonicity() {
        let (liquidity, supply) = (7_919u128, 5_003u128);
        let mut previous = 0;
        for added in 0..2_000u128 {
            let shares = shares_for_deposit(added, liquidity, supply).unwrap();
            assert!(shares >= previous);
            previous = shares;
        }
        let mut previous = 0;
        for burned in 0..=supply {
            let removed = liquidity_for_withdraw(burned, liquidity, supply).unwrap();
            assert!(removed >= previous);
            assert!(removed <= liquidity);
            previous = removed;
        }
    }

    #[test]
    fn test_liquidity_per_share() {
        assert_eq!(liquidity_per_share(0, 0).unwrap(), PRECISION);
        assert_eq!(liquidity_per_share(2000, 1000).unwrap(), 2 * PRECISION);
        assert_eq!(liquidity_per_share(1, 3).unwrap(), PRECISION / 3);
    }
}
