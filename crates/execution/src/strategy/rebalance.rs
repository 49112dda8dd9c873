//! Fee reinvestment planning.
//!
//! Splits two claimable fee balances into the largest liquidity increase the
//! range accepts at the current price. Whatever cannot be paired stays owed.

use clmm_vault_domain::math::concentrated_liquidity::{
    get_amount0_for_liquidity, get_amount1_for_liquidity, get_liquidity_for_amount0,
    get_liquidity_for_amount1,
};
use clmm_vault_domain::value_objects::{PricePosition, TickRange};
use clmm_vault_domain::MathResult;
use primitive_types::U256;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Which balance limits the reinvestment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReinvestSide {
    /// Price at or below the range: only token0 can be deployed.
    Token0Only,
    /// Price at or above the range: only token1 can be deployed.
    Token1Only,
    /// Price inside the range, token0 runs out first.
    Balanced0Bound,
    /// Price inside the range, token1 runs out first.
    Balanced1Bound,
}

/// Amounts to collect and reinvest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReinvestmentPlan {
    /// Binding side.
    pub side: ReinvestSide,
    /// Liquidity the amounts buy.
    pub liquidity: u128,
    /// Token0 to collect.
    pub amount0: u128,
    /// Token1 to collect.
    pub amount1: u128,
}

impl ReinvestmentPlan {
    /// True when nothing can be reinvested.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.liquidity == 0
    }
}

/// Plans the reinvestment of `amount0`/`amount1` into `range` at `sqrt_price`.
///
/// The returned amounts never exceed the inputs.
pub fn plan_reinvestment(
    sqrt_price: U256,
    range: &TickRange,
    amount0: u128,
    amount1: u128,
) -> MathResult<ReinvestmentPlan> {
    let lower = range.sqrt_ratio_lower();
    let upper = range.sqrt_ratio_upper();

    let plan = match range.price_position(sqrt_price) {
        PricePosition::Below => {
            let liquidity = get_liquidity_for_amount0(lower, upper, amount0)?;
            let paired = get_amount1_for_liquidity(lower, upper, liquidity)?;
            ReinvestmentPlan {
                side: ReinvestSide::Token0Only,
                liquidity,
                amount0,
                amount1: paired.min(amount1),
            }
        }
        PricePosition::Above => {
            let liquidity = get_liquidity_for_amount1(lower, upper, amount1)?;
            let paired = get_amount0_for_liquidity(lower, upper, liquidity)?;
            ReinvestmentPlan {
                side: ReinvestSide::Token1Only,
                liquidity,
                amount0: paired.min(amount0),
                amount1,
            }
        }
        PricePosition::Inside => {
            let liquidity0 = get_liquidity_for_amount0(sqrt_price, upper, amount0)?;
            let liquidity1 = get_liquidity_for_amount1(lower, sqrt_price, amount1)?;
            if liquidity0 < liquidity1 {
                let paired = get_amount1_for_liquidity(lower, sqrt_price, liquidity0)?;
                ReinvestmentPlan {
                    side: ReinvestSide::Balanced0Bound,
                    liquidity: liquidity0,
                    amount0,
                    amount1: paired.min(amount1),
                }
            } else {
                let paired = get_amount0_for_liquidity(sqrt_price, upper, liquidity1)?;
                ReinvestmentPlan {
                    side: ReinvestSide::Balanced1Bound,
                    liquidity: liquidity1,
                    amount0: paired.min(amount0),
                    amount1,
                }
            }
        }
    };

    debug!(
        side = ?plan.side,
        liquidity = plan.liquidity,
        amount0 = plan.amount0,
        amount1 = plan.amount1,
        available0 = amount0,
        available1 = amount1,
        "Planned reinvestment"
    );
    Ok(plan)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clmm_vault_domain::math::tick_math::get_sqrt_ratio_at_tick;

    fn range() -> TickRange {
        TickRange::new(-6000, 6000).unwrap()
    }

    #[test]
    fn test_below_range_uses_token0() {
        let range = range();
        let price = get_sqrt_ratio_at_tick(-7000).unwrap();
        let plan = plan_reinvestment(price, &range, 500, 300).unwrap();

        let expected =
            get_liquidity_for_amount0(range.sqrt_ratio_lower(), range.sqrt_ratio_upper(), 500)
                .unwrap();
        assert_eq!(plan.side, ReinvestSide::Token0Only);
        assert_eq!(plan.liquidity, expected);
        assert_eq!(plan.amount0, 500);
        assert!(plan.amount1 <= 300);
    }

    #[test]
    fn test_at_lower_bound_counts_as_below() {
        let range = range();
        let plan = plan_reinvestment(range.sqrt_ratio_lower(), &range, 500, 300).unwrap();
        assert_eq!(plan.side, ReinvestSide::Token0Only);
    }

    #[test]
    fn test_above_range_uses_token1() {
        let range = range();
        let price = get_sqrt_ratio_at_tick(6000).unwrap();
        let plan = plan_reinvestment(price, &range, 500, 300).unwrap();

        let expected =
            get_liquidity_for_amount1(range.sqrt_ratio_lower(), range.sqrt_ratio_upper(), 300)
                .unwrap();
        assert_eq!(plan.side, ReinvestSide::Token1Only);
        assert_eq!(plan.liquidity, expected);
        assert_eq!(plan.amount1, 300);
        assert!(plan.amount0 <= 500);
    }

    #[test]
    fn test_inside_range_binds_scarcer_token() {
        let range = range();
        let price = get_sqrt_ratio_at_tick(0).unwrap();

        let plan = plan_reinvestment(price, &range, 100, 1_000_000).unwrap();
        assert_eq!(plan.side, ReinvestSide::Balanced0Bound);
        assert_eq!(plan.amount0, 100);
        assert!(plan.amount1 < 1_000_000);

        let plan = plan_reinvestment(price, &range, 1_000_000, 100).unwrap();
        assert_eq!(plan.side, ReinvestSide::Balanced1Bound);
        assert_eq!(plan.amount1, 100);
        assert!(plan.amount0 < 1_000_000);
    }

    #[test]
    fn test_inside_range_roughly_balanced_at_midpoint() {
        let range = range();
        let price = get_sqrt_ratio_at_tick(0).unwrap();
        let plan = plan_reinvestment(price, &range, 1_000_000, 1_000_000).unwrap();
        // Symmetric range around tick 0 needs about equal amounts.
        assert!(plan.amount0 > 999_000);
        assert!(plan.amount1 > 999_000);
    }

    #[test]
    fn test_zero_fees_plan_is_empty() {
        let range = range();
        for tick in [-7000, 0, 7000] {
            let price = get_sqrt_ratio_at_tick(tick).unwrap();
            let plan = plan_reinvestment(price, &range, 0, 0).unwrap();
            assert!(plan.is_empty());
            assert_eq!((plan.amount0, plan.amount1), (0, 0));
        }
    }

    #[test]
    fn test_missing_token_inside_range_is_empty() {
        let range = range();
        let price = get_sqrt_ratio_at_tick(0).unwrap();
        let plan = plan_reinvestment(price, &range, 500, 0).unwrap();
        assert!(plan.is_empty());
        assert_eq!(plan.amount1, 0);
    }
}
