//! Fee growth accounting.
//!
//! Pools publish a per-liquidity-unit fee accumulator in Q128. A position's
//! earnings since its last checkpoint are `(now - last) * liquidity / 2^128`.

use crate::error::MathResult;
use crate::math::fixed_point::q128;
use crate::math::full_math::{mul_div, to_u128};
use primitive_types::U256;
use serde::{Deserialize, Serialize};

/// Fee growth inside a range for both tokens, Q128 per unit of liquidity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeGrowth {
    /// Token0 accumulator.
    pub inside0: U256,
    /// Token1 accumulator.
    pub inside1: U256,
}

impl FeeGrowth {
    /// Creates a checkpoint pair.
    #[must_use]
    pub fn new(inside0: U256, inside1: U256) -> Self {
        Self { inside0, inside1 }
    }
}

/// Fee tokens credited by one refresh.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeDelta {
    /// Token0 credited.
    pub fees0: u128,
    /// Token1 credited.
    pub fees1: u128,
}

impl FeeDelta {
    /// True when nothing was credited.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.fees0 == 0 && self.fees1 == 0
    }
}

/// Tokens earned by `liquidity` while the accumulator moved from `last` to `now`.
///
/// The accumulator is modular, so the difference wraps like the pool's own
/// bookkeeping does.
pub fn accrued_fees(last: U256, now: U256, liquidity: u128) -> MathResult<u128> {
    let (delta, _) = now.overflowing_sub(last);
    to_u128(mul_div(delta, U256::from(liquidity), q128())?)
}
