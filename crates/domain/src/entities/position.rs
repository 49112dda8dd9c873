use crate::error::{MathError, MathResult};
use crate::fees::{FeeDelta, FeeGrowth, accrued_fees};
use crate::value_objects::tick_range::TickRange;
use serde::{Deserialize, Serialize};

/// The single position a vault manages, as one aggregate value.
///
/// Every transition returns a new value instead of mutating in place so a
/// coordinator can compute the next state across external calls and commit
/// it as its last action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaultPosition {
    /// Immutable price range.
    pub range: TickRange,
    /// Deployed liquidity units.
    pub liquidity: u128,
    /// Fee growth inside the range as of the last touch.
    pub fee_growth_inside_last: FeeGrowth,
    /// Token0 fees accrued but not yet collected.
    pub fees_owed0: u128,
    /// Token1 fees accrued but not yet collected.
    pub fees_owed1: u128,
}

impl VaultPosition {
    /// Creates an empty position over `range`.
    #[must_use]
    pub fn new(range: TickRange) -> Self {
        Self {
            range,
            liquidity: 0,
            fee_growth_inside_last: FeeGrowth::default(),
            fees_owed0: 0,
            fees_owed1: 0,
        }
    }

    /// Credits fees earned by `existing_liquidity` since the last checkpoint
    /// and moves the checkpoint to `current`.
    ///
    /// `existing_liquidity` must be the liquidity in effect before any add or
    /// remove performed by the same operation.
    pub fn refreshed(
        &self,
        existing_liquidity: u128,
        current: FeeGrowth,
    ) -> MathResult<(Self, FeeDelta)> {
        let delta = FeeDelta {
            fees0: accrued_fees(
                self.fee_growth_inside_last.inside0,
                current.inside0,
                existing_liquidity,
            )?,
            fees1: accrued_fees(
                self.fee_growth_inside_last.inside1,
                current.inside1,
                existing_liquidity,
            )?,
        };

        let next = Self {
            fee_growth_inside_last: current,
            fees_owed0: self
                .fees_owed0
                .checked_add(delta.fees0)
                .ok_or(MathError::Overflow)?,
            fees_owed1: self
                .fees_owed1
                .checked_add(delta.fees1)
                .ok_or(MathError::Overflow)?,
            ..*self
        };
        Ok((next, delta))
    }

    /// Returns the position with `added` more liquidity.
    pub fn with_added_liquidity(&self, added: u128) -> MathResult<Self> {
        Ok(Self {
            liquidity: self.liquidity.checked_add(added).ok_or(MathError::Overflow)?,
            ..*self
        })
    }

    /// Returns the position with `removed` less liquidity.
    pub fn with_removed_liquidity(&self, removed: u128) -> MathResult<Self> {
        Ok(Self {
            liquidity: self
                .liquidity
                .checked_sub(removed)
                .ok_or(MathError::Underflow)?,
            ..*self
        })
    }

    /// Returns the position after `collected0`/`collected1` fees left the pool.
    pub fn with_fees_collected(&self, collected0: u128, collected1: u128) -> MathResult<Self> {
        Ok(Self {
            fees_owed0: self
                .fees_owed0
                .checked_sub(collected0)
                .ok_or(MathError::Underflow)?,
            fees_owed1: self
                .fees_owed1
                .checked_sub(collected1)
                .ok_or(MathError::Underflow)?,
            ..*self
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::fixed_point::q128;
    use primitive_types::U256;

    fn position() -> VaultPosition {
        VaultPosition::new(TickRange::new(-600, 600).unwrap())
    }

    #[test]
    fn test_new_position_is_empty() {
        let p = position();
        assert_eq!(p.liquidity, 0);
        assert_eq!(p.fees_owed0, 0);
        assert_eq!(p.fees_owed1, 0);
        assert_eq!(p.fee_growth_inside_last, FeeGrowth::default());
    }

    #[test]
    fn test_refresh_credits_with_existing_liquidity() {
        let p = position().with_added_liquidity(1000).unwrap();
        let growth = FeeGrowth::new(q128() * U256::from(2u64), q128() / U256::from(4u64));

        let (next, delta) = p.refreshed(p.liquidity, growth).unwrap();
        assert_eq!(delta, FeeDelta { fees0: 2000, fees1: 250 });
        assert_eq!(next.fees_owed0, 2000);
        assert_eq!(next.fees_owed1, 250);
        assert_eq!(next.fee_growth_inside_last, growth);
        assert_eq!(next.liquidity, 1000);

        // A second refresh at the same growth adds nothing.
        let (again, delta) = next.refreshed(next.liquidity, growth).unwrap();
        assert!(delta.is_zero());
        assert_eq!(again, next);
    }

    #[test]
    fn test_refresh_with_zero_liquidity_only_moves_checkpoint() {
        let growth = FeeGrowth::new(q128(), q128());
        let (next, delta) = position().refreshed(0, growth).unwrap();
        assert!(delta.is_zero());
        assert_eq!(next.fee_growth_inside_last, growth);
    }

    #[test]
    fn test_liquidity_transitions() {
        let p = position().with_added_liquidity(500).unwrap();
        assert_eq!(p.with_removed_liquidity(200).unwrap().liquidity, 300);
        assert_eq!(p.with_removed_liquidity(501), Err(MathError::Underflow));
        assert_eq!(
            p.with_added_liquidity(u128::MAX),
            Err(MathError::Overflow)
        );
    }

    #[test]
    fn test_fees_collected_cannot_exceed_owed() {
        let mut p = position();
        p.fees_owed0 = 10;
        p.fees_owed1 = 5;
        let after = p.with_fees_collected(10, 3).unwrap();
        assert_eq!((after.fees_owed0, after.fees_owed1), (0, 2));
        assert_eq!(p.with_fees_collected(11, 0), Err(MathError::Underflow));
    }
}
