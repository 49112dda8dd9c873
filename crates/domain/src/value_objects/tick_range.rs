use crate::error::{MathError, MathResult};
use crate::math::tick_math::{MAX_TICK, MIN_TICK, get_sqrt_ratio_at_tick};
use primitive_types::U256;
use serde::{Deserialize, Serialize};

/// Where the current price sits relative to a range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PricePosition {
    /// Price at or below the lower bound; the range holds only token0.
    Below,
    /// Price strictly inside the range; both tokens are held.
    Inside,
    /// Price at or above the upper bound; the range holds only token1.
    Above,
}

/// Raw serialized form of a [`TickRange`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TickBounds {
    /// Lower tick.
    pub lower: i32,
    /// Upper tick.
    pub upper: i32,
}

/// Immutable price range of a position, in ticks.
///
/// Construction validates ordering and bounds, and caches the sqrt prices of
/// both ends so later conversions cannot fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "TickBounds", into = "TickBounds")]
pub struct TickRange {
    lower: i32,
    upper: i32,
    sqrt_ratio_lower: U256,
    sqrt_ratio_upper: U256,
}

impl TickRange {
    /// Creates a range, rejecting unordered or out of bounds ticks.
    pub fn new(lower: i32, upper: i32) -> MathResult<Self> {
        if lower >= upper {
            return Err(MathError::InvalidRange { lower, upper });
        }
        if lower < MIN_TICK {
            return Err(MathError::TickOutOfBounds(lower));
        }
        if upper > MAX_TICK {
            return Err(MathError::TickOutOfBounds(upper));
        }
        Ok(Self {
            lower,
            upper,
            sqrt_ratio_lower: get_sqrt_ratio_at_tick(lower)?,
            sqrt_ratio_upper: get_sqrt_ratio_at_tick(upper)?,
        })
    }

    /// Lower tick.
    #[must_use]
    pub fn lower(&self) -> i32 {
        self.lower
    }

    /// Upper tick.
    #[must_use]
    pub fn upper(&self) -> i32 {
        self.upper
    }

    /// Sqrt price (Q64.96) at the lower bound.
    #[must_use]
    pub fn sqrt_ratio_lower(&self) -> U256 {
        self.sqrt_ratio_lower
    }

    /// Sqrt price (Q64.96) at the upper bound.
    #[must_use]
    pub fn sqrt_ratio_upper(&self) -> U256 {
        self.sqrt_ratio_upper
    }

    /// Classifies a sqrt price against the range.
    #[must_use]
    pub fn price_position(&self, sqrt_price: U256) -> PricePosition {
        if sqrt_price <= self.sqrt_ratio_lower {
            PricePosition::Below
        } else if sqrt_price < self.sqrt_ratio_upper {
            PricePosition::Inside
        } else {
            PricePosition::Above
        }
    }

    /// Whether the range earns fees at `sqrt_price`.
    #[must_use]
    pub fn contains_sqrt_price(&self, sqrt_price: U256) -> bool {
        sqrt_price >= self.sqrt_ratio_lower && sqrt_price < self.sqrt_ratio_upper
    }
}

impl TryFrom<TickBounds> for TickRange {
    type Error = MathError;

    fn try_from(bounds: TickBounds) -> Result<Self, Self::Error> {
        Self::new(bounds.lower, bounds.upper)
    }
}

impl From<TickRange> for TickBounds {
    fn from(range: TickRange) -> Self {
        Self {
            lower: range.lower,
            upper: range.upper,
        }
    }
}

impl std::fmt::Display for TickRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}]", self.lower, self.upper)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_validation() {
        assert!(TickRange::new(-600, 600).is_ok());
        assert_eq!(
            TickRange::new(600, 600),
            Err(MathError::InvalidRange {
                lower: 600,
                upper: 600
            })
        );
        assert_eq!(
            TickRange::new(MIN_TICK - 1, 0),
            Err(MathError::TickOutOfBounds(MIN_TICK - 1))
        );
        assert_eq!(
            TickRange::new(0, MAX_TICK + 1),
            Err(MathError::TickOutOfBounds(MAX_TICK + 1))
        );
    }

    #[test]
    fn test_price_position() {
        let range = TickRange::new(-600, 600).unwrap();
        let below = get_sqrt_ratio_at_tick(-601).unwrap();
        let at_lower = range.sqrt_ratio_lower();
        let mid = get_sqrt_ratio_at_tick(0).unwrap();
        let at_upper = range.sqrt_ratio_upper();

        assert_eq!(range.price_position(below), PricePosition::Below);
        assert_eq!(range.price_position(at_lower), PricePosition::Below);
        assert_eq!(range.price_position(mid), PricePosition::Inside);
        assert_eq!(range.price_position(at_upper), PricePosition::Above);

        assert!(range.contains_sqrt_price(at_lower));
        assert!(!range.contains_sqrt_price(at_upper));
    }

    #[test]
    fn test_try_from_bounds() {
        let range = TickRange::try_from(TickBounds {
            lower: -60,
            upper: 60,
        })
        .unwrap();
        assert_eq!(range.lower(), -60);
        assert_eq!(TickBounds::from(range).upper, 60);

        assert!(
            TickRange::try_from(TickBounds {
                lower: 60,
                upper: -60
            })
            .is_err()
        );
    }
}
