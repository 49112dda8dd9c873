//! Fixed point and concentrated liquidity math.
//!
//! All accounting paths use exact integer arithmetic over `U256` with
//! 512-bit intermediates. The decimal helpers in [`price_tick`] exist only
//! for display.

/// Liquidity <-> token amount conversions for a price range.
pub mod concentrated_liquidity;
/// Q64.96 / Q128 constants.
pub mod fixed_point;
/// Full precision multiply-divide.
pub mod full_math;
/// Human readable price helpers.
pub mod price_tick;
/// Token deltas between two sqrt prices with explicit rounding.
pub mod sqrt_price_math;
/// Tick to sqrt price conversion.
pub mod tick_math;
