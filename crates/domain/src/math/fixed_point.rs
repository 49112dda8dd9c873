use primitive_types::U256;

/// Number of fractional bits in a Q64.96 sqrt price.
pub const RESOLUTION_96: usize = 96;

/// Number of fractional bits in a Q128 fee growth accumulator.
pub const RESOLUTION_128: usize = 128;

/// `2^96` as a `U256`.
#[must_use]
pub fn q96() -> U256 {
    U256::one() << RESOLUTION_96
}

/// `2^128` as a `U256`.
#[must_use]
pub fn q128() -> U256 {
    U256::one() << RESOLUTION_128
}
