//! Errors raised by the pure math and accounting layer.

use thiserror::Error;

/// Arithmetic and domain validation failures.
///
/// Every variant signals either bad input (an invalid range or tick) or a
/// broken accounting invariant. Callers must abort rather than continue with
/// a partially computed value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MathError {
    /// A division was attempted with a zero denominator.
    #[error("division by zero")]
    DivisionByZero,
    /// An intermediate or final value does not fit its target width.
    #[error("arithmetic overflow")]
    Overflow,
    /// A subtraction would go below zero.
    #[error("arithmetic underflow")]
    Underflow,
    /// Tick is outside `[MIN_TICK, MAX_TICK]`.
    #[error("tick {0} is out of bounds")]
    TickOutOfBounds(i32),
    /// Range bounds are not strictly ordered.
    #[error("invalid tick range [{lower}, {upper}]")]
    InvalidRange {
        /// Lower tick.
        lower: i32,
        /// Upper tick.
        upper: i32,
    },
    /// A sqrt price of zero was supplied where a positive one is required.
    #[error("sqrt price must be positive")]
    ZeroSqrtPrice,
    /// A fixed point value could not be represented as a decimal.
    #[error("conversion error: {0}")]
    Conversion(&'static str),
}

/// Result alias for the domain layer.
pub type MathResult<T> = Result<T, MathError>;
