//! Domain model for a fractionalized concentrated liquidity vault.
//!
//! - [`math`]: exact Q64.96 / Q128 arithmetic and liquidity conversions
//! - [`fees`]: fee growth accrual
//! - [`shares`]: share <-> liquidity ratios
//! - [`entities`]: the [`VaultPosition`](entities::VaultPosition) aggregate
//! - [`value_objects`]: ranges, addresses and recipients

pub mod entities;
pub mod error;
pub mod fees;
pub mod math;
pub mod shares;
pub mod value_objects;

pub use error::{MathError, MathResult};
