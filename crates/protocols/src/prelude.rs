//! Prelude module for convenient imports.
//!
//! # Example
//!
//! ```rust
//! use clmm_vault_protocols::prelude::*;
//! ```

pub use crate::deadline::{DeadlineError, DeadlineValidator, FixedClock, SystemClock};
pub use crate::ledger::{LedgerError, ShareLedger};
pub use crate::pool::{
    AddLiquidityParams, AddedLiquidity, PoolClient, PoolError, PositionAccrual, PositionKey,
};
pub use crate::simulated::{InMemoryShareLedger, PoolState, SimulatedPool};
