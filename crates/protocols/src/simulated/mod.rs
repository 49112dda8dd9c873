//! In-memory collaborators for simulation and tests.
//!
//! This module provides:
//! - A concentrated liquidity pool with fee growth accounting
//! - A fungible share ledger

/// Share ledger.
pub mod ledger;
/// Simulated pool.
pub mod pool;

pub use ledger::InMemoryShareLedger;
pub use pool::{PoolState, SimulatedPool};
