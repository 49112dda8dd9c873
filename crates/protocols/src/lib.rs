//! Collaborator ports for the vault and their in-memory adapters.
//!
//! - [`pool`]: the concentrated liquidity pool the vault's position lives in
//! - [`ledger`]: fungible share bookkeeping
//! - [`deadline`]: expiry checks against a clock
//! - [`simulated`]: in-memory implementations

/// Prelude module for convenient imports.
pub mod prelude;

pub mod deadline;
pub mod ledger;
pub mod pool;
pub mod simulated;
