//! Share vault coordinators over a concentrated liquidity position.
//!
//! This crate provides:
//! - [`vault::ShareVault`] with deposit, withdraw, compound and valuation
//! - Fee reinvestment planning
//! - Lifecycle events and sinks
//! - Vault configuration and the error taxonomy

/// Prelude module for convenient imports.
pub mod prelude;

/// Vault configuration.
pub mod config;
/// Vault errors.
pub mod error;
/// Vault lifecycle events.
pub mod lifecycle;
/// Fee reinvestment strategy.
pub mod strategy;
/// Share vault coordinators.
pub mod vault;
