//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types from the crate.
//!
//! # Example
//!
//! ```rust
//! use clmm_vault_execution::prelude::*;
//! ```

// Config
pub use crate::config::VaultConfig;

// Errors
pub use crate::error::{ErrorKind, VaultError, VaultResult};

// Lifecycle
pub use crate::lifecycle::{
    CompoundData, DepositData, EventData, EventSink, NoopSink, RecordingSink, TracingSink,
    VaultEvent, VaultEventType, WithdrawData,
};

// Strategy
pub use crate::strategy::{ReinvestSide, ReinvestmentPlan, plan_reinvestment};

// Vault
pub use crate::vault::{
    CompoundResult, DepositParams, DepositResult, ShareValuation, ShareVault, WithdrawParams,
    WithdrawResult,
};
