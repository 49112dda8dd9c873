//! Vault lifecycle events.
//!
//! Records committed operations:
//! - Deposits
//! - Withdrawals
//! - Fee compounding

mod events;
mod sink;

pub use events::*;
pub use sink::*;
