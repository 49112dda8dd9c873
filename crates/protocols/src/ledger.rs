//! Share ledger port.

use clmm_vault_domain::value_objects::Address;
use thiserror::Error;

/// Errors reported by a share ledger.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// Burn exceeds the holder's balance.
    #[error("holder {holder:?} has {balance} shares, cannot burn {requested}")]
    InsufficientBalance {
        /// Holder.
        holder: Address,
        /// Current balance.
        balance: u128,
        /// Shares requested.
        requested: u128,
    },
    /// Mint would overflow the total supply.
    #[error("total supply overflow")]
    SupplyOverflow,
}

/// Fungible share bookkeeping consumed by the vault.
pub trait ShareLedger: Send + Sync {
    /// Opaque state captured by [`savepoint`](ShareLedger::savepoint).
    type Savepoint: Send;

    /// Total shares outstanding.
    fn total_supply(&self) -> u128;

    /// Shares held by `holder`.
    fn balance_of(&self, holder: Address) -> u128;

    /// Credits `amount` new shares to `holder`.
    fn mint(&mut self, holder: Address, amount: u128) -> Result<(), LedgerError>;

    /// Destroys `amount` of `holder`'s shares. Fails if the balance is short.
    fn burn(&mut self, holder: Address, amount: u128) -> Result<(), LedgerError>;

    /// Captures the ledger state.
    fn savepoint(&self) -> Self::Savepoint;

    /// Restores a captured state.
    fn rollback(&mut self, savepoint: Self::Savepoint);
}
