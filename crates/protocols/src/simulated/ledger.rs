//! In-memory share ledger.

use crate::ledger::{LedgerError, ShareLedger};
use clmm_vault_domain::value_objects::Address;
use std::collections::HashMap;

/// `HashMap` backed [`ShareLedger`]. The ledger itself is its savepoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InMemoryShareLedger {
    balances: HashMap<Address, u128>,
    total_supply: u128,
}

impl InMemoryShareLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of accounts with a non-zero balance.
    #[must_use]
    pub fn holders(&self) -> usize {
        self.balances.values().filter(|balance| **balance > 0).count()
    }
}

impl ShareLedger for InMemoryShareLedger {
    type Savepoint = InMemoryShareLedger;

    fn total_supply(&self) -> u128 {
        self.total_supply
    }

    fn balance_of(&self, holder: Address) -> u128 {
        self.balances.get(&holder).copied().unwrap_or(0)
    }

    fn mint(&mut self, holder: Address, amount: u128) -> Result<(), LedgerError> {
        let total_supply = self
            .total_supply
            .checked_add(amount)
            .ok_or(LedgerError::SupplyOverflow)?;
        // balance <= total_supply, so this cannot overflow once the supply fits.
        *self.balances.entry(holder).or_default() += amount;
        self.total_supply = total_supply;
        Ok(())
    }

    fn burn(&mut self, holder: Address, amount: u128) -> Result<(), LedgerError> {
        let balance = self.balance_of(holder);
        if balance < amount {
            return Err(LedgerError::InsufficientBalance {
                holder,
                balance,
                requested: amount,
            });
        }
        self.balances.insert(holder, balance - amount);
        self.total_supply -= amount;
        Ok(())
    }

    fn savepoint(&self) -> Self::Savepoint {
        self.clone()
    }

    fn rollback(&mut self, savepoint: Self::Savepoint) {
        *self = savepoint;
    }
}
