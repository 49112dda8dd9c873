//! The share vault: one concentrated liquidity position split into shares.
//!
//! Every mutating operation follows the same discipline: read the position
//! and share supply up front, talk to the pool, compute the next position as
//! a value, and only then commit it. Pool and ledger savepoints are taken on
//! entry and restored on any failure, so an operation either fully applies
//! or leaves nothing behind.

mod compound;
mod deposit;
mod valuation;
mod withdraw;

pub use compound::CompoundResult;
pub use deposit::{DepositParams, DepositResult};
pub use valuation::ShareValuation;
pub use withdraw::{WithdrawParams, WithdrawResult};

use crate::config::VaultConfig;
use crate::error::VaultError;
use crate::lifecycle::{EventData, EventSink, TracingSink, VaultEvent};
use clmm_vault_domain::entities::VaultPosition;
use clmm_vault_domain::value_objects::{Address, TickRange};
use clmm_vault_protocols::deadline::DeadlineValidator;
use clmm_vault_protocols::ledger::ShareLedger;
use clmm_vault_protocols::pool::{PoolClient, PositionKey};
use tracing::warn;

/// Collaborator state captured at the start of an operation.
struct Savepoint<P: PoolClient, L: ShareLedger> {
    pool: P::Savepoint,
    ledger: L::Savepoint,
}

/// Vault over a single fixed-range position.
pub struct ShareVault<P, L, D>
where
    P: PoolClient,
    L: ShareLedger,
    D: DeadlineValidator,
{
    address: Address,
    config: VaultConfig,
    position: VaultPosition,
    pool: P,
    ledger: L,
    deadline: D,
    sink: Box<dyn EventSink>,
}

impl<P, L, D> ShareVault<P, L, D>
where
    P: PoolClient,
    L: ShareLedger,
    D: DeadlineValidator,
{
    /// Creates an empty vault that logs its events.
    pub fn new(address: Address, config: VaultConfig, pool: P, ledger: L, deadline: D) -> Self {
        Self {
            address,
            position: VaultPosition::new(config.range),
            config,
            pool,
            ledger,
            deadline,
            sink: Box::new(TracingSink),
        }
    }

    /// Replaces the event sink.
    #[must_use]
    pub fn with_sink(mut self, sink: impl EventSink + 'static) -> Self {
        self.sink = Box::new(sink);
        self
    }

    /// The vault's own account.
    pub fn address(&self) -> Address {
        self.address
    }

    /// Vault configuration.
    pub fn config(&self) -> &VaultConfig {
        &self.config
    }

    /// Last committed position.
    pub fn position(&self) -> &VaultPosition {
        &self.position
    }

    /// The position's range.
    pub fn range(&self) -> TickRange {
        self.position.range
    }

    /// Key of the vault's position in the pool.
    pub fn position_key(&self) -> PositionKey {
        PositionKey::new(self.address, self.position.range)
    }

    /// Total shares outstanding.
    pub fn total_supply(&self) -> u128 {
        self.ledger.total_supply()
    }

    /// Shares held by `holder`.
    pub fn balance_of(&self, holder: Address) -> u128 {
        self.ledger.balance_of(holder)
    }

    /// The underlying pool.
    pub fn pool(&self) -> &P {
        &self.pool
    }

    /// Mutable access to the underlying pool.
    pub fn pool_mut(&mut self) -> &mut P {
        &mut self.pool
    }

    /// The share ledger.
    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    fn savepoint(&self) -> Savepoint<P, L> {
        Savepoint {
            pool: self.pool.savepoint(),
            ledger: self.ledger.savepoint(),
        }
    }

    fn rollback(&mut self, savepoint: Savepoint<P, L>, operation: &'static str, error: &VaultError) {
        warn!(operation, error = %error, kind = ?error.kind(), "Rolling back");
        self.pool.rollback(savepoint.pool);
        self.ledger.rollback(savepoint.ledger);
    }

    fn commit(&mut self, next: VaultPosition) {
        self.position = next;
    }

    fn emit(&self, actor: Address, data: EventData) {
        if self.config.emit_events {
            self.sink.emit(&VaultEvent::new(self.address, actor, data));
        }
    }
}
