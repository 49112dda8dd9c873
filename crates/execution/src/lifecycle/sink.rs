//! Destinations for lifecycle events.

use super::{EventData, VaultEvent};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::info;

/// Receives committed vault events.
pub trait EventSink: Send + Sync {
    /// Handles one event.
    fn emit(&self, event: &VaultEvent);
}

/// Logs events through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn emit(&self, event: &VaultEvent) {
        match &event.data {
            EventData::Deposit(data) => info!(
                event_id = %event.id,
                actor = ?event.actor,
                shares = data.shares,
                liquidity_added = data.liquidity_added,
                amount0 = data.amount0,
                amount1 = data.amount1,
                total_supply = data.total_supply,
                "Deposit"
            ),
            EventData::Withdraw(data) => info!(
                event_id = %event.id,
                actor = ?event.actor,
                recipient = ?data.recipient,
                shares = data.shares,
                liquidity_removed = data.liquidity_removed,
                amount0 = data.amount0,
                amount1 = data.amount1,
                total_supply = data.total_supply,
                "Withdraw"
            ),
            EventData::Compound(data) => info!(
                event_id = %event.id,
                actor = ?event.actor,
                fees_collected0 = data.fees_collected0,
                fees_collected1 = data.fees_collected1,
                liquidity_added = data.liquidity_added,
                total_liquidity = data.total_liquidity,
                "Compound"
            ),
        }
    }
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSink;

impl EventSink for NoopSink {
    fn emit(&self, _event: &VaultEvent) {}
}

/// Keeps events in memory. Clones share the same buffer.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    events: Arc<Mutex<Vec<VaultEvent>>>,
}

impl RecordingSink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Events recorded so far.
    #[must_use]
    pub fn events(&self) -> Vec<VaultEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl EventSink for RecordingSink {
    fn emit(&self, event: &VaultEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event.clone());
    }
}
