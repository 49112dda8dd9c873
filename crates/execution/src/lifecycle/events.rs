//! Lifecycle events for vault operations.

use clmm_vault_domain::value_objects::Address;
use serde::{Deserialize, Serialize};

/// Type of lifecycle event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VaultEventType {
    /// Tokens deposited, shares minted.
    Deposit,
    /// Shares burned, tokens withdrawn.
    Withdraw,
    /// Fees reinvested as liquidity.
    Compound,
}

/// A committed vault operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VaultEvent {
    /// Event ID.
    pub id: String,
    /// Event type.
    pub event_type: VaultEventType,
    /// Vault address.
    pub vault: Address,
    /// Account that triggered the operation.
    pub actor: Address,
    /// Timestamp.
    pub timestamp: chrono::DateTime<chrono::Utc>,
    /// Event-specific data.
    pub data: EventData,
}

impl VaultEvent {
    /// Creates a new lifecycle event.
    pub fn new(vault: Address, actor: Address, data: EventData) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            event_type: data.event_type(),
            vault,
            actor,
            timestamp: chrono::Utc::now(),
            data,
        }
    }
}

/// Event-specific data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventData {
    /// Deposit data.
    Deposit(DepositData),
    /// Withdraw data.
    Withdraw(WithdrawData),
    /// Compound data.
    Compound(CompoundData),
}

impl EventData {
    /// The event type this payload belongs to.
    #[must_use]
    pub fn event_type(&self) -> VaultEventType {
        match self {
            EventData::Deposit(_) => VaultEventType::Deposit,
            EventData::Withdraw(_) => VaultEventType::Withdraw,
            EventData::Compound(_) => VaultEventType::Compound,
        }
    }
}

/// Data for a deposit event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepositData {
    /// Shares minted to the actor.
    pub shares: u128,
    /// Liquidity added.
    pub liquidity_added: u128,
    /// Token0 paid.
    pub amount0: u128,
    /// Token1 paid.
    pub amount1: u128,
    /// Vault liquidity after the deposit.
    pub total_liquidity: u128,
    /// Share supply after the deposit.
    pub total_supply: u128,
}

/// Data for a withdraw event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithdrawData {
    /// Recipient of the tokens.
    pub recipient: Address,
    /// Shares burned.
    pub shares: u128,
    /// Liquidity removed.
    pub liquidity_removed: u128,
    /// Token0 delivered.
    pub amount0: u128,
    /// Token1 delivered.
    pub amount1: u128,
    /// Vault liquidity after the withdraw.
    pub total_liquidity: u128,
    /// Share supply after the withdraw.
    pub total_supply: u128,
}

/// Data for a compound event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompoundData {
    /// Token0 fees collected from the pool.
    pub fees_collected0: u128,
    /// Token1 fees collected from the pool.
    pub fees_collected1: u128,
    /// Liquidity added from fees.
    pub liquidity_added: u128,
    /// Token0 reinvested.
    pub amount0: u128,
    /// Token1 reinvested.
    pub amount1: u128,
    /// Vault liquidity after compounding.
    pub total_liquidity: u128,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vault_event_creation() {
        let event = VaultEvent::new(
            Address::from_low_u64_be(1),
            Address::from_low_u64_be(2),
            EventData::Deposit(DepositData {
                shares: 1000,
                liquidity_added: 1000,
                amount0: 50,
                amount1: 50,
                total_liquidity: 1000,
                total_supply: 1000,
            }),
        );

        assert_eq!(event.event_type, VaultEventType::Deposit);
        assert!(!event.id.is_empty());
    }

    #[test]
    fn test_event_serializes() {
        let event = VaultEvent::new(
            Address::from_low_u64_be(1),
            Address::from_low_u64_be(2),
            EventData::Compound(CompoundData {
                fees_collected0: 5,
                fees_collected1: 3,
                liquidity_added: 40,
                amount0: 5,
                amount1: 3,
                total_liquidity: 1040,
            }),
        );
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"Compound\""));
        assert!(json.contains("\"liquidity_added\":40"));
    }
}
