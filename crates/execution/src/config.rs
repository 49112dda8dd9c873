//! Vault configuration.

use clmm_vault_domain::value_objects::TickRange;
use serde::{Deserialize, Serialize};

fn default_emit_events() -> bool {
    true
}

/// Configuration for a [`ShareVault`](crate::vault::ShareVault).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaultConfig {
    /// Range of the managed position.
    pub range: TickRange,
    /// Whether committed operations emit lifecycle events.
    #[serde(default = "default_emit_events")]
    pub emit_events: bool,
}

impl VaultConfig {
    /// Creates a configuration with events enabled.
    #[must_use]
    pub fn new(range: TickRange) -> Self {
        Self {
            range,
            emit_events: default_emit_events(),
        }
    }

    /// Enables or disables lifecycle events.
    #[must_use]
    pub fn with_events(mut self, emit_events: bool) -> Self {
        self.emit_events = emit_events;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_defaults() {
        let config: VaultConfig =
            serde_json::from_str(r#"{"range":{"lower":-600,"upper":600}}"#).unwrap();
        assert_eq!(config.range, TickRange::new(-600, 600).unwrap());
        assert!(config.emit_events);

        let quiet: VaultConfig = serde_json::from_str(
            r#"{"range":{"lower":-600,"upper":600},"emit_events":false}"#,
        )
        .unwrap();
        assert!(!quiet.emit_events);
    }

    #[test]
    fn test_deserialize_rejects_bad_range() {
        let result: Result<VaultConfig, _> =
            serde_json::from_str(r#"{"range":{"lower":600,"upper":-600}}"#);
        assert!(result.is_err());
    }
}
