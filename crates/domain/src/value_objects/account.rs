use primitive_types::H160;
use serde::{Deserialize, Serialize};

/// Account identifier for actors, recipients and the vault itself.
pub type Address = H160;

/// Destination of withdrawn tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Recipient {
    /// Deliver straight to this account.
    Account(Address),
    /// Keep the tokens in the vault so they can be post-processed (for
    /// example unwrapped) before final delivery.
    Vault,
}

impl Recipient {
    /// Resolves the sentinel against the vault's own address.
    #[must_use]
    pub fn resolve(self, vault: Address) -> Address {
        match self {
            Recipient::Account(address) => address,
            Recipient::Vault => vault,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve() {
        let vault = Address::from_low_u64_be(1);
        let user = Address::from_low_u64_be(2);
        assert_eq!(Recipient::Vault.resolve(vault), vault);
        assert_eq!(Recipient::Account(user).resolve(vault), user);
    }
}
