//! Vault error taxonomy.

use clmm_vault_domain::error::MathError;
use clmm_vault_protocols::deadline::DeadlineError;
use clmm_vault_protocols::ledger::LedgerError;
use clmm_vault_protocols::pool::PoolError;
use thiserror::Error;

/// Coarse classification of a [`VaultError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Request the vault cannot honor: bad input, or a deposit too small to mint a share.
    Validation,
    /// Output fell below a caller minimum.
    Slippage,
    /// A collaborator rejected the call.
    External,
    /// A broken accounting invariant.
    Arithmetic,
}

/// Errors returned by vault operations. Any error means nothing was committed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VaultError {
    /// The caller's deadline has passed.
    #[error(transparent)]
    DeadlineExpired(#[from] DeadlineError),
    /// Withdraw requested with zero shares.
    #[error("withdraw requires a non-zero share amount")]
    ZeroShares,
    /// Deposit bought liquidity worth less than one share.
    #[error("deposit of {liquidity} liquidity mints zero shares")]
    ZeroSharesMinted {
        /// Liquidity the deposit added.
        liquidity: u128,
    },
    /// Collected amounts are below the caller's minimums.
    #[error(
        "price slippage check: received ({amount0}, {amount1}), required at least ({amount0_min}, {amount1_min})"
    )]
    Slippage {
        /// Token0 received.
        amount0: u128,
        /// Token1 received.
        amount1: u128,
        /// Token0 minimum.
        amount0_min: u128,
        /// Token1 minimum.
        amount1_min: u128,
    },
    /// The pool failed.
    #[error("pool: {0}")]
    Pool(#[from] PoolError),
    /// The share ledger failed.
    #[error("share ledger: {0}")]
    Ledger(#[from] LedgerError),
    /// Accounting arithmetic failed.
    #[error("arithmetic: {0}")]
    Math(#[from] MathError),
}

impl VaultError {
    /// Classifies the error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            VaultError::DeadlineExpired(_)
            | VaultError::ZeroShares
            | VaultError::ZeroSharesMinted { .. } => ErrorKind::Validation,
            VaultError::Slippage { .. } | VaultError::Pool(PoolError::Slippage { .. }) => {
                ErrorKind::Slippage
            }
            VaultError::Pool(_) | VaultError::Ledger(_) => ErrorKind::External,
            VaultError::Math(_) => ErrorKind::Arithmetic,
        }
    }
}

/// Result alias for vault operations.
pub type VaultResult<T> = Result<T, VaultError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(VaultError::ZeroShares.kind(), ErrorKind::Validation);
        assert_eq!(
            VaultError::ZeroSharesMinted { liquidity: 67 }.kind(),
            ErrorKind::Validation
        );
        assert_eq!(
            VaultError::from(DeadlineError {
                deadline: 1,
                now: 2
            })
            .kind(),
            ErrorKind::Validation
        );
        assert_eq!(
            VaultError::from(PoolError::Slippage {
                amount0: 1,
                amount1: 1,
                amount0_min: 2,
                amount1_min: 0
            })
            .kind(),
            ErrorKind::Slippage
        );
        assert_eq!(
            VaultError::from(PoolError::ZeroLiquidity).kind(),
            ErrorKind::External
        );
        assert_eq!(
            VaultError::from(MathError::Overflow).kind(),
            ErrorKind::Arithmetic
        );
    }
}
