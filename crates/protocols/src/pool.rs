//! Pool collaborator port.
//!
//! Every call on a [`PoolClient`] is an external interaction: it may fail,
//! and in a real deployment it hands control to third-party code before
//! returning.

use async_trait::async_trait;
use clmm_vault_domain::error::MathError;
use clmm_vault_domain::fees::FeeGrowth;
use clmm_vault_domain::value_objects::{Address, TickRange};
use primitive_types::U256;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Identifies a position inside a pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PositionKey {
    /// Position owner.
    pub owner: Address,
    /// Position range.
    pub range: TickRange,
}

impl PositionKey {
    /// Creates a position key.
    #[must_use]
    pub fn new(owner: Address, range: TickRange) -> Self {
        Self { owner, range }
    }
}

impl std::fmt::Display for PositionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}@{}", self.owner, self.range)
    }
}

/// Pool-side state of a position, as of its last touch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionAccrual {
    /// Liquidity held by the position.
    pub liquidity: u128,
    /// Fee growth inside the range recorded at the last touch.
    pub fee_growth_inside: FeeGrowth,
    /// Token0 owed to the position (principal released by burns plus fees).
    pub tokens_owed0: u128,
    /// Token1 owed to the position.
    pub tokens_owed1: u128,
}

/// Parameters for adding liquidity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddLiquidityParams {
    /// Maximum token0 to spend.
    pub amount0_desired: u128,
    /// Maximum token1 to spend.
    pub amount1_desired: u128,
    /// Minimum token0 that must be used.
    pub amount0_min: u128,
    /// Minimum token1 that must be used.
    pub amount1_min: u128,
}

/// Outcome of adding liquidity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddedLiquidity {
    /// Liquidity minted.
    pub liquidity: u128,
    /// Token0 paid.
    pub amount0: u128,
    /// Token1 paid.
    pub amount1: u128,
}

/// Errors reported by a pool.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PoolError {
    /// Amounts used by an add are below the caller's minimums.
    #[error(
        "price slippage check: used ({amount0}, {amount1}), required at least ({amount0_min}, {amount1_min})"
    )]
    Slippage {
        /// Token0 the pool would use.
        amount0: u128,
        /// Token1 the pool would use.
        amount1: u128,
        /// Requested token0 minimum.
        amount0_min: u128,
        /// Requested token1 minimum.
        amount1_min: u128,
    },
    /// The supplied amounts do not buy any liquidity.
    #[error("amounts yield zero liquidity")]
    ZeroLiquidity,
    /// No position exists for the key.
    #[error("unknown position {0}")]
    UnknownPosition(PositionKey),
    /// Attempt to remove more liquidity than the position holds.
    #[error("cannot remove {requested} liquidity, position holds {available}")]
    InsufficientLiquidity {
        /// Liquidity requested.
        requested: u128,
        /// Liquidity held.
        available: u128,
    },
    /// Payer cannot cover the tokens owed to the pool.
    #[error("payer {payer:?} cannot pay ({amount0}, {amount1})")]
    InsufficientFunds {
        /// Paying account.
        payer: Address,
        /// Token0 required.
        amount0: u128,
        /// Token1 required.
        amount1: u128,
    },
    /// The pool's own arithmetic failed.
    #[error("pool math: {0}")]
    Math(#[from] MathError),
    /// Any other rejection from a remote pool.
    #[error("pool rejected the call: {0}")]
    Rejected(String),
}

/// Operations a vault needs from its underlying pool.
///
/// Implementations must be transactional: [`savepoint`](PoolClient::savepoint)
/// captures all pool-side effects, and [`rollback`](PoolClient::rollback)
/// discards everything done after it.
#[async_trait]
pub trait PoolClient: Send + Sync {
    /// Opaque state captured by [`savepoint`](PoolClient::savepoint).
    type Savepoint: Send;

    /// Mints liquidity for `key` paid by `payer`.
    async fn add_liquidity(
        &mut self,
        key: PositionKey,
        payer: Address,
        params: AddLiquidityParams,
    ) -> Result<AddedLiquidity, PoolError>;

    /// Burns liquidity from `key`; released tokens become collectable, not transferred.
    ///
    /// Removing zero liquidity only refreshes the position's fee checkpoint.
    async fn remove_liquidity(
        &mut self,
        key: PositionKey,
        liquidity: u128,
    ) -> Result<(u128, u128), PoolError>;

    /// Transfers up to the requested amounts of owed tokens to `recipient`.
    async fn collect(
        &mut self,
        key: PositionKey,
        recipient: Address,
        amount0_max: u128,
        amount1_max: u128,
    ) -> Result<(u128, u128), PoolError>;

    /// Reads the pool-side state of `key`.
    async fn position_accrual(&self, key: PositionKey) -> Result<PositionAccrual, PoolError>;

    /// Current Q64.96 sqrt price.
    async fn sqrt_price(&self) -> Result<U256, PoolError>;

    /// Captures the current pool state.
    fn savepoint(&self) -> Self::Savepoint;

    /// Restores a captured state.
    fn rollback(&mut self, savepoint: Self::Savepoint);
}
