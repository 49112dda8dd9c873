use super::ShareVault;
use crate::error::{VaultError, VaultResult};
use crate::lifecycle::{DepositData, EventData};
use clmm_vault_domain::entities::VaultPosition;
use clmm_vault_domain::shares::shares_for_deposit;
use clmm_vault_domain::value_objects::Address;
use clmm_vault_protocols::deadline::DeadlineValidator;
use clmm_vault_protocols::ledger::ShareLedger;
use clmm_vault_protocols::pool::{AddLiquidityParams, PoolClient};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Parameters for [`ShareVault::deposit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepositParams {
    /// Maximum token0 to deposit.
    pub amount0_desired: u128,
    /// Maximum token1 to deposit.
    pub amount1_desired: u128,
    /// Minimum token0 the pool must accept.
    pub amount0_min: u128,
    /// Minimum token1 the pool must accept.
    pub amount1_min: u128,
    /// Expiry, unix seconds.
    pub deadline: u64,
}

/// Outcome of a deposit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepositResult {
    /// Shares minted to the depositor.
    pub shares: u128,
    /// Liquidity added to the position.
    pub liquidity: u128,
    /// Token0 paid.
    pub amount0: u128,
    /// Token1 paid.
    pub amount1: u128,
}

impl<P, L, D> ShareVault<P, L, D>
where
    P: PoolClient,
    L: ShareLedger,
    D: DeadlineValidator,
{
    /// Adds `actor`'s tokens to the position and mints shares for them.
    ///
    /// Shares are proportional to the liquidity added relative to the
    /// liquidity and supply before the deposit. The first deposit mints 1:1.
    pub async fn deposit(
        &mut self,
        actor: Address,
        params: DepositParams,
    ) -> VaultResult<DepositResult> {
        self.deadline.check_not_expired(params.deadline)?;

        let savepoint = self.savepoint();
        match self.try_deposit(actor, &params).await {
            Ok((next, result)) => {
                self.commit(next);
                info!(
                    actor = ?actor,
                    shares = result.shares,
                    liquidity = result.liquidity,
                    amount0 = result.amount0,
                    amount1 = result.amount1,
                    "Deposit committed"
                );
                self.emit(
                    actor,
                    EventData::Deposit(DepositData {
                        shares: result.shares,
                        liquidity_added: result.liquidity,
                        amount0: result.amount0,
                        amount1: result.amount1,
                        total_liquidity: self.position.liquidity,
                        total_supply: self.ledger.total_supply(),
                    }),
                );
                Ok(result)
            }
            Err(e) => {
                self.rollback(savepoint, "deposit", &e);
                Err(e)
            }
        }
    }

    async fn try_deposit(
        &mut self,
        actor: Address,
        params: &DepositParams,
    ) -> VaultResult<(VaultPosition, DepositResult)> {
        let existing = self.position;
        let existing_supply = self.ledger.total_supply();
        let key = self.position_key();

        let added = self
            .pool
            .add_liquidity(
                key,
                actor,
                AddLiquidityParams {
                    amount0_desired: params.amount0_desired,
                    amount1_desired: params.amount1_desired,
                    amount0_min: params.amount0_min,
                    amount1_min: params.amount1_min,
                },
            )
            .await?;

        // The add touched the position; fees since our checkpoint belong to
        // the liquidity we held before it.
        let accrual = self.pool.position_accrual(key).await?;
        let (refreshed, fees) = existing.refreshed(existing.liquidity, accrual.fee_growth_inside)?;
        debug!(fees0 = fees.fees0, fees1 = fees.fees1, "Refreshed fee accrual");

        let shares = shares_for_deposit(added.liquidity, existing.liquidity, existing_supply)?;
        if shares == 0 {
            return Err(VaultError::ZeroSharesMinted {
                liquidity: added.liquidity,
            });
        }
        self.ledger.mint(actor, shares)?;

        let next = refreshed.with_added_liquidity(added.liquidity)?;
        Ok((
            next,
            DepositResult {
                shares,
                liquidity: added.liquidity,
                amount0: added.amount0,
                amount1: added.amount1,
            },
        ))
    }
}
