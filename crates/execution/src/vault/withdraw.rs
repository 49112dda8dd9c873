use super::ShareVault;
use crate::error::{VaultError, VaultResult};
use crate::lifecycle::{EventData, WithdrawData};
use clmm_vault_domain::entities::VaultPosition;
use clmm_vault_domain::shares::liquidity_for_withdraw;
use clmm_vault_domain::value_objects::{Address, Recipient};
use clmm_vault_protocols::deadline::DeadlineValidator;
use clmm_vault_protocols::ledger::ShareLedger;
use clmm_vault_protocols::pool::PoolClient;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Parameters for [`ShareVault::withdraw`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithdrawParams {
    /// Where the tokens go. [`Recipient::Vault`] keeps them in the vault's account.
    pub recipient: Recipient,
    /// Shares to burn.
    pub shares: u128,
    /// Minimum token0 to receive.
    pub amount0_min: u128,
    /// Minimum token1 to receive.
    pub amount1_min: u128,
    /// Expiry, unix seconds.
    pub deadline: u64,
}

/// Outcome of a withdraw.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithdrawResult {
    /// Liquidity removed from the position.
    pub liquidity: u128,
    /// Token0 delivered.
    pub amount0: u128,
    /// Token1 delivered.
    pub amount1: u128,
}

impl<P, L, D> ShareVault<P, L, D>
where
    P: PoolClient,
    L: ShareLedger,
    D: DeadlineValidator,
{
    /// Burns `actor`'s shares and delivers the matching slice of liquidity.
    ///
    /// Only principal is collected. Fees stay owed to the position and are
    /// left for the next compound.
    pub async fn withdraw(
        &mut self,
        actor: Address,
        params: WithdrawParams,
    ) -> VaultResult<WithdrawResult> {
        if params.shares == 0 {
            return Err(VaultError::ZeroShares);
        }
        self.deadline.check_not_expired(params.deadline)?;

        let recipient = params.recipient.resolve(self.address);
        let savepoint = self.savepoint();
        match self.try_withdraw(actor, recipient, &params).await {
            Ok((next, result)) => {
                self.commit(next);
                info!(
                    actor = ?actor,
                    recipient = ?recipient,
                    shares = params.shares,
                    liquidity = result.liquidity,
                    amount0 = result.amount0,
                    amount1 = result.amount1,
                    "Withdraw committed"
                );
                self.emit(
                    actor,
                    EventData::Withdraw(WithdrawData {
                        recipient,
                        shares: params.shares,
                        liquidity_removed: result.liquidity,
                        amount0: result.amount0,
                        amount1: result.amount1,
                        total_liquidity: self.position.liquidity,
                        total_supply: self.ledger.total_supply(),
                    }),
                );
                Ok(result)
            }
            Err(e) => {
                self.rollback(savepoint, "withdraw", &e);
                Err(e)
            }
        }
    }

    async fn try_withdraw(
        &mut self,
        actor: Address,
        recipient: Address,
        params: &WithdrawParams,
    ) -> VaultResult<(VaultPosition, WithdrawResult)> {
        let existing = self.position;
        let existing_supply = self.ledger.total_supply();
        let key = self.position_key();

        self.ledger.burn(actor, params.shares)?;
        let removed = liquidity_for_withdraw(params.shares, existing.liquidity, existing_supply)?;

        let (owed0, owed1) = self.pool.remove_liquidity(key, removed).await?;
        let (amount0, amount1) = self.pool.collect(key, recipient, owed0, owed1).await?;
        if amount0 < params.amount0_min || amount1 < params.amount1_min {
            return Err(VaultError::Slippage {
                amount0,
                amount1,
                amount0_min: params.amount0_min,
                amount1_min: params.amount1_min,
            });
        }

        let mut next = existing;
        if existing.liquidity > 0 {
            let accrual = self.pool.position_accrual(key).await?;
            let (refreshed, fees) =
                existing.refreshed(existing.liquidity, accrual.fee_growth_inside)?;
            debug!(fees0 = fees.fees0, fees1 = fees.fees1, "Refreshed fee accrual");
            next = refreshed;
        }
        let next = next.with_removed_liquidity(removed)?;

        Ok((
            next,
            WithdrawResult {
                liquidity: removed,
                amount0,
                amount1,
            },
        ))
    }
}
