use super::ShareVault;
use crate::error::VaultResult;
use crate::lifecycle::{CompoundData, EventData};
use crate::strategy::plan_reinvestment;
use clmm_vault_domain::entities::VaultPosition;
use clmm_vault_domain::math::concentrated_liquidity::get_liquidity_for_amounts;
use clmm_vault_domain::value_objects::Address;
use clmm_vault_protocols::deadline::DeadlineValidator;
use clmm_vault_protocols::ledger::ShareLedger;
use clmm_vault_protocols::pool::{AddLiquidityParams, PoolClient};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Outcome of a compound.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompoundResult {
    /// Liquidity added from fees.
    pub added_liquidity: u128,
    /// Token0 reinvested.
    pub amount0: u128,
    /// Token1 reinvested.
    pub amount1: u128,
}

struct Reinvestment {
    next: VaultPosition,
    collected: (u128, u128),
    result: CompoundResult,
}

impl<P, L, D> ShareVault<P, L, D>
where
    P: PoolClient,
    L: ShareLedger,
    D: DeadlineValidator,
{
    /// Collects accrued fees and adds them back to the position.
    ///
    /// No shares are minted, so every holder's slice grows. Fees that cannot
    /// be paired at the current price stay owed for a later cycle. With no
    /// liquidity deployed there is nothing to reinvest into and the call
    /// returns without touching the pool.
    pub async fn compound(&mut self, actor: Address) -> VaultResult<CompoundResult> {
        if self.position.liquidity == 0 {
            debug!("No liquidity deployed, nothing to compound");
            return Ok(CompoundResult::default());
        }

        let savepoint = self.savepoint();
        match self.try_compound().await {
            Ok(Reinvestment {
                next,
                collected,
                result,
            }) => {
                self.commit(next);
                info!(
                    actor = ?actor,
                    added_liquidity = result.added_liquidity,
                    amount0 = result.amount0,
                    amount1 = result.amount1,
                    fees_owed0 = next.fees_owed0,
                    fees_owed1 = next.fees_owed1,
                    "Compound committed"
                );
                self.emit(
                    actor,
                    EventData::Compound(CompoundData {
                        fees_collected0: collected.0,
                        fees_collected1: collected.1,
                        liquidity_added: result.added_liquidity,
                        amount0: result.amount0,
                        amount1: result.amount1,
                        total_liquidity: next.liquidity,
                    }),
                );
                Ok(result)
            }
            Err(e) => {
                self.rollback(savepoint, "compound", &e);
                Err(e)
            }
        }
    }

    async fn try_compound(&mut self) -> VaultResult<Reinvestment> {
        let existing = self.position;
        let key = self.position_key();
        let range = existing.range;

        // Zero-liquidity burn makes the pool bring its fee checkpoint up to date.
        self.pool.remove_liquidity(key, 0).await?;
        let accrual = self.pool.position_accrual(key).await?;
        let (refreshed, fees) = existing.refreshed(existing.liquidity, accrual.fee_growth_inside)?;
        debug!(fees0 = fees.fees0, fees1 = fees.fees1, "Refreshed fee accrual");

        let sqrt_price = self.pool.sqrt_price().await?;
        let plan = plan_reinvestment(
            sqrt_price,
            &range,
            refreshed.fees_owed0,
            refreshed.fees_owed1,
        )?;
        if plan.is_empty() {
            return Ok(Reinvestment {
                next: refreshed,
                collected: (0, 0),
                result: CompoundResult::default(),
            });
        }

        let (collected0, collected1) = self
            .pool
            .collect(key, self.address, plan.amount0, plan.amount1)
            .await?;
        let next = refreshed.with_fees_collected(collected0, collected1)?;

        let reinvestable = get_liquidity_for_amounts(
            sqrt_price,
            range.sqrt_ratio_lower(),
            range.sqrt_ratio_upper(),
            collected0,
            collected1,
        )?;
        if reinvestable == 0 {
            warn!(
                collected0,
                collected1,
                "Collected fees buy no liquidity, leaving them in the vault account"
            );
            return Ok(Reinvestment {
                next,
                collected: (collected0, collected1),
                result: CompoundResult::default(),
            });
        }

        let added = self
            .pool
            .add_liquidity(
                key,
                self.address,
                AddLiquidityParams {
                    amount0_desired: collected0,
                    amount1_desired: collected1,
                    amount0_min: 0,
                    amount1_min: 0,
                },
            )
            .await?;

        Ok(Reinvestment {
            next: next.with_added_liquidity(added.liquidity)?,
            collected: (collected0, collected1),
            result: CompoundResult {
                added_liquidity: added.liquidity,
                amount0: added.amount0,
                amount1: added.amount1,
            },
        })
    }
}
