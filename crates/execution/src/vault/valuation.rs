use super::ShareVault;
use crate::error::VaultResult;
use clmm_vault_domain::math::concentrated_liquidity::get_amounts_for_liquidity;
use clmm_vault_domain::shares::liquidity_per_share;
use clmm_vault_protocols::deadline::DeadlineValidator;
use clmm_vault_protocols::ledger::ShareLedger;
use clmm_vault_protocols::pool::PoolClient;
use serde::{Deserialize, Serialize};

/// Value of one full share ([`PRECISION`](clmm_vault_domain::shares::PRECISION) units).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareValuation {
    /// Liquidity backing one full share.
    pub liquidity_per_share: u128,
    /// Token0 that liquidity is worth at the current price.
    pub amount0: u128,
    /// Token1 that liquidity is worth at the current price.
    pub amount1: u128,
}

impl<P, L, D> ShareVault<P, L, D>
where
    P: PoolClient,
    L: ShareLedger,
    D: DeadlineValidator,
{
    /// Values one full share at the current price. Rounds down, like withdraw.
    pub async fn price_per_full_share(&self) -> VaultResult<ShareValuation> {
        let range = self.position.range;
        let liquidity_per_share =
            liquidity_per_share(self.position.liquidity, self.ledger.total_supply())?;
        let sqrt_price = self.pool.sqrt_price().await?;
        let (amount0, amount1) = get_amounts_for_liquidity(
            sqrt_price,
            range.sqrt_ratio_lower(),
            range.sqrt_ratio_upper(),
            liquidity_per_share,
        )?;

        Ok(ShareValuation {
            liquidity_per_share,
            amount0,
            amount1,
        })
    }
}
