//! In-memory concentrated liquidity pool.
//!
//! Models just enough of a real pool for a vault to run against it: a
//! settable price, positions keyed by owner and range, per-range fee growth
//! fed by [`SimulatedPool::accrue_fees`], token balances, and the rounding
//! rules of mint (up) and burn (down).

use crate::pool::{
    AddLiquidityParams, AddedLiquidity, PoolClient, PoolError, PositionAccrual, PositionKey,
};
use async_trait::async_trait;
use clmm_vault_domain::error::MathError;
use clmm_vault_domain::fees::{FeeGrowth, accrued_fees};
use clmm_vault_domain::math::concentrated_liquidity::get_liquidity_for_amounts;
use clmm_vault_domain::math::fixed_point::q128;
use clmm_vault_domain::math::full_math::{mul_div, to_u128};
use clmm_vault_domain::math::sqrt_price_math::{get_amount0_delta, get_amount1_delta};
use clmm_vault_domain::math::tick_math::get_sqrt_ratio_at_tick;
use clmm_vault_domain::value_objects::{Address, PricePosition, TickRange};
use primitive_types::U256;
use std::collections::{HashMap, HashSet};
use tracing::debug;

#[derive(Debug, Clone, Default)]
struct SimulatedPosition {
    liquidity: u128,
    fee_growth_inside_last: FeeGrowth,
    tokens_owed0: u128,
    tokens_owed1: u128,
}

/// Full pool state; also the savepoint type.
#[derive(Debug, Clone)]
pub struct PoolState {
    sqrt_price: U256,
    positions: HashMap<PositionKey, SimulatedPosition>,
    range_growth: HashMap<TickRange, FeeGrowth>,
    balances: HashMap<Address, (u128, u128)>,
    reserves: (u128, u128),
}

/// Simulated pool implementing [`PoolClient`].
#[derive(Debug, Clone)]
pub struct SimulatedPool {
    state: PoolState,
}

impl SimulatedPool {
    /// Creates an empty pool at `sqrt_price` (Q64.96).
    #[must_use]
    pub fn new(sqrt_price: U256) -> Self {
        Self {
            state: PoolState {
                sqrt_price,
                positions: HashMap::new(),
                range_growth: HashMap::new(),
                balances: HashMap::new(),
                reserves: (0, 0),
            },
        }
    }

    /// Creates an empty pool priced at `tick`.
    pub fn at_tick(tick: i32) -> Result<Self, MathError> {
        Ok(Self::new(get_sqrt_ratio_at_tick(tick)?))
    }

    /// Moves the price. Fee growth only accrues to ranges containing the price.
    pub fn set_sqrt_price(&mut self, sqrt_price: U256) {
        self.state.sqrt_price = sqrt_price;
    }

    /// Moves the price to `tick`.
    pub fn set_tick(&mut self, tick: i32) -> Result<(), MathError> {
        self.state.sqrt_price = get_sqrt_ratio_at_tick(tick)?;
        Ok(())
    }

    /// Current sqrt price.
    #[must_use]
    pub fn current_sqrt_price(&self) -> U256 {
        self.state.sqrt_price
    }

    /// Credits tokens to an account.
    pub fn mint_tokens(&mut self, account: Address, amount0: u128, amount1: u128) {
        let balance = self.state.balances.entry(account).or_default();
        balance.0 = balance.0.saturating_add(amount0);
        balance.1 = balance.1.saturating_add(amount1);
    }

    /// Token balances of an account.
    #[must_use]
    pub fn token_balance(&self, account: Address) -> (u128, u128) {
        self.state.balances.get(&account).copied().unwrap_or_default()
    }

    /// Tokens held by the pool.
    #[must_use]
    pub fn reserves(&self) -> (u128, u128) {
        self.state.reserves
    }

    /// Liquidity currently earning fees.
    #[must_use]
    pub fn active_liquidity(&self) -> u128 {
        let price = self.state.sqrt_price;
        self.state
            .positions
            .iter()
            .filter(|(key, _)| key.range.contains_sqrt_price(price))
            .map(|(_, position)| position.liquidity)
            .fold(0u128, u128::saturating_add)
    }

    /// Distributes swap fees over the active liquidity.
    ///
    /// Returns `false` (and keeps nothing) when no liquidity is active.
    pub fn accrue_fees(&mut self, amount0: u128, amount1: u128) -> Result<bool, MathError> {
        let active = self.active_liquidity();
        if active == 0 {
            return Ok(false);
        }
        let growth0 = mul_div(U256::from(amount0), q128(), U256::from(active))?;
        let growth1 = mul_div(U256::from(amount1), q128(), U256::from(active))?;

        let price = self.state.sqrt_price;
        let active_ranges: HashSet<TickRange> = self
            .state
            .positions
            .keys()
            .map(|key| key.range)
            .filter(|range| range.contains_sqrt_price(price))
            .collect();
        for range in active_ranges {
            let growth = self.state.range_growth.entry(range).or_default();
            growth.inside0 = growth.inside0.overflowing_add(growth0).0;
            growth.inside1 = growth.inside1.overflowing_add(growth1).0;
        }

        self.state.reserves.0 = self.state.reserves.0.saturating_add(amount0);
        self.state.reserves.1 = self.state.reserves.1.saturating_add(amount1);
        debug!(amount0, amount1, active, "Fees accrued");
        Ok(true)
    }

    fn range_growth(&self, range: &TickRange) -> FeeGrowth {
        self.state.range_growth.get(range).copied().unwrap_or_default()
    }

    /// Brings a position's owed tokens up to the current range growth.
    fn touch(&mut self, key: PositionKey) -> Result<&mut SimulatedPosition, MathError> {
        let growth = self.range_growth(&key.range);
        let position = self.state.positions.entry(key).or_default();
        let owed0 = accrued_fees(
            position.fee_growth_inside_last.inside0,
            growth.inside0,
            position.liquidity,
        )?;
        let owed1 = accrued_fees(
            position.fee_growth_inside_last.inside1,
            growth.inside1,
            position.liquidity,
        )?;
        position.tokens_owed0 = position
            .tokens_owed0
            .checked_add(owed0)
            .ok_or(MathError::Overflow)?;
        position.tokens_owed1 = position
            .tokens_owed1
            .checked_add(owed1)
            .ok_or(MathError::Overflow)?;
        position.fee_growth_inside_last = growth;
        Ok(position)
    }

    fn amounts_for_delta(
        &self,
        range: &TickRange,
        liquidity: u128,
        round_up: bool,
    ) -> Result<(u128, u128), MathError> {
        let price = self.state.sqrt_price;
        let (lower, upper) = (range.sqrt_ratio_lower(), range.sqrt_ratio_upper());
        let (amount0, amount1) = match range.price_position(price) {
            PricePosition::Below => (
                get_amount0_delta(lower, upper, liquidity, round_up)?,
                U256::zero(),
            ),
            PricePosition::Inside => (
                get_amount0_delta(price, upper, liquidity, round_up)?,
                get_amount1_delta(lower, price, liquidity, round_up)?,
            ),
            PricePosition::Above => (
                U256::zero(),
                get_amount1_delta(lower, upper, liquidity, round_up)?,
            ),
        };
        Ok((to_u128(amount0)?, to_u128(amount1)?))
    }
}

#[async_trait]
impl PoolClient for SimulatedPool {
    type Savepoint = PoolState;

    async fn add_liquidity(
        &mut self,
        key: PositionKey,
        payer: Address,
        params: AddLiquidityParams,
    ) -> Result<AddedLiquidity, PoolError> {
        let range = key.range;
        let liquidity = get_liquidity_for_amounts(
            self.state.sqrt_price,
            range.sqrt_ratio_lower(),
            range.sqrt_ratio_upper(),
            params.amount0_desired,
            params.amount1_desired,
        )?;
        if liquidity == 0 {
            return Err(PoolError::ZeroLiquidity);
        }

        let (amount0, amount1) = self.amounts_for_delta(&range, liquidity, true)?;
        if amount0 < params.amount0_min || amount1 < params.amount1_min {
            return Err(PoolError::Slippage {
                amount0,
                amount1,
                amount0_min: params.amount0_min,
                amount1_min: params.amount1_min,
            });
        }

        let balance = self.token_balance(payer);
        if balance.0 < amount0 || balance.1 < amount1 {
            return Err(PoolError::InsufficientFunds {
                payer,
                amount0,
                amount1,
            });
        }

        let position = self.touch(key)?;
        position.liquidity = position
            .liquidity
            .checked_add(liquidity)
            .ok_or(MathError::Overflow)?;

        self.state
            .balances
            .insert(payer, (balance.0 - amount0, balance.1 - amount1));
        self.state.reserves.0 = self.state.reserves.0.saturating_add(amount0);
        self.state.reserves.1 = self.state.reserves.1.saturating_add(amount1);

        debug!(position = %key, liquidity, amount0, amount1, "Liquidity minted");
        Ok(AddedLiquidity {
            liquidity,
            amount0,
            amount1,
        })
    }

    async fn remove_liquidity(
        &mut self,
        key: PositionKey,
        liquidity: u128,
    ) -> Result<(u128, u128), PoolError> {
        let available = self
            .state
            .positions
            .get(&key)
            .map(|position| position.liquidity)
            .ok_or(PoolError::UnknownPosition(key))?;
        if liquidity > available {
            return Err(PoolError::InsufficientLiquidity {
                requested: liquidity,
                available,
            });
        }

        let (amount0, amount1) = self.amounts_for_delta(&key.range, liquidity, false)?;
        let position = self.touch(key)?;
        position.liquidity -= liquidity;
        position.tokens_owed0 = position
            .tokens_owed0
            .checked_add(amount0)
            .ok_or(MathError::Overflow)?;
        position.tokens_owed1 = position
            .tokens_owed1
            .checked_add(amount1)
            .ok_or(MathError::Overflow)?;

        debug!(position = %key, liquidity, amount0, amount1, "Liquidity burned");
        Ok((amount0, amount1))
    }

    async fn collect(
        &mut self,
        key: PositionKey,
        recipient: Address,
        amount0_max: u128,
        amount1_max: u128,
    ) -> Result<(u128, u128), PoolError> {
        let position = self
            .state
            .positions
            .get_mut(&key)
            .ok_or(PoolError::UnknownPosition(key))?;
        let amount0 = amount0_max.min(position.tokens_owed0);
        let amount1 = amount1_max.min(position.tokens_owed1);
        position.tokens_owed0 -= amount0;
        position.tokens_owed1 -= amount1;

        self.state.reserves.0 = self.state.reserves.0.saturating_sub(amount0);
        self.state.reserves.1 = self.state.reserves.1.saturating_sub(amount1);
        self.mint_tokens(recipient, amount0, amount1);

        debug!(position = %key, recipient = ?recipient, amount0, amount1, "Tokens collected");
        Ok((amount0, amount1))
    }

    async fn position_accrual(&self, key: PositionKey) -> Result<PositionAccrual, PoolError> {
        Ok(self
            .state
            .positions
            .get(&key)
            .map(|position| PositionAccrual {
                liquidity: position.liquidity,
                fee_growth_inside: position.fee_growth_inside_last,
                tokens_owed0: position.tokens_owed0,
                tokens_owed1: position.tokens_owed1,
            })
            .unwrap_or_default())
    }

    async fn sqrt_price(&self) -> Result<U256, PoolError> {
        Ok(self.state.sqrt_price)
    }

    fn savepoint(&self) -> Self::Savepoint {
        self.state.clone()
    }

    fn rollback(&mut self, savepoint: Self::Savepoint) {
        self.state = savepoint;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key() -> PositionKey {
        PositionKey::new(
            Address::from_low_u64_be(0xa11ce),
            TickRange::new(-600, 600).unwrap(),
        )
    }

    fn params(amount0: u128, amount1: u128) -> AddLiquidityParams {
        AddLiquidityParams {
            amount0_desired: amount0,
            amount1_desired: amount1,
            amount0_min: 0,
            amount1_min: 0,
        }
    }

    fn funded_pool(payer: Address) -> SimulatedPool {
        let mut pool = SimulatedPool::at_tick(0).unwrap();
        pool.mint_tokens(payer, 1_000_000, 1_000_000);
        pool
    }

    #[tokio::test]
    async fn test_mint_burn_collect() {
        let payer = Address::from_low_u64_be(7);
        let mut pool = funded_pool(payer);

        let added = pool
            .add_liquidity(key(), payer, params(10_000, 10_000))
            .await
            .unwrap();
        assert!(added.liquidity > 0);
        assert!(added.amount0 <= 10_000 && added.amount1 <= 10_000);
        assert_eq!(pool.reserves(), (added.amount0, added.amount1));

        let (out0, out1) = pool.remove_liquidity(key(), added.liquidity).await.unwrap();
        // Burn rounds down, mint rounds up.
        assert!(out0 <= added.amount0 && added.amount0 - out0 <= 1);
        assert!(out1 <= added.amount1 && added.amount1 - out1 <= 1);

        let recipient = Address::from_low_u64_be(8);
        let collected = pool.collect(key(), recipient, u128::MAX, u128::MAX).await.unwrap();
        assert_eq!(collected, (out0, out1));
        assert_eq!(pool.token_balance(recipient), (out0, out1));
    }

    #[tokio::test]
    async fn test_fee_accrual_materializes_on_touch() {
        let payer = Address::from_low_u64_be(7);
        let mut pool = funded_pool(payer);
        let added = pool
            .add_liquidity(key(), payer, params(10_000, 10_000))
            .await
            .unwrap();

        assert!(pool.accrue_fees(500, 300).unwrap());
        // Not visible until the position is touched.
        let before = pool.position_accrual(key()).await.unwrap();
        assert_eq!((before.tokens_owed0, before.tokens_owed1), (0, 0));

        pool.remove_liquidity(key(), 0).await.unwrap();
        let after = pool.position_accrual(key()).await.unwrap();
        assert_eq!(after.liquidity, added.liquidity);
        // Sole liquidity provider earns everything, minus rounding dust.
        assert!(after.tokens_owed0 <= 500 && after.tokens_owed0 >= 499);
        assert!(after.tokens_owed1 <= 300 && after.tokens_owed1 >= 299);
    }

    #[tokio::test]
    async fn test_out_of_range_does_not_earn() {
        let payer = Address::from_low_u64_be(7);
        let mut pool = funded_pool(payer);
        pool.add_liquidity(key(), payer, params(10_000, 10_000))
            .await
            .unwrap();

        pool.set_tick(1_000).unwrap();
        assert_eq!(pool.active_liquidity(), 0);
        assert!(!pool.accrue_fees(500, 300).unwrap());
    }

    #[tokio::test]
    async fn test_slippage_and_funds_checks() {
        let payer = Address::from_low_u64_be(7);
        let mut pool = funded_pool(payer);

        let err = pool
            .add_liquidity(
                key(),
                payer,
                AddLiquidityParams {
                    amount0_min: 20_000,
                    ..params(10_000, 10_000)
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, PoolError::Slippage { .. }));

        let broke = Address::from_low_u64_be(9);
        let err = pool
            .add_liquidity(key(), broke, params(10_000, 10_000))
            .await
            .unwrap_err();
        assert!(matches!(err, PoolError::InsufficientFunds { .. }));

        let err = pool
            .add_liquidity(key(), payer, params(0, 0))
            .await
            .unwrap_err();
        assert_eq!(err, PoolError::ZeroLiquidity);
    }

    #[tokio::test]
    async fn test_savepoint_rollback() {
        let payer = Address::from_low_u64_be(7);
        let mut pool = funded_pool(payer);
        let savepoint = pool.savepoint();

        pool.add_liquidity(key(), payer, params(10_000, 10_000))
            .await
            .unwrap();
        assert_ne!(pool.token_balance(payer), (1_000_000, 1_000_000));

        pool.rollback(savepoint);
        assert_eq!(pool.token_balance(payer), (1_000_000, 1_000_000));
        assert_eq!(pool.position_accrual(key()).await.unwrap(), PositionAccrual::default());
    }

    #[tokio::test]
    async fn test_remove_errors() {
        let payer = Address::from_low_u64_be(7);
        let mut pool = funded_pool(payer);
        assert_eq!(
            pool.remove_liquidity(key(), 1).await.unwrap_err(),
            PoolError::UnknownPosition(key())
        );

        let added = pool
            .add_liquidity(key(), payer, params(10_000, 10_000))
            .await
            .unwrap();
        assert!(matches!(
            pool.remove_liquidity(key(), added.liquidity + 1).await,
            Err(PoolError::InsufficientLiquidity { .. })
        ));
    }
}
