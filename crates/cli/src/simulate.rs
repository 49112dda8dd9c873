use anyhow::{Result, bail};
use clap::Args;
use clmm_vault_domain::math::price_tick::sqrt_price_x96_to_price;
use clmm_vault_domain::math::tick_math::{MAX_TICK, MIN_TICK};
use clmm_vault_domain::value_objects::{Address, Recipient, TickRange};
use clmm_vault_execution::prelude::*;
use clmm_vault_protocols::prelude::*;
use prettytable::{Table, row};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::info;

const DEADLINE_WINDOW_SECS: u64 = 300;

#[derive(Args)]
pub struct SimulateArgs {
    /// Lower tick of the vault range
    #[arg(long, allow_hyphen_values = true, env = "CLMM_VAULT_LOWER")]
    lower: i32,

    /// Upper tick of the vault range
    #[arg(long, allow_hyphen_values = true, env = "CLMM_VAULT_UPPER")]
    upper: i32,

    /// Starting pool tick
    #[arg(long, allow_hyphen_values = true, default_value_t = 0)]
    tick: i32,

    /// Number of market steps
    #[arg(long, default_value_t = 48)]
    steps: u32,

    /// RNG seed for price moves and fees
    #[arg(long, env = "CLMM_VAULT_SEED", default_value_t = 42)]
    seed: u64,

    /// Token0 offered by the depositor
    #[arg(long, default_value_t = 1_000_000)]
    deposit0: u128,

    /// Token1 offered by the depositor
    #[arg(long, default_value_t = 1_000_000)]
    deposit1: u128,

    /// Maximum fees (per token) generated in one step
    #[arg(long, default_value_t = 2_000)]
    max_fees: u128,

    /// Maximum tick movement in one step
    #[arg(long, default_value_t = 40)]
    max_drift: i32,

    /// Compound every N steps
    #[arg(long, default_value_t = 8)]
    compound_every: u32,

    /// Disable vault lifecycle events
    #[arg(long)]
    no_events: bool,

    /// Print JSON instead of tables
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct StepRecord {
    step: u32,
    tick: i32,
    in_range: bool,
    liquidity: u128,
    fees_owed0: u128,
    fees_owed1: u128,
    liquidity_per_share: u128,
    compounded: Option<CompoundResult>,
}

#[derive(Serialize)]
struct Summary {
    range: TickRange,
    seed: u64,
    deposit: DepositResult,
    withdraw: WithdrawResult,
    compounds: u32,
    liquidity_from_fees: u128,
    final_price: Decimal,
    left_in_pool: (u128, u128),
    steps: Vec<StepRecord>,
}

pub async fn run(args: SimulateArgs) -> Result<()> {
    if args.compound_every == 0 {
        bail!("--compound-every must be at least 1");
    }
    if args.max_drift < 0 {
        bail!("--max-drift must not be negative");
    }
    let range = TickRange::new(args.lower, args.upper)?;
    let depositor = Address::from_low_u64_be(1);
    let vault_address = Address::from_low_u64_be(0xffff);

    let mut pool = SimulatedPool::at_tick(args.tick)?;
    pool.mint_tokens(depositor, args.deposit0, args.deposit1);

    let clock = SystemClock;
    let deadline = clock.now() + DEADLINE_WINDOW_SECS;
    let config = VaultConfig::new(range).with_events(!args.no_events);
    let mut vault = ShareVault::new(
        vault_address,
        config,
        pool,
        InMemoryShareLedger::new(),
        clock,
    );

    let deposit = vault
        .deposit(
            depositor,
            DepositParams {
                amount0_desired: args.deposit0,
                amount1_desired: args.deposit1,
                amount0_min: 0,
                amount1_min: 0,
                deadline,
            },
        )
        .await?;

    let mut rng = StdRng::seed_from_u64(args.seed);
    let mut tick = args.tick;
    let mut compounds = 0u32;
    let mut liquidity_from_fees = 0u128;
    let mut steps = Vec::with_capacity(args.steps as usize);

    for step in 1..=args.steps {
        tick = next_tick(&mut rng, tick, args.max_drift);
        vault.pool_mut().set_tick(tick)?;

        let fees0 = rng.random_range(0..=args.max_fees);
        let fees1 = rng.random_range(0..=args.max_fees);
        vault.pool_mut().accrue_fees(fees0, fees1)?;

        let compounded = if step % args.compound_every == 0 {
            let result = vault.compound(depositor).await?;
            compounds += 1;
            liquidity_from_fees += result.added_liquidity;
            Some(result)
        } else {
            None
        };

        let position = *vault.position();
        steps.push(StepRecord {
            step,
            tick,
            in_range: range.contains_sqrt_price(vault.pool().current_sqrt_price()),
            liquidity: position.liquidity,
            fees_owed0: position.fees_owed0,
            fees_owed1: position.fees_owed1,
            liquidity_per_share: vault.price_per_full_share().await?.liquidity_per_share,
            compounded,
        });
    }

    let shares = vault.balance_of(depositor);
    let withdraw = vault
        .withdraw(
            depositor,
            WithdrawParams {
                recipient: Recipient::Account(depositor),
                shares,
                amount0_min: 0,
                amount1_min: 0,
                deadline,
            },
        )
        .await?;
    info!(
        shares,
        amount0 = withdraw.amount0,
        amount1 = withdraw.amount1,
        "Simulation finished"
    );

    let summary = Summary {
        range,
        seed: args.seed,
        deposit,
        withdraw,
        compounds,
        liquidity_from_fees,
        final_price: sqrt_price_x96_to_price(vault.pool().current_sqrt_price())?,
        left_in_pool: (vault.position().fees_owed0, vault.position().fees_owed1),
        steps,
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_tables(&summary);
    }
    Ok(())
}

/// Random walk step, kept inside the tick bounds.
fn next_tick(rng: &mut impl Rng, tick: i32, max_drift: i32) -> i32 {
    let drift = max_drift.saturating_abs();
    tick.saturating_add(rng.random_range(-drift..=drift))
        .clamp(MIN_TICK, MAX_TICK - 1)
}

fn print_tables(summary: &Summary) {
    let mut steps = Table::new();
    steps.add_row(row![
        "Step",
        "Tick",
        "In range",
        "Liquidity",
        "Owed0",
        "Owed1",
        "Liquidity/share",
        "Compounded"
    ]);
    for record in &summary.steps {
        let compounded = record
            .compounded
            .map(|c| format!("+{} ({}, {})", c.added_liquidity, c.amount0, c.amount1))
            .unwrap_or_default();
        steps.add_row(row![
            record.step,
            record.tick,
            record.in_range,
            record.liquidity,
            record.fees_owed0,
            record.fees_owed1,
            record.liquidity_per_share,
            compounded
        ]);
    }
    steps.printstd();

    let mut totals = Table::new();
    totals.add_row(row!["Range", summary.range]);
    totals.add_row(row!["Seed", summary.seed]);
    totals.add_row(row![
        "Deposited",
        format!("{} / {}", summary.deposit.amount0, summary.deposit.amount1)
    ]);
    totals.add_row(row!["Shares", summary.deposit.shares]);
    totals.add_row(row![
        "Withdrawn",
        format!("{} / {}", summary.withdraw.amount0, summary.withdraw.amount1)
    ]);
    totals.add_row(row!["Compounds", summary.compounds]);
    totals.add_row(row!["Liquidity from fees", summary.liquidity_from_fees]);
    totals.add_row(row![
        "Fees still owed",
        format!("{} / {}", summary.left_in_pool.0, summary.left_in_pool.1)
    ]);
    totals.add_row(row!["Final price", summary.final_price.round_dp(8)]);
    totals.printstd();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_tick_stays_in_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            let up = next_tick(&mut rng, MAX_TICK - 1, i32::MAX);
            assert!((MIN_TICK..MAX_TICK).contains(&up));
            let down = next_tick(&mut rng, MIN_TICK, i32::MIN);
            assert!((MIN_TICK..MAX_TICK).contains(&down));
        }
    }

    #[test]
    fn test_next_tick_respects_drift() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            let tick = next_tick(&mut rng, 100, 5);
            assert!((95..=105).contains(&tick));
        }
        assert_eq!(next_tick(&mut rng, 42, 0), 42);
    }
}
