use anyhow::Result;
use clap::Args;
use clmm_vault_domain::math::concentrated_liquidity::{
    get_amounts_for_liquidity, get_liquidity_for_amounts,
};
use clmm_vault_domain::math::price_tick::{sqrt_price_x96_to_price, tick_to_price};
use clmm_vault_domain::math::tick_math::get_sqrt_ratio_at_tick;
use clmm_vault_domain::value_objects::TickRange;
use clmm_vault_execution::strategy::{ReinvestSide, plan_reinvestment};
use prettytable::{Table, row};
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Args)]
pub struct QuoteArgs {
    /// Lower tick of the range
    #[arg(long, allow_hyphen_values = true, env = "CLMM_VAULT_LOWER")]
    lower: i32,

    /// Upper tick of the range
    #[arg(long, allow_hyphen_values = true, env = "CLMM_VAULT_UPPER")]
    upper: i32,

    /// Current pool tick
    #[arg(long, allow_hyphen_values = true, default_value_t = 0)]
    tick: i32,

    /// Token0 available
    #[arg(long)]
    amount0: u128,

    /// Token1 available
    #[arg(long)]
    amount1: u128,

    /// Print JSON instead of a table
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct Quote {
    range: TickRange,
    tick: i32,
    price: Decimal,
    price_lower: Decimal,
    price_upper: Decimal,
    liquidity: u128,
    amount0: u128,
    amount1: u128,
    binding_side: ReinvestSide,
}

pub fn run(args: QuoteArgs) -> Result<()> {
    let range = TickRange::new(args.lower, args.upper)?;
    let sqrt_price = get_sqrt_ratio_at_tick(args.tick)?;

    let liquidity = get_liquidity_for_amounts(
        sqrt_price,
        range.sqrt_ratio_lower(),
        range.sqrt_ratio_upper(),
        args.amount0,
        args.amount1,
    )?;
    let (amount0, amount1) = get_amounts_for_liquidity(
        sqrt_price,
        range.sqrt_ratio_lower(),
        range.sqrt_ratio_upper(),
        liquidity,
    )?;
    let plan = plan_reinvestment(sqrt_price, &range, args.amount0, args.amount1)?;

    let quote = Quote {
        range,
        tick: args.tick,
        price: sqrt_price_x96_to_price(sqrt_price)?,
        price_lower: tick_to_price(range.lower())?,
        price_upper: tick_to_price(range.upper())?,
        liquidity,
        amount0,
        amount1,
        binding_side: plan.side,
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&quote)?);
        return Ok(());
    }

    let mut table = Table::new();
    table.add_row(row!["Range", quote.range]);
    table.add_row(row!["Price", quote.price.round_dp(8)]);
    table.add_row(row![
        "Price bounds",
        format!(
            "{} .. {}",
            quote.price_lower.round_dp(8),
            quote.price_upper.round_dp(8)
        )
    ]);
    table.add_row(row!["Liquidity", quote.liquidity]);
    table.add_row(row!["Token0 used", quote.amount0]);
    table.add_row(row!["Token1 used", quote.amount1]);
    table.add_row(row!["Binding side", format!("{:?}", quote.binding_side)]);
    table.printstd();
    Ok(())
}
