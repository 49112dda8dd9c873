//! Reinvestment strategy.

pub mod rebalance;

pub use rebalance::{ReinvestSide, ReinvestmentPlan, plan_reinvestment};
