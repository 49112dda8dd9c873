pub mod account;
pub mod tick_range;

pub use account::{Address, Recipient};
pub use tick_range::{PricePosition, TickBounds, TickRange};
