pub mod position;

pub use position::VaultPosition;
