//! Domain layer
//!
//! Entities and business rules for wallet migration.

pub mod entities;

pub use entities::{WalletEntropy, WalletTransfer};
