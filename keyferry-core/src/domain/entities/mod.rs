//! Domain entities
//!
//! This module contains the entities that represent the core business concept
//! of a wallet migration.

pub mod transfer;

pub use transfer::{WalletEntropy, WalletTransfer};
