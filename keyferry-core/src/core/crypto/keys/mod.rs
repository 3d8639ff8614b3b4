//! Session key material
//!
//! This module contains the single-use ephemeral keypair backing a migration
//! session.

pub mod ephemeral_keypair;

pub use ephemeral_keypair::EphemeralKeypair;
