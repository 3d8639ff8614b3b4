//! Utility functions for the migration core
//!
//! This module contains common utility functions used throughout the migration core.

use crate::shared::constants::{
    VALID_ENTROPY_SIZES, WALLET_NAME_MAX_LENGTH, WALLET_NAME_MIN_LENGTH,
};
use crate::shared::error::MigrationError;
use rand_core::OsRng;
use rand_core::RngCore;
use std::time::{SystemTime, UNIX_EPOCH};

/// Generate a unique ID
pub fn generate_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Get current timestamp in seconds
pub fn current_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_else(|_| std::time::Duration::from_secs(0))
        .as_secs()
}

/// Validate a wallet display name
pub fn validate_wallet_name(name: &str) -> Result<(), MigrationError> {
    let length = name.chars().count();

    if length < WALLET_NAME_MIN_LENGTH {
        return Err(MigrationError::validation("Wallet name cannot be empty"));
    }

    if length > WALLET_NAME_MAX_LENGTH {
        return Err(MigrationError::validation(format!(
            "Wallet name must be at most {} characters long",
            WALLET_NAME_MAX_LENGTH
        )));
    }

    if name.chars().any(|c| c.is_control()) {
        return Err(MigrationError::validation(
            "Wallet name contains control characters",
        ));
    }

    Ok(())
}

/// Validate a seed entropy length against admissible BIP39 sizes
pub fn validate_entropy_length(length: usize) -> Result<(), MigrationError> {
    if !VALID_ENTROPY_SIZES.contains(&length) {
        return Err(MigrationError::validation(format!(
            "Invalid entropy length: {} bytes",
            length
        )));
    }
    Ok(())
}

/// Convert hex string to bytes
pub fn hex_to_bytes(hex: &str) -> Result<Vec<u8>, MigrationError> {
    let hex = hex.trim_start_matches("0x");
    hex::decode(hex)
        .map_err(|e| MigrationError::validation(format!("Invalid hex string: {}", e)))
}

/// Convert bytes to hex string
pub fn bytes_to_hex(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

/// Generate secure random bytes
pub fn generate_random_bytes(length: usize) -> Vec<u8> {
    let mut bytes = vec![0u8; length];
    let mut rng = OsRng;
    rng.fill_bytes(&mut bytes);
    bytes
}
