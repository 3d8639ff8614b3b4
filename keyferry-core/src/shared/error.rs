//! Error handling for the migration core
//!
//! This module defines the error types used throughout the migration core.

use thiserror::Error;

/// Migration error type
#[derive(Error, Debug, Clone)]
pub enum MigrationError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Cryptographic error: {0}")]
    Crypto(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Protocol error: {0}")]
    Protocol(String),

    #[error("Channel error: {0}")]
    Channel(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl MigrationError {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a cryptographic error
    pub fn crypto(message: impl Into<String>) -> Self {
        Self::Crypto(message.into())
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a protocol error
    pub fn protocol(message: impl Into<String>) -> Self {
        Self::Protocol(message.into())
    }

    /// Create a channel error
    pub fn channel(message: impl Into<String>) -> Self {
        Self::Channel(message.into())
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }
}

// Standard library error conversions
impl From<std::io::Error> for MigrationError {
    fn from(err: std::io::Error) -> Self {
        Self::internal(format!("IO error: {}", err))
    }
}

impl From<hex::FromHexError> for MigrationError {
    fn from(err: hex::FromHexError) -> Self {
        Self::validation(format!("Hex decoding error: {}", err))
    }
}

impl From<serde_json::Error> for MigrationError {
    fn from(err: serde_json::Error) -> Self {
        Self::internal(format!("JSON error: {}", err))
    }
}

impl From<tokio::task::JoinError> for MigrationError {
    fn from(err: tokio::task::JoinError) -> Self {
        Self::internal(format!("Task join error: {}", err))
    }
}

// Encoding error conversions
impl From<url::ParseError> for MigrationError {
    fn from(err: url::ParseError) -> Self {
        Self::validation(format!("URL parse error: {}", err))
    }
}

impl From<base64::DecodeError> for MigrationError {
    fn from(err: base64::DecodeError) -> Self {
        Self::validation(format!("Base64 decoding error: {}", err))
    }
}

impl From<bip39::Error> for MigrationError {
    fn from(err: bip39::Error) -> Self {
        Self::validation(format!("BIP39 error: {}", err))
    }
}

// Cryptographic error conversions
impl From<secp256k1::Error> for MigrationError {
    fn from(err: secp256k1::Error) -> Self {
        Self::crypto(format!("Secp256k1 error: {}", err))
    }
}

impl From<sha2::digest::InvalidLength> for MigrationError {
    fn from(err: sha2::digest::InvalidLength) -> Self {
        Self::crypto(format!("Digest error: {}", err))
    }
}

impl From<aes_gcm::Error> for MigrationError {
    fn from(err: aes_gcm::Error) -> Self {
        Self::crypto(format!("AEAD error: {}", err))
    }
}
