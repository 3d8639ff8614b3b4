//! Shared types for the migration core
//!
//! This module contains common types used throughout the migration core.

use crate::shared::constants::{
    DEFAULT_DESTINATION_SCHEME, DEFAULT_ORIGIN_SCHEME, ENV_DESTINATION_SCHEME, ENV_ORIGIN_SCHEME,
};
use crate::shared::error::MigrationError;
use serde::{Deserialize, Serialize};
use std::env;

/// Result type for migration operations
pub type MigrationResult<T> = Result<T, MigrationError>;

/// Role of a peer in a migration attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeerRole {
    /// The installation that currently holds the wallet
    Origin,
    /// The installation that receives the wallet
    Destination,
}

impl PeerRole {
    /// The role on the other end of the channel
    pub fn counterpart(&self) -> PeerRole {
        match self {
            PeerRole::Origin => PeerRole::Destination,
            PeerRole::Destination => PeerRole::Origin,
        }
    }
}

/// Deep-link scheme configuration for both ends of a migration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MigrationConfig {
    pub origin_scheme: String,
    pub destination_scheme: String,
}

impl MigrationConfig {
    pub fn new(origin_scheme: String, destination_scheme: String) -> MigrationResult<Self> {
        let config = Self {
            origin_scheme,
            destination_scheme,
        };
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from environment variables with safe defaults
    pub fn from_env() -> MigrationResult<Self> {
        let origin_scheme =
            env::var(ENV_ORIGIN_SCHEME).unwrap_or_else(|_| DEFAULT_ORIGIN_SCHEME.to_string());
        let destination_scheme = env::var(ENV_DESTINATION_SCHEME)
            .unwrap_or_else(|_| DEFAULT_DESTINATION_SCHEME.to_string());

        Self::new(origin_scheme, destination_scheme)
    }

    /// The scheme a peer with the given role sends its messages to
    pub fn peer_scheme(&self, role: PeerRole) -> &str {
        match role {
            PeerRole::Origin => &self.destination_scheme,
            PeerRole::Destination => &self.origin_scheme,
        }
    }

    /// The scheme a peer with the given role receives messages on
    pub fn own_scheme(&self, role: PeerRole) -> &str {
        match role {
            PeerRole::Origin => &self.origin_scheme,
            PeerRole::Destination => &self.destination_scheme,
        }
    }

    fn validate(&self) -> MigrationResult<()> {
        validate_scheme(&self.origin_scheme)?;
        validate_scheme(&self.destination_scheme)?;
        Ok(())
    }
}

impl Default for MigrationConfig {
    fn default() -> Self {
        Self {
            origin_scheme: DEFAULT_ORIGIN_SCHEME.to_string(),
            destination_scheme: DEFAULT_DESTINATION_SCHEME.to_string(),
        }
    }
}

/// Validate a deep-link scheme per RFC 3986 (ALPHA *( ALPHA / DIGIT / "+" / "-" / "." ))
pub fn validate_scheme(scheme: &str) -> MigrationResult<()> {
    if scheme.is_empty() {
        return Err(MigrationError::config("Scheme cannot be empty"));
    }

    let mut chars = scheme.chars();
    let first = chars.next().unwrap_or(' ');
    if !first.is_ascii_alphabetic() {
        return Err(MigrationError::config(
            "Scheme must start with an ASCII letter",
        ));
    }

    if !chars.all(|c| c.is_ascii_alphanumeric() || c == '+' || c == '-' || c == '.') {
        return Err(MigrationError::config(
            "Scheme contains invalid characters",
        ));
    }

    Ok(())
}
