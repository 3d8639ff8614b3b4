//! KeyFerry Migration Core
//!
//! Secure cross-device wallet migration core for KeyFerry.
//! Moves a wallet's seed entropy between two app installations over deep
//! links, protected by an ephemeral ECDH key exchange and authenticated
//! encryption.
//!
//! ## Protocol
//!
//! 1. The origin installation emits a `Start` link announcing its scheme.
//! 2. The destination answers `Accepted` with its ephemeral public key.
//! 3. The origin derives the shared transfer key, encrypts the wallet
//!    entropy, and emits `Complete`.
//! 4. The destination derives the same key, decrypts, and imports the wallet.
//!
//! ## Security Features
//!
//! - Single-use ephemeral session keys, zeroized after the exchange
//! - Authenticated encryption; tampered or replayed links fail, never corrupt
//! - Malformed deep links are ignored without state changes
//!
//! ## Usage
//!
//! ```no_run
//! use keyferry_core::{MigrationConfig, OriginFlow, WalletEntropy, WalletTransfer};
//!
//! # fn main() -> Result<(), keyferry_core::MigrationError> {
//! let entropy = WalletEntropy::generate(16)?;
//! let transfer = WalletTransfer::new("My Wallet".to_string(), entropy)?;
//!
//! let mut origin = OriginFlow::new(MigrationConfig::from_env()?, transfer);
//! let start = origin.start()?;
//! # Ok(())
//! # }
//! ```

use dotenv::dotenv;

// Re-export main modules for easy access
pub mod core;
pub mod domain;
pub mod shared;

// Re-export main types
pub use crate::core::channel::{ChannelDelegate, DeepLinkChannel};
pub use crate::core::crypto::encryption::{EncryptedData, EncryptionAlgorithm, EncryptionManager};
pub use crate::core::message::{DeepLinkCodec, MigrationMessage};
pub use crate::core::migration::{
    DestinationEvent, DestinationFlow, DestinationState, OriginFlow, OriginState,
};
pub use crate::core::session::MigrationSession;
pub use crate::domain::entities::{WalletEntropy, WalletTransfer};
pub use crate::shared::error::MigrationError;
pub use crate::shared::types::{MigrationConfig, MigrationResult, PeerRole};

/// Initialize logging
pub fn init() {
    let _ = env_logger::try_init();
}

/// Migration core handle holding the resolved configuration
pub struct MigrationCore {
    config: MigrationConfig,
}

impl MigrationCore {
    pub fn config(&self) -> &MigrationConfig {
        &self.config
    }

    /// Build the channel for this installation's role
    pub fn channel(&self, role: PeerRole) -> DeepLinkChannel {
        DeepLinkChannel::new(role, self.config.clone())
    }

    /// Build the origin flow for a wallet held on this installation
    pub fn origin_flow(&self, transfer: WalletTransfer) -> OriginFlow {
        OriginFlow::new(self.config.clone(), transfer)
    }

    /// Build the destination flow for an incoming migration
    pub fn destination_flow(&self) -> DestinationFlow {
        DestinationFlow::new()
    }
}

/// Initialize the migration core with configuration from .env or safe defaults
pub fn init_migration_core() -> MigrationResult<MigrationCore> {
    dotenv().ok(); // Load .env if present

    let config = MigrationConfig::from_env()?;
    log::info!(
        "Migration core initialized (origin scheme {}, destination scheme {})",
        config.origin_scheme,
        config.destination_scheme
    );

    Ok(MigrationCore { config })
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
pub const AUTHORS: &str = env!("CARGO_PKG_AUTHORS");
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");
