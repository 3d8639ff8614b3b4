//! Wallet transfer entity and related value objects
//!
//! This module contains the payload a migration moves between installations:
//! the wallet's seed entropy and its display name.

use crate::shared::error::MigrationError;
use crate::shared::types::MigrationResult;
use crate::shared::utils::{validate_entropy_length, validate_wallet_name};
use bip39::Mnemonic;
use zeroize::Zeroizing;

/// Wallet seed entropy
///
/// Does not implement Debug, Serialize, or Deserialize to prevent sensitive
/// data exposure. Bytes are zeroized on drop.
pub struct WalletEntropy {
    bytes: Zeroizing<Vec<u8>>,
}

impl WalletEntropy {
    /// Wrap seed entropy, validating the length against BIP39 sizes
    pub fn new(bytes: Vec<u8>) -> MigrationResult<Self> {
        let bytes = Zeroizing::new(bytes);
        validate_entropy_length(bytes.len())?;
        Ok(Self { bytes })
    }

    /// Generate fresh entropy of the given byte length
    pub fn generate(length: usize) -> MigrationResult<Self> {
        validate_entropy_length(length)?;
        Self::new(crate::shared::utils::generate_random_bytes(length))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Render the entropy as a BIP39 mnemonic for wallet import
    pub fn to_mnemonic(&self) -> MigrationResult<String> {
        let mnemonic = Mnemonic::from_entropy(&self.bytes)
            .map_err(|e| MigrationError::validation(format!("Invalid entropy: {}", e)))?;
        Ok(mnemonic.to_string())
    }
}

/// The payload carried by a completed migration
pub struct WalletTransfer {
    wallet_name: String,
    entropy: WalletEntropy,
}

impl WalletTransfer {
    pub fn new(wallet_name: String, entropy: WalletEntropy) -> MigrationResult<Self> {
        validate_wallet_name(&wallet_name)?;
        Ok(Self {
            wallet_name,
            entropy,
        })
    }

    pub fn wallet_name(&self) -> &str {
        &self.wallet_name
    }

    pub fn entropy(&self) -> &WalletEntropy {
        &self.entropy
    }

    pub fn into_entropy(self) -> WalletEntropy {
        self.entropy
    }
}
