use super::EncryptionAlgorithm;
use crate::shared::constants::{NONCE_SIZE, TAG_SIZE};
use crate::shared::error::MigrationError;
use crate::shared::types::MigrationResult;

/// Encrypted data structure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncryptedData {
    pub algorithm: EncryptionAlgorithm,
    pub ciphertext: Vec<u8>,
    pub nonce: Vec<u8>,
    pub tag: Vec<u8>,
}

impl EncryptedData {
    /// Encode for the wire as `nonce || ciphertext || tag`
    ///
    /// Protocol v1 pins AES-256-GCM on the wire, so the algorithm is not
    /// carried in the payload.
    pub fn to_wire(&self) -> Vec<u8> {
        let mut wire = Vec::with_capacity(self.nonce.len() + self.ciphertext.len() + self.tag.len());
        wire.extend_from_slice(&self.nonce);
        wire.extend_from_slice(&self.ciphertext);
        wire.extend_from_slice(&self.tag);
        wire
    }

    /// Decode a wire payload produced by `to_wire`
    pub fn from_wire(wire: &[u8]) -> MigrationResult<Self> {
        if wire.len() < NONCE_SIZE + TAG_SIZE {
            return Err(MigrationError::validation(format!(
                "Encrypted payload too short: {} bytes",
                wire.len()
            )));
        }

        let nonce = wire[..NONCE_SIZE].to_vec();
        let ciphertext = wire[NONCE_SIZE..wire.len() - TAG_SIZE].to_vec();
        let tag = wire[wire.len() - TAG_SIZE..].to_vec();

        Ok(Self {
            algorithm: EncryptionAlgorithm::AES256GCM,
            ciphertext,
            nonce,
            tag,
        })
    }
}
