use super::{EncryptedData, EncryptionAlgorithm};
use crate::shared::constants::{AES_KEY_SIZE, CHACHA_KEY_SIZE, NONCE_SIZE, TAG_SIZE};
use crate::shared::error::MigrationError;
use crate::shared::types::MigrationResult;
use aes_gcm::aead::Aead;
use aes_gcm::{Aes256Gcm, Key, KeyInit, Nonce};
use chacha20poly1305::{ChaCha20Poly1305, Key as ChaChaKey, Nonce as ChaChaNonce};
use rand_core::OsRng;
use rand_core::RngCore;

/// Authenticated encryption manager for the transfer payload
pub struct EncryptionManager {
    algorithm: EncryptionAlgorithm,
}

impl EncryptionManager {
    pub fn new(algorithm: EncryptionAlgorithm) -> Self {
        Self { algorithm }
    }

    /// Protocol v1 uses AES-256-GCM on the wire
    pub fn new_default() -> Self {
        Self::new(EncryptionAlgorithm::AES256GCM)
    }

    /// Encrypt data with a 32-byte key
    pub fn encrypt(&self, data: &[u8], key: &[u8]) -> MigrationResult<EncryptedData> {
        match self.algorithm {
            EncryptionAlgorithm::AES256GCM => self.encrypt_aes_gcm(data, key),
            EncryptionAlgorithm::ChaCha20Poly1305 => self.encrypt_chacha20(data, key),
        }
    }

    /// Decrypt data with a 32-byte key
    ///
    /// Fails with a `Crypto` error on any tag mismatch. A tampered or replayed
    /// payload never yields plaintext.
    pub fn decrypt(&self, encrypted_data: &EncryptedData, key: &[u8]) -> MigrationResult<Vec<u8>> {
        match encrypted_data.algorithm {
            EncryptionAlgorithm::AES256GCM => self.decrypt_aes_gcm(encrypted_data, key),
            EncryptionAlgorithm::ChaCha20Poly1305 => self.decrypt_chacha20(encrypted_data, key),
        }
    }

    fn encrypt_aes_gcm(&self, data: &[u8], key: &[u8]) -> MigrationResult<EncryptedData> {
        if key.len() != AES_KEY_SIZE {
            return Err(MigrationError::crypto("AES-256-GCM requires 32-byte key"));
        }

        let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key));
        let nonce_bytes = generate_nonce();
        let nonce = Nonce::from_slice(&nonce_bytes);

        let ciphertext = cipher
            .encrypt(nonce, data)
            .map_err(|e| MigrationError::crypto(format!("AES-GCM encryption failed: {}", e)))?;

        let (ciphertext_part, tag) = ciphertext.split_at(ciphertext.len() - TAG_SIZE);

        Ok(EncryptedData {
            algorithm: EncryptionAlgorithm::AES256GCM,
            ciphertext: ciphertext_part.to_vec(),
            nonce: nonce_bytes.to_vec(),
            tag: tag.to_vec(),
        })
    }

    fn decrypt_aes_gcm(&self, encrypted_data: &EncryptedData, key: &[u8]) -> MigrationResult<Vec<u8>> {
        if key.len() != AES_KEY_SIZE {
            return Err(MigrationError::crypto("AES-256-GCM requires 32-byte key"));
        }
        if encrypted_data.nonce.len() != NONCE_SIZE {
            return Err(MigrationError::crypto("AES-256-GCM requires 12-byte nonce"));
        }

        let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key));
        let nonce = Nonce::from_slice(&encrypted_data.nonce);

        let mut ciphertext_with_tag = encrypted_data.ciphertext.clone();
        ciphertext_with_tag.extend_from_slice(&encrypted_data.tag);

        cipher
            .decrypt(nonce, ciphertext_with_tag.as_slice())
            .map_err(|e| MigrationError::crypto(format!("AES-GCM decryption failed: {}", e)))
    }

    fn encrypt_chacha20(&self, data: &[u8], key: &[u8]) -> MigrationResult<EncryptedData> {
        if key.len() != CHACHA_KEY_SIZE {
            return Err(MigrationError::crypto(
                "ChaCha20-Poly1305 requires 32-byte key",
            ));
        }

        let cipher = ChaCha20Poly1305::new(ChaChaKey::from_slice(key));
        let nonce_bytes = generate_nonce();
        let nonce = ChaChaNonce::from_slice(&nonce_bytes);

        let ciphertext = cipher.encrypt(nonce, data).map_err(|e| {
            MigrationError::crypto(format!("ChaCha20-Poly1305 encryption failed: {}", e))
        })?;

        let (ciphertext_part, tag) = ciphertext.split_at(ciphertext.len() - TAG_SIZE);

        Ok(EncryptedData {
            algorithm: EncryptionAlgorithm::ChaCha20Poly1305,
            ciphertext: ciphertext_part.to_vec(),
            nonce: nonce_bytes.to_vec(),
            tag: tag.to_vec(),
        })
    }

    fn decrypt_chacha20(&self, encrypted_data: &EncryptedData, key: &[u8]) -> MigrationResult<Vec<u8>> {
        if key.len() != CHACHA_KEY_SIZE {
            return Err(MigrationError::crypto(
                "ChaCha20-Poly1305 requires 32-byte key",
            ));
        }
        if encrypted_data.nonce.len() != NONCE_SIZE {
            return Err(MigrationError::crypto(
                "ChaCha20-Poly1305 requires 12-byte nonce",
            ));
        }

        let cipher = ChaCha20Poly1305::new(ChaChaKey::from_slice(key));
        let nonce = ChaChaNonce::from_slice(&encrypted_data.nonce);

        let mut ciphertext_with_tag = encrypted_data.ciphertext.clone();
        ciphertext_with_tag.extend_from_slice(&encrypted_data.tag);

        cipher
            .decrypt(nonce, ciphertext_with_tag.as_slice())
            .map_err(|e| {
                MigrationError::crypto(format!("ChaCha20-Poly1305 decryption failed: {}", e))
            })
    }
}

/// Generate a fresh random 12-byte nonce
fn generate_nonce() -> [u8; NONCE_SIZE] {
    let mut nonce = [0u8; NONCE_SIZE];
    let mut rng = OsRng;
    rng.fill_bytes(&mut nonce);
    nonce
}
