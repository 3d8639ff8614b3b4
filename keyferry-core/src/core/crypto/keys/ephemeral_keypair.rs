//! Ephemeral session keypair
//!
//! Each migration attempt uses a fresh secp256k1 keypair on both ends. The
//! secret half lives in zeroized memory and can be used for exactly one key
//! agreement before the keypair refuses further use.

use crate::shared::constants::{COMPRESSED_PUBLIC_KEY_SIZE, PRIVATE_KEY_SIZE};
use crate::shared::error::MigrationError;
use crate::shared::types::MigrationResult;
use rand_core::OsRng;
use rand_core::RngCore;
use secp256k1::{PublicKey, Secp256k1, SecretKey};
use zeroize::Zeroizing;

/// Single-use keypair for one migration attempt
///
/// No Debug implementation to prevent key exposure in logs.
/// No Clone implementation to prevent accidental key duplication.
pub struct EphemeralKeypair {
    secret: Zeroizing<[u8; PRIVATE_KEY_SIZE]>,
    public: PublicKey,
    consumed: bool,
}

impl EphemeralKeypair {
    /// Generate a new keypair from the OS random number generator
    pub fn generate() -> MigrationResult<Self> {
        let secp = Secp256k1::new();
        let mut rng = OsRng;

        // A uniformly random 32-byte string is invalid as a secp256k1 scalar
        // with probability ~2^-128, but the loop keeps generation total.
        for _ in 0..8 {
            let mut secret = Zeroizing::new([0u8; PRIVATE_KEY_SIZE]);
            rng.fill_bytes(&mut *secret);

            if let Ok(secret_key) = SecretKey::from_byte_array(*secret) {
                let public = PublicKey::from_secret_key(&secp, &secret_key);
                return Ok(Self {
                    secret,
                    public,
                    consumed: false,
                });
            }
        }

        Err(MigrationError::crypto(
            "Failed to generate a valid secp256k1 keypair",
        ))
    }

    /// The public half of the keypair
    pub fn public_key(&self) -> PublicKey {
        self.public
    }

    /// Compressed 33-byte encoding of the public key
    pub fn public_key_bytes(&self) -> [u8; COMPRESSED_PUBLIC_KEY_SIZE] {
        self.public.serialize()
    }

    /// Whether the secret half has already been used
    pub fn is_consumed(&self) -> bool {
        self.consumed
    }

    /// Use the secret key exactly once
    ///
    /// The closure receives the parsed secret key; afterwards the secret bytes
    /// are zeroized and any further call fails deterministically.
    pub fn consume<F, T>(&mut self, f: F) -> MigrationResult<T>
    where
        F: FnOnce(&SecretKey) -> MigrationResult<T>,
    {
        if self.consumed {
            return Err(MigrationError::crypto(
                "Ephemeral keypair has already been used",
            ));
        }
        self.consumed = true;

        let secret_key = SecretKey::from_byte_array(*self.secret)
            .map_err(|e| MigrationError::crypto(format!("Invalid secret key: {}", e)))?;

        let result = f(&secret_key);

        // Secret bytes are no longer needed after the single use
        self.secret.fill(0);

        result
    }
}
