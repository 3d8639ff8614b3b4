//! Key agreement
//!
//! ECDH over secp256k1 followed by HKDF-SHA256 expansion into the symmetric
//! transfer key. Both ends derive the identical key from their own secret and
//! the peer's public key.

use crate::shared::constants::{COMPRESSED_PUBLIC_KEY_SIZE, HKDF_INFO, SHARED_KEY_SIZE};
use crate::shared::error::MigrationError;
use crate::shared::types::MigrationResult;
use hkdf::Hkdf;
use secp256k1::ecdh::SharedSecret;
use secp256k1::{PublicKey, SecretKey};
use sha2::Sha256;
use zeroize::Zeroizing;

/// Derive the 32-byte symmetric transfer key from our secret and the peer's public key
pub fn derive_shared_key(
    own_secret: &SecretKey,
    peer_public: &PublicKey,
) -> MigrationResult<Zeroizing<[u8; SHARED_KEY_SIZE]>> {
    let shared_secret = SharedSecret::new(peer_public, own_secret);
    let ikm = Zeroizing::new(shared_secret.secret_bytes());

    let hk = Hkdf::<Sha256>::new(None, ikm.as_ref());
    let mut key = Zeroizing::new([0u8; SHARED_KEY_SIZE]);
    hk.expand(HKDF_INFO, &mut *key)
        .map_err(|e| MigrationError::crypto(format!("HKDF expansion failed: {}", e)))?;

    Ok(key)
}

/// Parse a compressed peer public key received over the wire
pub fn parse_peer_public_key(bytes: &[u8]) -> MigrationResult<PublicKey> {
    if bytes.len() != COMPRESSED_PUBLIC_KEY_SIZE {
        return Err(MigrationError::validation(format!(
            "Public key must be {} bytes, got {}",
            COMPRESSED_PUBLIC_KEY_SIZE,
            bytes.len()
        )));
    }

    PublicKey::from_slice(bytes)
        .map_err(|e| MigrationError::validation(format!("Invalid public key: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::crypto::keys::EphemeralKeypair;

    #[test]
    fn test_shared_key_is_symmetric() {
        let mut origin = EphemeralKeypair::generate().expect("Failed to generate keypair");
        let mut destination = EphemeralKeypair::generate().expect("Failed to generate keypair");

        let origin_public = origin.public_key();
        let destination_public = destination.public_key();

        let origin_key = origin
            .consume(|secret| derive_shared_key(secret, &destination_public))
            .expect("Origin derivation failed");
        let destination_key = destination
            .consume(|secret| derive_shared_key(secret, &origin_public))
            .expect("Destination derivation failed");

        assert_eq!(*origin_key, *destination_key);
    }

    #[test]
    fn test_mismatched_keys_derive_different_keys() {
        let mut origin = EphemeralKeypair::generate().expect("Failed to generate keypair");
        let mut destination = EphemeralKeypair::generate().expect("Failed to generate keypair");
        let stranger = EphemeralKeypair::generate().expect("Failed to generate keypair");

        let destination_public = destination.public_key();
        let stranger_public = stranger.public_key();

        let origin_key = origin
            .consume(|secret| derive_shared_key(secret, &destination_public))
            .expect("Origin derivation failed");
        let wrong_key = destination
            .consume(|secret| derive_shared_key(secret, &stranger_public))
            .expect("Destination derivation failed");

        assert_ne!(*origin_key, *wrong_key);
    }

    #[test]
    fn test_parse_peer_public_key() {
        let keypair = EphemeralKeypair::generate().expect("Failed to generate keypair");
        let bytes = keypair.public_key_bytes();

        let parsed = parse_peer_public_key(&bytes).expect("Failed to parse public key");
        assert_eq!(parsed, keypair.public_key());
    }

    #[test]
    fn test_parse_rejects_bad_lengths() {
        assert!(parse_peer_public_key(&[]).is_err());
        assert!(parse_peer_public_key(&[0x02; 32]).is_err());
        assert!(parse_peer_public_key(&[0x02; 65]).is_err());
    }

    #[test]
    fn test_parse_rejects_invalid_point() {
        // Valid length, invalid curve point
        let mut bytes = [0u8; COMPRESSED_PUBLIC_KEY_SIZE];
        bytes[0] = 0x02;
        assert!(parse_peer_public_key(&bytes).is_err());
    }
}
