//! Migration session
//!
//! A session represents one migration attempt on one end of the channel. It
//! owns the ephemeral keypair for that attempt; deriving the shared transfer
//! key consumes the keypair, so a session can complete at most one exchange.

use crate::core::crypto::agreement::{derive_shared_key, parse_peer_public_key};
use crate::core::crypto::keys::EphemeralKeypair;
use crate::shared::constants::{COMPRESSED_PUBLIC_KEY_SIZE, SHARED_KEY_SIZE};
use crate::shared::types::{MigrationResult, PeerRole};
use crate::shared::utils::generate_id;
use chrono::{DateTime, Utc};
use zeroize::Zeroizing;

/// One migration attempt on one end of the channel
pub struct MigrationSession {
    id: String,
    role: PeerRole,
    keypair: EphemeralKeypair,
    created_at: DateTime<Utc>,
}

impl MigrationSession {
    /// Start a fresh session with a newly generated keypair
    pub fn new(role: PeerRole) -> MigrationResult<Self> {
        let session = Self {
            id: generate_id(),
            role,
            keypair: EphemeralKeypair::generate()?,
            created_at: Utc::now(),
        };

        log::debug!("Created {:?} migration session {}", role, session.id);
        Ok(session)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn role(&self) -> PeerRole {
        self.role
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Compressed public key to send to the peer
    pub fn public_key_bytes(&self) -> [u8; COMPRESSED_PUBLIC_KEY_SIZE] {
        self.keypair.public_key_bytes()
    }

    /// Whether this session has already performed its key exchange
    pub fn is_consumed(&self) -> bool {
        self.keypair.is_consumed()
    }

    /// Derive the symmetric transfer key from the peer's public key
    ///
    /// Consumes the session's keypair; a second call fails deterministically.
    pub fn derive_shared_key(
        &mut self,
        peer_public_key: &[u8],
    ) -> MigrationResult<Zeroizing<[u8; SHARED_KEY_SIZE]>> {
        let peer = parse_peer_public_key(peer_public_key)?;
        self.keypair
            .consume(|secret| derive_shared_key(secret, &peer))
    }
}
