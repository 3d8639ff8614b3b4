//! Migration protocol messages
//!
//! Three messages make up the handshake: the origin announces itself with
//! Start, the destination answers with Accepted and its public key, and the
//! origin finishes with Complete carrying the encrypted wallet entropy.

pub mod codec;

pub use codec::DeepLinkCodec;

use crate::shared::constants::{ACTION_ACCEPT, ACTION_COMPLETE, ACTION_START};

/// A message exchanged between the two installations via deep links
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MigrationMessage {
    /// Step 1: origin announces the migration and the scheme to reply to
    Start { origin_scheme: String },
    /// Step 2: destination accepts with its ephemeral public key
    Accepted { destination_public_key: Vec<u8> },
    /// Step 3: origin sends its ephemeral public key and the encrypted entropy
    Complete {
        origin_public_key: Vec<u8>,
        payload: Vec<u8>,
        wallet_name: String,
    },
}

impl MigrationMessage {
    /// The deep-link action string for this message
    pub fn action(&self) -> &'static str {
        match self {
            MigrationMessage::Start { .. } => ACTION_START,
            MigrationMessage::Accepted { .. } => ACTION_ACCEPT,
            MigrationMessage::Complete { .. } => ACTION_COMPLETE,
        }
    }
}
