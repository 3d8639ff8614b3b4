//! Migration flows
//!
//! State machines for the two ends of the handshake. The origin holds the
//! wallet and drives steps 1 and 3; the destination answers step 2 and
//! performs the import in step 4. Out-of-order messages are protocol errors
//! and leave the state untouched.

use crate::core::crypto::encryption::{EncryptedData, EncryptionManager};
use crate::core::message::MigrationMessage;
use crate::core::session::MigrationSession;
use crate::domain::entities::{WalletEntropy, WalletTransfer};
use crate::shared::error::MigrationError;
use crate::shared::types::{MigrationConfig, MigrationResult, PeerRole};

/// States of the origin side
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OriginState {
    Idle,
    AwaitingAccept,
    Finished,
}

/// Origin side of a migration: announces, then encrypts and sends the wallet
pub struct OriginFlow {
    config: MigrationConfig,
    state: OriginState,
    session: Option<MigrationSession>,
    transfer: Option<WalletTransfer>,
    encryption: EncryptionManager,
}

impl OriginFlow {
    pub fn new(config: MigrationConfig, transfer: WalletTransfer) -> Self {
        Self {
            config,
            state: OriginState::Idle,
            session: None,
            transfer: Some(transfer),
            encryption: EncryptionManager::new_default(),
        }
    }

    pub fn state(&self) -> OriginState {
        self.state
    }

    /// Step 1: open a session and announce the migration to the destination
    pub fn start(&mut self) -> MigrationResult<MigrationMessage> {
        if self.state != OriginState::Idle {
            return Err(MigrationError::protocol("Migration already started"));
        }

        let session = MigrationSession::new(PeerRole::Origin)?;
        log::info!("Starting wallet migration, session {}", session.id());
        self.session = Some(session);
        self.state = OriginState::AwaitingAccept;

        Ok(MigrationMessage::Start {
            origin_scheme: self.config.origin_scheme.clone(),
        })
    }

    /// Step 3: derive the transfer key and send the encrypted wallet
    pub fn handle_accepted(
        &mut self,
        destination_public_key: &[u8],
    ) -> MigrationResult<MigrationMessage> {
        if self.state != OriginState::AwaitingAccept {
            return Err(MigrationError::protocol(format!(
                "Unexpected accept in state {:?}",
                self.state
            )));
        }

        let session = self
            .session
            .as_mut()
            .ok_or_else(|| MigrationError::internal("Missing session"))?;
        let origin_public_key = session.public_key_bytes().to_vec();

        // A malformed peer key fails here without consuming the session,
        // so the destination may retry with a valid link.
        let shared_key = session.derive_shared_key(destination_public_key)?;

        let transfer = self
            .transfer
            .take()
            .ok_or_else(|| MigrationError::internal("Missing wallet transfer"))?;

        let encrypted = self
            .encryption
            .encrypt(transfer.entropy().as_bytes(), shared_key.as_ref())?;

        self.state = OriginState::Finished;
        log::info!("Wallet migration payload sealed");

        Ok(MigrationMessage::Complete {
            origin_public_key,
            payload: encrypted.to_wire(),
            wallet_name: transfer.wallet_name().to_string(),
        })
    }

    /// Dispatch an inbound message to the matching handler
    pub fn handle_message(
        &mut self,
        message: &MigrationMessage,
    ) -> MigrationResult<MigrationMessage> {
        match message {
            MigrationMessage::Accepted {
                destination_public_key,
            } => self.handle_accepted(destination_public_key),
            other => Err(MigrationError::protocol(format!(
                "Origin cannot handle {} message",
                other.action()
            ))),
        }
    }
}

/// States of the destination side
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DestinationState {
    Idle,
    AwaitingComplete,
    Imported,
    Failed,
}

/// Result of feeding a message to the destination flow
pub enum DestinationEvent {
    /// A reply to send back to the origin
    Reply(MigrationMessage),
    /// The migration finished and the wallet was recovered
    Imported(WalletTransfer),
}

/// Destination side of a migration: accepts, then decrypts and imports
pub struct DestinationFlow {
    state: DestinationState,
    session: Option<MigrationSession>,
    origin_scheme: Option<String>,
    encryption: EncryptionManager,
}

impl DestinationFlow {
    pub fn new() -> Self {
        Self {
            state: DestinationState::Idle,
            session: None,
            origin_scheme: None,
            encryption: EncryptionManager::new_default(),
        }
    }

    pub fn state(&self) -> DestinationState {
        self.state
    }

    /// The scheme announced by the origin in its Start message
    pub fn origin_scheme(&self) -> Option<&str> {
        self.origin_scheme.as_deref()
    }

    /// Step 2: open a session and hand our public key to the origin
    pub fn handle_start(&mut self, origin_scheme: &str) -> MigrationResult<MigrationMessage> {
        if self.state != DestinationState::Idle {
            return Err(MigrationError::protocol(format!(
                "Unexpected start in state {:?}",
                self.state
            )));
        }

        crate::shared::types::validate_scheme(origin_scheme)?;

        let session = MigrationSession::new(PeerRole::Destination)?;
        log::info!("Accepting wallet migration, session {}", session.id());

        let destination_public_key = session.public_key_bytes().to_vec();
        self.session = Some(session);
        self.origin_scheme = Some(origin_scheme.to_string());
        self.state = DestinationState::AwaitingComplete;

        Ok(MigrationMessage::Accepted {
            destination_public_key,
        })
    }

    /// Step 4: derive the same transfer key, decrypt, and recover the wallet
    pub fn handle_complete(
        &mut self,
        origin_public_key: &[u8],
        payload: &[u8],
        wallet_name: &str,
    ) -> MigrationResult<WalletTransfer> {
        if self.state != DestinationState::AwaitingComplete {
            return Err(MigrationError::protocol(format!(
                "Unexpected complete in state {:?}",
                self.state
            )));
        }

        // Structural checks first; these leave the session intact. The wallet
        // name travels in plaintext, so it is checked before the key is spent.
        crate::shared::utils::validate_wallet_name(wallet_name)?;
        let encrypted = EncryptedData::from_wire(payload)?;

        let session = self
            .session
            .as_mut()
            .ok_or_else(|| MigrationError::internal("Missing session"))?;
        let shared_key = session.derive_shared_key(origin_public_key)?;

        // The session keypair is spent now; a tampered or replayed payload
        // fails authentication below and the flow cannot be resumed.
        let plaintext = match self.encryption.decrypt(&encrypted, shared_key.as_ref()) {
            Ok(plaintext) => plaintext,
            Err(e) => {
                self.state = DestinationState::Failed;
                log::warn!("Wallet migration payload rejected: {}", e);
                return Err(e);
            }
        };

        // The keypair is spent too once plaintext validation runs; a bad
        // payload must not leave the flow looking retryable.
        let entropy = match WalletEntropy::new(plaintext) {
            Ok(entropy) => entropy,
            Err(e) => {
                self.state = DestinationState::Failed;
                log::warn!("Wallet migration payload invalid: {}", e);
                return Err(e);
            }
        };
        let transfer = WalletTransfer::new(wallet_name.to_string(), entropy)?;

        self.state = DestinationState::Imported;
        log::info!("Wallet migration imported");
        Ok(transfer)
    }

    /// Dispatch an inbound message to the matching handler
    pub fn handle_message(
        &mut self,
        message: &MigrationMessage,
    ) -> MigrationResult<DestinationEvent> {
        match message {
            MigrationMessage::Start { origin_scheme } => {
                Ok(DestinationEvent::Reply(self.handle_start(origin_scheme)?))
            }
            MigrationMessage::Complete {
                origin_public_key,
                payload,
                wallet_name,
            } => Ok(DestinationEvent::Imported(self.handle_complete(
                origin_public_key,
                payload,
                wallet_name,
            )?)),
            other => Err(MigrationError::protocol(format!(
                "Destination cannot handle {} message",
                other.action()
            ))),
        }
    }
}

impl Default for DestinationFlow {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn origin_flow() -> OriginFlow {
        let entropy = WalletEntropy::generate(16).expect("Failed to generate entropy");
        let transfer = WalletTransfer::new("Savings".to_string(), entropy)
            .expect("Failed to create transfer");
        OriginFlow::new(MigrationConfig::default(), transfer)
    }

    fn run_handshake() -> (MigrationMessage, DestinationFlow) {
        let mut origin = origin_flow();
        let mut destination = DestinationFlow::new();

        let start = origin.start().expect("Failed to start");
        let MigrationMessage::Start { origin_scheme } = &start else {
            panic!("Expected start message");
        };

        let accepted = destination
            .handle_start(origin_scheme)
            .expect("Failed to accept");

        let complete = origin
            .handle_message(&accepted)
            .expect("Failed to complete");
        (complete, destination)
    }

    #[test]
    fn test_full_handshake_recovers_wallet() {
        let entropy = WalletEntropy::new(vec![7u8; 32]).expect("Failed to wrap entropy");
        let transfer =
            WalletTransfer::new("Savings".to_string(), entropy).expect("Failed to create transfer");
        let mut origin = OriginFlow::new(MigrationConfig::default(), transfer);
        let mut destination = DestinationFlow::new();

        let start = origin.start().expect("Failed to start");
        let event = destination
            .handle_message(&start)
            .expect("Failed to handle start");
        let DestinationEvent::Reply(accepted) = event else {
            panic!("Expected a reply");
        };

        let complete = origin
            .handle_message(&accepted)
            .expect("Failed to handle accept");
        let event = destination
            .handle_message(&complete)
            .expect("Failed to handle complete");
        let DestinationEvent::Imported(recovered) = event else {
            panic!("Expected an import");
        };

        assert_eq!(recovered.wallet_name(), "Savings");
        assert_eq!(recovered.entropy().as_bytes(), &[7u8; 32]);
        assert_eq!(origin.state(), OriginState::Finished);
        assert_eq!(destination.state(), DestinationState::Imported);
        assert_eq!(destination.origin_scheme(), Some("keyferry"));
    }

    #[test]
    fn test_start_twice_fails() {
        let mut origin = origin_flow();
        origin.start().expect("Failed to start");
        assert!(matches!(
            origin.start(),
            Err(MigrationError::Protocol(_))
        ));
        assert_eq!(origin.state(), OriginState::AwaitingAccept);
    }

    #[test]
    fn test_origin_rejects_out_of_order_messages() {
        let mut origin = origin_flow();

        // Accept before start
        let accepted = MigrationMessage::Accepted {
            destination_public_key: vec![0x02; 33],
        };
        assert!(origin.handle_message(&accepted).is_err());
        assert_eq!(origin.state(), OriginState::Idle);

        // Wrong variant after start
        origin.start().expect("Failed to start");
        let start = MigrationMessage::Start {
            origin_scheme: "keyferry".to_string(),
        };
        assert!(origin.handle_message(&start).is_err());
        assert_eq!(origin.state(), OriginState::AwaitingAccept);
    }

    #[test]
    fn test_destination_rejects_out_of_order_messages() {
        let mut destination = DestinationFlow::new();

        // Complete before start
        let result = destination.handle_complete(&[0x02; 33], &[0u8; 32], "Savings");
        assert!(matches!(result, Err(MigrationError::Protocol(_))));
        assert_eq!(destination.state(), DestinationState::Idle);

        // Second start
        destination.handle_start("keyferry").expect("Failed to accept");
        assert!(destination.handle_start("keyferry").is_err());
        assert_eq!(destination.state(), DestinationState::AwaitingComplete);
    }

    #[test]
    fn test_malformed_accept_key_is_retryable() {
        let mut origin = origin_flow();
        origin.start().expect("Failed to start");

        // Not a curve point
        assert!(origin.handle_accepted(&[0u8; 33]).is_err());
        assert_eq!(origin.state(), OriginState::AwaitingAccept);

        // A valid accept still succeeds afterwards
        let destination = MigrationSession::new(PeerRole::Destination)
            .expect("Failed to create session");
        let complete = origin.handle_accepted(&destination.public_key_bytes());
        assert!(complete.is_ok());
    }

    #[test]
    fn test_tampered_payload_fails_import() {
        let (complete, mut destination) = run_handshake();
        let MigrationMessage::Complete {
            origin_public_key,
            mut payload,
            wallet_name,
        } = complete
        else {
            panic!("Expected complete message");
        };

        let last = payload.len() - 1;
        payload[last] ^= 0x01;

        let result = destination.handle_complete(&origin_public_key, &payload, &wallet_name);
        assert!(matches!(result, Err(MigrationError::Crypto(_))));
        assert_eq!(destination.state(), DestinationState::Failed);
    }

    #[test]
    fn test_complete_from_wrong_origin_key_fails() {
        let (complete, mut destination) = run_handshake();
        let MigrationMessage::Complete {
            payload,
            wallet_name,
            ..
        } = complete
        else {
            panic!("Expected complete message");
        };

        // Substitute an unrelated public key; the derived key cannot match
        let stranger =
            MigrationSession::new(PeerRole::Origin).expect("Failed to create session");
        let result = destination.handle_complete(
            &stranger.public_key_bytes(),
            &payload,
            &wallet_name,
        );
        assert!(matches!(result, Err(MigrationError::Crypto(_))));
    }

    #[test]
    fn test_replayed_complete_fails() {
        let (complete, mut destination) = run_handshake();
        let MigrationMessage::Complete {
            origin_public_key,
            payload,
            wallet_name,
        } = complete
        else {
            panic!("Expected complete message");
        };

        destination
            .handle_complete(&origin_public_key, &payload, &wallet_name)
            .expect("First import must succeed");

        // The session is spent and the state machine refuses a replay
        let replay = destination.handle_complete(&origin_public_key, &payload, &wallet_name);
        assert!(replay.is_err());
    }

    #[test]
    fn test_invalid_wallet_name_rejected_before_key_use() {
        let (complete, mut destination) = run_handshake();
        let MigrationMessage::Complete {
            origin_public_key,
            payload,
            wallet_name,
        } = complete
        else {
            panic!("Expected complete message");
        };

        // The name travels in plaintext and must not cost the session key
        let result = destination.handle_complete(&origin_public_key, &payload, "");
        assert!(matches!(result, Err(MigrationError::Validation(_))));
        assert_eq!(destination.state(), DestinationState::AwaitingComplete);

        // The same message with a valid name still imports
        let recovered = destination
            .handle_complete(&origin_public_key, &payload, &wallet_name)
            .expect("Retry with a valid name must succeed");
        assert_eq!(recovered.wallet_name(), "Savings");
    }

    #[test]
    fn test_invalid_decrypted_entropy_fails_flow() {
        let mut destination = DestinationFlow::new();
        let MigrationMessage::Accepted {
            destination_public_key,
        } = destination.handle_start("keyferry").expect("Failed to accept")
        else {
            panic!("Expected accepted message");
        };

        // A well-authenticated payload whose plaintext is not valid entropy
        let mut origin_session =
            MigrationSession::new(PeerRole::Origin).expect("Failed to create session");
        let origin_public_key = origin_session.public_key_bytes();
        let shared_key = origin_session
            .derive_shared_key(&destination_public_key)
            .expect("Failed to derive shared key");
        let encrypted = EncryptionManager::new_default()
            .encrypt(&[0u8; 15], shared_key.as_ref())
            .expect("Failed to encrypt");

        let result =
            destination.handle_complete(&origin_public_key, &encrypted.to_wire(), "Savings");
        assert!(matches!(result, Err(MigrationError::Validation(_))));
        // The session key is spent, so the flow reports failure instead of
        // inviting a retry that can only error out
        assert_eq!(destination.state(), DestinationState::Failed);

        let retry =
            destination.handle_complete(&origin_public_key, &encrypted.to_wire(), "Savings");
        assert!(matches!(retry, Err(MigrationError::Protocol(_))));
    }

    #[test]
    fn test_truncated_payload_rejected_before_key_use() {
        let (complete, mut destination) = run_handshake();
        let MigrationMessage::Complete {
            origin_public_key,
            wallet_name,
            ..
        } = complete
        else {
            panic!("Expected complete message");
        };

        let result = destination.handle_complete(&origin_public_key, &[0u8; 4], &wallet_name);
        assert!(matches!(result, Err(MigrationError::Validation(_))));
        // Structural failure leaves the flow retryable
        assert_eq!(destination.state(), DestinationState::AwaitingComplete);
    }
}
