//! Deep-link message channel
//!
//! Each installation owns one channel for its role. Inbound app links are
//! screened, decoded, and handed to the subscribed delegate. A message that
//! arrives before anyone subscribes is held in a single pending slot and
//! delivered when a delegate attaches.

use crate::core::message::{DeepLinkCodec, MigrationMessage};
use crate::shared::types::{MigrationConfig, MigrationResult, PeerRole};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;
use url::Url;

/// Receiver of inbound migration messages
#[async_trait]
pub trait ChannelDelegate: Send + Sync {
    async fn did_receive(&self, message: MigrationMessage);
}

struct ChannelState {
    delegate: Option<Arc<dyn ChannelDelegate>>,
    pending: Option<MigrationMessage>,
}

/// Deep-link channel for one end of a migration
pub struct DeepLinkChannel {
    role: PeerRole,
    config: MigrationConfig,
    codec: DeepLinkCodec,
    state: Mutex<ChannelState>,
}

impl DeepLinkChannel {
    pub fn new(role: PeerRole, config: MigrationConfig) -> Self {
        Self {
            role,
            config,
            codec: DeepLinkCodec::new(),
            state: Mutex::new(ChannelState {
                delegate: None,
                pending: None,
            }),
        }
    }

    pub fn role(&self) -> PeerRole {
        self.role
    }

    /// Serialize an outbound message into a link addressed to the peer
    pub fn prepare(&self, message: &MigrationMessage) -> MigrationResult<Url> {
        self.codec.encode(message, self.config.peer_scheme(self.role))
    }

    /// Subscribe a delegate, flushing any pending message to it
    pub async fn set_delegate(&self, delegate: Arc<dyn ChannelDelegate>) {
        let pending = {
            let mut state = self.state.lock().await;
            state.delegate = Some(delegate.clone());
            state.pending.take()
        };

        if let Some(message) = pending {
            log::debug!("Delivering pending {} message", message.action());
            delegate.did_receive(message).await;
        }
    }

    /// Drop the current delegate; later messages queue in the pending slot
    pub async fn clear_delegate(&self) {
        self.state.lock().await.delegate = None;
    }

    /// Handle an app link received by the host application
    ///
    /// Returns `Ok(true)` when the link was a migration message for this
    /// channel. Unparseable or foreign links are ignored with `Ok(false)`.
    pub async fn handle_url(&self, link: &str) -> MigrationResult<bool> {
        let url = match Url::parse(link) {
            Ok(url) => url,
            Err(e) => {
                log::warn!("Ignoring unparseable app link: {}", e);
                return Ok(false);
            }
        };

        if url.scheme() != self.config.own_scheme(self.role) {
            log::debug!("Ignoring app link with foreign scheme {}", url.scheme());
            return Ok(false);
        }

        let message = match self.codec.decode(&url) {
            Ok(message) => message,
            Err(e) => {
                log::warn!("Ignoring malformed migration link: {}", e);
                return Ok(false);
            }
        };

        self.deliver(message).await;
        Ok(true)
    }

    async fn deliver(&self, message: MigrationMessage) {
        let mut state = self.state.lock().await;
        match state.delegate.clone() {
            Some(delegate) => {
                drop(state);
                delegate.did_receive(message).await;
            }
            None => {
                if state.pending.is_some() {
                    log::warn!("Replacing pending migration message with a newer one");
                }
                state.pending = Some(message);
            }
        }
    }

    /// Whether a message is waiting for a delegate
    pub async fn has_pending(&self) -> bool {
        self.state.lock().await.pending.is_some()
    }
}
