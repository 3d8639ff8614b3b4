//! Deep-link serialization of migration messages
//!
//! Messages travel as custom-scheme URLs of the form
//! `<peer-scheme>://migration?v=1&action=...`. Binary fields are base64url
//! without padding, so they survive query encoding untouched.

use super::MigrationMessage;
use crate::shared::constants::{
    ACTION_ACCEPT, ACTION_COMPLETE, ACTION_START, DEEP_LINK_HOST, PARAM_ORIGIN_SCHEME,
    PARAM_PAYLOAD, PARAM_PUBLIC_KEY, PARAM_VERSION, PARAM_WALLET_NAME, PROTOCOL_VERSION,
};
use crate::shared::error::MigrationError;
use crate::shared::types::{validate_scheme, MigrationResult};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use std::collections::HashMap;
use url::Url;

/// Codec between migration messages and deep-link URLs
#[derive(Debug, Clone)]
pub struct DeepLinkCodec {
    host: String,
}

impl DeepLinkCodec {
    pub fn new() -> Self {
        Self {
            host: DEEP_LINK_HOST.to_string(),
        }
    }

    /// Serialize a message into a deep link addressed to the peer's scheme
    pub fn encode(&self, message: &MigrationMessage, peer_scheme: &str) -> MigrationResult<Url> {
        validate_scheme(peer_scheme)?;

        let mut url = Url::parse(&format!("{}://{}", peer_scheme, self.host))?;

        {
            let mut query = url.query_pairs_mut();
            query.append_pair(PARAM_VERSION, &PROTOCOL_VERSION.to_string());
            query.append_pair("action", message.action());

            match message {
                MigrationMessage::Start { origin_scheme } => {
                    query.append_pair(PARAM_ORIGIN_SCHEME, origin_scheme);
                }
                MigrationMessage::Accepted {
                    destination_public_key,
                } => {
                    query.append_pair(
                        PARAM_PUBLIC_KEY,
                        &URL_SAFE_NO_PAD.encode(destination_public_key),
                    );
                }
                MigrationMessage::Complete {
                    origin_public_key,
                    payload,
                    wallet_name,
                } => {
                    query.append_pair(PARAM_PUBLIC_KEY, &URL_SAFE_NO_PAD.encode(origin_public_key));
                    query.append_pair(PARAM_PAYLOAD, &URL_SAFE_NO_PAD.encode(payload));
                    query.append_pair(PARAM_WALLET_NAME, wallet_name);
                }
            }
        }

        Ok(url)
    }

    /// Parse a received deep link back into a message
    pub fn decode(&self, url: &Url) -> MigrationResult<MigrationMessage> {
        if url.host_str() != Some(self.host.as_str()) {
            return Err(MigrationError::validation(format!(
                "Unexpected deep link host: {:?}",
                url.host_str()
            )));
        }

        let params: HashMap<String, String> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();

        let version = params
            .get(PARAM_VERSION)
            .ok_or_else(|| MigrationError::validation("Missing protocol version"))?;
        if version != &PROTOCOL_VERSION.to_string() {
            return Err(MigrationError::validation(format!(
                "Unsupported protocol version: {}",
                version
            )));
        }

        let action = params
            .get("action")
            .ok_or_else(|| MigrationError::validation("Missing action"))?;

        match action.as_str() {
            ACTION_START => {
                let origin_scheme = required(&params, PARAM_ORIGIN_SCHEME)?.to_string();
                validate_scheme(&origin_scheme)?;
                Ok(MigrationMessage::Start { origin_scheme })
            }
            ACTION_ACCEPT => {
                let destination_public_key =
                    URL_SAFE_NO_PAD.decode(required(&params, PARAM_PUBLIC_KEY)?)?;
                Ok(MigrationMessage::Accepted {
                    destination_public_key,
                })
            }
            ACTION_COMPLETE => {
                let origin_public_key =
                    URL_SAFE_NO_PAD.decode(required(&params, PARAM_PUBLIC_KEY)?)?;
                let payload = URL_SAFE_NO_PAD.decode(required(&params, PARAM_PAYLOAD)?)?;
                let wallet_name = required(&params, PARAM_WALLET_NAME)?.to_string();
                Ok(MigrationMessage::Complete {
                    origin_public_key,
                    payload,
                    wallet_name,
                })
            }
            other => Err(MigrationError::validation(format!(
                "Unknown action: {}",
                other
            ))),
        }
    }

    /// Parse a raw link string
    pub fn decode_str(&self, link: &str) -> MigrationResult<MigrationMessage> {
        let url = Url::parse(link)?;
        self.decode(&url)
    }
}

impl Default for DeepLinkCodec {
    fn default() -> Self {
        Self::new()
    }
}

fn required<'a>(
    params: &'a HashMap<String, String>,
    name: &str,
) -> MigrationResult<&'a String> {
    params
        .get(name)
        .ok_or_else(|| MigrationError::validation(format!("Missing parameter: {}", name)))
}
