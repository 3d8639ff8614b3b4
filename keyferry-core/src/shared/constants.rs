//! Constants for the migration core
//!
//! This module contains all constants used throughout the migration core.

// Protocol constants
pub const PROTOCOL_VERSION: u8 = 1;
pub const HKDF_INFO: &[u8] = b"keyferry/migration/v1";
pub const DEEP_LINK_HOST: &str = "migration";

// Deep link actions
pub const ACTION_START: &str = "start";
pub const ACTION_ACCEPT: &str = "accept";
pub const ACTION_COMPLETE: &str = "complete";

// Deep link query parameter names
pub const PARAM_VERSION: &str = "v";
pub const PARAM_ORIGIN_SCHEME: &str = "origin";
pub const PARAM_PUBLIC_KEY: &str = "pubkey";
pub const PARAM_PAYLOAD: &str = "payload";
pub const PARAM_WALLET_NAME: &str = "name";

// Default app schemes, overridable via environment
pub const DEFAULT_ORIGIN_SCHEME: &str = "keyferry";
pub const DEFAULT_DESTINATION_SCHEME: &str = "keyferry-next";

// Security constants
pub const PRIVATE_KEY_SIZE: usize = 32;
pub const COMPRESSED_PUBLIC_KEY_SIZE: usize = 33;
pub const SHARED_KEY_SIZE: usize = 32;
pub const NONCE_SIZE: usize = 12;
pub const TAG_SIZE: usize = 16;
pub const AES_KEY_SIZE: usize = 32;
pub const CHACHA_KEY_SIZE: usize = 32;

// Wallet constants
pub const WALLET_NAME_MIN_LENGTH: usize = 1;
pub const WALLET_NAME_MAX_LENGTH: usize = 50;

// Admissible BIP39 entropy lengths in bytes (12 to 24 word mnemonics)
pub const VALID_ENTROPY_SIZES: &[usize] = &[16, 20, 24, 28, 32];

// Environment variable names
pub const ENV_ORIGIN_SCHEME: &str = "KEYFERRY_ORIGIN_SCHEME";
pub const ENV_DESTINATION_SCHEME: &str = "KEYFERRY_DESTINATION_SCHEME";

// Development and testing constants
pub const DEV_MODE: bool = cfg!(debug_assertions);
pub const LOG_LEVEL: &str = if cfg!(debug_assertions) { "debug" } else { "info" };

// Build information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");
pub const AUTHORS: &str = env!("CARGO_PKG_AUTHORS");
