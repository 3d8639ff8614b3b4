//! Cryptographic functionality for the migration core
//!
//! This module provides the ephemeral session keys, ECDH key agreement, and
//! authenticated encryption used by the migration protocol.
//!
//! SECURITY: sensitive material is kept in zeroized memory, session keys are
//! single-use, and all payload decryption is authenticated.

pub mod agreement;
pub mod encryption;
pub mod keys;

// Re-export all public items from submodules
pub use agreement::*;
pub use encryption::*;
pub use keys::*;
