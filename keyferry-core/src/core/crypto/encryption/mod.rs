//! Encryption functionality for the migration core
//!
//! This module handles AES-256-GCM and ChaCha20-Poly1305 encryption of the
//! transfer payload.

pub mod encrypted_data;
pub mod encryption_algorithm;
pub mod encryption_manager;

// Re-export all public items from submodules
pub use encrypted_data::*;
pub use encryption_algorithm::*;
pub use encryption_manager::*;
