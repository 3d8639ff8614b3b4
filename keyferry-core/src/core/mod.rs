//! Core migration functionality
//!
//! This module contains the protocol building blocks: crypto, messages,
//! sessions, the deep-link channel, and the two migration flows.

pub mod channel;
pub mod crypto;
pub mod message;
pub mod migration;
pub mod session;
