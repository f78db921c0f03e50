//! Protocol layer for Sealbox
//!
//! This module provides:
//! - `cipher`: Hybrid message encryption to a verified lock key
//! - `seed_transfer`: Fingerprint-gated device-to-device seed transfer
//! - `request`: Endpoint-scoped request authentication

pub mod cipher;
pub mod request;
pub mod seed_transfer;

pub use cipher::MessageCipher;
pub use request::{sign_request, verify_inbox_signature, verify_request_signature, Endpoint};
pub use seed_transfer::{send_seed, SeedTransferChannel};
