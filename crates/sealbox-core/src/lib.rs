//! Sealbox Core - Post-quantum end-to-end encryption for inbox-style messaging
//!
//! This crate provides the client-side protocol layer for a messaging overlay
//! on an untrusted storage server:
//! - Inbox identities (ML-DSA-87 + ML-KEM-1024) restorable from one 96-byte seed
//! - Hybrid message encryption (ML-KEM-1024 + HKDF-SHA3-512 + AES-256-GCM)
//! - Fingerprint-gated seed transfer between devices
//! - Endpoint-scoped request signatures the server verifies against published ids
//! - Varint framing, block padding, and base-85 text encoding
//!
//! The storage server only ever sees opaque blobs and public keys: it cannot
//! read messages, forge requests, or substitute identities.

pub mod crypto;
pub mod error;
pub mod inbox;
pub mod protocol;
pub mod schema;
pub mod wire;

pub use error::{Error, Result};
