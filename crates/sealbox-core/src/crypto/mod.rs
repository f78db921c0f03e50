//! Cryptographic primitives for Sealbox
//!
//! This module provides:
//! - `sig`: ML-DSA-87 signatures (identity binding, request authentication)
//! - `kem`: ML-KEM-1024 key encapsulation (hybrid message encryption)
//! - `aead`: Authenticated encryption (AES-256-GCM)
//! - `kdf`: HKDF-SHA3-512 message-key derivation
//! - `fingerprint`: Human-comparable key fingerprints

pub mod aead;
pub mod fingerprint;
pub mod kdf;
pub mod kem;
pub mod sig;

pub use fingerprint::{fingerprint, DEFAULT_FINGERPRINT_LENGTH};
pub use kem::{KemCiphertext, KemKeyPair, KemPublicKey, SharedSecret};
pub use sig::{Signature, SigningKeyPair, SigningPublicKey};
