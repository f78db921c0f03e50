//! Authenticated Encryption with Associated Data (AEAD)
//!
//! Implements AES-256-GCM for message and seed encryption. Nonces are chosen
//! by the caller and travel in the blob header, so both directions of the
//! protocol share one pair of functions.

use aes_gcm::{
    aead::{Aead, KeyInit},
    Aes256Gcm, Nonce,
};

use crate::error::{Error, Result};

/// Size of the encryption key in bytes
pub const KEY_SIZE: usize = 32;
/// Size of the nonce in bytes
pub const NONCE_SIZE: usize = 12;
/// Size of the authentication tag in bytes
pub const TAG_SIZE: usize = 16;

/// Encrypt a message under `key` and `nonce`
///
/// The caller must never reuse a `(key, nonce)` pair; both are drawn fresh
/// per message by the protocol layer.
pub fn seal(key: &[u8; KEY_SIZE], nonce: &[u8; NONCE_SIZE], plaintext: &[u8]) -> Result<Vec<u8>> {
    let cipher = Aes256Gcm::new(key.into());
    cipher
        .encrypt(Nonce::from_slice(nonce), plaintext)
        .map_err(|_| Error::Encryption)
}

/// Decrypt a message under `key` and `nonce`
///
/// Fails with [`Error::AuthenticationFailure`] if the tag does not verify.
pub fn open(key: &[u8; KEY_SIZE], nonce: &[u8; NONCE_SIZE], ciphertext: &[u8]) -> Result<Vec<u8>> {
    let cipher = Aes256Gcm::new(key.into());
    cipher
        .decrypt(Nonce::from_slice(nonce), ciphertext)
        .map_err(|_| Error::AuthenticationFailure)
}
