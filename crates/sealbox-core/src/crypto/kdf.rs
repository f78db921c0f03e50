//! Key Derivation
//!
//! Expands a KEM shared secret into the AES-256-GCM message key using
//! HKDF with SHA3-512 and a per-message random salt.

use hkdf::Hkdf;
use sha3::Sha3_512;

/// Domain separation string for message keys
///
/// Part of the wire format; changing it breaks decryption of existing blobs.
pub const MESSAGE_KEY_INFO: &[u8] = b"byom-msg-cipher-v1";

/// Size of the derived message key in bytes
pub const MESSAGE_KEY_SIZE: usize = 32;
/// Size of the per-message salt in bytes
pub const SALT_SIZE: usize = 32;

/// Derive the message encryption key from a KEM shared secret
pub fn derive_message_key(shared_secret: &[u8], salt: &[u8]) -> [u8; MESSAGE_KEY_SIZE] {
    let hkdf = Hkdf::<Sha3_512>::new(Some(salt), shared_secret);
    let mut key = [0u8; MESSAGE_KEY_SIZE];
    hkdf.expand(MESSAGE_KEY_INFO, &mut key)
        .expect("32 bytes is a valid HKDF-SHA3-512 output length");
    key
}
