//! Hybrid message encryption
//!
//! Messages are encrypted to a recipient's lock key by encapsulating a shared
//! secret with ML-KEM-1024, expanding it through HKDF-SHA3-512 with a fresh
//! salt, and sealing the encoded message with AES-256-GCM under a fresh
//! nonce. The resulting blob is opaque to the storage server:
//!
//! ```text
//! salt[32] | nonce[12] | varint(len) kemCT pad | varint(len) aeadCT pad
//! ```
//!
//! Both framed sections are independently zero-padded to the configured block
//! size, which hides the encoded message length from the server to a multiple
//! of the block (0 disables padding).

use rand::{CryptoRng, RngCore};
use zeroize::Zeroizing;

use crate::crypto::aead::{self, NONCE_SIZE};
use crate::crypto::kdf::{derive_message_key, SALT_SIZE};
use crate::crypto::kem::{KemCiphertext, KemKeyPair, KemPublicKey};
use crate::error::{Error, Result};
use crate::schema::MessageSchema;
use crate::wire::{frame_padded, read_padded_frame};

/// Hybrid cipher for application messages
///
/// Holds the caller-supplied message schema and the padding block size. Both
/// sides of a conversation must agree on the padding configuration.
pub struct MessageCipher<S: MessageSchema> {
    schema: S,
    padding: usize,
}

impl<S: MessageSchema> MessageCipher<S> {
    /// Create a cipher with padding disabled
    pub fn new(schema: S) -> Self {
        Self { schema, padding: 0 }
    }

    /// Create a cipher that pads each blob section to `padding` bytes
    pub fn with_padding(schema: S, padding: usize) -> Self {
        Self { schema, padding }
    }

    /// Encrypt a message to a recipient's lock key
    ///
    /// The lock key must have been checked with
    /// [`verify_recipient`](crate::inbox::verify_recipient) (or come from a
    /// registry that already did). Salt and nonce are drawn fresh on every
    /// call; reusing either would break the encryption.
    pub fn encrypt_message<R: RngCore + CryptoRng>(
        &self,
        rng: &mut R,
        recipient_lock_key: &KemPublicKey,
        message: &S::Message,
    ) -> Result<Vec<u8>> {
        let (shared_secret, kem_ciphertext) = recipient_lock_key.encapsulate(rng)?;

        let mut salt = [0u8; SALT_SIZE];
        rng.fill_bytes(&mut salt);
        let key = Zeroizing::new(derive_message_key(shared_secret.as_bytes(), &salt));

        let mut nonce = [0u8; NONCE_SIZE];
        rng.fill_bytes(&mut nonce);

        let encoded = Zeroizing::new(self.schema.encode(message)?);
        let sealed = aead::seal(&key, &nonce, &encoded)?;

        let kem_section = frame_padded(&kem_ciphertext.to_bytes(), self.padding);
        let msg_section = frame_padded(&sealed, self.padding);

        let mut blob =
            Vec::with_capacity(SALT_SIZE + NONCE_SIZE + kem_section.len() + msg_section.len());
        blob.extend_from_slice(&salt);
        blob.extend_from_slice(&nonce);
        blob.extend_from_slice(&kem_section);
        blob.extend_from_slice(&msg_section);
        Ok(blob)
    }

    /// Decrypt a blob with the inbox's unlock key
    pub fn decrypt_message(&self, unlock_key: &KemKeyPair, blob: &[u8]) -> Result<S::Message> {
        if blob.len() < SALT_SIZE + NONCE_SIZE {
            return Err(Error::MalformedBlob("blob shorter than salt and nonce"));
        }
        let (salt, rest) = blob.split_at(SALT_SIZE);
        let (nonce, rest) = rest.split_at(NONCE_SIZE);
        let nonce: &[u8; NONCE_SIZE] = nonce.try_into().expect("split at NONCE_SIZE");

        let (kem_section, rest) = read_padded_frame(rest, self.padding)?;
        let (msg_section, _) = read_padded_frame(rest, self.padding)?;

        let kem_ciphertext = KemCiphertext::from_bytes(kem_section)
            .map_err(|_| Error::MalformedBlob("kem ciphertext has wrong length"))?;
        let shared_secret = unlock_key.decapsulate(&kem_ciphertext)?;
        let key = Zeroizing::new(derive_message_key(shared_secret.as_bytes(), salt));

        let plaintext = Zeroizing::new(aead::open(&key, nonce, msg_section)?);
        self.schema.decode(&plaintext)
    }
}
