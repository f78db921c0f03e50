//! Device-to-device seed transfer
//!
//! Moves the 96-byte master seed to a second device through an ephemeral
//! ML-KEM-1024 channel. The transfer key travels over any convenient channel
//! and may be intercepted; the sole defense against an attacker substituting
//! their own key is the fingerprint comparison, which the users perform
//! out-of-band (read aloud, compared visually) and which [`send_seed`]
//! re-checks before producing any ciphertext.
//!
//! Three steps, always device-paired:
//! 1. [`SeedTransferChannel::init`] on the receiving device: generate the
//!    channel keys, display the fingerprint.
//! 2. [`send_seed`] on the sending device: verify the fingerprint, encrypt
//!    the seed to the channel key.
//! 3. [`SeedTransferChannel::finalize`] on the receiving device: decrypt the
//!    seed and feed it to [`Inbox::restore`](crate::inbox::Inbox::restore).

use rand::{CryptoRng, RngCore};
use zeroize::Zeroizing;

use crate::crypto::aead::{self, NONCE_SIZE};
use crate::crypto::fingerprint::{fingerprint, DEFAULT_FINGERPRINT_LENGTH};
use crate::crypto::kem::{KemCiphertext, KemKeyPair, KemPublicKey};
use crate::error::{Error, Result};
use crate::inbox::SeedMaterial;
use crate::wire::{frame, unframe};

/// Ephemeral receiving end of a seed transfer
///
/// Generated for exactly one transfer and discarded afterwards.
pub struct SeedTransferChannel {
    transfer_key: KemKeyPair,
    fingerprint: String,
}

impl SeedTransferChannel {
    /// Open a transfer channel on the receiving device
    pub fn init<R: RngCore + CryptoRng>(rng: &mut R) -> Result<Self> {
        let transfer_key = KemKeyPair::generate(rng);
        let fingerprint = fingerprint(
            &transfer_key.public_key_bytes(),
            DEFAULT_FINGERPRINT_LENGTH,
        )?;
        Ok(Self {
            transfer_key,
            fingerprint,
        })
    }

    /// The public transfer key to send to the other device
    pub fn public_key(&self) -> KemPublicKey {
        self.transfer_key.public_key()
    }

    /// The fingerprint to display for out-of-band comparison
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    /// Decrypt the transferred seed
    ///
    /// Fails with [`Error::AuthenticationFailure`] on a tampered blob and
    /// [`Error::InvalidSeedLength`] if the plaintext is not a 96-byte seed.
    pub fn finalize(&self, encrypted_seed: &[u8]) -> Result<SeedMaterial> {
        if encrypted_seed.len() < NONCE_SIZE {
            return Err(Error::MalformedBlob("seed blob shorter than nonce"));
        }
        let (nonce, rest) = encrypted_seed.split_at(NONCE_SIZE);
        let nonce: &[u8; NONCE_SIZE] = nonce.try_into().expect("split at NONCE_SIZE");

        let (kem_section, sealed) = unframe(rest)?;
        let kem_ciphertext = KemCiphertext::from_bytes(kem_section)
            .map_err(|_| Error::MalformedBlob("kem ciphertext has wrong length"))?;

        let shared_secret = self.transfer_key.decapsulate(&kem_ciphertext)?;
        let seed = Zeroizing::new(aead::open(shared_secret.as_bytes(), nonce, sealed)?);
        SeedMaterial::from_bytes(&seed)
    }
}

/// Encrypt the seed for a receiving device's transfer key
///
/// `expected_fingerprint` is the value the receiving device displayed,
/// obtained out-of-band. The fingerprint of `receiver_transfer_key` is
/// recomputed here and the transfer aborts with
/// [`Error::FingerprintMismatch`] before any ciphertext exists if the two
/// disagree.
pub fn send_seed<R: RngCore + CryptoRng>(
    rng: &mut R,
    seed: &SeedMaterial,
    receiver_transfer_key: &KemPublicKey,
    expected_fingerprint: &str,
) -> Result<Vec<u8>> {
    let computed = fingerprint(
        &receiver_transfer_key.to_bytes(),
        DEFAULT_FINGERPRINT_LENGTH,
    )?;
    if computed != expected_fingerprint {
        return Err(Error::FingerprintMismatch);
    }

    let (shared_secret, kem_ciphertext) = receiver_transfer_key.encapsulate(rng)?;
    let mut nonce = [0u8; NONCE_SIZE];
    rng.fill_bytes(&mut nonce);

    // The KEM shared secret is used directly as the AEAD key; the seed is
    // fixed-length, so no salt or padding is involved.
    let sealed = aead::seal(shared_secret.as_bytes(), &nonce, seed.as_bytes())?;

    let kem_section = frame(&kem_ciphertext.to_bytes());
    let mut blob = Vec::with_capacity(NONCE_SIZE + kem_section.len() + sealed.len());
    blob.extend_from_slice(&nonce);
    blob.extend_from_slice(&kem_section);
    blob.extend_from_slice(&sealed);
    Ok(blob)
}
