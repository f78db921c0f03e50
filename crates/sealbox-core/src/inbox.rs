//! Inbox identity management
//!
//! An inbox is a dual-keypair identity: an ML-DSA-87 signing pair whose
//! public key is the inbox `id`, and an ML-KEM-1024 pair whose public half
//! (the `lock_key`) senders encrypt to. The signing key signs the lock key
//! once at creation, and that `lock_signature` is published alongside the
//! other public fields so nobody, the storage server included, can swap in
//! a different lock key under the same id.
//!
//! Both keypairs derive deterministically from one 96-byte seed, so the whole
//! identity can be rebuilt on another device from the seed alone.

use rand::{CryptoRng, RngCore};
use serde::{Deserialize, Serialize};
use zeroize::ZeroizeOnDrop;

use crate::crypto::kem::{KemKeyPair, KEM_SEED_SIZE};
use crate::crypto::sig::{Signature, SigningKeyPair, SigningPublicKey, SIG_SEED_SIZE};
use crate::crypto::KemPublicKey;
use crate::error::{Error, Result};
use crate::wire::base85;

/// Size of the master seed in bytes
pub const SEED_SIZE: usize = SIG_SEED_SIZE + KEM_SEED_SIZE;

/// Master seed for a restorable inbox identity
///
/// Bytes `[0, 32)` seed the signing key pair, bytes `[32, 96)` the
/// encapsulation key pair. Never leaves the device except through the
/// fingerprint-gated seed transfer protocol. Zeroized on drop.
#[derive(Clone, PartialEq, Eq, ZeroizeOnDrop)]
pub struct SeedMaterial([u8; SEED_SIZE]);

impl std::fmt::Debug for SeedMaterial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SeedMaterial(..)")
    }
}

impl SeedMaterial {
    /// Draw a fresh random seed
    pub fn generate<R: RngCore + CryptoRng>(rng: &mut R) -> Self {
        let mut bytes = [0u8; SEED_SIZE];
        rng.fill_bytes(&mut bytes[..SIG_SEED_SIZE]);
        rng.fill_bytes(&mut bytes[SIG_SEED_SIZE..]);
        Self(bytes)
    }

    /// Create from raw bytes
    ///
    /// Fails with [`Error::InvalidSeedLength`] unless exactly 96 bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != SEED_SIZE {
            return Err(Error::InvalidSeedLength(bytes.len()));
        }
        let mut seed = [0u8; SEED_SIZE];
        seed.copy_from_slice(bytes);
        Ok(Self(seed))
    }

    /// Get the raw bytes
    pub fn as_bytes(&self) -> &[u8; SEED_SIZE] {
        &self.0
    }

    fn signing_seed(&self) -> &[u8; SIG_SEED_SIZE] {
        self.0[..SIG_SEED_SIZE]
            .try_into()
            .expect("seed halves have fixed lengths")
    }

    fn kem_seed(&self) -> &[u8; KEM_SEED_SIZE] {
        self.0[SIG_SEED_SIZE..]
            .try_into()
            .expect("seed halves have fixed lengths")
    }
}

/// Secret half of an inbox
///
/// None of these values may ever be sent over a network; the seed moves
/// between devices only through the seed transfer protocol.
pub struct InboxSecret {
    /// Signing key used to authenticate requests to the storage server
    pub sign_key: SigningKeyPair,
    /// Decapsulation key used to decrypt incoming messages
    pub unlock_key: KemKeyPair,
    /// Master seed both keypairs derive from
    pub seed: SeedMaterial,
}

/// A complete inbox identity
pub struct Inbox {
    /// Public signing key; doubles as the inbox address
    pub id: SigningPublicKey,
    /// Public encapsulation key senders encrypt to
    pub lock_key: KemPublicKey,
    /// Signature by `id` over `lock_key`, binding the two keys
    pub lock_signature: Signature,
    /// Secret keys and seed
    pub secret: InboxSecret,
}

impl Inbox {
    /// Create a new inbox from fresh randomness
    pub fn create<R: RngCore + CryptoRng>(rng: &mut R) -> Result<Self> {
        Self::restore(SeedMaterial::generate(rng))
    }

    /// Rebuild an inbox from its master seed
    ///
    /// Deterministic: the same seed always yields byte-identical `id`,
    /// `lock_key`, and `lock_signature`. Used to bring up a second device.
    pub fn restore(seed: SeedMaterial) -> Result<Self> {
        let sign_key = SigningKeyPair::from_seed(seed.signing_seed());
        let unlock_key = KemKeyPair::from_seed(seed.kem_seed());

        let lock_key = unlock_key.public_key();
        let lock_signature = sign_key.sign(&lock_key.to_bytes())?;

        Ok(Self {
            id: sign_key.public_key(),
            lock_key,
            lock_signature,
            secret: InboxSecret {
                sign_key,
                unlock_key,
                seed,
            },
        })
    }

    /// The publication payload: the only fields ever sent at registration
    pub fn announcement(&self) -> InboxAnnouncement {
        InboxAnnouncement {
            id: self.id.clone(),
            lock_key: self.lock_key.clone(),
            lock_signature: self.lock_signature.clone(),
        }
    }

    /// The inbox id as base-85 text, for sharing over text channels
    pub fn id_string(&self) -> String {
        base85::encode(&self.id.to_bytes())
    }
}

/// Public triple published to the storage server
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InboxAnnouncement {
    /// Public signing key of the inbox owner
    pub id: SigningPublicKey,
    /// Public encapsulation key to encrypt messages to
    pub lock_key: KemPublicKey,
    /// Signature by `id` over `lock_key`
    pub lock_signature: Signature,
}

/// Check that a fetched lock key really belongs to `id`
///
/// Must pass before encrypting anything to `lock_key`; skipping it lets
/// whoever controls the lookup path substitute their own key. A `false`
/// result is a trust decision for the caller, not an error.
pub fn verify_recipient(recipient: &InboxAnnouncement) -> bool {
    recipient
        .id
        .verify(&recipient.lock_key.to_bytes(), &recipient.lock_signature)
}
