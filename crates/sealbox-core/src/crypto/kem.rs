//! Post-Quantum Key Encapsulation
//!
//! Implements ML-KEM-1024 (FIPS 203, security category 5) for hybrid message
//! encryption. Key generation is either random (ephemeral transfer channels)
//! or deterministic from a 64-byte seed (restorable inbox keys).

use ml_kem::kem::{Decapsulate, Encapsulate};
use ml_kem::{B32, Ciphertext, EncodedSizeUser, KemCore, MlKem1024};
use rand::{CryptoRng, RngCore};
use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{Error, Result};

type DecapsulationKey = <MlKem1024 as KemCore>::DecapsulationKey;
type EncapsulationKey = <MlKem1024 as KemCore>::EncapsulationKey;

/// Size of an ML-KEM-1024 public (encapsulation) key
pub const KEM_PUBLIC_KEY_SIZE: usize = 1568;
/// Size of an ML-KEM-1024 secret (decapsulation) key
pub const KEM_SECRET_KEY_SIZE: usize = 3168;
/// Size of an ML-KEM-1024 ciphertext
pub const KEM_CIPHERTEXT_SIZE: usize = 1568;
/// Size of the encapsulated shared secret
pub const KEM_SHARED_SECRET_SIZE: usize = 32;
/// Size of the key-generation seed (`d || z` halves)
pub const KEM_SEED_SIZE: usize = 64;

/// ML-KEM-1024 key pair
pub struct KemKeyPair {
    decapsulation_key: DecapsulationKey,
    encapsulation_key: EncapsulationKey,
}

impl std::fmt::Debug for KemKeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KemKeyPair")
            .field("public", &self.public_key())
            .finish_non_exhaustive()
    }
}

impl KemKeyPair {
    /// Generate a fresh random key pair
    pub fn generate<R: RngCore + CryptoRng>(rng: &mut R) -> Self {
        let (decapsulation_key, encapsulation_key) = MlKem1024::generate(rng);
        Self {
            decapsulation_key,
            encapsulation_key,
        }
    }

    /// Derive a key pair from a 64-byte seed
    ///
    /// Fully deterministic: the same seed always yields the same key pair.
    pub fn from_seed(seed: &[u8; KEM_SEED_SIZE]) -> Self {
        let mut d = [0u8; 32];
        let mut z = [0u8; 32];
        d.copy_from_slice(&seed[..32]);
        z.copy_from_slice(&seed[32..]);

        let (decapsulation_key, encapsulation_key) =
            MlKem1024::generate_deterministic(&B32::from(d), &B32::from(z));
        d.zeroize();
        z.zeroize();

        Self {
            decapsulation_key,
            encapsulation_key,
        }
    }

    /// Restore a key pair from encoded key bytes
    pub fn from_bytes(public_bytes: &[u8], secret_bytes: &[u8]) -> Result<Self> {
        let encapsulation_key = EncapsulationKey::from_bytes(
            &public_bytes.try_into().map_err(|_| Error::InvalidKeyLength {
                expected: KEM_PUBLIC_KEY_SIZE,
                actual: public_bytes.len(),
            })?,
        );
        let decapsulation_key = DecapsulationKey::from_bytes(
            &secret_bytes.try_into().map_err(|_| Error::InvalidKeyLength {
                expected: KEM_SECRET_KEY_SIZE,
                actual: secret_bytes.len(),
            })?,
        );
        Ok(Self {
            decapsulation_key,
            encapsulation_key,
        })
    }

    /// Get the public key
    pub fn public_key(&self) -> KemPublicKey {
        KemPublicKey {
            inner: EncapsulationKey::from_bytes(&self.encapsulation_key.as_bytes()),
        }
    }

    /// Decapsulate a ciphertext to recover the shared secret
    pub fn decapsulate(&self, ciphertext: &KemCiphertext) -> Result<SharedSecret> {
        let shared = self
            .decapsulation_key
            .decapsulate(&ciphertext.inner)
            .map_err(|_| Error::Decapsulation)?;
        let mut secret = [0u8; KEM_SHARED_SECRET_SIZE];
        secret.copy_from_slice(shared.as_slice());
        Ok(SharedSecret { secret })
    }

    /// Export public key bytes
    pub fn public_key_bytes(&self) -> Vec<u8> {
        self.encapsulation_key.as_bytes().to_vec()
    }

    /// Export secret key bytes (for secure storage)
    pub fn secret_key_bytes(&self) -> Vec<u8> {
        self.decapsulation_key.as_bytes().to_vec()
    }
}

/// ML-KEM-1024 public key
pub struct KemPublicKey {
    inner: EncapsulationKey,
}

impl Clone for KemPublicKey {
    fn clone(&self) -> Self {
        Self {
            inner: EncapsulationKey::from_bytes(&self.inner.as_bytes()),
        }
    }
}

impl PartialEq for KemPublicKey {
    fn eq(&self, other: &Self) -> bool {
        self.inner.as_bytes() == other.inner.as_bytes()
    }
}

impl Eq for KemPublicKey {}

impl std::fmt::Debug for KemPublicKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "KemPublicKey({}...)", &hex::encode(&self.to_bytes()[..8]))
    }
}

impl KemPublicKey {
    /// Create from raw bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let encoded = bytes.try_into().map_err(|_| Error::InvalidKeyLength {
            expected: KEM_PUBLIC_KEY_SIZE,
            actual: bytes.len(),
        })?;
        Ok(Self {
            inner: EncapsulationKey::from_bytes(&encoded),
        })
    }

    /// Encapsulate to create a shared secret and ciphertext
    pub fn encapsulate<R: RngCore + CryptoRng>(
        &self,
        rng: &mut R,
    ) -> Result<(SharedSecret, KemCiphertext)> {
        let (ciphertext, shared) = self
            .inner
            .encapsulate(rng)
            .map_err(|_| Error::Encapsulation)?;
        let mut secret = [0u8; KEM_SHARED_SECRET_SIZE];
        secret.copy_from_slice(shared.as_slice());
        Ok((SharedSecret { secret }, KemCiphertext { inner: ciphertext }))
    }

    /// Export to bytes
    pub fn to_bytes(&self) -> Vec<u8> {
        self.inner.as_bytes().to_vec()
    }
}

impl Serialize for KemPublicKey {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.to_bytes().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for KemPublicKey {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let bytes: Vec<u8> = Deserialize::deserialize(deserializer)?;
        Self::from_bytes(&bytes).map_err(serde::de::Error::custom)
    }
}

/// ML-KEM-1024 ciphertext
#[derive(Clone)]
pub struct KemCiphertext {
    inner: Ciphertext<MlKem1024>,
}

impl std::fmt::Debug for KemCiphertext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KemCiphertext")
            .field("size", &self.inner.len())
            .finish()
    }
}

impl KemCiphertext {
    /// Create from raw bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let inner = bytes.try_into().map_err(|_| Error::InvalidKeyLength {
            expected: KEM_CIPHERTEXT_SIZE,
            actual: bytes.len(),
        })?;
        Ok(Self { inner })
    }

    /// Export to bytes
    pub fn to_bytes(&self) -> Vec<u8> {
        self.inner.to_vec()
    }
}

/// Encapsulated shared secret
///
/// Zeroized on drop.
#[derive(Clone, ZeroizeOnDrop)]
pub struct SharedSecret {
    secret: [u8; KEM_SHARED_SECRET_SIZE],
}

impl SharedSecret {
    /// Get the shared secret bytes
    pub fn as_bytes(&self) -> &[u8; KEM_SHARED_SECRET_SIZE] {
        &self.secret
    }
}
