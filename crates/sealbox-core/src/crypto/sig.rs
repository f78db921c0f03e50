//! Post-Quantum Digital Signatures
//!
//! Implements ML-DSA-87 (FIPS 204, security category 5) for identity binding
//! and request authentication. Key generation is deterministic from a 32-byte
//! seed so an identity can be reconstructed on a second device, and signing is
//! deterministic so a restored identity reproduces its binding signature
//! byte-for-byte.

use ml_dsa::{
    B32, EncodedSignature, EncodedSigningKey, EncodedVerifyingKey, KeyGen, MlDsa87,
    Signature as MlDsaSignature, SigningKey as MlDsaSigningKey, VerifyingKey as MlDsaVerifyingKey,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Size of an ML-DSA-87 public key
pub const SIG_PUBLIC_KEY_SIZE: usize = 2592;
/// Size of an ML-DSA-87 secret key
pub const SIG_SECRET_KEY_SIZE: usize = 4896;
/// Size of an ML-DSA-87 signature
pub const SIGNATURE_SIZE: usize = 4627;
/// Size of the key-generation seed
pub const SIG_SEED_SIZE: usize = 32;

/// ML-DSA-87 key pair
pub struct SigningKeyPair {
    signing_key: MlDsaSigningKey<MlDsa87>,
    verifying_key: MlDsaVerifyingKey<MlDsa87>,
}

impl Clone for SigningKeyPair {
    fn clone(&self) -> Self {
        Self {
            signing_key: MlDsaSigningKey::decode(&self.signing_key.encode()),
            verifying_key: MlDsaVerifyingKey::decode(&self.verifying_key.encode()),
        }
    }
}

impl std::fmt::Debug for SigningKeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SigningKeyPair")
            .field("public", &self.public_key())
            .finish_non_exhaustive()
    }
}

impl SigningKeyPair {
    /// Derive a key pair from a 32-byte seed
    ///
    /// Fully deterministic: the same seed always yields the same key pair.
    pub fn from_seed(seed: &[u8; SIG_SEED_SIZE]) -> Self {
        let pair = MlDsa87::key_gen_internal(&B32::from(*seed));
        Self {
            signing_key: MlDsaSigningKey::decode(&pair.signing_key().encode()),
            verifying_key: MlDsaVerifyingKey::decode(&pair.verifying_key().encode()),
        }
    }

    /// Restore a key pair from encoded key bytes
    pub fn from_bytes(public_bytes: &[u8], secret_bytes: &[u8]) -> Result<Self> {
        let encoded_secret: EncodedSigningKey<MlDsa87> =
            secret_bytes.try_into().map_err(|_| Error::InvalidKeyLength {
                expected: SIG_SECRET_KEY_SIZE,
                actual: secret_bytes.len(),
            })?;
        let encoded_public: EncodedVerifyingKey<MlDsa87> =
            public_bytes.try_into().map_err(|_| Error::InvalidKeyLength {
                expected: SIG_PUBLIC_KEY_SIZE,
                actual: public_bytes.len(),
            })?;
        Ok(Self {
            signing_key: MlDsaSigningKey::decode(&encoded_secret),
            verifying_key: MlDsaVerifyingKey::decode(&encoded_public),
        })
    }

    /// Get the public verification key
    pub fn public_key(&self) -> SigningPublicKey {
        SigningPublicKey {
            inner: MlDsaVerifyingKey::decode(&self.verifying_key.encode()),
        }
    }

    /// Sign a message
    ///
    /// Deterministic ML-DSA with an empty context string.
    pub fn sign(&self, message: &[u8]) -> Result<Signature> {
        let signature = self
            .signing_key
            .sign_deterministic(message, &[])
            .map_err(|_| Error::Signing)?;
        Ok(Signature(signature.encode().to_vec()))
    }

    /// Export secret key bytes (for secure storage)
    pub fn secret_key_bytes(&self) -> Vec<u8> {
        self.signing_key.encode().to_vec()
    }
}

/// ML-DSA-87 public verification key
pub struct SigningPublicKey {
    inner: MlDsaVerifyingKey<MlDsa87>,
}

impl Clone for SigningPublicKey {
    fn clone(&self) -> Self {
        Self {
            inner: MlDsaVerifyingKey::decode(&self.inner.encode()),
        }
    }
}

impl PartialEq for SigningPublicKey {
    fn eq(&self, other: &Self) -> bool {
        self.inner.encode() == other.inner.encode()
    }
}

impl Eq for SigningPublicKey {}

impl std::fmt::Debug for SigningPublicKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SigningPublicKey({}...)", &hex::encode(&self.to_bytes()[..8]))
    }
}

impl SigningPublicKey {
    /// Create from raw bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let encoded: EncodedVerifyingKey<MlDsa87> =
            bytes.try_into().map_err(|_| Error::InvalidKeyLength {
                expected: SIG_PUBLIC_KEY_SIZE,
                actual: bytes.len(),
            })?;
        Ok(Self {
            inner: MlDsaVerifyingKey::decode(&encoded),
        })
    }

    /// Export to bytes
    pub fn to_bytes(&self) -> Vec<u8> {
        self.inner.encode().to_vec()
    }

    /// Verify a signature over `message`
    ///
    /// Returns `false` for any invalid signature, including undecodable ones.
    pub fn verify(&self, message: &[u8], signature: &Signature) -> bool {
        match signature.decoded() {
            Some(signature) => self.inner.verify_with_context(message, &[], &signature),
            None => false,
        }
    }
}

impl Serialize for SigningPublicKey {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.to_bytes().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for SigningPublicKey {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let bytes: Vec<u8> = Deserialize::deserialize(deserializer)?;
        Self::from_bytes(&bytes).map_err(serde::de::Error::custom)
    }
}

/// Detached ML-DSA-87 signature
#[derive(Clone, PartialEq, Eq)]
pub struct Signature(Vec<u8>);

impl std::fmt::Debug for Signature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Signature({}...)", &hex::encode(&self.0[..8.min(self.0.len())]))
    }
}

impl Signature {
    /// Create from raw bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != SIGNATURE_SIZE {
            return Err(Error::InvalidSignatureLength {
                expected: SIGNATURE_SIZE,
                actual: bytes.len(),
            });
        }
        Ok(Self(bytes.to_vec()))
    }

    /// Get the raw bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    fn decoded(&self) -> Option<MlDsaSignature<MlDsa87>> {
        let encoded: EncodedSignature<MlDsa87> = self.0.as_slice().try_into().ok()?;
        MlDsaSignature::decode(&encoded)
    }
}

impl Serialize for Signature {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Signature {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let bytes: Vec<u8> = Deserialize::deserialize(deserializer)?;
        Self::from_bytes(&bytes).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_generation_deterministic() {
        let seed = [7u8; SIG_SEED_SIZE];
        let a = SigningKeyPair::from_seed(&seed);
        let b = SigningKeyPair::from_seed(&seed);

        assert_eq!(a.public_key(), b.public_key());
        assert_eq!(a.secret_key_bytes(), b.secret_key_bytes());

        // Deterministic signing reproduces the signature byte-for-byte
        let message = b"bind this key";
        assert_eq!(a.sign(message).unwrap(), b.sign(message).unwrap());
    }

    #[test]
    fn test_different_seeds_different_keys() {
        let a = SigningKeyPair::from_seed(&[1u8; SIG_SEED_SIZE]);
        let b = SigningKeyPair::from_seed(&[2u8; SIG_SEED_SIZE]);
        assert_ne!(a.public_key(), b.public_key());
    }

    #[test]
    fn test_sign_verify() {
        let pair = SigningKeyPair::from_seed(&[3u8; SIG_SEED_SIZE]);
        let public = pair.public_key();

        let message = b"test message";
        let signature = pair.sign(message).unwrap();
        assert_eq!(signature.as_bytes().len(), SIGNATURE_SIZE);

        assert!(public.verify(message, &signature));
        assert!(!public.verify(b"wrong message", &signature));
    }

    #[test]
    fn test_wrong_key_fails() {
        let a = SigningKeyPair::from_seed(&[4u8; SIG_SEED_SIZE]);
        let b = SigningKeyPair::from_seed(&[5u8; SIG_SEED_SIZE]);

        let signature = a.sign(b"message").unwrap();
        assert!(!b.public_key().verify(b"message", &signature));
    }

    #[test]
    fn test_tampered_signature_fails() {
        let pair = SigningKeyPair::from_seed(&[6u8; SIG_SEED_SIZE]);
        let signature = pair.sign(b"message").unwrap();

        let mut bytes = signature.as_bytes().to_vec();
        bytes[100] ^= 0xff;
        let tampered = Signature::from_bytes(&bytes).unwrap();
        assert!(!pair.public_key().verify(b"message", &tampered));
    }

    #[test]
    fn test_public_key_serde_roundtrip() {
        let pair = SigningKeyPair::from_seed(&[8u8; SIG_SEED_SIZE]);
        let public = pair.public_key();

        let serialized = bincode::serialize(&public).unwrap();
        let deserialized: SigningPublicKey = bincode::deserialize(&serialized).unwrap();
        assert_eq!(public, deserialized);
    }

    #[test]
    fn test_secret_key_roundtrip() {
        let pair = SigningKeyPair::from_seed(&[9u8; SIG_SEED_SIZE]);
        let restored = SigningKeyPair::from_bytes(
            &pair.public_key().to_bytes(),
            &pair.secret_key_bytes(),
        )
        .unwrap();

        let signature = restored.sign(b"round trip").unwrap();
        assert!(pair.public_key().verify(b"round trip", &signature));
    }

    #[test]
    fn test_invalid_lengths() {
        assert!(SigningPublicKey::from_bytes(&[0u8; 100]).is_err());
        assert!(Signature::from_bytes(&[0u8; 100]).is_err());
        assert!(SigningKeyPair::from_bytes(&[0u8; 100], &[0u8; 100]).is_err());
    }
}
