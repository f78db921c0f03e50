//! Error types for Sealbox Core

use thiserror::Error;

/// Core error type for Sealbox cryptographic operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("seed must be 96 bytes (32 signing + 64 encapsulation), got {0}")]
    InvalidSeedLength(usize),

    #[error("invalid key length: expected {expected}, got {actual}")]
    InvalidKeyLength { expected: usize, actual: usize },

    #[error("invalid signature length: expected {expected}, got {actual}")]
    InvalidSignatureLength { expected: usize, actual: usize },

    #[error("varint is truncated")]
    TruncatedVarint,

    #[error("frame declares {declared} bytes but only {available} remain")]
    TruncatedFrame { declared: usize, available: usize },

    #[error("malformed blob: {0}")]
    MalformedBlob(&'static str),

    #[error("authentication failure")]
    AuthenticationFailure,

    #[error("encryption failed")]
    Encryption,

    #[error("key encapsulation failed")]
    Encapsulation,

    #[error("key decapsulation failed")]
    Decapsulation,

    #[error("signing failed")]
    Signing,

    #[error("schema encode failed: {0}")]
    SchemaEncode(String),

    #[error("schema decode failed: {0}")]
    SchemaDecode(String),

    #[error("transfer key fingerprint does not match the expected value")]
    FingerprintMismatch,

    #[error("fingerprint length {requested} exceeds digest capacity of {max} symbols")]
    FingerprintLength { requested: usize, max: usize },

    #[error("invalid base-85 input: {0}")]
    InvalidBase85(&'static str),
}

/// Result type for Sealbox Core operations
pub type Result<T> = std::result::Result<T, Error>;
