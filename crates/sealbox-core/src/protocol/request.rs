//! Request authentication
//!
//! A caller proves the right to act on an inbox by signing
//! `lock_key || endpoint` with the inbox signing key. Scoping the signature
//! to one endpoint keeps an authorization for one operation from being
//! replayed as authorization for another.
//!
//! The verification functions are the contract for the storage-side
//! collaborator: it runs [`verify_inbox_signature`] once at publication time
//! before persisting an announcement, and [`verify_request_signature`] on
//! every gated request. For the latter the server must resolve `lock_key`
//! from its own storage by `id`; a caller-supplied lock key would let an
//! attacker verify against a key of their own choosing.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::crypto::kem::KemPublicKey;
use crate::crypto::sig::{Signature, SigningKeyPair, SigningPublicKey};
use crate::error::Result;

/// API endpoint categories a request signature can authorize
///
/// The string identifiers are agreed between client and server and must stay
/// stable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Endpoint {
    /// Fetch the contents of one's own inbox
    GetInbox,
    /// Post an encrypted blob to an inbox
    PostMessage,
}

impl Endpoint {
    /// Stable wire identifier for this endpoint
    pub fn as_str(&self) -> &'static str {
        match self {
            Endpoint::GetInbox => "get-inbox",
            Endpoint::PostMessage => "post-message",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn request_payload(lock_key: &KemPublicKey, endpoint: Endpoint) -> Vec<u8> {
    let key_bytes = lock_key.to_bytes();
    let mut payload = Vec::with_capacity(key_bytes.len() + endpoint.as_str().len());
    payload.extend_from_slice(&key_bytes);
    payload.extend_from_slice(endpoint.as_str().as_bytes());
    payload
}

/// Sign a request to `endpoint` on behalf of the inbox owning `lock_key`
///
/// The signature is transport-agnostic; callers may ship it as raw bytes,
/// hex, or base-85 in a header.
pub fn sign_request(
    sign_key: &SigningKeyPair,
    lock_key: &KemPublicKey,
    endpoint: Endpoint,
) -> Result<Signature> {
    sign_key.sign(&request_payload(lock_key, endpoint))
}

/// Server-side gate: check a request signature against the published id
///
/// `lock_key` must come from the server's own storage, keyed by `id`.
pub fn verify_request_signature(
    id: &SigningPublicKey,
    lock_key: &KemPublicKey,
    signature: &Signature,
    endpoint: Endpoint,
) -> bool {
    id.verify(&request_payload(lock_key, endpoint), signature)
}

/// Server-side gate: check an announcement before persisting it
///
/// Identical to the client-side recipient check; run once at publication
/// time so the stored `(id, lock_key, lock_signature)` triple is known good.
pub fn verify_inbox_signature(
    id: &SigningPublicKey,
    lock_key: &KemPublicKey,
    lock_signature: &Signature,
) -> bool {
    id.verify(&lock_key.to_bytes(), lock_signature)
}
