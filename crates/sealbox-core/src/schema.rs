//! Structured message codec capability
//!
//! The cipher is generic over how application messages become bytes; the
//! caller supplies the codec as a type implementing [`MessageSchema`] rather
//! than pre-encoding messages itself. [`BincodeSchema`] covers the common
//! case of serde-derived message types.

use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{Error, Result};

/// A structured encode/decode capability for application messages
pub trait MessageSchema {
    /// The application message type
    type Message;

    /// Encode a message to bytes
    fn encode(&self, message: &Self::Message) -> Result<Vec<u8>>;

    /// Decode a message from bytes
    fn decode(&self, bytes: &[u8]) -> Result<Self::Message>;
}

/// Bincode-backed schema for serde-derived message types
pub struct BincodeSchema<T> {
    _message: PhantomData<T>,
}

impl<T> BincodeSchema<T> {
    pub fn new() -> Self {
        Self {
            _message: PhantomData,
        }
    }
}

impl<T> Default for BincodeSchema<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> MessageSchema for BincodeSchema<T>
where
    T: Serialize + DeserializeOwned,
{
    type Message = T;

    fn encode(&self, message: &T) -> Result<Vec<u8>> {
        bincode::serialize(message).map_err(|e| Error::SchemaEncode(e.to_string()))
    }

    fn decode(&self, bytes: &[u8]) -> Result<T> {
        bincode::deserialize(bytes).map_err(|e| Error::SchemaDecode(e.to_string()))
    }
}
