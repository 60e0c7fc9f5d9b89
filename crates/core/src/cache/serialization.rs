//! Pure functions for serializing/deserializing cache values to/from the
//! wire text format.
//!
//! Values are stored as UTF-8 JSON text, providing human-readable cache
//! entries that are easy to debug and inspect with redis-cli.

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use super::CacheError;

/// Errors that can occur while encoding or decoding cache values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SerializationError {
    /// Failed to serialize a value to JSON text.
    #[error("Failed to serialize: {0}")]
    SerializeFailed(String),
    /// Failed to deserialize JSON text to a value.
    #[error("Failed to deserialize: {0}")]
    DeserializeFailed(String),
}

impl From<SerializationError> for CacheError {
    fn from(err: SerializationError) -> Self {
        match err {
            SerializationError::SerializeFailed(msg) => CacheError::Serialize(msg),
            SerializationError::DeserializeFailed(msg) => CacheError::Deserialize(msg),
        }
    }
}

/// Result type for serialization operations.
pub type Result<T> = std::result::Result<T, SerializationError>;

/// Encodes a value to its JSON text form.
pub fn encode_value<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string(value)
        .map_err(|e| SerializationError::SerializeFailed(e.to_string()))
}

/// Decodes JSON text back into a value.
pub fn decode_value<T: DeserializeOwned>(raw: &str) -> Result<T> {
    serde_json::from_str(raw).map_err(|e| SerializationError::DeserializeFailed(e.to_string()))
}
