//! Canonical JSON bytes for structured payloads.
//!
//! Payloads are rendered once, compactly, and the cryptographic transform
//! runs over exactly those bytes. On the way back the bytes are parsed only
//! after the envelope has been checked.

use bytes::Bytes;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{Result, SapientError};

/// Render a value to its canonical byte encoding
///
/// # Errors
///
/// Returns `Encoding` if the value cannot be represented as JSON
/// (e.g. a map with non-string keys).
pub fn encode<T: Serialize + ?Sized>(value: &T) -> Result<Bytes> {
    serde_json::to_vec(value)
        .map(Bytes::from)
        .map_err(|e| SapientError::Encoding(format!("JSON encode error: {}", e)))
}

/// Parse verified body bytes back into a value
///
/// # Errors
///
/// Returns `InvalidMessage` if the bytes are not valid JSON for `T`.
pub fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T> {
    serde_json::from_slice(body).map_err(|e| {
        tracing::debug!(error = %e, "verified body is not valid JSON");
        SapientError::InvalidMessage("invalid JSON body")
    })
}
