//! Error type shared by keys, envelopes and the protocol engine.
//!
//! Every failure is fatal for the message it concerns. Callers are expected
//! to treat any error returned from a verify, open or decode operation as
//! "reject the message" and extend no trust to its contents.

/// Errors that can occur while creating or checking an envelope
#[derive(Debug, thiserror::Error)]
pub enum SapientError {
    /// Key or nonce material has the wrong length for its algorithm
    #[error("invalid size, expected {expected}, got {actual}")]
    Size { expected: usize, actual: usize },

    /// The header carrying the envelope is absent from the message
    #[error("missing header: {0}")]
    HeaderMissing(&'static str),

    /// A signature, MAC or AEAD tag did not check out, the ciphertext
    /// is malformed, or the verified body is not valid JSON.
    /// Intentionally vague.
    #[error("invalid message: {0}")]
    InvalidMessage(&'static str),

    /// Malformed base64url, hex or PEM text
    #[error("encoding error: {0}")]
    Encoding(String),

    /// The operating system random source failed
    #[error("random source failure: {0}")]
    Random(String),

    /// The adapter could not build or modify an HTTP message
    #[error("message error: {0}")]
    Message(String),
}

impl SapientError {
    pub(crate) fn size(expected: usize, actual: usize) -> Self {
        SapientError::Size { expected, actual }
    }

    /// Whether this error means the message must be rejected on cryptographic
    /// or structural grounds (as opposed to a local failure such as the RNG)
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            SapientError::HeaderMissing(_)
                | SapientError::InvalidMessage(_)
                | SapientError::Encoding(_)
                | SapientError::Size { .. }
        )
    }
}

impl From<base64::DecodeError> for SapientError {
    fn from(e: base64::DecodeError) -> Self {
        SapientError::Encoding(format!("base64url decode error: {}", e))
    }
}

impl From<hex::FromHexError> for SapientError {
    fn from(e: hex::FromHexError) -> Self {
        SapientError::Encoding(format!("hex decode error: {}", e))
    }
}

impl From<pem::PemError> for SapientError {
    fn from(e: pem::PemError) -> Self {
        SapientError::Encoding(format!("failed to parse PEM: {}", e))
    }
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, SapientError>;
