//! Envelope codec: turns key material and body bytes into the material
//! that travels with a message, and back.
//!
//! There are two shapes of envelope:
//!
//! - **Cleartext modes** (sign, symmetric-authenticate) leave the body as it
//!   is and add a single base64url header computed over the exact body bytes.
//! - **Confidential modes** (seal, symmetric-encrypt) replace the body with
//!   raw ciphertext and add no header.
//!
//! The wire format does not say which confidential mode was used; both
//! parties agree on the mode per endpoint and direction out of band.

mod cleartext;
mod confidential;
pub mod json;

use bytes::Bytes;

use crate::error::{Result, SapientError};
use crate::message::HttpMessage;

pub use cleartext::{authenticate, sign, verify_authentication, verify_signature};
pub use confidential::{decrypt, encrypt, seal, unseal};

/// Header carrying the base64url Ed25519 signature of the body
pub const HEADER_SIGNATURE_NAME: &str = "Body-Signature-Ed25519";
/// Header carrying the base64url HMAC-SHA-512/256 tag of the body
pub const HEADER_AUTH_NAME: &str = "Body-HMAC-SHA512256";

/// Content type set on ciphertext bodies
pub const CONTENT_TYPE_BINARY: &str = "application/octet-stream";
/// Content type set on cleartext JSON bodies
pub const CONTENT_TYPE_JSON: &str = "application/json";

/// The four protection modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    Sign,
    Seal,
    SymmetricEncrypt,
    SymmetricAuthenticate,
}

impl Mode {
    /// Header used by the mode, or `None` when the body itself is replaced
    pub fn header_name(&self) -> Option<&'static str> {
        match self {
            Mode::Sign => Some(HEADER_SIGNATURE_NAME),
            Mode::SymmetricAuthenticate => Some(HEADER_AUTH_NAME),
            Mode::Seal | Mode::SymmetricEncrypt => None,
        }
    }

    /// Whether the mode hides the body
    pub fn is_confidential(&self) -> bool {
        self.header_name().is_none()
    }
}

/// Protection material produced for one body
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Envelope {
    /// A header to attach next to the unmodified body
    Header { name: &'static str, value: String },
    /// Ciphertext that replaces the body
    Body(Bytes),
}

impl Envelope {
    /// Attach the envelope to a message, overwriting any previous header of
    /// the same name or replacing the body
    pub fn apply<M: HttpMessage>(self, message: &mut M) -> Result<()> {
        match self {
            Envelope::Header { name, value } => message.set_header(name, &value),
            Envelope::Body(body) => {
                message.set_body(body);
                Ok(())
            }
        }
    }
}

/// Decode a base64url header value
fn decode_header(value: &[u8]) -> Result<Vec<u8>> {
    let text = std::str::from_utf8(value)
        .map_err(|_| SapientError::Encoding("header value is not valid UTF-8".into()))?;
    crate::crypto::encoding::decode_base64url(text)
}
