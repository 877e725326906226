//! Sign and symmetric-authenticate: header envelopes over cleartext bodies.

use super::{decode_header, Envelope, HEADER_AUTH_NAME, HEADER_SIGNATURE_NAME};
use crate::crypto::encoding::encode_base64url;
use crate::crypto::{SharedAuthenticationKey, SigningPublicKey, SigningSecretKey};
use crate::error::{Result, SapientError};

/// Sign the body bytes with an Ed25519 secret key
pub fn sign(body: &[u8], key: &SigningSecretKey) -> Envelope {
    Envelope::Header {
        name: HEADER_SIGNATURE_NAME,
        value: encode_base64url(&key.sign(body)),
    }
}

/// Check a signature header against the body bytes
///
/// # Errors
///
/// - `HeaderMissing` if `header` is `None`
/// - `Encoding` if the header is not base64url
/// - `InvalidMessage` if the signature does not verify
pub fn verify_signature(
    body: &[u8],
    header: Option<&[u8]>,
    key: &SigningPublicKey,
) -> Result<()> {
    let header = header.ok_or(SapientError::HeaderMissing(HEADER_SIGNATURE_NAME))?;
    let signature = decode_header(header)?;
    key.verify(body, &signature)
}

/// Compute the MAC of the body bytes with a shared key
pub fn authenticate(body: &[u8], key: &SharedAuthenticationKey) -> Result<Envelope> {
    Ok(Envelope::Header {
        name: HEADER_AUTH_NAME,
        value: encode_base64url(&key.authenticate(body)?),
    })
}

/// Check a MAC header against the body bytes in constant time
///
/// # Errors
///
/// - `HeaderMissing` if `header` is `None`
/// - `Encoding` if the header is not base64url
/// - `InvalidMessage` if the tag does not match
pub fn verify_authentication(
    body: &[u8],
    header: Option<&[u8]>,
    key: &SharedAuthenticationKey,
) -> Result<()> {
    let header = header.ok_or(SapientError::HeaderMissing(HEADER_AUTH_NAME))?;
    let tag = decode_header(header)?;
    key.verify(body, &tag)
}
