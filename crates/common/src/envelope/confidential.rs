//! Seal and symmetric-encrypt: ciphertext that replaces the body.

use bytes::Bytes;

use super::Envelope;
use crate::crypto::{SealingPublicKey, SealingSecretKey, SharedEncryptionKey};
use crate::error::Result;

/// Seal the body for the owner of `key`
pub fn seal(body: &[u8], key: &SealingPublicKey) -> Result<Envelope> {
    Ok(Envelope::Body(Bytes::from(key.seal(body)?)))
}

/// Open a sealed body, returning the plaintext
pub fn unseal(body: &[u8], key: &SealingSecretKey) -> Result<Bytes> {
    Ok(Bytes::from(key.open(body)?))
}

/// Encrypt the body under a shared key with a fresh random nonce
pub fn encrypt(body: &[u8], key: &SharedEncryptionKey) -> Result<Envelope> {
    Ok(Envelope::Body(Bytes::from(key.encrypt(body)?)))
}

/// Decrypt a body encrypted under a shared key, returning the plaintext
pub fn decrypt(body: &[u8], key: &SharedEncryptionKey) -> Result<Bytes> {
    Ok(Bytes::from(key.decrypt(body)?))
}
