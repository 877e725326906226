//! Symmetric message authentication (HMAC-SHA-512/256)
//!
//! The tag is HMAC-SHA-512 truncated to its first 32 bytes, which is what
//! libsodium's `crypto_auth` produces, so tags interoperate with it.

use std::fmt;

use hmac::{Hmac, Mac};
use sha2::Sha512;
use subtle::ConstantTimeEq;
use zeroize::{Zeroize, ZeroizeOnDrop};

use super::rng;
use crate::error::{Result, SapientError};

type HmacSha512 = Hmac<Sha512>;

/// Size of the authentication key in bytes
pub const SHARED_AUTHENTICATION_KEY_SIZE: usize = 32;
/// Size of the truncated tag in bytes
pub const MAC_SIZE: usize = 32;

/// A 256-bit key shared by both endpoints for body authentication
///
/// Provides integrity and authenticity, not confidentiality. Either party
/// holding the key can produce a valid tag.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SharedAuthenticationKey([u8; SHARED_AUTHENTICATION_KEY_SIZE]);

impl SharedAuthenticationKey {
    /// Generate a new random key using a cryptographically secure RNG
    ///
    /// # Panics
    ///
    /// Panics if the operating system random source is unavailable.
    pub fn generate() -> Self {
        Self(rng::random_array().expect("failed to generate random bytes"))
    }

    /// Create a key from a byte slice
    ///
    /// # Errors
    ///
    /// Returns an error if the slice length is not exactly `SHARED_AUTHENTICATION_KEY_SIZE` bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        if data.len() != SHARED_AUTHENTICATION_KEY_SIZE {
            return Err(SapientError::size(
                SHARED_AUTHENTICATION_KEY_SIZE,
                data.len(),
            ));
        }
        let mut buff = [0; SHARED_AUTHENTICATION_KEY_SIZE];
        buff.copy_from_slice(data);
        Ok(Self(buff))
    }

    /// Convert key to raw bytes
    pub fn to_bytes(&self) -> [u8; SHARED_AUTHENTICATION_KEY_SIZE] {
        self.0
    }

    fn mac(&self, msg: &[u8]) -> Result<HmacSha512> {
        let mut mac = <HmacSha512 as Mac>::new_from_slice(&self.0)
            .map_err(|_| SapientError::size(SHARED_AUTHENTICATION_KEY_SIZE, self.0.len()))?;
        mac.update(msg);
        Ok(mac)
    }

    /// Compute the 32-byte tag for a message
    pub fn authenticate(&self, msg: &[u8]) -> Result<[u8; MAC_SIZE]> {
        let full = self.mac(msg)?.finalize().into_bytes();
        let mut tag = [0u8; MAC_SIZE];
        tag.copy_from_slice(&full[..MAC_SIZE]);
        Ok(tag)
    }

    /// Check a tag against a message in constant time
    ///
    /// # Errors
    ///
    /// Returns `InvalidMessage` if the tag is not exactly `MAC_SIZE` bytes
    /// or does not match.
    pub fn verify(&self, msg: &[u8], tag: &[u8]) -> Result<()> {
        if tag.len() != MAC_SIZE {
            return Err(SapientError::InvalidMessage("invalid MAC length"));
        }
        self.mac(msg)?
            .verify_truncated_left(tag)
            .map_err(|_| SapientError::InvalidMessage("invalid MAC"))
    }
}

impl PartialEq for SharedAuthenticationKey {
    fn eq(&self, other: &Self) -> bool {
        self.0[..].ct_eq(&other.0[..]).into()
    }
}

impl Eq for SharedAuthenticationKey {}

impl fmt::Debug for SharedAuthenticationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SharedAuthenticationKey(..)")
    }
}

key_text_encoding!(SharedAuthenticationKey);
