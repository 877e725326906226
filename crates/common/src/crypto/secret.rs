//! Symmetric body encryption using XChaCha20-Poly1305
//!
//! A [`SharedEncryptionKey`] is held by both endpoints. Each call to
//! [`SharedEncryptionKey::encrypt`] draws a fresh 192-bit nonce from the
//! OS random source, so there is no way for a caller to pick or reuse one.

use std::fmt;

use chacha20poly1305::aead::{Aead, KeyInit, Payload};
use chacha20poly1305::{Key, XChaCha20Poly1305, XNonce};
use subtle::ConstantTimeEq;
use zeroize::{Zeroize, ZeroizeOnDrop};

use super::rng;
use crate::error::{Result, SapientError};

/// Size of XChaCha20-Poly1305 nonce in bytes
pub const NONCE_SIZE: usize = 24;
/// Size of XChaCha20-Poly1305 key in bytes (256 bits)
pub const SHARED_ENCRYPTION_KEY_SIZE: usize = 32;
/// Size of the Poly1305 authentication tag in bytes
pub const TAG_SIZE: usize = 16;

/// A 256-bit symmetric key for authenticated body encryption
///
/// The encrypted format is: `nonce (24 bytes) || ciphertext || tag (16 bytes)`.
/// The nonce doubles as associated data, so it cannot be swapped without
/// breaking the tag.
///
/// # Examples
///
/// ```ignore
/// let key = SharedEncryptionKey::generate();
///
/// let ciphertext = key.encrypt(b"sensitive data")?;
/// let recovered = key.decrypt(&ciphertext)?;
/// assert_eq!(b"sensitive data", &recovered[..]);
/// ```
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SharedEncryptionKey([u8; SHARED_ENCRYPTION_KEY_SIZE]);

impl SharedEncryptionKey {
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
    /// Returns an error if the slice length is not exactly `SHARED_ENCRYPTION_KEY_SIZE` bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        if data.len() != SHARED_ENCRYPTION_KEY_SIZE {
            return Err(SapientError::size(SHARED_ENCRYPTION_KEY_SIZE, data.len()));
        }
        let mut buff = [0; SHARED_ENCRYPTION_KEY_SIZE];
        buff.copy_from_slice(data);
        Ok(Self(buff))
    }

    /// Convert key to raw bytes
    pub fn to_bytes(&self) -> [u8; SHARED_ENCRYPTION_KEY_SIZE] {
        self.0
    }

    fn cipher(&self) -> XChaCha20Poly1305 {
        XChaCha20Poly1305::new(Key::from_slice(&self.0))
    }

    /// Encrypt data using XChaCha20-Poly1305 AEAD
    ///
    /// The output format is: `nonce (24 bytes) || ciphertext || auth_tag (16 bytes)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the system RNG fails.
    pub fn encrypt(&self, data: &[u8]) -> Result<Vec<u8>> {
        let nonce_bytes: [u8; NONCE_SIZE] = rng::random_array()?;
        let nonce = XNonce::from_slice(&nonce_bytes);

        let ciphertext = self
            .cipher()
            .encrypt(
                nonce,
                Payload {
                    msg: data,
                    aad: &nonce_bytes,
                },
            )
            .map_err(|_| SapientError::InvalidMessage("encrypt error"))?;

        let mut out = Vec::with_capacity(NONCE_SIZE + ciphertext.len());
        out.extend_from_slice(&nonce_bytes);
        out.extend_from_slice(&ciphertext);

        Ok(out)
    }

    /// Decrypt data using XChaCha20-Poly1305 AEAD
    ///
    /// Expects input in the format: `nonce (24 bytes) || ciphertext || auth_tag (16 bytes)`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidMessage` if the data is too short to hold a nonce and
    /// tag, or if authentication fails (tampered data or wrong key).
    pub fn decrypt(&self, data: &[u8]) -> Result<Vec<u8>> {
        if data.len() < NONCE_SIZE + TAG_SIZE {
            return Err(SapientError::InvalidMessage("ciphertext too short"));
        }

        let (nonce_bytes, ciphertext) = data.split_at(NONCE_SIZE);
        self.cipher()
            .decrypt(
                XNonce::from_slice(nonce_bytes),
                Payload {
                    msg: ciphertext,
                    aad: nonce_bytes,
                },
            )
            .map_err(|_| SapientError::InvalidMessage("decrypt error"))
    }
}

impl PartialEq for SharedEncryptionKey {
    fn eq(&self, other: &Self) -> bool {
        self.0[..].ct_eq(&other.0[..]).into()
    }
}

impl Eq for SharedEncryptionKey {}

impl fmt::Debug for SharedEncryptionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SharedEncryptionKey(..)")
    }
}

key_text_encoding!(SharedEncryptionKey);

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_encrypt_decrypt() {
        let key = SharedEncryptionKey::generate();
        let data = b"hello world, this is a test message for encryption";

        let encrypted = key.encrypt(data).unwrap();
        assert_eq!(encrypted.len(), NONCE_SIZE + data.len() + TAG_SIZE);
        let decrypted = key.decrypt(&encrypted).unwrap();

        assert_eq!(data.as_slice(), decrypted.as_slice());
    }

    #[test]
    fn test_fresh_nonce_per_call() {
        let key = SharedEncryptionKey::generate();
        let a = key.encrypt(b"same").unwrap();
        let b = key.encrypt(b"same").unwrap();
        assert_ne!(a[..NONCE_SIZE], b[..NONCE_SIZE]);
        assert_ne!(a, b);
    }

    #[test]
    fn test_key_size_validation() {
        let too_short = [1u8; 16];
        let too_long = [1u8; 64];

        assert!(SharedEncryptionKey::from_bytes(&too_short).is_err());
        assert!(SharedEncryptionKey::from_bytes(&too_long).is_err());

        let just_right = [1u8; SHARED_ENCRYPTION_KEY_SIZE];
        assert!(SharedEncryptionKey::from_bytes(&just_right).is_ok());
    }

    #[test]
    fn test_tampered_ciphertext() {
        let key = SharedEncryptionKey::generate();
        let mut encrypted = key.encrypt(b"test data for integrity check").unwrap();

        encrypted[NONCE_SIZE + 3] ^= 0xFF;
        assert!(matches!(
            key.decrypt(&encrypted),
            Err(SapientError::InvalidMessage(_))
        ));
    }

    #[test]
    fn test_tampered_nonce() {
        let key = SharedEncryptionKey::generate();
        let mut encrypted = key.encrypt(b"nonce is authenticated").unwrap();

        encrypted[0] ^= 0x01;
        assert!(key.decrypt(&encrypted).is_err());
    }

    #[test]
    fn test_truncated_ciphertext() {
        let key = SharedEncryptionKey::generate();
        let encrypted = key.encrypt(b"short").unwrap();

        assert!(key.decrypt(&encrypted[..encrypted.len() - 1]).is_err());
        assert!(key.decrypt(&encrypted[..NONCE_SIZE]).is_err());
        assert!(key.decrypt(&[]).is_err());
    }

    #[test]
    fn test_wrong_key() {
        let key = SharedEncryptionKey::generate();
        let other = SharedEncryptionKey::generate();
        let encrypted = key.encrypt(b"for key one").unwrap();
        assert!(matches!(
            other.decrypt(&encrypted),
            Err(SapientError::InvalidMessage(_))
        ));
    }

    #[test]
    fn test_empty_data_encryption() {
        let key = SharedEncryptionKey::generate();
        let encrypted = key.encrypt(b"").unwrap();
        let decrypted = key.decrypt(&encrypted).unwrap();
        assert!(decrypted.is_empty());
    }

    #[test]
    fn test_text_round_trip() {
        let key = SharedEncryptionKey::generate();
        let recovered = SharedEncryptionKey::from_base64url(&key.to_base64url()).unwrap();
        assert_eq!(key, recovered);
        let recovered = SharedEncryptionKey::from_hex(&key.to_hex()).unwrap();
        assert_eq!(key, recovered);
    }
}
