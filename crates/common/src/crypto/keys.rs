use std::fmt;

use ed25519_dalek::{Signer, SigningKey, VerifyingKey};
use subtle::ConstantTimeEq;
use x25519_dalek::{PublicKey as X25519PublicKey, StaticSecret};

use super::rng;
use crate::error::{Result, SapientError};

/// Size of an Ed25519 secret key in bytes (seed || public key)
pub const SIGNING_SECRET_KEY_SIZE: usize = 64;
/// Size of an Ed25519 seed in bytes
pub const SIGNING_SEED_SIZE: usize = 32;
/// Size of an Ed25519 public key in bytes
pub const SIGNING_PUBLIC_KEY_SIZE: usize = 32;
/// Size of a detached Ed25519 signature in bytes
pub const SIGNATURE_SIZE: usize = 64;
/// Size of an X25519 secret key in bytes
pub const SEALING_SECRET_KEY_SIZE: usize = 32;
/// Size of an X25519 public key in bytes
pub const SEALING_PUBLIC_KEY_SIZE: usize = 32;

/// Secret half of an Ed25519 signing pair
///
/// Serialized as 64 bytes: the 32-byte seed followed by the 32-byte public
/// key, the same layout libsodium uses for `crypto_sign` secret keys.
/// Key material is zeroized on drop and never shown by `Debug`.
///
/// # Examples
///
/// ```ignore
/// let secret_key = SigningSecretKey::generate();
/// let public_key = secret_key.public_key();
///
/// let signature = secret_key.sign(b"hello world");
/// public_key.verify(b"hello world", &signature)?;
/// ```
#[derive(Clone)]
pub struct SigningSecretKey(SigningKey);

impl SigningSecretKey {
    /// Generate a new random signing key using a cryptographically secure RNG
    ///
    /// # Panics
    ///
    /// Panics if the operating system random source is unavailable.
    pub fn generate() -> Self {
        let seed: [u8; SIGNING_SEED_SIZE] =
            rng::random_array().expect("failed to generate random bytes");
        Self::from_seed(&seed)
    }

    /// Build a signing key from a 32-byte seed
    pub fn from_seed(seed: &[u8; SIGNING_SEED_SIZE]) -> Self {
        Self(SigningKey::from_bytes(seed))
    }

    /// Create a signing key from its 64-byte (seed || public key) form
    ///
    /// # Errors
    ///
    /// Returns an error if the slice is not exactly `SIGNING_SECRET_KEY_SIZE`
    /// bytes, or if the trailing public key does not belong to the seed.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != SIGNING_SECRET_KEY_SIZE {
            return Err(SapientError::size(SIGNING_SECRET_KEY_SIZE, bytes.len()));
        }
        let mut buff = [0; SIGNING_SECRET_KEY_SIZE];
        buff.copy_from_slice(bytes);
        let key = SigningKey::from_keypair_bytes(&buff).map_err(|_| {
            SapientError::Encoding("signing secret key does not match its public key".into())
        });
        zeroize::Zeroize::zeroize(&mut buff);
        Ok(Self(key?))
    }

    /// Convert secret key to raw bytes (seed || public key)
    pub fn to_bytes(&self) -> [u8; SIGNING_SECRET_KEY_SIZE] {
        self.0.to_keypair_bytes()
    }

    /// Derive the public key from this secret key
    pub fn public_key(&self) -> SigningPublicKey {
        SigningPublicKey(self.0.verifying_key())
    }

    /// Sign a message, returning a detached signature
    pub fn sign(&self, msg: &[u8]) -> [u8; SIGNATURE_SIZE] {
        self.0.sign(msg).to_bytes()
    }
}

impl PartialEq for SigningSecretKey {
    fn eq(&self, other: &Self) -> bool {
        self.to_bytes()[..].ct_eq(&other.to_bytes()[..]).into()
    }
}

impl Eq for SigningSecretKey {}

impl fmt::Debug for SigningSecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningSecretKey")
            .field("public_key", &self.public_key())
            .finish_non_exhaustive()
    }
}

/// Public half of an Ed25519 signing pair
///
/// Anyone holding this key can check that a body was signed by the
/// owner of the matching [`SigningSecretKey`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SigningPublicKey(VerifyingKey);

impl SigningPublicKey {
    /// Create a public key from raw bytes
    ///
    /// # Errors
    ///
    /// Returns an error if the slice is not exactly `SIGNING_PUBLIC_KEY_SIZE`
    /// bytes or does not encode a valid curve point.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != SIGNING_PUBLIC_KEY_SIZE {
            return Err(SapientError::size(SIGNING_PUBLIC_KEY_SIZE, bytes.len()));
        }
        let mut buff = [0; SIGNING_PUBLIC_KEY_SIZE];
        buff.copy_from_slice(bytes);
        let key = VerifyingKey::from_bytes(&buff)
            .map_err(|_| SapientError::Encoding("invalid Ed25519 public key".into()))?;
        Ok(Self(key))
    }

    /// Convert public key to raw bytes
    pub fn to_bytes(&self) -> [u8; SIGNING_PUBLIC_KEY_SIZE] {
        self.0.to_bytes()
    }

    /// Verify a detached Ed25519 signature on a message
    ///
    /// Uses strict verification, rejecting small-order keys and
    /// non-canonical signatures.
    ///
    /// # Errors
    ///
    /// Returns `InvalidMessage` if the signature has the wrong length or
    /// does not verify.
    pub fn verify(&self, msg: &[u8], signature: &[u8]) -> Result<()> {
        let signature = ed25519_dalek::Signature::from_slice(signature)
            .map_err(|_| SapientError::InvalidMessage("invalid signature length"))?;
        self.0
            .verify_strict(msg, &signature)
            .map_err(|_| SapientError::InvalidMessage("invalid signature"))
    }
}

/// Secret half of an X25519 sealing pair
///
/// Only the holder of this key can open bodies sealed to the matching
/// [`SealingPublicKey`].
#[derive(Clone)]
pub struct SealingSecretKey(StaticSecret);

impl SealingSecretKey {
    /// Generate a new random sealing key using a cryptographically secure RNG
    ///
    /// # Panics
    ///
    /// Panics if the operating system random source is unavailable.
    pub fn generate() -> Self {
        let bytes: [u8; SEALING_SECRET_KEY_SIZE] =
            rng::random_array().expect("failed to generate random bytes");
        Self(StaticSecret::from(bytes))
    }

    /// Create a sealing secret key from raw bytes
    ///
    /// # Errors
    ///
    /// Returns an error if the slice length is not exactly `SEALING_SECRET_KEY_SIZE` bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != SEALING_SECRET_KEY_SIZE {
            return Err(SapientError::size(SEALING_SECRET_KEY_SIZE, bytes.len()));
        }
        let mut buff = [0; SEALING_SECRET_KEY_SIZE];
        buff.copy_from_slice(bytes);
        Ok(Self(StaticSecret::from(buff)))
    }

    /// Convert secret key to raw bytes
    pub fn to_bytes(&self) -> [u8; SEALING_SECRET_KEY_SIZE] {
        self.0.to_bytes()
    }

    /// Derive the public key from this secret key
    pub fn public_key(&self) -> SealingPublicKey {
        SealingPublicKey(X25519PublicKey::from(&self.0))
    }

    pub(crate) fn inner(&self) -> &StaticSecret {
        &self.0
    }
}

impl PartialEq for SealingSecretKey {
    fn eq(&self, other: &Self) -> bool {
        self.0.as_bytes()[..].ct_eq(&other.0.as_bytes()[..]).into()
    }
}

impl Eq for SealingSecretKey {}

impl fmt::Debug for SealingSecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SealingSecretKey")
            .field("public_key", &self.public_key())
            .finish_non_exhaustive()
    }
}

/// Public half of an X25519 sealing pair
///
/// Senders need only this key to seal a body for its owner; the sealed
/// body does not identify the sender.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct SealingPublicKey(X25519PublicKey);

impl SealingPublicKey {
    /// Create a sealing public key from raw bytes
    ///
    /// # Errors
    ///
    /// Returns an error if the slice length is not exactly `SEALING_PUBLIC_KEY_SIZE` bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != SEALING_PUBLIC_KEY_SIZE {
            return Err(SapientError::size(SEALING_PUBLIC_KEY_SIZE, bytes.len()));
        }
        let mut buff = [0; SEALING_PUBLIC_KEY_SIZE];
        buff.copy_from_slice(bytes);
        Ok(Self(X25519PublicKey::from(buff)))
    }

    /// Convert public key to raw bytes
    pub fn to_bytes(&self) -> [u8; SEALING_PUBLIC_KEY_SIZE] {
        self.0.to_bytes()
    }

    pub(crate) fn inner(&self) -> &X25519PublicKey {
        &self.0
    }
}

impl fmt::Debug for SealingPublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SealingPublicKey")
            .field(&hex::encode(self.to_bytes()))
            .finish()
    }
}

key_text_encoding!(SigningSecretKey);
key_text_encoding!(SealingSecretKey);
key_text_encoding!(public SigningPublicKey);
key_text_encoding!(public SealingPublicKey);

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_keypair_generation() {
        let secret_key = SigningSecretKey::generate();
        let public_key = secret_key.public_key();

        // Test round-trip conversion
        let secret_hex = secret_key.to_hex();
        let recovered_secret = SigningSecretKey::from_hex(&secret_hex).unwrap();
        assert_eq!(secret_key, recovered_secret);

        let public_b64 = public_key.to_base64url();
        let recovered_public: SigningPublicKey = public_b64.parse().unwrap();
        assert_eq!(public_key, recovered_public);
    }

    #[test]
    fn test_public_key_derivation_is_deterministic() {
        let secret_key = SigningSecretKey::from_seed(&[7u8; SIGNING_SEED_SIZE]);
        let again = SigningSecretKey::from_seed(&[7u8; SIGNING_SEED_SIZE]);
        assert_eq!(secret_key.public_key(), again.public_key());

        let sealing = SealingSecretKey::from_bytes(&[9u8; SEALING_SECRET_KEY_SIZE]).unwrap();
        let sealing_again = SealingSecretKey::from_bytes(&[9u8; SEALING_SECRET_KEY_SIZE]).unwrap();
        assert_eq!(sealing.public_key(), sealing_again.public_key());
    }

    #[test]
    fn test_signing_secret_layout() {
        let secret_key = SigningSecretKey::generate();
        let bytes = secret_key.to_bytes();
        assert_eq!(&bytes[SIGNING_SEED_SIZE..], &secret_key.public_key().to_bytes());
    }

    #[test]
    fn test_mismatched_keypair_bytes() {
        let mut bytes = SigningSecretKey::generate().to_bytes();
        bytes[SIGNING_SEED_SIZE..]
            .copy_from_slice(&SigningSecretKey::generate().public_key().to_bytes());
        assert!(matches!(
            SigningSecretKey::from_bytes(&bytes),
            Err(SapientError::Encoding(_))
        ));
    }

    #[test]
    fn test_size_validation() {
        assert!(matches!(
            SigningSecretKey::from_bytes(&[1u8; 32]),
            Err(SapientError::Size {
                expected: 64,
                actual: 32
            })
        ));
        assert!(matches!(
            SigningPublicKey::from_bytes(&[1u8; 31]),
            Err(SapientError::Size { .. })
        ));
        assert!(matches!(
            SealingSecretKey::from_bytes(&[1u8; 33]),
            Err(SapientError::Size { .. })
        ));
        assert!(matches!(
            SealingPublicKey::from_bytes(&[]),
            Err(SapientError::Size { .. })
        ));
        assert!(SealingPublicKey::from_bytes(&[1u8; SEALING_PUBLIC_KEY_SIZE]).is_ok());
    }

    #[test]
    fn test_sign_and_verify() {
        let secret_key = SigningSecretKey::generate();
        let public_key = secret_key.public_key();
        let message = b"hello, world!";

        let signature = secret_key.sign(message);
        assert!(public_key.verify(message, &signature).is_ok());

        // Verify fails with wrong message
        assert!(public_key.verify(b"hello, world?", &signature).is_err());

        // Verify fails with wrong key
        let other_key = SigningSecretKey::generate().public_key();
        assert!(matches!(
            other_key.verify(message, &signature),
            Err(SapientError::InvalidMessage(_))
        ));

        // Verify fails with truncated signature
        assert!(public_key.verify(message, &signature[..63]).is_err());
    }

    #[test]
    fn test_every_key_parses_from_str() {
        use crate::crypto::{SharedAuthenticationKey, SharedEncryptionKey};

        let signing = SigningSecretKey::generate();
        assert_eq!(signing.to_base64url().parse::<SigningSecretKey>().unwrap(), signing);
        let sealing = SealingSecretKey::generate();
        assert_eq!(sealing.to_base64url().parse::<SealingSecretKey>().unwrap(), sealing);
        let public = sealing.public_key();
        assert_eq!(public.to_string().parse::<SealingPublicKey>().unwrap(), public);

        let shared = SharedEncryptionKey::generate();
        assert_eq!(shared.to_base64url().parse::<SharedEncryptionKey>().unwrap(), shared);
        let auth = SharedAuthenticationKey::generate();
        assert_eq!(auth.to_base64url().parse::<SharedAuthenticationKey>().unwrap(), auth);

        assert!(matches!(
            "not base64!".parse::<SharedEncryptionKey>(),
            Err(SapientError::Encoding(_))
        ));
        assert!(matches!(
            "AAAA".parse::<SigningPublicKey>(),
            Err(SapientError::Size { .. })
        ));
    }

    #[test]
    fn test_debug_redacts_secret() {
        let secret_key = SealingSecretKey::from_bytes(&[0xab; SEALING_SECRET_KEY_SIZE]).unwrap();
        let debug = format!("{:?}", secret_key);
        assert!(debug.contains("SealingSecretKey"));
        assert!(!debug.contains(&"ab".repeat(SEALING_SECRET_KEY_SIZE)));
    }
}
