//! Anonymous public-key encryption (sealing)
//!
//! Sealed boxes follow libsodium's `crypto_box_seal`:
//! 1. **Generate ephemeral keypair**: a fresh X25519 keypair per call
//! 2. **Derive nonce**: BLAKE2b-192 over `ephemeral_pubkey || recipient_pubkey`
//! 3. **Encrypt**: `crypto_box` (X25519, HSalsa20, XSalsa20-Poly1305) from
//!    the ephemeral secret to the recipient
//! 4. **Package**: `ephemeral_pubkey || tag || ciphertext`
//!
//! The recipient recomputes the nonce from the ephemeral public key carried
//! in the box and its own public key.
//!
//! # Security Properties
//!
//! - **Confidentiality**: only the holder of the recipient's secret key can open the box
//! - **Integrity**: the Poly1305 tag fails closed on any modification
//! - **Anonymity**: the ephemeral secret is discarded, so nothing in the box
//!   identifies or authenticates the sender

use x25519_dalek::{PublicKey as X25519PublicKey, StaticSecret};
use zeroize::Zeroize;

use super::keys::{SealingPublicKey, SealingSecretKey, SEALING_PUBLIC_KEY_SIZE};
use super::rng;
use super::secret::TAG_SIZE;
use crate::error::{Result, SapientError};

/// Bytes added to a body by sealing: ephemeral public key plus Poly1305 tag
pub const SEAL_OVERHEAD: usize = SEALING_PUBLIC_KEY_SIZE + TAG_SIZE;

/// Any clamped scalar maps a small-order point, and only such a point, to
/// the identity.
const ORDER_CHECK_SCALAR: [u8; 32] = [0x5a; 32];

fn is_small_order(point: &X25519PublicKey) -> bool {
    !StaticSecret::from(ORDER_CHECK_SCALAR)
        .diffie_hellman(point)
        .was_contributory()
}

/// Seal `plaintext` so that only the owner of `recipient` can open it
///
/// The ephemeral keypair is drawn from the operating system CSPRNG.
///
/// # Errors
///
/// Returns `InvalidMessage` if the recipient key is a small-order point
/// (the key exchange would not be contributory).
pub fn seal(plaintext: &[u8], recipient: &SealingPublicKey) -> Result<Vec<u8>> {
    if is_small_order(recipient.inner()) {
        return Err(SapientError::InvalidMessage(
            "recipient public key is a low-order point",
        ));
    }

    crypto_box::PublicKey::from(recipient.to_bytes())
        .seal(&mut rng::os_rng(), plaintext)
        .map_err(|_| SapientError::InvalidMessage("seal error"))
}

/// Open a sealed box with the recipient's secret key
///
/// # Errors
///
/// Returns `InvalidMessage` if the box is too short, was sealed for a
/// different key, carries a small-order ephemeral key, or was modified in
/// transit.
pub fn open(sealed: &[u8], recipient: &SealingSecretKey) -> Result<Vec<u8>> {
    if sealed.len() < SEAL_OVERHEAD {
        return Err(SapientError::InvalidMessage("sealed box too short"));
    }

    let mut ephemeral = [0u8; SEALING_PUBLIC_KEY_SIZE];
    ephemeral.copy_from_slice(&sealed[..SEALING_PUBLIC_KEY_SIZE]);
    if is_small_order(&X25519PublicKey::from(ephemeral)) {
        return Err(SapientError::InvalidMessage("unseal error"));
    }

    let mut secret = recipient.to_bytes();
    let key = crypto_box::SecretKey::from(secret);
    secret.zeroize();

    key.unseal(sealed)
        .map_err(|_| SapientError::InvalidMessage("unseal error"))
}

impl SealingPublicKey {
    /// Seal a body for the owner of this key. See [`seal`].
    pub fn seal(&self, plaintext: &[u8]) -> Result<Vec<u8>> {
        seal(plaintext, self)
    }
}

impl SealingSecretKey {
    /// Open a body sealed to this key's public half. See [`open`].
    pub fn open(&self, sealed: &[u8]) -> Result<Vec<u8>> {
        open(sealed, self)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    // crypto_box_seal("hello world") for the NaCl test key "bob", with the
    // NaCl "alice" secret as the ephemeral key
    const BOB_SECRET: &str = "5dab087e624a8a4b79e17f8b83800ee66f3bb1292618b6fd1c2f8b27ff88e0eb";
    const BOB_PUBLIC: &str = "de9edb7d7b7dc1b4d35b61c2ece435373f8343c85b78674dadfc7e146f882b4f";
    const HELLO_SEALED: &str = "8520f0098930a754748b7ddcb43ef75a0dbf3a0d26381af4eba4a98eaa9b4e6a\
                                aaa9282c2e0cf14f25859608edcc57bdcf62c0aa87d8743ea20a2f";

    #[test]
    fn test_seal_open() {
        let recipient = SealingSecretKey::generate();
        let sealed = recipient.public_key().seal(b"for your eyes only").unwrap();
        assert_eq!(sealed.len(), b"for your eyes only".len() + SEAL_OVERHEAD);
        let opened = recipient.open(&sealed).unwrap();
        assert_eq!(opened, b"for your eyes only");
    }

    #[test]
    fn test_open_libsodium_sealed_box() {
        let bob = SealingSecretKey::from_hex(BOB_SECRET).unwrap();
        assert_eq!(bob.public_key().to_hex(), BOB_PUBLIC);

        let sealed = hex::decode(HELLO_SEALED).unwrap();
        assert_eq!(sealed.len(), b"hello world".len() + SEAL_OVERHEAD);
        assert_eq!(bob.open(&sealed).unwrap(), b"hello world");
    }

    #[test]
    fn test_seal_opens_with_crypto_box() {
        let recipient = SealingSecretKey::generate();
        let sealed = recipient.public_key().seal(b"interop").unwrap();

        let other = crypto_box::SecretKey::from(recipient.to_bytes());
        assert_eq!(other.unseal(&sealed).unwrap(), b"interop");

        let sealed = other
            .public_key()
            .seal(&mut rng::os_rng(), b"and back")
            .unwrap();
        assert_eq!(recipient.open(&sealed).unwrap(), b"and back");
    }

    #[test]
    fn test_seal_is_randomized() {
        let recipient = SealingSecretKey::generate().public_key();
        let a = recipient.seal(b"same").unwrap();
        let b = recipient.seal(b"same").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_open_with_wrong_key() {
        let alice = SealingSecretKey::generate();
        let bob = SealingSecretKey::generate();
        let sealed = alice.public_key().seal(b"for alice").unwrap();
        assert!(matches!(
            bob.open(&sealed),
            Err(SapientError::InvalidMessage(_))
        ));
    }

    #[test]
    fn test_open_tampered() {
        let recipient = SealingSecretKey::generate();
        let sealed = recipient.public_key().seal(b"do not touch").unwrap();

        for index in [0, SEALING_PUBLIC_KEY_SIZE, sealed.len() - 1] {
            let mut tampered = sealed.clone();
            tampered[index] ^= 0x80;
            assert!(recipient.open(&tampered).is_err());
        }
    }

    #[test]
    fn test_open_truncated() {
        let recipient = SealingSecretKey::generate();
        let sealed = recipient.public_key().seal(b"").unwrap();
        assert_eq!(sealed.len(), SEAL_OVERHEAD);
        assert!(recipient.open(&sealed).unwrap().is_empty());
        assert!(recipient.open(&sealed[..SEAL_OVERHEAD - 1]).is_err());
    }

    #[test]
    fn test_low_order_keys_rejected() {
        let zero = SealingPublicKey::from_bytes(&[0u8; SEALING_PUBLIC_KEY_SIZE]).unwrap();
        assert!(seal(b"nope", &zero).is_err());

        let recipient = SealingSecretKey::generate();
        let forged = [0u8; SEAL_OVERHEAD];
        assert!(matches!(
            recipient.open(&forged),
            Err(SapientError::InvalidMessage(_))
        ));
    }
}
