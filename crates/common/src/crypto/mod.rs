//! Cryptographic primitives for body envelopes
//!
//! This module provides the key family and the primitive operations each
//! protection mode is built on:
//!
//! - **Signing**: Ed25519 keypairs (`SigningSecretKey`/`SigningPublicKey`)
//! - **Sealing**: X25519 keypairs (`SealingSecretKey`/`SealingPublicKey`)
//!   for anonymous public-key encryption
//! - **Symmetric encryption**: XChaCha20-Poly1305 under a `SharedEncryptionKey`
//! - **Symmetric authentication**: HMAC-SHA-512/256 under a `SharedAuthenticationKey`
//!
//! # Key Model
//!
//! Every key is an immutable, fixed-length byte string. Lengths are checked
//! at construction and a key never changes afterwards, so keys can be shared
//! freely between threads. Secret keys zeroize on drop, compare in constant
//! time and redact themselves from `Debug` output.
//!
//! [`CryptographyKey`] wraps any of the six roles in a single tagged value
//! for code that handles keys generically (key files, the CLI).
//!
//! # Text Forms
//!
//! All keys round-trip through base64url (`to_base64url`/`from_base64url`)
//! and hex (`to_hex`/`from_hex`). [`CryptographyKey`] also reads and writes
//! PEM labelled with the key's role.

/// Text encodings shared by every key type.
/// `public` keys additionally get `Display`.
macro_rules! key_text_encoding {
    (public $ty:ident) => {
        key_text_encoding!($ty);

        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.to_base64url())
            }
        }
    };
    ($ty:ident) => {
        impl $ty {
            /// Parse a key from a hexadecimal string
            ///
            /// Accepts both plain hex and "0x"-prefixed hex strings.
            pub fn from_hex(hex: &str) -> $crate::error::Result<Self> {
                Self::from_bytes(&$crate::crypto::encoding::decode_hex(hex)?)
            }

            /// Convert key to hexadecimal string
            pub fn to_hex(&self) -> String {
                hex::encode(self.to_bytes())
            }

            /// Parse a key from base64url text
            pub fn from_base64url(text: &str) -> $crate::error::Result<Self> {
                Self::from_bytes(&$crate::crypto::encoding::decode_base64url(text)?)
            }

            /// Convert key to base64url text
            pub fn to_base64url(&self) -> String {
                $crate::crypto::encoding::encode_base64url(&self.to_bytes())
            }
        }

        impl std::str::FromStr for $ty {
            type Err = $crate::error::SapientError;

            fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                Self::from_base64url(s)
            }
        }
    };
}

pub mod encoding;
pub mod rng;

mod key;
mod keys;
mod mac;
mod sealed_box;
mod secret;

pub use key::{CryptographyKey, KeyKind};
pub use keys::{
    SealingPublicKey, SealingSecretKey, SigningPublicKey, SigningSecretKey,
    SEALING_PUBLIC_KEY_SIZE, SEALING_SECRET_KEY_SIZE, SIGNATURE_SIZE, SIGNING_PUBLIC_KEY_SIZE,
    SIGNING_SECRET_KEY_SIZE, SIGNING_SEED_SIZE,
};
pub use mac::{SharedAuthenticationKey, MAC_SIZE, SHARED_AUTHENTICATION_KEY_SIZE};
pub use sealed_box::{open, seal, SEAL_OVERHEAD};
pub use secret::{SharedEncryptionKey, NONCE_SIZE, SHARED_ENCRYPTION_KEY_SIZE, TAG_SIZE};
