use std::fmt;
use std::str::FromStr;

use super::keys::{
    SealingPublicKey, SealingSecretKey, SigningPublicKey, SigningSecretKey,
    SEALING_PUBLIC_KEY_SIZE, SEALING_SECRET_KEY_SIZE, SIGNING_PUBLIC_KEY_SIZE,
    SIGNING_SECRET_KEY_SIZE,
};
use super::mac::{SharedAuthenticationKey, SHARED_AUTHENTICATION_KEY_SIZE};
use super::secret::{SharedEncryptionKey, SHARED_ENCRYPTION_KEY_SIZE};
use crate::error::{Result, SapientError};

/// The role a key plays in the protocol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyKind {
    SigningSecret,
    SigningPublic,
    SealingSecret,
    SealingPublic,
    SharedEncryption,
    SharedAuthentication,
}

impl KeyKind {
    pub const ALL: [KeyKind; 6] = [
        KeyKind::SigningSecret,
        KeyKind::SigningPublic,
        KeyKind::SealingSecret,
        KeyKind::SealingPublic,
        KeyKind::SharedEncryption,
        KeyKind::SharedAuthentication,
    ];

    /// Exact byte length of keys of this kind
    pub fn size(&self) -> usize {
        match self {
            KeyKind::SigningSecret => SIGNING_SECRET_KEY_SIZE,
            KeyKind::SigningPublic => SIGNING_PUBLIC_KEY_SIZE,
            KeyKind::SealingSecret => SEALING_SECRET_KEY_SIZE,
            KeyKind::SealingPublic => SEALING_PUBLIC_KEY_SIZE,
            KeyKind::SharedEncryption => SHARED_ENCRYPTION_KEY_SIZE,
            KeyKind::SharedAuthentication => SHARED_AUTHENTICATION_KEY_SIZE,
        }
    }

    /// Whether keys of this kind must be kept private
    pub fn is_secret(&self) -> bool {
        !matches!(self, KeyKind::SigningPublic | KeyKind::SealingPublic)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            KeyKind::SigningSecret => "signing-secret",
            KeyKind::SigningPublic => "signing-public",
            KeyKind::SealingSecret => "sealing-secret",
            KeyKind::SealingPublic => "sealing-public",
            KeyKind::SharedEncryption => "shared-encryption",
            KeyKind::SharedAuthentication => "shared-authentication",
        }
    }

    /// PEM label used when the key is written to a file
    pub fn pem_tag(&self) -> &'static str {
        match self {
            KeyKind::SigningSecret => "SAPIENT SIGNING SECRET KEY",
            KeyKind::SigningPublic => "SAPIENT SIGNING PUBLIC KEY",
            KeyKind::SealingSecret => "SAPIENT SEALING SECRET KEY",
            KeyKind::SealingPublic => "SAPIENT SEALING PUBLIC KEY",
            KeyKind::SharedEncryption => "SAPIENT SHARED ENCRYPTION KEY",
            KeyKind::SharedAuthentication => "SAPIENT SHARED AUTHENTICATION KEY",
        }
    }

    fn from_pem_tag(tag: &str) -> Option<Self> {
        KeyKind::ALL.into_iter().find(|kind| kind.pem_tag() == tag)
    }
}

impl fmt::Display for KeyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for KeyKind {
    type Err = SapientError;

    fn from_str(s: &str) -> Result<Self> {
        KeyKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| SapientError::Encoding(format!("unknown key kind: {}", s)))
    }
}

/// Any key of the family, tagged with its role
///
/// Role-specific capabilities are exposed as checks rather than through
/// the type: only the two asymmetric secret variants yield a public key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CryptographyKey {
    SigningSecret(SigningSecretKey),
    SigningPublic(SigningPublicKey),
    SealingSecret(SealingSecretKey),
    SealingPublic(SealingPublicKey),
    SharedEncryption(SharedEncryptionKey),
    SharedAuthentication(SharedAuthenticationKey),
}

impl CryptographyKey {
    /// Generate a fresh key of the given kind
    ///
    /// Returns `None` for public kinds, which can only be derived from
    /// their secret half.
    pub fn generate(kind: KeyKind) -> Option<Self> {
        let key = match kind {
            KeyKind::SigningSecret => SigningSecretKey::generate().into(),
            KeyKind::SealingSecret => SealingSecretKey::generate().into(),
            KeyKind::SharedEncryption => SharedEncryptionKey::generate().into(),
            KeyKind::SharedAuthentication => SharedAuthenticationKey::generate().into(),
            KeyKind::SigningPublic | KeyKind::SealingPublic => return None,
        };
        Some(key)
    }

    /// Build a key of the given kind from validated raw bytes
    pub fn from_bytes(kind: KeyKind, bytes: &[u8]) -> Result<Self> {
        Ok(match kind {
            KeyKind::SigningSecret => SigningSecretKey::from_bytes(bytes)?.into(),
            KeyKind::SigningPublic => SigningPublicKey::from_bytes(bytes)?.into(),
            KeyKind::SealingSecret => SealingSecretKey::from_bytes(bytes)?.into(),
            KeyKind::SealingPublic => SealingPublicKey::from_bytes(bytes)?.into(),
            KeyKind::SharedEncryption => SharedEncryptionKey::from_bytes(bytes)?.into(),
            KeyKind::SharedAuthentication => SharedAuthenticationKey::from_bytes(bytes)?.into(),
        })
    }

    pub fn kind(&self) -> KeyKind {
        match self {
            CryptographyKey::SigningSecret(_) => KeyKind::SigningSecret,
            CryptographyKey::SigningPublic(_) => KeyKind::SigningPublic,
            CryptographyKey::SealingSecret(_) => KeyKind::SealingSecret,
            CryptographyKey::SealingPublic(_) => KeyKind::SealingPublic,
            CryptographyKey::SharedEncryption(_) => KeyKind::SharedEncryption,
            CryptographyKey::SharedAuthentication(_) => KeyKind::SharedAuthentication,
        }
    }

    /// Raw key bytes
    pub fn to_bytes(&self) -> Vec<u8> {
        match self {
            CryptographyKey::SigningSecret(k) => k.to_bytes().to_vec(),
            CryptographyKey::SigningPublic(k) => k.to_bytes().to_vec(),
            CryptographyKey::SealingSecret(k) => k.to_bytes().to_vec(),
            CryptographyKey::SealingPublic(k) => k.to_bytes().to_vec(),
            CryptographyKey::SharedEncryption(k) => k.to_bytes().to_vec(),
            CryptographyKey::SharedAuthentication(k) => k.to_bytes().to_vec(),
        }
    }

    /// Derive the public half, for asymmetric secret keys only
    pub fn public_key(&self) -> Option<CryptographyKey> {
        match self {
            CryptographyKey::SigningSecret(k) => Some(k.public_key().into()),
            CryptographyKey::SealingSecret(k) => Some(k.public_key().into()),
            _ => None,
        }
    }

    pub fn to_base64url(&self) -> String {
        super::encoding::encode_base64url(&self.to_bytes())
    }

    /// Encode the key in PEM format, labelled with its kind
    pub fn to_pem(&self) -> String {
        let pem = pem::Pem::new(self.kind().pem_tag(), self.to_bytes());
        pem::encode(&pem)
    }

    /// Parse a key from PEM format
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The PEM string is malformed
    /// - The PEM tag does not name a known key kind
    /// - The key size is incorrect for that kind
    pub fn from_pem(pem_str: &str) -> Result<Self> {
        let pem = pem::parse(pem_str)?;
        let kind = KeyKind::from_pem_tag(pem.tag())
            .ok_or_else(|| SapientError::Encoding(format!("unknown PEM tag: {}", pem.tag())))?;
        Self::from_bytes(kind, pem.contents())
    }
}

macro_rules! cryptography_key_variant {
    ($variant:ident, $ty:ty) => {
        impl From<$ty> for CryptographyKey {
            fn from(key: $ty) -> Self {
                CryptographyKey::$variant(key)
            }
        }

        impl TryFrom<CryptographyKey> for $ty {
            type Error = SapientError;

            fn try_from(key: CryptographyKey) -> Result<Self> {
                match key {
                    CryptographyKey::$variant(inner) => Ok(inner),
                    other => Err(SapientError::Encoding(format!(
                        "expected {} key, got {}",
                        KeyKind::$variant,
                        other.kind()
                    ))),
                }
            }
        }
    };
}

cryptography_key_variant!(SigningSecret, SigningSecretKey);
cryptography_key_variant!(SigningPublic, SigningPublicKey);
cryptography_key_variant!(SealingSecret, SealingSecretKey);
cryptography_key_variant!(SealingPublic, SealingPublicKey);
cryptography_key_variant!(SharedEncryption, SharedEncryptionKey);
cryptography_key_variant!(SharedAuthentication, SharedAuthenticationKey);
