//! Integration tests for key validation and text forms

mod common;

use ::common::crypto::{
    CryptographyKey, KeyKind, SealingPublicKey, SealingSecretKey, SharedAuthenticationKey,
    SharedEncryptionKey, SigningPublicKey, SigningSecretKey,
};
use ::common::SapientError;

fn secret_kinds() -> impl Iterator<Item = KeyKind> {
    KeyKind::ALL.into_iter().filter(|kind| kind.is_secret())
}

#[test]
fn test_wrong_sizes_rejected() {
    for kind in KeyKind::ALL {
        for len in [0, kind.size() - 1, kind.size() + 1] {
            let bytes = vec![7u8; len];
            assert!(
                matches!(
                    CryptographyKey::from_bytes(kind, &bytes),
                    Err(SapientError::Size { expected, actual }) if expected == kind.size() && actual == len
                ),
                "{} accepted {} bytes",
                kind,
                len
            );
        }
    }
}

#[test]
fn test_text_round_trips() {
    for kind in secret_kinds() {
        let key = CryptographyKey::generate(kind).unwrap();
        let mut keys = vec![key.clone()];
        keys.extend(key.public_key());

        for key in keys {
            let pem = key.to_pem();
            assert_eq!(CryptographyKey::from_pem(&pem).unwrap(), key);

            let decoded = ::common::crypto::encoding::decode_base64url(&key.to_base64url()).unwrap();
            assert_eq!(CryptographyKey::from_bytes(key.kind(), &decoded).unwrap(), key);
        }
    }
}

#[test]
fn test_typed_text_forms() {
    let signing = SigningSecretKey::generate();
    assert_eq!(
        SigningSecretKey::from_base64url(&signing.to_base64url()).unwrap(),
        signing
    );
    assert_eq!(SigningSecretKey::from_hex(&signing.to_hex()).unwrap(), signing);
    let public = signing.public_key();
    assert_eq!(public.to_string().parse::<SigningPublicKey>().unwrap(), public);

    let sealing = SealingSecretKey::generate();
    assert_eq!(
        SealingSecretKey::from_hex(&format!("0x{}", sealing.to_hex())).unwrap(),
        sealing
    );
    let public = sealing.public_key();
    assert_eq!(
        SealingPublicKey::from_base64url(&public.to_base64url()).unwrap(),
        public
    );

    let encryption = SharedEncryptionKey::generate();
    assert_eq!(
        SharedEncryptionKey::from_base64url(&encryption.to_base64url()).unwrap(),
        encryption
    );

    let authentication = SharedAuthenticationKey::generate();
    assert_eq!(
        SharedAuthenticationKey::from_hex(&authentication.to_hex()).unwrap(),
        authentication
    );
}

#[test]
fn test_pem_role_is_enforced() {
    let key = CryptographyKey::generate(KeyKind::SharedEncryption).unwrap();
    let pem = key.to_pem().replace("SHARED ENCRYPTION", "SHARED AUTHENTICATION");
    let parsed = CryptographyKey::from_pem(&pem).unwrap();
    // Same bytes, different role: the keys are not interchangeable
    assert_eq!(parsed.kind(), KeyKind::SharedAuthentication);
    assert_ne!(parsed, key);

    let bogus = pem::encode(&pem::Pem::new("RSA PRIVATE KEY", vec![0u8; 32]));
    assert!(matches!(
        CryptographyKey::from_pem(&bogus),
        Err(SapientError::Encoding(_))
    ));
}

#[test]
fn test_secret_keys_redacted_in_debug() {
    let key = SharedAuthenticationKey::generate();
    let debug = format!("{:?}", key);
    assert!(!debug.contains(&key.to_hex()));
    assert!(!debug.contains(&key.to_base64url()));
}
