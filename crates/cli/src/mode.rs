//! Mode selection and key dispatch shared by `protect`, `open` and `send`.

use bytes::Bytes;
use clap::ValueEnum;

use common::crypto::{CryptographyKey, KeyKind};
use common::envelope::Mode;
use common::message::Adapter;
use common::{Sapient, SapientError};

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeArg {
    /// Ed25519 signature header, body stays readable
    Sign,
    /// Anonymous public-key encryption of the body
    Seal,
    /// Shared-key encryption of the body
    Encrypt,
    /// Shared-key MAC header, body stays readable
    Authenticate,
}

impl From<ModeArg> for Mode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Sign => Mode::Sign,
            ModeArg::Seal => Mode::Seal,
            ModeArg::Encrypt => Mode::SymmetricEncrypt,
            ModeArg::Authenticate => Mode::SymmetricAuthenticate,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ModeError {
    #[error("a {kind} key cannot be used to {action} in {mode:?} mode")]
    WrongKey {
        mode: Mode,
        kind: KeyKind,
        action: &'static str,
    },
    #[error(transparent)]
    Sapient(#[from] SapientError),
}

fn wrong_key(mode: Mode, key: &CryptographyKey, action: &'static str) -> ModeError {
    ModeError::WrongKey {
        mode,
        kind: key.kind(),
        action,
    }
}

/// Apply the envelope for `mode` to an existing request
pub fn protect_request<A: Adapter>(
    sapient: &Sapient<A>,
    mode: Mode,
    key: &CryptographyKey,
    request: A::Request,
) -> Result<A::Request, ModeError> {
    use CryptographyKey::*;

    let request = match (mode, key) {
        (Mode::Sign, SigningSecret(k)) => sapient.sign_request(request, k)?,
        (Mode::Seal, SealingPublic(k)) => sapient.seal_request(request, k)?,
        (Mode::Seal, SealingSecret(k)) => sapient.seal_request(request, &k.public_key())?,
        (Mode::SymmetricEncrypt, SharedEncryption(k)) => sapient.encrypt_request(request, k)?,
        (Mode::SymmetricAuthenticate, SharedAuthentication(k)) => {
            sapient.authenticate_request(request, k)?
        }
        _ => return Err(wrong_key(mode, key, "protect")),
    };
    Ok(request)
}

/// Verify or decrypt a request, returning its plaintext body
pub fn open_request<A: Adapter>(
    sapient: &Sapient<A>,
    mode: Mode,
    key: &CryptographyKey,
    request: &A::Request,
) -> Result<Bytes, ModeError> {
    use CryptographyKey::*;

    let body = match (mode, key) {
        (Mode::Sign, SigningPublic(k)) => sapient.decode_signed_request(request, k)?,
        (Mode::Sign, SigningSecret(k)) => {
            sapient.decode_signed_request(request, &k.public_key())?
        }
        (Mode::Seal, SealingSecret(k)) => sapient.decode_sealed_request(request, k)?,
        (Mode::SymmetricEncrypt, SharedEncryption(k)) => {
            sapient.decode_symmetric_encrypted_request(request, k)?
        }
        (Mode::SymmetricAuthenticate, SharedAuthentication(k)) => {
            sapient.decode_symmetric_authenticated_request(request, k)?
        }
        _ => return Err(wrong_key(mode, key, "open")),
    };
    Ok(body)
}

/// Verify or decrypt a response, returning its plaintext body
pub fn open_response<A: Adapter>(
    sapient: &Sapient<A>,
    mode: Mode,
    key: &CryptographyKey,
    response: &A::Response,
) -> Result<Bytes, ModeError> {
    use CryptographyKey::*;

    let body = match (mode, key) {
        (Mode::Sign, SigningPublic(k)) => sapient.decode_signed_response(response, k)?,
        (Mode::Sign, SigningSecret(k)) => {
            sapient.decode_signed_response(response, &k.public_key())?
        }
        (Mode::Seal, SealingSecret(k)) => sapient.decode_sealed_response(response, k)?,
        (Mode::SymmetricEncrypt, SharedEncryption(k)) => {
            sapient.decode_symmetric_encrypted_response(response, k)?
        }
        (Mode::SymmetricAuthenticate, SharedAuthentication(k)) => {
            sapient.decode_symmetric_authenticated_response(response, k)?
        }
        _ => return Err(wrong_key(mode, key, "open")),
    };
    Ok(body)
}
