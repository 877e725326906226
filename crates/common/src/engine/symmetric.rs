use bytes::Bytes;
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::{rejected, Content, Sapient};
use crate::crypto::SharedEncryptionKey;
use crate::envelope::{self, json, Mode};
use crate::error::Result;
use crate::message::{Adapter, HttpMessage};

fn encrypt<M: HttpMessage>(mut message: M, key: &SharedEncryptionKey) -> Result<M> {
    envelope::encrypt(&message.body(), key)?.apply(&mut message)?;
    Ok(message)
}

fn plaintext<M: HttpMessage>(message: &M, key: &SharedEncryptionKey) -> Result<Bytes> {
    envelope::decrypt(&message.body(), key).map_err(|e| rejected(Mode::SymmetricEncrypt, e))
}

fn decrypt<M: HttpMessage>(mut message: M, key: &SharedEncryptionKey) -> Result<M> {
    let body = plaintext(&message, key)?;
    message.set_body(body);
    Ok(message)
}

fn decode_json<T: DeserializeOwned>(body: Bytes) -> Result<T> {
    json::decode(&body).map_err(|e| rejected(Mode::SymmetricEncrypt, e))
}

/// Symmetric-encrypt mode: the body is replaced by XChaCha20-Poly1305
/// ciphertext under a key both parties already share.
impl<A: Adapter> Sapient<A> {
    pub fn create_symmetric_encrypted_request(
        &self,
        method: &str,
        uri: &str,
        payload: impl Into<Bytes>,
        key: &SharedEncryptionKey,
    ) -> Result<A::Request> {
        let request = self.build_request(method, uri, Content::Ciphertext, payload.into())?;
        encrypt(request, key)
    }

    pub fn create_symmetric_encrypted_json_request<T: Serialize + ?Sized>(
        &self,
        method: &str,
        uri: &str,
        payload: &T,
        key: &SharedEncryptionKey,
    ) -> Result<A::Request> {
        let request =
            self.build_request(method, uri, Content::Ciphertext, json::encode(payload)?)?;
        encrypt(request, key)
    }

    pub fn create_symmetric_encrypted_response(
        &self,
        status: u16,
        payload: impl Into<Bytes>,
        key: &SharedEncryptionKey,
    ) -> Result<A::Response> {
        let response = self.build_response(status, Content::Ciphertext, payload.into())?;
        encrypt(response, key)
    }

    pub fn create_symmetric_encrypted_json_response<T: Serialize + ?Sized>(
        &self,
        status: u16,
        payload: &T,
        key: &SharedEncryptionKey,
    ) -> Result<A::Response> {
        let response = self.build_response(status, Content::Ciphertext, json::encode(payload)?)?;
        encrypt(response, key)
    }

    pub fn encrypt_request(
        &self,
        request: A::Request,
        key: &SharedEncryptionKey,
    ) -> Result<A::Request> {
        encrypt(request, key)
    }

    pub fn encrypt_response(
        &self,
        response: A::Response,
        key: &SharedEncryptionKey,
    ) -> Result<A::Response> {
        encrypt(response, key)
    }

    /// Decrypt a request, returning it with the plaintext body
    ///
    /// # Errors
    ///
    /// Returns `InvalidMessage` for a wrong key or a truncated or tampered
    /// ciphertext.
    pub fn decrypt_request(
        &self,
        request: A::Request,
        key: &SharedEncryptionKey,
    ) -> Result<A::Request> {
        decrypt(request, key)
    }

    pub fn decrypt_response(
        &self,
        response: A::Response,
        key: &SharedEncryptionKey,
    ) -> Result<A::Response> {
        decrypt(response, key)
    }

    pub fn decode_symmetric_encrypted_request(
        &self,
        request: &A::Request,
        key: &SharedEncryptionKey,
    ) -> Result<Bytes> {
        plaintext(request, key)
    }

    pub fn decode_symmetric_encrypted_response(
        &self,
        response: &A::Response,
        key: &SharedEncryptionKey,
    ) -> Result<Bytes> {
        plaintext(response, key)
    }

    pub fn decode_symmetric_encrypted_json_request<T: DeserializeOwned>(
        &self,
        request: &A::Request,
        key: &SharedEncryptionKey,
    ) -> Result<T> {
        decode_json(plaintext(request, key)?)
    }

    pub fn decode_symmetric_encrypted_json_response<T: DeserializeOwned>(
        &self,
        response: &A::Response,
        key: &SharedEncryptionKey,
    ) -> Result<T> {
        decode_json(plaintext(response, key)?)
    }
}
