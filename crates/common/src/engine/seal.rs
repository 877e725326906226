use bytes::Bytes;
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::{rejected, Content, Sapient};
use crate::crypto::{SealingPublicKey, SealingSecretKey};
use crate::envelope::{self, json, Mode};
use crate::error::Result;
use crate::message::{Adapter, HttpMessage};

fn seal<M: HttpMessage>(mut message: M, key: &SealingPublicKey) -> Result<M> {
    envelope::seal(&message.body(), key)?.apply(&mut message)?;
    Ok(message)
}

fn open<M: HttpMessage>(message: &M, key: &SealingSecretKey) -> Result<Bytes> {
    envelope::unseal(&message.body(), key).map_err(|e| rejected(Mode::Seal, e))
}

fn unseal<M: HttpMessage>(mut message: M, key: &SealingSecretKey) -> Result<M> {
    let plaintext = open(&message, key)?;
    message.set_body(plaintext);
    Ok(message)
}

fn decode_json<T: DeserializeOwned>(body: Bytes) -> Result<T> {
    json::decode(&body).map_err(|e| rejected(Mode::Seal, e))
}

/// Seal mode: the body is replaced by ciphertext that only the holder of
/// the recipient's sealing secret key can open. The sender stays anonymous.
impl<A: Adapter> Sapient<A> {
    pub fn create_sealed_request(
        &self,
        method: &str,
        uri: &str,
        payload: impl Into<Bytes>,
        key: &SealingPublicKey,
    ) -> Result<A::Request> {
        let request = self.build_request(method, uri, Content::Ciphertext, payload.into())?;
        seal(request, key)
    }

    pub fn create_sealed_json_request<T: Serialize + ?Sized>(
        &self,
        method: &str,
        uri: &str,
        payload: &T,
        key: &SealingPublicKey,
    ) -> Result<A::Request> {
        let request =
            self.build_request(method, uri, Content::Ciphertext, json::encode(payload)?)?;
        seal(request, key)
    }

    pub fn create_sealed_response(
        &self,
        status: u16,
        payload: impl Into<Bytes>,
        key: &SealingPublicKey,
    ) -> Result<A::Response> {
        let response = self.build_response(status, Content::Ciphertext, payload.into())?;
        seal(response, key)
    }

    pub fn create_sealed_json_response<T: Serialize + ?Sized>(
        &self,
        status: u16,
        payload: &T,
        key: &SealingPublicKey,
    ) -> Result<A::Response> {
        let response = self.build_response(status, Content::Ciphertext, json::encode(payload)?)?;
        seal(response, key)
    }

    /// Replace the body of an existing request with its sealed form
    pub fn seal_request(&self, request: A::Request, key: &SealingPublicKey) -> Result<A::Request> {
        seal(request, key)
    }

    /// Replace the body of an existing response with its sealed form
    pub fn seal_response(
        &self,
        response: A::Response,
        key: &SealingPublicKey,
    ) -> Result<A::Response> {
        seal(response, key)
    }

    /// Open a sealed request, returning it with the plaintext body
    ///
    /// # Errors
    ///
    /// Returns `InvalidMessage` if the body was not sealed for `key` or was
    /// modified in transit.
    pub fn unseal_request(
        &self,
        request: A::Request,
        key: &SealingSecretKey,
    ) -> Result<A::Request> {
        unseal(request, key)
    }

    /// Open a sealed response, returning it with the plaintext body
    pub fn unseal_response(
        &self,
        response: A::Response,
        key: &SealingSecretKey,
    ) -> Result<A::Response> {
        unseal(response, key)
    }

    pub fn decode_sealed_request(
        &self,
        request: &A::Request,
        key: &SealingSecretKey,
    ) -> Result<Bytes> {
        open(request, key)
    }

    pub fn decode_sealed_response(
        &self,
        response: &A::Response,
        key: &SealingSecretKey,
    ) -> Result<Bytes> {
        open(response, key)
    }

    pub fn decode_sealed_json_request<T: DeserializeOwned>(
        &self,
        request: &A::Request,
        key: &SealingSecretKey,
    ) -> Result<T> {
        decode_json(open(request, key)?)
    }

    pub fn decode_sealed_json_response<T: DeserializeOwned>(
        &self,
        response: &A::Response,
        key: &SealingSecretKey,
    ) -> Result<T> {
        decode_json(open(response, key)?)
    }
}
