use bytes::Bytes;
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::{rejected, Content, Sapient};
use crate::crypto::SharedAuthenticationKey;
use crate::envelope::{self, json, Mode, HEADER_AUTH_NAME};
use crate::error::Result;
use crate::message::{Adapter, HttpMessage};

fn authenticate<M: HttpMessage>(mut message: M, key: &SharedAuthenticationKey) -> Result<M> {
    envelope::authenticate(&message.body(), key)?.apply(&mut message)?;
    Ok(message)
}

fn verify<M: HttpMessage>(message: &M, key: &SharedAuthenticationKey) -> Result<Bytes> {
    let body = message.body();
    envelope::verify_authentication(&body, message.header(HEADER_AUTH_NAME), key)
        .map_err(|e| rejected(Mode::SymmetricAuthenticate, e))?;
    Ok(body)
}

fn decode_json<T: DeserializeOwned>(body: Bytes) -> Result<T> {
    json::decode(&body).map_err(|e| rejected(Mode::SymmetricAuthenticate, e))
}

/// Symmetric-authenticate mode: the body stays readable and an
/// HMAC-SHA-512/256 tag over the exact body bytes travels in the
/// `Body-HMAC-SHA512256` header.
impl<A: Adapter> Sapient<A> {
    pub fn create_symmetric_authenticated_request(
        &self,
        method: &str,
        uri: &str,
        payload: impl Into<Bytes>,
        key: &SharedAuthenticationKey,
    ) -> Result<A::Request> {
        let request = self.build_request(method, uri, Content::Raw, payload.into())?;
        authenticate(request, key)
    }

    pub fn create_symmetric_authenticated_json_request<T: Serialize + ?Sized>(
        &self,
        method: &str,
        uri: &str,
        payload: &T,
        key: &SharedAuthenticationKey,
    ) -> Result<A::Request> {
        let request = self.build_request(method, uri, Content::Json, json::encode(payload)?)?;
        authenticate(request, key)
    }

    pub fn create_symmetric_authenticated_response(
        &self,
        status: u16,
        payload: impl Into<Bytes>,
        key: &SharedAuthenticationKey,
    ) -> Result<A::Response> {
        let response = self.build_response(status, Content::Raw, payload.into())?;
        authenticate(response, key)
    }

    pub fn create_symmetric_authenticated_json_response<T: Serialize + ?Sized>(
        &self,
        status: u16,
        payload: &T,
        key: &SharedAuthenticationKey,
    ) -> Result<A::Response> {
        let response = self.build_response(status, Content::Json, json::encode(payload)?)?;
        authenticate(response, key)
    }

    /// Add a MAC header to an existing request, replacing any previous one
    pub fn authenticate_request(
        &self,
        request: A::Request,
        key: &SharedAuthenticationKey,
    ) -> Result<A::Request> {
        authenticate(request, key)
    }

    /// Add a MAC header to an existing response, replacing any previous one
    pub fn authenticate_response(
        &self,
        response: A::Response,
        key: &SharedAuthenticationKey,
    ) -> Result<A::Response> {
        authenticate(response, key)
    }

    /// Check the MAC of a request, handing it back untouched on success
    ///
    /// # Errors
    ///
    /// - `HeaderMissing` if the request carries no MAC header
    /// - `InvalidMessage` if the tag does not match the body and key
    pub fn verify_symmetric_authenticated_request(
        &self,
        request: A::Request,
        key: &SharedAuthenticationKey,
    ) -> Result<A::Request> {
        verify(&request, key)?;
        Ok(request)
    }

    pub fn verify_symmetric_authenticated_response(
        &self,
        response: A::Response,
        key: &SharedAuthenticationKey,
    ) -> Result<A::Response> {
        verify(&response, key)?;
        Ok(response)
    }

    pub fn decode_symmetric_authenticated_request(
        &self,
        request: &A::Request,
        key: &SharedAuthenticationKey,
    ) -> Result<Bytes> {
        verify(request, key)
    }

    pub fn decode_symmetric_authenticated_response(
        &self,
        response: &A::Response,
        key: &SharedAuthenticationKey,
    ) -> Result<Bytes> {
        verify(response, key)
    }

    pub fn decode_symmetric_authenticated_json_request<T: DeserializeOwned>(
        &self,
        request: &A::Request,
        key: &SharedAuthenticationKey,
    ) -> Result<T> {
        decode_json(verify(request, key)?)
    }

    pub fn decode_symmetric_authenticated_json_response<T: DeserializeOwned>(
        &self,
        response: &A::Response,
        key: &SharedAuthenticationKey,
    ) -> Result<T> {
        decode_json(verify(response, key)?)
    }
}
