use bytes::Bytes;
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::{rejected, Content, Sapient};
use crate::crypto::{SigningPublicKey, SigningSecretKey};
use crate::envelope::{self, json, Mode, HEADER_SIGNATURE_NAME};
use crate::error::Result;
use crate::message::{Adapter, HttpMessage};

fn sign<M: HttpMessage>(mut message: M, key: &SigningSecretKey) -> Result<M> {
    envelope::sign(&message.body(), key).apply(&mut message)?;
    Ok(message)
}

fn verify<M: HttpMessage>(message: &M, key: &SigningPublicKey) -> Result<Bytes> {
    let body = message.body();
    envelope::verify_signature(&body, message.header(HEADER_SIGNATURE_NAME), key)
        .map_err(|e| rejected(Mode::Sign, e))?;
    Ok(body)
}

fn decode_json<T: DeserializeOwned>(body: Bytes) -> Result<T> {
    json::decode(&body).map_err(|e| rejected(Mode::Sign, e))
}

/// Sign mode: the body stays readable and an Ed25519 signature over the
/// exact body bytes travels in the `Body-Signature-Ed25519` header.
impl<A: Adapter> Sapient<A> {
    pub fn create_signed_request(
        &self,
        method: &str,
        uri: &str,
        payload: impl Into<Bytes>,
        key: &SigningSecretKey,
    ) -> Result<A::Request> {
        let request = self.build_request(method, uri, Content::Raw, payload.into())?;
        sign(request, key)
    }

    pub fn create_signed_json_request<T: Serialize + ?Sized>(
        &self,
        method: &str,
        uri: &str,
        payload: &T,
        key: &SigningSecretKey,
    ) -> Result<A::Request> {
        let request = self.build_request(method, uri, Content::Json, json::encode(payload)?)?;
        sign(request, key)
    }

    pub fn create_signed_response(
        &self,
        status: u16,
        payload: impl Into<Bytes>,
        key: &SigningSecretKey,
    ) -> Result<A::Response> {
        let response = self.build_response(status, Content::Raw, payload.into())?;
        sign(response, key)
    }

    pub fn create_signed_json_response<T: Serialize + ?Sized>(
        &self,
        status: u16,
        payload: &T,
        key: &SigningSecretKey,
    ) -> Result<A::Response> {
        let response = self.build_response(status, Content::Json, json::encode(payload)?)?;
        sign(response, key)
    }

    /// Sign the body of an existing request, replacing any previous signature
    pub fn sign_request(&self, request: A::Request, key: &SigningSecretKey) -> Result<A::Request> {
        sign(request, key)
    }

    /// Sign the body of an existing response, replacing any previous signature
    pub fn sign_response(
        &self,
        response: A::Response,
        key: &SigningSecretKey,
    ) -> Result<A::Response> {
        sign(response, key)
    }

    /// Check the signature of a request, handing it back untouched on success
    ///
    /// # Errors
    ///
    /// - `HeaderMissing` if the request carries no signature header
    /// - `InvalidMessage` if the signature does not match the body and key
    pub fn verify_signed_request(
        &self,
        request: A::Request,
        key: &SigningPublicKey,
    ) -> Result<A::Request> {
        verify(&request, key)?;
        Ok(request)
    }

    /// Check the signature of a response, handing it back untouched on success
    pub fn verify_signed_response(
        &self,
        response: A::Response,
        key: &SigningPublicKey,
    ) -> Result<A::Response> {
        verify(&response, key)?;
        Ok(response)
    }

    pub fn decode_signed_request(
        &self,
        request: &A::Request,
        key: &SigningPublicKey,
    ) -> Result<Bytes> {
        verify(request, key)
    }

    pub fn decode_signed_response(
        &self,
        response: &A::Response,
        key: &SigningPublicKey,
    ) -> Result<Bytes> {
        verify(response, key)
    }

    pub fn decode_signed_json_request<T: DeserializeOwned>(
        &self,
        request: &A::Request,
        key: &SigningPublicKey,
    ) -> Result<T> {
        decode_json(verify(request, key)?)
    }

    pub fn decode_signed_json_response<T: DeserializeOwned>(
        &self,
        response: &A::Response,
        key: &SigningPublicKey,
    ) -> Result<T> {
        decode_json(verify(response, key)?)
    }
}

#[cfg(test)]
mod test {
    use serde_json::{json, Value};

    use super::*;
    use crate::error::SapientError;
    use crate::testkit::{MemoryAdapter, MemoryRequest};

    #[test]
    fn test_hello_world() {
        let sapient = Sapient::new(MemoryAdapter);
        let k1 = SigningSecretKey::generate();
        let k2 = SigningSecretKey::generate();

        let request = sapient
            .create_signed_request("POST", "/", "hello world", &k1)
            .unwrap();
        assert_eq!(&request.body()[..], b"hello world");

        let request = sapient
            .verify_signed_request(request, &k1.public_key())
            .unwrap();
        assert!(matches!(
            sapient.verify_signed_request(request, &k2.public_key()),
            Err(SapientError::InvalidMessage(_))
        ));
    }

    #[test]
    fn test_json_response() {
        let sapient = Sapient::new(MemoryAdapter);
        let key = SigningSecretKey::generate();
        let payload = json!({"test": "abcdefg"});

        let response = sapient
            .create_signed_json_response(200, &payload, &key)
            .unwrap();
        assert_eq!(response.status(), 200);
        assert_eq!(response.header("content-type"), Some(&b"application/json"[..]));

        let decoded: Value = sapient
            .decode_signed_json_response(&response, &key.public_key())
            .unwrap();
        assert_eq!(decoded, payload);
    }

    #[test]
    fn test_resign_overwrites_header() {
        let sapient = Sapient::new(MemoryAdapter);
        let old = SigningSecretKey::generate();
        let new = SigningSecretKey::generate();

        let request = sapient
            .create_signed_request("PUT", "/a", "body", &old)
            .unwrap();
        let request = sapient.sign_request(request, &new).unwrap();

        assert!(sapient
            .decode_signed_request(&request, &new.public_key())
            .is_ok());
        assert!(sapient
            .decode_signed_request(&request, &old.public_key())
            .is_err());
    }

    #[test]
    fn test_unsigned_message() {
        let sapient = Sapient::new(MemoryAdapter);
        let key = SigningSecretKey::generate();
        let request = MemoryRequest::new("GET", "/", "hello world");

        assert!(matches!(
            sapient.verify_signed_request(request, &key.public_key()),
            Err(SapientError::HeaderMissing(HEADER_SIGNATURE_NAME))
        ));
    }

    #[test]
    fn test_signed_non_json_body() {
        let sapient = Sapient::new(MemoryAdapter);
        let key = SigningSecretKey::generate();
        let request = sapient
            .create_signed_request("POST", "/", "invalid message", &key)
            .unwrap();

        assert!(sapient
            .decode_signed_request(&request, &key.public_key())
            .is_ok());
        assert!(matches!(
            sapient.decode_signed_json_request::<Value>(&request, &key.public_key()),
            Err(SapientError::InvalidMessage(_))
        ));
    }
}
