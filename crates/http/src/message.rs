//! Wrappers that give `http` and `reqwest` messages the engine's
//! [`HttpMessage`] capabilities.
//!
//! The wrappers are thin: convert in with `From` (`TryFrom` for reqwest),
//! and get the original value back with `into_inner`.

use bytes::Bytes;
use http::header::{HeaderMap, HeaderName, HeaderValue};

use common::message::HttpMessage;
use common::{Result, SapientError};

pub(crate) fn message_error(e: impl std::fmt::Display) -> SapientError {
    SapientError::Message(e.to_string())
}

pub(crate) fn insert_header(headers: &mut HeaderMap, name: &str, value: &str) -> Result<()> {
    let name = HeaderName::from_bytes(name.as_bytes()).map_err(message_error)?;
    let value = HeaderValue::from_str(value).map_err(message_error)?;
    headers.insert(name, value);
    Ok(())
}

/// An `http::Request` with a fully buffered body
#[derive(Debug)]
pub struct HttpRequest(pub http::Request<Bytes>);

/// An `http::Response` with a fully buffered body
#[derive(Debug)]
pub struct HttpResponse(pub http::Response<Bytes>);

/// A `reqwest::Request` ready to be executed by a client.
///
/// The body is always absent or buffered: streaming bodies are refused at
/// conversion, since the envelope has to cover every byte sent.
#[derive(Debug)]
pub struct ReqwestRequest(pub(crate) reqwest::Request);

impl HttpRequest {
    pub fn inner(&self) -> &http::Request<Bytes> {
        &self.0
    }

    pub fn into_inner(self) -> http::Request<Bytes> {
        self.0
    }
}

impl HttpResponse {
    pub fn inner(&self) -> &http::Response<Bytes> {
        &self.0
    }

    pub fn into_inner(self) -> http::Response<Bytes> {
        self.0
    }

    pub fn status(&self) -> http::StatusCode {
        self.0.status()
    }
}

impl ReqwestRequest {
    pub fn inner(&self) -> &reqwest::Request {
        &self.0
    }

    pub fn into_inner(self) -> reqwest::Request {
        self.0
    }
}

impl From<http::Request<Bytes>> for HttpRequest {
    fn from(request: http::Request<Bytes>) -> Self {
        Self(request)
    }
}

impl From<http::Response<Bytes>> for HttpResponse {
    fn from(response: http::Response<Bytes>) -> Self {
        Self(response)
    }
}

impl TryFrom<reqwest::Request> for ReqwestRequest {
    type Error = SapientError;

    fn try_from(request: reqwest::Request) -> Result<Self> {
        if request.body().is_some_and(|body| body.as_bytes().is_none()) {
            return Err(SapientError::Message(
                "streaming request bodies cannot be protected".into(),
            ));
        }
        Ok(Self(request))
    }
}

macro_rules! buffered_message {
    ($ty:ty) => {
        impl HttpMessage for $ty {
            fn header(&self, name: &str) -> Option<&[u8]> {
                self.0.headers().get(name).map(HeaderValue::as_bytes)
            }

            fn set_header(&mut self, name: &str, value: &str) -> Result<()> {
                insert_header(self.0.headers_mut(), name, value)
            }

            fn body(&self) -> Bytes {
                self.0.body().clone()
            }

            fn set_body(&mut self, body: Bytes) {
                *self.0.body_mut() = body;
            }
        }
    };
}

buffered_message!(HttpRequest);
buffered_message!(HttpResponse);

impl HttpMessage for ReqwestRequest {
    fn header(&self, name: &str) -> Option<&[u8]> {
        self.0.headers().get(name).map(HeaderValue::as_bytes)
    }

    fn set_header(&mut self, name: &str, value: &str) -> Result<()> {
        insert_header(self.0.headers_mut(), name, value)
    }

    fn body(&self) -> Bytes {
        self.0
            .body()
            .and_then(reqwest::Body::as_bytes)
            .map(Bytes::copy_from_slice)
            .unwrap_or_default()
    }

    fn set_body(&mut self, body: Bytes) {
        *self.0.body_mut() = Some(body.into());
    }
}
