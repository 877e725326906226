//! The minimal view of an HTTP message the protocol engine relies on.
//!
//! The engine never names a concrete HTTP library. Bindings implement
//! [`HttpMessage`] for their request and response types and provide an
//! [`Adapter`] that can build new messages; see `sapient-http` for the
//! `http`/`reqwest` bindings and [`crate::testkit`] for an in-memory one.

use bytes::Bytes;

use crate::error::Result;

/// Header name/value pairs handed to an [`Adapter`] when building a message
pub type Headers = Vec<(&'static str, String)>;

/// Read/write access to one header and the body of a message
pub trait HttpMessage {
    /// First value of the named header, if present.
    /// Additional values are ignored, never folded together.
    fn header(&self, name: &str) -> Option<&[u8]>;

    /// Set a header, replacing every existing value of that name
    fn set_header(&mut self, name: &str, value: &str) -> Result<()>;

    /// The complete body
    fn body(&self) -> Bytes;

    /// Replace the complete body
    fn set_body(&mut self, body: Bytes);
}

/// Builds concrete request and response values for the engine
pub trait Adapter {
    type Request: HttpMessage;
    type Response: HttpMessage;

    /// Build a request from a method, a target URI, headers and a body
    fn request(
        &self,
        method: &str,
        uri: &str,
        headers: Headers,
        body: Bytes,
    ) -> Result<Self::Request>;

    /// Build a response from a status code, headers and a body
    fn response(&self, status: u16, headers: Headers, body: Bytes) -> Result<Self::Response>;
}
