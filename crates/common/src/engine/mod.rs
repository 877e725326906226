//! The protocol engine.
//!
//! [`Sapient`] wraps an [`Adapter`] and exposes, for each of the four
//! modes, operations to create a protected message from a payload,
//! protect an existing message, check or open a received message, and
//! decode its body as raw bytes or JSON.
//!
//! Every operation is synchronous and single-shot. A message either
//! passes in full or is rejected with a [`SapientError`]; there is no
//! partially verified outcome.

mod auth;
mod seal;
mod sign;
mod symmetric;

use bytes::Bytes;

use crate::envelope::{Mode, CONTENT_TYPE_BINARY, CONTENT_TYPE_JSON};
use crate::error::{Result, SapientError};
use crate::message::{Adapter, Headers};

const CONTENT_TYPE: &str = "Content-Type";

/// Creates, protects and checks HTTP messages through an [`Adapter`]
#[derive(Debug, Clone, Default)]
pub struct Sapient<A: Adapter> {
    adapter: A,
}

impl<A: Adapter> Sapient<A> {
    pub fn new(adapter: A) -> Self {
        Self { adapter }
    }

    pub fn adapter(&self) -> &A {
        &self.adapter
    }

    fn build_request(
        &self,
        method: &str,
        uri: &str,
        content: Content,
        body: Bytes,
    ) -> Result<A::Request> {
        self.adapter.request(method, uri, content.headers(), body)
    }

    fn build_response(&self, status: u16, content: Content, body: Bytes) -> Result<A::Response> {
        self.adapter.response(status, content.headers(), body)
    }
}

/// What a freshly created body holds, for its `Content-Type`
#[derive(Debug, Clone, Copy)]
enum Content {
    Raw,
    Json,
    Ciphertext,
}

impl Content {
    fn headers(self) -> Headers {
        match self {
            Content::Raw => vec![],
            Content::Json => vec![(CONTENT_TYPE, CONTENT_TYPE_JSON.to_string())],
            Content::Ciphertext => vec![(CONTENT_TYPE, CONTENT_TYPE_BINARY.to_string())],
        }
    }
}

/// Log a rejected message and pass the error through.
/// Only the mode and error kind are recorded.
fn rejected(mode: Mode, error: SapientError) -> SapientError {
    tracing::debug!(?mode, %error, "rejected message");
    error
}
