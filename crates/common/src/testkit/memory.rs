use bytes::Bytes;

use crate::error::{Result, SapientError};
use crate::message::{Adapter, Headers, HttpMessage};

/// Ordered header list with case-insensitive names
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct HeaderList(Vec<(String, Vec<u8>)>);

impl HeaderList {
    fn from_headers(headers: Headers) -> Self {
        let mut list = HeaderList::default();
        for (name, value) in headers {
            list.set(name, value.as_bytes());
        }
        list
    }

    fn get(&self, name: &str) -> Option<&[u8]> {
        self.0
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_slice())
    }

    fn set(&mut self, name: &str, value: &[u8]) {
        self.0.retain(|(n, _)| !n.eq_ignore_ascii_case(name));
        self.0.push((name.to_string(), value.to_vec()));
    }

    fn append(&mut self, name: &str, value: &[u8]) {
        self.0.push((name.to_string(), value.to_vec()));
    }

    fn remove(&mut self, name: &str) {
        self.0.retain(|(n, _)| !n.eq_ignore_ascii_case(name));
    }
}

/// RFC 9110 `token`, the grammar of both methods and field names
fn is_token(s: &str) -> bool {
    !s.is_empty()
        && s.bytes().all(|b| {
            b.is_ascii_alphanumeric() || b"!#$%&'*+-.^_`|~".contains(&b)
        })
}

fn check_header(name: &str, value: &str) -> Result<()> {
    if !is_token(name) {
        return Err(SapientError::Message(format!("invalid header name: {:?}", name)));
    }
    if value.bytes().any(|b| b == b'\r' || b == b'\n') {
        return Err(SapientError::Message("invalid header value".into()));
    }
    Ok(())
}

/// An HTTP request held entirely in memory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryRequest {
    method: String,
    uri: String,
    headers: HeaderList,
    body: Bytes,
}

impl MemoryRequest {
    pub fn new(method: impl Into<String>, uri: impl Into<String>, body: impl Into<Bytes>) -> Self {
        Self {
            method: method.into(),
            uri: uri.into(),
            headers: HeaderList::default(),
            body: body.into(),
        }
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// Add a header value without replacing existing ones
    pub fn append_header(&mut self, name: &str, value: &[u8]) {
        self.headers.append(name, value);
    }

    pub fn remove_header(&mut self, name: &str) {
        self.headers.remove(name);
    }

    /// Builder-style body replacement, mirroring immutable message APIs
    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }
}

/// An HTTP response held entirely in memory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryResponse {
    status: u16,
    headers: HeaderList,
    body: Bytes,
}

impl MemoryResponse {
    pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            headers: HeaderList::default(),
            body: body.into(),
        }
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    /// Add a header value without replacing existing ones
    pub fn append_header(&mut self, name: &str, value: &[u8]) {
        self.headers.append(name, value);
    }

    pub fn remove_header(&mut self, name: &str) {
        self.headers.remove(name);
    }

    /// Builder-style body replacement, mirroring immutable message APIs
    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }
}

macro_rules! memory_message {
    ($ty:ty) => {
        impl HttpMessage for $ty {
            fn header(&self, name: &str) -> Option<&[u8]> {
                self.headers.get(name)
            }

            fn set_header(&mut self, name: &str, value: &str) -> Result<()> {
                check_header(name, value)?;
                self.headers.set(name, value.as_bytes());
                Ok(())
            }

            fn body(&self) -> Bytes {
                self.body.clone()
            }

            fn set_body(&mut self, body: Bytes) {
                self.body = body;
            }
        }
    };
}

memory_message!(MemoryRequest);
memory_message!(MemoryResponse);

/// Adapter producing [`MemoryRequest`] and [`MemoryResponse`] values
#[derive(Debug, Clone, Copy, Default)]
pub struct MemoryAdapter;

impl Adapter for MemoryAdapter {
    type Request = MemoryRequest;
    type Response = MemoryResponse;

    fn request(
        &self,
        method: &str,
        uri: &str,
        headers: Headers,
        body: Bytes,
    ) -> Result<Self::Request> {
        if !is_token(method) {
            return Err(SapientError::Message(format!("invalid method: {:?}", method)));
        }
        for (name, value) in &headers {
            check_header(name, value)?;
        }
        Ok(MemoryRequest {
            method: method.to_string(),
            uri: uri.to_string(),
            headers: HeaderList::from_headers(headers),
            body,
        })
    }

    fn response(&self, status: u16, headers: Headers, body: Bytes) -> Result<Self::Response> {
        if !(100..=999).contains(&status) {
            return Err(SapientError::Message(format!("invalid status code: {}", status)));
        }
        for (name, value) in &headers {
            check_header(name, value)?;
        }
        Ok(MemoryResponse {
            status,
            headers: HeaderList::from_headers(headers),
            body,
        })
    }
}
