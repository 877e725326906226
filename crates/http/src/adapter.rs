use bytes::Bytes;
use http::{Method, StatusCode};
use url::Url;

use common::message::{Adapter, Headers};
use common::Result;

use crate::message::{insert_header, message_error, HttpRequest, HttpResponse, ReqwestRequest};

fn build_response(status: u16, headers: Headers, body: Bytes) -> Result<HttpResponse> {
    let status = StatusCode::from_u16(status).map_err(message_error)?;
    let mut response = http::Response::new(body);
    *response.status_mut() = status;
    for (name, value) in headers {
        insert_header(response.headers_mut(), name, &value)?;
    }
    Ok(HttpResponse(response))
}

/// Builds `http::Request<Bytes>` and `http::Response<Bytes>` messages,
/// e.g. for server frameworks built on the `http` crate
#[derive(Debug, Clone, Copy, Default)]
pub struct HttpAdapter;

impl Adapter for HttpAdapter {
    type Request = HttpRequest;
    type Response = HttpResponse;

    fn request(&self, method: &str, uri: &str, headers: Headers, body: Bytes) -> Result<HttpRequest> {
        let mut builder = http::Request::builder().method(method).uri(uri);
        for (name, value) in headers {
            builder = builder.header(name, value);
        }
        builder.body(body).map(HttpRequest).map_err(message_error)
    }

    fn response(&self, status: u16, headers: Headers, body: Bytes) -> Result<HttpResponse> {
        build_response(status, headers, body)
    }
}

/// Builds `reqwest::Request` values for outgoing calls.
///
/// With a base URL, request URIs are resolved against it, so `"/api/items"`
/// becomes `https://host/api/items`. Without one every URI must be absolute.
/// Responses are buffered `http::Response<Bytes>` values; see
/// [`read_response`](crate::client::read_response).
#[derive(Debug, Clone, Default)]
pub struct ReqwestAdapter {
    base: Option<Url>,
}

impl ReqwestAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base(base: Url) -> Self {
        Self { base: Some(base) }
    }

    pub fn base(&self) -> Option<&Url> {
        self.base.as_ref()
    }

    fn resolve(&self, uri: &str) -> Result<Url> {
        match &self.base {
            Some(base) => base.join(uri).map_err(message_error),
            None => Url::parse(uri).map_err(message_error),
        }
    }
}

impl Adapter for ReqwestAdapter {
    type Request = ReqwestRequest;
    type Response = HttpResponse;

    fn request(
        &self,
        method: &str,
        uri: &str,
        headers: Headers,
        body: Bytes,
    ) -> Result<ReqwestRequest> {
        let method = Method::from_bytes(method.as_bytes()).map_err(message_error)?;
        let mut request = reqwest::Request::new(method, self.resolve(uri)?);
        for (name, value) in headers {
            insert_header(request.headers_mut(), name, &value)?;
        }
        *request.body_mut() = Some(body.into());
        Ok(ReqwestRequest(request))
    }

    fn response(&self, status: u16, headers: Headers, body: Bytes) -> Result<HttpResponse> {
        build_response(status, headers, body)
    }
}
