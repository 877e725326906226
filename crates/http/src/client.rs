use http::StatusCode;
use reqwest::Client;

use crate::message::{HttpResponse, ReqwestRequest};

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Reqwest(#[from] reqwest::Error),
    #[error("HTTP status {0}")]
    HttpStatus(StatusCode),
}

/// Execute a request and buffer the whole response.
/// Non-success statuses are returned as responses, not errors, since
/// error bodies may carry envelopes too.
pub async fn send(client: &Client, request: ReqwestRequest) -> Result<HttpResponse, ClientError> {
    let request = request.into_inner();
    tracing::debug!(method = %request.method(), url = %request.url(), "sending request");
    let response = client.execute(request).await?;
    read_response(response).await
}

/// Buffer a `reqwest::Response` into an [`HttpResponse`] the engine can check
pub async fn read_response(response: reqwest::Response) -> Result<HttpResponse, ClientError> {
    let status = response.status();
    let headers = response.headers().clone();
    let body = response.bytes().await?;
    tracing::debug!(%status, len = body.len(), "received response");

    let mut buffered = http::Response::new(body);
    *buffered.status_mut() = status;
    *buffered.headers_mut() = headers;
    Ok(HttpResponse(buffered))
}

/// Fail on non-success statuses, for callers that do not expect
/// protected error bodies
pub fn error_for_status(response: HttpResponse) -> Result<HttpResponse, ClientError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(ClientError::HttpStatus(status))
    }
}
