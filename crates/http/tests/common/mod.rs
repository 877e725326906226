//! Shared fixtures for adapter integration tests
#![allow(dead_code)]

use axum::Router;
use sapient_http::{HttpRequest, HttpResponse};
use tokio::net::TcpListener;
use url::Url;

/// Route engine and adapter logs to the test harness output. Safe to call
/// repeatedly.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("common=debug,sapient_http=debug")
        .with_test_writer()
        .try_init();
}

/// Serve `router` on an ephemeral local port and return its base URL
pub async fn spawn_server(router: Router) -> Url {
    init_tracing();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    Url::parse(&format!("http://{}/", addr)).unwrap()
}

/// Buffer an incoming axum request so the engine can check it
pub async fn buffer_request(request: axum::extract::Request) -> HttpRequest {
    let (parts, body) = request.into_parts();
    let body = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    HttpRequest::from(http::Request::from_parts(parts, body))
}

/// Hand an engine-built response back to axum
pub fn into_axum(response: HttpResponse) -> axum::response::Response {
    response.into_inner().map(axum::body::Body::from)
}
