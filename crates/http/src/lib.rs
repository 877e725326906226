/**
 * `HttpMessage` implementations for `http` and
 *  `reqwest` message types.
 */
pub mod message;
/**
 * Adapters that let the engine build those messages.
 */
pub mod adapter;
/**
 * Sending protected requests with a reqwest client
 *  and collecting their responses.
 */
pub mod client;

pub use adapter::{HttpAdapter, ReqwestAdapter};
pub use client::{error_for_status, read_response, send, ClientError};
pub use message::{HttpRequest, HttpResponse, ReqwestRequest};
