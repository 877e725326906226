/// In-memory HTTP messages
///
/// A dependency-free [`Adapter`](crate::message::Adapter) whose requests and
/// responses are plain structs. Useful in tests, and for callers that move
/// bodies over something other than an HTTP library.
///
/// # Example
///
/// ```rust,ignore
/// use common::crypto::SigningSecretKey;
/// use common::testkit::MemoryAdapter;
/// use common::Sapient;
///
/// let sapient = Sapient::new(MemoryAdapter);
/// let key = SigningSecretKey::generate();
/// let request = sapient.create_signed_request("POST", "/", "hello world", &key)?;
/// let verified = sapient.verify_signed_request(request, &key.public_key())?;
/// ```
mod memory;

pub use memory::{MemoryAdapter, MemoryRequest, MemoryResponse};
