/**
 * Cryptographic keys and primitives.
 *  - Ed25519 signing and X25519 sealing keypairs
 *  - Shared symmetric encryption and authentication keys
 *  - base64url / hex / PEM text forms
 */
pub mod crypto;
/**
 * Body envelopes: the header or replacement
 *  body each protection mode attaches to a message,
 *  plus canonical JSON rendering of payloads.
 */
pub mod envelope;
/**
 * The protocol engine. Creates, protects, verifies
 *  and decodes requests and responses through
 *  an adapter.
 */
pub mod engine;
/**
 * Error type shared across the crate.
 */
pub mod error;
/**
 * The capability boundary between the engine and
 *  concrete HTTP message types.
 */
pub mod message;
/**
 * In-memory messages for tests and for transports
 *  that are not HTTP libraries.
 */
pub mod testkit;

pub use engine::Sapient;
pub use error::{Result, SapientError};

pub mod prelude {
    pub use crate::crypto::{
        CryptographyKey, KeyKind, SealingPublicKey, SealingSecretKey, SharedAuthenticationKey,
        SharedEncryptionKey, SigningPublicKey, SigningSecretKey,
    };
    pub use crate::engine::Sapient;
    pub use crate::envelope::{Mode, HEADER_AUTH_NAME, HEADER_SIGNATURE_NAME};
    pub use crate::error::{Result, SapientError};
    pub use crate::message::{Adapter, HttpMessage};
}
