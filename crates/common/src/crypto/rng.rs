//! The single source of randomness for key generation, ephemeral
//! sealing keys and encryption nonces.
//!
//! Everything random in this crate goes through here, backed by the
//! operating system CSPRNG.

use crypto_box::aead::OsRng;

use crate::error::{Result, SapientError};

/// Fill `buf` from the OS random source
pub fn fill(buf: &mut [u8]) -> Result<()> {
    getrandom::getrandom(buf)
        .map_err(|e| SapientError::Random(format!("failed to generate random bytes: {}", e)))
}

/// Produce a fresh random byte array
pub fn random_array<const N: usize>() -> Result<[u8; N]> {
    let mut buff = [0u8; N];
    fill(&mut buff)?;
    Ok(buff)
}

/// The same OS source as a `rand_core` generator, for primitives that draw
/// their own randomness (sealed box ephemeral keys)
pub(crate) fn os_rng() -> OsRng {
    OsRng
}
