//! Text encodings for keys and header values.

use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig};
use base64::engine::DecodePaddingMode;
use base64::Engine;

use crate::error::Result;

/// URL-safe base64, padded on output, padding optional on input
const BASE64URL: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_encode_padding(true)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Encode bytes as base64url
pub fn encode_base64url(bytes: &[u8]) -> String {
    BASE64URL.encode(bytes)
}

/// Decode base64url text, with or without padding
pub fn decode_base64url(text: &str) -> Result<Vec<u8>> {
    Ok(BASE64URL.decode(text.trim())?)
}

/// Decode hex text. Accepts both plain hex and "0x"-prefixed hex strings.
pub fn decode_hex(text: &str) -> Result<Vec<u8>> {
    let text = text.trim();
    let text = text.strip_prefix("0x").unwrap_or(text);
    Ok(hex::decode(text)?)
}
