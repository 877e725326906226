//! Shared test utilities for engine integration tests
#![allow(dead_code)]

use common::crypto::encoding::encode_base64url;
use common::crypto::rng;
use common::testkit::MemoryAdapter;
use common::Sapient;
use serde_json::{json, Value};

/// Route engine logs to the test harness output. Safe to call repeatedly.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("common=debug")
        .with_test_writer()
        .try_init();
}

/// An engine over in-memory messages
pub fn setup_engine() -> Sapient<MemoryAdapter> {
    init_tracing();
    Sapient::new(MemoryAdapter)
}

/// JSON payloads every mode must carry unchanged
pub fn sample_payloads() -> Vec<Value> {
    let random: [u8; 32] = rng::random_array().unwrap();
    vec![
        json!({}),
        json!({"test": "abcdefg"}),
        json!({"random": encode_base64url(&random)}),
        json!({
            "structured": {
                "abc": "def",
                "o": null,
                "ghi": ["j", "k", "l"],
                "m": 1234,
                "n": 56.78,
                "p": {"q": {"r": []}}
            }
        }),
    ]
}

/// Every copy of `body` with exactly one byte changed
pub fn single_byte_flips(body: &[u8]) -> impl Iterator<Item = Vec<u8>> + '_ {
    (0..body.len()).map(move |i| {
        let mut flipped = body.to_vec();
        flipped[i] ^= 0x01;
        flipped
    })
}
