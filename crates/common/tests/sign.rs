//! Integration tests for sign mode

mod common;

use ::common::crypto::SigningSecretKey;
use ::common::envelope::HEADER_SIGNATURE_NAME;
use ::common::message::HttpMessage;
use ::common::testkit::{MemoryRequest, MemoryResponse};
use ::common::SapientError;
use serde_json::Value;

#[test]
fn test_hello_world_k1_k2() {
    let sapient = common::setup_engine();
    let k1 = SigningSecretKey::generate();
    let k2 = SigningSecretKey::generate();

    let request = sapient
        .create_signed_request("POST", "/", "hello world", &k1)
        .unwrap();
    let header = request.header(HEADER_SIGNATURE_NAME).unwrap().to_vec();

    let request = sapient
        .verify_signed_request(request, &k1.public_key())
        .unwrap();
    assert_eq!(&request.body()[..], b"hello world");
    assert_eq!(request.header(HEADER_SIGNATURE_NAME), Some(&header[..]));

    assert!(matches!(
        sapient.verify_signed_request(request, &k2.public_key()),
        Err(SapientError::InvalidMessage(_))
    ));
}

#[test]
fn test_json_payloads_round_trip() {
    let sapient = common::setup_engine();
    let key = SigningSecretKey::generate();

    for payload in common::sample_payloads() {
        let request = sapient
            .create_signed_json_request("POST", "/", &payload, &key)
            .unwrap();
        let decoded: Value = sapient
            .decode_signed_json_request(&request, &key.public_key())
            .unwrap();
        assert_eq!(decoded, payload);

        let response = sapient
            .create_signed_json_response(200, &payload, &key)
            .unwrap();
        let decoded: Value = sapient
            .decode_signed_json_response(&response, &key.public_key())
            .unwrap();
        assert_eq!(decoded, payload);
    }
}

#[test]
fn test_body_is_not_hidden() {
    let sapient = common::setup_engine();
    let key = SigningSecretKey::generate();
    let request = sapient
        .create_signed_json_request("POST", "/", &serde_json::json!({"test": "abcdefg"}), &key)
        .unwrap();
    assert_eq!(&request.body()[..], br#"{"test":"abcdefg"}"#);
}

#[test]
fn test_single_byte_flips_rejected() {
    let sapient = common::setup_engine();
    let key = SigningSecretKey::generate();
    let response = sapient
        .create_signed_response(200, "the quick brown fox", &key)
        .unwrap();
    let body = response.body();

    for flipped in common::single_byte_flips(&body) {
        let tampered = response.clone().with_body(flipped);
        assert!(matches!(
            sapient.verify_signed_response(tampered, &key.public_key()),
            Err(SapientError::InvalidMessage(_))
        ));
    }
}

#[test]
fn test_unsigned_is_header_missing() {
    let sapient = common::setup_engine();
    let key = SigningSecretKey::generate();

    let request = MemoryRequest::new("POST", "/", "hello world");
    let err = sapient
        .verify_signed_request(request, &key.public_key())
        .unwrap_err();
    assert!(matches!(err, SapientError::HeaderMissing(_)));
    assert!(!matches!(err, SapientError::InvalidMessage(_)));

    let response = MemoryResponse::new(200, "hello world");
    assert!(matches!(
        sapient.decode_signed_response(&response, &key.public_key()),
        Err(SapientError::HeaderMissing(HEADER_SIGNATURE_NAME))
    ));
}

#[test]
fn test_only_first_header_value_counts() {
    let sapient = common::setup_engine();
    let key = SigningSecretKey::generate();
    let signed = sapient
        .create_signed_response(200, "body", &key)
        .unwrap();
    let good = signed.header(HEADER_SIGNATURE_NAME).unwrap().to_vec();

    let mut response = MemoryResponse::new(200, "body");
    response.append_header(HEADER_SIGNATURE_NAME, b"AAAA");
    response.append_header(HEADER_SIGNATURE_NAME, &good);
    assert!(matches!(
        sapient.verify_signed_response(response, &key.public_key()),
        Err(SapientError::InvalidMessage(_))
    ));
}

#[test]
fn test_verify_is_idempotent() {
    let sapient = common::setup_engine();
    let key = SigningSecretKey::generate();
    let request = sapient
        .create_signed_request("GET", "/items?page=2", "", &key)
        .unwrap();

    let request = sapient
        .verify_signed_request(request, &key.public_key())
        .unwrap();
    let request = sapient
        .verify_signed_request(request, &key.public_key())
        .unwrap();
    assert_eq!(request.uri(), "/items?page=2");
}
