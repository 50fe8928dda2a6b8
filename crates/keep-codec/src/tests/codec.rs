// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use proptest::prelude::*;

use crate::{CodecError, decode, decode_array, encode};

// =============================================================================
// encode() / decode()
// =============================================================================

#[test]
fn test_roundtrip_reference_lengths() {
    for len in [0usize, 1, 32, 10_000] {
        let bytes: Vec<u8> = (0..len).map(|i| (i % 256) as u8).collect();
        let text = encode(&bytes);
        let back = decode(&text).expect("Failed to decode");

        assert_eq!(back, bytes, "length {}", len);
    }
}

#[test]
fn test_roundtrip_every_byte_value() {
    let bytes: Vec<u8> = (0..=255u8).collect();
    let back = decode(&encode(&bytes)).expect("Failed to decode");

    assert_eq!(back, bytes);
}

#[test]
fn test_encode_is_standard_padded() {
    assert_eq!(encode(b""), "");
    assert_eq!(encode(b"f"), "Zg==");
    assert_eq!(encode(b"fo"), "Zm8=");
    assert_eq!(encode(b"foo"), "Zm9v");
    assert_eq!(encode(&[0xFB, 0xFF]), "+/8=");
}

#[test]
fn test_decode_rejects_invalid_alphabet() {
    assert_eq!(decode("Zm9v!"), Err(CodecError::InvalidEncoding));
    // URL-safe alphabet is not accepted.
    assert_eq!(decode("-_8="), Err(CodecError::InvalidEncoding));
}

#[test]
fn test_decode_rejects_missing_padding() {
    assert_eq!(decode("Zg"), Err(CodecError::InvalidEncoding));
}

proptest! {
    #[test]
    fn prop_roundtrip(bytes in proptest::collection::vec(any::<u8>(), 0..512)) {
        let back = decode(&encode(&bytes)).expect("Failed to decode");
        prop_assert_eq!(back, bytes);
    }
}

// =============================================================================
// decode_array()
// =============================================================================

#[test]
fn test_decode_array_exact_length() {
    let salt = [0x5Au8; 32];
    let back: [u8; 32] = decode_array(&encode(&salt)).expect("Failed to decode salt");

    assert_eq!(back, salt);
}

#[test]
fn test_decode_array_rejects_wrong_length() {
    let nonce = [1u8; 11];
    let result = decode_array::<12>(&encode(&nonce));

    assert_eq!(
        result,
        Err(CodecError::LengthMismatch {
            expected: 12,
            actual: 11
        })
    );
}

#[test]
fn test_decode_array_propagates_invalid_encoding() {
    assert_eq!(decode_array::<12>("***"), Err(CodecError::InvalidEncoding));
}
