// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! keep_codec - Envelope codec
//!
//! Salts, nonces and ciphertexts are stored as standard padded base64
//! (RFC 4648 §4). This crate is the only place that touches the alphabet.
//!
//! ```
//! let nonce = [0u8; 12];
//! let text = keep_codec::encode(&nonce);
//! let back: [u8; 12] = keep_codec::decode_array(&text).unwrap();
//!
//! assert_eq!(back, nonce);
//! ```
//!
//! [`base64_bytes`] and [`base64_array`] plug the same encoding into
//! `#[serde(with = "...")]` fields.

#![warn(missing_docs)]

#[cfg(test)]
mod tests;

mod error;
mod serde_helpers;

pub use error::CodecError;
pub use serde_helpers::{base64_array, base64_bytes};

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

/// Encodes `bytes` as standard padded base64.
pub fn encode(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// Decodes standard padded base64.
///
/// # Errors
///
/// [`CodecError::InvalidEncoding`] on characters outside the alphabet, bad
/// padding or a truncated final quantum.
pub fn decode(text: &str) -> Result<Vec<u8>, CodecError> {
    STANDARD
        .decode(text)
        .map_err(|_| CodecError::InvalidEncoding)
}

/// Decodes standard padded base64 into exactly `N` bytes.
///
/// # Errors
///
/// - [`CodecError::InvalidEncoding`] as for [`decode`].
/// - [`CodecError::LengthMismatch`] if the decoded length is not `N`.
pub fn decode_array<const N: usize>(text: &str) -> Result<[u8; N], CodecError> {
    let bytes = decode(text)?;

    <[u8; N]>::try_from(bytes.as_slice()).map_err(|_| CodecError::LengthMismatch {
        expected: N,
        actual: bytes.len(),
    })
}
