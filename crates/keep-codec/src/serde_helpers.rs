// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! `#[serde(with = "...")]` adapters.

/// `Vec<u8>` as a base64 string.
///
/// ```
/// #[derive(serde::Serialize, serde::Deserialize)]
/// struct Blob {
///     #[serde(with = "keep_codec::base64_bytes")]
///     ciphertext: Vec<u8>,
/// }
/// ```
pub mod base64_bytes {
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    /// Serializes bytes as base64.
    pub fn serialize<S>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&crate::encode(bytes))
    }

    /// Deserializes bytes from base64.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<u8>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        crate::decode(&text).map_err(D::Error::custom)
    }
}

/// `[u8; N]` as a base64 string of exactly `N` decoded bytes.
pub mod base64_array {
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    /// Serializes a fixed-size array as base64.
    pub fn serialize<S, const N: usize>(bytes: &[u8; N], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&crate::encode(bytes))
    }

    /// Deserializes a fixed-size array from base64, rejecting wrong lengths.
    pub fn deserialize<'de, D, const N: usize>(deserializer: D) -> Result<[u8; N], D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        crate::decode_array::<N>(&text).map_err(D::Error::custom)
    }
}
