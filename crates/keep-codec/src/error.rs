// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use thiserror::Error;

/// Errors returned by the envelope codec.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CodecError {
    /// Input is not valid standard padded base64.
    #[error("invalid base64 encoding")]
    InvalidEncoding,

    /// Input decoded to the wrong number of bytes.
    #[error("decoded length mismatch: expected {expected} bytes, got {actual}")]
    LengthMismatch {
        /// Required length.
        expected: usize,
        /// Decoded length.
        actual: usize,
    },
}
