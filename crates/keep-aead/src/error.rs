// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use keep_rand::EntropyError;
use thiserror::Error;

/// Errors returned by [`encrypt`](crate::encrypt).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EncryptionError {
    /// No nonce could be drawn.
    #[error(transparent)]
    Entropy(#[from] EntropyError),

    /// The cipher rejected its inputs.
    #[error("encryption failed")]
    Primitive,
}

/// Errors returned by [`decrypt`](crate::decrypt).
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum DecryptionError {
    /// Tag mismatch: tampered or truncated ciphertext, wrong key, nonce or
    /// associated data.
    #[error("AuthenticationFailed")]
    AuthenticationFailed,

    /// The stored nonce does not have the cipher's nonce length.
    #[error("invalid nonce size: {0} bytes")]
    InvalidNonceSize(usize),
}
