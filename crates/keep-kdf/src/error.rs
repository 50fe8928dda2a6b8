// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use thiserror::Error;

/// Errors returned by key derivation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DerivationError {
    /// The master password is empty.
    #[error("master password must not be empty")]
    EmptyPassword,

    /// The persisted KDF version is not known to this build.
    #[error("unsupported KDF version {0}")]
    UnsupportedVersion(u32),

    /// The underlying primitive rejected its inputs.
    #[error("key derivation failed: {0}")]
    Primitive(String),
}
