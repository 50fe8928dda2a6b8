// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use thiserror::Error;

/// Errors that can occur when generating random data.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum EntropyError {
    /// The OS entropy source failed or is missing.
    #[error("entropy source unavailable")]
    EntropyNotAvailable,
}

/// Errors returned by [`PasswordGenerator`](crate::PasswordGenerator).
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum GeneratorError {
    /// A zero-length password was requested.
    #[error("password length must be at least 1")]
    ZeroLength,

    /// The entropy source failed.
    #[error(transparent)]
    Entropy(#[from] EntropyError),
}
