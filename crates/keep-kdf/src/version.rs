// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use crate::error::DerivationError;

/// Argon2id cost parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KdfParams {
    /// Memory cost in KiB.
    pub memory_kib: u32,
    /// Number of passes.
    pub iterations: u32,
    /// Degree of parallelism.
    pub parallelism: u32,
}

impl KdfParams {
    /// 64 MiB, 3 passes, 1 lane.
    pub const V1: Self = Self {
        memory_kib: 64 * 1024,
        iterations: 3,
        parallelism: 1,
    };

    /// Minimum cost accepted by Argon2. Test builds only.
    #[cfg(any(test, feature = "test-utils"))]
    pub const TESTING: Self = Self {
        memory_kib: 8,
        iterations: 1,
        parallelism: 1,
    };
}

/// Persisted identifier of a [`KdfParams`] profile.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KdfVersion {
    /// Argon2id, [`KdfParams::V1`].
    #[default]
    V1,
    /// Argon2id at minimum cost. Never available in production builds.
    #[cfg(any(test, feature = "test-utils"))]
    Testing,
}

impl KdfVersion {
    /// Version used for new vaults.
    pub const CURRENT: Self = Self::V1;

    /// Parses a persisted version number.
    ///
    /// # Errors
    ///
    /// [`DerivationError::UnsupportedVersion`] for unknown numbers.
    pub fn from_u32(value: u32) -> Result<Self, DerivationError> {
        match value {
            1 => Ok(Self::V1),
            #[cfg(any(test, feature = "test-utils"))]
            0 => Ok(Self::Testing),
            other => Err(DerivationError::UnsupportedVersion(other)),
        }
    }

    /// Version number as persisted in the envelope.
    pub fn as_u32(self) -> u32 {
        match self {
            Self::V1 => 1,
            #[cfg(any(test, feature = "test-utils"))]
            Self::Testing => 0,
        }
    }

    /// Cost parameters of this version.
    pub fn params(self) -> KdfParams {
        match self {
            Self::V1 => KdfParams::V1,
            #[cfg(any(test, feature = "test-utils"))]
            Self::Testing => KdfParams::TESTING,
        }
    }
}
