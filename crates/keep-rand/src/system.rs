// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use crate::error::EntropyError;
use crate::traits::EntropySource;

/// The operating system CSPRNG, reached through `getrandom`.
///
/// Stateless. Every call asks the kernel for fresh bytes, so there is no
/// userspace pool to reseed or wipe.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemEntropySource;

impl EntropySource for SystemEntropySource {
    fn fill_bytes(&self, dest: &mut [u8]) -> Result<(), EntropyError> {
        fill_from(getrandom::fill, dest)
    }
}

/// Fills `dest` through `source`. Any OS failure becomes
/// [`EntropyError::EntropyNotAvailable`].
pub(crate) fn fill_from<F>(source: F, dest: &mut [u8]) -> Result<(), EntropyError>
where
    F: FnOnce(&mut [u8]) -> Result<(), getrandom::Error>,
{
    let len = dest.len();

    source(dest).map_err(|e| {
        tracing::warn!(error = %e, len, "OS entropy request failed");
        EntropyError::EntropyNotAvailable
    })
}
