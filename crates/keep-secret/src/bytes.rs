// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use core::fmt;

use subtle::{Choice, ConstantTimeEq};
use zeroize::Zeroize;

/// Fixed-size secret living in its own heap allocation.
///
/// # Design
///
/// - The bytes are boxed once and never move afterwards, so there is exactly
///   one copy to wipe.
/// - The allocation is `mlock`ed on a best-effort basis (see
///   [`is_memory_locked`](SecretBytes::is_memory_locked)).
/// - Constructors take `&mut` sources and zeroize them.
/// - No `Clone`, no `Copy`, redacted `Debug`, constant-time `PartialEq`.
///
/// # Example
///
/// ```rust
/// use keep_secret::SecretBytes;
///
/// let mut raw = [7u8; 32];
/// let key = SecretBytes::from_mut(&mut raw);
///
/// // raw is guaranteed to be zeroized
/// assert!(raw.iter().all(|b| *b == 0));
/// assert_eq!(key.expose()[0], 7);
/// ```
pub struct SecretBytes<const N: usize> {
    inner: Box<[u8; N]>,
    locked: bool,
}

impl<const N: usize> SecretBytes<N> {
    /// Allocates an all-zero secret, ready to be filled in place via
    /// [`expose_mut`](SecretBytes::expose_mut).
    pub fn zeroed() -> Self {
        let inner = Box::new([0u8; N]);
        let locked = keep_guard::lock_memory(inner.as_slice());

        Self { inner, locked }
    }

    /// Moves `source` into a new secret, zeroizing `source`.
    pub fn from_mut(source: &mut [u8; N]) -> Self {
        let mut secret = Self::zeroed();
        secret.inner.copy_from_slice(source);
        source.zeroize();

        secret
    }

    /// Copies `source` into a new secret if its length is exactly `N`.
    ///
    /// The caller stays responsible for wiping `source`.
    pub fn try_from_slice(source: &[u8]) -> Option<Self> {
        if source.len() != N {
            return None;
        }

        let mut secret = Self::zeroed();
        secret.inner.copy_from_slice(source);

        Some(secret)
    }

    /// Read-only access to the raw bytes.
    pub fn expose(&self) -> &[u8; N] {
        &self.inner
    }

    /// Mutable access to the raw bytes, for filling in place.
    pub fn expose_mut(&mut self) -> &mut [u8; N] {
        &mut self.inner
    }

    /// Returns `true` if every byte is zero.
    pub fn is_zeroized(&self) -> bool {
        self.inner.iter().all(|b| *b == 0)
    }

    /// Whether the backing pages are currently `mlock`ed.
    pub fn is_memory_locked(&self) -> bool {
        self.locked && keep_guard::is_memory_locked(self.inner.as_slice())
    }
}

impl<const N: usize> Zeroize for SecretBytes<N> {
    fn zeroize(&mut self) {
        self.inner.zeroize();
    }
}

impl<const N: usize> Drop for SecretBytes<N> {
    fn drop(&mut self) {
        self.inner.zeroize();

        if self.locked {
            keep_guard::unlock_memory(self.inner.as_slice());
        }
    }
}

impl<const N: usize> ConstantTimeEq for SecretBytes<N> {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.inner.as_slice().ct_eq(other.inner.as_slice())
    }
}

impl<const N: usize> PartialEq for SecretBytes<N> {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl<const N: usize> Eq for SecretBytes<N> {}

impl<const N: usize> fmt::Debug for SecretBytes<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[REDACTED SecretBytes<{}>]", N)
    }
}
