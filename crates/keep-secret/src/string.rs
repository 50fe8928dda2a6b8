// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use core::fmt;
use core::mem;

use subtle::ConstantTimeEq;
use zeroize::Zeroize;

/// UTF-8 secret that wipes its buffer on drop.
///
/// Growing a `String` past its capacity leaves the old allocation behind
/// unwiped. Build secrets with [`with_capacity`](SecretString::with_capacity)
/// sized up front, or hand over an existing `String` with
/// [`from_mut`](SecretString::from_mut), which moves the heap buffer without
/// copying it.
///
/// `Clone` is implemented because decrypted records are handed to the
/// presentation layer as snapshots. Every clone wipes itself on drop.
#[derive(Clone, Default)]
pub struct SecretString {
    inner: String,
}

impl SecretString {
    /// Creates an empty secret with room for `capacity` bytes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            inner: String::with_capacity(capacity),
        }
    }

    /// Takes ownership of `source`'s buffer, leaving `source` empty.
    ///
    /// # Example
    ///
    /// ```rust
    /// use keep_secret::SecretString;
    ///
    /// let mut typed = String::from("CorrectHorseBattery9");
    /// let password = SecretString::from_mut(&mut typed);
    ///
    /// assert!(typed.is_empty());
    /// assert_eq!(password.expose(), "CorrectHorseBattery9");
    /// ```
    pub fn from_mut(source: &mut String) -> Self {
        Self {
            inner: mem::take(source),
        }
    }

    /// Read-only access to the secret text.
    pub fn expose(&self) -> &str {
        &self.inner
    }

    /// Raw UTF-8 bytes, e.g. as KDF input.
    pub fn as_bytes(&self) -> &[u8] {
        self.inner.as_bytes()
    }

    /// Appends a character.
    ///
    /// Does not reallocate as long as the capacity reserved up front suffices.
    pub fn push(&mut self, c: char) {
        self.inner.push(c);
    }

    /// Length in bytes.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Returns `true` if the secret holds no text.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Number of Unicode scalar values.
    pub fn char_count(&self) -> usize {
        self.inner.chars().count()
    }
}

impl From<&str> for SecretString {
    /// Copies `value`. The caller's copy is not wiped.
    fn from(value: &str) -> Self {
        let mut secret = Self::with_capacity(value.len());
        secret.inner.push_str(value);
        secret
    }
}

impl Zeroize for SecretString {
    fn zeroize(&mut self) {
        self.inner.zeroize();
    }
}

impl Drop for SecretString {
    fn drop(&mut self) {
        self.inner.zeroize();
    }
}

impl PartialEq for SecretString {
    fn eq(&self, other: &Self) -> bool {
        self.inner.as_bytes().ct_eq(other.inner.as_bytes()).into()
    }
}

impl Eq for SecretString {}

impl fmt::Debug for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[REDACTED SecretString]")
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for SecretString {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.inner)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for SecretString {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let mut value = String::deserialize(deserializer)?;
        Ok(Self::from_mut(&mut value))
    }
}
