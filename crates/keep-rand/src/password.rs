// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use keep_secret::SecretString;
use zeroize::Zeroizing;

use crate::error::GeneratorError;
use crate::system::SystemEntropySource;
use crate::traits::EntropySource;

/// Lowercase, uppercase and digits.
pub const ALPHANUMERIC: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Symbols added when `include_symbols` is set.
pub const SYMBOLS: &str = "!@#$%^&*()-_=+[]{};:,.<>?/|~";

const WITH_SYMBOLS: &str = concat!(
    "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789",
    "!@#$%^&*()-_=+[]{};:,.<>?/|~"
);

const POOL_SIZE: usize = 64;

/// The alphabet a password is drawn from.
pub fn alphabet(include_symbols: bool) -> &'static [u8] {
    if include_symbols {
        WITH_SYMBOLS.as_bytes()
    } else {
        ALPHANUMERIC.as_bytes()
    }
}

/// Secure password generator over an [`EntropySource`].
///
/// Each character is drawn independently and uniformly from [`alphabet`].
/// Random bytes at or above the largest multiple of the alphabet size are
/// discarded, so `byte % len` carries no modulo bias.
pub struct PasswordGenerator<E: EntropySource> {
    entropy: E,
}

impl<E: EntropySource> PasswordGenerator<E> {
    /// Creates a generator drawing from `entropy`.
    pub fn new(entropy: E) -> Self {
        Self { entropy }
    }

    /// Generates a password of exactly `length` characters.
    ///
    /// # Errors
    ///
    /// - [`GeneratorError::ZeroLength`] if `length == 0`.
    /// - [`GeneratorError::Entropy`] if the entropy source fails.
    pub fn generate(
        &self,
        length: usize,
        include_symbols: bool,
    ) -> Result<SecretString, GeneratorError> {
        if length == 0 {
            return Err(GeneratorError::ZeroLength);
        }

        let alphabet = alphabet(include_symbols);
        let size = alphabet.len();
        let limit = 256 - (256 % size);

        let mut password = SecretString::with_capacity(length);
        let mut pool = Zeroizing::new([0u8; POOL_SIZE]);
        let mut cursor = POOL_SIZE;

        while password.len() < length {
            if cursor == POOL_SIZE {
                self.entropy.fill_bytes(pool.as_mut())?;
                cursor = 0;
            }

            let byte = usize::from(pool[cursor]);
            cursor += 1;

            if byte < limit {
                password.push(char::from(alphabet[byte % size]));
            }
        }

        Ok(password)
    }
}

impl Default for PasswordGenerator<SystemEntropySource> {
    fn default() -> Self {
        Self::new(SystemEntropySource)
    }
}

/// Generates a password from the OS CSPRNG.
///
/// Shorthand for `PasswordGenerator::default().generate(..)`.
pub fn generate_password(
    length: usize,
    include_symbols: bool,
) -> Result<SecretString, GeneratorError> {
    PasswordGenerator::default().generate(length, include_symbols)
}
