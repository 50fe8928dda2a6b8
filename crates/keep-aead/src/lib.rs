// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! # keep-aead
//!
//! Authenticated record cipher for the keep vault.
//!
//! ChaCha20-Poly1305 with a 256-bit key, a 96-bit nonce drawn from the OS
//! CSPRNG on every call and a 128-bit tag appended to the ciphertext.
//! Associated data binds each ciphertext to its purpose (a record id, or the
//! key-wrapping label) so ciphertexts cannot be swapped between slots.
//!
//! ## Capability interface
//!
//! All primitives are reached through [`CryptoProvider`]. [`SystemCrypto`]
//! is the production implementation; tests inject
//! `test_utils::CryptoMock` (behind the `test-utils` feature).
//!
//! ## Example
//!
//! ```rust
//! use keep_aead::{KEY_SIZE, SystemCrypto, decrypt, encrypt};
//! use keep_secret::SecretBytes;
//!
//! let crypto = SystemCrypto::new();
//! let key = SecretBytes::<KEY_SIZE>::try_from_slice(&[9u8; KEY_SIZE]).expect("Failed to build key");
//!
//! let sealed = encrypt(&crypto, &key, b"record:1", b"hunter2").expect("Failed to encrypt(..)");
//! let plaintext = decrypt(&crypto, &key, b"record:1", &sealed.ciphertext, &sealed.nonce)
//!     .expect("Failed to decrypt(..)");
//!
//! assert_eq!(plaintext.as_slice(), b"hunter2");
//! ```

#![warn(missing_docs)]

#[cfg(test)]
mod tests;

mod cipher;
mod error;
mod provider;
mod support;
mod system;

pub use cipher::{Sealed, decrypt, encrypt};
pub use error::{DecryptionError, EncryptionError};
pub use provider::CryptoProvider;
pub use system::SystemCrypto;

#[cfg(any(test, feature = "test-utils"))]
pub use support::test_utils;

/// Key size in bytes.
pub const KEY_SIZE: usize = 32;

/// Nonce size in bytes.
pub const NONCE_SIZE: usize = 12;

/// Authentication tag size in bytes.
pub const TAG_SIZE: usize = 16;
