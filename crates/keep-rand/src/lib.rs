// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! # keep-rand
//!
//! OS entropy and the vault's secret generator.
//!
//! ## Core Types
//!
//! - [`SystemEntropySource`]: OS-level CSPRNG (via `getrandom`)
//! - [`PasswordGenerator`]: uniform passwords over letters, digits and
//!   optionally symbols
//!
//! ## Example
//!
//! ```rust
//! use keep_rand::{EntropySource, SystemEntropySource, generate_password};
//!
//! let entropy = SystemEntropySource;
//! let mut salt = [0u8; 32];
//! entropy.fill_bytes(&mut salt).expect("Failed to generate entropy");
//!
//! let password = generate_password(20, true).expect("Failed to generate password");
//! assert_eq!(password.len(), 20);
//! ```

#![warn(missing_docs)]

#[cfg(test)]
mod tests;

mod error;
mod password;
mod support;
mod system;
mod traits;

pub use error::{EntropyError, GeneratorError};
pub use password::{ALPHANUMERIC, PasswordGenerator, SYMBOLS, alphabet, generate_password};
pub use system::SystemEntropySource;
pub use traits::EntropySource;

#[cfg(any(test, feature = "test-utils"))]
pub use support::test_utils;
