// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Owned secret buffers that are overwritten before their memory is released.
//!
//! - [`SecretBytes`]: fixed-size, heap-pinned key material (vault keys, derived
//!   key material, wrapping keys).
//! - [`SecretString`]: variable-length UTF-8 secrets (master passwords,
//!   generated passwords, record passwords).
//!
//! Both types print `[REDACTED ...]` through `Debug` and zeroize on drop.
#![warn(missing_docs)]
#![warn(unsafe_op_in_unsafe_fn)]

#[cfg(test)]
mod tests;

mod bytes;
mod string;

pub use bytes::SecretBytes;
pub use string::SecretString;
