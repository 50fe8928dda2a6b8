// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! keep_kdf - Master password stretching
//!
//! Two stages, both deterministic:
//!
//! 1. [`derive_key_material`]: Argon2id over (password, salt) with the fixed
//!    parameters of a [`KdfVersion`].
//! 2. [`derive_wrapping_key`]: HKDF-SHA256 over the key material, salted with
//!    the vault salt, producing the key that wraps the vault key.
//!
//! Parameters are never tuned in place. A new cost profile is a new
//! [`KdfVersion`] and the version is persisted next to the salt.

#![warn(missing_docs)]

#[cfg(test)]
mod tests;

mod error;
mod version;

pub use error::DerivationError;
pub use version::{KdfParams, KdfVersion};

use argon2::{Algorithm, Argon2, Block, Params, Version};
use hkdf::Hkdf;
use keep_secret::SecretBytes;
use sha2::Sha256;
use zeroize::Zeroizing;

/// Salt length in bytes.
pub const SALT_LEN: usize = 32;

/// Length of derived key material and of the wrapping key.
pub const KEY_LEN: usize = 32;

/// HKDF info label for the vault-key wrapping key.
pub const WRAP_INFO: &[u8] = b"keep.vault.wrap.v1";

/// Stretches `password` with Argon2id under `version`'s parameters.
///
/// # Errors
///
/// - [`DerivationError::EmptyPassword`] if `password` is empty.
/// - [`DerivationError::Primitive`] if Argon2 rejects its parameters or inputs.
pub fn derive_key_material(
    password: &[u8],
    salt: &[u8; SALT_LEN],
    version: KdfVersion,
) -> Result<SecretBytes<KEY_LEN>, DerivationError> {
    if password.is_empty() {
        return Err(DerivationError::EmptyPassword);
    }

    let params = version.params();
    let argon2_params = Params::new(
        params.memory_kib,
        params.iterations,
        params.parallelism,
        Some(KEY_LEN),
    )
    .map_err(|e| DerivationError::Primitive(e.to_string()))?;

    let mut blocks = argon2_memory(&argon2_params);
    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, argon2_params);

    let mut material = SecretBytes::<KEY_LEN>::zeroed();
    argon2
        .hash_password_into_with_memory(password, salt, material.expose_mut(), &mut blocks[..])
        .map_err(|e| DerivationError::Primitive(e.to_string()))?;

    Ok(material)
}

/// Argon2 working memory, wiped on drop.
pub(crate) fn argon2_memory(params: &Params) -> Zeroizing<Vec<Block>> {
    Zeroizing::new(vec![Block::default(); params.block_count()])
}

/// Expands key material into the vault-key wrapping key.
///
/// `HKDF-SHA256(ikm = material, salt = salt, info = WRAP_INFO)`.
pub fn derive_wrapping_key(
    material: &SecretBytes<KEY_LEN>,
    salt: &[u8; SALT_LEN],
) -> Result<SecretBytes<KEY_LEN>, DerivationError> {
    let hkdf = Hkdf::<Sha256>::new(Some(salt), material.expose());

    let mut key = SecretBytes::<KEY_LEN>::zeroed();
    hkdf.expand(WRAP_INFO, key.expose_mut())
        .map_err(|e| DerivationError::Primitive(e.to_string()))?;

    Ok(key)
}

/// Runs both stages: password to wrapping key.
///
/// The intermediate key material is zeroized before returning.
///
/// ```
/// use keep_kdf::{KdfVersion, SALT_LEN, wrapping_key};
///
/// let salt = [7u8; SALT_LEN];
/// let a = wrapping_key(b"CorrectHorseBattery9", &salt, KdfVersion::V1).expect("Failed to derive(a)");
/// let b = wrapping_key(b"CorrectHorseBattery9", &salt, KdfVersion::V1).expect("Failed to derive(b)");
///
/// assert_eq!(a, b);
/// ```
pub fn wrapping_key(
    password: &[u8],
    salt: &[u8; SALT_LEN],
    version: KdfVersion,
) -> Result<SecretBytes<KEY_LEN>, DerivationError> {
    let material = derive_key_material(password, salt, version)?;
    derive_wrapping_key(&material, salt)
}
