// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use keep_secret::SecretBytes;
use zeroize::Zeroizing;

use crate::error::{DecryptionError, EncryptionError};
use crate::provider::CryptoProvider;
use crate::{KEY_SIZE, NONCE_SIZE, TAG_SIZE};

/// Output of [`encrypt`]: ciphertext with appended tag, and its nonce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sealed {
    /// Ciphertext followed by the 16-byte tag.
    pub ciphertext: Vec<u8>,
    /// Nonce drawn for this call.
    pub nonce: [u8; NONCE_SIZE],
}

/// Encrypts `plaintext` under `key` with a fresh random nonce.
///
/// # Errors
///
/// - [`EncryptionError::Entropy`] if no nonce could be drawn.
/// - [`EncryptionError::Primitive`] if the cipher fails.
pub fn encrypt<C>(
    crypto: &C,
    key: &SecretBytes<KEY_SIZE>,
    aad: &[u8],
    plaintext: &[u8],
) -> Result<Sealed, EncryptionError>
where
    C: CryptoProvider + ?Sized,
{
    let mut nonce = [0u8; NONCE_SIZE];
    crypto.random_bytes(&mut nonce)?;

    let ciphertext = crypto.aead_encrypt(key.expose(), &nonce, aad, plaintext)?;

    Ok(Sealed { ciphertext, nonce })
}

/// Verifies and decrypts a ciphertext produced by [`encrypt`].
///
/// # Errors
///
/// - [`DecryptionError::InvalidNonceSize`] if `nonce` is not 12 bytes.
/// - [`DecryptionError::AuthenticationFailed`] on any tampering, truncation or
///   key, nonce or associated-data mismatch.
pub fn decrypt<C>(
    crypto: &C,
    key: &SecretBytes<KEY_SIZE>,
    aad: &[u8],
    ciphertext: &[u8],
    nonce: &[u8],
) -> Result<Zeroizing<Vec<u8>>, DecryptionError>
where
    C: CryptoProvider + ?Sized,
{
    let nonce: &[u8; NONCE_SIZE] = nonce
        .try_into()
        .map_err(|_| DecryptionError::InvalidNonceSize(nonce.len()))?;

    if ciphertext.len() < TAG_SIZE {
        return Err(DecryptionError::AuthenticationFailed);
    }

    crypto.aead_decrypt(key.expose(), nonce, aad, ciphertext)
}
