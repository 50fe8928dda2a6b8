// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use keep_kdf::{DerivationError, KEY_LEN, KdfVersion, SALT_LEN};
use keep_rand::EntropyError;
use keep_secret::SecretBytes;
use zeroize::Zeroizing;

use crate::error::{DecryptionError, EncryptionError};
use crate::{KEY_SIZE, NONCE_SIZE};

/// Cryptographic primitives used by the vault.
pub trait CryptoProvider: Send + Sync {
    /// Fills `dest` from a CSPRNG.
    fn random_bytes(&self, dest: &mut [u8]) -> Result<(), EntropyError>;

    /// Encrypts `plaintext`, returning ciphertext with the tag appended.
    fn aead_encrypt(
        &self,
        key: &[u8; KEY_SIZE],
        nonce: &[u8; NONCE_SIZE],
        aad: &[u8],
        plaintext: &[u8],
    ) -> Result<Vec<u8>, EncryptionError>;

    /// Verifies and decrypts `ciphertext` (tag appended).
    fn aead_decrypt(
        &self,
        key: &[u8; KEY_SIZE],
        nonce: &[u8; NONCE_SIZE],
        aad: &[u8],
        ciphertext: &[u8],
    ) -> Result<Zeroizing<Vec<u8>>, DecryptionError>;

    /// Derives the vault-key wrapping key from a master password.
    fn kdf_derive(
        &self,
        password: &[u8],
        salt: &[u8; SALT_LEN],
        version: KdfVersion,
    ) -> Result<SecretBytes<KEY_LEN>, DerivationError>;
}
