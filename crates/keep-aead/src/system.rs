// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use chacha20poly1305::aead::{Aead, KeyInit, Payload};
use chacha20poly1305::{ChaCha20Poly1305, Key, Nonce};
use keep_kdf::{DerivationError, KEY_LEN, KdfVersion, SALT_LEN};
use keep_rand::{EntropyError, EntropySource, SystemEntropySource};
use keep_secret::SecretBytes;
use zeroize::Zeroizing;

use crate::error::{DecryptionError, EncryptionError};
use crate::provider::CryptoProvider;
use crate::{KEY_SIZE, NONCE_SIZE};

/// Production [`CryptoProvider`]: getrandom, chacha20poly1305 and argon2.
#[derive(Debug)]
pub struct SystemCrypto<E: EntropySource = SystemEntropySource> {
    entropy: E,
}

impl SystemCrypto {
    /// Creates a provider over the OS CSPRNG.
    pub fn new() -> Self {
        Self {
            entropy: SystemEntropySource,
        }
    }
}

impl Default for SystemCrypto {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: EntropySource> SystemCrypto<E> {
    /// Creates a provider drawing randomness from `entropy`.
    pub fn with_entropy(entropy: E) -> Self {
        Self { entropy }
    }
}

impl<E: EntropySource> CryptoProvider for SystemCrypto<E> {
    fn random_bytes(&self, dest: &mut [u8]) -> Result<(), EntropyError> {
        self.entropy.fill_bytes(dest)
    }

    fn aead_encrypt(
        &self,
        key: &[u8; KEY_SIZE],
        nonce: &[u8; NONCE_SIZE],
        aad: &[u8],
        plaintext: &[u8],
    ) -> Result<Vec<u8>, EncryptionError> {
        let cipher = ChaCha20Poly1305::new(Key::from_slice(key));

        cipher
            .encrypt(Nonce::from_slice(nonce), Payload { msg: plaintext, aad })
            .map_err(|_| EncryptionError::Primitive)
    }

    fn aead_decrypt(
        &self,
        key: &[u8; KEY_SIZE],
        nonce: &[u8; NONCE_SIZE],
        aad: &[u8],
        ciphertext: &[u8],
    ) -> Result<Zeroizing<Vec<u8>>, DecryptionError> {
        let cipher = ChaCha20Poly1305::new(Key::from_slice(key));

        cipher
            .decrypt(Nonce::from_slice(nonce), Payload { msg: ciphertext, aad })
            .map(Zeroizing::new)
            .map_err(|_| DecryptionError::AuthenticationFailed)
    }

    fn kdf_derive(
        &self,
        password: &[u8],
        salt: &[u8; SALT_LEN],
        version: KdfVersion,
    ) -> Result<SecretBytes<KEY_LEN>, DerivationError> {
        keep_kdf::wrapping_key(password, salt, version)
    }
}
