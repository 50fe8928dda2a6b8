// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use std::sync::atomic::{AtomicUsize, Ordering};

use keep_kdf::{DerivationError, KEY_LEN, KdfVersion, SALT_LEN};
use keep_rand::EntropyError;
use keep_secret::SecretBytes;
use parking_lot::Mutex;
use zeroize::Zeroizing;

use crate::error::{DecryptionError, EncryptionError};
use crate::provider::CryptoProvider;
use crate::system::SystemCrypto;
use crate::{KEY_SIZE, NONCE_SIZE};

/// Configurable behavior for [`CryptoMock`].
///
/// Indices are 0-based per operation: `FailEncryptAt(0)` fails the first
/// encryption.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CryptoMockBehaviour {
    /// Normal operation (delegates to [`SystemCrypto`]).
    None,
    /// Fail the Nth `aead_encrypt` call.
    FailEncryptAt(usize),
    /// Fail the Nth `aead_decrypt` call with `AuthenticationFailed`.
    FailDecryptAt(usize),
    /// Fail the Nth `random_bytes` call.
    FailRandomAt(usize),
    /// Fail the Nth `kdf_derive` call.
    FailDeriveAt(usize),
}

/// Mock crypto provider for testing.
///
/// Wraps [`SystemCrypto`] and counts calls per operation. The behaviour can
/// be changed through a shared reference, so a mock owned by a session can
/// still be reconfigured mid-test.
pub struct CryptoMock {
    inner: SystemCrypto,
    behaviour: Mutex<CryptoMockBehaviour>,
    random_count: AtomicUsize,
    encrypt_count: AtomicUsize,
    decrypt_count: AtomicUsize,
    derive_count: AtomicUsize,
}

impl CryptoMock {
    /// Creates a new mock with the specified behavior.
    pub fn new(behaviour: CryptoMockBehaviour) -> Self {
        Self {
            inner: SystemCrypto::new(),
            behaviour: Mutex::new(behaviour),
            random_count: AtomicUsize::new(0),
            encrypt_count: AtomicUsize::new(0),
            decrypt_count: AtomicUsize::new(0),
            derive_count: AtomicUsize::new(0),
        }
    }

    /// Changes the behavior and resets all counters.
    pub fn change_behaviour(&self, behaviour: CryptoMockBehaviour) {
        *self.behaviour.lock() = behaviour;
        self.reset_counts();
    }

    /// Resets all call counters.
    pub fn reset_counts(&self) {
        self.random_count.store(0, Ordering::SeqCst);
        self.encrypt_count.store(0, Ordering::SeqCst);
        self.decrypt_count.store(0, Ordering::SeqCst);
        self.derive_count.store(0, Ordering::SeqCst);
    }

    /// Number of `random_bytes` calls.
    pub fn random_count(&self) -> usize {
        self.random_count.load(Ordering::SeqCst)
    }

    /// Number of `aead_encrypt` calls.
    pub fn encrypt_count(&self) -> usize {
        self.encrypt_count.load(Ordering::SeqCst)
    }

    /// Number of `aead_decrypt` calls.
    pub fn decrypt_count(&self) -> usize {
        self.decrypt_count.load(Ordering::SeqCst)
    }

    /// Number of `kdf_derive` calls.
    pub fn derive_count(&self) -> usize {
        self.derive_count.load(Ordering::SeqCst)
    }

    fn behaviour(&self) -> CryptoMockBehaviour {
        *self.behaviour.lock()
    }
}

impl Default for CryptoMock {
    fn default() -> Self {
        Self::new(CryptoMockBehaviour::None)
    }
}

impl CryptoProvider for CryptoMock {
    fn random_bytes(&self, dest: &mut [u8]) -> Result<(), EntropyError> {
        let current = self.random_count.fetch_add(1, Ordering::SeqCst);

        match self.behaviour() {
            CryptoMockBehaviour::FailRandomAt(n) if n == current => {
                Err(EntropyError::EntropyNotAvailable)
            }
            _ => self.inner.random_bytes(dest),
        }
    }

    fn aead_encrypt(
        &self,
        key: &[u8; KEY_SIZE],
        nonce: &[u8; NONCE_SIZE],
        aad: &[u8],
        plaintext: &[u8],
    ) -> Result<Vec<u8>, EncryptionError> {
        let current = self.encrypt_count.fetch_add(1, Ordering::SeqCst);

        match self.behaviour() {
            CryptoMockBehaviour::FailEncryptAt(n) if n == current => {
                Err(EncryptionError::Primitive)
            }
            _ => self.inner.aead_encrypt(key, nonce, aad, plaintext),
        }
    }

    fn aead_decrypt(
        &self,
        key: &[u8; KEY_SIZE],
        nonce: &[u8; NONCE_SIZE],
        aad: &[u8],
        ciphertext: &[u8],
    ) -> Result<Zeroizing<Vec<u8>>, DecryptionError> {
        let current = self.decrypt_count.fetch_add(1, Ordering::SeqCst);

        match self.behaviour() {
            CryptoMockBehaviour::FailDecryptAt(n) if n == current => {
                Err(DecryptionError::AuthenticationFailed)
            }
            _ => self.inner.aead_decrypt(key, nonce, aad, ciphertext),
        }
    }

    fn kdf_derive(
        &self,
        password: &[u8],
        salt: &[u8; SALT_LEN],
        version: KdfVersion,
    ) -> Result<SecretBytes<KEY_LEN>, DerivationError> {
        let current = self.derive_count.fetch_add(1, Ordering::SeqCst);

        match self.behaviour() {
            CryptoMockBehaviour::FailDeriveAt(n) if n == current => Err(
                DerivationError::Primitive("injected derivation failure".into()),
            ),
            _ => self.inner.kdf_derive(password, salt, version),
        }
    }
}
