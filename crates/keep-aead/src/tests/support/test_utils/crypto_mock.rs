// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Tests for CryptoMock.

use keep_kdf::{DerivationError, KdfVersion, SALT_LEN};
use keep_rand::EntropyError;

use crate::support::test_utils::{CryptoMock, CryptoMockBehaviour};
use crate::{CryptoProvider, DecryptionError, EncryptionError, KEY_SIZE, NONCE_SIZE};

const KEY: [u8; KEY_SIZE] = [0u8; KEY_SIZE];
const NONCE: [u8; NONCE_SIZE] = [0u8; NONCE_SIZE];

// =============================================================================
// random_bytes()
// =============================================================================

#[test]
fn test_random_fails_at_index() {
    let mock = CryptoMock::new(CryptoMockBehaviour::FailRandomAt(1));
    let mut buf = [0u8; 8];

    assert!(mock.random_bytes(&mut buf).is_ok());
    assert_eq!(
        mock.random_bytes(&mut buf),
        Err(EntropyError::EntropyNotAvailable)
    );
    assert!(mock.random_bytes(&mut buf).is_ok());
    assert_eq!(mock.random_count(), 3);
}

// =============================================================================
// aead_encrypt()
// =============================================================================

#[test]
fn test_encrypt_fails_at_index() {
    let mock = CryptoMock::new(CryptoMockBehaviour::FailEncryptAt(2));

    assert!(mock.aead_encrypt(&KEY, &NONCE, &[], b"data").is_ok());
    assert!(mock.aead_encrypt(&KEY, &NONCE, &[], b"data").is_ok());
    assert_eq!(
        mock.aead_encrypt(&KEY, &NONCE, &[], b"data"),
        Err(EncryptionError::Primitive)
    );
    assert!(mock.aead_encrypt(&KEY, &NONCE, &[], b"data").is_ok());
}

// =============================================================================
// aead_decrypt()
// =============================================================================

#[test]
fn test_decrypt_fails_at_index() {
    let mock = CryptoMock::new(CryptoMockBehaviour::FailDecryptAt(1));
    let ciphertext = mock
        .aead_encrypt(&KEY, &NONCE, &[], b"data")
        .expect("Failed to aead_encrypt(..)");

    // Call 0
    assert!(mock.aead_decrypt(&KEY, &NONCE, &[], &ciphertext).is_ok());

    // Call 1
    assert_eq!(
        mock.aead_decrypt(&KEY, &NONCE, &[], &ciphertext).map(|_| ()),
        Err(DecryptionError::AuthenticationFailed)
    );

    // Call 2
    assert!(mock.aead_decrypt(&KEY, &NONCE, &[], &ciphertext).is_ok());
}

// =============================================================================
// kdf_derive()
// =============================================================================

#[test]
fn test_derive_fails_at_index() {
    let mock = CryptoMock::new(CryptoMockBehaviour::FailDeriveAt(0));
    let salt = [0u8; SALT_LEN];

    let result = mock.kdf_derive(b"pw", &salt, KdfVersion::Testing);
    assert!(matches!(result, Err(DerivationError::Primitive(_))));

    assert!(mock.kdf_derive(b"pw", &salt, KdfVersion::Testing).is_ok());
    assert_eq!(mock.derive_count(), 2);
}

// =============================================================================
// change_behaviour()
// =============================================================================

#[test]
fn test_change_behaviour_resets_counters() {
    let mock = CryptoMock::default();

    assert!(mock.aead_encrypt(&KEY, &NONCE, &[], b"data").is_ok());
    assert_eq!(mock.encrypt_count(), 1);

    mock.change_behaviour(CryptoMockBehaviour::FailEncryptAt(0));
    assert_eq!(mock.encrypt_count(), 0);
    assert!(mock.aead_encrypt(&KEY, &NONCE, &[], b"data").is_err());

    mock.change_behaviour(CryptoMockBehaviour::None);
    assert!(mock.aead_encrypt(&KEY, &NONCE, &[], b"data").is_ok());
}
