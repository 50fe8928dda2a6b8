// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Record encryption: plaintext record to JSON to ChaCha20-Poly1305 and back.

use std::io;

use keep_aead::{CryptoProvider, DecryptionError};
use zeroize::Zeroizing;

use crate::consts::record_aad;
use crate::error::SessionError;
use crate::models::{EncryptedRecord, PlaintextRecord, VaultKey};

/// Why a stored record could not be opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum OpenFailure {
    Decryption(DecryptionError),
    Malformed,
    IdMismatch,
}

/// Counts bytes without storing them.
#[derive(Default)]
struct BytesRequired(usize);

impl io::Write for BytesRequired {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0 += buf.len();
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Serializes `record` into a buffer allocated once at its exact size.
///
/// The buffer never reallocates, so the only plaintext copy is the one
/// wiped on drop.
fn encode(record: &PlaintextRecord) -> Result<Zeroizing<Vec<u8>>, SessionError> {
    let mut counter = BytesRequired::default();
    serde_json::to_writer(&mut counter, record).map_err(|_| SessionError::Serialization)?;

    let mut buf = Zeroizing::new(Vec::with_capacity(counter.0));
    serde_json::to_writer(&mut *buf, record).map_err(|_| SessionError::Serialization)?;

    debug_assert_eq!(buf.len(), counter.0);

    Ok(buf)
}

/// Encrypts `record` under `key` with a fresh nonce.
pub(crate) fn seal<C>(
    crypto: &C,
    key: &VaultKey,
    record: &PlaintextRecord,
) -> Result<EncryptedRecord, SessionError>
where
    C: CryptoProvider + ?Sized,
{
    let plaintext = encode(record)?;
    let sealed = keep_aead::encrypt(crypto, key, &record_aad(&record.id), &plaintext)?;

    Ok(EncryptedRecord {
        id: record.id,
        ciphertext: sealed.ciphertext,
        nonce: sealed.nonce.to_vec(),
        created_at: record.created_at,
        updated_at: record.updated_at,
    })
}

/// Decrypts and parses a stored record.
///
/// Failures carry no detail beyond their kind. Parse errors are discarded
/// since they may quote decrypted content.
pub(crate) fn open<C>(
    crypto: &C,
    key: &VaultKey,
    encrypted: &EncryptedRecord,
) -> Result<PlaintextRecord, OpenFailure>
where
    C: CryptoProvider + ?Sized,
{
    let plaintext = keep_aead::decrypt(
        crypto,
        key,
        &record_aad(&encrypted.id),
        &encrypted.ciphertext,
        &encrypted.nonce,
    )
    .map_err(OpenFailure::Decryption)?;

    let record: PlaintextRecord =
        serde_json::from_slice(&plaintext).map_err(|_| OpenFailure::Malformed)?;

    if record.id != encrypted.id {
        return Err(OpenFailure::IdMismatch);
    }

    Ok(record)
}
