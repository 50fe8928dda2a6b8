// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Persistence contract and reference backends.

mod json_file;
mod memory;

pub use json_file::JsonFileStorage;
#[cfg(test)]
pub(crate) use json_file::replace_file;
pub use memory::{MemoryStorage, StorageBehaviour};

use std::sync::Arc;

use uuid::Uuid;

use crate::error::StorageError;
use crate::models::{EncryptedRecord, VaultEnvelope};

/// One write inside [`VaultStorage::run_atomic`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageOp {
    /// Store or replace the envelope.
    PutEnvelope(VaultEnvelope),
    /// Store or replace a record.
    PutRecord(EncryptedRecord),
    /// Remove a record. Removing a missing record is not an error.
    DeleteRecord(Uuid),
}

/// Durable key-value store for the envelope and encrypted records.
///
/// Implementations only ever see ciphertext. Reads must observe every write
/// that returned `Ok`.
pub trait VaultStorage: Send + Sync {
    /// The stored envelope, if a vault exists.
    fn get_vault_envelope(&self) -> Result<Option<VaultEnvelope>, StorageError>;

    /// Stores or replaces the envelope.
    fn put_vault_envelope(&self, envelope: VaultEnvelope) -> Result<(), StorageError>;

    /// Every stored record.
    fn list_encrypted_records(&self) -> Result<Vec<EncryptedRecord>, StorageError>;

    /// One stored record.
    fn get_encrypted_record(&self, id: Uuid) -> Result<Option<EncryptedRecord>, StorageError>;

    /// Stores or replaces a record.
    fn put_encrypted_record(&self, record: EncryptedRecord) -> Result<(), StorageError>;

    /// Removes a record.
    fn delete_encrypted_record(&self, id: Uuid) -> Result<(), StorageError>;

    /// Applies every op or none of them.
    fn run_atomic(&self, ops: Vec<StorageOp>) -> Result<(), StorageError>;
}

impl<T: VaultStorage + ?Sized> VaultStorage for Arc<T> {
    fn get_vault_envelope(&self) -> Result<Option<VaultEnvelope>, StorageError> {
        (**self).get_vault_envelope()
    }

    fn put_vault_envelope(&self, envelope: VaultEnvelope) -> Result<(), StorageError> {
        (**self).put_vault_envelope(envelope)
    }

    fn list_encrypted_records(&self) -> Result<Vec<EncryptedRecord>, StorageError> {
        (**self).list_encrypted_records()
    }

    fn get_encrypted_record(&self, id: Uuid) -> Result<Option<EncryptedRecord>, StorageError> {
        (**self).get_encrypted_record(id)
    }

    fn put_encrypted_record(&self, record: EncryptedRecord) -> Result<(), StorageError> {
        (**self).put_encrypted_record(record)
    }

    fn delete_encrypted_record(&self, id: Uuid) -> Result<(), StorageError> {
        (**self).delete_encrypted_record(id)
    }

    fn run_atomic(&self, ops: Vec<StorageOp>) -> Result<(), StorageError> {
        (**self).run_atomic(ops)
    }
}
