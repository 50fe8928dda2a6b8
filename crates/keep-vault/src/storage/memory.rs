// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::Mutex;
use uuid::Uuid;

use super::{StorageOp, VaultStorage};
use crate::error::StorageError;
use crate::models::{EncryptedRecord, VaultEnvelope};

/// Configurable failures for [`MemoryStorage`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBehaviour {
    /// Normal operation.
    None,
    /// Every read fails.
    FailReads,
    /// Every write fails.
    FailWrites,
    /// The Nth write fails (0-indexed). `run_atomic` counts as one write.
    FailWriteAt(usize),
}

#[derive(Debug, Clone, Default)]
struct Contents {
    envelope: Option<VaultEnvelope>,
    records: BTreeMap<Uuid, EncryptedRecord>,
}

impl Contents {
    fn apply(&mut self, op: StorageOp) {
        match op {
            StorageOp::PutEnvelope(envelope) => self.envelope = Some(envelope),
            StorageOp::PutRecord(record) => {
                self.records.insert(record.id, record);
            }
            StorageOp::DeleteRecord(id) => {
                self.records.remove(&id);
            }
        }
    }
}

/// In-process [`VaultStorage`] with failure injection.
///
/// # Example
///
/// ```
/// use keep_vault::{MemoryStorage, StorageBehaviour, VaultStorage};
///
/// let storage = MemoryStorage::new();
/// storage.change_behaviour(StorageBehaviour::FailReads);
///
/// assert!(storage.get_vault_envelope().is_err());
/// ```
#[derive(Debug)]
pub struct MemoryStorage {
    contents: Mutex<Contents>,
    behaviour: Mutex<StorageBehaviour>,
    write_count: AtomicUsize,
}

impl MemoryStorage {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::with_behaviour(StorageBehaviour::None)
    }

    /// Creates an empty store with the given behaviour.
    pub fn with_behaviour(behaviour: StorageBehaviour) -> Self {
        Self {
            contents: Mutex::new(Contents::default()),
            behaviour: Mutex::new(behaviour),
            write_count: AtomicUsize::new(0),
        }
    }

    /// Changes the behaviour and resets the write counter.
    pub fn change_behaviour(&self, behaviour: StorageBehaviour) {
        *self.behaviour.lock() = behaviour;
        self.write_count.store(0, Ordering::SeqCst);
    }

    /// Number of write calls since the last behaviour change.
    pub fn write_count(&self) -> usize {
        self.write_count.load(Ordering::SeqCst)
    }

    fn check_read(&self) -> Result<(), StorageError> {
        match *self.behaviour.lock() {
            StorageBehaviour::FailReads => Err(StorageError::new("injected read failure")),
            _ => Ok(()),
        }
    }

    fn check_write(&self) -> Result<(), StorageError> {
        let current = self.write_count.fetch_add(1, Ordering::SeqCst);

        match *self.behaviour.lock() {
            StorageBehaviour::FailWrites => Err(StorageError::new("injected write failure")),
            StorageBehaviour::FailWriteAt(n) if n == current => {
                Err(StorageError::new("injected write failure"))
            }
            _ => Ok(()),
        }
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl VaultStorage for MemoryStorage {
    fn get_vault_envelope(&self) -> Result<Option<VaultEnvelope>, StorageError> {
        self.check_read()?;
        Ok(self.contents.lock().envelope.clone())
    }

    fn put_vault_envelope(&self, envelope: VaultEnvelope) -> Result<(), StorageError> {
        self.check_write()?;
        self.contents.lock().apply(StorageOp::PutEnvelope(envelope));
        Ok(())
    }

    fn list_encrypted_records(&self) -> Result<Vec<EncryptedRecord>, StorageError> {
        self.check_read()?;
        Ok(self.contents.lock().records.values().cloned().collect())
    }

    fn get_encrypted_record(&self, id: Uuid) -> Result<Option<EncryptedRecord>, StorageError> {
        self.check_read()?;
        Ok(self.contents.lock().records.get(&id).cloned())
    }

    fn put_encrypted_record(&self, record: EncryptedRecord) -> Result<(), StorageError> {
        self.check_write()?;
        self.contents.lock().apply(StorageOp::PutRecord(record));
        Ok(())
    }

    fn delete_encrypted_record(&self, id: Uuid) -> Result<(), StorageError> {
        self.check_write()?;
        self.contents.lock().apply(StorageOp::DeleteRecord(id));
        Ok(())
    }

    fn run_atomic(&self, ops: Vec<StorageOp>) -> Result<(), StorageError> {
        self.check_write()?;

        let mut contents = self.contents.lock();
        for op in ops {
            contents.apply(op);
        }

        Ok(())
    }
}
