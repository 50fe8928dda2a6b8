// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{StorageOp, VaultStorage};
use crate::error::StorageError;
use crate::models::{EncryptedRecord, VaultEnvelope};

/// On-disk format version.
const FORMAT_VERSION: u32 = 1;

/// Records stay as raw JSON until read, so one damaged entry only costs
/// that entry.
#[derive(Debug, Default, Serialize, Deserialize)]
struct VaultDocument {
    version: u32,
    envelope: Option<VaultEnvelope>,
    records: BTreeMap<String, serde_json::Value>,
}

impl VaultDocument {
    fn put_record(&mut self, record: &EncryptedRecord) -> Result<(), StorageError> {
        let value = serde_json::to_value(record)
            .map_err(|e| StorageError::with_source("failed to serialize record", e))?;
        self.records.insert(record.id.to_string(), value);

        Ok(())
    }

    /// Every record that parses and sits under its own id. The rest are
    /// logged and skipped but stay in the document.
    fn readable_records(self) -> Vec<EncryptedRecord> {
        self.records
            .into_iter()
            .filter_map(|(key, value)| match decode_record(&key, value) {
                Ok(record) => Some(record),
                Err(reason) => {
                    tracing::warn!(id = %key, %reason, "skipping malformed record entry");
                    None
                }
            })
            .collect()
    }
}

fn decode_record(key: &str, value: serde_json::Value) -> Result<EncryptedRecord, String> {
    let record: EncryptedRecord = serde_json::from_value(value).map_err(|e| e.to_string())?;

    if record.id.to_string() != key {
        return Err(format!("entry holds record {}", record.id));
    }

    Ok(record)
}

/// [`VaultStorage`] backed by a single JSON document.
///
/// Every write rewrites the whole document to a sibling temp file, syncs it
/// and renames it over the original, so the file on disk is always either
/// the old or the new state. On unix the file is created with mode `0600`.
#[derive(Debug)]
pub struct JsonFileStorage {
    path: PathBuf,
    io_lock: Mutex<()>,
}

impl JsonFileStorage {
    /// Opens (or prepares to create) the document at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            io_lock: Mutex::new(()),
        }
    }

    /// Location of the document.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<VaultDocument, StorageError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Ok(VaultDocument {
                    version: FORMAT_VERSION,
                    ..VaultDocument::default()
                });
            }
            Err(e) => return Err(StorageError::with_source("failed to read vault file", e)),
        };

        let document: VaultDocument = serde_json::from_slice(&bytes)
            .map_err(|e| StorageError::with_source("failed to parse vault file", e))?;

        if document.version != FORMAT_VERSION {
            return Err(StorageError::new(format!(
                "unsupported vault file version {}",
                document.version
            )));
        }

        Ok(document)
    }

    fn store(&self, document: &VaultDocument) -> Result<(), StorageError> {
        let data = serde_json::to_vec_pretty(document)
            .map_err(|e| StorageError::with_source("failed to serialize vault file", e))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .map_err(|e| StorageError::with_source("failed to create vault directory", e))?;
        }

        replace_file(&self.path, &data)?;

        tracing::trace!(path = %self.path.display(), bytes = data.len(), "vault file written");

        Ok(())
    }

    fn update(&self, ops: Vec<StorageOp>) -> Result<(), StorageError> {
        let _guard = self.io_lock.lock();

        let mut document = self.load()?;
        for op in ops {
            match op {
                StorageOp::PutEnvelope(envelope) => document.envelope = Some(envelope),
                StorageOp::PutRecord(record) => document.put_record(&record)?,
                StorageOp::DeleteRecord(id) => {
                    document.records.remove(&id.to_string());
                }
            }
        }

        self.store(&document)
    }

    fn read(&self) -> Result<VaultDocument, StorageError> {
        let _guard = self.io_lock.lock();
        self.load()
    }
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Writes `data` to a sibling temp file and renames it over `path`.
/// The temp file is removed if either step fails.
pub(crate) fn replace_file(path: &Path, data: &[u8]) -> Result<(), StorageError> {
    let temp_path = temp_path(path);

    let replaced = write_synced(&temp_path, data)
        .map_err(|e| StorageError::with_source("failed to write vault file", e))
        .and_then(|()| {
            fs::rename(&temp_path, path)
                .map_err(|e| StorageError::with_source("failed to replace vault file", e))
        });

    if replaced.is_err() {
        if let Err(e) = fs::remove_file(&temp_path) {
            if e.kind() != io::ErrorKind::NotFound {
                tracing::warn!(
                    path = %temp_path.display(),
                    error = %e,
                    "failed to remove temp file"
                );
            }
        }
    }

    replaced
}

fn write_synced(path: &Path, data: &[u8]) -> io::Result<()> {
    let mut options = fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let mut file = options.open(path)?;
    file.write_all(data)?;
    file.sync_all()
}

impl VaultStorage for JsonFileStorage {
    fn get_vault_envelope(&self) -> Result<Option<VaultEnvelope>, StorageError> {
        Ok(self.read()?.envelope)
    }

    fn put_vault_envelope(&self, envelope: VaultEnvelope) -> Result<(), StorageError> {
        self.update(vec![StorageOp::PutEnvelope(envelope)])
    }

    fn list_encrypted_records(&self) -> Result<Vec<EncryptedRecord>, StorageError> {
        Ok(self.read()?.readable_records())
    }

    fn get_encrypted_record(&self, id: Uuid) -> Result<Option<EncryptedRecord>, StorageError> {
        let key = id.to_string();

        self.read()?
            .records
            .remove(&key)
            .map(|value| decode_record(&key, value))
            .transpose()
            .map_err(|reason| StorageError::new(format!("malformed record {key}: {reason}")))
    }

    fn put_encrypted_record(&self, record: EncryptedRecord) -> Result<(), StorageError> {
        self.update(vec![StorageOp::PutRecord(record)])
    }

    fn delete_encrypted_record(&self, id: Uuid) -> Result<(), StorageError> {
        self.update(vec![StorageOp::DeleteRecord(id)])
    }

    fn run_atomic(&self, ops: Vec<StorageOp>) -> Result<(), StorageError> {
        self.update(ops)
    }
}
