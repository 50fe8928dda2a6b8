// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use std::fs;

use std::path::Path;

use super::utils::{sample_envelope, sample_record};
use crate::storage::replace_file;
use crate::{JsonFileStorage, StorageOp, VaultStorage};

fn edit_document(path: &Path, edit: impl FnOnce(&mut serde_json::Value)) {
    let raw = fs::read(path).expect("Failed to read file");
    let mut json: serde_json::Value = serde_json::from_slice(&raw).expect("Failed to parse file");
    edit(&mut json);
    fs::write(path, serde_json::to_vec(&json).expect("Failed to serialize file"))
        .expect("Failed to write file");
}

// =============================================================================
// JsonFileStorage
// =============================================================================

#[test]
fn test_missing_file_reads_as_empty() {
    let dir = tempfile::tempdir().expect("Failed to create tempdir");
    let storage = JsonFileStorage::new(dir.path().join("vault.json"));

    assert_eq!(storage.get_vault_envelope().expect("Failed to get"), None);
    assert!(storage.list_encrypted_records().expect("Failed to list").is_empty());
    assert!(!storage.path().exists());
}

#[test]
fn test_persists_across_instances() {
    let dir = tempfile::tempdir().expect("Failed to create tempdir");
    let path = dir.path().join("vault.json");
    let envelope = sample_envelope();
    let record = sample_record();

    {
        let storage = JsonFileStorage::new(&path);
        storage.put_vault_envelope(envelope.clone()).expect("Failed to put envelope");
        storage.put_encrypted_record(record.clone()).expect("Failed to put record");
    }

    let reopened = JsonFileStorage::new(&path);
    assert_eq!(
        reopened.get_vault_envelope().expect("Failed to get envelope"),
        Some(envelope)
    );
    assert_eq!(
        reopened.get_encrypted_record(record.id).expect("Failed to get record"),
        Some(record)
    );
}

#[test]
fn test_creates_parent_directories() {
    let dir = tempfile::tempdir().expect("Failed to create tempdir");
    let path = dir.path().join("nested").join("deeper").join("vault.json");
    let storage = JsonFileStorage::new(&path);

    storage.put_vault_envelope(sample_envelope()).expect("Failed to put envelope");

    assert!(path.exists());
}

#[test]
fn test_no_temp_file_left_behind() {
    let dir = tempfile::tempdir().expect("Failed to create tempdir");
    let storage = JsonFileStorage::new(dir.path().join("vault.json"));

    storage.put_encrypted_record(sample_record()).expect("Failed to put record");

    let names: Vec<_> = fs::read_dir(dir.path())
        .expect("Failed to read dir")
        .map(|e| e.expect("Failed to read entry").file_name())
        .collect();
    assert_eq!(names, vec![std::ffi::OsString::from("vault.json")]);
}

#[test]
fn test_document_layout() {
    let dir = tempfile::tempdir().expect("Failed to create tempdir");
    let storage = JsonFileStorage::new(dir.path().join("vault.json"));
    let record = sample_record();

    storage.put_vault_envelope(sample_envelope()).expect("Failed to put envelope");
    storage.put_encrypted_record(record.clone()).expect("Failed to put record");

    let raw = fs::read(storage.path()).expect("Failed to read file");
    let json: serde_json::Value = serde_json::from_slice(&raw).expect("Failed to parse file");

    assert_eq!(json["version"], 1);
    assert!(json["envelope"]["salt"].is_string());
    assert!(json["envelope"]["wrapped_key_ciphertext"].is_string());
    assert!(json["envelope"]["wrapped_key_nonce"].is_string());
    assert!(json["records"][record.id.to_string()]["ciphertext"].is_string());
}

#[test]
fn test_failed_replace_removes_temp_file() {
    let dir = tempfile::tempdir().expect("Failed to create tempdir");
    let target = dir.path().join("vault.json");

    // A non-empty directory cannot be renamed over.
    fs::create_dir(&target).expect("Failed to create dir");
    fs::write(target.join("occupied"), b"x").expect("Failed to write file");

    let err = replace_file(&target, b"{}").expect_err("Expected rename failure");

    assert_eq!(err.message(), "failed to replace vault file");
    assert!(!dir.path().join("vault.json.tmp").exists());
    assert!(target.join("occupied").exists());
}

#[test]
fn test_delete_and_run_atomic() {
    let dir = tempfile::tempdir().expect("Failed to create tempdir");
    let storage = JsonFileStorage::new(dir.path().join("vault.json"));
    let a = sample_record();
    let b = sample_record();

    storage
        .run_atomic(vec![
            StorageOp::PutRecord(a.clone()),
            StorageOp::PutRecord(b.clone()),
        ])
        .expect("Failed to run_atomic(..)");
    storage.delete_encrypted_record(a.id).expect("Failed to delete");

    assert_eq!(storage.list_encrypted_records().expect("Failed to list"), vec![b]);
}

#[test]
fn test_corrupt_file_is_storage_error() {
    let dir = tempfile::tempdir().expect("Failed to create tempdir");
    let path = dir.path().join("vault.json");
    fs::write(&path, b"{ not json").expect("Failed to write file");

    let storage = JsonFileStorage::new(&path);
    let err = storage.get_vault_envelope().expect_err("Expected parse failure");

    assert_eq!(err.message(), "failed to parse vault file");
    assert!(std::error::Error::source(&err).is_some());
}

#[test]
fn test_undecodable_record_entry_is_skipped() {
    let dir = tempfile::tempdir().expect("Failed to create tempdir");
    let storage = JsonFileStorage::new(dir.path().join("vault.json"));
    let damaged = sample_record();
    let intact = sample_record();

    storage
        .run_atomic(vec![
            StorageOp::PutRecord(damaged.clone()),
            StorageOp::PutRecord(intact.clone()),
        ])
        .expect("Failed to run_atomic(..)");

    edit_document(storage.path(), |json| {
        json["records"][damaged.id.to_string()]["ciphertext"] = "!AAAA".into();
    });

    assert_eq!(
        storage.list_encrypted_records().expect("Failed to list"),
        vec![intact.clone()]
    );
    assert!(storage.get_encrypted_record(damaged.id).is_err());
    assert_eq!(
        storage.get_encrypted_record(intact.id).expect("Failed to get record"),
        Some(intact)
    );
}

#[test]
fn test_record_entry_missing_fields_is_skipped() {
    let dir = tempfile::tempdir().expect("Failed to create tempdir");
    let storage = JsonFileStorage::new(dir.path().join("vault.json"));
    let damaged = sample_record();
    let intact = sample_record();

    storage.put_encrypted_record(damaged.clone()).expect("Failed to put record");
    storage.put_encrypted_record(intact.clone()).expect("Failed to put record");

    edit_document(storage.path(), |json| {
        json["records"][damaged.id.to_string()] = serde_json::json!({ "id": "garbage" });
    });

    assert_eq!(storage.list_encrypted_records().expect("Failed to list"), vec![intact]);
}

#[test]
fn test_record_under_foreign_key_is_skipped() {
    let dir = tempfile::tempdir().expect("Failed to create tempdir");
    let storage = JsonFileStorage::new(dir.path().join("vault.json"));
    let record = sample_record();

    storage.put_encrypted_record(record.clone()).expect("Failed to put record");

    edit_document(storage.path(), |json| {
        let entry = json["records"][record.id.to_string()].take();
        json["records"]["not-a-uuid"] = entry;
    });

    assert!(storage.list_encrypted_records().expect("Failed to list").is_empty());
}

#[test]
fn test_writes_keep_undecodable_entries() {
    let dir = tempfile::tempdir().expect("Failed to create tempdir");
    let storage = JsonFileStorage::new(dir.path().join("vault.json"));
    let damaged = sample_record();

    storage.put_encrypted_record(damaged.clone()).expect("Failed to put record");
    edit_document(storage.path(), |json| {
        json["records"][damaged.id.to_string()]["nonce"] = "%%%".into();
    });

    storage.put_encrypted_record(sample_record()).expect("Failed to put record");

    let raw = fs::read(storage.path()).expect("Failed to read file");
    let json: serde_json::Value = serde_json::from_slice(&raw).expect("Failed to parse file");
    assert_eq!(json["records"][damaged.id.to_string()]["nonce"], "%%%");
}

#[test]
fn test_unknown_format_version_is_rejected() {
    let dir = tempfile::tempdir().expect("Failed to create tempdir");
    let path = dir.path().join("vault.json");
    fs::write(&path, br#"{"version": 7, "envelope": null, "records": {}}"#)
        .expect("Failed to write file");

    let storage = JsonFileStorage::new(&path);

    assert!(storage.list_encrypted_records().is_err());
}

#[cfg(unix)]
#[test]
fn test_file_is_owner_only() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir().expect("Failed to create tempdir");
    let storage = JsonFileStorage::new(dir.path().join("vault.json"));
    storage.put_vault_envelope(sample_envelope()).expect("Failed to put envelope");

    let mode = fs::metadata(storage.path())
        .expect("Failed to stat file")
        .permissions()
        .mode();

    assert_eq!(mode & 0o777, 0o600);
}
