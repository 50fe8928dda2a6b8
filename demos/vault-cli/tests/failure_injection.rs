// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! End-to-end command runs against failing storage and crypto.

use std::sync::Arc;

use keep::aead::test_utils::{CryptoMock, CryptoMockBehaviour};
use keep::kdf::KdfVersion;
use keep::secret::SecretString;
use keep::vault::{
    AutoLock, JsonFileStorage, MemoryStorage, Session, SessionConfig, SessionError,
    SessionState, StorageBehaviour, UnlockError, VaultStorage,
};
use vault_cli::{CliError, Command, Secrets, run};

fn config() -> SessionConfig {
    SessionConfig::default()
        .with_kdf_version(KdfVersion::Testing)
        .with_auto_lock(AutoLock::Never)
}

fn secrets(master: &str) -> Secrets {
    Secrets {
        master: Some(SecretString::from(master)),
        new_master: None,
        record: Some(SecretString::from("hunter2")),
    }
}

fn add(title: &str) -> Command {
    Command::Add {
        title: title.into(),
        username: "alice".into(),
        generate: None,
    }
}

// =============================================================================
// happy path
// =============================================================================

#[test]
fn test_full_flow_on_json_file() {
    let dir = tempfile::tempdir().expect("Failed to create tempdir");
    let path = dir.path().join("vault.json");
    let secrets = secrets("CorrectHorseBattery9");

    let session =
        Session::new(JsonFileStorage::new(&path), config()).expect("Failed to create session");

    run(&session, &secrets, Command::Init).expect("Failed to run(init)");
    let id = run(&session, &secrets, add("mail")).expect("Failed to run(add)");
    let listed = run(&session, &secrets, Command::List).expect("Failed to run(list)");
    let password = run(
        &session,
        &secrets,
        Command::Get {
            id: id.parse().expect("Failed to parse id"),
            username: false,
        },
    )
    .expect("Failed to run(get)");

    assert!(listed.contains(&id));
    assert!(listed.contains("mail"));
    assert_eq!(password, "hunter2");
    // Every command leaves the vault locked.
    assert_eq!(session.state(), SessionState::Locked);

    let on_disk = std::fs::read_to_string(&path).expect("Failed to read vault file");
    assert!(!on_disk.contains("hunter2"));
}

#[test]
fn test_passwd_then_old_password_fails() {
    let session = Session::new(MemoryStorage::new(), config()).expect("Failed to create session");
    let old = secrets("CorrectHorseBattery9");
    run(&session, &old, Command::Init).expect("Failed to run(init)");

    let change = Secrets {
        new_master: Some(SecretString::from("Tr0ub4dor&3")),
        ..secrets("CorrectHorseBattery9")
    };
    run(&session, &change, Command::Passwd).expect("Failed to run(passwd)");

    assert!(matches!(
        run(&session, &old, Command::List),
        Err(CliError::Session(SessionError::Unlock(
            UnlockError::InvalidCredentialsOrCorruptVault
        )))
    ));
    run(&session, &secrets("Tr0ub4dor&3"), Command::List).expect("Failed to run(list)");
}

#[test]
fn test_generate_needs_no_vault() {
    let session = Session::new(MemoryStorage::new(), config()).expect("Failed to create session");

    let password = run(
        &session,
        &Secrets::default(),
        Command::Generate {
            length: 16,
            no_symbols: true,
        },
    )
    .expect("Failed to run(generate)");

    assert_eq!(password.len(), 16);
    assert!(password.bytes().all(|b| b.is_ascii_alphanumeric()));
}

#[test]
fn test_missing_master_password() {
    let session = Session::new(MemoryStorage::new(), config()).expect("Failed to create session");

    assert!(matches!(
        run(&session, &Secrets::default(), Command::Init),
        Err(CliError::MissingSecret(_))
    ));
}

// =============================================================================
// storage failures
// =============================================================================

#[test]
fn test_add_with_failing_storage_keeps_vault_intact() {
    let storage = Arc::new(MemoryStorage::new());
    let session =
        Session::new(Arc::clone(&storage), config()).expect("Failed to create session");
    let secrets = secrets("CorrectHorseBattery9");
    run(&session, &secrets, Command::Init).expect("Failed to run(init)");
    run(&session, &secrets, add("mail")).expect("Failed to run(add)");

    storage.change_behaviour(StorageBehaviour::FailWrites);
    let result = run(&session, &secrets, add("bank"));

    assert!(matches!(result, Err(CliError::Session(SessionError::Storage(_)))));
    assert_eq!(session.state(), SessionState::Locked);

    storage.change_behaviour(StorageBehaviour::None);
    let listed = run(&session, &secrets, Command::List).expect("Failed to run(list)");
    assert!(listed.contains("mail"));
    assert!(!listed.contains("bank"));
}

#[test]
fn test_unreadable_storage() {
    let storage = Arc::new(MemoryStorage::new());
    let session =
        Session::new(Arc::clone(&storage), config()).expect("Failed to create session");
    let secrets = secrets("CorrectHorseBattery9");
    run(&session, &secrets, Command::Init).expect("Failed to run(init)");

    storage.change_behaviour(StorageBehaviour::FailReads);

    assert!(matches!(
        run(&session, &secrets, Command::List),
        Err(CliError::Session(SessionError::Storage(_)))
    ));
}

#[test]
fn test_corrupt_record_is_skipped() {
    let storage = Arc::new(MemoryStorage::new());
    let session =
        Session::new(Arc::clone(&storage), config()).expect("Failed to create session");
    let secrets = secrets("CorrectHorseBattery9");
    run(&session, &secrets, Command::Init).expect("Failed to run(init)");
    run(&session, &secrets, add("mail")).expect("Failed to run(add)");
    let victim = run(&session, &secrets, add("bank")).expect("Failed to run(add)");

    let mut record = storage
        .get_encrypted_record(victim.parse().expect("Failed to parse id"))
        .expect("Failed to get record")
        .expect("Missing record");
    let last = record.ciphertext.len() - 1;
    record.ciphertext[last] ^= 0xff;
    storage.put_encrypted_record(record).expect("Failed to put record");

    let listed = run(&session, &secrets, Command::List).expect("Failed to run(list)");

    assert!(listed.contains("mail"));
    assert!(!listed.contains("bank"));
}

// =============================================================================
// crypto failures
// =============================================================================

#[test]
fn test_encryption_failure_on_init() {
    let crypto = CryptoMock::new(CryptoMockBehaviour::FailEncryptAt(0));
    let session = Session::with_crypto(MemoryStorage::new(), crypto, config())
        .expect("Failed to create session");

    assert!(matches!(
        run(&session, &secrets("CorrectHorseBattery9"), Command::Init),
        Err(CliError::Session(SessionError::Encryption(_)))
    ));
    assert_eq!(session.state(), SessionState::Locked);
}

#[test]
fn test_derivation_failure_on_unlock() {
    let crypto = CryptoMock::new(CryptoMockBehaviour::FailDeriveAt(1));
    let session = Session::with_crypto(MemoryStorage::new(), crypto, config())
        .expect("Failed to create session");
    let secrets = secrets("CorrectHorseBattery9");

    // Derivation 0 wraps the new vault key, derivation 1 fails the unlock.
    run(&session, &secrets, Command::Init).expect("Failed to run(init)");

    assert!(matches!(
        run(&session, &secrets, Command::List),
        Err(CliError::Session(SessionError::Derivation(_)))
    ));
    run(&session, &secrets, Command::List).expect("Failed to run(list)");
}
