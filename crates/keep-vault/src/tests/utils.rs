// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use std::time::Duration;

use chrono::Utc;
use crossbeam_channel::Receiver;
use keep_kdf::KdfVersion;
use keep_secret::SecretString;
use uuid::Uuid;

use crate::{
    AutoLock, EncryptedRecord, PlaintextRecord, SessionConfig, SessionEvent, VaultEnvelope,
    WrappedVaultKey,
};

pub(crate) const MASTER: &str = "CorrectHorseBattery9";

pub(crate) fn master() -> SecretString {
    SecretString::from(MASTER)
}

/// Fast KDF, auto-lock disabled.
pub(crate) fn test_config() -> SessionConfig {
    SessionConfig::default()
        .with_kdf_version(KdfVersion::Testing)
        .with_auto_lock(AutoLock::Never)
}

pub(crate) fn record(title: &str) -> PlaintextRecord {
    PlaintextRecord::new(title, "alice", SecretString::from("hunter2"))
}

pub(crate) fn next_event(rx: &Receiver<SessionEvent>) -> SessionEvent {
    rx.recv_timeout(Duration::from_secs(5))
        .expect("Failed to receive event")
}

pub(crate) fn sample_envelope() -> VaultEnvelope {
    let now = Utc::now();

    VaultEnvelope {
        salt: vec![1u8; 32],
        wrapped_key: WrappedVaultKey {
            ciphertext: vec![2u8; 48],
            nonce: vec![3u8; 12],
        },
        kdf_version: 1,
        created_at: now,
        updated_at: now,
    }
}

pub(crate) fn sample_record() -> EncryptedRecord {
    let now = Utc::now();

    EncryptedRecord {
        id: Uuid::new_v4(),
        ciphertext: vec![4u8; 40],
        nonce: vec![5u8; 12],
        created_at: now,
        updated_at: now,
    }
}
