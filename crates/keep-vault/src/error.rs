// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Vault error types

use std::error::Error as StdError;

use keep_aead::EncryptionError;
use keep_kdf::DerivationError;
use keep_rand::EntropyError;
use thiserror::Error;
use uuid::Uuid;

/// Unlock failure.
///
/// A wrong password and a damaged envelope are deliberately indistinguishable.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum UnlockError {
    /// Wrong master password, or the stored envelope is corrupt.
    #[error("invalid master password or corrupt vault")]
    InvalidCredentialsOrCorruptVault,
}

/// Opaque error raised by a [`VaultStorage`](crate::VaultStorage) backend.
#[derive(Debug, Error)]
#[error("storage error: {message}")]
pub struct StorageError {
    message: String,
    #[source]
    source: Option<Box<dyn StdError + Send + Sync + 'static>>,
}

impl StorageError {
    /// Creates an error with a message only.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// Creates an error wrapping the backend's own error.
    pub fn with_source<E>(message: impl Into<String>, source: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// The backend's message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Invalid raw configuration value.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// Auto-lock minutes must be -1 (never) or between 0 and
    /// [`MAX_AUTO_LOCK_MINUTES`](crate::MAX_AUTO_LOCK_MINUTES).
    #[error("invalid auto-lock minutes: {0}")]
    InvalidAutoLock(i64),

    /// Clipboard clear seconds must be -1 (never) or a non-negative number.
    #[error("invalid clipboard clear seconds: {0}")]
    InvalidClipboardClear(i64),
}

/// Errors returned by [`Session`](crate::Session) operations.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The operation requires an unlocked session.
    #[error("vault is locked")]
    Locked,

    /// The session is already unlocked or unlocking.
    #[error("vault is already unlocked")]
    AlreadyUnlocked,

    /// A vault envelope is already stored.
    #[error("a vault already exists")]
    VaultExists,

    /// No vault envelope is stored.
    #[error("no vault exists")]
    NoVault,

    /// No record with this id.
    #[error("record {0} not found")]
    RecordNotFound(Uuid),

    /// A record with this id already exists.
    #[error("record {0} already exists")]
    DuplicateRecord(Uuid),

    /// The requested field is empty.
    #[error("record {0} has no value for the requested field")]
    EmptyField(Uuid),

    /// Record could not be serialized for encryption.
    #[error("record serialization failed")]
    Serialization,

    /// The inactivity timer thread could not be started.
    #[error("failed to start inactivity timer: {0}")]
    Timer(#[source] std::io::Error),

    /// Vault unwrap failed.
    #[error(transparent)]
    Unlock(#[from] UnlockError),

    /// Key derivation failed.
    #[error(transparent)]
    Derivation(#[from] DerivationError),

    /// Record or key encryption failed.
    #[error(transparent)]
    Encryption(#[from] EncryptionError),

    /// No randomness for a salt or vault key.
    #[error(transparent)]
    Entropy(#[from] EntropyError),

    /// The storage backend failed.
    #[error(transparent)]
    Storage(#[from] StorageError),
}
