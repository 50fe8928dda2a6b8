// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! # keep-vault
//!
//! The vault session: one master password, one randomly generated vault key,
//! and a set of individually encrypted credential records.
//!
//! ## Key hierarchy
//!
//! ```text
//! master password ──Argon2id(salt)──► key material ──HKDF(salt)──► wrapping key
//!                                                                      │
//!                         vault key (random, 256-bit) ◄──ChaCha20-Poly1305
//!                              │
//!                              └──► ChaCha20-Poly1305(aad = "record:<uuid>") per record
//! ```
//!
//! The vault key never touches disk in plaintext and only lives inside an
//! unlocked [`Session`]. Locking, inactivity and dropping the session all wipe
//! it together with every decrypted record.
//!
//! ## Example
//!
//! ```rust
//! use keep_secret::SecretString;
//! use keep_vault::{MemoryStorage, PlaintextRecord, Session, SessionConfig, SessionState};
//!
//! # fn main() -> Result<(), keep_vault::SessionError> {
//! let session = Session::new(MemoryStorage::new(), SessionConfig::default())?;
//! let master = SecretString::from("CorrectHorseBattery9");
//!
//! session.create_vault(&master)?;
//! session.add_record(PlaintextRecord::new("mail", "alice", SecretString::from("hunter2")))?;
//!
//! session.lock();
//! assert_eq!(session.state(), SessionState::Locked);
//!
//! let report = session.unlock(&master)?;
//! assert_eq!(report.records, 1);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

#[cfg(test)]
mod tests;

mod config;
mod consts;
mod envelope;
mod error;
mod events;
mod models;
mod records;
mod session;
mod storage;
mod timer;

pub use config::{
    AutoLock, ClipboardClear, MAX_AUTO_LOCK_MINUTES, RawSessionConfig, SessionConfig,
};
pub use consts::{RECORD_AAD_PREFIX, WRAP_AAD, record_aad};
pub use envelope::{create_vault, rewrap_vault, unwrap_vault};
pub use error::{ConfigError, SessionError, StorageError, UnlockError};
pub use events::{LockReason, SessionEvent};
pub use models::{EncryptedRecord, PlaintextRecord, RecordField, VaultEnvelope, VaultKey, WrappedVaultKey};
pub use session::{ClipboardRequest, Session, SessionState, UnlockReport};
pub use storage::{JsonFileStorage, MemoryStorage, StorageBehaviour, StorageOp, VaultStorage};
