// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! <p align="center"><em>A local secrets vault: one master password, every record sealed on its own.</em></p>
//!
//! ---
//!
//! keep stores credentials in an encrypted vault on local storage. The master
//! password never encrypts data directly: it unwraps a random vault key, and
//! that key seals each record individually with ChaCha20-Poly1305.
//!
//! # Features
//!
//! - **Argon2id + HKDF** key derivation with a versioned cost profile
//! - **Envelope encryption**: changing the master password rewraps one key,
//!   records are untouched
//! - **Per-record AEAD** bound to the record id, so ciphertexts cannot be
//!   swapped between records
//! - **Auto-lock** after inactivity, wiping the key and every decrypted record
//! - **Partial recovery**: a damaged record is skipped, the rest of the vault
//!   still opens
//! - **Zeroized secrets** with redacted `Debug` output
//!
//! # Quick Start
//!
//! ```rust
//! use keep::rand::generate_password;
//! use keep::secret::SecretString;
//! use keep::vault::{MemoryStorage, PlaintextRecord, RecordField, Session, SessionConfig};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let session = Session::new(MemoryStorage::new(), SessionConfig::default())?;
//!     let master = SecretString::from("CorrectHorseBattery9");
//!
//!     session.create_vault(&master)?;
//!
//!     let password = generate_password(24, true)?;
//!     let id = session.add_record(PlaintextRecord::new("mail", "alice", password))?;
//!
//!     // Hand the password to a clipboard collaborator.
//!     let request = session.clipboard_request(id, RecordField::Password)?;
//!     assert_eq!(request.secret.char_count(), 24);
//!
//!     session.lock();
//!     // Key and records are wiped here.
//!
//!     let report = session.unlock(&master)?;
//!     assert_eq!(report.records, 1);
//!
//!     Ok(())
//! }
//! ```
//!
//! # Crates
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`aead`] | ChaCha20-Poly1305 record cipher and the crypto capability trait |
//! | [`codec`] | Base64 text encoding for persisted binary fields |
//! | [`guard`] | Process hardening and page locking |
//! | [`kdf`] | Argon2id + HKDF-SHA256 key derivation |
//! | [`rand`] | OS entropy and the password generator |
//! | [`secret`] | Zeroizing secret containers |
//! | [`vault`] | Key envelope, storage and the session manager |
//!
//! # License
//!
//! GPL-3.0-only

#![warn(missing_docs)]

pub use keep_aead as aead;
pub use keep_codec as codec;
pub use keep_guard as guard;
pub use keep_kdf as kdf;
pub use keep_rand as rand;
pub use keep_secret as secret;
pub use keep_vault as vault;
