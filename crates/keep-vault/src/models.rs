// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Persisted and in-memory vault data.

use core::fmt;

use chrono::{DateTime, Utc};
use keep_aead::KEY_SIZE;
use keep_secret::{SecretBytes, SecretString};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// The 256-bit key every record is encrypted under.
pub type VaultKey = SecretBytes<KEY_SIZE>;

/// A decrypted credential record. Only exists while the vault is unlocked.
///
/// Every text field is wiped when the record is dropped.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
pub struct PlaintextRecord {
    /// Caller-assigned id, shared with the encrypted form.
    #[zeroize(skip)]
    pub id: Uuid,
    /// Display title.
    pub title: String,
    /// Account name.
    pub username: String,
    /// The secret itself.
    pub password: SecretString,
    /// Optional site address.
    pub url: Option<String>,
    /// Optional free-form notes.
    pub notes: Option<String>,
    /// Creation time.
    #[zeroize(skip)]
    pub created_at: DateTime<Utc>,
    /// Last modification time.
    #[zeroize(skip)]
    pub updated_at: DateTime<Utc>,
}

impl PlaintextRecord {
    /// Creates a record with a fresh random id, timestamped now.
    pub fn new(
        title: impl Into<String>,
        username: impl Into<String>,
        password: SecretString,
    ) -> Self {
        let now = Utc::now();

        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            username: username.into(),
            password,
            url: None,
            notes: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Sets the site address.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Sets the notes.
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

impl fmt::Debug for PlaintextRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlaintextRecord")
            .field("id", &self.id)
            .field("title", &self.title)
            .finish_non_exhaustive()
    }
}

/// Record fields a caller may copy to the clipboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordField {
    /// [`PlaintextRecord::username`].
    Username,
    /// [`PlaintextRecord::password`].
    Password,
}

/// A record as persisted: ciphertext and nonce, nothing in the clear but
/// its id and timestamps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptedRecord {
    /// Same id as the plaintext record. Bound into the associated data.
    pub id: Uuid,
    /// ChaCha20-Poly1305 ciphertext with appended tag.
    #[serde(with = "keep_codec::base64_bytes")]
    pub ciphertext: Vec<u8>,
    /// 96-bit nonce, kept unvalidated until decryption.
    #[serde(with = "keep_codec::base64_bytes")]
    pub nonce: Vec<u8>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last modification time.
    pub updated_at: DateTime<Utc>,
}

/// The vault key encrypted under the password-derived wrapping key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WrappedVaultKey {
    /// Encrypted vault key with appended tag.
    #[serde(rename = "wrapped_key_ciphertext", with = "keep_codec::base64_bytes")]
    pub ciphertext: Vec<u8>,
    /// Nonce used to wrap the key.
    #[serde(rename = "wrapped_key_nonce", with = "keep_codec::base64_bytes")]
    pub nonce: Vec<u8>,
}

/// Everything needed to unlock a vault besides the password.
///
/// Field lengths are checked at unwrap time, so a damaged envelope fails
/// with the generic unlock error instead of a parse error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaultEnvelope {
    /// Per-vault KDF salt (32 bytes).
    #[serde(with = "keep_codec::base64_bytes")]
    pub salt: Vec<u8>,
    /// The wrapped vault key.
    #[serde(flatten)]
    pub wrapped_key: WrappedVaultKey,
    /// [`KdfVersion`](keep_kdf::KdfVersion) number.
    pub kdf_version: u32,
    /// Vault creation time.
    pub created_at: DateTime<Utc>,
    /// Last re-wrap time.
    pub updated_at: DateTime<Utc>,
}
