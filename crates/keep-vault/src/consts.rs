// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use uuid::Uuid;

/// Associated data for the wrapped vault key.
pub const WRAP_AAD: &[u8] = b"keep.vault.key.v1";

/// Prefix of a record's associated data.
pub const RECORD_AAD_PREFIX: &str = "record:";

/// Associated data binding a ciphertext to its record id: `record:<uuid>`.
pub fn record_aad(id: &Uuid) -> Vec<u8> {
    format!("{}{}", RECORD_AAD_PREFIX, id.hyphenated()).into_bytes()
}
