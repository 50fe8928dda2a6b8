// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Session settings.
//!
//! The caller owns persistence of these values. The raw form mirrors what a
//! settings store keeps: minutes and seconds as integers, `-1` for "never".

use std::time::Duration;

use keep_kdf::KdfVersion;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const NEVER: i64 = -1;

/// Longest accepted auto-lock window: one year.
pub const MAX_AUTO_LOCK_MINUTES: i64 = 366 * 24 * 60;

/// Inactivity auto-lock policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutoLock {
    /// Never lock on inactivity.
    Never,
    /// Lock after this much inactivity.
    After(Duration),
}

impl AutoLock {
    /// Parses a raw minute count. `-1` means never.
    ///
    /// Values above [`MAX_AUTO_LOCK_MINUTES`] are rejected.
    pub fn from_minutes(minutes: i64) -> Result<Self, ConfigError> {
        if minutes == NEVER {
            return Ok(Self::Never);
        }

        u64::try_from(minutes)
            .ok()
            .filter(|_| minutes <= MAX_AUTO_LOCK_MINUTES)
            .map(|m| Self::After(Duration::from_secs(m * 60)))
            .ok_or(ConfigError::InvalidAutoLock(minutes))
    }

    /// Raw minute count, `-1` for never.
    pub fn as_minutes(&self) -> i64 {
        match self {
            Self::Never => NEVER,
            Self::After(d) => i64::try_from(d.as_secs() / 60).unwrap_or(i64::MAX),
        }
    }

    /// The inactivity window, if any.
    pub fn duration(&self) -> Option<Duration> {
        match self {
            Self::Never => None,
            Self::After(d) => Some(*d),
        }
    }
}

/// Clipboard auto-clear policy, handed to the clipboard collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipboardClear {
    /// Leave copied secrets in the clipboard.
    Never,
    /// Clear the clipboard this long after copying.
    After(Duration),
}

impl ClipboardClear {
    /// Parses a raw second count. `-1` means never.
    pub fn from_seconds(seconds: i64) -> Result<Self, ConfigError> {
        if seconds == NEVER {
            return Ok(Self::Never);
        }

        u64::try_from(seconds)
            .map(|secs| Self::After(Duration::from_secs(secs)))
            .map_err(|_| ConfigError::InvalidClipboardClear(seconds))
    }

    /// Raw second count, `-1` for never.
    pub fn as_seconds(&self) -> i64 {
        match self {
            Self::Never => NEVER,
            Self::After(d) => i64::try_from(d.as_secs()).unwrap_or(i64::MAX),
        }
    }

    /// The delay before clearing, if any.
    pub fn duration(&self) -> Option<Duration> {
        match self {
            Self::Never => None,
            Self::After(d) => Some(*d),
        }
    }
}

/// Settings as persisted by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawSessionConfig {
    /// Minutes of inactivity before locking, `-1` for never.
    pub auto_lock_minutes: i64,
    /// Seconds before a copied secret is cleared, `-1` for never.
    pub clipboard_clear_seconds: i64,
    /// Whether record passwords are shown unmasked by default.
    pub show_passwords_by_default: bool,
}

impl Default for RawSessionConfig {
    fn default() -> Self {
        Self {
            auto_lock_minutes: 15,
            clipboard_clear_seconds: 30,
            show_passwords_by_default: false,
        }
    }
}

/// Validated session settings.
///
/// ```
/// use std::time::Duration;
/// use keep_vault::{AutoLock, SessionConfig};
///
/// let config = SessionConfig::from_raw(5, -1, false).expect("Failed to build config");
/// assert_eq!(config.auto_lock, AutoLock::After(Duration::from_secs(300)));
///
/// let config: SessionConfig = serde_json::from_str(r#"{"auto_lock_minutes": -1}"#)
///     .expect("Failed to parse config");
/// assert_eq!(config.auto_lock, AutoLock::Never);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawSessionConfig", into = "RawSessionConfig")]
pub struct SessionConfig {
    /// Inactivity auto-lock policy.
    pub auto_lock: AutoLock,
    /// Clipboard auto-clear policy.
    pub clipboard_clear: ClipboardClear,
    /// Whether record passwords are shown unmasked by default.
    pub show_passwords_by_default: bool,
    /// KDF profile for new and re-wrapped envelopes. Not persisted.
    pub kdf_version: KdfVersion,
}

impl SessionConfig {
    /// Validates raw values. `-1` means never; other negatives are rejected.
    pub fn from_raw(
        auto_lock_minutes: i64,
        clipboard_clear_seconds: i64,
        show_passwords_by_default: bool,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            auto_lock: AutoLock::from_minutes(auto_lock_minutes)?,
            clipboard_clear: ClipboardClear::from_seconds(clipboard_clear_seconds)?,
            show_passwords_by_default,
            kdf_version: KdfVersion::CURRENT,
        })
    }

    /// Overrides the auto-lock policy.
    pub fn with_auto_lock(mut self, auto_lock: AutoLock) -> Self {
        self.auto_lock = auto_lock;
        self
    }

    /// Overrides the KDF profile.
    pub fn with_kdf_version(mut self, kdf_version: KdfVersion) -> Self {
        self.kdf_version = kdf_version;
        self
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            auto_lock: AutoLock::After(Duration::from_secs(15 * 60)),
            clipboard_clear: ClipboardClear::After(Duration::from_secs(30)),
            show_passwords_by_default: false,
            kdf_version: KdfVersion::CURRENT,
        }
    }
}

impl TryFrom<RawSessionConfig> for SessionConfig {
    type Error = ConfigError;

    fn try_from(raw: RawSessionConfig) -> Result<Self, Self::Error> {
        Self::from_raw(
            raw.auto_lock_minutes,
            raw.clipboard_clear_seconds,
            raw.show_passwords_by_default,
        )
    }
}

impl From<SessionConfig> for RawSessionConfig {
    fn from(config: SessionConfig) -> Self {
        Self {
            auto_lock_minutes: config.auto_lock.as_minutes(),
            clipboard_clear_seconds: config.clipboard_clear.as_seconds(),
            show_passwords_by_default: config.show_passwords_by_default,
        }
    }
}
