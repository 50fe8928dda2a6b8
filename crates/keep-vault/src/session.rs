// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Session manager: the only holder of the unwrapped vault key.

use std::collections::BTreeMap;
use std::mem;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use chrono::Utc;
use crossbeam_channel::Receiver;
use keep_aead::{CryptoProvider, SystemCrypto};
use keep_secret::SecretString;
use parking_lot::Mutex;
use uuid::Uuid;

use crate::config::SessionConfig;
use crate::envelope;
use crate::error::{SessionError, StorageError, UnlockError};
use crate::events::{EventBus, LockReason, SessionEvent};
use crate::models::{EncryptedRecord, PlaintextRecord, RecordField, VaultKey};
use crate::records::{self, OpenFailure};
use crate::storage::{StorageOp, VaultStorage};
use crate::timer::InactivityTimer;

/// Observable session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No key in memory.
    Locked,
    /// Deriving and unwrapping the vault key.
    Unlocking,
    /// Key and decrypted records in memory.
    Unlocked,
}

/// Outcome of a successful [`Session::unlock`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnlockReport {
    /// Records decrypted and available.
    pub records: usize,
    /// Ids of records skipped because they failed authentication or were
    /// malformed.
    pub dropped: Vec<Uuid>,
}

/// A secret handed to the clipboard collaborator, with its clear delay.
#[derive(Debug)]
pub struct ClipboardRequest {
    /// Text to place on the clipboard.
    pub secret: SecretString,
    /// Clear the clipboard after this long. `None` means never.
    pub clear_after: Option<Duration>,
}

struct UnlockedVault {
    key: VaultKey,
    records: BTreeMap<Uuid, PlaintextRecord>,
}

enum State {
    Locked,
    Unlocking,
    Unlocked(UnlockedVault),
}

impl State {
    fn unlocked(&self) -> Result<&UnlockedVault, SessionError> {
        match self {
            Self::Unlocked(vault) => Ok(vault),
            _ => Err(SessionError::Locked),
        }
    }

    fn unlocked_mut(&mut self) -> Result<&mut UnlockedVault, SessionError> {
        match self {
            Self::Unlocked(vault) => Ok(vault),
            _ => Err(SessionError::Locked),
        }
    }
}

pub(crate) struct SessionInner<S, C> {
    pub(crate) storage: S,
    pub(crate) crypto: C,
    config: SessionConfig,
    /// Serializes create, unlock, lock and password change.
    lifecycle: Mutex<()>,
    state: Mutex<State>,
    /// Bumped on every arm and every lock. Only a deadline carrying the
    /// current epoch may lock.
    pub(crate) epoch: AtomicU64,
    timer: InactivityTimer,
    events: EventBus,
}

/// A vault session over a storage backend.
///
/// `Session` is `Send + Sync`; share it through an `Arc`. Lifecycle
/// transitions serialize on one lock and record mutations on another, and
/// key derivation never runs under the record lock.
///
/// Dropping an unlocked session wipes the key and records and publishes
/// [`SessionEvent::Locked`] with [`LockReason::Dropped`].
pub struct Session<S, C = SystemCrypto>
where
    S: VaultStorage + 'static,
    C: CryptoProvider + 'static,
{
    pub(crate) inner: Arc<SessionInner<S, C>>,
}

impl<S> Session<S>
where
    S: VaultStorage + 'static,
{
    /// Creates a locked session using the system crypto provider.
    pub fn new(storage: S, config: SessionConfig) -> Result<Self, SessionError> {
        Self::with_crypto(storage, SystemCrypto::new(), config)
    }
}

impl<S, C> Session<S, C>
where
    S: VaultStorage + 'static,
    C: CryptoProvider + 'static,
{
    /// Creates a locked session over an explicit crypto provider.
    ///
    /// Applies process hardening once per process and starts the
    /// inactivity timer thread.
    ///
    /// # Errors
    ///
    /// [`SessionError::Timer`] if the timer thread cannot be spawned.
    pub fn with_crypto(storage: S, crypto: C, config: SessionConfig) -> Result<Self, SessionError> {
        keep_guard::harden_process();

        let (timer, timer_rx) = InactivityTimer::channel();

        let inner = Arc::new(SessionInner {
            storage,
            crypto,
            config,
            lifecycle: Mutex::new(()),
            state: Mutex::new(State::Locked),
            epoch: AtomicU64::new(0),
            timer,
            events: EventBus::default(),
        });

        let weak = Arc::downgrade(&inner);
        inner
            .timer
            .start(timer_rx, move |epoch| {
                if let Some(inner) = weak.upgrade() {
                    inner.lock_if_current(epoch);
                }
            })
            .map_err(SessionError::Timer)?;

        Ok(Self { inner })
    }

    /// Session settings.
    pub fn config(&self) -> &SessionConfig {
        &self.inner.config
    }

    /// Current state.
    pub fn state(&self) -> SessionState {
        match *self.inner.state.lock() {
            State::Locked => SessionState::Locked,
            State::Unlocking => SessionState::Unlocking,
            State::Unlocked(_) => SessionState::Unlocked,
        }
    }

    /// Returns `true` while the vault key is held.
    pub fn is_unlocked(&self) -> bool {
        self.state() == SessionState::Unlocked
    }

    /// Subscribes to lifecycle events.
    pub fn subscribe(&self) -> Receiver<SessionEvent> {
        self.inner.events.subscribe()
    }

    /// Creates a new vault protected by `password` and leaves the session
    /// unlocked with no records.
    ///
    /// # Errors
    ///
    /// - [`SessionError::AlreadyUnlocked`] if the session is not locked.
    /// - [`SessionError::VaultExists`] if an envelope is already stored.
    /// - [`SessionError::Derivation`] on an empty password.
    /// - [`SessionError::Storage`] if the envelope cannot be persisted.
    pub fn create_vault(&self, password: &SecretString) -> Result<(), SessionError> {
        let inner = &*self.inner;
        let _lifecycle = inner.lifecycle.lock();

        inner.begin_unlocking()?;

        let result = inner
            .storage
            .get_vault_envelope()
            .map_err(SessionError::from)
            .and_then(|existing| match existing {
                Some(_) => Err(SessionError::VaultExists),
                None => Ok(()),
            })
            .and_then(|()| envelope::create_vault(&inner.crypto, password, inner.config.kdf_version))
            .and_then(|(envelope, key)| {
                inner.storage.put_vault_envelope(envelope)?;
                Ok(key)
            });

        let mut state = inner.state.lock();
        match result {
            Ok(key) => {
                *state = State::Unlocked(UnlockedVault {
                    key,
                    records: BTreeMap::new(),
                });
                inner.arm_timer();
                drop(state);

                tracing::info!("vault created");
                inner.events.publish(SessionEvent::VaultCreated);

                Ok(())
            }
            Err(e) => {
                *state = State::Locked;
                tracing::warn!(error = %e, "vault creation failed");

                Err(e)
            }
        }
    }

    /// Unlocks the vault with `password` and decrypts every record.
    ///
    /// Records that fail authentication or do not parse are skipped and
    /// listed in the report. A wrong password or a damaged envelope returns
    /// the session to `Locked` with
    /// [`UnlockError::InvalidCredentialsOrCorruptVault`].
    ///
    /// # Errors
    ///
    /// - [`SessionError::AlreadyUnlocked`] if the session is not locked.
    /// - [`SessionError::NoVault`] if no envelope is stored.
    /// - [`SessionError::Unlock`] on a wrong password or damaged envelope.
    /// - [`SessionError::Storage`] if the backend fails.
    pub fn unlock(&self, password: &SecretString) -> Result<UnlockReport, SessionError> {
        let inner = &*self.inner;
        let _lifecycle = inner.lifecycle.lock();

        inner.begin_unlocking()?;
        tracing::debug!("unlocking vault");

        let result = inner.open_vault(password);

        let mut state = inner.state.lock();
        match result {
            Ok((key, records, dropped)) => {
                let report = UnlockReport {
                    records: records.len(),
                    dropped,
                };

                *state = State::Unlocked(UnlockedVault { key, records });
                inner.arm_timer();
                drop(state);

                tracing::info!(
                    records = report.records,
                    dropped = report.dropped.len(),
                    "vault unlocked"
                );
                inner.events.publish(SessionEvent::Unlocked {
                    records: report.records,
                    dropped: report.dropped.len(),
                });

                Ok(report)
            }
            Err(e) => {
                *state = State::Locked;
                tracing::warn!(error = %e, "unlock failed");

                Err(e)
            }
        }
    }

    /// Wipes the vault key and every decrypted record.
    ///
    /// Idempotent. Returns `true` if the session was unlocked.
    pub fn lock(&self) -> bool {
        let _lifecycle = self.inner.lifecycle.lock();
        self.inner.lock_with(LockReason::Manual, None)
    }

    /// Resets the inactivity deadline. No-op unless unlocked.
    pub fn touch(&self) {
        let state = self.inner.state.lock();
        if matches!(*state, State::Unlocked(_)) {
            self.inner.arm_timer();
        }
    }

    /// Snapshot of every decrypted record, ordered by id.
    pub fn records(&self) -> Result<Vec<PlaintextRecord>, SessionError> {
        let state = self.inner.state.lock();
        let vault = state.unlocked()?;

        Ok(vault.records.values().cloned().collect())
    }

    /// Snapshot of one decrypted record.
    pub fn record(&self, id: Uuid) -> Result<PlaintextRecord, SessionError> {
        let state = self.inner.state.lock();
        let vault = state.unlocked()?;

        vault
            .records
            .get(&id)
            .cloned()
            .ok_or(SessionError::RecordNotFound(id))
    }

    /// Encrypts and stores a new record.
    ///
    /// # Errors
    ///
    /// - [`SessionError::Locked`] unless unlocked.
    /// - [`SessionError::DuplicateRecord`] if the id is taken.
    /// - [`SessionError::Encryption`] or [`SessionError::Storage`]; the
    ///   in-memory set is unchanged.
    pub fn add_record(&self, record: PlaintextRecord) -> Result<Uuid, SessionError> {
        let inner = &*self.inner;
        let mut state = inner.state.lock();
        let vault = state.unlocked_mut()?;

        let id = record.id;
        if vault.records.contains_key(&id) {
            return Err(SessionError::DuplicateRecord(id));
        }

        let encrypted = records::seal(&inner.crypto, &vault.key, &record)?;
        inner.storage.put_encrypted_record(encrypted)?;

        vault.records.insert(id, record);
        inner.arm_timer();

        tracing::debug!(%id, "record added");

        Ok(id)
    }

    /// Re-encrypts and stores an existing record with a fresh nonce.
    ///
    /// `created_at` is kept from the stored record; `updated_at` is set to now.
    ///
    /// # Errors
    ///
    /// - [`SessionError::Locked`] unless unlocked.
    /// - [`SessionError::RecordNotFound`] for an unknown id.
    /// - [`SessionError::Encryption`] or [`SessionError::Storage`]; the
    ///   in-memory set is unchanged.
    pub fn update_record(&self, mut record: PlaintextRecord) -> Result<(), SessionError> {
        let inner = &*self.inner;
        let mut state = inner.state.lock();
        let vault = state.unlocked_mut()?;

        let id = record.id;
        let created_at = vault
            .records
            .get(&id)
            .map(|existing| existing.created_at)
            .ok_or(SessionError::RecordNotFound(id))?;

        record.created_at = created_at;
        record.updated_at = Utc::now();

        let encrypted = records::seal(&inner.crypto, &vault.key, &record)?;
        inner.storage.put_encrypted_record(encrypted)?;

        vault.records.insert(id, record);
        inner.arm_timer();

        tracing::debug!(%id, "record updated");

        Ok(())
    }

    /// Deletes a record from storage and memory.
    ///
    /// # Errors
    ///
    /// - [`SessionError::Locked`] unless unlocked.
    /// - [`SessionError::RecordNotFound`] for an unknown id.
    /// - [`SessionError::Storage`]; the in-memory set is unchanged.
    pub fn delete_record(&self, id: Uuid) -> Result<(), SessionError> {
        let inner = &*self.inner;
        let mut state = inner.state.lock();
        let vault = state.unlocked_mut()?;

        if !vault.records.contains_key(&id) {
            return Err(SessionError::RecordNotFound(id));
        }

        inner.storage.delete_encrypted_record(id)?;

        vault.records.remove(&id);
        inner.arm_timer();

        tracing::debug!(%id, "record deleted");

        Ok(())
    }

    /// Encrypts `records` and stores them in one atomic write.
    ///
    /// Existing records with the same ids are replaced. Returns the number
    /// of records imported.
    ///
    /// # Errors
    ///
    /// - [`SessionError::Locked`] unless unlocked.
    /// - [`SessionError::Encryption`] or [`SessionError::Storage`]; nothing
    ///   is stored and the in-memory set is unchanged.
    pub fn import_records(&self, records: Vec<PlaintextRecord>) -> Result<usize, SessionError> {
        let inner = &*self.inner;
        let mut state = inner.state.lock();
        let vault = state.unlocked_mut()?;

        let ops = records
            .iter()
            .map(|record| records::seal(&inner.crypto, &vault.key, record).map(StorageOp::PutRecord))
            .collect::<Result<Vec<_>, _>>()?;

        inner.storage.run_atomic(ops)?;

        let count = records.len();
        for record in records {
            vault.records.insert(record.id, record);
        }
        inner.arm_timer();

        tracing::info!(count, "records imported");

        Ok(count)
    }

    /// The persisted encrypted records, for backup.
    ///
    /// # Errors
    ///
    /// - [`SessionError::Locked`] unless unlocked.
    /// - [`SessionError::Storage`] if the backend fails.
    pub fn export_records(&self) -> Result<Vec<EncryptedRecord>, SessionError> {
        let inner = &*self.inner;
        let state = inner.state.lock();
        state.unlocked()?;

        let exported = inner.storage.list_encrypted_records()?;
        tracing::info!(count = exported.len(), "records exported");

        Ok(exported)
    }

    /// Builds a clipboard request for one field of a record.
    ///
    /// Counts as activity.
    ///
    /// # Errors
    ///
    /// - [`SessionError::Locked`] unless unlocked.
    /// - [`SessionError::RecordNotFound`] for an unknown id.
    /// - [`SessionError::EmptyField`] if the field is empty.
    pub fn clipboard_request(
        &self,
        id: Uuid,
        field: RecordField,
    ) -> Result<ClipboardRequest, SessionError> {
        let inner = &*self.inner;
        let state = inner.state.lock();
        let vault = state.unlocked()?;

        let record = vault.records.get(&id).ok_or(SessionError::RecordNotFound(id))?;
        let secret = match field {
            RecordField::Username => SecretString::from(record.username.as_str()),
            RecordField::Password => record.password.clone(),
        };

        if secret.is_empty() {
            return Err(SessionError::EmptyField(id));
        }

        inner.arm_timer();

        Ok(ClipboardRequest {
            secret,
            clear_after: inner.config.clipboard_clear.duration(),
        })
    }

    /// Changes the master password.
    ///
    /// Verifies `current` against the stored envelope, then wraps the same
    /// vault key under `new` with a fresh salt. Records are not re-encrypted.
    /// Both key derivations run without holding the session locks, so a
    /// manual or inactivity lock in the meantime wins and nothing is written.
    ///
    /// # Errors
    ///
    /// - [`SessionError::Locked`] unless unlocked, before and after deriving.
    /// - [`SessionError::Unlock`] if `current` is wrong.
    /// - [`SessionError::Derivation`] if `new` is empty.
    /// - [`SessionError::Storage`] if the backend fails or the envelope
    ///   changed concurrently; the old envelope stays in place.
    pub fn change_password(
        &self,
        current: &SecretString,
        new: &SecretString,
    ) -> Result<(), SessionError> {
        let inner = &*self.inner;

        inner.state.lock().unlocked()?;

        let stored = inner.storage.get_vault_envelope()?.ok_or(SessionError::NoVault)?;
        let verified = envelope::unwrap_vault(&inner.crypto, current, &stored)?;
        let rewrapped = envelope::rewrap_vault(
            &inner.crypto,
            new,
            &verified,
            inner.config.kdf_version,
            stored.created_at,
        )?;

        let _lifecycle = inner.lifecycle.lock();

        if inner.state.lock().unlocked()?.key != verified {
            tracing::warn!("stored envelope does not wrap the session key");
            return Err(UnlockError::InvalidCredentialsOrCorruptVault.into());
        }

        if inner.storage.get_vault_envelope()?.as_ref() != Some(&stored) {
            tracing::warn!("vault envelope replaced during password change");
            return Err(StorageError::new("vault envelope changed during password change").into());
        }

        inner.storage.put_vault_envelope(rewrapped)?;

        {
            let state = inner.state.lock();
            if matches!(*state, State::Unlocked(_)) {
                inner.arm_timer();
            }
        }

        tracing::info!("master password changed");
        inner.events.publish(SessionEvent::PasswordChanged);

        Ok(())
    }
}

impl<S, C> SessionInner<S, C>
where
    S: VaultStorage,
    C: CryptoProvider,
{
    /// Locked to Unlocking. Caller holds the lifecycle lock.
    fn begin_unlocking(&self) -> Result<(), SessionError> {
        let mut state = self.state.lock();

        match *state {
            State::Locked => {
                *state = State::Unlocking;
                Ok(())
            }
            _ => Err(SessionError::AlreadyUnlocked),
        }
    }

    /// Loads the envelope, unwraps the key and decrypts every record.
    /// Runs without the state lock.
    #[allow(clippy::type_complexity)]
    fn open_vault(
        &self,
        password: &SecretString,
    ) -> Result<(VaultKey, BTreeMap<Uuid, PlaintextRecord>, Vec<Uuid>), SessionError> {
        let stored = self.storage.get_vault_envelope()?.ok_or(SessionError::NoVault)?;
        let key = envelope::unwrap_vault(&self.crypto, password, &stored)?;

        let mut records = BTreeMap::new();
        let mut dropped = Vec::new();

        for encrypted in self.storage.list_encrypted_records()? {
            match records::open(&self.crypto, &key, &encrypted) {
                Ok(record) => {
                    records.insert(record.id, record);
                }
                Err(failure) => {
                    let reason = match failure {
                        OpenFailure::Decryption(e) => e.to_string(),
                        OpenFailure::Malformed => "malformed plaintext".to_string(),
                        OpenFailure::IdMismatch => "id mismatch".to_string(),
                    };
                    tracing::warn!(id = %encrypted.id, %reason, "dropping unreadable record");
                    dropped.push(encrypted.id);
                }
            }
        }

        Ok((key, records, dropped))
    }

    /// Schedules a fresh inactivity deadline. Caller holds the state lock.
    fn arm_timer(&self) {
        if let Some(after) = self.config.auto_lock.duration() {
            let epoch = self.epoch.fetch_add(1, Ordering::SeqCst) + 1;
            self.timer.arm(epoch, after);
        }
    }

    /// Moves to Locked, wiping the key and records.
    ///
    /// With `expected_epoch`, only locks if no newer deadline was armed.
    /// Caller holds the lifecycle lock.
    fn lock_with(&self, reason: LockReason, expected_epoch: Option<u64>) -> bool {
        let previous = {
            let mut state = self.state.lock();

            if let Some(expected) = expected_epoch {
                if self.epoch.load(Ordering::SeqCst) != expected {
                    tracing::debug!(expected, "stale inactivity deadline ignored");
                    return false;
                }
            }

            self.epoch.fetch_add(1, Ordering::SeqCst);
            self.timer.cancel();

            mem::replace(&mut *state, State::Locked)
        };

        match previous {
            State::Unlocked(vault) => {
                // Key and records wipe themselves on drop.
                drop(vault);

                tracing::info!(?reason, "vault locked");
                self.events.publish(SessionEvent::Locked { reason });

                true
            }
            _ => false,
        }
    }

    /// Timer callback.
    pub(crate) fn lock_if_current(&self, epoch: u64) {
        let _lifecycle = self.lifecycle.lock();
        self.lock_with(LockReason::Inactivity, Some(epoch));
    }
}

impl<S, C> Drop for SessionInner<S, C> {
    fn drop(&mut self) {
        let previous = mem::replace(self.state.get_mut(), State::Locked);

        if let State::Unlocked(vault) = previous {
            drop(vault);

            tracing::info!(reason = ?LockReason::Dropped, "vault locked");
            self.events.publish(SessionEvent::Locked {
                reason: LockReason::Dropped,
            });
        }
    }
}
