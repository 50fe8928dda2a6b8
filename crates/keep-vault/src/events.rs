// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use crossbeam_channel::{Receiver, Sender};
use parking_lot::Mutex;

/// Why a session locked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockReason {
    /// [`Session::lock`](crate::Session::lock) was called.
    Manual,
    /// The inactivity deadline passed.
    Inactivity,
    /// The session was dropped while unlocked.
    Dropped,
}

/// Session lifecycle notifications.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// A new vault was created and the session is unlocked.
    VaultCreated,
    /// The session unlocked.
    Unlocked {
        /// Records decrypted.
        records: usize,
        /// Records skipped because they failed authentication.
        dropped: usize,
    },
    /// The session locked. The vault key and all records are wiped.
    Locked {
        /// What triggered the lock.
        reason: LockReason,
    },
    /// The master password changed.
    PasswordChanged,
}

/// Fan-out of [`SessionEvent`]s. Subscribers that hung up are pruned.
#[derive(Default)]
pub(crate) struct EventBus {
    pub(crate) subscribers: Mutex<Vec<Sender<SessionEvent>>>,
}

impl EventBus {
    pub(crate) fn subscribe(&self) -> Receiver<SessionEvent> {
        let (tx, rx) = crossbeam_channel::unbounded();
        self.subscribers.lock().push(tx);
        rx
    }

    pub(crate) fn publish(&self, event: SessionEvent) {
        self.subscribers
            .lock()
            .retain(|tx| tx.send(event.clone()).is_ok());
    }
}
