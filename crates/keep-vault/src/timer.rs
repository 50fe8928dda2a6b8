// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Inactivity timer thread.
//!
//! One deadline at a time. Each arm carries the epoch it was issued under;
//! the owner compares it against the current epoch when the deadline fires,
//! so a deadline that was superseded or cancelled can never lock.

use std::io;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender};
use parking_lot::Mutex;

const THREAD_NAME: &str = "keep-autolock";

#[derive(Debug)]
pub(crate) enum TimerCommand {
    Arm { epoch: u64, deadline: Instant },
    Cancel,
    Shutdown,
}

pub(crate) struct InactivityTimer {
    tx: Sender<TimerCommand>,
    handle: Mutex<Option<JoinHandle<()>>>,
}

impl InactivityTimer {
    /// Creates the command channel. The thread is started with [`start`](Self::start).
    pub(crate) fn channel() -> (Self, Receiver<TimerCommand>) {
        let (tx, rx) = crossbeam_channel::unbounded();

        let timer = Self {
            tx,
            handle: Mutex::new(None),
        };

        (timer, rx)
    }

    /// Spawns the timer thread. `on_fire` runs on that thread with the epoch
    /// of the deadline that passed.
    pub(crate) fn start<F>(&self, rx: Receiver<TimerCommand>, on_fire: F) -> io::Result<()>
    where
        F: Fn(u64) + Send + 'static,
    {
        let handle = thread::Builder::new()
            .name(THREAD_NAME.into())
            .spawn(move || run(rx, on_fire))?;

        *self.handle.lock() = Some(handle);

        Ok(())
    }

    /// Replaces any pending deadline.
    ///
    /// A window too long to represent as an [`Instant`] never fires and only
    /// cancels the pending deadline.
    pub(crate) fn arm(&self, epoch: u64, after: Duration) {
        let command = match Instant::now().checked_add(after) {
            Some(deadline) => TimerCommand::Arm { epoch, deadline },
            None => {
                tracing::debug!(epoch, ?after, "inactivity window out of range, not armed");
                TimerCommand::Cancel
            }
        };

        let _ = self.tx.send(command);
    }

    pub(crate) fn cancel(&self) {
        let _ = self.tx.send(TimerCommand::Cancel);
    }
}

impl Drop for InactivityTimer {
    fn drop(&mut self) {
        let _ = self.tx.send(TimerCommand::Shutdown);

        if let Some(handle) = self.handle.get_mut().take() {
            // The last owner may be the timer thread itself, mid-callback.
            if handle.thread().id() != thread::current().id() {
                let _ = handle.join();
            }
        }
    }
}

fn run<F: Fn(u64)>(rx: Receiver<TimerCommand>, on_fire: F) {
    let mut armed: Option<(u64, Instant)> = None;

    loop {
        let received = match armed {
            Some((_, deadline)) => rx.recv_deadline(deadline),
            None => rx.recv().map_err(|_| RecvTimeoutError::Disconnected),
        };

        match received {
            Ok(TimerCommand::Arm { epoch, deadline }) => armed = Some((epoch, deadline)),
            Ok(TimerCommand::Cancel) => armed = None,
            Ok(TimerCommand::Shutdown) | Err(RecvTimeoutError::Disconnected) => break,
            Err(RecvTimeoutError::Timeout) => {
                if let Some((epoch, _)) = armed.take() {
                    tracing::debug!(epoch, "inactivity deadline reached");
                    on_fire(epoch);
                }
            }
        }
    }

    tracing::trace!("inactivity timer stopped");
}
