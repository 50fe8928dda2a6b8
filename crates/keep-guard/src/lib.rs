// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! keep_guard - Best-effort OS protections for vault key material
//!
//! Two independent facilities:
//!
//! - [`harden_process`]: one-time `prctl(PR_SET_DUMPABLE, 0)` and
//!   `setrlimit(RLIMIT_CORE, 0)` so an unlocked vault key cannot end up in a
//!   core dump or be read through ptrace by a non-root process.
//! - [`lock_memory`] / [`unlock_memory`]: `mlock` a key buffer so it is never
//!   written to swap. The kernel locks whole pages and does not nest, so
//!   locks are counted per page and a page is only released once no buffer
//!   on it is still locked.
//!
//! Every call degrades gracefully: failure is reported, never fatal.

#![warn(missing_docs)]


use std::collections::BTreeMap;
use std::ops::RangeInclusive;
use std::sync::OnceLock;

use parking_lot::Mutex;

/// Outcome of [`harden_process`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuardStatus {
    /// Whether `prctl(PR_SET_DUMPABLE, 0)` succeeded.
    ///
    /// Blocks ptrace attachment and core dumps. Reversible by other code in
    /// the same process.
    pub not_dumpable: bool,

    /// Whether `setrlimit(RLIMIT_CORE, 0)` succeeded.
    ///
    /// Limits core dumps to 0 bytes. Does NOT block ptrace.
    pub core_limit_zero: bool,
}

impl GuardStatus {
    /// Returns `true` if at least one protection is active.
    pub fn is_protected(&self) -> bool {
        self.not_dumpable || self.core_limit_zero
    }
}

static STATUS: OnceLock<GuardStatus> = OnceLock::new();

/// Applies process-level protections once and returns their status.
///
/// Subsequent calls return the cached result without side effects.
///
/// # Example
///
/// ```
/// let status = keep_guard::harden_process();
/// if !status.is_protected() {
///     // running on a platform without prctl/setrlimit
/// }
/// ```
pub fn harden_process() -> GuardStatus {
    *STATUS.get_or_init(|| {
        let status = GuardStatus {
            not_dumpable: prctl_set_not_dumpable(),
            core_limit_zero: setrlimit_core_zero(),
        };

        if !status.not_dumpable && !status.core_limit_zero {
            tracing::warn!("core dump protection unavailable: prctl and setrlimit both failed");
        } else if !status.not_dumpable {
            tracing::warn!("prctl(PR_SET_DUMPABLE) failed; process can be attached via ptrace");
        } else if !status.core_limit_zero {
            tracing::debug!("setrlimit(RLIMIT_CORE) failed; prctl protection active");
        } else {
            tracing::debug!("process hardened against core dumps and ptrace");
        }

        status
    })
}

/// Lock count per page index.
static LOCKED_PAGES: Mutex<BTreeMap<usize, usize>> = parking_lot::const_mutex(BTreeMap::new());

fn page_range(bytes: &[u8]) -> RangeInclusive<usize> {
    let size = page_size();
    let start = bytes.as_ptr() as usize;

    (start / size)..=((start + bytes.len() - 1) / size)
}

/// Pins the pages backing `bytes` in RAM.
///
/// Returns `true` if the kernel accepted the request. A `false` result is
/// expected under a low `RLIMIT_MEMLOCK` and is not an error.
pub fn lock_memory(bytes: &[u8]) -> bool {
    if bytes.is_empty() {
        return false;
    }

    let mut pages = LOCKED_PAGES.lock();
    if !mlock(bytes) {
        tracing::debug!(len = bytes.len(), "mlock refused");
        return false;
    }

    for page in page_range(bytes) {
        *pages.entry(page).or_insert(0) += 1;
    }

    true
}

/// Releases a lock taken with [`lock_memory`].
///
/// Pages still shared with another locked buffer stay locked. Only call it
/// for a buffer whose [`lock_memory`] returned `true`, and wipe the buffer
/// first.
pub fn unlock_memory(bytes: &[u8]) {
    if bytes.is_empty() {
        return;
    }

    let size = page_size();
    let mut pages = LOCKED_PAGES.lock();

    for page in page_range(bytes) {
        let Some(count) = pages.get_mut(&page) else {
            continue;
        };

        *count -= 1;
        if *count == 0 {
            pages.remove(&page);
            munlock_page(page * size, size);
        }
    }
}

/// Returns `true` if every page backing `bytes` is currently locked through
/// [`lock_memory`].
pub fn is_memory_locked(bytes: &[u8]) -> bool {
    if bytes.is_empty() {
        return false;
    }

    let pages = LOCKED_PAGES.lock();
    page_range(bytes).all(|page| pages.contains_key(&page))
}

#[cfg(target_os = "linux")]
fn prctl_set_not_dumpable() -> bool {
    unsafe { libc::prctl(libc::PR_SET_DUMPABLE, 0, 0, 0, 0) == 0 }
}

#[cfg(not(target_os = "linux"))]
fn prctl_set_not_dumpable() -> bool {
    false
}

#[cfg(target_os = "linux")]
fn setrlimit_core_zero() -> bool {
    let limit = libc::rlimit {
        rlim_cur: 0,
        rlim_max: 0,
    };
    unsafe { libc::setrlimit(libc::RLIMIT_CORE, &limit) == 0 }
}

#[cfg(not(target_os = "linux"))]
fn setrlimit_core_zero() -> bool {
    false
}

#[cfg(unix)]
fn mlock(bytes: &[u8]) -> bool {
    unsafe { libc::mlock(bytes.as_ptr().cast(), bytes.len()) == 0 }
}

#[cfg(not(unix))]
fn mlock(_bytes: &[u8]) -> bool {
    false
}

#[cfg(unix)]
fn munlock_page(addr: usize, len: usize) {
    unsafe {
        libc::munlock(addr as *const libc::c_void, len);
    }
}

#[cfg(not(unix))]
fn munlock_page(_addr: usize, _len: usize) {}

#[cfg(unix)]
fn page_size() -> usize {
    static PAGE_SIZE: OnceLock<usize> = OnceLock::new();

    *PAGE_SIZE.get_or_init(|| {
        let size = unsafe { libc::sysconf(libc::_SC_PAGESIZE) };
        usize::try_from(size).ok().filter(|s| *s > 0).unwrap_or(4096)
    })
}

#[cfg(not(unix))]
fn page_size() -> usize {
    4096
}
