// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use crate::events::EventBus;
use crate::{LockReason, SessionEvent};

// =============================================================================
// EventBus
// =============================================================================

#[test]
fn test_publish_reaches_every_subscriber() {
    let bus = EventBus::default();
    let a = bus.subscribe();
    let b = bus.subscribe();

    bus.publish(SessionEvent::Locked {
        reason: LockReason::Manual,
    });

    let expected = SessionEvent::Locked {
        reason: LockReason::Manual,
    };
    assert_eq!(a.try_recv(), Ok(expected.clone()));
    assert_eq!(b.try_recv(), Ok(expected));
}

#[test]
fn test_publish_without_subscribers() {
    let bus = EventBus::default();

    bus.publish(SessionEvent::VaultCreated);
}

#[test]
fn test_dropped_subscriber_is_pruned() {
    let bus = EventBus::default();
    let kept = bus.subscribe();
    drop(bus.subscribe());

    bus.publish(SessionEvent::PasswordChanged);
    bus.publish(SessionEvent::VaultCreated);

    assert_eq!(bus.subscribers.lock().len(), 1);
    assert_eq!(kept.try_recv(), Ok(SessionEvent::PasswordChanged));
    assert_eq!(kept.try_recv(), Ok(SessionEvent::VaultCreated));
}
