// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use zeroize::Zeroize;

use crate::SecretBytes;

// =============================================================================
// zeroed()
// =============================================================================

#[test]
fn test_zeroed_is_zeroized() {
    let secret = SecretBytes::<32>::zeroed();
    assert!(secret.is_zeroized());
}

// =============================================================================
// from_mut()
// =============================================================================

#[test]
fn test_from_mut_zeroizes_source() {
    let mut raw = [0xAAu8; 32];
    let secret = SecretBytes::from_mut(&mut raw);

    assert!(raw.iter().all(|b| *b == 0));
    assert!(secret.expose().iter().all(|b| *b == 0xAA));
}

// =============================================================================
// try_from_slice()
// =============================================================================

#[test]
fn test_try_from_slice_exact_length() {
    let raw = [1u8, 2, 3, 4];
    let secret = SecretBytes::<4>::try_from_slice(&raw).expect("Failed to build from slice");

    assert_eq!(secret.expose(), &[1, 2, 3, 4]);
}

#[test]
fn test_try_from_slice_rejects_wrong_length() {
    assert!(SecretBytes::<4>::try_from_slice(&[1, 2, 3]).is_none());
    assert!(SecretBytes::<4>::try_from_slice(&[1, 2, 3, 4, 5]).is_none());
}

// =============================================================================
// expose_mut() / zeroize()
// =============================================================================

#[test]
fn test_expose_mut_fills_in_place() {
    let mut secret = SecretBytes::<8>::zeroed();
    secret.expose_mut().fill(0x42);

    assert!(!secret.is_zeroized());
    assert_eq!(secret.expose()[7], 0x42);
}

#[test]
fn test_zeroize_clears_bytes() {
    let mut raw = [0x55u8; 16];
    let mut secret = SecretBytes::from_mut(&mut raw);
    secret.zeroize();

    assert!(secret.is_zeroized());
}

// =============================================================================
// PartialEq / Debug
// =============================================================================

#[test]
fn test_equality_is_by_content() {
    let a = SecretBytes::<4>::try_from_slice(&[9, 9, 9, 9]).expect("Failed to build a");
    let b = SecretBytes::<4>::try_from_slice(&[9, 9, 9, 9]).expect("Failed to build b");
    let c = SecretBytes::<4>::try_from_slice(&[9, 9, 9, 8]).expect("Failed to build c");

    assert_eq!(a, b);
    assert_ne!(a, c);
}

#[test]
fn test_debug_is_redacted() {
    let mut raw = [0x41u8; 32];
    let secret = SecretBytes::from_mut(&mut raw);
    let debug = format!("{:?}", secret);

    assert_eq!(debug, "[REDACTED SecretBytes<32>]");
    assert!(!debug.contains("65"));
}

// =============================================================================
// is_memory_locked()
// =============================================================================

#[test]
fn test_dropping_neighbour_keeps_memory_locked() {
    let transient = SecretBytes::<32>::zeroed();
    let kept = SecretBytes::<32>::zeroed();

    if !transient.is_memory_locked() || !kept.is_memory_locked() {
        // RLIMIT_MEMLOCK too low in this environment.
        return;
    }

    drop(transient);

    assert!(kept.is_memory_locked());
    assert!(keep_guard::is_memory_locked(kept.expose()));
}
