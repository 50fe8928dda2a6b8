// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Mock [`CryptoProvider`](crate::CryptoProvider) with per-operation failure injection.

mod crypto_mock;

pub use crypto_mock::{CryptoMock, CryptoMockBehaviour};
