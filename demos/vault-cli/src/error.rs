// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use keep::rand::GeneratorError;
use keep::vault::SessionError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("{0} is required for this command")]
    MissingSecret(&'static str),

    #[error("failed to read password: {0}")]
    Prompt(#[from] std::io::Error),

    #[error("failed to render output: {0}")]
    Output(#[from] serde_json::Error),

    #[error(transparent)]
    Generator(#[from] GeneratorError),

    #[error(transparent)]
    Session(#[from] SessionError),
}
