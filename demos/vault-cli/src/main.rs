// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use std::process::ExitCode;

use clap::Parser;
use keep::secret::SecretString;
use keep::vault::{JsonFileStorage, Session, SessionConfig};
use vault_cli::{
    Cli, CliError, Command, MASTER_PASSWORD_VAR, NEW_MASTER_PASSWORD_VAR, RECORD_PASSWORD_VAR,
    Secrets, run,
};

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match execute(cli) {
        Ok(output) => {
            if !output.is_empty() {
                println!("{output}");
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn execute(cli: Cli) -> Result<String, CliError> {
    tracing::debug!(command = ?cli.command, vault = %cli.vault.display(), "running command");

    let secrets = gather_secrets(&cli.command)?;
    let session = Session::new(JsonFileStorage::new(cli.vault), SessionConfig::default())?;

    run(&session, &secrets, cli.command)
}

fn gather_secrets(command: &Command) -> Result<Secrets, CliError> {
    let mut secrets = Secrets::default();

    if command.needs_master() {
        secrets.master = Some(read_secret(MASTER_PASSWORD_VAR, "Master password: ")?);
    }
    if command.needs_new_master() {
        secrets.new_master = Some(read_secret(NEW_MASTER_PASSWORD_VAR, "New master password: ")?);
    }
    if command.needs_record_password() {
        secrets.record = Some(read_secret(RECORD_PASSWORD_VAR, "Record password: ")?);
    }

    Ok(secrets)
}

/// Reads a secret from `var`, or prompts for it without echo.
fn read_secret(var: &str, prompt: &str) -> Result<SecretString, CliError> {
    let mut value = match std::env::var(var) {
        Ok(value) => value,
        Err(_) => rpassword::prompt_password(prompt)?,
    };

    Ok(SecretString::from_mut(&mut value))
}
