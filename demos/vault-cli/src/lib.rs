// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Command definitions and execution for the `vault-cli` demo.
//!
//! Secrets are never taken from the command line: they are read from
//! `KEEP_MASTER_PASSWORD`, `KEEP_NEW_MASTER_PASSWORD` and
//! `KEEP_RECORD_PASSWORD`, or prompted for without echo.


mod error;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use keep::aead::CryptoProvider;
use keep::rand::generate_password;
use keep::secret::SecretString;
use keep::vault::{PlaintextRecord, RecordField, Session, VaultStorage};
use uuid::Uuid;

pub use error::CliError;

pub const MASTER_PASSWORD_VAR: &str = "KEEP_MASTER_PASSWORD";
pub const NEW_MASTER_PASSWORD_VAR: &str = "KEEP_NEW_MASTER_PASSWORD";
pub const RECORD_PASSWORD_VAR: &str = "KEEP_RECORD_PASSWORD";

#[derive(Debug, Parser)]
#[command(name = "vault-cli")]
#[command(version)]
#[command(about = "Local encrypted secrets vault")]
#[command(after_help = "EXAMPLES:
  vault-cli init                          Create a new vault
  vault-cli add mail alice --generate 24  Add a record with a generated password
  vault-cli list                          List record ids and titles
  vault-cli get <ID>                      Print a record's password")]
pub struct Cli {
    /// Vault file
    #[arg(short, long, env = "KEEP_VAULT", default_value = "vault.json")]
    pub vault: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Create a new vault
    Init,

    /// Add a record
    Add {
        /// Display title
        title: String,
        /// Account name
        username: String,
        /// Generate a password of this length instead of reading one
        #[arg(long, value_name = "LENGTH")]
        generate: Option<usize>,
    },

    /// List record ids, titles and usernames (never passwords)
    List,

    /// Print a record's password
    Get {
        /// Record id
        id: Uuid,
        /// Print the username instead
        #[arg(long)]
        username: bool,
    },

    /// Delete a record
    Delete {
        /// Record id
        id: Uuid,
    },

    /// Change the master password
    Passwd,

    /// Print the encrypted records as JSON
    Export,

    /// Print a random password
    Generate {
        /// Number of characters
        #[arg(default_value_t = 20)]
        length: usize,
        /// Letters and digits only
        #[arg(long)]
        no_symbols: bool,
    },
}

impl Command {
    /// Whether the command opens the vault with the master password.
    pub fn needs_master(&self) -> bool {
        !matches!(self, Self::Generate { .. })
    }

    /// Whether the command needs a new master password.
    pub fn needs_new_master(&self) -> bool {
        matches!(self, Self::Passwd)
    }

    /// Whether the command needs a password for a new record.
    pub fn needs_record_password(&self) -> bool {
        matches!(self, Self::Add { generate: None, .. })
    }
}

/// Secrets gathered before running a command.
#[derive(Debug, Default)]
pub struct Secrets {
    pub master: Option<SecretString>,
    pub new_master: Option<SecretString>,
    pub record: Option<SecretString>,
}

impl Secrets {
    fn master(&self) -> Result<&SecretString, CliError> {
        self.master
            .as_ref()
            .ok_or(CliError::MissingSecret(MASTER_PASSWORD_VAR))
    }
}

/// Runs `command` against `session` and returns what to print.
///
/// Every command that needs the vault unlocks it first and locks it again
/// before returning, whatever the outcome.
pub fn run<S, C>(
    session: &Session<S, C>,
    secrets: &Secrets,
    command: Command,
) -> Result<String, CliError>
where
    S: VaultStorage + 'static,
    C: CryptoProvider + 'static,
{
    match command {
        Command::Generate { length, no_symbols } => {
            let password = generate_password(length, !no_symbols)?;
            Ok(password.expose().to_string())
        }
        Command::Init => {
            session.create_vault(secrets.master()?)?;
            session.lock();
            Ok("vault created".to_string())
        }
        command => {
            let report = session.unlock(secrets.master()?)?;
            for id in &report.dropped {
                tracing::warn!(%id, "record could not be decrypted and was skipped");
            }

            let result = run_unlocked(session, secrets, command);
            session.lock();

            result
        }
    }
}

fn run_unlocked<S, C>(
    session: &Session<S, C>,
    secrets: &Secrets,
    command: Command,
) -> Result<String, CliError>
where
    S: VaultStorage + 'static,
    C: CryptoProvider + 'static,
{
    match command {
        Command::Add {
            title,
            username,
            generate,
        } => {
            let password = match (generate, &secrets.record) {
                (Some(length), _) => generate_password(length, true)?,
                (None, Some(password)) => password.clone(),
                (None, None) => return Err(CliError::MissingSecret(RECORD_PASSWORD_VAR)),
            };

            let id = session.add_record(PlaintextRecord::new(title, username, password))?;
            Ok(id.to_string())
        }
        Command::List => {
            let lines: Vec<_> = session
                .records()?
                .iter()
                .map(|r| format!("{}  {}  {}", r.id, r.title, r.username))
                .collect();
            Ok(lines.join("\n"))
        }
        Command::Get { id, username } => {
            let field = if username {
                RecordField::Username
            } else {
                RecordField::Password
            };
            let request = session.clipboard_request(id, field)?;
            Ok(request.secret.expose().to_string())
        }
        Command::Delete { id } => {
            session.delete_record(id)?;
            Ok(format!("deleted {id}"))
        }
        Command::Passwd => {
            let new_master = secrets
                .new_master
                .as_ref()
                .ok_or(CliError::MissingSecret(NEW_MASTER_PASSWORD_VAR))?;
            session.change_password(secrets.master()?, new_master)?;
            Ok("master password changed".to_string())
        }
        Command::Export => Ok(serde_json::to_string_pretty(&session.export_records()?)?),
        // Handled before unlocking.
        Command::Init | Command::Generate { .. } => Ok(String::new()),
    }
}
