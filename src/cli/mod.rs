//! CLI module — Clap argument parser, prompts, the interactive shell,
//! and one-shot command implementations.

pub mod commands;
pub mod output;
pub mod shell;

use std::path::PathBuf;

use clap::Parser;
use zeroize::Zeroizing;

use crate::config::Settings;
use crate::errors::{Result, VaultError};
use crate::vault::{EntryStore, InitOutcome, Session};

/// Environment variable consulted before prompting for the master password.
pub const PASSWORD_ENV: &str = "PWVAULT_PASSWORD";

/// pwvault: local password vault.
#[derive(Parser)]
#[command(
    name = "pwvault",
    about = "Local password vault with encrypted entries",
    version
)]
pub struct Cli {
    /// Command to run (default: interactive shell)
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Vault database file (default: vault.db or `vault_path` in .pwvault.toml)
    #[arg(long, global = true)]
    pub vault: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Start the interactive menu
    Shell,

    /// Create the vault file and choose the master password
    Init,

    /// Add an entry
    Add {
        /// Entry name (e.g. Gmail)
        #[arg(short, long)]
        name: String,
        /// Username or email
        #[arg(short, long)]
        username: Option<String>,
        /// Free-form notes
        #[arg(long)]
        notes: Option<String>,
        /// Secret value (omit for piped stdin or interactive prompt)
        secret: Option<String>,
    },

    /// Print an entry's secret
    Get {
        /// Entry id
        id: i64,
    },

    /// Show an entry with all its fields
    Show {
        /// Entry id
        id: i64,
    },

    /// List all entries (no secrets)
    List,

    /// Delete an entry
    Delete {
        /// Entry id
        id: i64,
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// Resolve the vault path from config and `--vault`, open it, and run
/// the idempotent init.
pub fn open_store(cli: &Cli) -> Result<(EntryStore, InitOutcome)> {
    let cwd = std::env::current_dir()?;
    let settings = Settings::load(&cwd)?;
    let path = settings.vault_path(&cwd, cli.vault.as_deref());

    let store = EntryStore::open(&path)?;
    let outcome = store.init_with_iterations(settings.kdf_iterations)?;
    if outcome == InitOutcome::Created {
        output::info(&format!("Created new vault at {}", path.display()));
    }
    Ok((store, outcome))
}

/// Prompt for the master password and derive the session key.
///
/// A vault created just now asks for the password twice.
pub fn unlock<'a>(store: &'a EntryStore, outcome: InitOutcome) -> Result<Session<'a>> {
    let password = match outcome {
        InitOutcome::Created => prompt_new_password()?,
        InitOutcome::Existing => prompt_password()?,
    };
    Session::open(store, password.as_bytes())
}

/// Get the master password.
///
/// Checks `PWVAULT_PASSWORD` first (scripting), then prompts without echo.
/// Returns `Zeroizing<String>` so the password is wiped from memory on drop.
pub fn prompt_password() -> Result<Zeroizing<String>> {
    if let Some(pw) = password_from_env() {
        return Ok(pw);
    }

    let pw = dialoguer::Password::new()
        .with_prompt("Enter master password")
        .allow_empty_password(true)
        .interact()
        .map_err(|e| VaultError::CommandFailed(format!("password prompt: {e}")))?;
    Ok(Zeroizing::new(pw))
}

/// Prompt for a new master password with confirmation.
///
/// There is no stored verifier, so a typo here would lock every later
/// entry behind a password the user does not know.
pub fn prompt_new_password() -> Result<Zeroizing<String>> {
    if let Some(pw) = password_from_env() {
        return Ok(pw);
    }

    let password = dialoguer::Password::new()
        .with_prompt("Choose master password")
        .with_confirmation(
            "Confirm master password",
            "Passwords do not match, try again",
        )
        .allow_empty_password(true)
        .interact()
        .map_err(|e| VaultError::CommandFailed(format!("password prompt: {e}")))?;

    if password.is_empty() {
        output::warning("Empty master password — anyone with the vault file can read it.");
    }
    Ok(Zeroizing::new(password))
}

fn password_from_env() -> Option<Zeroizing<String>> {
    std::env::var(PASSWORD_ENV)
        .ok()
        .filter(|pw| !pw.is_empty())
        .map(Zeroizing::new)
}
