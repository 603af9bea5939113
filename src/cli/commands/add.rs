//! `pwvault add` — encrypt and store a new entry.

use std::io::{self, IsTerminal, Read};

use zeroize::Zeroizing;

use crate::cli::output;
use crate::cli::{open_store, unlock, Cli};
use crate::errors::{Result, VaultError};
use crate::vault::entry::validate_name;

/// Execute the `add` command.
pub fn execute(
    cli: &Cli,
    name: &str,
    username: Option<&str>,
    notes: Option<&str>,
    secret: Option<&str>,
) -> Result<()> {
    validate_name(name)?;

    let (store, outcome) = open_store(cli)?;
    let session = unlock(&store, outcome)?;

    // Determine the secret value from one of three sources.
    let secret_value = if let Some(v) = secret {
        // Source 1: Inline value on the command line.
        output::warning("Secret provided on command line — it may appear in shell history.");
        Zeroizing::new(v.to_string())
    } else if !io::stdin().is_terminal() {
        // Source 2: Piped input (stdin is not a terminal).
        let mut buf = Zeroizing::new(String::new());
        io::stdin().read_to_string(&mut buf)?;
        Zeroizing::new(buf.trim_end_matches(['\r', '\n']).to_string())
    } else {
        // Source 3: Interactive hidden prompt (default).
        Zeroizing::new(
            dialoguer::Password::new()
                .with_prompt(format!("Password for {name}"))
                .allow_empty_password(true)
                .interact()
                .map_err(|e| VaultError::CommandFailed(format!("input prompt: {e}")))?,
        )
    };

    let id = session.add_entry(name, username, &secret_value, notes)?;

    output::success(&format!(
        "Entry '{name}' saved with id {id} ({} total)",
        store.count()?
    ));
    Ok(())
}
