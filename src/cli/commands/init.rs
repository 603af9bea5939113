//! `pwvault init` — create the vault file and choose the master password.

use crate::cli::output;
use crate::cli::{open_store, unlock, Cli};
use crate::errors::Result;
use crate::vault::InitOutcome;

/// Execute the `init` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let (store, outcome) = open_store(cli)?;

    if outcome == InitOutcome::Existing {
        output::info("Vault already initialized — its salt and iterations are unchanged.");
        return Ok(());
    }

    // Prompt (with confirmation) so the user has typed the password at
    // least twice before any entry depends on it.
    let _session = unlock(&store, outcome)?;

    output::success("Vault ready.");
    output::tip("Run `pwvault add --name <NAME>` to add your first entry.");
    Ok(())
}
