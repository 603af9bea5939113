//! `pwvault list` — display all entries in a table.

use crate::cli::output;
use crate::cli::{open_store, Cli};
use crate::errors::Result;

/// Execute the `list` command.
///
/// Listing reads no secret column, so no master password is needed.
pub fn execute(cli: &Cli) -> Result<()> {
    let (store, _) = open_store(cli)?;

    let entries = store.list()?;
    let n = entries.len();
    output::info(&format!("{n} entr{}", if n == 1 { "y" } else { "ies" }));
    output::print_entries_table(&entries);

    Ok(())
}
