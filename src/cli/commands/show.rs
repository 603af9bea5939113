//! `pwvault show` — print an entry card with every field.

use crate::cli::output;
use crate::cli::{open_store, unlock, Cli};
use crate::errors::Result;

/// Execute the `show` command.
pub fn execute(cli: &Cli, id: i64) -> Result<()> {
    let (store, outcome) = open_store(cli)?;
    let session = unlock(&store, outcome)?;

    let entry = session.open_entry(id)?;
    output::print_entry(&entry);

    Ok(())
}
