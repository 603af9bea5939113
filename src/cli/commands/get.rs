//! `pwvault get` — print a single entry's secret.

use crate::cli::{open_store, unlock, Cli};
use crate::errors::Result;

/// Execute the `get` command.
pub fn execute(cli: &Cli, id: i64) -> Result<()> {
    let (store, outcome) = open_store(cli)?;
    let session = unlock(&store, outcome)?;

    // Decrypt and print the secret to stdout, nothing else, so it pipes.
    let secret = session.reveal(id)?;
    println!("{}", secret.as_str());

    Ok(())
}
