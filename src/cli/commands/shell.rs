//! `pwvault shell` (and bare `pwvault`) — the interactive menu.

use crate::cli::{open_store, shell, Cli};
use crate::errors::Result;

/// Execute the `shell` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let (store, outcome) = open_store(cli)?;
    shell::run(&store, outcome)
}
