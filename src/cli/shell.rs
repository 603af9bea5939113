//! Interactive menu.
//!
//! Each menu line is parsed once into a `ShellCommand` and dispatched
//! with an exhaustive match.  Recoverable errors are reported and the
//! loop continues; storage and I/O failures end the shell.

use std::str::FromStr;

use console::style;
use dialoguer::{Confirm, Input};

use crate::cli::{output, prompt_password, unlock};
use crate::errors::{Result, VaultError};
use crate::vault::entry::validate_name;
use crate::vault::{EntryStore, InitOutcome, Session};

/// One menu choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellCommand {
    Add,
    Get,
    List,
    Delete,
    Quit,
}

impl ShellCommand {
    /// Menu order; the displayed number is the index + 1.
    pub const ALL: [ShellCommand; 5] = [
        ShellCommand::Add,
        ShellCommand::Get,
        ShellCommand::List,
        ShellCommand::Delete,
        ShellCommand::Quit,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ShellCommand::Add => "Add entry",
            ShellCommand::Get => "Get entry (by id)",
            ShellCommand::List => "List entries",
            ShellCommand::Delete => "Delete entry (by id)",
            ShellCommand::Quit => "Quit",
        }
    }
}

impl FromStr for ShellCommand {
    type Err = VaultError;

    /// Accepts the menu number or the command word, case-insensitive.
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "1" | "a" | "add" => Ok(ShellCommand::Add),
            "2" | "g" | "get" => Ok(ShellCommand::Get),
            "3" | "l" | "ls" | "list" => Ok(ShellCommand::List),
            "4" | "d" | "del" | "delete" => Ok(ShellCommand::Delete),
            "5" | "q" | "quit" | "exit" => Ok(ShellCommand::Quit),
            other => Err(VaultError::Validation(format!("unknown option '{other}'"))),
        }
    }
}

/// Parse an entry id typed at a prompt.
pub fn parse_id(input: &str) -> Result<i64> {
    input
        .trim()
        .parse::<i64>()
        .map_err(|_| VaultError::Validation("Invalid id.".into()))
}

/// Run the menu loop until the user quits.
pub fn run(store: &EntryStore, outcome: InitOutcome) -> Result<()> {
    println!("{}", style("pwvault — local password vault").bold());

    let mut session = unlock(store, outcome)?;

    loop {
        print_menu();
        let line = read_line("> ")?;

        let command = match line.parse::<ShellCommand>() {
            Ok(command) => command,
            Err(_) => {
                output::warning("Unknown option.");
                continue;
            }
        };

        if command == ShellCommand::Quit {
            output::info("Goodbye.");
            return Ok(());
        }

        match dispatch(&session, command) {
            Ok(()) => {}
            Err(VaultError::DecryptionFailed) => {
                output::error(&VaultError::DecryptionFailed.to_string());
                output::tip("The master password is most likely wrong; the entry may also be corrupted.");
                if confirm("Re-enter master password?", false)? {
                    let password = prompt_password()?;
                    session = Session::open(store, password.as_bytes())?;
                    output::info("Vault unlocked with the new password.");
                }
            }
            Err(e) if e.is_recoverable() => output::error(&e.to_string()),
            Err(e) => return Err(e),
        }
    }
}

fn dispatch(session: &Session<'_>, command: ShellCommand) -> Result<()> {
    match command {
        ShellCommand::Add => add(session),
        ShellCommand::Get => {
            let id = parse_id(&read_line("Entry ID")?)?;
            let entry = session.open_entry(id)?;
            output::print_entry(&entry);
            Ok(())
        }
        ShellCommand::List => {
            output::print_entries_table(&session.list()?);
            Ok(())
        }
        ShellCommand::Delete => {
            let id = parse_id(&read_line("Entry ID to delete")?)?;
            if confirm(&format!("Delete entry {id}?"), false)? {
                session.delete(id)?;
                output::success(&format!("Entry {id} deleted."));
            } else {
                output::info("Cancelled.");
            }
            Ok(())
        }
        ShellCommand::Quit => Ok(()),
    }
}

fn add(session: &Session<'_>) -> Result<()> {
    let name = read_line("Name (e.g. 'Gmail')")?;
    validate_name(&name)?;

    let username = read_line("Username/email (optional)")?;
    let secret = zeroize::Zeroizing::new(
        dialoguer::Password::new()
            .with_prompt("Password (will not be shown)")
            .allow_empty_password(true)
            .interact()
            .map_err(|e| VaultError::CommandFailed(format!("input prompt: {e}")))?,
    );
    let notes = read_line("Notes (optional)")?;

    let id = session.add_entry(&name, Some(username.as_str()), &secret, Some(notes.as_str()))?;
    output::success(&format!("Entry '{}' saved with id {id}.", name.trim()));
    Ok(())
}

fn print_menu() {
    println!();
    println!("Choose an action:");
    for (i, command) in ShellCommand::ALL.iter().enumerate() {
        println!("{}) {}", i + 1, command.label());
    }
}

fn read_line(prompt: &str) -> Result<String> {
    Input::<String>::new()
        .with_prompt(prompt)
        .allow_empty(true)
        .interact_text()
        .map(|s| s.trim().to_string())
        .map_err(|e| VaultError::CommandFailed(format!("input prompt: {e}")))
}

fn confirm(prompt: &str, default: bool) -> Result<bool> {
    Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()
        .map_err(|e| VaultError::CommandFailed(format!("confirm prompt: {e}")))
}
