//! Colored terminal output helpers.
//!
//! All user-facing output goes through these functions so we get
//! consistent styling across every command and the interactive shell.

use comfy_table::{ContentArrangement, Table};
use console::style;

use crate::vault::{EntrySummary, RevealedEntry};

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Print a green success message: "check_mark {msg}"
pub fn success(msg: &str) {
    println!("{} {}", style("\u{2713}").green().bold(), msg);
}

/// Print a red error message: "x_mark {msg}"
pub fn error(msg: &str) {
    eprintln!("{} {}", style("\u{2717}").red().bold(), msg);
}

/// Print a yellow warning: "warning_sign {msg}"
pub fn warning(msg: &str) {
    eprintln!("{} {}", style("\u{26a0}").yellow().bold(), msg);
}

/// Print a blue info message: "info_sign {msg}"
pub fn info(msg: &str) {
    println!("{} {}", style("\u{2139}").blue().bold(), msg);
}

/// Print a dim tip/hint: "arrow {msg}"
pub fn tip(msg: &str) {
    println!("{} {}", style("\u{2192}").dim(), style(msg).dim());
}

/// Build the listing table (ID, Name, Username, Created).
///
/// Takes summaries only, so there is no secret to print even by mistake.
pub fn entries_table(entries: &[EntrySummary]) -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["ID", "Name", "Username", "Created (UTC)"]);

    for e in entries {
        table.add_row(vec![
            e.id.to_string(),
            e.name.clone(),
            e.username.clone().unwrap_or_else(|| "-".to_string()),
            e.created_at.format(TIME_FORMAT).to_string(),
        ]);
    }

    table
}

/// Print the listing table, or a hint when the vault is empty.
pub fn print_entries_table(entries: &[EntrySummary]) {
    if entries.is_empty() {
        info("No entries yet.");
        tip("Run `pwvault add --name <NAME>` or choose \"Add entry\" in the shell.");
        return;
    }

    println!("{}", entries_table(entries));
}

/// Print one entry with its decrypted secret.
pub fn print_entry(entry: &RevealedEntry) {
    println!("{}", style("----- Entry -----").bold());
    println!("ID: {}", entry.id);
    println!("Name: {}", entry.name);
    println!("Username: {}", entry.username.as_deref().unwrap_or("-"));
    println!("Password: {}", entry.secret.as_str());
    println!("Notes: {}", entry.notes.as_deref().unwrap_or(""));
    println!("Created (UTC): {}", entry.created_at.format(TIME_FORMAT));
    println!("{}", style("-----------------").bold());
}
