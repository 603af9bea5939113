//! One-shot subcommands. Each opens the vault, does one thing, and exits.

pub mod add;
pub mod delete;
pub mod get;
pub mod init;
pub mod list;
pub mod shell;
pub mod show;
