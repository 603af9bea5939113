//! Vault module — encrypted entry storage.
//!
//! This module provides:
//! - `Entry`, `EntrySummary`, and `RevealedEntry` types (`entry`)
//! - The SQLite-backed `EntryStore` with the meta and entries tables (`store`)
//! - The unlocked `Session` that encrypts and decrypts secrets (`session`)

pub mod entry;
pub mod session;
pub mod store;

// Re-export the most commonly used items.
pub use entry::{Entry, EntrySummary, RevealedEntry};
pub use session::Session;
pub use store::{EntryStore, InitOutcome, VaultMeta};
