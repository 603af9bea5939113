//! SQLite-backed entry store.
//!
//! One vault is one database file with two tables:
//!
//! ```text
//! meta    (id = 1, salt BLOB, kdf_iterations INTEGER)
//! entries (id AUTOINCREMENT, name, username, password BLOB, notes, created_at)
//! ```
//!
//! The `password` column holds the encrypted secret; the store never sees
//! plaintext.  `AUTOINCREMENT` keeps deleted ids retired for good.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDateTime, Utc};
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Row};
use tracing::{debug, info, warn};

use super::entry::{non_blank, validate_name, Entry, EntrySummary};
use crate::crypto::kdf::{generate_salt, DEFAULT_KDF_ITERATIONS};
use crate::errors::{Result, VaultError};

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS meta (
        id             INTEGER PRIMARY KEY CHECK(id=1),
        salt           BLOB,
        kdf_iterations INTEGER
    );
    CREATE TABLE IF NOT EXISTS entries (
        id         INTEGER PRIMARY KEY AUTOINCREMENT,
        name       TEXT NOT NULL,
        username   TEXT,
        password   BLOB NOT NULL,
        notes      TEXT,
        created_at TEXT NOT NULL
    );";

/// Result of `EntryStore::init`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitOutcome {
    /// The meta row was written just now with a fresh salt.
    Created,
    /// The vault already had its meta row; nothing changed.
    Existing,
}

/// Key-derivation parameters stored once per vault.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VaultMeta {
    pub salt: Vec<u8>,
    pub iterations: u32,
}

/// Handle on one vault database file.
pub struct EntryStore {
    conn: Connection,
    path: Option<PathBuf>,
}

impl EntryStore {
    // ------------------------------------------------------------------
    // Construction
    // ------------------------------------------------------------------

    /// Open (or create) the vault database at `path`.
    ///
    /// Missing parent directories are created. On Unix the file is
    /// restricted to owner read/write.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(path, fs::Permissions::from_mode(0o600))?;
        }

        debug!(path = %path.display(), "opened vault database");
        Ok(Self {
            conn,
            path: Some(path.to_path_buf()),
        })
    }

    /// Open a throwaway in-memory vault (tests and dry runs).
    pub fn open_in_memory() -> Result<Self> {
        Ok(Self {
            conn: Connection::open_in_memory()?,
            path: None,
        })
    }

    /// Create the tables and the meta row with the default iteration count.
    pub fn init(&self) -> Result<InitOutcome> {
        self.init_with_iterations(DEFAULT_KDF_ITERATIONS)
    }

    /// Create the tables if absent and write the meta row if none exists.
    ///
    /// Idempotent: an existing meta row is never touched, so a second
    /// call cannot orphan entries by replacing the salt. `iterations` only
    /// matters for a brand-new vault.
    pub fn init_with_iterations(&self, iterations: u32) -> Result<InitOutcome> {
        if iterations < 1 {
            return Err(VaultError::Validation(
                "kdf iterations must be at least 1".into(),
            ));
        }

        self.conn.execute_batch(SCHEMA)?;

        let salt = generate_salt();
        let inserted = self.conn.execute(
            "INSERT OR IGNORE INTO meta (id, salt, kdf_iterations) VALUES (1, ?1, ?2)",
            params![&salt[..], iterations],
        )?;

        if inserted == 1 {
            info!(iterations, "initialized new vault metadata");
            Ok(InitOutcome::Created)
        } else {
            debug!("vault metadata already present");
            Ok(InitOutcome::Existing)
        }
    }

    // ------------------------------------------------------------------
    // Meta
    // ------------------------------------------------------------------

    /// Read the salt and iteration count.
    ///
    /// Fails with `NotInitialized` when `init` never ran on this file or
    /// the meta row is unusable.
    pub fn read_meta(&self) -> Result<VaultMeta> {
        let has_table: bool = self.conn.query_row(
            "SELECT EXISTS (SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'meta')",
            [],
            |row| row.get(0),
        )?;
        if !has_table {
            return Err(VaultError::NotInitialized);
        }

        let row = self
            .conn
            .query_row(
                "SELECT salt, kdf_iterations FROM meta WHERE id = 1",
                [],
                |row| {
                    Ok((
                        row.get::<_, Option<Vec<u8>>>(0)?,
                        row.get::<_, Option<i64>>(1)?,
                    ))
                },
            )
            .optional()?;

        match row {
            Some((Some(salt), Some(iterations))) if !salt.is_empty() => {
                match u32::try_from(iterations) {
                    Ok(iterations) if iterations >= 1 => Ok(VaultMeta { salt, iterations }),
                    _ => {
                        warn!(iterations, "vault metadata has an unusable iteration count");
                        Err(VaultError::NotInitialized)
                    }
                }
            }
            Some(_) => {
                warn!("vault metadata row is incomplete");
                Err(VaultError::NotInitialized)
            }
            None => Err(VaultError::NotInitialized),
        }
    }

    // ------------------------------------------------------------------
    // Entry operations
    // ------------------------------------------------------------------

    /// Insert a new entry and return its id.
    ///
    /// Blank `username` and `notes` are stored as NULL.
    pub fn add(
        &self,
        name: &str,
        username: Option<&str>,
        secret_ciphertext: &[u8],
        notes: Option<&str>,
    ) -> Result<i64> {
        validate_name(name)?;

        let created_at = Utc::now().to_rfc3339();
        self.conn.execute(
            "INSERT INTO entries (name, username, password, notes, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                name,
                non_blank(username),
                secret_ciphertext,
                non_blank(notes),
                created_at
            ],
        )?;

        let id = self.conn.last_insert_rowid();
        debug!(entry_id = id, "inserted entry");
        Ok(id)
    }

    /// Fetch a full entry, secret still encrypted.
    pub fn get(&self, id: i64) -> Result<Entry> {
        self.conn
            .query_row(
                "SELECT id, name, username, password, notes, created_at
                 FROM entries WHERE id = ?1",
                params![id],
                |row| {
                    Ok(Entry {
                        id: row.get(0)?,
                        name: row.get(1)?,
                        username: row.get(2)?,
                        secret_ciphertext: row.get(3)?,
                        notes: row.get(4)?,
                        created_at: timestamp_column(row, 5)?,
                    })
                },
            )
            .optional()?
            .ok_or(VaultError::NotFound(id))
    }

    /// List every entry in ascending id order, without secrets.
    pub fn list(&self) -> Result<Vec<EntrySummary>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, username, created_at FROM entries ORDER BY id")?;

        let rows = stmt.query_map([], |row| {
            Ok(EntrySummary {
                id: row.get(0)?,
                name: row.get(1)?,
                username: row.get(2)?,
                created_at: timestamp_column(row, 3)?,
            })
        })?;

        let mut entries = Vec::new();
        for row in rows {
            entries.push(row?);
        }
        Ok(entries)
    }

    /// Remove an entry. Its id is never handed out again.
    pub fn delete(&self, id: i64) -> Result<()> {
        let removed = self
            .conn
            .execute("DELETE FROM entries WHERE id = ?1", params![id])?;
        if removed == 0 {
            return Err(VaultError::NotFound(id));
        }
        debug!(entry_id = id, "deleted entry");
        Ok(())
    }

    /// Number of entries in the vault.
    pub fn count(&self) -> Result<usize> {
        let n: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM entries", [], |row| row.get(0))?;
        Ok(usize::try_from(n).unwrap_or(0))
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// Path of the database file, or `None` for an in-memory vault.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

/// Read a `created_at` column.
///
/// New rows are RFC 3339. Older vault files carry naive ISO-8601 UTC
/// timestamps without an offset, so those are accepted as UTC too.
fn timestamp_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    let raw: String = row.get(idx)?;
    parse_timestamp(&raw)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn parse_timestamp(raw: &str) -> std::result::Result<DateTime<Utc>, chrono::ParseError> {
    match DateTime::parse_from_rfc3339(raw) {
        Ok(dt) => Ok(dt.with_timezone(&Utc)),
        Err(_) => NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f").map(|n| n.and_utc()),
    }
}
