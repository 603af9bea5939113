//! Entry types read from and written to the `entries` table.
//!
//! `Entry` is the stored row, with the secret still encrypted.
//! `EntrySummary` is what listings show; it has no secret field at all,
//! so a listing cannot leak ciphertext or plaintext by construction.

use chrono::{DateTime, Utc};
use zeroize::Zeroizing;

use crate::errors::{Result, VaultError};

/// A single vault entry as stored on disk.
#[derive(Clone)]
pub struct Entry {
    pub id: i64,
    pub name: String,
    pub username: Option<String>,
    /// Nonce + AES-256-GCM ciphertext + tag.
    pub secret_ciphertext: Vec<u8>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Entry {
    /// Drop everything a listing must not show.
    pub fn summary(&self) -> EntrySummary {
        EntrySummary {
            id: self.id,
            name: self.name.clone(),
            username: self.username.clone(),
            created_at: self.created_at,
        }
    }
}

impl std::fmt::Debug for Entry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Entry")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("username", &self.username)
            .field("secret_ciphertext", &"<redacted>")
            .field("notes", &self.notes)
            .field("created_at", &self.created_at)
            .finish()
    }
}

/// Lightweight listing view of an entry (no secret).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntrySummary {
    pub id: i64,
    pub name: String,
    pub username: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// An entry whose secret has been decrypted for display.
///
/// The plaintext is wiped from memory when this value is dropped.
pub struct RevealedEntry {
    pub id: i64,
    pub name: String,
    pub username: Option<String>,
    pub secret: Zeroizing<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl std::fmt::Debug for RevealedEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RevealedEntry")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("username", &self.username)
            .field("secret", &"<redacted>")
            .field("notes", &self.notes)
            .field("created_at", &self.created_at)
            .finish()
    }
}

/// Reject empty or whitespace-only entry names.
pub(crate) fn validate_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(VaultError::Validation("entry name cannot be empty".into()));
    }
    Ok(())
}

/// Map blank optional text to `None` so empty prompts store NULL.
pub(crate) fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Entry {
        Entry {
            id: 3,
            name: "Email".into(),
            username: Some("a@b.com".into()),
            secret_ciphertext: vec![0xAA; 40],
            notes: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn summary_keeps_listing_fields() {
        let e = sample();
        let s = e.summary();
        assert_eq!(s.id, 3);
        assert_eq!(s.name, "Email");
        assert_eq!(s.username.as_deref(), Some("a@b.com"));
        assert_eq!(s.created_at, e.created_at);
    }

    #[test]
    fn debug_redacts_ciphertext() {
        let shown = format!("{:?}", sample());
        assert!(shown.contains("<redacted>"));
        assert!(!shown.contains("[170"));
    }

    #[test]
    fn debug_redacts_revealed_secret() {
        let e = sample();
        let revealed = RevealedEntry {
            id: e.id,
            name: e.name,
            username: e.username,
            secret: Zeroizing::new("hunter2".into()),
            notes: e.notes,
            created_at: e.created_at,
        };
        assert!(!format!("{revealed:?}").contains("hunter2"));
    }

    #[test]
    fn blank_names_rejected() {
        assert!(validate_name("").is_err());
        assert!(validate_name("   ").is_err());
        assert!(validate_name("Email").is_ok());
    }

    #[test]
    fn blank_optionals_become_none() {
        assert_eq!(non_blank(Some("")), None);
        assert_eq!(non_blank(Some("  ")), None);
        assert_eq!(non_blank(Some("x")), Some("x"));
        assert_eq!(non_blank(None), None);
    }
}
