//! An unlocked vault: the derived key plus the store it applies to.
//!
//! `Session::open` reads the stored salt and iteration count, runs the
//! key derivation, and wraps the result in a `Cipher`.  No password
//! verifier is stored, so opening with the wrong password succeeds; the
//! mistake surfaces as `DecryptionFailed` on the first `reveal`.

use tracing::{debug, warn};
use zeroize::{Zeroize, Zeroizing};

use super::entry::{validate_name, Entry, EntrySummary, RevealedEntry};
use super::store::EntryStore;
use crate::crypto::{derive_key, Cipher, VaultKey};
use crate::errors::{Result, VaultError};

/// Capability object for one successful unlock.
///
/// Borrows the store; owns the cipher (and through it, the key, which is
/// zeroized when the session is dropped).
pub struct Session<'a> {
    store: &'a EntryStore,
    cipher: Cipher,
}

impl<'a> Session<'a> {
    /// Derive the vault key for `password` and build the session.
    ///
    /// Fails with `NotInitialized` if the store has no meta row.
    pub fn open(store: &'a EntryStore, password: &[u8]) -> Result<Self> {
        let meta = store.read_meta()?;

        let mut key_bytes = derive_key(password, &meta.salt, meta.iterations)?;
        let key = VaultKey::new(key_bytes);
        key_bytes.zeroize();

        debug!(iterations = meta.iterations, "derived vault key");
        Ok(Self {
            store,
            cipher: Cipher::new(key),
        })
    }

    /// Encrypt `secret_plain` and store a new entry. Returns its id.
    pub fn add_entry(
        &self,
        name: &str,
        username: Option<&str>,
        secret_plain: &str,
        notes: Option<&str>,
    ) -> Result<i64> {
        // Fail before spending an encryption on a row that will be refused.
        validate_name(name)?;

        let ciphertext = self.cipher.encrypt(secret_plain.as_bytes())?;
        self.store.add(name, username, &ciphertext, notes)
    }

    /// Decrypt and return the secret of entry `id`.
    pub fn reveal(&self, id: i64) -> Result<Zeroizing<String>> {
        let entry = self.store.get(id)?;
        self.decrypt_secret(&entry)
    }

    /// Fetch entry `id` with its secret decrypted.
    pub fn open_entry(&self, id: i64) -> Result<RevealedEntry> {
        let entry = self.store.get(id)?;
        let secret = self.decrypt_secret(&entry)?;
        Ok(RevealedEntry {
            id: entry.id,
            name: entry.name,
            username: entry.username,
            secret,
            notes: entry.notes,
            created_at: entry.created_at,
        })
    }

    /// List entries without touching any secret.
    pub fn list(&self) -> Result<Vec<EntrySummary>> {
        self.store.list()
    }

    /// Delete entry `id`.
    pub fn delete(&self, id: i64) -> Result<()> {
        self.store.delete(id)
    }

    fn decrypt_secret(&self, entry: &Entry) -> Result<Zeroizing<String>> {
        let plaintext = self.cipher.decrypt(&entry.secret_ciphertext).map_err(|e| {
            warn!(entry_id = entry.id, "could not decrypt entry secret");
            e
        })?;

        String::from_utf8(plaintext).map(Zeroizing::new).map_err(|e| {
            let mut bad_bytes = e.into_bytes();
            bad_bytes.zeroize();
            warn!(entry_id = entry.id, "decrypted secret is not valid UTF-8");
            VaultError::DecryptionFailed
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FAST: u32 = 1_000;

    fn store() -> EntryStore {
        let store = EntryStore::open_in_memory().unwrap();
        store.init_with_iterations(FAST).unwrap();
        store
    }

    #[test]
    fn open_without_init_fails_fast() {
        let store = EntryStore::open_in_memory().unwrap();
        assert!(matches!(
            Session::open(&store, b"pw"),
            Err(VaultError::NotInitialized)
        ));
    }

    #[test]
    fn add_and_reveal() {
        let store = store();
        let session = Session::open(&store, b"correct-horse").unwrap();
        let id = session
            .add_entry("Email", Some("a@b.com"), "hunter2", None)
            .unwrap();
        assert_eq!(session.reveal(id).unwrap().as_str(), "hunter2");
    }

    #[test]
    fn stored_secret_is_not_plaintext() {
        let store = store();
        let session = Session::open(&store, b"pw").unwrap();
        let id = session.add_entry("Email", None, "hunter2", None).unwrap();

        let raw = store.get(id).unwrap().secret_ciphertext;
        assert!(!raw.windows(7).any(|w| w == b"hunter2"));
    }

    #[test]
    fn wrong_password_opens_but_cannot_reveal() {
        let store = store();
        let id = Session::open(&store, b"correct-horse")
            .unwrap()
            .add_entry("Email", None, "hunter2", None)
            .unwrap();

        let wrong = Session::open(&store, b"wrong-pass").unwrap();
        assert!(matches!(wrong.reveal(id), Err(VaultError::DecryptionFailed)));
    }

    #[test]
    fn empty_name_rejected_before_storing() {
        let store = store();
        let session = Session::open(&store, b"pw").unwrap();
        assert!(matches!(
            session.add_entry(" ", None, "x", None),
            Err(VaultError::Validation(_))
        ));
        assert_eq!(store.count().unwrap(), 0);
    }

    #[test]
    fn open_entry_returns_all_fields() {
        let store = store();
        let session = Session::open(&store, b"pw").unwrap();
        let id = session
            .add_entry("Bank", Some("me"), "s3cret", Some("pin in drawer"))
            .unwrap();

        let entry = session.open_entry(id).unwrap();
        assert_eq!(entry.name, "Bank");
        assert_eq!(entry.username.as_deref(), Some("me"));
        assert_eq!(entry.secret.as_str(), "s3cret");
        assert_eq!(entry.notes.as_deref(), Some("pin in drawer"));
    }

    #[test]
    fn reveal_unknown_id_is_not_found() {
        let store = store();
        let session = Session::open(&store, b"pw").unwrap();
        assert!(matches!(session.reveal(7), Err(VaultError::NotFound(7))));
    }

    #[test]
    fn non_utf8_plaintext_is_a_decryption_failure() {
        let store = store();
        let session = Session::open(&store, b"pw").unwrap();
        let ct = session.cipher.encrypt(&[0xFF, 0xFE, 0xFD]).unwrap();
        let id = store.add("Binary", None, &ct, None).unwrap();
        assert!(matches!(session.reveal(id), Err(VaultError::DecryptionFailed)));
    }
}
