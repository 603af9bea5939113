//! Password-based key derivation using PBKDF2-HMAC-SHA256.
//!
//! The iteration count is stored in the vault's meta row next to the
//! salt, so the exact same parameters are used on every unlock even if
//! `DEFAULT_KDF_ITERATIONS` is raised later.

use rand::RngCore;
use sha2::Sha256;

use crate::errors::{Result, VaultError};

/// Length of the per-vault salt in bytes (128 bits).
pub const SALT_LEN: usize = 16;

/// Length of the derived key in bytes (256 bits, for AES-256).
pub const KEY_LEN: usize = 32;

/// Iteration count written into new vaults.
pub const DEFAULT_KDF_ITERATIONS: u32 = 390_000;

/// Derive a 32-byte key from a master password and salt.
///
/// The same password + salt + iterations always produce the same key.
/// An empty password is accepted; choosing one is up to the user.
pub fn derive_key(password: &[u8], salt: &[u8], iterations: u32) -> Result<[u8; KEY_LEN]> {
    if iterations < 1 {
        return Err(VaultError::KeyDerivationFailed(
            "PBKDF2 iterations must be at least 1".into(),
        ));
    }
    if salt.is_empty() {
        return Err(VaultError::KeyDerivationFailed(
            "salt must not be empty".into(),
        ));
    }

    let mut key = [0u8; KEY_LEN];
    pbkdf2::pbkdf2_hmac::<Sha256>(password, salt, iterations, &mut key);
    Ok(key)
}

/// Generate a cryptographically random 16-byte salt.
pub fn generate_salt() -> [u8; SALT_LEN] {
    let mut salt = [0u8; SALT_LEN];
    rand::rng().fill_bytes(&mut salt);
    salt
}

#[cfg(test)]
mod tests {
    use super::*;

    const FAST: u32 = 1_000;

    #[test]
    fn same_inputs_same_key() {
        let salt = [7u8; SALT_LEN];
        let a = derive_key(b"correct-horse", &salt, FAST).unwrap();
        let b = derive_key(b"correct-horse", &salt, FAST).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn iteration_count_changes_the_key() {
        let salt = [7u8; SALT_LEN];
        let a = derive_key(b"pw", &salt, FAST).unwrap();
        let b = derive_key(b"pw", &salt, FAST + 1).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn empty_password_is_allowed() {
        let salt = generate_salt();
        assert!(derive_key(b"", &salt, FAST).is_ok());
    }

    #[test]
    fn zero_iterations_rejected() {
        let salt = generate_salt();
        let result = derive_key(b"pw", &salt, 0);
        assert!(matches!(result, Err(VaultError::KeyDerivationFailed(_))));
    }

    #[test]
    fn empty_salt_rejected() {
        assert!(derive_key(b"pw", &[], FAST).is_err());
    }

    #[test]
    fn rfc_style_vector() {
        // PBKDF2-HMAC-SHA256("password", "salt", 1, 32)
        let key = derive_key(b"password", b"salt", 1).unwrap();
        assert_eq!(
            key[..4],
            [0x12, 0x0f, 0xb6, 0xcf],
            "first bytes of the well-known test vector"
        );
    }

    #[test]
    fn salts_are_random() {
        assert_ne!(generate_salt(), generate_salt());
    }
}
