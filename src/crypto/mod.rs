//! Cryptographic primitives for pwvault.
//!
//! This module provides:
//! - PBKDF2-HMAC-SHA256 password-based key derivation (`kdf`)
//! - A zeroizing wrapper for the derived key (`keys`)
//! - AES-256-GCM encryption and decryption of secret fields (`cipher`)

pub mod cipher;
pub mod kdf;
pub mod keys;

// Re-export the most commonly used items so callers can write:
//   use crate::crypto::{derive_key, generate_salt, Cipher, ...};
pub use cipher::Cipher;
pub use kdf::{derive_key, generate_salt, DEFAULT_KDF_ITERATIONS, KEY_LEN, SALT_LEN};
pub use keys::VaultKey;
