//! Integration tests for the pwvault crypto module.

use pwvault::crypto::{derive_key, generate_salt, Cipher, VaultKey};
use pwvault::errors::VaultError;

/// Low iteration count so the suite stays fast in debug builds.
const FAST: u32 = 1_000;

fn cipher_for(password: &[u8], salt: &[u8]) -> Cipher {
    Cipher::new(VaultKey::new(derive_key(password, salt, FAST).expect("derive")))
}

// ---------------------------------------------------------------------------
// Encryption round-trip
// ---------------------------------------------------------------------------

#[test]
fn encrypt_decrypt_roundtrip() {
    let cipher = Cipher::new(VaultKey::new([0xABu8; 32]));
    let plaintext = b"correct horse battery staple";

    let ciphertext = cipher.encrypt(plaintext).expect("encrypt should succeed");

    // Ciphertext must be longer than plaintext (12-byte nonce + 16-byte tag).
    assert!(ciphertext.len() > plaintext.len());

    let recovered = cipher.decrypt(&ciphertext).expect("decrypt should succeed");
    assert_eq!(recovered, plaintext);
}

#[test]
fn encrypt_produces_different_ciphertext_each_time() {
    let cipher = Cipher::new(VaultKey::new([0xCDu8; 32]));

    let ct1 = cipher.encrypt(b"hunter2").expect("encrypt 1");
    let ct2 = cipher.encrypt(b"hunter2").expect("encrypt 2");

    // Each call draws a new random nonce, so the outputs must differ.
    assert_ne!(ct1, ct2, "two encryptions of the same plaintext must differ");
}

#[test]
fn decrypt_with_wrong_password_fails() {
    let salt = generate_salt();
    let right = cipher_for(b"correct-horse", &salt);
    let wrong = cipher_for(b"wrong-pass", &salt);

    let ciphertext = right.encrypt(b"hunter2").expect("encrypt");
    let result = wrong.decrypt(&ciphertext);

    assert!(
        matches!(result, Err(VaultError::DecryptionFailed)),
        "decryption under a different key must fail"
    );
}

#[test]
fn decrypt_with_truncated_data_fails() {
    let cipher = Cipher::new(VaultKey::new([0xAAu8; 32]));
    assert!(cipher.decrypt(&[0u8; 5]).is_err(), "truncated ciphertext must fail");
}

#[test]
fn decrypt_with_corrupted_ciphertext_fails() {
    let cipher = Cipher::new(VaultKey::new([0xBBu8; 32]));

    let mut ciphertext = cipher.encrypt(b"VALUE=abc").expect("encrypt");
    // Flip a byte in the ciphertext portion (after the 12-byte nonce).
    if let Some(byte) = ciphertext.get_mut(15) {
        *byte ^= 0xFF;
    }

    assert!(
        cipher.decrypt(&ciphertext).is_err(),
        "corrupted ciphertext must fail auth check"
    );
}

#[test]
fn decrypt_with_corrupted_tag_fails() {
    let cipher = Cipher::new(VaultKey::new([0xBBu8; 32]));

    let mut ciphertext = cipher.encrypt(b"VALUE=abc").expect("encrypt");
    if let Some(last) = ciphertext.last_mut() {
        *last ^= 0x01;
    }

    assert!(cipher.decrypt(&ciphertext).is_err());
}

// ---------------------------------------------------------------------------
// Key derivation (PBKDF2-HMAC-SHA256)
// ---------------------------------------------------------------------------

#[test]
fn derive_key_same_inputs_same_output() {
    let salt = generate_salt();

    let key1 = derive_key(b"my-secure-passphrase", &salt, FAST).expect("derive 1");
    let key2 = derive_key(b"my-secure-passphrase", &salt, FAST).expect("derive 2");

    assert_eq!(key1, key2, "same password + salt + iterations must match");
}

#[test]
fn derive_key_different_salts_different_keys() {
    let key1 = derive_key(b"same-password", &generate_salt(), FAST).expect("derive 1");
    let key2 = derive_key(b"same-password", &generate_salt(), FAST).expect("derive 2");

    assert_ne!(key1, key2, "different salts must produce different keys");
}

#[test]
fn derive_key_different_passwords_different_keys() {
    let salt = generate_salt();

    let key1 = derive_key(b"password-one", &salt, FAST).expect("derive 1");
    let key2 = derive_key(b"password-two", &salt, FAST).expect("derive 2");

    assert_ne!(key1, key2, "different passwords must produce different keys");
}

#[test]
fn derive_key_output_is_32_bytes() {
    let key = derive_key(b"pw", &generate_salt(), FAST).expect("derive");
    assert_eq!(key.len(), 32);
}

#[test]
fn derive_key_rejects_zero_iterations() {
    assert!(derive_key(b"pw", &generate_salt(), 0).is_err());
}

#[test]
fn salt_is_16_random_bytes() {
    let a = generate_salt();
    let b = generate_salt();
    assert_eq!(a.len(), 16);
    assert_ne!(a, b);
}
