//! Zeroizing holder for the key derived from the master password.

use zeroize::{Zeroize, ZeroizeOnDrop};

use super::kdf::KEY_LEN;

/// A 32-byte vault key that wipes its memory when dropped.
///
/// The key lives only as long as the unlocked session that owns it.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct VaultKey {
    bytes: [u8; KEY_LEN],
}

impl VaultKey {
    /// Wrap raw key bytes. The caller should zeroize its own copy.
    pub fn new(bytes: [u8; KEY_LEN]) -> Self {
        Self { bytes }
    }

    /// Access the raw key bytes (e.g. to build the AEAD cipher).
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.bytes
    }
}

impl std::fmt::Debug for VaultKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("VaultKey(<redacted>)")
    }
}
