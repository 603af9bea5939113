use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::crypto::kdf::DEFAULT_KDF_ITERATIONS;
use crate::errors::{Result, VaultError};

/// Project-level configuration, loaded from `.pwvault.toml`.
///
/// Every field has a sensible default so pwvault works out-of-the-box
/// without any config file at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Vault database file (relative paths resolve against the project dir).
    #[serde(default = "default_vault_path")]
    pub vault_path: String,

    /// PBKDF2 iteration count written into newly created vaults.
    ///
    /// Existing vaults keep the count stored in their meta row.
    #[serde(default = "default_kdf_iterations")]
    pub kdf_iterations: u32,
}

// ── Serde default helpers ────────────────────────────────────────────

fn default_vault_path() -> String {
    "vault.db".to_string()
}

fn default_kdf_iterations() -> u32 {
    DEFAULT_KDF_ITERATIONS
}

// ── Implementation ───────────────────────────────────────────────────

impl Default for Settings {
    fn default() -> Self {
        Self {
            vault_path: default_vault_path(),
            kdf_iterations: default_kdf_iterations(),
        }
    }
}

impl Settings {
    /// Name of the config file we look for in the project root.
    const FILE_NAME: &'static str = ".pwvault.toml";

    /// Load settings from `<project_dir>/.pwvault.toml`.
    ///
    /// If the file does not exist, defaults are returned.
    /// If the file exists but cannot be parsed, an error is returned.
    pub fn load(project_dir: &Path) -> Result<Self> {
        let config_path = project_dir.join(Self::FILE_NAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)?;

        let settings: Settings = toml::from_str(&contents).map_err(|e| {
            VaultError::ConfigError(format!("Failed to parse {}: {e}", config_path.display()))
        })?;

        if settings.kdf_iterations < 1 {
            return Err(VaultError::ConfigError(format!(
                "kdf_iterations in {} must be at least 1",
                config_path.display()
            )));
        }
        if settings.kdf_iterations < DEFAULT_KDF_ITERATIONS {
            tracing::warn!(
                kdf_iterations = settings.kdf_iterations,
                "configured PBKDF2 iteration count is below the recommended default"
            );
        }

        Ok(settings)
    }

    /// Resolve the vault file path against `project_dir`.
    ///
    /// An explicit `override_path` (from `--vault`) wins over the config.
    pub fn vault_path(&self, project_dir: &Path, override_path: Option<&Path>) -> PathBuf {
        match override_path {
            Some(p) => project_dir.join(p),
            None => project_dir.join(&self.vault_path),
        }
    }
}

// ── Tests ────────────────────────────────────────────────────────────
