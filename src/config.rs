use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::composer::DEFAULT_MAX_REPETITIONS;
use crate::error::{ConfigError, VaultError};
use crate::grammar::Locale;
use crate::vault::Vault;

/// File name looked up under the user's config directory.
pub const CONFIG_FILE: &str = "speechkeys/config.toml";

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Config {
    /// Active recognition language.
    #[serde(default)]
    pub locale: Locale,
    /// Overrides `~/speechpass`.
    #[serde(default)]
    pub vault_dir: Option<PathBuf>,
    /// Most vim commands accepted in one utterance.
    #[serde(default = "default_max_repetitions")]
    pub max_repetitions: usize,
    /// Directory holding `<locale>.toml` phrase catalogs.
    #[serde(default)]
    pub translations_dir: Option<PathBuf>,
    #[serde(default)]
    pub ssh: SshConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: Locale::default(),
            vault_dir: None,
            max_repetitions: default_max_repetitions(),
            translations_dir: None,
            ssh: SshConfig::default(),
        }
    }
}

// ============================================================================
// SSH Config
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct SshConfig {
    /// User name substituted for the spoken "me".
    #[serde(default)]
    pub user: Option<String>,
    /// Spoken server name to host name.
    #[serde(default)]
    pub hosts: BTreeMap<String, String>,
}

fn default_max_repetitions() -> usize {
    DEFAULT_MAX_REPETITIONS
}

impl Config {
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_FILE))
    }

    /// Load the user's config file, falling back to defaults when it does
    /// not exist.
    pub fn load() -> Result<Self, ConfigError> {
        match Self::default_path() {
            Some(path) if path.exists() => Self::from_path(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// The vault this configuration points at.
    pub fn vault(&self) -> Result<Vault, VaultError> {
        match &self.vault_dir {
            Some(dir) => Ok(Vault::new(dir)),
            None => Vault::open_default(),
        }
    }
}
