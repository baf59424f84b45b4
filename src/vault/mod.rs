//! Encrypted password vault.
//!
//! Secrets live at `<root>/<locale>/<name>`, one sealed record per file. A
//! record is created once and never rewritten; changing a secret means
//! removing it and storing it again.

mod cipher;

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use rand_core::OsRng;
use tracing::{debug, info, warn};

use crate::error::VaultError;
use crate::sequence::{KeySequence, text_to_sequence};

use self::cipher::{CipherError, TAG};
pub use self::cipher::KdfParams;

/// Directory under the home directory holding all locales.
pub const VAULT_DIR_NAME: &str = "speechpass";

/// File name for a spoken secret name. Names double as voice commands, so
/// spaces are stored as underscores.
pub fn file_name(name: &str) -> String {
    name.replace(' ', "_")
}

/// Spoken name for a record file name.
pub fn display_name(file_name: &str) -> String {
    file_name.replace('_', " ")
}

fn validate_component(component: &str) -> Result<(), VaultError> {
    let invalid = component.is_empty()
        || component == "."
        || component == ".."
        || component.contains(['/', '\\', '\0']);
    if invalid {
        Err(VaultError::InvalidName(component.to_string()))
    } else {
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct Vault {
    root: PathBuf,
    kdf: KdfParams,
}

impl Vault {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            kdf: KdfParams::default(),
        }
    }

    /// The vault at `~/speechpass`.
    pub fn open_default() -> Result<Self, VaultError> {
        let home = dirs::home_dir().ok_or(VaultError::NoHome)?;
        Ok(Self::new(home.join(VAULT_DIR_NAME)))
    }

    /// Key derivation cost used for newly stored secrets. Existing records
    /// keep the parameters they were sealed with.
    pub fn with_kdf(mut self, kdf: KdfParams) -> Self {
        self.kdf = kdf;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn locale_dir(&self, locale: &str) -> Result<PathBuf, VaultError> {
        validate_component(locale)?;
        Ok(self.root.join(locale))
    }

    pub fn record_path(&self, locale: &str, name: &str) -> Result<PathBuf, VaultError> {
        let file = file_name(name);
        validate_component(&file)?;
        Ok(self.locale_dir(locale)?.join(file))
    }

    pub fn contains(&self, locale: &str, name: &str) -> Result<bool, VaultError> {
        Ok(self.record_path(locale, name)?.exists())
    }

    /// Seal `secret` under `passphrase` as a new record.
    ///
    /// The secret must be typeable, otherwise it could never be retrieved.
    pub fn store(
        &self,
        locale: &str,
        name: &str,
        secret: &str,
        passphrase: &str,
    ) -> Result<(), VaultError> {
        let path = self.record_path(locale, name)?;
        text_to_sequence(secret)?;

        if path.exists() {
            return Err(already_exists(locale, name));
        }
        let record = cipher::seal(passphrase.as_bytes(), secret.as_bytes(), self.kdf, &mut OsRng)
            .map_err(|err| crypto_error(&path, err))?;

        fs::create_dir_all(self.locale_dir(locale)?)?;
        // create_new makes the existence check and the write one step.
        let mut file = match create_new(&path) {
            Ok(file) => file,
            Err(err) if err.kind() == io::ErrorKind::AlreadyExists => {
                return Err(already_exists(locale, name));
            }
            Err(err) => return Err(err.into()),
        };
        if let Err(err) = file.write_all(&record).and_then(|_| file.sync_all()) {
            drop(file);
            if let Err(cleanup) = fs::remove_file(&path) {
                warn!(path = %path.display(), error = %cleanup, "failed to remove partial secret");
            }
            return Err(err.into());
        }

        info!(locale, name, "stored secret");
        Ok(())
    }

    /// Decrypt a record and return the keys that type the secret.
    pub fn retrieve(
        &self,
        locale: &str,
        name: &str,
        passphrase: &str,
    ) -> Result<KeySequence, VaultError> {
        let path = self.record_path(locale, name)?;
        let record = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Err(VaultError::NotFound {
                    locale: locale.to_string(),
                    name: name.to_string(),
                });
            }
            Err(err) => return Err(err.into()),
        };

        let plaintext =
            cipher::open(passphrase.as_bytes(), &record).map_err(|err| crypto_error(&path, err))?;
        let Some(secret) = plaintext.strip_prefix(TAG) else {
            debug!(locale, name, "decrypted record lacks tag");
            return Err(VaultError::WrongPassphrase);
        };
        let secret = std::str::from_utf8(secret).map_err(|_| VaultError::Corrupt {
            path: path.clone(),
            reason: "secret is not UTF-8",
        })?;

        debug!(locale, name, "retrieved secret");
        Ok(text_to_sequence(secret)?)
    }

    /// Spoken names of every secret stored for `locale`, sorted.
    pub fn names(&self, locale: &str) -> Result<Vec<String>, VaultError> {
        let dir = self.locale_dir(locale)?;
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(err.into()),
        };

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            match entry.file_name().to_str() {
                Some(file) => names.push(display_name(file)),
                None => warn!(path = %entry.path().display(), "skipping non UTF-8 secret name"),
            }
        }
        names.sort();
        Ok(names)
    }

    pub fn remove(&self, locale: &str, name: &str) -> Result<(), VaultError> {
        let path = self.record_path(locale, name)?;
        match fs::remove_file(&path) {
            Ok(()) => {
                info!(locale, name, "removed secret");
                Ok(())
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => Err(VaultError::NotFound {
                locale: locale.to_string(),
                name: name.to_string(),
            }),
            Err(err) => Err(err.into()),
        }
    }
}

fn already_exists(locale: &str, name: &str) -> VaultError {
    VaultError::AlreadyExists {
        locale: locale.to_string(),
        name: name.to_string(),
    }
}

fn crypto_error(path: &Path, err: CipherError) -> VaultError {
    match err {
        CipherError::Authentication => VaultError::WrongPassphrase,
        CipherError::Truncated => VaultError::Corrupt {
            path: path.to_path_buf(),
            reason: "record is truncated",
        },
        CipherError::BadMagic => VaultError::Corrupt {
            path: path.to_path_buf(),
            reason: "not a secret record",
        },
        CipherError::ExcessiveCost => VaultError::Corrupt {
            path: path.to_path_buf(),
            reason: "key derivation cost out of range",
        },
        CipherError::InvalidParameters => VaultError::Crypto("invalid scrypt parameters"),
        CipherError::InvalidOutput => VaultError::Crypto("invalid scrypt output length"),
    }
}

#[cfg(unix)]
fn create_new(path: &Path) -> io::Result<fs::File> {
    use std::os::unix::fs::OpenOptionsExt;
    OpenOptions::new()
        .write(true)
        .create_new(true)
        .mode(0o600)
        .open(path)
}

#[cfg(not(unix))]
fn create_new(path: &Path) -> io::Result<fs::File> {
    OpenOptions::new().write(true).create_new(true).open(path)
}
