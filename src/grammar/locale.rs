use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;

/// Recognition language. Codes follow the recognizer's naming.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Deserialize)]
#[serde(from = "String")]
pub enum Locale {
    #[default]
    English,
    Dutch,
}

impl Locale {
    pub const ALL: [Locale; 2] = [Locale::English, Locale::Dutch];

    pub fn code(&self) -> &'static str {
        match self {
            Locale::English => "enx",
            Locale::Dutch => "nld",
        }
    }

    /// Unknown codes fall back to English.
    pub fn from_code(code: &str) -> Locale {
        match code.trim().to_ascii_lowercase().as_str() {
            "nld" | "nl" => Locale::Dutch,
            _ => Locale::English,
        }
    }
}

impl From<String> for Locale {
    fn from(code: String) -> Self {
        Locale::from_code(&code)
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Turns an English grammar phrase into the active locale's phrase.
pub trait Translator {
    fn translate(&self, key: &str) -> String;
}

/// English: phrases are their own translation.
#[derive(Debug, Clone, Copy, Default)]
pub struct Identity;

impl Translator for Identity {
    fn translate(&self, key: &str) -> String {
        key.to_string()
    }
}

/// Phrase catalog read from `<dir>/<locale code>.toml`, a flat table of
/// English phrase to translated phrase. Missing entries stay English.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    entries: HashMap<String, String>,
}

impl Catalog {
    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        Ok(Self {
            entries: toml::from_str(text)?,
        })
    }

    pub fn load(dir: &Path, locale: Locale) -> Result<Self, ConfigError> {
        let path = dir.join(format!("{}.toml", locale.code()));
        let text = fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        Self::from_toml_str(&text).map_err(|source| ConfigError::Parse { path, source })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Translator for Catalog {
    fn translate(&self, key: &str) -> String {
        self.entries
            .get(key)
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }
}
