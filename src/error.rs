use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failure to turn text into key events.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    #[error("no key for character {0:?}")]
    UnsupportedCharacter(String),
}

/// Failure to read an injector token such as `shift-a:2`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseKeyError {
    #[error("empty key token")]
    Empty,
    #[error("unknown modifier {0:?}")]
    UnknownModifier(String),
    #[error("unknown key {0:?}")]
    UnknownKey(String),
    #[error("invalid repeat count in {0:?}")]
    InvalidRepeat(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("command has neither a motion nor the line shorthand")]
    IncompleteCommand,
    #[error("command has both a motion and the line shorthand")]
    ConflictingTarget,
    #[error("expected between 1 and {max} commands, got {got}")]
    RepetitionOutOfRange { got: usize, max: usize },
    #[error("{0} is not a single digit")]
    InvalidDigit(u32),
    #[error("{0:?} is not a register")]
    InvalidRegister(char),
    #[error("no {kind} produces {token:?}")]
    UnknownToken { kind: &'static str, token: String },
    #[error(transparent)]
    Encode(#[from] EncodeError),
}

#[derive(Debug, Error)]
pub enum VaultError {
    #[error("secret {name:?} already exists for locale {locale:?}")]
    AlreadyExists { locale: String, name: String },
    #[error("no secret {name:?} for locale {locale:?}")]
    NotFound { locale: String, name: String },
    #[error("incorrect passphrase")]
    WrongPassphrase,
    #[error("{0:?} is not a valid locale or secret name")]
    InvalidName(String),
    #[error("secret file {path} is corrupt: {reason}")]
    Corrupt { path: PathBuf, reason: &'static str },
    #[error("key derivation failed: {0}")]
    Crypto(&'static str),
    #[error("could not locate the home directory")]
    NoHome,
    #[error(transparent)]
    Encode(#[from] EncodeError),
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Failures while turning a recognized parse tree into keys.
#[derive(Debug, Error)]
pub enum GrammarError {
    #[error("parse node has no child named {0:?}")]
    MissingChild(&'static str),
    #[error("unexpected parse node: {0}")]
    UnexpectedNode(String),
    #[error("{what} {value} is out of range")]
    OutOfRange { what: &'static str, value: i64 },
    #[error("unknown {what} {value:?}")]
    UnknownValue { what: &'static str, value: String },
    #[error(transparent)]
    Command(#[from] CommandError),
    #[error(transparent)]
    Vault(#[from] VaultError),
    #[error(transparent)]
    Encode(#[from] EncodeError),
    #[error(transparent)]
    ParseKey(#[from] ParseKeyError),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Any error produced by this crate.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Encode(#[from] EncodeError),
    #[error(transparent)]
    Command(#[from] CommandError),
    #[error(transparent)]
    Vault(#[from] VaultError),
    #[error(transparent)]
    Grammar(#[from] GrammarError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
