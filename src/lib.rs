pub mod charmap;
pub mod composer;
pub mod config;
pub mod error;
pub mod grammar;
pub mod key;
pub mod sequence;
pub mod types;
pub mod vault;

pub use crate::charmap::{encode_char, encode_grapheme};
pub use crate::composer::{
    CommandSpec, DEFAULT_MAX_REPETITIONS, MotionTarget, NormalCommand, compose, compose_repeated,
};
pub use crate::config::Config;
pub use crate::error::{
    CommandError, ConfigError, EncodeError, Error, GrammarError, ParseKeyError, Result, VaultError,
};
pub use crate::key::{KeyCode, KeyEvent, Modifiers};
pub use crate::sequence::{KeySequence, text_to_sequence};
pub use crate::types::{Digit, Motion, NormalAction, Operator, Register, TextObject, VisualKind};
pub use crate::vault::{KdfParams, Vault};
