//! Voice grammars: phrase tables for the host recognizer and the functions
//! turning a recognized parse tree into keys.

pub mod keyboard;
pub mod locale;
pub mod node;
pub mod registry;
pub mod rules;
pub mod shell;
pub mod window;

pub use self::locale::{Catalog, Identity, Locale, Translator};
pub use self::node::{ParseNode, RuleKind};
pub use self::registry::{Grammar, GrammarKind, Phrase, PhraseTable, Registry};
pub use self::shell::{SshCommand, SshOption};
pub use self::window::Direction;
