//! Grammar lifecycle. The host calls `load`/`unload`; both are idempotent.
//! Grammars are rebuilt from the configuration and translator instead of
//! being patched in place, so switching language is unload, swap, load.

use std::collections::BTreeMap;

use tracing::{debug, info, warn};

use crate::config::Config;
use crate::sequence::{KeySequence, text_to_sequence};
use crate::types::{Motion, NormalAction, Operator, TextObject, VisualKind};
use crate::vault::Vault;

use super::keyboard::{self, BASIC_KEYS};
use super::locale::{Catalog, Identity, Locale, Translator};
use super::shell::{SIMPLE_COMMANDS, SshOption};
use super::window::{self, Direction};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum GrammarKind {
    Global,
    Vim,
    Password,
    WindowManager,
    Shell,
}

impl GrammarKind {
    pub const ALL: [GrammarKind; 5] = [
        GrammarKind::Global,
        GrammarKind::Vim,
        GrammarKind::Password,
        GrammarKind::WindowManager,
        GrammarKind::Shell,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            GrammarKind::Global => "global",
            GrammarKind::Vim => "true_vim_normal_mode",
            GrammarKind::Password => "password",
            GrammarKind::WindowManager => "i3",
            GrammarKind::Shell => "command_line_interface",
        }
    }
}

/// A translated phrase and the keys it types. Entries whose keys depend on
/// the rest of the utterance carry an empty sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Phrase {
    pub spoken: String,
    pub keys: KeySequence,
}

/// The phrases of one rule or choice list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhraseTable {
    pub name: &'static str,
    pub phrases: Vec<Phrase>,
}

impl PhraseTable {
    fn new(name: &'static str) -> Self {
        Self {
            name,
            phrases: Vec::new(),
        }
    }

    fn push(&mut self, translator: &dyn Translator, phrase: &str, keys: KeySequence) {
        self.phrases.push(Phrase {
            spoken: translator.translate(phrase),
            keys,
        });
    }

    pub fn find(&self, spoken: &str) -> Option<&Phrase> {
        self.phrases.iter().find(|p| p.spoken == spoken)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grammar {
    pub kind: GrammarKind,
    pub locale: Locale,
    pub tables: Vec<PhraseTable>,
}

impl Grammar {
    pub fn table(&self, name: &str) -> Option<&PhraseTable> {
        self.tables.iter().find(|t| t.name == name)
    }
}

pub struct Registry {
    config: Config,
    translator: Box<dyn Translator>,
    vault: Option<Vault>,
    loaded: BTreeMap<GrammarKind, Grammar>,
}

impl Registry {
    /// Build a registry for `config`, reading the locale's phrase catalog
    /// when a translations directory is configured.
    pub fn new(config: Config) -> Self {
        let translator = translator_for(&config, config.locale);
        let vault = match config.vault() {
            Ok(vault) => Some(vault),
            Err(err) => {
                warn!(error = %err, "password grammar has no vault");
                None
            }
        };
        Self::with_translator(config, translator, vault)
    }

    pub fn with_translator(
        config: Config,
        translator: Box<dyn Translator>,
        vault: Option<Vault>,
    ) -> Self {
        Self {
            config,
            translator,
            vault,
            loaded: BTreeMap::new(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn locale(&self) -> Locale {
        self.config.locale
    }

    pub fn vault(&self) -> Option<&Vault> {
        self.vault.as_ref()
    }

    pub fn is_loaded(&self, kind: GrammarKind) -> bool {
        self.loaded.contains_key(&kind)
    }

    pub fn grammar(&self, kind: GrammarKind) -> Option<&Grammar> {
        self.loaded.get(&kind)
    }

    /// Register a grammar. Returns false if it was already loaded.
    pub fn load(&mut self, kind: GrammarKind) -> bool {
        if self.loaded.contains_key(&kind) {
            debug!(grammar = kind.name(), "already loaded");
            return false;
        }
        let grammar = self.build(kind);
        info!(grammar = kind.name(), locale = %self.config.locale, "grammar loaded");
        self.loaded.insert(kind, grammar);
        true
    }

    /// Unregister a grammar. Returns false if it was not loaded.
    pub fn unload(&mut self, kind: GrammarKind) -> bool {
        let removed = self.loaded.remove(&kind).is_some();
        if removed {
            info!(grammar = kind.name(), "grammar unloaded");
        }
        removed
    }

    pub fn load_all(&mut self) {
        for kind in GrammarKind::ALL {
            self.load(kind);
        }
    }

    pub fn unload_all(&mut self) {
        for kind in GrammarKind::ALL {
            self.unload(kind);
        }
    }

    /// Rebuild every loaded grammar for `locale` with `translator`.
    pub fn switch_locale(&mut self, locale: Locale, translator: Box<dyn Translator>) {
        let kinds: Vec<GrammarKind> = self.loaded.keys().copied().collect();
        for kind in &kinds {
            self.unload(*kind);
        }
        self.config.locale = locale;
        self.translator = translator;
        for kind in kinds {
            self.load(kind);
        }
    }

    fn build(&self, kind: GrammarKind) -> Grammar {
        let t = self.translator.as_ref();
        let tables = match kind {
            GrammarKind::Global => global_tables(t),
            GrammarKind::Vim => vim_tables(t),
            GrammarKind::Password => self.password_tables(t),
            GrammarKind::WindowManager => window_tables(t),
            GrammarKind::Shell => shell_tables(t),
        };
        Grammar {
            kind,
            locale: self.config.locale,
            tables,
        }
    }

    fn password_tables(&self, t: &dyn Translator) -> Vec<PhraseTable> {
        let mut rule = PhraseTable::new("password");
        rule.push(t, "password <name> <passphrase>", KeySequence::new());

        let mut names = PhraseTable::new("names");
        if let Some(vault) = &self.vault {
            match vault.names(self.config.locale.code()) {
                // Secret names are spoken as stored, never translated.
                Ok(found) => names.phrases.extend(found.into_iter().map(|spoken| Phrase {
                    spoken,
                    keys: KeySequence::new(),
                })),
                Err(err) => warn!(error = %err, "could not list stored secrets"),
            }
        }
        vec![rule, names]
    }
}

fn translator_for(config: &Config, locale: Locale) -> Box<dyn Translator> {
    let Some(dir) = &config.translations_dir else {
        return Box::new(Identity);
    };
    if locale == Locale::English {
        return Box::new(Identity);
    }
    match Catalog::load(dir, locale) {
        Ok(catalog) => Box::new(catalog),
        Err(err) => {
            warn!(error = %err, %locale, "falling back to English phrases");
            Box::new(Identity)
        }
    }
}

fn global_tables(t: &dyn Translator) -> Vec<PhraseTable> {
    let mut keys = PhraseTable::new("basic_keyboard");
    for (phrase, code, _) in BASIC_KEYS {
        keys.push(t, phrase, keyboard::press(code, 1));
    }
    keys.push(t, keyboard::DICTATE_PHRASE, KeySequence::new());
    vec![keys]
}

fn vim_tables(t: &dyn Translator) -> Vec<PhraseTable> {
    let mut operators = PhraseTable::new("operator");
    for op in Operator::ALL {
        operators.push(t, op.phrase(), op.keys());
    }
    let mut motions = PhraseTable::new("motion");
    for motion in Motion::ALL {
        motions.push(t, motion.phrase(), motion.keys());
    }
    let mut objects = PhraseTable::new("operatormotion");
    for object in TextObject::ALL {
        objects.push(t, object.phrase(), object.keys());
    }
    let mut modes = PhraseTable::new("mode");
    for mode in VisualKind::ALL {
        modes.push(t, mode.phrase(), mode.keys());
    }
    let mut normal = PhraseTable::new("normal");
    for action in NormalAction::ALL {
        normal.push(t, action.phrase(), action.keys());
    }
    let mut buffers = PhraseTable::new("buffer");
    buffers.push(t, "default", KeySequence::new());
    let mut operator_rule = PhraseTable::new("motion_operator");
    operator_rule.push(
        t,
        "<operator> (<line>|to (<motion>|<operatormotion>) [<numbers>] [into buffer <buffer>] [<mode> mode])",
        KeySequence::new(),
    );
    operator_rule.push(t, "line", KeySequence::new());
    vec![operator_rule, operators, motions, objects, modes, normal, buffers]
}

fn window_tables(t: &dyn Translator) -> Vec<PhraseTable> {
    let mut workspace = PhraseTable::new("workspace");
    workspace.push(t, "open terminal", window::open_terminal());
    workspace.push(t, "workspace <n>", KeySequence::new());
    workspace.push(t, "move [to] workspace <n>", KeySequence::new());
    workspace.push(t, "window <direction>", KeySequence::new());
    workspace.push(t, "move window [to the] <direction>", KeySequence::new());
    workspace.push(t, "open process [<cmd>]", KeySequence::new());

    let mut directions = PhraseTable::new("direction");
    for direction in Direction::ALL {
        directions.push(t, direction.phrase(), window::focus(direction));
    }
    vec![workspace, directions]
}

fn shell_tables(t: &dyn Translator) -> Vec<PhraseTable> {
    let mut commands = PhraseTable::new("simple_command");
    for (phrase, command) in SIMPLE_COMMANDS {
        let keys = text_to_sequence(command).unwrap_or_default();
        commands.push(t, phrase, keys);
    }
    let mut ssh = PhraseTable::new("ssh");
    ssh.push(t, "S S H [<ssh_options>] <server> [<command>]", KeySequence::new());
    ssh.push(t, "command <command>", KeySequence::new());
    for option in SshOption::ALL {
        ssh.push(t, option.phrase(), KeySequence::new());
    }
    vec![commands, ssh]
}
