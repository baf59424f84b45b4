use std::fmt;
use std::str::FromStr;

use crate::charmap;
use crate::error::ParseKeyError;

/// Key codes representing individual keys on the keyboard.
///
/// This enum provides a platform-agnostic representation of keys, matching
/// the key names understood by the host's key injector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A printable, non-blank ASCII key. Letters are always stored lowercase;
    /// upper case is expressed with [`Modifiers::SHIFT`].
    Char(char),
    /// The space bar.
    Space,
    /// The Tab key.
    Tab,
    /// The Enter/Return key.
    Enter,
    /// The Escape key, used to exit modes and cancel operations.
    Esc,
    /// The Backspace key.
    Backspace,
    /// The forward Delete key.
    Delete,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
}

impl KeyCode {
    const NAMED: [(KeyCode, &'static str); 14] = [
        (KeyCode::Space, "space"),
        (KeyCode::Tab, "tab"),
        (KeyCode::Enter, "enter"),
        (KeyCode::Esc, "escape"),
        (KeyCode::Backspace, "backspace"),
        (KeyCode::Delete, "del"),
        (KeyCode::Up, "up"),
        (KeyCode::Down, "down"),
        (KeyCode::Left, "left"),
        (KeyCode::Right, "right"),
        (KeyCode::Home, "home"),
        (KeyCode::End, "end"),
        (KeyCode::PageUp, "pgup"),
        (KeyCode::PageDown, "pgdown"),
    ];

    /// The injector's name for this key, without modifiers.
    pub fn name(&self) -> &'static str {
        match self {
            KeyCode::Char(c) => charmap::char_name(*c).unwrap_or("unknown"),
            named => Self::NAMED
                .iter()
                .find(|(code, _)| code == named)
                .map(|(_, name)| *name)
                .unwrap_or("unknown"),
        }
    }

    /// Resolve an injector key name. Character names from the punctuation
    /// table are accepted along with their aliases.
    pub fn from_name(name: &str) -> Option<KeyCode> {
        if let Some((code, _)) = Self::NAMED.iter().find(|(_, n)| *n == name) {
            return Some(*code);
        }
        charmap::char_from_name(name).map(KeyCode::Char)
    }
}

bitflags::bitflags! {
    /// Keyboard modifier flags.
    ///
    /// These can be combined to represent multiple modifiers held simultaneously.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        const SHIFT = 0b0001;
        const CTRL  = 0b0010;
        const ALT   = 0b0100;
        const SUPER = 0b1000;
    }
}

impl Modifiers {
    // Printing order of the prefixes.
    const PREFIXES: [(Modifiers, &'static str); 4] = [
        (Modifiers::CTRL, "ctrl"),
        (Modifiers::ALT, "alt"),
        (Modifiers::SHIFT, "shift"),
        (Modifiers::SUPER, "super"),
    ];

    fn from_prefix(prefix: &str) -> Option<Modifiers> {
        match prefix {
            "ctrl" => Some(Modifiers::CTRL),
            "alt" => Some(Modifiers::ALT),
            "shift" => Some(Modifiers::SHIFT),
            "super" => Some(Modifiers::SUPER),
            // Legacy compact form: one letter per modifier, e.g. "sw".
            short if !short.is_empty() => short.chars().try_fold(Modifiers::empty(), |acc, c| {
                let flag = match c {
                    'c' => Modifiers::CTRL,
                    'a' => Modifiers::ALT,
                    's' => Modifiers::SHIFT,
                    'w' => Modifiers::SUPER,
                    _ => return None,
                };
                Some(acc | flag)
            }),
            _ => None,
        }
    }
}

/// A key press event with optional modifiers and a repeat count.
///
/// Displays in the injector format: modifier prefixes joined by `-`, the key
/// name, then `:N` when the key is pressed more than once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    /// The key that was pressed.
    pub code: KeyCode,
    /// Modifier keys held during the key press.
    pub mods: Modifiers,
    /// How many times the key is pressed. Never zero.
    pub repeat: u32,
}

impl KeyEvent {
    pub const fn new(code: KeyCode) -> Self {
        Self {
            code,
            mods: Modifiers::empty(),
            repeat: 1,
        }
    }

    pub const fn with_mods(code: KeyCode, mods: Modifiers) -> Self {
        Self {
            code,
            mods,
            repeat: 1,
        }
    }

    /// Plain character key. Upper-case letters are folded into lowercase plus SHIFT.
    pub fn char(c: char) -> Self {
        if c.is_ascii_uppercase() {
            Self::with_mods(KeyCode::Char(c.to_ascii_lowercase()), Modifiers::SHIFT)
        } else {
            Self::new(KeyCode::Char(c))
        }
    }

    pub fn ctrl(c: char) -> Self {
        Self::with_mods(KeyCode::Char(c), Modifiers::CTRL)
    }

    pub fn shift(c: char) -> Self {
        Self::with_mods(KeyCode::Char(c), Modifiers::SHIFT)
    }

    /// Same key pressed `count` times. A count of zero is treated as one.
    pub fn times(mut self, count: u32) -> Self {
        self.repeat = count.max(1);
        self
    }

    /// The character this event types, if it is an unmodified (or only
    /// shifted) printable key.
    pub fn to_char(&self) -> Option<char> {
        if self.repeat != 1 || !(self.mods - Modifiers::SHIFT).is_empty() {
            return None;
        }
        let shifted = self.mods.contains(Modifiers::SHIFT);
        match self.code {
            KeyCode::Char(c) if c.is_ascii_lowercase() => {
                Some(if shifted { c.to_ascii_uppercase() } else { c })
            }
            KeyCode::Char(c) if !shifted => Some(c),
            KeyCode::Space if !shifted => Some(' '),
            KeyCode::Tab if !shifted => Some('\t'),
            KeyCode::Enter if !shifted => Some('\n'),
            _ => None,
        }
    }
}

impl From<KeyCode> for KeyEvent {
    fn from(code: KeyCode) -> Self {
        KeyEvent::new(code)
    }
}

impl fmt::Display for KeyEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (flag, prefix) in Modifiers::PREFIXES {
            if self.mods.contains(flag) {
                write!(f, "{prefix}-")?;
            }
        }
        f.write_str(self.code.name())?;
        if self.repeat > 1 {
            write!(f, ":{}", self.repeat)?;
        }
        Ok(())
    }
}

impl FromStr for KeyEvent {
    type Err = ParseKeyError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let token = token.trim();
        if token.is_empty() {
            return Err(ParseKeyError::Empty);
        }

        let (body, repeat) = match token.rsplit_once(':') {
            // A lone ':' is never a token; the colon key is spelled "colon".
            Some((body, count)) if !body.is_empty() => {
                let repeat = count
                    .parse::<u32>()
                    .map_err(|_| ParseKeyError::InvalidRepeat(token.to_string()))?;
                (body, repeat.max(1))
            }
            _ => (token, 1),
        };

        let mut parts: Vec<&str> = body.split('-').collect();
        let name = parts.pop().unwrap_or_default();
        let mut mods = Modifiers::empty();
        for prefix in parts {
            mods |= Modifiers::from_prefix(prefix)
                .ok_or_else(|| ParseKeyError::UnknownModifier(prefix.to_string()))?;
        }

        let code = KeyCode::from_name(name)
            .ok_or_else(|| ParseKeyError::UnknownKey(name.to_string()))?;
        Ok(KeyEvent { code, mods, repeat })
    }
}
