//! Character encoder: one typed character to one key event.
//!
//! The table covers every printable ASCII character plus space, tab and the
//! two newline conventions, so dictated text never drops characters silently.

use crate::error::EncodeError;
use crate::key::{KeyCode, KeyEvent};

/// Injector names for the ASCII punctuation keys.
pub const PUNCTUATION: [(char, &str); 32] = [
    ('!', "exclamation"),
    ('"', "dquote"),
    ('#', "hash"),
    ('$', "dollar"),
    ('%', "percent"),
    ('&', "ampersand"),
    ('\'', "apostrophe"),
    ('(', "lparen"),
    (')', "rparen"),
    ('*', "asterisk"),
    ('+', "plus"),
    (',', "comma"),
    ('-', "hyphen"),
    ('.', "dot"),
    ('/', "slash"),
    (':', "colon"),
    (';', "semicolon"),
    ('<', "langle"),
    ('=', "equal"),
    ('>', "rangle"),
    ('?', "question"),
    ('@', "at"),
    ('[', "lbracket"),
    ('\\', "backslash"),
    (']', "rbracket"),
    ('^', "caret"),
    ('_', "underscore"),
    ('`', "backtick"),
    ('{', "lbrace"),
    ('|', "bar"),
    ('}', "rbrace"),
    ('~', "tilde"),
];

// Names the injector also understands for the same key.
const ALIASES: [(char, &str); 2] = [('-', "minus"), ('0', "zero")];

/// Name of a [`KeyCode::Char`] key. Letters must already be lowercase.
pub fn char_name(c: char) -> Option<&'static str> {
    if c.is_ascii_lowercase() || c.is_ascii_digit() {
        // Single-character names live in a static table so they can be
        // returned by reference.
        const ALNUM: &str = "abcdefghijklmnopqrstuvwxyz0123456789";
        let idx = ALNUM.find(c)?;
        return Some(&ALNUM[idx..idx + 1]);
    }
    PUNCTUATION
        .iter()
        .find(|(ch, _)| *ch == c)
        .map(|(_, name)| *name)
}

/// Inverse of [`char_name`], also accepting aliases.
pub fn char_from_name(name: &str) -> Option<char> {
    let mut chars = name.chars();
    if let (Some(c), None) = (chars.next(), chars.next())
        && (c.is_ascii_lowercase() || c.is_ascii_digit())
    {
        return Some(c);
    }
    PUNCTUATION
        .iter()
        .chain(ALIASES.iter())
        .find(|(_, n)| *n == name)
        .map(|(c, _)| *c)
}

/// Encode a single character as the key event that types it.
pub fn encode_char(c: char) -> Result<KeyEvent, EncodeError> {
    match c {
        ' ' => Ok(KeyEvent::new(KeyCode::Space)),
        '\t' => Ok(KeyEvent::new(KeyCode::Tab)),
        '\n' => Ok(KeyEvent::new(KeyCode::Enter)),
        c if c.is_ascii_alphanumeric() => Ok(KeyEvent::char(c)),
        c if char_name(c).is_some() => Ok(KeyEvent::new(KeyCode::Char(c))),
        other => Err(EncodeError::UnsupportedCharacter(other.to_string())),
    }
}

/// Encode one grapheme cluster. `"\r\n"` is a single cluster and maps to
/// `enter`, like a bare `'\n'`.
pub fn encode_grapheme(grapheme: &str) -> Result<KeyEvent, EncodeError> {
    if grapheme == "\r\n" {
        return Ok(KeyEvent::new(KeyCode::Enter));
    }
    let mut chars = grapheme.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => encode_char(c),
        _ => Err(EncodeError::UnsupportedCharacter(grapheme.to_string())),
    }
}

/// Decode an injector token back to the character it types.
pub fn decode_token(token: &str) -> Option<char> {
    token.parse::<KeyEvent>().ok()?.to_char()
}
