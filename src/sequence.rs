use std::fmt;
use std::str::FromStr;

use unicode_segmentation::UnicodeSegmentation;

use crate::charmap;
use crate::error::{EncodeError, ParseKeyError};
use crate::key::KeyEvent;

/// An ordered run of key events, handed to the key injector as one
/// comma-joined string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct KeySequence {
    events: Vec<KeyEvent>,
}

impl KeySequence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: KeyEvent) {
        self.events.push(event);
    }

    /// Append every event of `other`, keeping order.
    pub fn append(&mut self, other: &KeySequence) {
        self.events.extend_from_slice(&other.events);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, KeyEvent> {
        self.events.iter()
    }

    pub fn events(&self) -> &[KeyEvent] {
        &self.events
    }

    /// The injector token of every event, in order.
    pub fn tokens(&self) -> Vec<String> {
        self.events.iter().map(ToString::to_string).collect()
    }
}

impl From<KeyEvent> for KeySequence {
    fn from(event: KeyEvent) -> Self {
        Self {
            events: vec![event],
        }
    }
}

impl From<Vec<KeyEvent>> for KeySequence {
    fn from(events: Vec<KeyEvent>) -> Self {
        Self { events }
    }
}

impl FromIterator<KeyEvent> for KeySequence {
    fn from_iter<I: IntoIterator<Item = KeyEvent>>(iter: I) -> Self {
        Self {
            events: iter.into_iter().collect(),
        }
    }
}

impl Extend<KeyEvent> for KeySequence {
    fn extend<I: IntoIterator<Item = KeyEvent>>(&mut self, iter: I) {
        self.events.extend(iter);
    }
}

impl<'a> IntoIterator for &'a KeySequence {
    type Item = &'a KeyEvent;
    type IntoIter = std::slice::Iter<'a, KeyEvent>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}

impl IntoIterator for KeySequence {
    type Item = KeyEvent;
    type IntoIter = std::vec::IntoIter<KeyEvent>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.into_iter()
    }
}

impl fmt::Display for KeySequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, event) in self.events.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{event}")?;
        }
        Ok(())
    }
}

impl FromStr for KeySequence {
    type Err = ParseKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() {
            return Ok(Self::new());
        }
        s.split(',').map(str::parse).collect()
    }
}

/// Turn dictated text into the key presses that type it.
///
/// Works on grapheme clusters so a Windows line ending becomes one `enter`.
pub fn text_to_sequence(text: &str) -> Result<KeySequence, EncodeError> {
    text.graphemes(true).map(charmap::encode_grapheme).collect()
}
