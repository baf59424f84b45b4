//! Bare keys and dictation, usable in any context.

use crate::key::{KeyCode, KeyEvent};
use crate::sequence::KeySequence;

/// Grammar phrase and key for every bare key. Keys marked countable accept
/// a spoken count in front (`three backspaces`).
pub const BASIC_KEYS: [(&str, KeyCode, bool); 14] = [
    ("escape", KeyCode::Esc, false),
    ("[<n>] backspace[s]", KeyCode::Backspace, true),
    ("[<n>] enter[s]", KeyCode::Enter, true),
    ("[<n>] tab[s]", KeyCode::Tab, true),
    ("[<n>] space[s]", KeyCode::Space, true),
    ("[<n>] delete[s]", KeyCode::Delete, true),
    ("go [<n>] up", KeyCode::Up, true),
    ("go [<n>] down", KeyCode::Down, true),
    ("go [<n>] left", KeyCode::Left, true),
    ("go [<n>] right", KeyCode::Right, true),
    ("(go home|go to start)", KeyCode::Home, false),
    ("go [to] end", KeyCode::End, false),
    ("go [<n>] page[s] up", KeyCode::PageUp, true),
    ("go [<n>] page[s] down", KeyCode::PageDown, true),
];

/// Spoken counts are limited to this range.
pub const MAX_COUNT: u32 = 100;

/// Phrase to dictate free text.
pub const DICTATE_PHRASE: &str = "dictate <text>";

/// Press `code` `count` times; the count is clamped to `1..=MAX_COUNT`.
pub fn press(code: KeyCode, count: u32) -> KeySequence {
    KeySequence::from(KeyEvent::new(code).times(count.clamp(1, MAX_COUNT)))
}

pub fn is_countable(code: KeyCode) -> bool {
    BASIC_KEYS
        .iter()
        .any(|(_, key, countable)| *key == code && *countable)
}
