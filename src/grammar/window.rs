//! Tiling window manager keys. Every binding hangs off the super key.

use crate::error::GrammarError;
use crate::key::{KeyCode, KeyEvent, Modifiers};
use crate::sequence::KeySequence;

pub const WORKSPACES: std::ops::RangeInclusive<u32> = 1..=12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Right,
        Direction::Up,
        Direction::Down,
    ];

    pub fn phrase(&self) -> &'static str {
        match self {
            Direction::Left => "left",
            Direction::Right => "right",
            Direction::Up => "up",
            Direction::Down => "down",
        }
    }

    pub fn from_phrase(phrase: &str) -> Option<Direction> {
        Self::ALL.into_iter().find(|d| d.phrase() == phrase)
    }

    fn code(&self) -> KeyCode {
        match self {
            Direction::Left => KeyCode::Left,
            Direction::Right => KeyCode::Right,
            Direction::Up => KeyCode::Up,
            Direction::Down => KeyCode::Down,
        }
    }
}

/// The number row key selecting workspace `n`: 1-9, then 0, `-` and `=`.
pub fn workspace_key(n: u32) -> Result<KeyCode, GrammarError> {
    let c = match n {
        1..=9 => char::from(b'0' + n as u8),
        10 => '0',
        11 => '-',
        12 => '=',
        _ => return Err(GrammarError::OutOfRange { what: "workspace", value: n.into() }),
    };
    Ok(KeyCode::Char(c))
}

pub fn go_to_workspace(n: u32) -> Result<KeySequence, GrammarError> {
    Ok(KeyEvent::with_mods(workspace_key(n)?, Modifiers::SUPER).into())
}

pub fn move_to_workspace(n: u32) -> Result<KeySequence, GrammarError> {
    Ok(KeyEvent::with_mods(workspace_key(n)?, Modifiers::SUPER | Modifiers::SHIFT).into())
}

pub fn focus(direction: Direction) -> KeySequence {
    KeyEvent::with_mods(direction.code(), Modifiers::SUPER).into()
}

pub fn move_window(direction: Direction) -> KeySequence {
    KeyEvent::with_mods(direction.code(), Modifiers::SUPER | Modifiers::SHIFT).into()
}

pub fn open_terminal() -> KeySequence {
    KeyEvent::with_mods(KeyCode::Char('t'), Modifiers::SUPER).into()
}

/// Open the launcher and, if given, type the command into it.
pub fn open_process(command: Option<&KeySequence>) -> KeySequence {
    let mut keys = KeySequence::from(KeyEvent::with_mods(KeyCode::Char('m'), Modifiers::SUPER));
    if let Some(command) = command {
        keys.append(command);
    }
    keys
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sequence::text_to_sequence;

    #[test]
    fn workspace_keys() {
        assert_eq!(go_to_workspace(3).unwrap().to_string(), "super-3");
        assert_eq!(go_to_workspace(10).unwrap().to_string(), "super-0");
        assert_eq!(go_to_workspace(11).unwrap().to_string(), "super-hyphen");
        assert_eq!(move_to_workspace(12).unwrap().to_string(), "shift-super-equal");
        assert!(matches!(
            go_to_workspace(13),
            Err(GrammarError::OutOfRange { what: "workspace", value: 13 })
        ));
        assert!(go_to_workspace(0).is_err());
    }

    #[test]
    fn directions() {
        assert_eq!(focus(Direction::Left).to_string(), "super-left");
        assert_eq!(move_window(Direction::Up).to_string(), "shift-super-up");
        assert_eq!(Direction::from_phrase("down"), Some(Direction::Down));
    }

    #[test]
    fn launcher() {
        assert_eq!(open_terminal().to_string(), "super-t");
        let pwd = text_to_sequence("pwd").unwrap();
        assert_eq!(open_process(Some(&pwd)).to_string(), "super-m,p,w,d");
        assert_eq!(open_process(None).to_string(), "super-m");
    }
}
