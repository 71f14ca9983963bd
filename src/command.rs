// SPDX-License-Identifier: MPL-2.0
//! User commands and their key bindings.
//!
//! Every action a keyboard shortcut or a `--do` flag can trigger is a
//! [`Command`]. Keys map to commands through one static `match`; there is no
//! runtime keymap.

use crate::error::Error;
use std::fmt;
use std::str::FromStr;

/// Toolkit-independent key identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    PageUp,
    PageDown,
    Space,
    Backspace,
    Character(char),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    MoveLeft,
    MoveRight,
    MoveUp,
    MoveDown,
    /// Shrinks the clip, showing less padding
    PaddingIn,
    /// Grows the clip, showing more padding
    PaddingOut,
    SelectAll,
    Reset,
    TogglePreview,
    ToggleOriginal,
    Save,
    Next,
    Previous,
}

/// Command names accepted on the command line, in help order.
pub const COMMAND_NAMES: [(&str, Command); 13] = [
    ("left", Command::MoveLeft),
    ("right", Command::MoveRight),
    ("up", Command::MoveUp),
    ("down", Command::MoveDown),
    ("padding-in", Command::PaddingIn),
    ("padding-out", Command::PaddingOut),
    ("select-all", Command::SelectAll),
    ("reset", Command::Reset),
    ("preview", Command::TogglePreview),
    ("original", Command::ToggleOriginal),
    ("save", Command::Save),
    ("next", Command::Next),
    ("previous", Command::Previous),
];

impl Command {
    /// Looks up the command bound to `key`.
    #[must_use]
    pub fn from_key(key: Key) -> Option<Self> {
        let command = match key {
            Key::ArrowLeft => Command::MoveLeft,
            Key::ArrowRight => Command::MoveRight,
            Key::ArrowUp => Command::MoveUp,
            Key::ArrowDown => Command::MoveDown,
            Key::Character('+' | '=') => Command::PaddingIn,
            Key::Character('-' | '_') => Command::PaddingOut,
            Key::Character('a' | 'A') => Command::SelectAll,
            Key::Character('r' | 'R') => Command::Reset,
            Key::Character('p' | 'P') => Command::TogglePreview,
            Key::Character('o' | 'O') => Command::ToggleOriginal,
            Key::Character('s' | 'S') => Command::Save,
            Key::PageDown | Key::Space | Key::Character('n' | 'N') => Command::Next,
            Key::PageUp | Key::Backspace | Key::Character('b' | 'B') => Command::Previous,
            Key::Character(_) => return None,
        };
        Some(command)
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        COMMAND_NAMES
            .iter()
            .find(|(_, command)| *command == self)
            .map_or("unknown", |(name, _)| name)
    }

    /// Unit move direction for the `Move*` commands.
    #[must_use]
    pub fn move_direction(self) -> Option<(f64, f64)> {
        match self {
            Command::MoveLeft => Some((-1.0, 0.0)),
            Command::MoveRight => Some((1.0, 0.0)),
            Command::MoveUp => Some((0.0, -1.0)),
            Command::MoveDown => Some((0.0, 1.0)),
            _ => None,
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Command {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        COMMAND_NAMES
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(wanted))
            .map(|(_, command)| *command)
            .ok_or_else(|| Error::Config(format!("unknown command {:?}", s)))
    }
}
