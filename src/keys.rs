//! Keystrokes delivered to an answer control
//!
//! Hosts translate their native key events (crossterm here, DOM keyup in a
//! browser) into `Key` before handing them to the component.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::{Deserialize, Serialize};

/// A single released key on an answer control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Key {
    /// Printable character
    Char(char),
    /// Enter/Return key
    Enter,
    Tab,
    Backspace,
    Delete,
    Escape,
    /// Arrow keys
    Left,
    Right,
    Up,
    Down,
    /// Navigation
    Home,
    End,
    /// Ctrl+C, which the terminal host uses to quit
    Interrupt,
    /// Anything else (function keys, media keys)
    Other,
}

/// The key that commits a typed answer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommitKey {
    #[default]
    Enter,
    Tab,
}

impl CommitKey {
    /// The key a host sends to commit
    pub fn key(&self) -> Key {
        match self {
            CommitKey::Enter => Key::Enter,
            CommitKey::Tab => Key::Tab,
        }
    }
}

impl Key {
    /// Returns true if this key commits the answer under `commit`
    pub fn is_commit(&self, commit: CommitKey) -> bool {
        matches!(
            (self, commit),
            (Key::Enter, CommitKey::Enter) | (Key::Tab, CommitKey::Tab)
        )
    }
}

impl From<KeyEvent> for Key {
    fn from(event: KeyEvent) -> Self {
        match event.code {
            KeyCode::Char('c') if event.modifiers.contains(KeyModifiers::CONTROL) => {
                Key::Interrupt
            }
            KeyCode::Char(c) => Key::Char(c),
            KeyCode::Enter => Key::Enter,
            KeyCode::Tab => Key::Tab,
            KeyCode::Backspace => Key::Backspace,
            KeyCode::Delete => Key::Delete,
            KeyCode::Esc => Key::Escape,
            KeyCode::Left => Key::Left,
            KeyCode::Right => Key::Right,
            KeyCode::Up => Key::Up,
            KeyCode::Down => Key::Down,
            KeyCode::Home => Key::Home,
            KeyCode::End => Key::End,
            _ => Key::Other,
        }
    }
}
