//! Key mapping from terminal events to round commands.

use crate::types::Command;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// What a key press asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    /// Queue a command on the round
    Command(Command),
    /// Toggle pause immediately
    Pause,
    /// Start a new round
    Restart,
}

/// Map a key event. Releases and unbound keys map to `None`.
pub fn map_key(key: KeyEvent) -> Option<KeyAction> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return None;
    }

    let cmd = match key.code {
        KeyCode::Left => Command::MoveLeft,
        KeyCode::Right => Command::MoveRight,
        KeyCode::Down => Command::SoftDrop,

        KeyCode::Up | KeyCode::Char('x') | KeyCode::Char('X') => Command::RotateRight,
        KeyCode::Char('z') | KeyCode::Char('Z') => Command::RotateLeft,

        KeyCode::Char(' ') => Command::HardDrop,
        KeyCode::Char('c') | KeyCode::Char('C') => Command::Hold,

        KeyCode::Esc | KeyCode::Char('p') | KeyCode::Char('P') => return Some(KeyAction::Pause),
        KeyCode::Char('r') | KeyCode::Char('R') => return Some(KeyAction::Restart),

        _ => return None,
    };
    Some(KeyAction::Command(cmd))
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
