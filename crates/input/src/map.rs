//! Key mapping from terminal events to session commands.

use crate::types::Command;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Physical key layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyBindings {
    /// Arrow keys move, down drops, up rotates
    Arrows,
    /// `A`/`D` move, `S` drops, `W` rotates
    #[default]
    Wasd,
}

impl KeyBindings {
    /// Parse from a config string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "arrows" | "arrow" => Some(KeyBindings::Arrows),
            "wasd" => Some(KeyBindings::Wasd),
            _ => None,
        }
    }

    fn soft_drop_key(&self, code: KeyCode) -> bool {
        match self {
            KeyBindings::Arrows => code == KeyCode::Down,
            KeyBindings::Wasd => matches!(code, KeyCode::Char('s') | KeyCode::Char('S')),
        }
    }
}

/// Map a key press (or auto-repeat) to a command.
pub fn map_key_press(bindings: KeyBindings, key: KeyEvent) -> Option<Command> {
    if bindings.soft_drop_key(key.code) {
        return Some(Command::SoftDropPress);
    }

    let movement = match bindings {
        KeyBindings::Arrows => match key.code {
            KeyCode::Left => Some(Command::MoveLeft),
            KeyCode::Right => Some(Command::MoveRight),
            KeyCode::Up => Some(Command::RotateCw),
            _ => None,
        },
        KeyBindings::Wasd => match key.code {
            KeyCode::Char('a') | KeyCode::Char('A') => Some(Command::MoveLeft),
            KeyCode::Char('d') | KeyCode::Char('D') => Some(Command::MoveRight),
            KeyCode::Char('w') | KeyCode::Char('W') => Some(Command::RotateCw),
            _ => None,
        },
    };
    if movement.is_some() {
        return movement;
    }

    match key.code {
        KeyCode::Char('z') | KeyCode::Char('Z') => Some(Command::RotateCcw),
        KeyCode::Char('p') | KeyCode::Char('P') => Some(Command::TogglePause),
        KeyCode::Enter => Some(Command::StartGame),
        _ => None,
    }
}

/// Map a key release to a command (only soft drop cares).
pub fn map_key_release(bindings: KeyBindings, key: KeyEvent) -> Option<Command> {
    if bindings.soft_drop_key(key.code) {
        Some(Command::SoftDropRelease)
    } else {
        None
    }
}

/// Map any key event by its kind.
pub fn handle_key_event(bindings: KeyBindings, key: KeyEvent) -> Option<Command> {
    match key.kind {
        KeyEventKind::Press | KeyEventKind::Repeat => map_key_press(bindings, key),
        KeyEventKind::Release => map_key_release(bindings, key),
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
