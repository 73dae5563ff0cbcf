//! Key mapping from terminal events to PC set-1 make codes.

use crate::types::keys;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Translate a terminal key press into the make code a PC keyboard would send.
///
/// Besides the arrows, vi-style `hjkl` and `wasd` letters move and rotate,
/// and space is a second hard-drop key. Quit keys (see [`should_quit`]) turn
/// into the reset scancode so the frame loop ends.
pub fn scancode_for(key: KeyEvent) -> Option<u8> {
    if should_quit(key) {
        return Some(keys::R);
    }
    match key.code {
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('H') | KeyCode::Char('a') | KeyCode::Char('A') => {
            Some(keys::LEFT)
        }
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('L') => Some(keys::RIGHT),
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J') | KeyCode::Char('s') | KeyCode::Char('S') => {
            Some(keys::DOWN)
        }
        KeyCode::Up
        | KeyCode::Char('k')
        | KeyCode::Char('K')
        | KeyCode::Char('w')
        | KeyCode::Char('W') => Some(keys::UP),

        KeyCode::Enter | KeyCode::Char(' ') => Some(keys::ENTER),
        KeyCode::Char('d') | KeyCode::Char('D') => Some(keys::D),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(keys::R),

        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
