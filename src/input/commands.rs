//! # Command Definitions
//!
//! Logical input actions and the keys bound to them.

use macroquad::input::KeyCode;
use serde::{Deserialize, Serialize};

/// A discrete, device-independent input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputAction {
    Up,
    Down,
    Left,
    Right,
    /// Accept the highlighted option
    Confirm,
    /// Pop one level of menu
    Cancel,
    /// Inspect the faced tile
    Interact,
    /// Open or close the pause menu
    PauseToggle,
}

impl InputAction {
    /// Cursor step for vertical menus (Up/Down), if this is one.
    pub fn vertical_step(self) -> Option<i32> {
        match self {
            InputAction::Up => Some(-1),
            InputAction::Down => Some(1),
            _ => None,
        }
    }

    /// Cursor step for menus navigated with either axis.
    pub fn any_step(self) -> Option<i32> {
        match self {
            InputAction::Up | InputAction::Left => Some(-1),
            InputAction::Down | InputAction::Right => Some(1),
            _ => None,
        }
    }
}

/// Maps physical keys to logical actions.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    bindings: Vec<(KeyCode, InputAction)>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyBindings {
    /// Arrow keys and WASD for directions, Enter/Space to confirm,
    /// Escape/Backspace to go back, E to interact, P to pause.
    pub fn new() -> Self {
        Self {
            bindings: vec![
                (KeyCode::Up, InputAction::Up),
                (KeyCode::W, InputAction::Up),
                (KeyCode::Down, InputAction::Down),
                (KeyCode::S, InputAction::Down),
                (KeyCode::Left, InputAction::Left),
                (KeyCode::A, InputAction::Left),
                (KeyCode::Right, InputAction::Right),
                (KeyCode::D, InputAction::Right),
                (KeyCode::Enter, InputAction::Confirm),
                (KeyCode::Space, InputAction::Confirm),
                (KeyCode::Escape, InputAction::Cancel),
                (KeyCode::Backspace, InputAction::Cancel),
                (KeyCode::E, InputAction::Interact),
                (KeyCode::P, InputAction::PauseToggle),
            ],
        }
    }

    /// All (key, action) pairs in polling order.
    pub fn iter(&self) -> impl Iterator<Item = (KeyCode, InputAction)> + '_ {
        self.bindings.iter().copied()
    }

    /// Keys bound to `action`.
    pub fn keys_for(&self, action: InputAction) -> impl Iterator<Item = KeyCode> + '_ {
        self.bindings
            .iter()
            .filter(move |(_, bound)| *bound == action)
            .map(|(key, _)| *key)
    }

    /// Rebinds `key` to `action`, replacing whatever it did before.
    pub fn bind(&mut self, key: KeyCode, action: InputAction) {
        self.bindings.retain(|(bound, _)| *bound != key);
        self.bindings.push((key, action));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bindings_cover_every_action() {
        let bindings = KeyBindings::new();
        for action in [
            InputAction::Up,
            InputAction::Down,
            InputAction::Left,
            InputAction::Right,
            InputAction::Confirm,
            InputAction::Cancel,
            InputAction::Interact,
            InputAction::PauseToggle,
        ] {
            assert!(bindings.keys_for(action).next().is_some(), "{:?} unbound", action);
        }
    }

    #[test]
    fn test_rebind_replaces_old_meaning() {
        let mut bindings = KeyBindings::new();
        bindings.bind(KeyCode::E, InputAction::Confirm);
        assert!(bindings.keys_for(InputAction::Interact).next().is_none());
        assert_eq!(bindings.keys_for(InputAction::Confirm).count(), 3);
    }

    #[test]
    fn test_steps() {
        assert_eq!(InputAction::Up.vertical_step(), Some(-1));
        assert_eq!(InputAction::Left.vertical_step(), None);
        assert_eq!(InputAction::Right.any_step(), Some(1));
        assert_eq!(InputAction::Confirm.any_step(), None);
    }
}
