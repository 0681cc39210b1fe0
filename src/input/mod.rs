//! # Input Module
//!
//! Turns the keyboard into two channels per frame: a continuous sample of the
//! held directions (for walking) and a queue of discrete actions (for menus).

pub mod commands;

pub use commands::*;

use macroquad::prelude::*;
use serde::{Deserialize, Serialize};

/// Which directions are held down this frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectionalState {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl DirectionalState {
    /// True if no direction is held.
    pub fn is_idle(&self) -> bool {
        !(self.up || self.down || self.left || self.right)
    }
}

/// Everything the game learns from the input device in one frame.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameInput {
    /// Held directions, sampled once per frame
    pub held: DirectionalState,
    /// Discrete key presses, in polling order
    pub actions: Vec<InputAction>,
}

impl FrameInput {
    /// A frame with only discrete actions.
    pub fn actions(actions: impl IntoIterator<Item = InputAction>) -> Self {
        Self {
            held: DirectionalState::default(),
            actions: actions.into_iter().collect(),
        }
    }

    /// A frame with only held directions.
    pub fn holding(held: DirectionalState) -> Self {
        Self {
            held,
            actions: Vec::new(),
        }
    }
}

/// Input handler that polls macroquad's keyboard state.
///
/// # Examples
///
/// ```
/// use pocket_battle::InputHandler;
///
/// let input_handler = InputHandler::new();
/// // Ready to poll once per frame
/// ```
pub struct InputHandler {
    bindings: KeyBindings,
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl InputHandler {
    /// Creates a handler with the default key bindings.
    pub fn new() -> Self {
        Self::with_bindings(KeyBindings::new())
    }

    /// Creates a handler with custom key bindings.
    pub fn with_bindings(bindings: KeyBindings) -> Self {
        Self { bindings }
    }

    /// Samples both input channels for the current frame.
    pub fn poll(&self) -> FrameInput {
        let mut frame = FrameInput::default();
        for (key, action) in self.bindings.iter() {
            if is_key_down(key) {
                match action {
                    InputAction::Up => frame.held.up = true,
                    InputAction::Down => frame.held.down = true,
                    InputAction::Left => frame.held.left = true,
                    InputAction::Right => frame.held.right = true,
                    _ => {}
                }
            }
            if is_key_pressed(key) && !frame.actions.contains(&action) {
                frame.actions.push(action);
            }
        }
        frame
    }
}
