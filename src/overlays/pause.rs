//! Pause menu opened from the overworld.

use crate::input::InputAction;
use crate::utils::cycle_cursor;
use serde::{Deserialize, Serialize};

/// Something the pause menu asks its owner to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PauseCommand {
    /// Close the menu and keep playing
    Resume,
    /// Show the item counts
    Bag,
    /// Open the party overlay
    Party,
    /// Leave the game
    Quit,
}

impl PauseCommand {
    /// Menu order.
    pub const ALL: [PauseCommand; 4] = [
        PauseCommand::Resume,
        PauseCommand::Bag,
        PauseCommand::Party,
        PauseCommand::Quit,
    ];

    /// Display label.
    pub fn label(self) -> &'static str {
        match self {
            PauseCommand::Resume => "RESUME",
            PauseCommand::Bag => "BAG",
            PauseCommand::Party => "PARTY",
            PauseCommand::Quit => "QUIT",
        }
    }
}

/// Vertical list of [`PauseCommand`]s.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PauseMenu {
    open: bool,
    cursor: usize,
}

impl PauseMenu {
    /// Creates a closed pause menu.
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a closed menu and closes an open one.
    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    /// Closes the menu.
    pub fn close(&mut self) {
        self.open = false;
    }

    /// True while the menu is on screen.
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Highlighted option.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Consumes input and returns the confirmed command, if any.
    ///
    /// Resume and Cancel close the menu here; the other commands are left
    /// for the owner to carry out.
    pub fn handle(&mut self, actions: &[InputAction]) -> Option<PauseCommand> {
        for &action in actions {
            if let Some(step) = action.vertical_step() {
                self.cursor = cycle_cursor(self.cursor, step, PauseCommand::ALL.len());
                continue;
            }
            match action {
                InputAction::Cancel => {
                    self.close();
                    return None;
                }
                InputAction::Confirm => {
                    let command = PauseCommand::ALL[self.cursor];
                    if command == PauseCommand::Resume {
                        self.close();
                    }
                    return Some(command);
                }
                _ => {}
            }
        }
        None
    }
}
