//! Single-line message box shown at the bottom of the screen.

use crate::input::InputAction;

/// A message the player dismisses with Confirm or Cancel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DialogueBox {
    open: bool,
    text: String,
}

impl DialogueBox {
    /// Creates a closed dialogue box.
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens the box with `text`.
    pub fn show(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.open = true;
    }

    /// Closes the box.
    pub fn close(&mut self) {
        self.open = false;
    }

    /// True while the box is on screen.
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Text being shown.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Consumes input. Confirm or Cancel closes the box; everything else is swallowed.
    pub fn handle(&mut self, actions: &[InputAction]) {
        if actions
            .iter()
            .any(|a| matches!(a, InputAction::Confirm | InputAction::Cancel))
        {
            self.close();
        }
    }
}
