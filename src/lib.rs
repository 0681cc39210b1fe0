//! # Pocket Battle
//!
//! A 2D exploration-and-capture RPG: walk a tile map, stumble into wild
//! creatures in tall grass, and fight or catch them in turn-based battles.
//!
//! ## Architecture Overview
//!
//! - **Game**: creatures, combat formulas, the party roster, the battle state
//!   machine and the overworld model. Pure logic, no drawing.
//! - **Scenes**: the mode controller that decides who receives input each
//!   frame (world, battle, or one of the overlays).
//! - **Overlays**: dialogue, pause and party menus that freeze what is under
//!   them.
//! - **Generation**: map loading and wild encounter rolls.
//! - **Rendering**: macroquad drawing, a pure read of controller state.
//!
//! All randomness flows through [`RandomSource`], so a seeded or scripted
//! source makes any game reproducible.

pub mod config;
pub mod game;
pub mod generation;
pub mod input;
pub mod overlays;
pub mod rendering;
pub mod scenes;
pub mod utils;

// Core module re-exports
pub use game::*;
pub use generation::*;
pub use input::*;
pub use overlays::*;
pub use rendering::*;
pub use scenes::*;
pub use utils::*;

pub use config::{GameConfig, StartingState, TileConfig};

/// Core error type for the game.
#[derive(thiserror::Error, Debug)]
pub enum PocketError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// A roster operation was refused
    #[error("Roster error: {0}")]
    Roster(#[from] RosterError),

    /// Malformed game data (creature stats, moves)
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Game state is invalid
    #[error("Invalid game state: {0}")]
    InvalidState(String),
}

/// Result type used throughout the codebase.
pub type PocketResult<T> = Result<T, PocketError>;

/// Version information for the game.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roster_error_converts() {
        let err: PocketError = RosterError::LastLivingMember.into();
        assert!(matches!(err, PocketError::Roster(RosterError::LastLivingMember)));
        assert!(err.to_string().contains("last healthy creature"));
    }

    #[test]
    fn test_serde_error_converts() {
        let err = GameConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, PocketError::Serde(_)));
    }
}
