//! # Overlays
//!
//! Modal layers drawn over the world or a battle. While one is open it owns
//! input and the layer underneath is frozen.

pub mod dialogue;
pub mod party;
pub mod pause;

pub use dialogue::*;
pub use party::*;
pub use pause::*;
