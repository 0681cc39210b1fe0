//! # Game Module
//!
//! Core game rules: creatures and moves, the party roster, battle math and
//! the battle state machine, and the overworld model.
//!
//! Nothing in here draws or polls input devices. The scene layer feeds
//! logical [`InputAction`](crate::InputAction)s in and the renderer reads
//! state back out.

pub mod battle;
pub mod combat;
pub mod creatures;
pub mod roster;
pub mod world;

pub use battle::*;
pub use combat::*;
pub use creatures::*;
pub use roster::*;
pub use world::*;
