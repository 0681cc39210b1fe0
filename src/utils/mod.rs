//! # Utilities Module
//!
//! Timers, cursor arithmetic, and the random-source seam shared by the game systems.

pub mod math;
pub mod random;

pub use math::*;
pub use random::*;
