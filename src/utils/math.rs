//! # Game Mathematics
//!
//! Small numeric helpers used by every menu and timer in the game.

use serde::{Deserialize, Serialize};

/// Input debounce timer.
///
/// Menus ignore input while the cooldown is running and re-arm it every time
/// an action is accepted.
///
/// # Examples
///
/// ```
/// use pocket_battle::Cooldown;
///
/// let mut cooldown = Cooldown::default();
/// assert!(cooldown.is_ready());
///
/// cooldown.arm(0.15);
/// assert!(!cooldown.is_ready());
///
/// cooldown.tick(0.2);
/// assert!(cooldown.is_ready());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Cooldown {
    remaining: f32,
}

impl Cooldown {
    /// Starts (or restarts) the cooldown for the given number of seconds.
    pub fn arm(&mut self, seconds: f32) {
        self.remaining = seconds.max(0.0);
    }

    /// Advances the timer, saturating at zero.
    pub fn tick(&mut self, dt: f32) {
        self.remaining = (self.remaining - dt).max(0.0);
    }

    /// Returns true once the cooldown has fully elapsed.
    pub fn is_ready(&self) -> bool {
        self.remaining <= 0.0
    }

    /// Seconds left before input is accepted again.
    pub fn remaining(&self) -> f32 {
        self.remaining
    }
}

/// Moves a menu cursor by `delta`, wrapping around both ends.
///
/// An empty menu always yields 0.
///
/// # Examples
///
/// ```
/// use pocket_battle::cycle_cursor;
///
/// assert_eq!(cycle_cursor(0, -1, 4), 3);
/// assert_eq!(cycle_cursor(3, 1, 4), 0);
/// assert_eq!(cycle_cursor(2, 1, 0), 0);
/// ```
pub fn cycle_cursor(cursor: usize, delta: i32, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    let len = len as i64;
    (cursor as i64 + delta as i64).rem_euclid(len) as usize
}

/// Clamps a cursor into `0..len`, yielding 0 for an empty list.
pub fn clamp_cursor(cursor: usize, len: usize) -> usize {
    cursor.min(len.saturating_sub(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cooldown_saturates_at_zero() {
        let mut cooldown = Cooldown::default();
        cooldown.arm(0.1);
        cooldown.tick(1.0);
        assert_eq!(cooldown.remaining(), 0.0);
        assert!(cooldown.is_ready());
    }

    #[test]
    fn test_cooldown_rearm_replaces_remaining() {
        let mut cooldown = Cooldown::default();
        cooldown.arm(0.2);
        cooldown.tick(0.05);
        cooldown.arm(0.12);
        assert!((cooldown.remaining() - 0.12).abs() < f32::EPSILON);
    }

    #[test]
    fn test_cycle_cursor_wraps() {
        assert_eq!(cycle_cursor(1, 1, 2), 0);
        assert_eq!(cycle_cursor(0, -1, 2), 1);
        assert_eq!(cycle_cursor(0, 1, 1), 0);
    }

    #[test]
    fn test_clamp_cursor() {
        assert_eq!(clamp_cursor(5, 3), 2);
        assert_eq!(clamp_cursor(1, 3), 1);
        assert_eq!(clamp_cursor(4, 0), 0);
    }
}
