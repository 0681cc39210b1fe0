//! # Random Source
//!
//! Every random decision in the game (damage jitter, enemy move choice,
//! capture and encounter rolls) goes through [`RandomSource`], so callers can
//! inject a seeded `StdRng` or a fully scripted sequence.

use rand::Rng;
use std::collections::VecDeque;

/// The random operations the game needs.
pub trait RandomSource {
    /// Uniform integer in `[-spread, spread]`.
    fn jitter(&mut self, spread: i32) -> i32;

    /// Uniform float in `[0, 1)`.
    fn chance(&mut self) -> f64;

    /// Uniform index in `0..len`. Returns 0 when `len` is 0.
    fn pick(&mut self, len: usize) -> usize;
}

impl<R: Rng + ?Sized> RandomSource for R {
    fn jitter(&mut self, spread: i32) -> i32 {
        let spread = spread.abs();
        self.gen_range(-spread..=spread)
    }

    fn chance(&mut self) -> f64 {
        self.gen::<f64>()
    }

    fn pick(&mut self, len: usize) -> usize {
        if len == 0 {
            0
        } else {
            self.gen_range(0..len)
        }
    }
}

/// A random source that replays queued values.
///
/// Once a queue runs dry the source falls back to a fixed value: no jitter,
/// the configured default chance, and the first index.
///
/// # Examples
///
/// ```
/// use pocket_battle::{RandomSource, ScriptedRandom};
///
/// let mut rng = ScriptedRandom::new().with_jitters([2, -2]).with_chances([0.01]);
/// assert_eq!(rng.jitter(2), 2);
/// assert_eq!(rng.jitter(2), -2);
/// assert_eq!(rng.jitter(2), 0);
/// assert_eq!(rng.chance(), 0.01);
/// assert_eq!(rng.chance(), 0.5);
/// ```
#[derive(Debug, Clone)]
pub struct ScriptedRandom {
    jitters: VecDeque<i32>,
    chances: VecDeque<f64>,
    picks: VecDeque<usize>,
    default_chance: f64,
}

impl Default for ScriptedRandom {
    fn default() -> Self {
        Self::new()
    }
}

impl ScriptedRandom {
    /// Creates an empty script.
    pub fn new() -> Self {
        Self {
            jitters: VecDeque::new(),
            chances: VecDeque::new(),
            picks: VecDeque::new(),
            default_chance: 0.5,
        }
    }

    /// Queues jitter values, returned in order.
    pub fn with_jitters(mut self, values: impl IntoIterator<Item = i32>) -> Self {
        self.jitters.extend(values);
        self
    }

    /// Queues chance rolls, returned in order.
    pub fn with_chances(mut self, values: impl IntoIterator<Item = f64>) -> Self {
        self.chances.extend(values);
        self
    }

    /// Queues picked indices, returned in order.
    pub fn with_picks(mut self, values: impl IntoIterator<Item = usize>) -> Self {
        self.picks.extend(values);
        self
    }

    /// Sets the roll returned after the chance queue is exhausted.
    pub fn with_default_chance(mut self, value: f64) -> Self {
        self.default_chance = value;
        self
    }
}

impl RandomSource for ScriptedRandom {
    fn jitter(&mut self, spread: i32) -> i32 {
        let spread = spread.abs();
        self.jitters
            .pop_front()
            .unwrap_or(0)
            .clamp(-spread, spread)
    }

    fn chance(&mut self) -> f64 {
        self.chances.pop_front().unwrap_or(self.default_chance)
    }

    fn pick(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        self.picks.pop_front().unwrap_or(0) % len
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_std_rng_stays_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            let j = rng.jitter(2);
            assert!((-2..=2).contains(&j));
            let c = RandomSource::chance(&mut rng);
            assert!((0.0..1.0).contains(&c));
            assert!(rng.pick(3) < 3);
        }
        assert_eq!(rng.pick(0), 0);
    }

    #[test]
    fn test_scripted_clamps_and_wraps() {
        let mut rng = ScriptedRandom::new().with_jitters([9]).with_picks([5]);
        assert_eq!(rng.jitter(2), 2);
        assert_eq!(rng.pick(2), 1);
        assert_eq!(rng.pick(2), 0);
    }

    #[test]
    fn test_scripted_works_as_trait_object() {
        let mut boxed: Box<dyn RandomSource> =
            Box::new(ScriptedRandom::new().with_default_chance(0.9));
        assert_eq!(boxed.chance(), 0.9);
    }
}
