//! # Combat Math
//!
//! Pure battle formulas. The only source of nondeterminism is the injected
//! [`RandomSource`].

use crate::game::{Creature, Move};
use crate::RandomSource;

/// Half-width of the symmetric damage jitter.
pub const DAMAGE_JITTER: i32 = 2;

/// Lowest capture probability, even against a full-health creature.
pub const MIN_CAPTURE_CHANCE: f64 = 0.05;

/// Highest capture probability, even against a nearly fainted creature.
pub const MAX_CAPTURE_CHANCE: f64 = 0.85;

/// Damage dealt by `attacker` using `mv` against `defender`.
///
/// `power + atk - def`, plus a jitter in `[-2, 2]`, floored at 1 so every
/// hit makes progress and capped at `u32::MAX`.
///
/// # Examples
///
/// ```
/// use pocket_battle::{damage, Creature, Move, ScriptedRandom, SpriteKey};
///
/// let sprite = SpriteKey::fixed("x.png");
/// let raccoon = Creature::new("Raccoon", 100, 18, 10, 12, sprite.clone()).unwrap();
/// let python = Creature::new("Python", 120, 20, 14, 8, sprite).unwrap();
/// let mut rng = ScriptedRandom::new().with_jitters([-2]);
///
/// assert_eq!(damage(&raccoon, &python, &Move::fixed("Swipe", 20), &mut rng), 22);
/// ```
pub fn damage(
    attacker: &Creature,
    defender: &Creature,
    mv: &Move,
    rng: &mut dyn RandomSource,
) -> u32 {
    let base = mv.power as i64 + attacker.atk as i64 - defender.def as i64;
    let rolled = base + rng.jitter(DAMAGE_JITTER) as i64;
    rolled.clamp(1, i64::from(u32::MAX)) as u32
}

/// Probability that a capture ball succeeds against `enemy`.
///
/// `1 - hp / max_hp`, clamped to `[0.05, 0.85]`.
pub fn capture_chance(enemy: &Creature) -> f64 {
    let missing = 1.0 - enemy.hp() as f64 / enemy.max_hp.max(1) as f64;
    missing.clamp(MIN_CAPTURE_CHANCE, MAX_CAPTURE_CHANCE)
}

/// Rolls a capture attempt against `enemy`.
pub fn roll_capture(enemy: &Creature, rng: &mut dyn RandomSource) -> bool {
    rng.chance() < capture_chance(enemy)
}

/// Picks a uniformly random move for an AI-controlled creature.
pub fn choose_move<'a>(creature: &'a Creature, rng: &mut dyn RandomSource) -> &'a Move {
    creature.move_at(rng.pick(creature.move_count()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ScriptedRandom, SpriteKey};
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn creature(max_hp: u32, atk: u32, def: u32) -> Creature {
        Creature::new("Test", max_hp, atk, def, 5, SpriteKey::fixed("t.png")).unwrap()
    }

    #[test]
    fn test_damage_scenario_range() {
        let player = creature(100, 18, 10);
        let enemy = creature(120, 20, 14);
        let mv = Move::fixed("Strike", 20);
        let mut rng = StdRng::seed_from_u64(99);

        for _ in 0..200 {
            let dealt = damage(&player, &enemy, &mv, &mut rng);
            assert!((19..=29).contains(&dealt), "damage {} out of range", dealt);
            assert!((22..=26).contains(&dealt));
        }
    }

    #[test]
    fn test_damage_floors_at_one() {
        let weak = creature(10, 1, 1);
        let wall = creature(10, 1, 500);
        let mut rng = ScriptedRandom::new().with_jitters([-2]);
        assert_eq!(damage(&weak, &wall, &Move::STRUGGLE, &mut rng), 1);
    }

    #[test]
    fn test_damage_saturates_on_huge_stats() {
        let giant = Creature::new("Giant", 10, u32::MAX, 1, 5, SpriteKey::fixed("g.png")).unwrap();
        let target = creature(10, 1, 1);
        let mv = Move::fixed("Crush", u32::MAX);
        let mut rng = ScriptedRandom::new().with_jitters([2]);
        assert_eq!(damage(&giant, &target, &mv, &mut rng), u32::MAX);
    }

    #[test]
    fn test_capture_chance_bounds() {
        assert_eq!(capture_chance(&creature(100, 1, 1)), MIN_CAPTURE_CHANCE);
        assert_eq!(capture_chance(&creature(100, 1, 1).with_hp(1)), MAX_CAPTURE_CHANCE);
        assert_eq!(capture_chance(&creature(100, 1, 1).with_hp(0)), MAX_CAPTURE_CHANCE);
        let half = capture_chance(&creature(100, 1, 1).with_hp(50));
        assert!((half - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_roll_capture_uses_chance() {
        let enemy = creature(100, 1, 1).with_hp(50);
        let mut rng = ScriptedRandom::new().with_chances([0.49, 0.51]);
        assert!(roll_capture(&enemy, &mut rng));
        assert!(!roll_capture(&enemy, &mut rng));
    }

    #[test]
    fn test_choose_move_falls_back_to_struggle() {
        let mut rng = ScriptedRandom::new().with_picks([3]);
        let moveless = creature(10, 1, 1);
        let mv = choose_move(&moveless, &mut rng);
        assert_eq!(mv, &Move::STRUGGLE);
    }

    #[test]
    fn test_choose_move_uses_pick() {
        let attacker = creature(10, 1, 1)
            .with_moves([Move::fixed("Peck", 15), Move::fixed("Wing Slash", 22)]);
        let mut rng = ScriptedRandom::new().with_picks([1]);
        assert_eq!(choose_move(&attacker, &mut rng).name, "Wing Slash");
    }

    proptest! {
        #[test]
        fn prop_damage_is_at_least_one(
            power in 1u32..200,
            atk in 1u32..200,
            def in 1u32..400,
            seed in any::<u64>(),
        ) {
            let attacker = creature(50, atk, 5);
            let defender = creature(50, 5, def);
            let mut rng = StdRng::seed_from_u64(seed);
            let mv = Move::new("Any", power).unwrap();
            prop_assert!(damage(&attacker, &defender, &mv, &mut rng) >= 1);
        }

        #[test]
        fn prop_capture_chance_bounded_and_monotonic(max_hp in 1u32..500, a in 0u32..500, b in 0u32..500) {
            let (low, high) = if a <= b { (a, b) } else { (b, a) };
            let weaker = capture_chance(&creature(max_hp, 1, 1).with_hp(low));
            let stronger = capture_chance(&creature(max_hp, 1, 1).with_hp(high));
            prop_assert!((MIN_CAPTURE_CHANCE..=MAX_CAPTURE_CHANCE).contains(&weaker));
            prop_assert!((MIN_CAPTURE_CHANCE..=MAX_CAPTURE_CHANCE).contains(&stronger));
            prop_assert!(stronger <= weaker);
        }
    }
}
