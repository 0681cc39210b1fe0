//! # Creatures
//!
//! Battle participants, their moves, and the items the player can carry.

use crate::{PocketError, PocketResult};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use uuid::Uuid;

/// Stable identity of a creature, independent of its position in the party.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CreatureId(Uuid);

impl CreatureId {
    /// Creates a new unique creature ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for CreatureId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CreatureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque handle for a creature's battle sprite, resolved by the asset store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SpriteKey(pub Cow<'static, str>);

impl SpriteKey {
    /// Creates a key for a sprite file name.
    pub const fn fixed(file: &'static str) -> Self {
        Self(Cow::Borrowed(file))
    }

    /// File name of the sprite.
    pub fn file(&self) -> &str {
        &self.0
    }
}

static STRUGGLE: Move = Move::STRUGGLE;

/// An attack a creature can use.
///
/// # Examples
///
/// ```
/// use pocket_battle::Move;
///
/// let swipe = Move::new("Swipe", 18).unwrap();
/// assert_eq!(swipe.power, 18);
/// assert!(Move::new("Nothing", 0).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    /// Display name
    pub name: Cow<'static, str>,
    /// Base power, always positive
    pub power: u32,
}

impl Move {
    /// Fallback used when a creature knows no moves.
    pub const STRUGGLE: Move = Move::fixed("Struggle", 10);

    /// Builds a move from compile-time data.
    pub const fn fixed(name: &'static str, power: u32) -> Self {
        assert!(power > 0, "move power must be positive");
        Self {
            name: Cow::Borrowed(name),
            power,
        }
    }

    /// Builds a validated move.
    pub fn new(name: impl Into<String>, power: u32) -> PocketResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(PocketError::InvalidData("move name is empty".to_string()));
        }
        if power == 0 {
            return Err(PocketError::InvalidData(format!(
                "move {name} has zero power"
            )));
        }
        Ok(Self {
            name: Cow::Owned(name),
            power,
        })
    }
}

/// A creature that can battle, be captured, and join the party.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Creature {
    /// Stable identity
    pub id: CreatureId,
    /// Display name
    pub name: String,
    /// Maximum hit points
    pub max_hp: u32,
    hp: u32,
    /// Attack stat
    pub atk: u32,
    /// Defense stat
    pub def: u32,
    /// Speed stat
    pub speed: u32,
    /// Known moves in menu order
    pub moves: Vec<Move>,
    /// Battle sprite
    pub sprite: SpriteKey,
}

impl Creature {
    /// Creates a creature at full health with no moves.
    ///
    /// Every stat must be positive and the name non-empty.
    pub fn new(
        name: impl Into<String>,
        max_hp: u32,
        atk: u32,
        def: u32,
        speed: u32,
        sprite: SpriteKey,
    ) -> PocketResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(PocketError::InvalidData(
                "creature name is empty".to_string(),
            ));
        }
        if [max_hp, atk, def, speed].contains(&0) {
            return Err(PocketError::InvalidData(format!(
                "creature {name} has a zero stat"
            )));
        }
        Ok(Self {
            id: CreatureId::new(),
            name,
            max_hp,
            hp: max_hp,
            atk,
            def,
            speed,
            moves: Vec::new(),
            sprite,
        })
    }

    /// Replaces the move list.
    pub fn with_moves(mut self, moves: impl IntoIterator<Item = Move>) -> Self {
        self.moves = moves.into_iter().collect();
        self
    }

    /// Sets current hit points, clamped to `max_hp`.
    pub fn with_hp(mut self, hp: u32) -> Self {
        self.hp = hp.min(self.max_hp);
        self
    }

    /// Current hit points.
    pub fn hp(&self) -> u32 {
        self.hp
    }

    /// True while the creature can still fight.
    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    /// True if hit points are at maximum.
    pub fn is_full_hp(&self) -> bool {
        self.hp >= self.max_hp
    }

    /// Fraction of health remaining, in `[0, 1]`.
    pub fn hp_fraction(&self) -> f32 {
        self.hp as f32 / self.max_hp.max(1) as f32
    }

    /// The move at `index`, or Struggle if the creature knows none.
    pub fn move_at(&self, index: usize) -> &Move {
        self.moves.get(index).unwrap_or(&STRUGGLE)
    }

    /// Number of selectable moves, counting the Struggle fallback.
    pub fn move_count(&self) -> usize {
        self.moves.len().max(1)
    }

    /// Subtracts damage, saturating at zero. Returns remaining hit points.
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        self.hp = self.hp.saturating_sub(amount);
        self.hp
    }

    /// Adds up to `amount` hit points without exceeding `max_hp`.
    /// Returns the amount actually restored.
    pub(crate) fn restore(&mut self, amount: u32) -> u32 {
        let healed = amount.min(self.max_hp.saturating_sub(self.hp));
        self.hp += healed;
        healed
    }
}

/// Consumable items tracked by the roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Item {
    /// Restores hit points to a living creature
    Potion,
    /// Attempts to capture a wild creature
    CaptureBall,
}

impl Item {
    /// Display label.
    pub fn label(self) -> &'static str {
        match self {
            Item::Potion => "Potion",
            Item::CaptureBall => "Capture Ball",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raccoon() -> Creature {
        Creature::new("Raccoon", 100, 18, 10, 12, SpriteKey::fixed("raccoon_front.png"))
            .unwrap()
            .with_moves([Move::fixed("Swipe", 18)])
    }

    #[test]
    fn test_creature_starts_at_full_health() {
        let creature = raccoon();
        assert_eq!(creature.hp(), 100);
        assert!(creature.is_full_hp());
        assert!(creature.is_alive());
    }

    #[test]
    fn test_creature_rejects_zero_stats() {
        let sprite = SpriteKey::fixed("x.png");
        assert!(Creature::new("Blob", 0, 1, 1, 1, sprite.clone()).is_err());
        assert!(Creature::new("", 10, 1, 1, 1, sprite).is_err());
    }

    #[test]
    fn test_damage_saturates() {
        let mut creature = raccoon();
        assert_eq!(creature.take_damage(30), 70);
        assert_eq!(creature.take_damage(500), 0);
        assert!(!creature.is_alive());
    }

    #[test]
    fn test_restore_caps_at_max() {
        let mut creature = raccoon().with_hp(90);
        assert_eq!(creature.restore(40), 10);
        assert_eq!(creature.hp(), 100);
    }

    #[test]
    fn test_with_hp_clamps() {
        assert_eq!(raccoon().with_hp(1000).hp(), 100);
    }

    #[test]
    fn test_struggle_fallback() {
        let creature = raccoon().with_moves([]);
        assert_eq!(creature.move_count(), 1);
        assert_eq!(creature.move_at(0), &Move::STRUGGLE);
        assert_eq!(creature.move_at(0).power, 10);
    }

    #[test]
    fn test_ids_are_unique() {
        assert_ne!(raccoon().id, raccoon().id);
    }
}
