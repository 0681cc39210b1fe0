//! # Encounter Generation
//!
//! The species the game knows about and the table wild opponents are drawn
//! from.

use crate::config::GameConfig;
use crate::game::{Creature, Move, SpriteKey};
use crate::generation::Generator;
use crate::{PocketError, PocketResult, RandomSource};

/// Base stats and moves shared by every creature of a kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Species {
    pub name: &'static str,
    pub max_hp: u32,
    pub atk: u32,
    pub def: u32,
    pub speed: u32,
    pub moves: &'static [(&'static str, u32)],
    pub sprite: &'static str,
}

impl Species {
    /// Creates a fresh, full-health creature of this species.
    pub fn spawn(&self) -> PocketResult<Creature> {
        let moves = self
            .moves
            .iter()
            .map(|&(name, power)| Move::new(name, power))
            .collect::<PocketResult<Vec<_>>>()?;
        Ok(Creature::new(
            self.name,
            self.max_hp,
            self.atk,
            self.def,
            self.speed,
            SpriteKey::fixed(self.sprite),
        )?
        .with_moves(moves))
    }
}

pub const RACCOON: Species = Species {
    name: "Raccoon",
    max_hp: 100,
    atk: 18,
    def: 10,
    speed: 12,
    moves: &[("Swipe", 18), ("Pounce", 25)],
    sprite: "raccoon_front.png",
};

pub const PYTHON: Species = Species {
    name: "Python",
    max_hp: 120,
    atk: 20,
    def: 14,
    speed: 8,
    moves: &[("Constrict", 20), ("Venom Bite", 24)],
    sprite: "python_front.png",
};

pub const RAVEN: Species = Species {
    name: "Raven",
    max_hp: 90,
    atk: 16,
    def: 12,
    speed: 25,
    moves: &[("Peck", 15), ("Wing Slash", 22)],
    sprite: "raven_front.png",
};

/// Species that show up in tall grass.
pub const WILD_SPECIES: &[Species] = &[PYTHON, RAVEN];

/// The creature a new game starts with.
pub fn starter() -> PocketResult<Creature> {
    RACCOON.spawn()
}

/// Decides whether an encounter happens and which creature appears.
///
/// # Examples
///
/// ```
/// use pocket_battle::{EncounterTable, ScriptedRandom};
///
/// let table = EncounterTable::wild();
/// let mut rng = ScriptedRandom::new().with_chances([0.05]).with_picks([1]);
///
/// assert!(table.triggers(0.12, &mut rng));
/// assert_eq!(table.roll_opponent(&mut rng).unwrap().name, "Raven");
/// ```
#[derive(Debug, Clone)]
pub struct EncounterTable {
    species: Vec<Species>,
}

impl Default for EncounterTable {
    fn default() -> Self {
        Self::wild()
    }
}

impl EncounterTable {
    /// A table over the given species, picked uniformly.
    pub fn new(species: impl IntoIterator<Item = Species>) -> Self {
        Self {
            species: species.into_iter().collect(),
        }
    }

    /// The route's wild species.
    pub fn wild() -> Self {
        Self::new(WILD_SPECIES.iter().copied())
    }

    /// Species in the table.
    pub fn species(&self) -> &[Species] {
        &self.species
    }

    /// Rolls whether stepping on a fresh encounter tile starts a battle.
    pub fn triggers(&self, rate: f64, rng: &mut dyn RandomSource) -> bool {
        rng.chance() < rate
    }

    /// Spawns a uniformly chosen wild creature.
    pub fn roll_opponent(&self, rng: &mut dyn RandomSource) -> PocketResult<Creature> {
        if self.species.is_empty() {
            return Err(PocketError::InvalidState(
                "encounter table has no species".to_string(),
            ));
        }
        let species = &self.species[rng.pick(self.species.len())];
        log::debug!("Rolled wild {}", species.name);
        species.spawn()
    }
}

impl Generator<Creature> for EncounterTable {
    fn generate(&self, _config: &GameConfig, rng: &mut dyn RandomSource) -> PocketResult<Creature> {
        self.roll_opponent(rng)
    }

    fn generator_type(&self) -> &'static str {
        "EncounterTable"
    }
}
