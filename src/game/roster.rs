//! # Roster
//!
//! The player's party of creatures and the item bag.
//!
//! The roster is the single source of truth for the active creature. It keeps
//! the active creature's [`CreatureId`] rather than a reference, and re-derives
//! it after every mutation so that the active member is alive whenever any
//! member is alive.

use crate::game::{Creature, CreatureId, Item};
use serde::{Deserialize, Serialize};

/// Why a roster operation was refused.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RosterError {
    /// Index does not name a party member
    #[error("no party member at slot {0}")]
    NoSuchMember(usize),

    /// Removing the member would leave no living creature
    #[error("cannot release the last healthy creature")]
    LastLivingMember,

    /// The member has fainted
    #[error("that creature has fainted")]
    Fainted,

    /// The bag holds no potions
    #[error("no potions left")]
    NoPotions,

    /// The member is already at full health
    #[error("that creature is already at full health")]
    AlreadyFull,
}

/// Party members plus item counts.
///
/// # Examples
///
/// ```
/// use pocket_battle::{Creature, Roster, SpriteKey};
///
/// let mut roster = Roster::with_items(1, 0);
/// let raccoon = Creature::new("Raccoon", 100, 18, 10, 12, SpriteKey::fixed("r.png")).unwrap();
/// roster.add(raccoon);
///
/// assert_eq!(roster.active().map(|c| c.name.as_str()), Some("Raccoon"));
/// assert!(roster.remove(0).is_err()); // last living member stays
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Roster {
    members: Vec<Creature>,
    active: Option<CreatureId>,
    potions: u32,
    capture_balls: u32,
}

impl Roster {
    /// Creates an empty roster with an empty bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty party with the given item counts.
    pub fn with_items(potions: u32, capture_balls: u32) -> Self {
        Self {
            potions,
            capture_balls,
            ..Self::default()
        }
    }

    /// Members in acquisition order.
    pub fn members(&self) -> &[Creature] {
        &self.members
    }

    /// Number of members, living or fainted.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// True if the party has no members at all.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Member at `index`.
    pub fn get(&self, index: usize) -> Option<&Creature> {
        self.members.get(index)
    }

    /// Slot of the active creature.
    pub fn active_index(&self) -> Option<usize> {
        let id = self.active?;
        self.members.iter().position(|c| c.id == id)
    }

    /// The active creature.
    pub fn active(&self) -> Option<&Creature> {
        self.active_index().and_then(|i| self.members.get(i))
    }

    /// True if `index` is the active slot.
    pub fn is_active(&self, index: usize) -> bool {
        self.active_index() == Some(index)
    }

    /// True if any member can still fight.
    pub fn has_usable(&self) -> bool {
        self.members.iter().any(Creature::is_alive)
    }

    /// Number of members with hit points left.
    pub fn living_count(&self) -> usize {
        self.members.iter().filter(|c| c.is_alive()).count()
    }

    /// Appends a creature. It becomes active if there was no usable active member.
    pub fn add(&mut self, creature: Creature) -> CreatureId {
        let id = creature.id;
        log::debug!("{} joined the party", creature.name);
        self.members.push(creature);
        if self.active_index().is_none() {
            self.active = Some(id);
        }
        self.rederive_active();
        id
    }

    /// Makes the member at `index` active. Fainted members are refused.
    pub fn set_active(&mut self, index: usize) -> Result<(), RosterError> {
        let member = self
            .members
            .get(index)
            .ok_or(RosterError::NoSuchMember(index))?;
        if !member.is_alive() {
            return Err(RosterError::Fainted);
        }
        self.active = Some(member.id);
        Ok(())
    }

    /// Releases the member at `index`.
    ///
    /// Refused if it is the last living member, even when fainted members remain.
    pub fn remove(&mut self, index: usize) -> Result<Creature, RosterError> {
        let member = self
            .members
            .get(index)
            .ok_or(RosterError::NoSuchMember(index))?;
        if member.is_alive() && self.living_count() <= 1 {
            return Err(RosterError::LastLivingMember);
        }
        let released = self.members.remove(index);
        self.rederive_active();
        Ok(released)
    }

    /// Uses one potion on the member at `index`.
    ///
    /// Fainted members cannot be revived. Returns the hit points restored.
    pub fn heal(&mut self, index: usize, amount: u32) -> Result<u32, RosterError> {
        let member = self
            .members
            .get_mut(index)
            .ok_or(RosterError::NoSuchMember(index))?;
        if self.potions == 0 {
            return Err(RosterError::NoPotions);
        }
        if !member.is_alive() {
            return Err(RosterError::Fainted);
        }
        if member.is_full_hp() {
            return Err(RosterError::AlreadyFull);
        }
        let healed = member.restore(amount);
        self.potions -= 1;
        Ok(healed)
    }

    /// Applies damage to the member at `index` and returns its remaining hit points.
    ///
    /// If the active creature faints, the first living member takes its place.
    pub fn damage_member(&mut self, index: usize, amount: u32) -> Result<u32, RosterError> {
        let member = self
            .members
            .get_mut(index)
            .ok_or(RosterError::NoSuchMember(index))?;
        let remaining = member.take_damage(amount);
        self.rederive_active();
        Ok(remaining)
    }

    /// How many of `item` are in the bag.
    pub fn count(&self, item: Item) -> u32 {
        match item {
            Item::Potion => self.potions,
            Item::CaptureBall => self.capture_balls,
        }
    }

    /// Adds `n` of `item` to the bag and returns the new count.
    pub fn add_items(&mut self, item: Item, n: u32) -> u32 {
        let slot = self.slot_mut(item);
        *slot = slot.saturating_add(n);
        *slot
    }

    /// Takes one `item` out of the bag. Returns false if there was none.
    pub fn consume(&mut self, item: Item) -> bool {
        let slot = self.slot_mut(item);
        if *slot == 0 {
            return false;
        }
        *slot -= 1;
        true
    }

    fn slot_mut(&mut self, item: Item) -> &mut u32 {
        match item {
            Item::Potion => &mut self.potions,
            Item::CaptureBall => &mut self.capture_balls,
        }
    }

    /// Restores the active invariant after the member list or hit points change.
    fn rederive_active(&mut self) {
        let current = self.active_index();
        let current_alive = current.is_some_and(|i| self.members[i].is_alive());
        if current_alive {
            return;
        }
        if let Some(living) = self.members.iter().find(|c| c.is_alive()) {
            log::debug!("{} is now the active creature", living.name);
            self.active = Some(living.id);
        } else if current.is_none() {
            self.active = self.members.first().map(|c| c.id);
        }
    }
}
