//! # Party Overlay
//!
//! Two-level roster manager: a list of party members, and an action menu for
//! the selected member. Opened from the pause menu or from a battle.
//!
//! Potions used here during a battle heal whichever member the player picks,
//! and the heal does not give the opponent a turn.

use crate::game::{Roster, RosterError};
use crate::input::InputAction;
use crate::utils::{clamp_cursor, cycle_cursor, Cooldown};
use serde::{Deserialize, Serialize};

const NAV_COOLDOWN: f32 = 0.12;
const SELECT_COOLDOWN: f32 = 0.15;

/// Shown when releasing the last living member is refused.
pub const LAST_HEALTHY_NOTICE: &str = "Can't release your last healthy creature!";

/// What can be done to the selected party member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PartyAction {
    SetActive,
    Heal,
    Release,
    Back,
}

impl PartyAction {
    /// Menu order.
    pub const ALL: [PartyAction; 4] = [
        PartyAction::SetActive,
        PartyAction::Heal,
        PartyAction::Release,
        PartyAction::Back,
    ];

    /// Display label.
    pub fn label(self) -> &'static str {
        match self {
            PartyAction::SetActive => "SET ACTIVE",
            PartyAction::Heal => "HEAL",
            PartyAction::Release => "RELEASE",
            PartyAction::Back => "BACK",
        }
    }
}

/// Which of the two menus has the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PartyLevel {
    List,
    Actions,
}

/// Roster browser with per-member actions.
#[derive(Debug, Clone)]
pub struct PartyMenu {
    open: bool,
    from_battle: bool,
    level: PartyLevel,
    index: usize,
    action_index: usize,
    cooldown: Cooldown,
    notice: Option<String>,
}

impl Default for PartyMenu {
    fn default() -> Self {
        Self::new()
    }
}

impl PartyMenu {
    /// Creates a closed party overlay.
    pub fn new() -> Self {
        Self {
            open: false,
            from_battle: false,
            level: PartyLevel::List,
            index: 0,
            action_index: 0,
            cooldown: Cooldown::default(),
            notice: None,
        }
    }

    /// Opens on the member list. `from_battle` marks a battle as waiting underneath.
    pub fn open(&mut self, from_battle: bool) {
        self.open = true;
        self.from_battle = from_battle;
        self.level = PartyLevel::List;
        self.notice = None;
    }

    /// Closes the overlay.
    pub fn close(&mut self) {
        self.open = false;
        self.level = PartyLevel::List;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn from_battle(&self) -> bool {
        self.from_battle
    }

    pub fn level(&self) -> PartyLevel {
        self.level
    }

    /// Selected party slot.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Highlighted action.
    pub fn action_index(&self) -> usize {
        self.action_index
    }

    /// Message for a refused action, if any.
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn cooldown(&self) -> Cooldown {
        self.cooldown
    }

    pub fn update(&mut self, dt: f32) {
        self.cooldown.tick(dt);
    }

    /// Consumes input, mutating the roster for confirmed actions.
    ///
    /// Potions restore up to `heal_amount` hit points.
    pub fn handle(&mut self, actions: &[InputAction], roster: &mut Roster, heal_amount: u32) {
        for &action in actions {
            if !self.open || !self.cooldown.is_ready() {
                break;
            }
            self.handle_action(action, roster, heal_amount);
        }
    }

    fn handle_action(&mut self, action: InputAction, roster: &mut Roster, heal_amount: u32) {
        if action == InputAction::Cancel {
            match self.level {
                PartyLevel::Actions => self.level = PartyLevel::List,
                PartyLevel::List => self.close(),
            }
            self.notice = None;
            self.cooldown.arm(SELECT_COOLDOWN);
            return;
        }

        if roster.is_empty() {
            return;
        }
        self.index = clamp_cursor(self.index, roster.len());

        match self.level {
            PartyLevel::List => {
                if let Some(step) = action.vertical_step() {
                    self.index = cycle_cursor(self.index, step, roster.len());
                    self.notice = None;
                    self.cooldown.arm(NAV_COOLDOWN);
                } else if action == InputAction::Confirm {
                    self.level = PartyLevel::Actions;
                    self.action_index = 0;
                    self.cooldown.arm(SELECT_COOLDOWN);
                }
            }
            PartyLevel::Actions => {
                if let Some(step) = action.vertical_step() {
                    self.action_index =
                        cycle_cursor(self.action_index, step, PartyAction::ALL.len());
                    self.cooldown.arm(NAV_COOLDOWN);
                } else if action == InputAction::Confirm {
                    self.apply(PartyAction::ALL[self.action_index], roster, heal_amount);
                    self.cooldown.arm(SELECT_COOLDOWN);
                }
            }
        }
    }

    fn apply(&mut self, action: PartyAction, roster: &mut Roster, heal_amount: u32) {
        let index = self.index;
        match action {
            PartyAction::SetActive => match roster.set_active(index) {
                Ok(()) => {
                    if let Some(member) = roster.get(index) {
                        log::info!("{} is now active", member.name);
                    }
                    self.level = PartyLevel::List;
                }
                Err(e) => log::debug!("Switch refused: {}", e),
            },
            PartyAction::Heal => match roster.heal(index, heal_amount) {
                Ok(healed) => log::debug!("Potion restored {} hp to slot {}", healed, index),
                Err(e) => log::debug!("Heal refused: {}", e),
            },
            PartyAction::Release => match roster.remove(index) {
                Ok(released) => {
                    log::info!("Released {}", released.name);
                    self.index = clamp_cursor(index, roster.len());
                    self.level = PartyLevel::List;
                }
                Err(RosterError::LastLivingMember) => {
                    self.notice = Some(LAST_HEALTHY_NOTICE.to_string());
                }
                Err(e) => log::debug!("Release refused: {}", e),
            },
            PartyAction::Back => self.level = PartyLevel::List,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Creature, SpriteKey};
    use InputAction::*;

    fn creature(name: &str, hp: u32) -> Creature {
        Creature::new(name, 100, 10, 10, 10, SpriteKey::fixed("c.png"))
            .unwrap()
            .with_hp(hp)
    }

    fn press(menu: &mut PartyMenu, roster: &mut Roster, action: InputAction) {
        menu.handle(&[action], roster, 40);
        menu.update(1.0);
    }

    fn choose(menu: &mut PartyMenu, roster: &mut Roster, slot: usize, action: PartyAction) {
        while menu.index() != slot {
            press(menu, roster, Down);
        }
        press(menu, roster, Confirm);
        while PartyAction::ALL[menu.action_index()] != action {
            press(menu, roster, Down);
        }
        press(menu, roster, Confirm);
    }

    #[test]
    fn test_cancel_pops_one_level() {
        let mut roster = Roster::new();
        roster.add(creature("A", 100));
        let mut menu = PartyMenu::new();
        menu.open(false);

        press(&mut menu, &mut roster, Confirm);
        assert_eq!(menu.level(), PartyLevel::Actions);
        press(&mut menu, &mut roster, Cancel);
        assert_eq!(menu.level(), PartyLevel::List);
        assert!(menu.is_open());
        press(&mut menu, &mut roster, Cancel);
        assert!(!menu.is_open());
    }

    #[test]
    fn test_cancel_closes_empty_roster() {
        let mut roster = Roster::new();
        let mut menu = PartyMenu::new();
        menu.open(false);
        press(&mut menu, &mut roster, Confirm);
        assert_eq!(menu.level(), PartyLevel::List);
        press(&mut menu, &mut roster, Cancel);
        assert!(!menu.is_open());
    }

    #[test]
    fn test_list_wraps() {
        let mut roster = Roster::new();
        roster.add(creature("A", 100));
        roster.add(creature("B", 100));
        let mut menu = PartyMenu::new();
        menu.open(false);
        press(&mut menu, &mut roster, Up);
        assert_eq!(menu.index(), 1);
        press(&mut menu, &mut roster, Down);
        assert_eq!(menu.index(), 0);
    }

    #[test]
    fn test_cooldown_limits_to_one_action() {
        let mut roster = Roster::new();
        roster.add(creature("A", 100));
        roster.add(creature("B", 100));
        roster.add(creature("C", 100));
        let mut menu = PartyMenu::new();
        menu.open(false);
        menu.handle(&[Down, Down], &mut roster, 40);
        assert_eq!(menu.index(), 1);
        menu.update(0.05);
        menu.handle(&[Down], &mut roster, 40);
        assert_eq!(menu.index(), 1);
    }

    #[test]
    fn test_set_active() {
        let mut roster = Roster::new();
        roster.add(creature("A", 100));
        roster.add(creature("B", 100));
        let mut menu = PartyMenu::new();
        menu.open(false);

        choose(&mut menu, &mut roster, 1, PartyAction::SetActive);
        assert_eq!(roster.active_index(), Some(1));
        assert_eq!(menu.level(), PartyLevel::List);
    }

    #[test]
    fn test_set_active_refuses_fainted() {
        let mut roster = Roster::new();
        roster.add(creature("A", 100));
        roster.add(creature("B", 0));
        let mut menu = PartyMenu::new();
        menu.open(true);

        choose(&mut menu, &mut roster, 1, PartyAction::SetActive);
        assert_eq!(roster.active_index(), Some(0));
        assert_eq!(menu.level(), PartyLevel::Actions);
    }

    #[test]
    fn test_heal_uses_potion_on_selected() {
        let mut roster = Roster::with_items(2, 0);
        roster.add(creature("A", 100));
        roster.add(creature("B", 30));
        let mut menu = PartyMenu::new();
        menu.open(true);

        choose(&mut menu, &mut roster, 1, PartyAction::Heal);
        assert_eq!(roster.get(1).unwrap().hp(), 70);
        assert_eq!(roster.count(crate::game::Item::Potion), 1);
        assert_eq!(menu.level(), PartyLevel::Actions);
    }

    #[test]
    fn test_heal_at_full_hp_is_silent_noop() {
        let mut roster = Roster::with_items(2, 0);
        roster.add(creature("A", 100));
        let mut menu = PartyMenu::new();
        menu.open(false);

        choose(&mut menu, &mut roster, 0, PartyAction::Heal);
        assert_eq!(roster.count(crate::game::Item::Potion), 2);
        assert!(menu.notice().is_none());
    }

    #[test]
    fn test_release_last_living_sets_notice() {
        let mut roster = Roster::new();
        roster.add(creature("A", 100));
        roster.add(creature("B", 0));
        let mut menu = PartyMenu::new();
        menu.open(false);

        choose(&mut menu, &mut roster, 0, PartyAction::Release);
        assert_eq!(roster.len(), 2);
        assert_eq!(menu.notice(), Some(LAST_HEALTHY_NOTICE));

        press(&mut menu, &mut roster, Cancel);
        assert!(menu.notice().is_none());
    }

    #[test]
    fn test_release_clamps_cursor() {
        let mut roster = Roster::new();
        roster.add(creature("A", 100));
        roster.add(creature("B", 100));
        let mut menu = PartyMenu::new();
        menu.open(false);

        choose(&mut menu, &mut roster, 1, PartyAction::Release);
        assert_eq!(roster.len(), 1);
        assert_eq!(menu.index(), 0);
        assert_eq!(menu.level(), PartyLevel::List);
    }
}
