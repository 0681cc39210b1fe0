//! # Battle State Machine
//!
//! One wild encounter from the first menu to the end screen.
//!
//! The session owns the opponent but never the player's creature: every
//! action re-reads the roster's active member, so a switch or heal performed
//! through the party overlay is visible on the very next input.

use crate::game::combat::{choose_move, damage, roll_capture};
use crate::game::{Creature, Item, Roster};
use crate::input::InputAction;
use crate::utils::{cycle_cursor, Cooldown, RandomSource};
use serde::{Deserialize, Serialize};

const MENU_COOLDOWN: f32 = 0.15;
const BACK_COOLDOWN: f32 = 0.15;
const ACTION_COOLDOWN: f32 = 0.18;
const MESSAGE_COOLDOWN: f32 = 0.2;

/// Where the battle currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BattleState {
    /// Choosing Fight / Bag / Party / Run
    Menu,
    /// Choosing a move
    Fight,
    /// Choosing an item
    Bag,
    /// Showing a message until confirmed
    Message,
    /// Finished; the owner tears the session down
    End,
}

/// Options of the top-level battle menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MenuOption {
    Fight,
    Bag,
    Party,
    Run,
}

impl MenuOption {
    /// Menu order.
    pub const ALL: [MenuOption; 4] = [
        MenuOption::Fight,
        MenuOption::Bag,
        MenuOption::Party,
        MenuOption::Run,
    ];

    /// Display label.
    pub fn label(self) -> &'static str {
        match self {
            MenuOption::Fight => "FIGHT",
            MenuOption::Bag => "BAG",
            MenuOption::Party => "PARTY",
            MenuOption::Run => "RUN",
        }
    }
}

/// Entries of the battle bag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BagSlot {
    Potion,
    CaptureBall,
}

impl BagSlot {
    /// Bag order.
    pub const ALL: [BagSlot; 2] = [BagSlot::Potion, BagSlot::CaptureBall];

    /// The item this slot spends.
    pub fn item(self) -> Item {
        match self {
            BagSlot::Potion => Item::Potion,
            BagSlot::CaptureBall => Item::CaptureBall,
        }
    }
}

/// How a battle ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BattleOutcome {
    /// The opponent fainted
    Won,
    /// Every party member fainted
    Lost,
    /// The player ran away
    Fled,
    /// The opponent joined the party
    Captured,
}

/// State of a single encounter.
#[derive(Debug, Clone)]
pub struct BattleSession {
    enemy: Creature,
    player: Option<usize>,
    state: BattleState,
    menu_cursor: usize,
    move_cursor: usize,
    bag_cursor: usize,
    cooldown: Cooldown,
    message: String,
    request_party_overlay: bool,
    auto_close_message: bool,
    outcome: Option<BattleOutcome>,
}

impl BattleSession {
    /// Starts a battle against `enemy`, opening on the main menu.
    pub fn new(enemy: Creature, roster: &Roster) -> Self {
        log::info!("A wild {} appeared!", enemy.name);
        Self {
            enemy,
            player: roster.active_index(),
            state: BattleState::Menu,
            menu_cursor: 0,
            move_cursor: 0,
            bag_cursor: 0,
            cooldown: Cooldown::default(),
            message: String::new(),
            request_party_overlay: false,
            auto_close_message: false,
            outcome: None,
        }
    }

    /// The opponent.
    pub fn enemy(&self) -> &Creature {
        &self.enemy
    }

    /// Current state.
    pub fn state(&self) -> BattleState {
        self.state
    }

    /// Roster slot of the creature fighting, as of the last sync.
    pub fn player_index(&self) -> Option<usize> {
        self.player
    }

    /// The player's fighting creature, read from the roster.
    pub fn player<'r>(&self, roster: &'r Roster) -> Option<&'r Creature> {
        self.player.and_then(|i| roster.get(i))
    }

    /// Highlighted main-menu option.
    pub fn menu_cursor(&self) -> usize {
        self.menu_cursor
    }

    /// Highlighted move.
    pub fn move_cursor(&self) -> usize {
        self.move_cursor
    }

    /// Highlighted bag slot.
    pub fn bag_cursor(&self) -> usize {
        self.bag_cursor
    }

    /// Latest battle message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// True while the session waits for the party overlay to open.
    pub fn request_party_overlay(&self) -> bool {
        self.request_party_overlay
    }

    /// True if the current message ends the battle when confirmed.
    pub fn auto_close_message(&self) -> bool {
        self.auto_close_message
    }

    /// Input debounce timer.
    pub fn cooldown(&self) -> Cooldown {
        self.cooldown
    }

    /// How the battle ended, once it has.
    pub fn outcome(&self) -> Option<BattleOutcome> {
        self.outcome
    }

    /// True once the session reached [`BattleState::End`].
    pub fn is_over(&self) -> bool {
        self.state == BattleState::End
    }

    /// Clears and returns the pending party-overlay request.
    pub fn take_party_request(&mut self) -> bool {
        std::mem::take(&mut self.request_party_overlay)
    }

    /// Ticks the input cooldown and follows the roster's active creature.
    pub fn update(&mut self, dt: f32, roster: &Roster) {
        self.cooldown.tick(dt);
        self.sync_player(roster);
    }

    /// Re-reads which roster member is fighting.
    pub fn sync_player(&mut self, roster: &Roster) {
        self.player = roster.active_index();
    }

    /// Feeds this frame's actions to the state machine.
    ///
    /// Nothing is accepted while the cooldown runs, so at most one action
    /// lands per cooldown window.
    pub fn handle_events(
        &mut self,
        actions: &[InputAction],
        roster: &mut Roster,
        rng: &mut dyn RandomSource,
    ) {
        for &action in actions {
            if !self.cooldown.is_ready() || self.is_over() || self.request_party_overlay {
                break;
            }
            self.handle_action(action, roster, rng);
        }
    }

    fn handle_action(
        &mut self,
        action: InputAction,
        roster: &mut Roster,
        rng: &mut dyn RandomSource,
    ) {
        self.sync_player(roster);
        match (self.state, action) {
            (BattleState::Fight | BattleState::Bag, InputAction::Cancel) => {
                self.state = BattleState::Menu;
                self.cooldown.arm(BACK_COOLDOWN);
            }
            (BattleState::Menu, _) => self.handle_menu(action),
            (BattleState::Fight, _) => self.handle_fight(action, roster, rng),
            (BattleState::Bag, _) => self.handle_bag(action, roster, rng),
            (BattleState::Message, InputAction::Confirm) => self.advance_message(roster),
            _ => {}
        }
    }

    fn handle_menu(&mut self, action: InputAction) {
        if let Some(step) = action.any_step() {
            self.menu_cursor = cycle_cursor(self.menu_cursor, step, MenuOption::ALL.len());
            self.cooldown.arm(MENU_COOLDOWN);
            return;
        }
        if action != InputAction::Confirm {
            return;
        }

        self.message.clear();
        match MenuOption::ALL[self.menu_cursor] {
            MenuOption::Fight => {
                self.state = BattleState::Fight;
                self.move_cursor = 0;
            }
            MenuOption::Bag => {
                self.state = BattleState::Bag;
                self.bag_cursor = 0;
            }
            MenuOption::Party => self.request_party_overlay = true,
            MenuOption::Run => {
                log::info!("Got away from {}", self.enemy.name);
                self.finish(BattleOutcome::Fled);
            }
        }
        self.cooldown.arm(MENU_COOLDOWN);
    }

    fn handle_fight(&mut self, action: InputAction, roster: &mut Roster, rng: &mut dyn RandomSource) {
        let Some(attacker) = self.player(roster) else {
            return;
        };

        if let Some(step) = action.any_step() {
            self.move_cursor = cycle_cursor(self.move_cursor, step, attacker.move_count());
            self.cooldown.arm(ACTION_COOLDOWN);
            return;
        }
        if action != InputAction::Confirm {
            return;
        }

        let mv = attacker.move_at(self.move_cursor);
        let dealt = damage(attacker, &self.enemy, mv, rng);
        log::debug!(
            "{} used {} on {} for {} damage",
            attacker.name,
            mv.name,
            self.enemy.name,
            dealt
        );

        if self.enemy.take_damage(dealt) == 0 {
            self.message = format!("{} fainted!", self.enemy.name);
            self.state = BattleState::Message;
        } else {
            self.enemy_turn(roster, rng);
        }
        self.cooldown.arm(ACTION_COOLDOWN);
    }

    fn handle_bag(&mut self, action: InputAction, roster: &mut Roster, rng: &mut dyn RandomSource) {
        if let Some(step) = action.any_step() {
            self.bag_cursor = cycle_cursor(self.bag_cursor, step, BagSlot::ALL.len());
            self.cooldown.arm(ACTION_COOLDOWN);
            return;
        }
        if action != InputAction::Confirm {
            return;
        }

        match BagSlot::ALL[self.bag_cursor] {
            BagSlot::Potion => {
                if roster.count(Item::Potion) == 0 {
                    self.show_message("No potions!");
                } else {
                    // The heal and its target are chosen in the party overlay.
                    self.request_party_overlay = true;
                    self.state = BattleState::Menu;
                }
            }
            BagSlot::CaptureBall => {
                if !roster.consume(Item::CaptureBall) {
                    self.show_message("No capture balls!");
                } else if roll_capture(&self.enemy, rng) {
                    log::info!("Captured {}", self.enemy.name);
                    self.message = format!("You caught {}!", self.enemy.name);
                    roster.add(self.enemy.clone());
                    self.auto_close_message = true;
                    self.state = BattleState::Message;
                    self.cooldown.arm(MESSAGE_COOLDOWN);
                    return;
                } else {
                    self.message = "It broke free!".to_string();
                    self.enemy_turn(roster, rng);
                }
            }
        }
        self.cooldown.arm(ACTION_COOLDOWN);
    }

    /// The opponent attacks whichever creature is active right now.
    fn enemy_turn(&mut self, roster: &mut Roster, rng: &mut dyn RandomSource) {
        self.sync_player(roster);
        let Some(index) = self.player else {
            self.state = BattleState::Menu;
            return;
        };
        let Some(defender) = roster.get(index) else {
            self.state = BattleState::Menu;
            return;
        };

        let mv = choose_move(&self.enemy, rng);
        let dealt = damage(&self.enemy, defender, mv, rng);
        let defender_name = defender.name.clone();
        log::debug!(
            "{} used {} on {} for {} damage",
            self.enemy.name,
            mv.name,
            defender_name,
            dealt
        );

        let remaining = roster.damage_member(index, dealt).unwrap_or(0);
        if remaining > 0 {
            self.state = BattleState::Menu;
        } else if roster.has_usable() {
            self.message = format!("{defender_name} fainted! Choose another creature.");
            self.request_party_overlay = true;
            self.state = BattleState::Menu;
        } else {
            self.message = format!("{defender_name} fainted!");
            self.state = BattleState::Message;
        }
        self.sync_player(roster);
    }

    fn advance_message(&mut self, roster: &Roster) {
        let player_down = self.player(roster).map_or(true, |c| !c.is_alive());
        if self.auto_close_message {
            self.auto_close_message = false;
            self.finish(BattleOutcome::Captured);
        } else if !self.enemy.is_alive() {
            self.finish(BattleOutcome::Won);
        } else if player_down {
            self.finish(BattleOutcome::Lost);
        } else {
            self.state = BattleState::Menu;
        }
        self.cooldown.arm(MESSAGE_COOLDOWN);
    }

    fn show_message(&mut self, text: &str) {
        self.message = text.to_string();
        self.state = BattleState::Message;
    }

    fn finish(&mut self, outcome: BattleOutcome) {
        log::debug!("Battle with {} finished: {:?}", self.enemy.name, outcome);
        self.state = BattleState::End;
        self.outcome = Some(outcome);
    }
}
