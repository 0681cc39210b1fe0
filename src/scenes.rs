//! # Scene Management System
//!
//! [`ModeController`] is the top-level dispatcher. It owns the world, the
//! roster, the overlays and at most one battle, and decides every frame which
//! of them receives input.
//!
//! Input ownership, highest priority first:
//!
//! 1. an open dialogue box
//! 2. the pause key (world mode only)
//! 3. an open pause menu
//! 4. an open party overlay
//! 5. the interact key (world mode, nothing open)
//! 6. the battle session
//!
//! While any overlay is open the world is frozen: no walking, no pickups and
//! no encounters. [`SceneManager`] wires the controller to the real window.

use crate::config::GameConfig;
use crate::game::{
    BattleSession, Creature, Item, Roster, TileClass, TileMap, TilePos, WorldModel,
};
use crate::generation::{create_rng, starter, EncounterTable, Generator};
use crate::input::{DirectionalState, FrameInput, InputAction, InputHandler};
use crate::overlays::{DialogueBox, PartyMenu, PauseCommand, PauseMenu};
use crate::rendering::{AssetStore, MacroquadDisplay};
use crate::utils::{Cooldown, RandomSource};
use crate::PocketResult;
use macroquad::prelude::{get_frame_time, get_time, next_frame};

/// Top-level game mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Walking around the map
    World,
    /// Fighting a wild creature
    Battle,
}

/// The overlay that currently owns input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Overlay {
    None,
    Dialogue,
    Pause,
    PartyOverlay,
}

/// A short notice under the HUD that disappears on its own.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Popup {
    text: String,
    timer: f32,
}

impl Popup {
    /// Shows `text` for `seconds`.
    pub fn show(&mut self, text: impl Into<String>, seconds: f32) {
        self.text = text.into();
        self.timer = seconds.max(0.0);
    }

    pub fn tick(&mut self, dt: f32) {
        self.timer = (self.timer - dt).max(0.0);
    }

    pub fn is_visible(&self) -> bool {
        self.timer > 0.0
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Routes input and time to the world, the battle and the overlays.
pub struct ModeController {
    config: GameConfig,
    world: WorldModel,
    roster: Roster,
    battle: Option<BattleSession>,
    dialogue: DialogueBox,
    pause: PauseMenu,
    party: PartyMenu,
    popup: Popup,
    encounters: EncounterTable,
    encounter_cooldown: Cooldown,
    last_encounter_tile: Option<TilePos>,
    show_interact: bool,
    quit: bool,
    rng: Box<dyn RandomSource>,
}

impl ModeController {
    /// Starts a new game on `map`. A seed makes every roll reproducible.
    pub fn new(config: GameConfig, map: TileMap, seed: Option<u64>) -> PocketResult<Self> {
        Self::with_random_source(config, map, Box::new(create_rng(seed)))
    }

    /// Starts a new game drawing all randomness from `rng`.
    pub fn with_random_source(
        config: GameConfig,
        map: TileMap,
        rng: Box<dyn RandomSource>,
    ) -> PocketResult<Self> {
        let mut roster = Roster::with_items(config.start.potions, config.start.capture_balls);
        roster.add(starter()?);

        Ok(Self {
            world: WorldModel::new(config.clone(), map),
            config,
            roster,
            battle: None,
            dialogue: DialogueBox::new(),
            pause: PauseMenu::new(),
            party: PartyMenu::new(),
            popup: Popup::default(),
            encounters: EncounterTable::wild(),
            encounter_cooldown: Cooldown::default(),
            last_encounter_tile: None,
            show_interact: false,
            quit: false,
            rng,
        })
    }

    /// Replaces the table wild opponents are drawn from.
    pub fn with_encounters(mut self, encounters: EncounterTable) -> Self {
        self.encounters = encounters;
        self
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Current top-level mode. Battle exactly when a session exists.
    pub fn mode(&self) -> Mode {
        if self.battle.is_some() {
            Mode::Battle
        } else {
            Mode::World
        }
    }

    /// The topmost open overlay.
    pub fn overlay(&self) -> Overlay {
        if self.dialogue.is_open() {
            Overlay::Dialogue
        } else if self.pause.is_open() {
            Overlay::Pause
        } else if self.party.is_open() {
            Overlay::PartyOverlay
        } else {
            Overlay::None
        }
    }

    /// True while an overlay freezes the world.
    pub fn is_locked(&self) -> bool {
        self.overlay() != Overlay::None
    }

    pub fn world(&self) -> &WorldModel {
        &self.world
    }

    /// Mutable world access for scripted setups.
    pub fn world_mut(&mut self) -> &mut WorldModel {
        &mut self.world
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// Mutable roster access for scripted setups.
    pub fn roster_mut(&mut self) -> &mut Roster {
        &mut self.roster
    }

    pub fn battle(&self) -> Option<&BattleSession> {
        self.battle.as_ref()
    }

    pub fn dialogue(&self) -> &DialogueBox {
        &self.dialogue
    }

    pub fn pause(&self) -> &PauseMenu {
        &self.pause
    }

    pub fn party(&self) -> &PartyMenu {
        &self.party
    }

    pub fn popup(&self) -> &Popup {
        &self.popup
    }

    /// True when the "E : Interact" hint should be drawn.
    pub fn show_interact(&self) -> bool {
        self.show_interact
    }

    /// Seconds until encounters can trigger again.
    pub fn encounter_cooldown(&self) -> Cooldown {
        self.encounter_cooldown
    }

    /// True once the player chose QUIT.
    pub fn quit_requested(&self) -> bool {
        self.quit
    }

    /// Begins a battle against `enemy`.
    pub fn start_battle(&mut self, enemy: Creature) {
        log::info!("Entering battle mode");
        self.battle = Some(BattleSession::new(enemy, &self.roster));
    }

    /// Processes one frame: input first, then time.
    pub fn frame(&mut self, input: &FrameInput, dt: f32) {
        self.handle_events(&input.actions);
        self.update(dt, input.held);
    }

    /// Hands this frame's discrete actions to whoever owns input.
    pub fn handle_events(&mut self, actions: &[InputAction]) {
        if self.dialogue.is_open() {
            self.dialogue.handle(actions);
            return;
        }

        if actions.contains(&InputAction::PauseToggle) {
            if self.mode() == Mode::World {
                self.pause.toggle();
            }
            return;
        }

        if self.pause.is_open() {
            if let Some(command) = self.pause.handle(actions) {
                self.run_pause_command(command);
            }
            return;
        }

        if self.party.is_open() {
            self.party
                .handle(actions, &mut self.roster, self.config.potion_heal);
            return;
        }

        if self.mode() == Mode::World && actions.contains(&InputAction::Interact) {
            if self.world.is_facing_sign() {
                self.dialogue.show(self.config.sign_text.clone());
            }
            return;
        }

        if let Some(battle) = self.battle.as_mut() {
            battle.handle_events(actions, &mut self.roster, &mut *self.rng);
            if battle.take_party_request() {
                self.party.open(true);
            }
        }
    }

    fn run_pause_command(&mut self, command: PauseCommand) {
        match command {
            PauseCommand::Resume => {}
            PauseCommand::Bag => {
                self.dialogue.show(format!(
                    "Potions : {}    Capture Balls : {}",
                    self.roster.count(Item::Potion),
                    self.roster.count(Item::CaptureBall)
                ));
            }
            PauseCommand::Party => {
                self.pause.close();
                self.party.open(false);
            }
            PauseCommand::Quit => {
                log::info!("Quit requested from pause menu");
                self.quit = true;
            }
        }
    }

    /// Advances timers, the battle, or the world by `dt` seconds.
    pub fn update(&mut self, dt: f32, held: DirectionalState) {
        self.popup.tick(dt);
        self.encounter_cooldown.tick(dt);
        self.party.update(dt);

        if let Some(battle) = self.battle.as_mut() {
            battle.update(dt, &self.roster);
            if battle.is_over() {
                log::info!(
                    "Battle with {} ended: {:?}",
                    battle.enemy().name,
                    battle.outcome()
                );
                self.battle = None;
                self.encounter_cooldown.arm(self.config.encounter_grace);
                log::info!("Returning to world mode");
            }
            return;
        }

        self.update_world(dt, held);
    }

    fn update_world(&mut self, dt: f32, held: DirectionalState) {
        let locked = self.is_locked();
        let tile = if locked {
            self.world.player_tile()
        } else {
            self.world.move_player(dt, held)
        };

        if !locked {
            if let Some(item) = self.world.harvest_item(tile) {
                let total = self.roster.add_items(item, 1);
                log::info!("Picked up {} at ({}, {})", item.label(), tile.x, tile.y);
                self.popup.show(
                    format!("Picked up {} x{}", item.label(), total),
                    self.config.popup_duration,
                );
            }
        }

        self.show_interact = self.world.is_facing_sign() && !self.pause.is_open();

        if !locked && self.try_encounter(tile) {
            return;
        }

        self.world.update_camera();
    }

    /// Rolls for a wild encounter on `tile`. Returns true if a battle started.
    fn try_encounter(&mut self, tile: TilePos) -> bool {
        let eligible = self.world.class_at(tile) == Some(TileClass::Encounter)
            && self.encounter_cooldown.is_ready()
            && self.last_encounter_tile != Some(tile)
            && self.roster.has_usable();
        if !eligible {
            return false;
        }

        self.last_encounter_tile = Some(tile);
        if !self
            .encounters
            .triggers(self.config.encounter_rate, &mut *self.rng)
        {
            return false;
        }

        match self.encounters.generate(&self.config, &mut *self.rng) {
            Ok(enemy) => {
                self.start_battle(enemy);
                true
            }
            Err(e) => {
                log::warn!(
                    "{} produced no opponent: {}",
                    self.encounters.generator_type(),
                    e
                );
                false
            }
        }
    }
}

/// Drives a [`ModeController`] from the real window: poll, update, draw.
pub struct SceneManager {
    controller: ModeController,
    display: MacroquadDisplay,
    assets: AssetStore,
    input_handler: InputHandler,
}

impl SceneManager {
    /// Loads assets and prepares the display for `controller`.
    pub async fn new(controller: ModeController, input_handler: InputHandler) -> Self {
        let config = controller.config().clone();
        let assets = AssetStore::load(&config).await;
        let display = MacroquadDisplay::new(config);
        Self {
            controller,
            display,
            assets,
            input_handler,
        }
    }

    /// Runs the frame loop until the player quits.
    pub async fn run(&mut self) -> PocketResult<()> {
        #[cfg(feature = "dev-tools")]
        let _span = tracing::info_span!("frame_loop").entered();

        let min_frame = 1.0 / f64::from(self.controller.config().target_fps.max(1));
        loop {
            let frame_start = get_time();
            let input = self.input_handler.poll();
            self.controller.frame(&input, get_frame_time());
            if self.controller.quit_requested() {
                break;
            }
            self.display.render(&self.controller, &self.assets);

            // Cap the frame rate on native targets
            #[cfg(not(target_arch = "wasm32"))]
            {
                let elapsed = get_time() - frame_start;
                if elapsed < min_frame {
                    std::thread::sleep(std::time::Duration::from_secs_f64(min_frame - elapsed));
                }
            }
            next_frame().await;
        }
        log::debug!("Leaving the frame loop");
        Ok(())
    }
}
