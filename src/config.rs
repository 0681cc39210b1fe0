//! # Game Configuration
//!
//! A single immutable configuration value handed to the world model, the mode
//! controller, and the renderer at construction. Nothing in the game reads
//! process-wide tile or screen constants.

use crate::PocketResult;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Tile-id semantics for a map.
///
/// Ids are opaque integers authored in the map tool; this table says which of
/// them block movement, which roll encounters, and which ones are items or signs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TileConfig {
    /// Impassable tile ids
    pub blocking: BTreeSet<u32>,
    /// Tile ids that may trigger a random encounter
    pub encounter: BTreeSet<u32>,
    /// Readable sign
    pub sign: u32,
    /// Capture-ball pickup
    pub capture_ball: u32,
    /// Potion pickup
    pub potion: u32,
    /// Id written over a harvested item tile
    pub base: u32,
}

impl Default for TileConfig {
    fn default() -> Self {
        Self {
            blocking: [
                5, 6, 12, 13, 14, 20, 21, 24, 26, 27, 28, 32, 34, 35, 36, 37, 39, 42,
            ]
            .into_iter()
            .collect(),
            encounter: [15, 22, 23, 38, 51, 52, 53, 58, 59, 60, 61, 62]
                .into_iter()
                .collect(),
            sign: 28,
            capture_ball: 30,
            potion: 31,
            base: 0,
        }
    }
}

impl TileConfig {
    /// Returns true if the tile id cannot be walked on.
    pub fn is_blocking(&self, id: u32) -> bool {
        self.blocking.contains(&id)
    }

    /// Returns true if the tile id can start an encounter.
    pub fn is_encounter(&self, id: u32) -> bool {
        self.encounter.contains(&id)
    }
}

/// What the player owns when a new game starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StartingState {
    /// Potions in the bag
    pub potions: u32,
    /// Capture balls in the bag
    pub capture_balls: u32,
    /// Spawn column in tiles
    pub tile_x: u32,
    /// Spawn row in tiles
    pub tile_y: u32,
}

impl Default for StartingState {
    fn default() -> Self {
        Self {
            potions: 5,
            capture_balls: 10,
            tile_x: 5,
            tile_y: 10,
        }
    }
}

/// Top-level game configuration.
///
/// # Examples
///
/// ```
/// use pocket_battle::GameConfig;
///
/// let config = GameConfig::default();
/// assert_eq!(config.window_width(), 800.0);
/// assert!(config.tiles.is_blocking(config.tiles.sign));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Tile edge in world pixels
    pub tile_size: f32,
    /// World pixels to screen pixels
    pub screen_scale: f32,
    /// Viewport width in world pixels
    pub base_width: f32,
    /// Viewport height in world pixels
    pub base_height: f32,
    /// Frames per second target for the game loop
    pub target_fps: u32,
    /// Overworld walking speed in world pixels per second
    pub player_speed: f32,
    /// Seconds between walk-cycle frame flips
    pub walk_frame_time: f32,
    /// Probability that an eligible encounter tile starts a battle
    pub encounter_rate: f64,
    /// Seconds after a battle during which no encounter is rolled
    pub encounter_grace: f32,
    /// Seconds a pickup popup stays on screen
    pub popup_duration: f32,
    /// Hit points restored by one potion
    pub potion_heal: u32,
    /// Map width in tiles
    pub map_width: usize,
    /// Map height in tiles
    pub map_height: usize,
    /// Map file (comma-separated tile ids)
    pub map_path: PathBuf,
    /// Directory holding tileset and sprite images
    pub assets_dir: PathBuf,
    /// Text shown when reading a sign
    pub sign_text: String,
    /// Tile-id semantics
    pub tiles: TileConfig,
    /// New-game inventory and spawn point
    pub start: StartingState,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            tile_size: 32.0,
            screen_scale: 4.0,
            base_width: 200.0,
            base_height: 200.0,
            target_fps: 60,
            player_speed: 90.0,
            walk_frame_time: 0.18,
            encounter_rate: 0.12,
            encounter_grace: 0.8,
            popup_duration: 2.0,
            potion_heal: 40,
            map_width: 20,
            map_height: 15,
            map_path: PathBuf::from("assets/maps/route1.csv"),
            assets_dir: PathBuf::from("assets"),
            sign_text: "The sign reads: Welcome to Route 1!".to_string(),
            tiles: TileConfig::default(),
            start: StartingState::default(),
        }
    }
}

impl GameConfig {
    /// Loads a configuration from a JSON file. Absent fields keep their defaults.
    pub fn load(path: impl AsRef<Path>) -> PocketResult<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_json(&text)
    }

    /// Parses a configuration from JSON text.
    pub fn from_json(text: &str) -> PocketResult<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Window width in screen pixels.
    pub fn window_width(&self) -> f32 {
        self.base_width * self.screen_scale
    }

    /// Window height in screen pixels.
    pub fn window_height(&self) -> f32 {
        self.base_height * self.screen_scale
    }
}
