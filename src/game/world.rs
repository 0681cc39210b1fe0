//! # World Model
//!
//! The overworld tile grid, the walking player, and the camera that follows it.

use crate::config::{GameConfig, TileConfig};
use crate::game::Item;
use crate::input::DirectionalState;
use macroquad::math::{vec2, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// A tile coordinate (column, row).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TilePos {
    pub x: i32,
    pub y: i32,
}

impl TilePos {
    /// Creates a new tile position.
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The neighbouring tile in `facing` direction.
    pub fn step(self, facing: Facing) -> Self {
        let (dx, dy) = facing.delta();
        Self::new(self.x + dx, self.y + dy)
    }
}

/// The direction the overworld player is looking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Facing {
    Up,
    #[default]
    Down,
    Left,
    Right,
}

impl Facing {
    /// Tile offset of one step in this direction.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Facing::Up => (0, -1),
            Facing::Down => (0, 1),
            Facing::Left => (-1, 0),
            Facing::Right => (1, 0),
        }
    }
}

/// How the game treats a tile id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileClass {
    /// Walkable, nothing happens
    Plain,
    /// Impassable (walls, trees, water)
    Blocking,
    /// Readable sign
    Sign,
    /// Walkable, may start an encounter
    Encounter,
    /// Walkable, holds an item to pick up
    Pickup(Item),
}

impl TileClass {
    /// Classifies `id` under the given tile semantics.
    pub fn of(id: u32, tiles: &TileConfig) -> Self {
        if id == tiles.sign {
            TileClass::Sign
        } else if tiles.is_blocking(id) {
            TileClass::Blocking
        } else if id == tiles.potion {
            TileClass::Pickup(Item::Potion)
        } else if id == tiles.capture_ball {
            TileClass::Pickup(Item::CaptureBall)
        } else if tiles.is_encounter(id) {
            TileClass::Encounter
        } else {
            TileClass::Plain
        }
    }
}

/// A rectangular grid of tile ids stored row-major.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileMap {
    width: usize,
    height: usize,
    tiles: Vec<u32>,
}

impl TileMap {
    /// Creates a map filled with `fill`.
    pub fn filled(width: usize, height: usize, fill: u32) -> Self {
        Self {
            width,
            height,
            tiles: vec![fill; width * height],
        }
    }

    /// Builds a map from rows that already have exactly `width` entries.
    pub(crate) fn from_rows(width: usize, rows: Vec<Vec<u32>>) -> Self {
        let height = rows.len();
        let tiles = rows.into_iter().flatten().collect();
        Self {
            width,
            height,
            tiles,
        }
    }

    /// Width in tiles.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in tiles.
    pub fn height(&self) -> usize {
        self.height
    }

    fn index(&self, pos: TilePos) -> Option<usize> {
        if pos.x < 0 || pos.y < 0 {
            return None;
        }
        let (x, y) = (pos.x as usize, pos.y as usize);
        (x < self.width && y < self.height).then(|| y * self.width + x)
    }

    /// The tile id at `pos`, or None outside the map.
    pub fn get(&self, pos: TilePos) -> Option<u32> {
        self.index(pos).map(|i| self.tiles[i])
    }

    /// Overwrites the tile at `pos`. Returns false outside the map.
    pub fn set(&mut self, pos: TilePos, id: u32) -> bool {
        match self.index(pos) {
            Some(i) => {
                self.tiles[i] = id;
                true
            }
            None => false,
        }
    }

    /// Iterates over rows of tile ids.
    pub fn rows(&self) -> impl Iterator<Item = &[u32]> {
        self.tiles.chunks(self.width.max(1))
    }
}

/// The player's overworld avatar.
#[derive(Debug, Clone, PartialEq)]
pub struct OverworldPlayer {
    /// Position and size in world pixels
    pub rect: Rect,
    /// Direction the player is looking
    pub facing: Facing,
    /// Walk-cycle frame, 0 or 1
    pub frame: u8,
    frame_timer: f32,
    speed: f32,
    frame_time: f32,
}

impl OverworldPlayer {
    /// Places a player of one tile in size at the given pixel position.
    pub fn new(x: f32, y: f32, config: &GameConfig) -> Self {
        Self {
            rect: Rect::new(x, y, config.tile_size, config.tile_size),
            facing: Facing::Down,
            frame: 0,
            frame_timer: 0.0,
            speed: config.player_speed,
            frame_time: config.walk_frame_time,
        }
    }

    /// Walks according to the held directions for `dt` seconds.
    ///
    /// Opposite directions resolve the same way every frame: right beats left,
    /// down beats up, and vertical input decides facing over horizontal.
    pub fn step(&mut self, dt: f32, held: DirectionalState) {
        let mut velocity = Vec2::ZERO;
        if held.left {
            velocity.x = -1.0;
            self.facing = Facing::Left;
        }
        if held.right {
            velocity.x = 1.0;
            self.facing = Facing::Right;
        }
        if held.up {
            velocity.y = -1.0;
            self.facing = Facing::Up;
        }
        if held.down {
            velocity.y = 1.0;
            self.facing = Facing::Down;
        }

        self.rect.x += velocity.x * self.speed * dt;
        self.rect.y += velocity.y * self.speed * dt;

        if velocity != Vec2::ZERO {
            self.frame_timer += dt;
            if self.frame_timer > self.frame_time {
                self.frame_timer = 0.0;
                self.frame = 1 - self.frame;
            }
        } else {
            self.frame = 0;
        }
    }
}

/// Tile grid, player, and camera.
#[derive(Debug, Clone)]
pub struct WorldModel {
    config: GameConfig,
    map: TileMap,
    player: OverworldPlayer,
    camera: Vec2,
}

impl WorldModel {
    /// Creates a world with the player on the configured start tile.
    pub fn new(config: GameConfig, map: TileMap) -> Self {
        let player = OverworldPlayer::new(
            config.start.tile_x as f32 * config.tile_size,
            config.start.tile_y as f32 * config.tile_size,
            &config,
        );
        let mut world = Self {
            config,
            map,
            player,
            camera: Vec2::ZERO,
        };
        world.update_camera();
        world
    }

    /// Configuration the world was built with.
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// The tile grid.
    pub fn map(&self) -> &TileMap {
        &self.map
    }

    /// Mutable tile grid, for scripted setups.
    pub fn map_mut(&mut self) -> &mut TileMap {
        &mut self.map
    }

    /// The overworld player.
    pub fn player(&self) -> &OverworldPlayer {
        &self.player
    }

    /// Moves the player to a tile, for scripted setups and tests.
    pub fn place_player(&mut self, tile: TilePos, facing: Facing) {
        let size = self.config.tile_size;
        self.player.rect.x = tile.x as f32 * size;
        self.player.rect.y = tile.y as f32 * size;
        self.player.facing = facing;
        self.update_camera();
    }

    /// Top-left corner of the visible area in world pixels.
    pub fn camera(&self) -> Vec2 {
        self.camera
    }

    /// Tile semantics in use.
    pub fn tiles(&self) -> &TileConfig {
        &self.config.tiles
    }

    /// The tile under the player's centre.
    pub fn player_tile(&self) -> TilePos {
        let center = self.player.rect.center();
        let size = self.config.tile_size;
        TilePos::new(
            (center.x / size).floor() as i32,
            (center.y / size).floor() as i32,
        )
    }

    /// The tile the player is facing.
    pub fn facing_tile(&self) -> TilePos {
        self.player_tile().step(self.player.facing)
    }

    /// Tile id at `pos`.
    pub fn tile_at(&self, pos: TilePos) -> Option<u32> {
        self.map.get(pos)
    }

    /// Classification of the tile at `pos`, None outside the map.
    pub fn class_at(&self, pos: TilePos) -> Option<TileClass> {
        self.tile_at(pos).map(|id| TileClass::of(id, &self.config.tiles))
    }

    /// True if the player is looking at a sign.
    pub fn is_facing_sign(&self) -> bool {
        self.class_at(self.facing_tile()) == Some(TileClass::Sign)
    }

    /// Walks the player and resolves collision.
    ///
    /// A move that ends on a blocking tile or outside the map is undone.
    /// Returns the tile the player stands on afterwards.
    pub fn move_player(&mut self, dt: f32, held: DirectionalState) -> TilePos {
        let previous = self.player.rect;
        self.player.step(dt, held);

        let tile = self.player_tile();
        let passable = self
            .tile_at(tile)
            .is_some_and(|id| !self.config.tiles.is_blocking(id));
        if !passable {
            self.player.rect = previous;
        }
        self.player_tile()
    }

    /// Picks up the item lying on `pos`, clearing the tile to the base id.
    pub fn harvest_item(&mut self, pos: TilePos) -> Option<Item> {
        match self.class_at(pos)? {
            TileClass::Pickup(item) => {
                self.map.set(pos, self.config.tiles.base);
                Some(item)
            }
            _ => None,
        }
    }

    /// Centres the camera on the player, clamped to the map edges.
    pub fn update_camera(&mut self) {
        let size = self.config.tile_size;
        let view = vec2(self.config.base_width, self.config.base_height);
        let map_px = vec2(
            self.map.width() as f32 * size,
            self.map.height() as f32 * size,
        );
        let max = (map_px - view).max(Vec2::ZERO);
        let centered = self.player.rect.center() - view / 2.0;
        self.camera = centered.clamp(Vec2::ZERO, max);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn held(up: bool, down: bool, left: bool, right: bool) -> DirectionalState {
        DirectionalState {
            up,
            down,
            left,
            right,
        }
    }

    fn world_with(rows: Vec<Vec<u32>>) -> WorldModel {
        let mut config = GameConfig::default();
        config.start.tile_x = 1;
        config.start.tile_y = 1;
        let width = rows[0].len();
        WorldModel::new(config, TileMap::from_rows(width, rows))
    }

    #[test]
    fn test_tile_map_bounds() {
        let mut map = TileMap::filled(3, 2, 0);
        assert_eq!(map.get(TilePos::new(2, 1)), Some(0));
        assert_eq!(map.get(TilePos::new(3, 0)), None);
        assert_eq!(map.get(TilePos::new(-1, 0)), None);
        assert!(map.set(TilePos::new(1, 1), 9));
        assert!(!map.set(TilePos::new(1, 5), 9));
        assert_eq!(map.rows().nth(1).unwrap(), &[0, 9, 0]);
    }

    #[test]
    fn test_tile_classes() {
        let tiles = TileConfig::default();
        assert_eq!(TileClass::of(28, &tiles), TileClass::Sign);
        assert_eq!(TileClass::of(5, &tiles), TileClass::Blocking);
        assert_eq!(TileClass::of(31, &tiles), TileClass::Pickup(Item::Potion));
        assert_eq!(TileClass::of(30, &tiles), TileClass::Pickup(Item::CaptureBall));
        assert_eq!(TileClass::of(15, &tiles), TileClass::Encounter);
        assert_eq!(TileClass::of(0, &tiles), TileClass::Plain);
    }

    #[test]
    fn test_player_walks_and_faces() {
        let mut world = world_with(vec![vec![0; 5]; 5]);
        let start = world.player().rect.x;
        world.move_player(0.1, held(false, false, false, true));
        assert!(world.player().rect.x > start);
        assert_eq!(world.player().facing, Facing::Right);
    }

    #[test]
    fn test_down_beats_up_for_facing() {
        let mut player = OverworldPlayer::new(0.0, 0.0, &GameConfig::default());
        player.step(0.0, held(true, true, true, false));
        assert_eq!(player.facing, Facing::Down);
    }

    #[test]
    fn test_blocking_tile_reverts_move() {
        let mut world = world_with(vec![
            vec![0, 0, 0],
            vec![0, 0, 5],
            vec![0, 0, 0],
        ]);
        let before = world.player().rect;
        world.move_player(0.5, held(false, false, false, true));
        assert_eq!(world.player().rect, before);
        assert_eq!(world.player().facing, Facing::Right);
    }

    #[test]
    fn test_sign_blocks_only_when_configured_blocking() {
        let rows = vec![vec![0, 0, 28], vec![0, 0, 28], vec![0, 0, 0]];

        let mut walled = world_with(rows.clone());
        let before = walled.player().rect;
        walled.move_player(0.5, held(false, false, false, true));
        assert_eq!(walled.player().rect, before);

        let mut config = GameConfig::default();
        config.start.tile_x = 1;
        config.start.tile_y = 1;
        config.tiles.blocking.remove(&28);
        let mut open = WorldModel::new(config, TileMap::from_rows(3, rows));
        assert_eq!(
            open.move_player(0.5, held(false, false, false, true)),
            TilePos::new(2, 1)
        );
        assert_eq!(open.class_at(TilePos::new(2, 1)), Some(TileClass::Sign));
    }

    #[test]
    fn test_leaving_map_reverts_move() {
        let mut world = world_with(vec![vec![0, 0], vec![0, 0]]);
        let before = world.player().rect;
        world.move_player(1.0, held(false, true, false, false));
        assert_eq!(world.player().rect, before);
    }

    #[test]
    fn test_walk_cycle_toggles_and_resets() {
        let mut player = OverworldPlayer::new(0.0, 0.0, &GameConfig::default());
        player.step(0.1, held(false, false, false, true));
        assert_eq!(player.frame, 0);
        player.step(0.1, held(false, false, false, true));
        assert_eq!(player.frame, 1);
        player.step(0.1, DirectionalState::default());
        assert_eq!(player.frame, 0);
    }

    #[test]
    fn test_harvest_item_clears_tile() {
        let mut world = world_with(vec![vec![0, 31, 30], vec![0, 0, 0]]);
        assert_eq!(world.harvest_item(TilePos::new(1, 0)), Some(Item::Potion));
        assert_eq!(world.tile_at(TilePos::new(1, 0)), Some(0));
        assert_eq!(world.harvest_item(TilePos::new(1, 0)), None);
        assert_eq!(world.harvest_item(TilePos::new(2, 0)), Some(Item::CaptureBall));
    }

    #[test]
    fn test_facing_sign() {
        let mut world = world_with(vec![vec![0, 28, 0], vec![0, 0, 0], vec![0, 0, 0]]);
        world.place_player(TilePos::new(1, 1), Facing::Up);
        assert!(world.is_facing_sign());
        world.place_player(TilePos::new(1, 1), Facing::Down);
        assert!(!world.is_facing_sign());
    }

    #[test]
    fn test_camera_clamps_to_map() {
        let mut world = world_with(vec![vec![0; 20]; 15]);
        world.place_player(TilePos::new(0, 0), Facing::Down);
        assert_eq!(world.camera(), Vec2::ZERO);

        world.place_player(TilePos::new(19, 14), Facing::Down);
        assert_eq!(world.camera(), vec2(20.0 * 32.0 - 200.0, 15.0 * 32.0 - 200.0));

        world.place_player(TilePos::new(10, 7), Facing::Down);
        let center = world.player().rect.center();
        assert_eq!(world.camera(), center - vec2(100.0, 100.0));
    }

    #[test]
    fn test_camera_on_small_map_stays_at_origin() {
        let mut world = world_with(vec![vec![0; 3]; 3]);
        world.update_camera();
        assert_eq!(world.camera(), Vec2::ZERO);
    }
}
