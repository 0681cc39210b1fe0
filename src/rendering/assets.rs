//! # Asset Store
//!
//! Textures for the tileset, battle sprites and the player's walk cycle.
//!
//! Every asset is optional. A file that fails to load is reported once with
//! `warn!` and the renderer draws [`PLACEHOLDER_COLOR`] in its place.

use crate::config::GameConfig;
use crate::game::{Facing, SpriteKey};
use crate::generation::{RACCOON, WILD_SPECIES};
use macroquad::prelude::*;
use std::collections::HashMap;
use std::path::Path;

/// Fill used wherever an asset is missing.
pub const PLACEHOLDER_COLOR: Color = Color::new(200.0 / 255.0, 50.0 / 255.0, 50.0 / 255.0, 1.0);

/// Loaded textures, looked up by tile id, sprite key or walk frame.
#[derive(Default)]
pub struct AssetStore {
    tile_size: f32,
    tileset: Option<Texture2D>,
    tileset_columns: u32,
    tile_count: u32,
    sprites: HashMap<String, Texture2D>,
    player: HashMap<(Facing, u8), Texture2D>,
}

impl AssetStore {
    /// A store with no textures; everything draws as a placeholder.
    pub fn empty(tile_size: f32) -> Self {
        Self {
            tile_size,
            ..Self::default()
        }
    }

    /// Loads everything under the configured assets directory.
    pub async fn load(config: &GameConfig) -> Self {
        let root = config.assets_dir.as_path();
        let mut store = Self::empty(config.tile_size);

        if let Some(tileset) = load_logged(&root.join("tiles").join("tileset.png")).await {
            store.set_tileset(tileset);
        }

        let species = std::iter::once(&RACCOON).chain(WILD_SPECIES.iter());
        for species in species {
            let path = root.join("battle").join(species.sprite);
            if let Some(texture) = load_logged(&path).await {
                store.sprites.insert(species.sprite.to_string(), texture);
            }
        }

        let player_dir = root.join("overworld").join("player");
        for (facing, name) in [
            (Facing::Down, "down"),
            (Facing::Up, "up"),
            (Facing::Right, "right"),
        ] {
            for frame in 0..2u8 {
                let path = player_dir.join(format!("{name}_{frame}.png"));
                if let Some(texture) = load_logged(&path).await {
                    store.player.insert((facing, frame), texture);
                }
            }
        }

        log::info!(
            "Loaded {} tiles, {} sprites, {} player frames",
            store.tile_count,
            store.sprites.len(),
            store.player.len()
        );
        store
    }

    fn set_tileset(&mut self, tileset: Texture2D) {
        let size = self.tile_size.max(1.0);
        self.tileset_columns = (tileset.width() / size) as u32;
        let rows = (tileset.height() / size) as u32;
        self.tile_count = self.tileset_columns * rows;
        self.tileset = Some(tileset);
    }

    /// The tileset texture with the source rectangle of tile `id`.
    pub fn tile(&self, id: u32) -> Option<(&Texture2D, Rect)> {
        let tileset = self.tileset.as_ref()?;
        let source = tile_source(id, self.tileset_columns, self.tile_count, self.tile_size)?;
        Some((tileset, source))
    }

    /// Battle sprite for a creature.
    pub fn creature_sprite(&self, key: &SpriteKey) -> Option<&Texture2D> {
        self.sprites.get(key.file())
    }

    /// Walk-cycle frame for `facing`. The flag asks for a horizontal flip,
    /// since left is drawn as mirrored right.
    pub fn player_frame(&self, facing: Facing, frame: u8) -> Option<(&Texture2D, bool)> {
        let (facing, flip) = match facing {
            Facing::Left => (Facing::Right, true),
            other => (other, false),
        };
        self.player.get(&(facing, frame)).map(|t| (t, flip))
    }
}

/// Source rectangle of tile `id` in a row-major sheet of `tile_count` tiles.
pub fn tile_source(id: u32, columns: u32, tile_count: u32, tile_size: f32) -> Option<Rect> {
    if columns == 0 || id >= tile_count {
        return None;
    }
    let (col, row) = (id % columns, id / columns);
    Some(Rect::new(
        col as f32 * tile_size,
        row as f32 * tile_size,
        tile_size,
        tile_size,
    ))
}

async fn load_logged(path: &Path) -> Option<Texture2D> {
    let name = path.to_string_lossy();
    match load_texture(&name).await {
        Ok(texture) => {
            texture.set_filter(FilterMode::Nearest);
            Some(texture)
        }
        Err(e) => {
            log::warn!("Missing asset {}: {:?}", name, e);
            None
        }
    }
}
