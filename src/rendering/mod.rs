//! # Rendering Module
//!
//! Macroquad drawing for every game state. Rendering is a pure read of the
//! [`ModeController`](crate::ModeController): nothing here mutates game state,
//! and this is the only place textures are consulted.

pub mod assets;
pub mod display;
pub mod ui;

pub use assets::*;
pub use display::*;
pub use ui::*;

use crate::config::GameConfig;
use macroquad::math::{vec2, Vec2};
use macroquad::window::Conf;
use std::ops::Range;

/// Window settings matching the viewport `config` describes.
pub fn window_settings(config: &GameConfig) -> Conf {
    Conf {
        window_title: "Pocket Battle".to_owned(),
        window_width: config.window_width().round() as i32,
        window_height: config.window_height().round() as i32,
        window_resizable: false,
        ..Default::default()
    }
}

/// Maps world pixels to screen pixels for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Screen width in pixels
    pub width: f32,
    /// Screen height in pixels
    pub height: f32,
    /// Screen pixels per world pixel
    pub scale: f32,
    /// Top-left of the visible area in world pixels
    pub camera: Vec2,
}

impl Viewport {
    /// A viewport of the configured window size looking from `camera`.
    pub fn new(config: &GameConfig, camera: Vec2) -> Self {
        Self {
            width: config.window_width(),
            height: config.window_height(),
            scale: config.screen_scale,
            camera,
        }
    }

    /// Screen position of a world-space point.
    pub fn to_screen(&self, world: Vec2) -> Vec2 {
        (world - self.camera) * self.scale
    }

    /// Tile columns and rows that intersect the screen, clipped to the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use macroquad::math::vec2;
    /// use pocket_battle::{GameConfig, Viewport};
    ///
    /// let viewport = Viewport::new(&GameConfig::default(), vec2(64.0, 0.0));
    /// let (cols, rows) = viewport.visible_tiles(32.0, 20, 15);
    /// assert_eq!(cols, 2..10);
    /// assert_eq!(rows, 0..8);
    /// ```
    pub fn visible_tiles(
        &self,
        tile_size: f32,
        map_width: usize,
        map_height: usize,
    ) -> (Range<usize>, Range<usize>) {
        let view = vec2(self.width, self.height) / self.scale.max(f32::EPSILON);
        let start = (self.camera / tile_size).floor().max(Vec2::ZERO);
        let end = ((self.camera + view) / tile_size).floor() + Vec2::splat(2.0);

        let cols = start.x as usize..(end.x.max(0.0) as usize).min(map_width);
        let rows = start.y as usize..(end.y.max(0.0) as usize).min(map_height);
        (cols, rows)
    }
}
