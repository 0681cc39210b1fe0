//! # Map Loading
//!
//! Maps are plain text: one row of comma-separated tile ids per line. The
//! loader forces every map to the configured size, so ragged or oversized
//! files still produce a usable grid.

use crate::config::GameConfig;
use crate::game::TileMap;
use crate::PocketResult;
use std::io::ErrorKind;
use std::path::Path;

/// Tile id used to pad short rows and missing rows.
pub const PADDING_TILE: u32 = 0;

/// Parses map text into a `width` x `height` grid.
///
/// Blank lines are skipped. Short rows and missing rows are padded with
/// [`PADDING_TILE`], extra cells and rows are dropped, and cells that are not
/// non-negative integers read as [`PADDING_TILE`].
///
/// # Examples
///
/// ```
/// use pocket_battle::{parse_map, TilePos};
///
/// let map = parse_map("1,2,3,4\n\n5\n", 3, 3);
/// assert_eq!(map.get(TilePos::new(2, 0)), Some(3));
/// assert_eq!(map.get(TilePos::new(1, 1)), Some(0));
/// assert_eq!(map.get(TilePos::new(0, 2)), Some(0));
/// assert_eq!(map.get(TilePos::new(3, 0)), None);
/// ```
pub fn parse_map(text: &str, width: usize, height: usize) -> TileMap {
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    if lines.len() != height {
        log::warn!(
            "Map has {} rows, expected {}; adjusting",
            lines.len(),
            height
        );
    }

    let mut rows: Vec<Vec<u32>> = lines
        .iter()
        .take(height)
        .enumerate()
        .map(|(y, line)| parse_row(y, line, width))
        .collect();
    rows.resize(height, vec![PADDING_TILE; width]);

    TileMap::from_rows(width, rows)
}

fn parse_row(y: usize, line: &str, width: usize) -> Vec<u32> {
    let mut row: Vec<u32> = line
        .split(',')
        .enumerate()
        .map(|(x, cell)| {
            cell.trim().parse().unwrap_or_else(|_| {
                log::warn!("Bad tile id {:?} at ({}, {}); using {}", cell, x, y, PADDING_TILE);
                PADDING_TILE
            })
        })
        .collect();

    if row.len() != width {
        log::debug!("Map row {} has {} cells, expected {}", y, row.len(), width);
        row.resize(width, PADDING_TILE);
    }
    row
}

/// Loads the configured map file at the configured size.
///
/// A missing file yields a blank map of base tiles. Other read errors are
/// returned.
pub fn load_map(path: impl AsRef<Path>, config: &GameConfig) -> PocketResult<TileMap> {
    let path = path.as_ref();
    match std::fs::read_to_string(path) {
        Ok(text) => {
            log::info!("Loaded map {}", path.display());
            Ok(parse_map(&text, config.map_width, config.map_height))
        }
        Err(e) if e.kind() == ErrorKind::NotFound => {
            log::warn!("Map {} not found; starting on a blank map", path.display());
            Ok(TileMap::filled(
                config.map_width,
                config.map_height,
                config.tiles.base,
            ))
        }
        Err(e) => Err(e.into()),
    }
}
