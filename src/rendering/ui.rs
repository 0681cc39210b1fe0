//! # User Interface Elements
//!
//! Small drawing helpers shared by the world HUD, the battle screen and the
//! overlays: panels, hit-point bars and option lists.

use crate::rendering::PLACEHOLDER_COLOR;
use macroquad::prelude::*;

/// Highlighted menu entry.
pub const SELECTED_TEXT: Color = Color::new(1.0, 1.0, 0.0, 1.0);
/// Regular menu entry.
pub const MENU_TEXT: Color = Color::new(0.9, 0.9, 0.9, 1.0);
/// Translucent black used behind HUD text.
pub const HUD_FILL: Color = Color::new(0.0, 0.0, 0.0, 0.7);

const HP_BAR_WIDTH: f32 = 220.0;
const HP_BAR_HEIGHT: f32 = 22.0;
const HP_GREEN: Color = Color::new(0.0, 200.0 / 255.0, 0.0, 1.0);

/// Width of the filled part of a hit-point bar.
///
/// # Examples
///
/// ```
/// use pocket_battle::hp_fill_width;
///
/// assert_eq!(hp_fill_width(50, 100, 216.0), 108.0);
/// assert_eq!(hp_fill_width(0, 0, 216.0), 0.0);
/// ```
pub fn hp_fill_width(hp: u32, max_hp: u32, inner_width: f32) -> f32 {
    let max_hp = max_hp.max(1);
    let hp = hp.min(max_hp);
    inner_width * hp as f32 / max_hp as f32
}

/// Filled rectangle with an optional border.
pub fn draw_panel(x: f32, y: f32, w: f32, h: f32, fill: Color, border: Option<Color>) {
    draw_rectangle(x, y, w, h, fill);
    if let Some(border) = border {
        draw_rectangle_lines(x, y, w, h, 3.0, border);
    }
}

/// Name, hit points and a bar, with the text sitting above the bar.
pub fn draw_hp_bar(name: &str, hp: u32, max_hp: u32, x: f32, y: f32) {
    draw_rectangle(x, y, HP_BAR_WIDTH, HP_BAR_HEIGHT, BLACK);
    let inner = HP_BAR_WIDTH - 4.0;
    draw_rectangle(
        x + 2.0,
        y + 2.0,
        hp_fill_width(hp, max_hp, inner),
        HP_BAR_HEIGHT - 4.0,
        HP_GREEN,
    );
    draw_text(&format!("{name} {hp}/{max_hp}"), x, y - 6.0, 22.0, BLACK);
}

/// Options laid out left to right, `spacing` apart.
pub fn draw_menu_row<S: AsRef<str>>(
    options: &[S],
    cursor: usize,
    x: f32,
    y: f32,
    spacing: f32,
    font_size: f32,
) {
    for (i, option) in options.iter().enumerate() {
        let color = if i == cursor { SELECTED_TEXT } else { MENU_TEXT };
        draw_text(option.as_ref(), x + spacing * i as f32, y, font_size, color);
    }
}

/// Options laid out top to bottom, `spacing` apart.
pub fn draw_menu_column<S: AsRef<str>>(
    options: &[S],
    cursor: usize,
    x: f32,
    y: f32,
    spacing: f32,
    font_size: f32,
) {
    for (i, option) in options.iter().enumerate() {
        let color = if i == cursor { SELECTED_TEXT } else { MENU_TEXT };
        draw_text(option.as_ref(), x, y + spacing * i as f32, font_size, color);
    }
}

/// Text centred horizontally on `center_x`.
pub fn draw_centered_text(text: &str, center_x: f32, y: f32, font_size: f32, color: Color) {
    let size = measure_text(text, None, font_size as u16, 1.0);
    draw_text(text, center_x - size.width / 2.0, y, font_size, color);
}

/// Draws `texture` stretched to the given box, or the placeholder square.
pub fn draw_texture_or_placeholder(
    texture: Option<&Texture2D>,
    x: f32,
    y: f32,
    w: f32,
    h: f32,
    flip_x: bool,
) {
    match texture {
        Some(texture) => draw_texture_ex(
            texture,
            x,
            y,
            WHITE,
            DrawTextureParams {
                dest_size: Some(vec2(w, h)),
                flip_x,
                ..Default::default()
            },
        ),
        None => draw_rectangle(x, y, w, h, PLACEHOLDER_COLOR),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hp_fill_clamps() {
        assert_eq!(hp_fill_width(150, 100, 200.0), 200.0);
        assert_eq!(hp_fill_width(0, 100, 200.0), 0.0);
        assert_eq!(hp_fill_width(25, 100, 200.0), 50.0);
    }
}
