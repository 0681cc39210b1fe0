//! # Display Management
//!
//! Draws the current frame for a [`ModeController`] with macroquad.

use crate::config::GameConfig;
use crate::game::{BagSlot, BattleSession, BattleState, Item, MenuOption, Roster};
use crate::overlays::{PartyAction, PartyLevel, PartyMenu, PauseCommand};
use crate::rendering::{
    draw_centered_text, draw_hp_bar, draw_menu_column, draw_menu_row, draw_panel,
    draw_texture_or_placeholder, AssetStore, Viewport, HUD_FILL, MENU_TEXT, PLACEHOLDER_COLOR,
    SELECTED_TEXT,
};
use crate::scenes::{Mode, ModeController};
use macroquad::prelude::*;

const SKY: Color = Color::new(140.0 / 255.0, 160.0 / 255.0, 220.0 / 255.0, 1.0);
const GRASS: Color = Color::new(60.0 / 255.0, 130.0 / 255.0, 60.0 / 255.0, 1.0);
const BATTLE_PANEL: Color = Color::new(20.0 / 255.0, 20.0 / 255.0, 60.0 / 255.0, 1.0);
const PAUSE_PANEL: Color = Color::new(25.0 / 255.0, 25.0 / 255.0, 60.0 / 255.0, 1.0);
const PARTY_ROW: Color = Color::new(40.0 / 255.0, 40.0 / 255.0, 70.0 / 255.0, 1.0);
const PARTY_ROW_SELECTED: Color = Color::new(70.0 / 255.0, 70.0 / 255.0, 110.0 / 255.0, 1.0);
const DIALOGUE_FILL: Color = Color::new(20.0 / 255.0, 20.0 / 255.0, 20.0 / 255.0, 1.0);

const BATTLE_PANEL_HEIGHT: f32 = 150.0;
const HUD_WIDTH: f32 = 220.0;
const HUD_HEIGHT: f32 = 90.0;

/// Macroquad display manager for the game.
pub struct MacroquadDisplay {
    config: GameConfig,
}

impl MacroquadDisplay {
    pub fn new(config: GameConfig) -> Self {
        Self { config }
    }

    /// Renders the complete game screen. Reads state only.
    pub fn render(&self, game: &ModeController, assets: &AssetStore) {
        clear_background(BLACK);

        match game.mode() {
            Mode::Battle => {
                if let Some(battle) = game.battle() {
                    self.render_battle(battle, game.roster(), assets);
                }
            }
            Mode::World => {
                let viewport = Viewport::new(&self.config, game.world().camera());
                self.render_map(game, assets, &viewport);
                self.render_player(game, assets, &viewport);
                self.render_hud(game.roster());
                self.render_popup(game);
                self.render_interact_hint(game, &viewport);
                if game.pause().is_open() {
                    self.render_pause(game.pause().cursor());
                }
            }
        }

        if game.party().is_open() {
            self.render_party(game.party(), game.roster(), assets);
        }
        if game.dialogue().is_open() {
            self.render_dialogue(game.dialogue().text());
        }
    }

    fn render_map(&self, game: &ModeController, assets: &AssetStore, viewport: &Viewport) {
        let map = game.world().map();
        let size = self.config.tile_size;
        let tile_px = size * viewport.scale;
        let (cols, rows) = viewport.visible_tiles(size, map.width(), map.height());

        for (y, row) in map.rows().enumerate().skip(rows.start).take(rows.len()) {
            for x in cols.clone() {
                let Some(&id) = row.get(x) else { continue };
                let screen = viewport.to_screen(vec2(x as f32 * size, y as f32 * size));
                match assets.tile(id) {
                    Some((tileset, source)) => draw_texture_ex(
                        tileset,
                        screen.x,
                        screen.y,
                        WHITE,
                        DrawTextureParams {
                            dest_size: Some(vec2(tile_px, tile_px)),
                            source: Some(source),
                            ..Default::default()
                        },
                    ),
                    None => draw_rectangle(screen.x, screen.y, tile_px, tile_px, PLACEHOLDER_COLOR),
                }
            }
        }
    }

    fn render_player(&self, game: &ModeController, assets: &AssetStore, viewport: &Viewport) {
        let player = game.world().player();
        let screen = viewport.to_screen(vec2(player.rect.x, player.rect.y));
        let frame = assets.player_frame(player.facing, player.frame);
        draw_texture_or_placeholder(
            frame.map(|(texture, _)| texture),
            screen.x,
            screen.y,
            player.rect.w * viewport.scale,
            player.rect.h * viewport.scale,
            frame.is_some_and(|(_, flip)| flip),
        );
    }

    fn render_hud(&self, roster: &Roster) {
        let x = screen_width() - HUD_WIDTH - 12.0;
        let y = 12.0;
        draw_panel(x, y, HUD_WIDTH, HUD_HEIGHT, HUD_FILL, None);

        let lines = [
            "P : Pause".to_string(),
            "E : Interact".to_string(),
            format!("Potions : {}", roster.count(Item::Potion)),
            format!("Capture Balls : {}", roster.count(Item::CaptureBall)),
        ];
        for (i, line) in lines.iter().enumerate() {
            draw_text(line, x + 12.0, y + 24.0 + i as f32 * 20.0, 22.0, WHITE);
        }
    }

    fn render_popup(&self, game: &ModeController) {
        let popup = game.popup();
        if !popup.is_visible() {
            return;
        }
        let x = screen_width() - HUD_WIDTH - 12.0;
        let y = 12.0 + HUD_HEIGHT + 8.0;
        draw_panel(x, y, HUD_WIDTH, 32.0, HUD_FILL, None);
        draw_text(popup.text(), x + 10.0, y + 22.0, 22.0, WHITE);
    }

    fn render_interact_hint(&self, game: &ModeController, viewport: &Viewport) {
        if !game.show_interact() {
            return;
        }
        let player = game.world().player();
        let anchor = viewport.to_screen(vec2(player.rect.x, player.rect.y));
        let text = "E : Interact";
        let size = measure_text(text, None, 20, 1.0);
        let (x, y) = (anchor.x + 8.0, anchor.y - 20.0 - size.height);
        draw_panel(x, y, size.width + 12.0, size.height + 8.0, HUD_FILL, None);
        draw_text(text, x + 6.0, y + size.height + 3.0, 20.0, WHITE);
    }

    fn render_pause(&self, cursor: usize) {
        let (w, h) = (300.0, 240.0);
        let x = screen_width() / 2.0 - w / 2.0;
        let y = screen_height() / 2.0 - h / 2.0;
        draw_panel(x, y, w, h, PAUSE_PANEL, Some(WHITE));

        let labels = PauseCommand::ALL.map(PauseCommand::label);
        draw_menu_column(&labels, cursor, x + 60.0, y + 70.0, 45.0, 36.0);
    }

    fn render_battle(&self, battle: &BattleSession, roster: &Roster, assets: &AssetStore) {
        let (w, h) = (screen_width(), screen_height());
        let panel_y = h - BATTLE_PANEL_HEIGHT;

        clear_background(SKY);
        draw_ellipse(w * 0.29, h * 0.64, w * 0.21, h * 0.06, 0.0, GRASS);
        draw_ellipse(w * 0.73, h * 0.31, w * 0.18, h * 0.05, 0.0, GRASS);

        let enemy = battle.enemy();
        draw_hp_bar(&enemy.name, enemy.hp(), enemy.max_hp, w * 0.52, h * 0.06);
        draw_texture_or_placeholder(
            assets.creature_sprite(&enemy.sprite),
            w * 0.62,
            h * 0.18,
            160.0,
            160.0,
            false,
        );

        let player = battle.player(roster);
        if let Some(player) = player {
            draw_hp_bar(&player.name, player.hp(), player.max_hp, w * 0.10, h * 0.36);
            draw_texture_or_placeholder(
                assets.creature_sprite(&player.sprite),
                w * 0.12,
                h * 0.44,
                180.0,
                180.0,
                false,
            );
        }

        draw_panel(0.0, panel_y, w, BATTLE_PANEL_HEIGHT, BATTLE_PANEL, Some(WHITE));
        draw_text(
            "WASD/Arrows - Enter select - Backspace/Esc back",
            16.0,
            panel_y + 24.0,
            22.0,
            LIGHTGRAY,
        );

        let row_y = panel_y + 84.0;
        match battle.state() {
            BattleState::Menu => {
                let labels = MenuOption::ALL.map(MenuOption::label);
                draw_menu_row(&labels, battle.menu_cursor(), w * 0.10, row_y, w * 0.22, 36.0);
                if !battle.message().is_empty() {
                    draw_text(battle.message(), w * 0.10, row_y + 40.0, 26.0, MENU_TEXT);
                }
            }
            BattleState::Fight => {
                if let Some(player) = player {
                    let names: Vec<String> = (0..player.move_count())
                        .take(4)
                        .map(|i| player.move_at(i).name.to_string())
                        .collect();
                    draw_menu_row(&names, battle.move_cursor(), w * 0.08, row_y, w * 0.24, 36.0);
                }
            }
            BattleState::Bag => {
                let labels = BagSlot::ALL.map(|slot| {
                    let item = slot.item();
                    format!("{} x{}", item.label(), roster.count(item))
                });
                draw_menu_row(&labels, battle.bag_cursor(), w * 0.18, row_y, w * 0.35, 36.0);
            }
            BattleState::Message | BattleState::End => {
                draw_text(battle.message(), w * 0.08, row_y, 42.0, WHITE);
            }
        }
    }

    fn render_party(&self, party: &PartyMenu, roster: &Roster, assets: &AssetStore) {
        if roster.is_empty() {
            return;
        }
        let (w, h) = (screen_width(), screen_height());
        draw_rectangle(0.0, 0.0, w, h, Color::new(0.0, 0.0, 0.0, 0.78));
        draw_centered_text("PARTY", w / 2.0, 72.0, 56.0, WHITE);

        let (list_x, list_y, row_h) = (80.0, 120.0, 80.0);
        let box_w = w - 160.0;
        for (i, member) in roster.members().iter().enumerate() {
            let y = list_y + i as f32 * row_h;
            let selected = i == party.index() && party.level() == PartyLevel::List;
            let fill = if selected { PARTY_ROW_SELECTED } else { PARTY_ROW };
            draw_panel(list_x, y, box_w, row_h - 10.0, fill, Some(WHITE));

            draw_texture_or_placeholder(
                assets.creature_sprite(&member.sprite),
                list_x + 16.0,
                y + 8.0,
                56.0,
                56.0,
                false,
            );
            let active = if roster.is_active(i) { "  (ACTIVE)" } else { "" };
            draw_text(&format!("{}{}", member.name, active), list_x + 92.0, y + 32.0, 32.0, WHITE);
            draw_text(
                &format!("HP {}/{}", member.hp(), member.max_hp),
                list_x + 92.0,
                y + 60.0,
                26.0,
                LIGHTGRAY,
            );
        }

        if let Some(notice) = party.notice() {
            draw_centered_text(notice, w / 2.0, h - 70.0, 28.0, SELECTED_TEXT);
        }
        draw_centered_text(
            "UP/DOWN select - ENTER actions - ESC/BKSP back",
            w / 2.0,
            h - 30.0,
            26.0,
            LIGHTGRAY,
        );

        if party.level() == PartyLevel::Actions {
            let (aw, ah) = (360.0, 220.0);
            let (ax, ay) = (w / 2.0 - aw / 2.0, h / 2.0 - ah / 2.0);
            draw_panel(ax, ay, aw, ah, BATTLE_PANEL, Some(WHITE));
            draw_centered_text("ACTIONS", w / 2.0, ay + 44.0, 32.0, WHITE);
            let labels = PartyAction::ALL.map(PartyAction::label);
            draw_menu_column(&labels, party.action_index(), ax + 40.0, ay + 94.0, 34.0, 32.0);
        }
    }

    fn render_dialogue(&self, text: &str) {
        let (w, h) = (screen_width(), screen_height());
        draw_panel(0.0, h - 120.0, w, 120.0, DIALOGUE_FILL, Some(WHITE));
        draw_text(text, 30.0, h - 70.0, 30.0, WHITE);
    }
}
