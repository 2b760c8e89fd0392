//! Drawing the game state on a character grid.

use gfx::{Display, Glyph, Rgb};

use crate::{ecs::Vis, prelude::*, MESSAGE_LINES, SCREEN_SIZE, VIEW_SIZE};

const TOWN_FG: Rgb = Rgb::YELLOW;
const TOWN_BG: Rgb = Rgb::hex(0x32926f);
const CAMP_FG: Rgb = Rgb::ORANGE;
const MENU_BG: Rgb = Rgb::hex(0x1a1a2e);

const STATUS_ROW: i32 = VIEW_SIZE.y;
const ACTION_ROW: i32 = VIEW_SIZE.y + 1;
const MESSAGE_ROW: i32 = VIEW_SIZE.y + 2;

impl Runtime {
    /// Draw the whole screen.
    pub fn draw(&mut self, d: &mut dyn Display) {
        d.clear();
        if self.map.is_zoomed() {
            self.draw_zoomed(d);
        } else {
            self.draw_macro(d);
        }
        self.draw_status(d);
        self.draw_actions(d);
        self.draw_messages(d);
        if let Some(menu) = &self.menu {
            draw_menu(d, menu);
        }
    }

    /// Close-up view centered on the player, one cell per map tile.
    fn draw_zoomed(&self, d: &mut dyn Display) {
        let origin = self.map.zoom_origin(self.player.pos);
        for y in 0..VIEW_SIZE.y {
            for x in 0..VIEW_SIZE.x {
                let p = origin + ivec2(x, y);
                if !self.map.contains(p) {
                    continue;
                }
                let t = self.map.tile_biome(p);
                let glyph = Glyph::new(t.kind.icon()).fg(t.fg).bg(t.bg);
                d.draw(ivec2(x, y), glyph);
            }
        }

        let mut put = |pos: IVec2, glyph: Glyph| d.draw(pos - origin, glyph);

        put(self.town.pos, Glyph::new('⌂').fg(TOWN_FG).bg(TOWN_BG));
        for c in self.town.camps.iter().filter(|c| c.discovered) {
            put(c.pos, Glyph::new('Δ').fg(CAMP_FG));
        }

        for e in self.critters() {
            if e.vis(self) != Vis::Seen {
                continue;
            }
            let Some(pos) = e.pos(self) else { continue };
            let fg = if e.awareness(self) != Vis::Seen {
                Rgb::BLACK
            } else if e.is_aggressive(self) {
                Rgb::RED
            } else {
                Rgb::YELLOW
            };
            let mut glyph = Glyph::new(e.icon(self)).fg(fg);
            if self.player.target == Some(e) {
                glyph = glyph.bg(Rgb::CYAN);
            }
            put(pos, glyph);
        }

        put(self.player.pos, Glyph::new('@').fg(Rgb::WHITE));
    }

    /// Overview of the whole map, fogged by how close the player has been.
    fn draw_macro(&mut self, d: &mut dyn Display) {
        let player_cell = self.map.map_to_game_scale(self.player.pos);
        for y in 0..VIEW_SIZE.y {
            for x in 0..VIEW_SIZE.x {
                let cell = ivec2(x, y);
                let p = self.map.game_to_map_scale(cell);
                if !self.map.contains(p) {
                    continue;
                }
                let bg = self.map.tile_biome(p).bg;
                let shade = self.map.macro_shade(cell, player_cell);
                d.draw(cell, Glyph::new(' ').bg(bg.darken(shade as f32)));
            }
        }

        let town = self.map.map_to_game_scale(self.town.pos);
        d.draw(town, Glyph::new('⌂').fg(TOWN_FG).bg(TOWN_BG));
        for c in self.town.camps.iter().filter(|c| c.discovered) {
            let pos = self.map.map_to_game_scale(c.pos);
            d.draw(pos, Glyph::new('Δ').fg(CAMP_FG));
        }
        d.draw(player_cell, Glyph::new('@').fg(Rgb::WHITE));
    }

    fn draw_status(&self, d: &mut dyn Display) {
        let p = &self.player;
        let hp_col = if p.hp * 2 <= p.max_hp {
            Rgb::RED
        } else {
            Rgb::WHITE
        };
        let food_col = if p.food <= 2 { Rgb::ORANGE } else { Rgb::WHITE };

        let mut parts = vec![
            (format!("T:{}", self.now().turn()), Rgb::GRAY),
            (format!("HP:{}/{}", p.hp, p.max_hp), hp_col),
            (format!("Food:{}", p.food), food_col),
            (format!("Hunger:{}%", p.hunger), Rgb::WHITE),
            (format!("Noise:{}", p.noise), Rgb::WHITE),
            (format!("Arrows:{}", p.arrows), Rgb::WHITE),
        ];
        if p.hidden {
            parts.push(("HIDDEN".into(), Rgb::CYAN));
        }
        if p.listening {
            parts.push(("LISTENING".into(), Rgb::CYAN));
        }

        let mut x = 0;
        for (text, fg) in parts {
            d.draw_colored_text(ivec2(x, STATUS_ROW), &text, None, Some(fg));
            x += text.chars().count() as i32 + 1;
        }
    }

    fn draw_actions(&self, d: &mut dyn Display) {
        let bow = self.player.skills.archery > 0;
        let actions = [
            ("[1 LISTEN]", true),
            ("[2 HIDE]", true),
            ("[3 SCOUT]", true),
            ("[4 AIM]", bow),
            ("[5 FIRE]", bow),
            ("[0 HELP]", true),
        ];
        let mut x = 0;
        for (label, enabled) in actions {
            let fg = if enabled { Rgb::WHITE } else { Rgb::DARK_GRAY };
            d.draw_colored_text(ivec2(x, ACTION_ROW), label, None, Some(fg));
            x += label.len() as i32 + 1;
        }
    }

    fn draw_messages(&self, d: &mut dyn Display) {
        for (i, m) in self.messages().tail(MESSAGE_LINES).enumerate() {
            let fg = match m {
                Msg::Message(_) => Rgb::WHITE,
                Msg::Alert(_) => Rgb::RED,
            };
            d.draw_colored_text(
                ivec2(0, MESSAGE_ROW + i as i32),
                m.text(),
                Some(SCREEN_SIZE.x as usize),
                Some(fg),
            );
        }
    }
}

/// Menu box in the middle of the map view.
fn draw_menu(d: &mut dyn Display, menu: &Menu) {
    let lines = menu.text.len() + menu.items.len() + 3;
    let width = std::iter::once(menu.title.chars().count())
        .chain(menu.text.iter().map(|t| t.chars().count()))
        .chain(menu.items.iter().map(|i| i.label.chars().count() + 2))
        .max()
        .unwrap_or(0) as i32
        + 4;
    let height = lines as i32;
    let origin = (VIEW_SIZE - ivec2(width, height)) / 2;

    for y in 0..height {
        for x in 0..width {
            d.draw(origin + ivec2(x, y), Glyph::new(' ').bg(MENU_BG));
        }
    }

    let x = origin.x + 2;
    let mut y = origin.y;
    d.draw_colored_text(ivec2(x, y), &menu.title, None, Some(Rgb::YELLOW));
    y += 2;
    for line in &menu.text {
        d.draw_colored_text(ivec2(x, y), line, None, Some(Rgb::GRAY));
        y += 1;
    }
    for (i, item) in menu.items.iter().enumerate() {
        let (prefix, fg) = if i == menu.current {
            ("> ", Rgb::WHITE)
        } else {
            ("  ", Rgb::GRAY)
        };
        d.draw_colored_text(
            ivec2(origin.x + 2, y),
            &format!("{prefix}{}", item.label),
            None,
            Some(fg),
        );
        y += 1;
    }
}

#[cfg(test)]
mod test {
    use gfx::Buffer;
    use rand::rngs::mock::StepRng;
    use world::{BiomeKind, BiomeMap, WorldMap};

    use super::*;
    use crate::PlayerAction;

    fn runtime() -> Runtime {
        let map = WorldMap::new(
            BiomeMap::uniform(ivec2(480, 184), BiomeKind::Plains),
            VIEW_SIZE,
        );
        Runtime::scenario(map, ivec2(200, 100), StepRng::new(0, 0))
    }

    fn screen() -> Buffer {
        Buffer::new(SCREEN_SIZE.x as u32, SCREEN_SIZE.y as u32)
    }

    #[test]
    fn status_and_actions() {
        let mut r = runtime();
        let mut buf = screen();
        r.draw(&mut buf);

        assert!(buf.row_text(STATUS_ROW).starts_with("T:1 HP:5/5 Food:10"));
        assert!(buf.row_text(ACTION_ROW).starts_with("[1 LISTEN] [2 HIDE]"));
        // No bow yet.
        let aim = buf.row_text(ACTION_ROW).find("[4 AIM]").unwrap() as i32;
        assert_eq!(
            buf.get(ivec2(aim, ACTION_ROW)).map(|c| c.fg),
            Some(Rgb::DARK_GRAY)
        );
    }

    #[test]
    fn zoomed_view_centers_player() {
        let mut r = runtime();
        r.play(PlayerAction::ToggleZoom);
        let mut buf = screen();
        r.draw(&mut buf);

        let center = VIEW_SIZE / 2;
        assert_eq!(buf.get(center).map(|c| c.c), Some('@'));
        let town = r.town.pos - r.map.zoom_origin(r.player.pos);
        assert_eq!(buf.get(town).map(|c| c.c), Some('⌂'));
    }

    #[test]
    fn seen_critters_are_drawn() {
        let mut r = runtime();
        r.map.zoom_in();
        let pos = r.player.pos;
        let hidden = r.spawn_critter(Species::Bear, pos + ivec2(-20, 0));
        let shown = r.spawn_critter(Species::Deer, pos + ivec2(-2, 0));
        r.update_vis();

        let mut buf = screen();
        r.draw(&mut buf);
        let origin = r.map.zoom_origin(r.player.pos);
        let at = |e: Entity| buf.get(e.pos(&r).unwrap() - origin).map(|c| c.c);
        assert_eq!(at(shown), Some('d'));
        assert_ne!(at(hidden), Some('B'));
    }

    #[test]
    fn menu_overlay() {
        let mut r = runtime();
        r.dispatch(MenuCommand::Town);
        let mut buf = screen();
        r.draw(&mut buf);
        let text: String = (0..VIEW_SIZE.y).map(|y| buf.row_text(y)).collect();
        assert!(text.contains("> Quests"));
        assert!(text.contains("  Leave"));
    }
}
