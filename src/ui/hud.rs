//! Heads-up display
//!
//! Stat bars top-left, weapon and spell boxes bottom-left, experience
//! bottom-right. Layout is computed in plain rects so it can be tested
//! without a window; `draw_hud` only paints it.

use macroquad::prelude::*;
use crate::asset::GameSprites;
use crate::game::combat::CombatState;
use crate::game::rect::Rect;
use crate::game::Renderer;
use super::theme::*;

pub const HEALTH_BOX: Rect = Rect::new(10.0, 10.0, 200.0, 30.0);
pub const MANA_BOX: Rect = Rect::new(10.0, 44.0, 150.0, 20.0);
pub const ITEM_BOX_SIZE: f32 = 80.0;

/// Screen-size dependent placement
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HudLayout {
    pub weapon_box: Rect,
    pub spell_box: Rect,
    /// Bottom-right corner the experience text is anchored to
    pub exp_anchor: Vec2,
}

impl HudLayout {
    pub fn new(screen_width: f32, screen_height: f32) -> Self {
        let y = screen_height - ITEM_BOX_SIZE - 20.0;
        Self {
            weapon_box: Rect::new(20.0, y, ITEM_BOX_SIZE, ITEM_BOX_SIZE),
            spell_box: Rect::new(20.0 + ITEM_BOX_SIZE + 10.0, y, ITEM_BOX_SIZE, ITEM_BOX_SIZE),
            exp_anchor: Vec2::new(screen_width - 40.0, screen_height - 40.0),
        }
    }
}

/// Foreground part of a stat bar: same origin, width scaled by the stat
pub fn bar_fill(bg: &Rect, current: f32, max: f32) -> Rect {
    let ratio = if max > 0.0 { (current / max).clamp(0.0, 1.0) } else { 0.0 };
    Rect::new(bg.x, bg.y, (bg.w * ratio).floor(), bg.h)
}

pub struct Hud {
    font: Option<Font>,
}

impl Hud {
    pub fn new(font: Option<Font>) -> Self {
        Self { font }
    }

    pub fn draw(&self, renderer: &mut Renderer, sprites: &GameSprites, combat: &CombatState) {
        let layout = HudLayout::new(screen_width(), screen_height());

        draw_bar(&HEALTH_BOX, combat.health(), combat.max_health(), HEALTH_COLOR);
        draw_bar(&MANA_BOX, combat.mana(), combat.max_mana(), MANA_COLOR);

        let weapon = sprites.weapons[combat.weapon_index()].full;
        draw_item_box(renderer, &layout.weapon_box, weapon, !combat.can_change_weapon());
        let spell = sprites.spell_icons[combat.spell_index()];
        draw_item_box(renderer, &layout.spell_box, spell, !combat.can_change_spell());

        self.draw_exp(combat.experience(), layout.exp_anchor);
    }

    fn draw_exp(&self, exp: u32, bottom_right: Vec2) {
        let text = exp.to_string();
        let dims = measure_text(&text, self.font.as_ref(), FONT_SIZE, 1.0);
        let text_rect = Rect::new(
            bottom_right.x - dims.width,
            bottom_right.y - dims.height,
            dims.width,
            dims.height,
        );

        fill(&text_rect.inflate(20.0, 20.0), BG_COLOR);
        outline(&text_rect.inflate(10.0, 10.0), 2.0, BORDER_COLOR);
        draw_text_ex(
            &text,
            text_rect.x,
            text_rect.y + dims.offset_y,
            TextParams {
                font: self.font.as_ref(),
                font_size: FONT_SIZE,
                color: TEXT_COLOR,
                ..Default::default()
            },
        );
    }
}

fn fill(rect: &Rect, color: Color) {
    draw_rectangle(rect.x, rect.y, rect.w, rect.h, color);
}

fn outline(rect: &Rect, thickness: f32, color: Color) {
    draw_rectangle_lines(rect.x, rect.y, rect.w, rect.h, thickness, color);
}

fn draw_bar(bg: &Rect, current: f32, max: f32, color: Color) {
    fill(bg, BG_COLOR);
    fill(&bar_fill(bg, current, max), color);
    outline(bg, 3.0, BG_COLOR);
}

fn draw_item_box(renderer: &mut Renderer, bg: &Rect, image: crate::asset::Image, cooling_down: bool) {
    fill(bg, BG_COLOR);
    renderer.draw_centered(image, bg.center());
    let border = if cooling_down { BORDER_HIGHLIGHT_COLOR } else { BORDER_COLOR };
    outline(bg, 3.0, border);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar_fill_is_proportional() {
        assert_eq!(bar_fill(&HEALTH_BOX, 50.0, 100.0).w, 100.0);
        assert_eq!(bar_fill(&MANA_BOX, 60.0, 60.0).w, 150.0);
        assert_eq!(bar_fill(&MANA_BOX, 0.0, 60.0).w, 0.0);
        assert_eq!(bar_fill(&HEALTH_BOX, 33.0, 100.0).w, 66.0);
    }

    #[test]
    fn test_bar_fill_never_overflows() {
        assert_eq!(bar_fill(&HEALTH_BOX, 150.0, 100.0).w, 200.0);
        assert_eq!(bar_fill(&HEALTH_BOX, 10.0, 0.0).w, 0.0);
    }

    #[test]
    fn test_layout_for_default_window() {
        let layout = HudLayout::new(1600.0, 900.0);
        assert_eq!(layout.weapon_box, Rect::new(20.0, 800.0, 80.0, 80.0));
        assert!(layout.spell_box.left() > layout.weapon_box.right());
        assert_eq!(layout.exp_anchor, Vec2::new(1560.0, 860.0));
    }
}
