//! Screen-space overlay: timer, ammo counter, wave banner and game-over text.

use glam::Vec2;
use macroquad::text::{draw_text, measure_text};
use wave_survivor_rendering::{palette, Color, Hud};

use crate::to_macroquad_color;

const TIMER_SIZE: f32 = 40.0;
const AMMO_SIZE: f32 = 32.0;
const BANNER_SIZE: f32 = 72.0;
const GAME_OVER_SIZE: f32 = 48.0;
const TOP_ROW_Y: f32 = 60.0;
const RIGHT_MARGIN: f32 = 20.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Anchor {
    Center,
    Right,
}

pub(crate) fn draw(hud: &Hud, viewport: Vec2) {
    draw_outlined(
        &hud.timer.label(),
        Vec2::new(viewport.x / 2.0, TOP_ROW_Y),
        Anchor::Center,
        TIMER_SIZE,
        palette::WHITE,
    );
    draw_outlined(
        &hud.ammo.label(),
        Vec2::new(viewport.x - RIGHT_MARGIN, TOP_ROW_Y),
        Anchor::Right,
        AMMO_SIZE,
        hud.ammo.color(),
    );

    if let Some(banner) = hud.banner {
        draw_outlined(
            &banner.label(),
            viewport / 2.0,
            Anchor::Center,
            BANNER_SIZE,
            banner.color(),
        );
    }

    if let Some(message) = &hud.game_over {
        draw_outlined(
            message,
            viewport / 2.0 + Vec2::new(0.0, BANNER_SIZE),
            Anchor::Center,
            GAME_OVER_SIZE,
            palette::RED,
        );
    }
}

fn draw_outlined(text: &str, anchor_point: Vec2, anchor: Anchor, size: f32, color: Color) {
    let dimensions = measure_text(text, None, font_size(size), 1.0);
    let origin = text_origin(
        anchor_point,
        anchor,
        Vec2::new(dimensions.width, dimensions.height),
    );

    let outline = to_macroquad_color(palette::BLACK.with_alpha(color.alpha));
    for offset in [
        Vec2::new(-2.0, 0.0),
        Vec2::new(2.0, 0.0),
        Vec2::new(0.0, -2.0),
        Vec2::new(0.0, 2.0),
    ] {
        let _ = draw_text(text, origin.x + offset.x, origin.y + offset.y, size, outline);
    }
    let _ = draw_text(text, origin.x, origin.y, size, to_macroquad_color(color));
}

/// Baseline origin that places text of `extent` at `anchor_point`, vertically centred.
fn text_origin(anchor_point: Vec2, anchor: Anchor, extent: Vec2) -> Vec2 {
    let x = match anchor {
        Anchor::Center => anchor_point.x - extent.x / 2.0,
        Anchor::Right => anchor_point.x - extent.x,
    };
    Vec2::new(x, anchor_point.y + extent.y / 2.0)
}

fn font_size(size: f32) -> u16 {
    size.clamp(1.0, f32::from(u16::MAX)) as u16
}
