#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Macroquad-backed rendering adapter for Wave Survivor.
//!
//! Macroquad's optional audio stack depends on native ALSA development
//! libraries, which are unavailable in the containerised CI environment.
//! The crate therefore depends on macroquad without its default `audio`
//! feature.
//!
//! World-space content is drawn through a [`Camera2D`] that follows the
//! player; the HUD is drawn afterwards in screen space.

mod hud;
mod sprites;

use std::{path::PathBuf, time::Duration};

use anyhow::Result;
use glam::Vec2;
use macroquad::{
    camera::{set_camera, set_default_camera, Camera2D},
    input::{is_key_down, is_key_pressed, KeyCode},
    math::{Rect, Vec2 as MacroquadVec2},
    shapes::{draw_circle, draw_circle_lines, draw_line, draw_rectangle, draw_rectangle_lines},
};
use wave_survivor_core::{Facing, MovementInput, SkinId};
use wave_survivor_rendering::{
    palette, Color, FrameInput, Presentation, RenderingBackend, Scene, HEALTH_BAR_HEIGHT,
    HEALTH_BAR_OFFSET_Y, HEALTH_BAR_WIDTH,
};

use self::sprites::SkinAtlas;

const GRID_SPACING: f32 = 100.0;
const SKIN_COLORS: [Color; 6] = [
    Color::from_rgb_u8(0xf7, 0x93, 0x1a),
    Color::from_rgb_u8(0x62, 0x7e, 0xea),
    Color::from_rgb_u8(0x14, 0xf1, 0x95),
    Color::from_rgb_u8(0xc2, 0xa6, 0x33),
    Color::from_rgb_u8(0x26, 0xa1, 0x7b),
    Color::from_rgb_u8(0xe8, 0x41, 0x42),
];

/// Rendering backend implemented on top of macroquad.
#[derive(Debug)]
pub struct MacroquadBackend {
    swap_interval: Option<i32>,
    window_size: (i32, i32),
    roster: Vec<String>,
    sprite_manifest: Option<PathBuf>,
}

impl Default for MacroquadBackend {
    fn default() -> Self {
        Self {
            swap_interval: None,
            window_size: (1280, 720),
            roster: Vec::new(),
            sprite_manifest: None,
        }
    }
}

impl MacroquadBackend {
    /// Returns a backend that requests the platform's default swap interval.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the backend to either synchronise presentation with the display refresh rate
    /// or render as fast as possible.
    #[must_use]
    pub fn with_vsync(mut self, enabled: bool) -> Self {
        self.swap_interval = Some(i32::from(enabled));
        self
    }

    /// Loads enemy and player sprites from a manifest keyed by roster names.
    ///
    /// Without a manifest every entity is drawn with primitive shapes.
    #[must_use]
    pub fn with_sprites(mut self, manifest: PathBuf, roster: Vec<String>) -> Self {
        self.sprite_manifest = Some(manifest);
        self.roster = roster;
        self
    }
}

impl RenderingBackend for MacroquadBackend {
    fn run<F>(self, presentation: Presentation, mut update_scene: F) -> Result<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) -> bool + 'static,
    {
        let Self {
            swap_interval,
            window_size,
            roster,
            sprite_manifest,
        } = self;

        let Presentation {
            window_title,
            clear_color,
            scene,
        } = presentation;

        let mut config = macroquad::window::Conf {
            window_title,
            window_width: window_size.0,
            window_height: window_size.1,
            ..macroquad::window::Conf::default()
        };
        if let Some(swap_interval) = swap_interval {
            config.platform.swap_interval = Some(swap_interval);
        }

        macroquad::Window::from_config(config, async move {
            let mut scene = scene;
            let atlas = match sprite_manifest {
                Some(path) => match SkinAtlas::from_manifest_path(&path, &roster) {
                    Ok(atlas) => atlas,
                    Err(error) => {
                        log::warn!("sprites unavailable, drawing shapes instead: {error:#}");
                        SkinAtlas::default()
                    }
                },
                None => SkinAtlas::default(),
            };
            let background = to_macroquad_color(clear_color);
            let mut blink_clock = 0.0_f32;

            loop {
                if is_key_pressed(KeyCode::Escape) {
                    break;
                }

                let dt_seconds = macroquad::time::get_frame_time().max(0.0);
                let frame_dt = Duration::from_secs_f32(dt_seconds);
                blink_clock = (blink_clock + dt_seconds) % 1.0;

                let input = FrameInput {
                    movement: movement_from_keys(KeyObservations::poll()),
                    restart: is_key_pressed(KeyCode::R),
                };
                if !update_scene(frame_dt, input, &mut scene) {
                    break;
                }

                macroquad::window::clear_background(background);
                let viewport = Vec2::new(
                    macroquad::window::screen_width(),
                    macroquad::window::screen_height(),
                );
                let camera = scene.camera_target(viewport);
                set_camera(&Camera2D::from_display_rect(Rect::new(
                    camera.x - viewport.x / 2.0,
                    camera.y - viewport.y / 2.0,
                    viewport.x,
                    viewport.y,
                )));

                draw_map(&scene);
                draw_enemies(&scene, &atlas);
                draw_bullets(&scene);
                draw_player(&scene, &atlas, blink_clock);
                draw_health_bar(&scene);

                set_default_camera();
                hud::draw(&scene.hud, viewport);

                macroquad::window::next_frame().await;
            }
        });

        Ok(())
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct KeyObservations {
    up: bool,
    down: bool,
    left: bool,
    right: bool,
}

impl KeyObservations {
    fn poll() -> Self {
        Self {
            up: is_key_down(KeyCode::W) || is_key_down(KeyCode::Up),
            down: is_key_down(KeyCode::S) || is_key_down(KeyCode::Down),
            left: is_key_down(KeyCode::A) || is_key_down(KeyCode::Left),
            right: is_key_down(KeyCode::D) || is_key_down(KeyCode::Right),
        }
    }
}

fn movement_from_keys(keys: KeyObservations) -> MovementInput {
    MovementInput {
        up: keys.up,
        down: keys.down,
        left: keys.left,
        right: keys.right,
    }
}

fn draw_map(scene: &Scene) {
    let size = scene.map_size;
    let line = to_macroquad_color(Color::from_rgb_u8(0x2a, 0x2a, 0x4a).with_alpha(0.3));

    let mut x = 0.0;
    while x <= size.x {
        draw_line(x, 0.0, x, size.y, 1.0, line);
        x += GRID_SPACING;
    }
    let mut y = 0.0;
    while y <= size.y {
        draw_line(0.0, y, size.x, y, 1.0, line);
        y += GRID_SPACING;
    }

    draw_rectangle_lines(
        0.0,
        0.0,
        size.x,
        size.y,
        4.0,
        to_macroquad_color(palette::WHITE.with_alpha(0.4)),
    );
}

fn draw_enemies(scene: &Scene, atlas: &SkinAtlas) {
    for enemy in &scene.enemies {
        let center = to_macroquad_vec2(enemy.position);
        match atlas.skin(enemy.skin) {
            Some(texture) => sprites::draw_centered(texture, center, enemy.radius * 2.0, false),
            None => {
                draw_circle(
                    center.x,
                    center.y,
                    enemy.radius,
                    to_macroquad_color(skin_color(enemy.skin)),
                );
                draw_circle_lines(
                    center.x,
                    center.y,
                    enemy.radius,
                    2.0,
                    to_macroquad_color(palette::BLACK),
                );
            }
        }
    }
}

fn draw_bullets(scene: &Scene) {
    let color = to_macroquad_color(palette::YELLOW);
    for bullet in &scene.bullets {
        draw_circle(bullet.position.x, bullet.position.y, bullet.radius, color);
    }
}

fn draw_player(scene: &Scene, atlas: &SkinAtlas, blink_clock: f32) {
    let player = &scene.player;
    if player.invulnerable && blink_clock % 0.2 < 0.1 {
        return;
    }

    let center = to_macroquad_vec2(player.position);
    let flip = player.facing == Facing::Left;
    match atlas.player() {
        Some(texture) => sprites::draw_centered(texture, center, player.radius * 2.0, flip),
        None => {
            draw_circle(
                center.x,
                center.y,
                player.radius,
                to_macroquad_color(palette::WHITE),
            );
            let eye = if flip { -0.4 } else { 0.4 };
            draw_circle(
                center.x + player.radius * eye,
                center.y - player.radius * 0.2,
                player.radius * 0.15,
                to_macroquad_color(palette::BLACK),
            );
        }
    }
}

fn draw_health_bar(scene: &Scene) {
    let origin = bar_origin(scene.player.position);
    draw_rectangle(
        origin.x,
        origin.y,
        HEALTH_BAR_WIDTH,
        HEALTH_BAR_HEIGHT,
        to_macroquad_color(palette::BLACK),
    );
    let bar = scene.hud.health;
    draw_rectangle(
        origin.x,
        origin.y,
        bar.filled_width(),
        HEALTH_BAR_HEIGHT,
        to_macroquad_color(bar.color),
    );
}

fn bar_origin(player: Vec2) -> Vec2 {
    Vec2::new(
        player.x - HEALTH_BAR_WIDTH / 2.0,
        player.y + HEALTH_BAR_OFFSET_Y - HEALTH_BAR_HEIGHT / 2.0,
    )
}

fn skin_color(skin: SkinId) -> Color {
    SKIN_COLORS[usize::from(skin.get()) % SKIN_COLORS.len()]
}

fn to_macroquad_vec2(vector: Vec2) -> MacroquadVec2 {
    MacroquadVec2::new(vector.x, vector.y)
}

fn to_macroquad_color(color: Color) -> macroquad::color::Color {
    macroquad::color::Color::new(color.red, color.green, color.blue, color.alpha)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_observations_map_onto_movement() {
        let movement = movement_from_keys(KeyObservations {
            up: true,
            left: true,
            ..KeyObservations::default()
        });
        assert_eq!(movement.horizontal(), -1);
        assert_eq!(movement.vertical(), -1);
    }

    #[test]
    fn health_bar_is_centred_above_player() {
        let origin = bar_origin(Vec2::new(500.0, 500.0));
        assert_eq!(origin, Vec2::new(460.0, 436.0));
    }

    #[test]
    fn skin_colors_cycle() {
        assert_eq!(skin_color(SkinId::new(0)), skin_color(SkinId::new(6)));
        assert_ne!(skin_color(SkinId::new(0)), skin_color(SkinId::new(1)));
    }
}
