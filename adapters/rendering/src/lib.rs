#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Wave Survivor adapters.
//!
//! Backends receive a [`Scene`] describing world-space sprites and the HUD in
//! screen space. Every HUD element derives its text, size and color from
//! session state so backends only draw.

use anyhow::Result as AnyResult;
use glam::Vec2;
use std::time::Duration;
use wave_survivor_core::{
    BulletSnapshot, EnemySnapshot, Facing, Health, MovementInput, PlayerSnapshot, SkinId,
    WaveNumber,
};

/// Width of the player's health bar in world units.
pub const HEALTH_BAR_WIDTH: f32 = 80.0;
/// Height of the player's health bar in world units.
pub const HEALTH_BAR_HEIGHT: f32 = 8.0;
/// Vertical offset of the health bar from the player's centre.
pub const HEALTH_BAR_OFFSET_Y: f32 = -60.0;

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }

    /// Returns the same color with its alpha replaced.
    #[must_use]
    pub const fn with_alpha(self, alpha: f32) -> Self {
        Self { alpha, ..self }
    }
}

/// Named colors used by the HUD.
pub mod palette {
    use super::Color;

    /// Healthy or plentiful.
    pub const GREEN: Color = Color::from_rgb_u8(0x00, 0xff, 0x00);
    /// Caution.
    pub const YELLOW: Color = Color::from_rgb_u8(0xff, 0xff, 0x00);
    /// Running low on ammo.
    pub const ORANGE: Color = Color::from_rgb_u8(0xff, 0xaa, 0x00);
    /// Critical.
    pub const RED: Color = Color::from_rgb_u8(0xff, 0x00, 0x00);
    /// Wave banner text.
    pub const GOLD: Color = Color::from_rgb_u8(0xff, 0xd7, 0x00);
    /// Timer text.
    pub const WHITE: Color = Color::from_rgb_u8(0xff, 0xff, 0xff);
    /// Backdrop behind bars and outlines behind text.
    pub const BLACK: Color = Color::from_rgb_u8(0x00, 0x00, 0x00);
    /// Night sky behind the map.
    pub const NIGHT: Color = Color::from_rgb_u8(0x0a, 0x0a, 0x1a);
}

/// Input snapshot gathered by adapters before updating the scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct FrameInput {
    /// Directional keys held this frame.
    pub movement: MovementInput,
    /// Whether the adapter detected a restart request on this frame.
    pub restart: bool,
}

/// Fill level and color of the player's health bar.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HealthBar {
    /// Filled share of the bar in `0.0..=1.0`.
    pub fraction: f32,
    /// Fill color for the current share.
    pub color: Color,
}

impl HealthBar {
    /// Derives the bar from current and maximum health.
    #[must_use]
    pub fn new(health: Health, max_health: Health) -> Self {
        let fraction = if max_health.get() == 0 {
            0.0
        } else {
            (health.get() as f32 / max_health.get() as f32).clamp(0.0, 1.0)
        };
        let color = if fraction > 0.6 {
            palette::GREEN
        } else if fraction > 0.3 {
            palette::YELLOW
        } else {
            palette::RED
        };
        Self { fraction, color }
    }

    /// Width of the filled part of the bar.
    #[must_use]
    pub fn filled_width(&self) -> f32 {
        HEALTH_BAR_WIDTH * self.fraction
    }
}

/// Remaining shots shown in the top-right corner.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AmmoCounter {
    /// Clamped ledger balance.
    pub remaining: u32,
}

impl AmmoCounter {
    /// Text drawn for the counter.
    #[must_use]
    pub fn label(&self) -> String {
        format!("Bullets: {}", self.remaining)
    }

    /// Text color for the current balance.
    #[must_use]
    pub fn color(&self) -> Color {
        match self.remaining {
            0..=5 => palette::RED,
            6..=20 => palette::ORANGE,
            _ => palette::YELLOW,
        }
    }
}

/// Session clock shown at the top centre.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SessionTimer {
    /// Simulated time since the session began.
    pub elapsed: Duration,
}

impl SessionTimer {
    /// Elapsed time formatted as `MM:SS`.
    #[must_use]
    pub fn label(&self) -> String {
        let total = self.elapsed.as_secs();
        format!("{:02}:{:02}", total / 60, total % 60)
    }
}

/// Fading `WAVE n` announcement.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WaveBanner {
    /// Wave being announced.
    pub wave: WaveNumber,
    /// Opacity in `0.0..=1.0`.
    pub alpha: f32,
}

impl WaveBanner {
    /// Computes the banner after it has been visible for `shown_for`.
    ///
    /// Opacity eases out over `fade` and reaches zero at its end.
    #[must_use]
    pub fn new(wave: WaveNumber, shown_for: Duration, fade: Duration) -> Self {
        let progress = if fade.is_zero() {
            1.0
        } else {
            (shown_for.as_secs_f32() / fade.as_secs_f32()).clamp(0.0, 1.0)
        };
        Self {
            wave,
            alpha: (1.0 - progress).powi(3),
        }
    }

    /// Text drawn for the banner.
    #[must_use]
    pub fn label(&self) -> String {
        format!("WAVE {}", self.wave.get())
    }

    /// Text color including the current opacity.
    #[must_use]
    pub fn color(&self) -> Color {
        palette::GOLD.with_alpha(self.alpha)
    }
}

/// Head-up display state synchronised from the session every frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Hud {
    /// Player health bar drawn above the player.
    pub health: HealthBar,
    /// Remaining shots.
    pub ammo: AmmoCounter,
    /// Session clock.
    pub timer: SessionTimer,
    /// Wave announcement, while visible.
    pub banner: Option<WaveBanner>,
    /// Final message once the session is over.
    pub game_over: Option<String>,
}

impl Default for Hud {
    fn default() -> Self {
        Self {
            health: HealthBar::new(Health::new(1), Health::new(1)),
            ammo: AmmoCounter { remaining: 0 },
            timer: SessionTimer {
                elapsed: Duration::ZERO,
            },
            banner: None,
            game_over: None,
        }
    }
}

/// Player sprite description.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlayerPresentation {
    /// Centre in world units.
    pub position: Vec2,
    /// Drawn radius.
    pub radius: f32,
    /// Direction the sprite faces.
    pub facing: Facing,
    /// Whether contact damage is currently suppressed.
    pub invulnerable: bool,
}

impl PlayerPresentation {
    /// Builds the presentation from a world snapshot.
    #[must_use]
    pub fn from_snapshot(snapshot: &PlayerSnapshot, radius: f32) -> Self {
        Self {
            position: Vec2::new(snapshot.position.x(), snapshot.position.y()),
            radius,
            facing: snapshot.facing,
            invulnerable: snapshot.invulnerable,
        }
    }
}

/// Enemy sprite description.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnemyPresentation {
    /// Centre in world units.
    pub position: Vec2,
    /// Drawn radius.
    pub radius: f32,
    /// Roster entry selecting the sprite.
    pub skin: SkinId,
}

impl EnemyPresentation {
    /// Builds the presentation from a world snapshot.
    #[must_use]
    pub fn from_snapshot(snapshot: &EnemySnapshot, radius: f32) -> Self {
        Self {
            position: Vec2::new(snapshot.position.x(), snapshot.position.y()),
            radius,
            skin: snapshot.skin,
        }
    }
}

/// Bullet sprite description.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BulletPresentation {
    /// Centre in world units.
    pub position: Vec2,
    /// Drawn radius.
    pub radius: f32,
}

impl BulletPresentation {
    /// Builds the presentation from a world snapshot.
    #[must_use]
    pub fn from_snapshot(snapshot: &BulletSnapshot, radius: f32) -> Self {
        Self {
            position: Vec2::new(snapshot.position.x(), snapshot.position.y()),
            radius,
        }
    }
}

/// Scene description combining the map, its inhabitants and the HUD.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Size of the playable map in world units.
    pub map_size: Vec2,
    /// The player, always present.
    pub player: PlayerPresentation,
    /// Live enemies in ascending id order.
    pub enemies: Vec<EnemyPresentation>,
    /// Bullets in flight.
    pub bullets: Vec<BulletPresentation>,
    /// Screen-space overlay.
    pub hud: Hud,
}

impl Scene {
    /// Creates an empty scene with the player at the map centre.
    #[must_use]
    pub fn new(map_size: Vec2, player_radius: f32) -> Self {
        Self {
            map_size,
            player: PlayerPresentation {
                position: map_size * 0.5,
                radius: player_radius,
                facing: Facing::default(),
                invulnerable: false,
            },
            enemies: Vec::new(),
            bullets: Vec::new(),
            hud: Hud::default(),
        }
    }

    /// Camera centre that follows the player without showing outside the map.
    #[must_use]
    pub fn camera_target(&self, viewport: Vec2) -> Vec2 {
        let half = viewport * 0.5;
        let min = half.min(self.map_size * 0.5);
        let max = (self.map_size - half).max(self.map_size * 0.5);
        self.player.position.clamp(min, max)
    }
}

/// Presentation descriptor consumed by rendering backends.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Title used by the created window.
    pub window_title: String,
    /// Solid color used to clear each frame.
    pub clear_color: Color,
    /// Scene content that should be displayed.
    pub scene: Scene,
}

impl Presentation {
    /// Constructs a new presentation descriptor.
    #[must_use]
    pub fn new<T>(window_title: T, clear_color: Color, scene: Scene) -> Self
    where
        T: Into<String>,
    {
        Self {
            window_title: window_title.into(),
            clear_color,
            scene,
        }
    }
}

/// Rendering backend capable of presenting Wave Survivor scenes.
pub trait RenderingBackend {
    /// Runs the rendering backend until it is requested to exit.
    ///
    /// The provided `update_scene` closure receives the simulated frame delta
    /// and per-frame input captured by the adapter, and mutates the scene
    /// before it is rendered. Returning `false` closes the backend.
    fn run<F>(self, presentation: Presentation, update_scene: F) -> AnyResult<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) -> bool + 'static;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_bar_color_thresholds() {
        let max = Health::new(5);
        assert_eq!(HealthBar::new(Health::new(5), max).color, palette::GREEN);
        assert_eq!(HealthBar::new(Health::new(3), max).color, palette::YELLOW);
        assert_eq!(HealthBar::new(Health::new(2), max).color, palette::YELLOW);
        assert_eq!(HealthBar::new(Health::new(1), max).color, palette::RED);
        assert_eq!(HealthBar::new(Health::ZERO, max).filled_width(), 0.0);
    }

    #[test]
    fn ammo_counter_thresholds() {
        let color = |remaining| AmmoCounter { remaining }.color();
        assert_eq!(color(5), palette::RED);
        assert_eq!(color(6), palette::ORANGE);
        assert_eq!(color(20), palette::ORANGE);
        assert_eq!(color(21), palette::YELLOW);
        assert_eq!(AmmoCounter { remaining: 7 }.label(), "Bullets: 7");
    }

    #[test]
    fn timer_formats_minutes_and_seconds() {
        let label = |millis| {
            SessionTimer {
                elapsed: Duration::from_millis(millis),
            }
            .label()
        };
        assert_eq!(label(0), "00:00");
        assert_eq!(label(59_999), "00:59");
        assert_eq!(label(61_000), "01:01");
        assert_eq!(label(6_000_000), "100:00");
    }

    #[test]
    fn wave_banner_fades_out() {
        let fade = Duration::from_secs(2);
        let fresh = WaveBanner::new(WaveNumber::new(3), Duration::ZERO, fade);
        let half = WaveBanner::new(WaveNumber::new(3), Duration::from_secs(1), fade);
        let gone = WaveBanner::new(WaveNumber::new(3), fade, fade);

        assert_eq!(fresh.alpha, 1.0);
        assert!((half.alpha - 0.125).abs() < 1e-6);
        assert_eq!(gone.alpha, 0.0);
        assert_eq!(fresh.label(), "WAVE 3");
    }

    #[test]
    fn camera_stays_inside_map() {
        let mut scene = Scene::new(Vec2::new(2000.0, 2000.0), 45.0);
        scene.player.position = Vec2::new(10.0, 1990.0);
        assert_eq!(
            scene.camera_target(Vec2::new(800.0, 600.0)),
            Vec2::new(400.0, 1700.0)
        );

        let small = Scene::new(Vec2::new(400.0, 300.0), 45.0);
        assert_eq!(
            small.camera_target(Vec2::new(800.0, 600.0)),
            Vec2::new(200.0, 150.0)
        );
    }
}
