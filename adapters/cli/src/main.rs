#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that boots Wave Survivor.

mod scene_sync;
mod summary;

use std::{path::PathBuf, time::Duration};

use anyhow::{Context, Result};
use clap::Parser;
use glam::Vec2;
use wave_survivor_core::{MovementInput, SessionConfig, WELCOME_BANNER};
use wave_survivor_rendering::{palette, Presentation, RenderingBackend, Scene};
use wave_survivor_rendering_macroquad::MacroquadBackend;
use wave_survivor_session::{config, Phase, Session, SessionInputs};

/// Top-down survival shooter funded by an external ammo and damage budget.
#[derive(Debug, Parser)]
#[command(name = "wave-survivor", version, about)]
struct CliArgs {
    /// Bullets available for the session.
    #[arg(long, default_value_t = 0)]
    ammo: u32,
    /// Damage dealt per hit; floored and raised to at least 1.
    #[arg(long, default_value_t = 1.0, allow_negative_numbers = true)]
    damage: f64,
    /// Seed for enemy placement; random when omitted.
    #[arg(long)]
    seed: Option<u64>,
    /// TOML file overriding session tunables.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Runs the simulation without opening a window.
    #[arg(long)]
    headless: bool,
    /// Maximum frames simulated in headless mode.
    #[arg(long, default_value_t = 36_000)]
    frames: u32,
    /// Simulated frame length in headless mode, in milliseconds.
    #[arg(long, default_value_t = 16)]
    frame_ms: u64,
    /// Writes the game-over summary as JSON to this path.
    #[arg(long, value_name = "PATH")]
    summary_json: Option<PathBuf>,
    /// Milliseconds the window stays open after the game ends.
    #[arg(long, default_value_t = 2_000)]
    close_delay_ms: u64,
    /// Sprite manifest mapping roster skins to images.
    #[arg(long, value_name = "PATH")]
    sprites: Option<PathBuf>,
    /// Synchronises presentation with the display refresh rate.
    #[arg(long)]
    vsync: bool,
}

/// Entry point for the Wave Survivor command-line interface.
fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = CliArgs::parse();

    let session_config = match &args.config {
        Some(path) => config::load(path)
            .with_context(|| format!("failed to load session config {}", path.display()))?,
        None => SessionConfig::default(),
    };
    let seed = args.seed.unwrap_or_else(rand::random);
    let inputs = SessionInputs {
        ammo: args.ammo,
        damage: args.damage,
        ..SessionInputs::default()
    };

    log::info!("{WELCOME_BANNER}");
    log::info!("seed {seed:#x}");

    let mut session = Session::new(session_config, inputs, seed);
    let report_path = args.summary_json.clone();
    session.on_game_over(move |signal| {
        log::info!(
            "game over ({:?}): survived {} ms, reached wave {}, {} kills",
            signal.cause,
            signal.summary.elapsed_ms,
            signal.summary.wave,
            signal.summary.enemies_killed
        );
        if let Some(path) = &report_path {
            if let Err(error) = summary::write(path, seed, signal) {
                log::error!("{error:#}");
            }
        }
    });

    if args.headless {
        run_headless(&mut session, args.frames, Duration::from_millis(args.frame_ms));
        return Ok(());
    }

    run_windowed(session, &args)
}

fn run_headless(session: &mut Session, frames: u32, frame: Duration) {
    for _ in 0..frames {
        let _ = session.step(frame, MovementInput::IDLE);
        if session.phase() == Phase::GameOver {
            return;
        }
    }
    log::warn!("headless run stopped after {frames} frames without a game over");
}

fn run_windowed(mut session: Session, args: &CliArgs) -> Result<()> {
    let map = session.config().map();
    let mut scene = Scene::new(
        Vec2::new(map.width(), map.height()),
        session.config().player_radius,
    );
    scene_sync::sync(&session, &mut scene);

    let mut backend = MacroquadBackend::new().with_vsync(args.vsync);
    if let Some(manifest) = &args.sprites {
        backend = backend.with_sprites(manifest.clone(), session.inputs().roster.names());
    }

    let close_delay = Duration::from_millis(args.close_delay_ms);
    let mut since_game_over = Duration::ZERO;
    let presentation = Presentation::new("Wave Survivor", palette::NIGHT, scene);

    backend.run(presentation, move |dt, input, scene| {
        if input.restart {
            session.restart();
            since_game_over = Duration::ZERO;
        }

        let _ = session.step(dt, input.movement);
        scene_sync::sync(&session, scene);

        if session.phase() == Phase::GameOver {
            since_game_over = since_game_over.saturating_add(dt);
            return since_game_over < close_delay;
        }
        true
    })
}
