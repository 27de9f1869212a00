#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic spawning system responsible for emitting enemy spawn commands.
//!
//! Enemies trickle in on a fixed cadence at a random spot around the player,
//! and every wave advance triggers a ring-shaped burst.

use std::{f32::consts::TAU, time::Duration};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use wave_survivor_core::{
    Command, Event, Health, MapBounds, SessionConfig, SessionPhase, SkinId, WaveNumber,
    WorldPoint, ENEMY_MAX_SPAWN_HEALTH,
};

/// Configuration parameters required to construct the spawning system.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    spawn_interval: Duration,
    rng_seed: u64,
    skin_count: u16,
    map: MapBounds,
    distance_min: f32,
    distance_max: f32,
    margin: f32,
    burst_base: u32,
    burst_per_wave: u32,
    burst_radius: f32,
}

impl Config {
    /// Creates a configuration from the session tunables, an RNG seed and the
    /// number of roster entries enemies may be drawn from.
    #[must_use]
    pub fn new(session: &SessionConfig, rng_seed: u64, skin_count: u16) -> Self {
        let distance_min = session.spawn_distance_min.min(session.spawn_distance_max);
        Self {
            spawn_interval: session.enemy_spawn_interval(),
            rng_seed,
            skin_count,
            map: session.map(),
            distance_min,
            distance_max: session.spawn_distance_max.max(distance_min),
            margin: session.spawn_margin,
            burst_base: session.burst_base,
            burst_per_wave: session.burst_per_wave,
            burst_radius: session.burst_radius,
        }
    }
}

/// Pure system that emits trickle spawns and wave bursts while a session runs.
#[derive(Debug)]
pub struct EnemySpawning {
    config: Config,
    accumulator: Duration,
    rng: ChaCha8Rng,
}

impl EnemySpawning {
    /// Creates a new spawning system using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(config.rng_seed),
            config,
            accumulator: Duration::ZERO,
        }
    }

    /// Consumes the frame's events and emits spawn commands around `player`.
    pub fn handle(
        &mut self,
        events: &[Event],
        phase: SessionPhase,
        player: WorldPoint,
        out: &mut Vec<Command>,
    ) {
        if phase != SessionPhase::Running {
            self.accumulator = Duration::ZERO;
            return;
        }

        let mut accumulated = Duration::ZERO;
        for event in events {
            match event {
                Event::TimeAdvanced { dt } => accumulated = accumulated.saturating_add(*dt),
                Event::WaveAdvanced { wave } => self.emit_burst(*wave, player, out),
                _ => {}
            }
        }

        if self.config.spawn_interval.is_zero() || accumulated.is_zero() {
            return;
        }

        self.accumulator = self.accumulator.saturating_add(accumulated);
        while self.accumulator >= self.config.spawn_interval {
            self.accumulator -= self.config.spawn_interval;
            let angle = self.rng.gen_range(0.0..TAU);
            let distance = if self.config.distance_max > self.config.distance_min {
                self.rng
                    .gen_range(self.config.distance_min..self.config.distance_max)
            } else {
                self.config.distance_min
            };
            let position = player.polar_offset(angle, distance);
            self.push_spawn(position, out);
        }
    }

    fn emit_burst(&mut self, wave: WaveNumber, player: WorldPoint, out: &mut Vec<Command>) {
        let count = self
            .config
            .burst_base
            .saturating_add(self.config.burst_per_wave.saturating_mul(wave.get()));
        log::debug!("wave {} burst of {count} enemies", wave.get());

        for index in 0..count {
            let angle = index as f32 / count as f32 * TAU;
            let position = player.polar_offset(angle, self.config.burst_radius);
            self.push_spawn(position, out);
        }
    }

    fn push_spawn(&mut self, position: WorldPoint, out: &mut Vec<Command>) {
        let position = self.config.map.clamp_inset(position, self.config.margin);
        let skin = SkinId::new(self.rng.gen_range(0..self.config.skin_count.max(1)));
        let health = Health::new(self.rng.gen_range(0..=ENEMY_MAX_SPAWN_HEALTH));
        out.push(Command::SpawnEnemy {
            position,
            skin,
            health,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spawning(seed: u64) -> EnemySpawning {
        EnemySpawning::new(Config::new(&SessionConfig::default(), seed, 10))
    }

    #[test]
    fn inactive_session_resets_accumulator() {
        let mut spawning = spawning(7);
        let mut commands = Vec::new();
        spawning.handle(
            &[Event::TimeAdvanced {
                dt: Duration::from_millis(900),
            }],
            SessionPhase::Running,
            WorldPoint::new(1000.0, 1000.0),
            &mut commands,
        );
        assert_eq!(spawning.accumulator, Duration::from_millis(900));

        spawning.handle(
            &[],
            SessionPhase::Ended,
            WorldPoint::new(1000.0, 1000.0),
            &mut commands,
        );
        assert_eq!(spawning.accumulator, Duration::ZERO);
        assert!(commands.is_empty());
    }

    #[test]
    fn zero_interval_never_trickles() {
        let session = SessionConfig {
            enemy_spawn_interval_ms: 0,
            ..SessionConfig::default()
        };
        let mut spawning = EnemySpawning::new(Config::new(&session, 1, 3));
        let mut commands = Vec::new();
        spawning.handle(
            &[Event::TimeAdvanced {
                dt: Duration::from_secs(5),
            }],
            SessionPhase::Running,
            WorldPoint::new(500.0, 500.0),
            &mut commands,
        );
        assert!(commands.is_empty());
    }
}
