#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Automatic firing system that aims the player's bullets at the nearest enemy.

use std::time::Duration;

use wave_survivor_core::{Command, EndCause, EnemyId, EnemyView, Event, SessionPhase, WorldPoint};

/// Configuration parameters required to construct the firing system.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    fire_interval: Duration,
}

impl Config {
    /// Creates a new configuration using the provided firing cadence.
    #[must_use]
    pub const fn new(fire_interval: Duration) -> Self {
        Self { fire_interval }
    }
}

/// Pure system that emits one fire attempt per elapsed interval.
#[derive(Debug)]
pub struct BulletEmitter {
    fire_interval: Duration,
    accumulator: Duration,
}

impl BulletEmitter {
    /// Creates a new firing system using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            fire_interval: config.fire_interval,
            accumulator: Duration::ZERO,
        }
    }

    /// Consumes the frame's events and emits fire or end-of-session commands.
    ///
    /// An attempt with an empty ledger ends the session. An attempt with no
    /// enemy alive does nothing.
    pub fn handle(
        &mut self,
        events: &[Event],
        phase: SessionPhase,
        ammo_remaining: u32,
        player: WorldPoint,
        enemies: &EnemyView,
        out: &mut Vec<Command>,
    ) {
        if phase != SessionPhase::Running {
            self.accumulator = Duration::ZERO;
            return;
        }

        if self.fire_interval.is_zero() {
            return;
        }

        let accumulated = events
            .iter()
            .filter_map(|event| match event {
                Event::TimeAdvanced { dt } => Some(*dt),
                _ => None,
            })
            .fold(Duration::ZERO, Duration::saturating_add);
        if accumulated.is_zero() {
            return;
        }

        self.accumulator = self.accumulator.saturating_add(accumulated);
        while self.accumulator >= self.fire_interval {
            self.accumulator -= self.fire_interval;

            if ammo_remaining == 0 {
                log::debug!("fire attempt with an empty ledger");
                out.push(Command::EndSession {
                    cause: EndCause::AmmoExhausted,
                });
                self.accumulator = Duration::ZERO;
                return;
            }

            if let Some(target) = nearest_enemy(player, enemies) {
                out.push(Command::FireBullet { target });
            }
        }
    }
}

/// Finds the live enemy closest to `origin`.
///
/// Ties resolve to the lowest enemy identifier.
#[must_use]
pub fn nearest_enemy(origin: WorldPoint, enemies: &EnemyView) -> Option<EnemyId> {
    let mut best: Option<Candidate> = None;
    for snapshot in enemies.iter() {
        let current = Candidate {
            distance_sq: snapshot.position.distance_squared(origin),
            enemy: snapshot.id,
        };
        match &mut best {
            Some(existing) => {
                if current.precedes(existing) {
                    *existing = current;
                }
            }
            None => best = Some(current),
        }
    }
    best.map(|candidate| candidate.enemy)
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Candidate {
    distance_sq: f32,
    enemy: EnemyId,
}

impl Candidate {
    fn precedes(&self, other: &Self) -> bool {
        if self.distance_sq != other.distance_sq {
            return self.distance_sq < other.distance_sq;
        }

        self.enemy < other.enemy
    }
}
