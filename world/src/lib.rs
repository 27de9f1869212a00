#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative session state management for Wave Survivor.
//!
//! The world owns the entity registry (enemies and in-flight bullets stored
//! inline in id-keyed arenas), the player, the ammo ledger and the deferred
//! callback schedule. It is mutated exclusively through [`apply`], and
//! exposes read-only state through the [`query`] module.

mod combat;
mod ledger;
pub mod physics;
mod schedule;

use std::{collections::BTreeMap, time::Duration};

use wave_survivor_core::{
    BulletId, Command, Damage, EndCause, EnemyId, Event, Facing, Health, MissReason, MovementInput,
    SessionConfig, SessionPhase, SessionSummary, SkinId, WaveNumber, WorldVector,
    ENEMY_MAX_SPAWN_HEALTH,
};

use self::{
    ledger::AmmoLedger,
    physics::{ArcadePhysics, BodyDesc, BodyHandle, Physics},
    schedule::{Deferred, Schedule},
};

/// External funding a session starts with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Funding {
    /// Shots available to the ledger.
    pub ammo: u32,
    /// Damage dealt per hit.
    pub damage: Damage,
}

/// Represents the authoritative state of one play session.
#[derive(Debug)]
pub struct World {
    config: SessionConfig,
    physics: Box<dyn Physics>,
    phase: SessionPhase,
    started: bool,
    end_cause: Option<EndCause>,
    elapsed: Duration,
    wave: WaveNumber,
    announcement: Option<Announcement>,
    player: Player,
    enemies: BTreeMap<EnemyId, Enemy>,
    next_enemy: u32,
    bullets: BTreeMap<BulletId, Bullet>,
    next_bullet: u32,
    ledger: AmmoLedger,
    damage: Damage,
    enemies_killed: u32,
    schedule: Schedule,
}

impl World {
    /// Creates a session world backed by [`ArcadePhysics`].
    #[must_use]
    pub fn new(config: SessionConfig, funding: Funding) -> Self {
        Self::with_physics(config, funding, Box::new(ArcadePhysics::new()))
    }

    /// Creates a session world backed by the provided physics implementation.
    #[must_use]
    pub fn with_physics(
        config: SessionConfig,
        funding: Funding,
        mut physics: Box<dyn Physics>,
    ) -> Self {
        let map = config.map();
        let player_body = physics.insert(BodyDesc {
            position: map.center(),
            radius: config.player_radius,
            clamp_to: Some(map),
        });
        let max_health = Health::new(config.player_max_health);

        Self {
            player: Player {
                body: player_body,
                health: max_health,
                max_health,
                invulnerable: false,
                facing: Facing::default(),
                movement: MovementInput::IDLE,
                enabled: true,
            },
            physics,
            phase: SessionPhase::Running,
            started: false,
            end_cause: None,
            elapsed: Duration::ZERO,
            wave: WaveNumber::FIRST,
            announcement: None,
            enemies: BTreeMap::new(),
            next_enemy: 0,
            bullets: BTreeMap::new(),
            next_bullet: 0,
            ledger: AmmoLedger::new(funding.ammo),
            damage: funding.damage,
            enemies_killed: 0,
            schedule: Schedule::new(),
            config,
        }
    }

    fn is_live(&self) -> bool {
        self.started && self.phase == SessionPhase::Running
    }

    fn announce(&mut self, wave: WaveNumber, out_events: &mut Vec<Event>) {
        self.announcement = Some(Announcement {
            wave,
            shown_at: self.elapsed,
        });
        let due = self.elapsed.saturating_add(self.config.wave_announce());
        self.schedule.schedule(due, Deferred::AnnouncementFaded(wave));
        out_events.push(Event::WaveAnnounced { wave });
    }

    fn steer(&mut self) {
        let player = &mut self.player;
        player.facing = player.facing.after(player.movement);
        self.physics.set_velocity(
            player.body,
            player.movement.velocity(self.config.player_speed),
        );

        let Some(target) = self.physics.position(player.body) else {
            return;
        };
        for enemy in self.enemies.values() {
            if let Some(position) = self.physics.position(enemy.body) {
                let velocity = position
                    .vector_to(target)
                    .with_length(self.config.enemy_speed);
                self.physics.set_velocity(enemy.body, velocity);
            }
        }
    }

    fn run_due_callbacks(&mut self, out_events: &mut Vec<Event>) {
        while let Some(deferred) = self.schedule.pop_due(self.elapsed) {
            match deferred {
                Deferred::MissCheck(bullet) => {
                    combat::resolve_miss(
                        self,
                        bullet,
                        MissReason::TimedOut,
                        out_events,
                    );
                }
                Deferred::InvulnerabilityExpired => {
                    self.player.invulnerable = false;
                    out_events.push(Event::InvulnerabilityEnded);
                }
                Deferred::EndSession(cause) => end_session(self, cause, out_events),
                Deferred::AnnouncementFaded(wave) => {
                    if self.announcement.map(|banner| banner.wave) == Some(wave) {
                        self.announcement = None;
                        out_events.push(Event::WaveAnnouncementCleared { wave });
                    }
                }
            }
        }
    }

    fn summary(&self) -> SessionSummary {
        SessionSummary {
            elapsed_ms: u64::try_from(self.elapsed.as_millis()).unwrap_or(u64::MAX),
            wave: self.wave.get(),
            shots_fired: self.ledger.fired(),
            hits: self.ledger.hits(),
            misses: self.ledger.misses(),
            enemies_killed: self.enemies_killed,
            ammo_remaining: self.ledger.remaining(),
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct Player {
    body: BodyHandle,
    health: Health,
    max_health: Health,
    invulnerable: bool,
    facing: Facing,
    movement: MovementInput,
    enabled: bool,
}

#[derive(Clone, Copy, Debug)]
struct Enemy {
    body: BodyHandle,
    health: Health,
    skin: SkinId,
}

#[derive(Clone, Copy, Debug)]
struct Bullet {
    body: BodyHandle,
    target: EnemyId,
    velocity: WorldVector,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Announcement {
    wave: WaveNumber,
    shown_at: Duration,
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::BeginSession => {
            if world.started || world.phase == SessionPhase::Ended {
                return;
            }
            world.started = true;
            log::info!(
                "session started with {} bullets, {} damage per hit",
                world.ledger.remaining(),
                world.damage.get()
            );
            out_events.push(Event::SessionStarted {
                ammo: world.ledger.remaining(),
                damage: world.damage,
            });
            world.announce(WaveNumber::FIRST, out_events);
        }
        Command::Tick { dt } => {
            if !world.is_live() {
                return;
            }

            world.elapsed = world.elapsed.saturating_add(dt);
            out_events.push(Event::TimeAdvanced { dt });

            world.steer();
            world.physics.step(dt);

            combat::resolve_bullet_hits(world, out_events);
            combat::resolve_player_contact(world, out_events);
            if world.phase == SessionPhase::Ended {
                return;
            }
            combat::resolve_boundary_misses(world, out_events);
            world.run_due_callbacks(out_events);

            if world.phase == SessionPhase::Running && !world.ledger.can_fire() {
                end_session(world, EndCause::AmmoExhausted, out_events);
            }
        }
        Command::SetMovement { movement } => {
            world.player.movement = movement;
        }
        Command::SpawnEnemy {
            position,
            skin,
            health,
        } => {
            if !world.is_live() {
                return;
            }

            let health = Health::new(health.get().min(ENEMY_MAX_SPAWN_HEALTH));
            let body = world.physics.insert(BodyDesc {
                position,
                radius: world.config.enemy_radius,
                clamp_to: None,
            });
            let position = world.physics.position(body).unwrap_or(position);
            let enemy = EnemyId::new(world.next_enemy);
            world.next_enemy = world.next_enemy.saturating_add(1);
            let _ = world.enemies.insert(enemy, Enemy { body, health, skin });
            out_events.push(Event::EnemySpawned {
                enemy,
                position,
                skin,
                health,
            });
        }
        Command::FireBullet { target } => {
            if !world.is_live() || !world.ledger.can_fire() {
                return;
            }
            let Some(target_position) = world
                .enemies
                .get(&target)
                .and_then(|enemy| world.physics.position(enemy.body))
            else {
                return;
            };
            let Some(origin) = world.physics.position(world.player.body) else {
                return;
            };

            let velocity = origin
                .vector_to(target_position)
                .with_length(world.config.bullet_speed);
            let body = world.physics.insert(BodyDesc {
                position: origin,
                radius: world.config.bullet_radius,
                clamp_to: None,
            });
            world.physics.set_velocity(body, velocity);

            let bullet = BulletId::new(world.next_bullet);
            world.next_bullet = world.next_bullet.saturating_add(1);
            let _ = world.bullets.insert(
                bullet,
                Bullet {
                    body,
                    target,
                    velocity,
                },
            );
            world.ledger.record_fire();

            let due = world.elapsed.saturating_add(world.config.miss_timeout());
            world.schedule.schedule(due, Deferred::MissCheck(bullet));
            out_events.push(Event::BulletFired {
                bullet,
                target,
                velocity,
            });
        }
        Command::AdvanceWave { wave } => {
            if !world.is_live() || wave != world.wave.next() {
                return;
            }
            world.wave = wave;
            log::info!("wave {} begins", wave.get());
            out_events.push(Event::WaveAdvanced { wave });
            world.announce(wave, out_events);
        }
        Command::EndSession { cause } => end_session(world, cause, out_events),
    }
}

/// Moves the session to its terminal state and raises the termination signal.
///
/// Cancels every deferred callback, freezes the player and drops all enemies
/// and bullets. Calling it on an ended session does nothing.
pub(crate) fn end_session(world: &mut World, cause: EndCause, out_events: &mut Vec<Event>) {
    if world.phase == SessionPhase::Ended {
        return;
    }

    let summary = world.summary();
    world.phase = SessionPhase::Ended;
    world.end_cause = Some(cause);
    world.schedule.clear();
    world.announcement = None;

    world.physics.set_enabled(world.player.body, false);
    world.player.enabled = false;
    world.player.invulnerable = false;
    for enemy in std::mem::take(&mut world.enemies).into_values() {
        world.physics.remove(enemy.body);
    }
    for bullet in std::mem::take(&mut world.bullets).into_values() {
        world.physics.remove(bullet.body);
    }

    log::info!(
        "session ended ({cause:?}) after {} ms on wave {}",
        summary.elapsed_ms,
        summary.wave
    );
    out_events.push(Event::SessionEnded { cause, summary });
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use std::time::Duration;

    use super::World;
    use wave_survivor_core::{
        BulletSnapshot, BulletView, EndCause, EnemySnapshot, EnemyView, PlayerSnapshot,
        SessionConfig, SessionPhase, SessionSummary, WaveNumber, WorldPoint,
    };

    /// Lifecycle phase of the session.
    #[must_use]
    pub fn phase(world: &World) -> SessionPhase {
        world.phase
    }

    /// Reason the session ended, if it has.
    #[must_use]
    pub fn end_cause(world: &World) -> Option<EndCause> {
        world.end_cause
    }

    /// Simulated time since the session began.
    #[must_use]
    pub fn elapsed(world: &World) -> Duration {
        world.elapsed
    }

    /// Currently active wave.
    #[must_use]
    pub fn wave(world: &World) -> WaveNumber {
        world.wave
    }

    /// Configuration the session was built with.
    #[must_use]
    pub fn config(world: &World) -> &SessionConfig {
        &world.config
    }

    /// Captures the player's state.
    #[must_use]
    pub fn player(world: &World) -> PlayerSnapshot {
        let player = &world.player;
        PlayerSnapshot {
            position: player_position(world),
            health: player.health,
            max_health: player.max_health,
            invulnerable: player.invulnerable,
            facing: player.facing,
        }
    }

    /// Current player position.
    #[must_use]
    pub fn player_position(world: &World) -> WorldPoint {
        world
            .physics
            .position(world.player.body)
            .unwrap_or_else(|| world.config.map().center())
    }

    /// Captures a read-only view of every live enemy.
    #[must_use]
    pub fn enemy_view(world: &World) -> EnemyView {
        let snapshots = world
            .enemies
            .iter()
            .filter_map(|(id, enemy)| {
                world
                    .physics
                    .position(enemy.body)
                    .map(|position| EnemySnapshot {
                        id: *id,
                        position,
                        health: enemy.health,
                        skin: enemy.skin,
                    })
            })
            .collect();
        EnemyView::from_snapshots(snapshots)
    }

    /// Captures a read-only view of every bullet still in flight.
    #[must_use]
    pub fn bullet_view(world: &World) -> BulletView {
        let snapshots = world
            .bullets
            .iter()
            .filter_map(|(id, bullet)| {
                world
                    .physics
                    .position(bullet.body)
                    .map(|position| BulletSnapshot {
                        id: *id,
                        position,
                        velocity: bullet.velocity,
                        target: bullet.target,
                    })
            })
            .collect();
        BulletView::from_snapshots(snapshots)
    }

    /// Shots left in the ledger, clamped at zero.
    #[must_use]
    pub fn ammo_remaining(world: &World) -> u32 {
        world.ledger.remaining()
    }

    /// Wave banner currently on screen and how long it has been showing.
    #[must_use]
    pub fn announcement(world: &World) -> Option<(WaveNumber, Duration)> {
        world
            .announcement
            .map(|banner| (banner.wave, world.elapsed.saturating_sub(banner.shown_at)))
    }

    /// Counters describing the session so far.
    #[must_use]
    pub fn summary(world: &World) -> SessionSummary {
        world.summary()
    }

    /// Number of deferred callbacks waiting on the clock.
    #[must_use]
    pub fn pending_callbacks(world: &World) -> usize {
        world.schedule.len()
    }

    /// Number of bodies registered with the physics provider.
    #[must_use]
    pub fn body_count(world: &World) -> usize {
        world.physics.body_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wave_survivor_core::WorldPoint;

    fn funded(ammo: u32, damage: u32) -> Funding {
        Funding {
            ammo,
            damage: Damage::from_input(f64::from(damage)),
        }
    }

    fn started(config: SessionConfig, funding: Funding) -> World {
        let mut world = World::new(config, funding);
        let mut events = Vec::new();
        apply(&mut world, Command::BeginSession, &mut events);
        world
    }

    fn spawn(world: &mut World, position: WorldPoint, health: u32) -> EnemyId {
        let mut events = Vec::new();
        apply(
            world,
            Command::SpawnEnemy {
                position,
                skin: SkinId::new(0),
                health: Health::new(health),
            },
            &mut events,
        );
        match events.as_slice() {
            [Event::EnemySpawned { enemy, .. }] => *enemy,
            other => panic!("unexpected events: {other:?}"),
        }
    }

    fn tick(world: &mut World, millis: u64) -> Vec<Event> {
        let mut events = Vec::new();
        apply(
            world,
            Command::Tick {
                dt: Duration::from_millis(millis),
            },
            &mut events,
        );
        events
    }

    fn still_config() -> SessionConfig {
        SessionConfig {
            enemy_speed: 0.0,
            ..SessionConfig::default()
        }
    }

    #[test]
    fn ticks_before_begin_are_ignored() {
        let mut world = World::new(SessionConfig::default(), funded(3, 1));
        assert!(tick(&mut world, 16).is_empty());
        assert_eq!(query::elapsed(&world), Duration::ZERO);
    }

    #[test]
    fn unfunded_world_ends_on_first_tick() {
        let mut world = started(still_config(), funded(0, 1));
        let events = tick(&mut world, 16);

        assert!(matches!(
            events.last(),
            Some(Event::SessionEnded {
                cause: EndCause::AmmoExhausted,
                ..
            })
        ));
        assert_eq!(query::elapsed(&world), Duration::from_millis(16));
        assert!(tick(&mut world, 16).is_empty());
    }

    #[test]
    fn begin_announces_first_wave_once() {
        let mut world = World::new(SessionConfig::default(), funded(3, 1));
        let mut events = Vec::new();
        apply(&mut world, Command::BeginSession, &mut events);
        apply(&mut world, Command::BeginSession, &mut events);

        let announced: Vec<_> = events
            .iter()
            .filter(|event| matches!(event, Event::WaveAnnounced { .. }))
            .collect();
        assert_eq!(announced.len(), 1);
        assert!(!events
            .iter()
            .any(|event| matches!(event, Event::WaveAdvanced { .. })));
    }

    #[test]
    fn spawn_health_is_capped() {
        let mut world = started(still_config(), funded(3, 1));
        let enemy = spawn(&mut world, WorldPoint::new(100.0, 100.0), 999);
        let view = query::enemy_view(&world);
        let snapshot = view.iter().find(|snapshot| snapshot.id == enemy);
        assert_eq!(snapshot.map(|s| s.health), Some(Health::new(50)));
    }

    #[test]
    fn zero_health_enemy_dies_on_first_hit() {
        let mut world = started(still_config(), funded(5, 1));
        let center = query::player_position(&world);
        let enemy = spawn(&mut world, center.translated(WorldVector::new(200.0, 0.0)), 0);

        let mut events = Vec::new();
        apply(&mut world, Command::FireBullet { target: enemy }, &mut events);
        let mut killed = false;
        for _ in 0..60 {
            killed |= tick(&mut world, 16)
                .iter()
                .any(|event| matches!(event, Event::EnemyKilled { enemy: id } if *id == enemy));
        }

        assert!(killed);
        assert!(query::enemy_view(&world).is_empty());
        assert_eq!(query::ammo_remaining(&world), 4);
    }

    #[test]
    fn miss_timeout_charges_once() {
        let mut world = started(still_config(), funded(5, 1));
        let center = query::player_position(&world);
        let enemy = spawn(&mut world, center.translated(WorldVector::new(300.0, 0.0)), 10);

        let mut events = Vec::new();
        apply(&mut world, Command::FireBullet { target: enemy }, &mut events);
        let bullet = match events.as_slice() {
            [Event::BulletFired { bullet, .. }] => *bullet,
            other => panic!("unexpected events: {other:?}"),
        };

        // Pull the target out of the way so the bullet cannot connect.
        if let Some(record) = world.enemies.get(&enemy) {
            world.physics.set_enabled(record.body, false);
        }

        let mut misses = 0;
        for _ in 0..400 {
            misses += tick(&mut world, 16)
                .iter()
                .filter(|event| matches!(event, Event::BulletMissed { bullet: id, .. } if *id == bullet))
                .count();
        }

        assert_eq!(misses, 1);
        assert_eq!(query::ammo_remaining(&world), 4);
        assert_eq!(query::summary(&world).misses, 1);
    }

    #[test]
    fn late_timeout_after_hit_does_not_charge_a_miss() {
        let mut world = started(still_config(), funded(5, 1));
        let center = query::player_position(&world);
        let enemy = spawn(&mut world, center.translated(WorldVector::new(100.0, 0.0)), 40);

        let mut events = Vec::new();
        apply(&mut world, Command::FireBullet { target: enemy }, &mut events);
        for _ in 0..400 {
            events.extend(tick(&mut world, 16));
        }

        let hits = events
            .iter()
            .filter(|event| matches!(event, Event::BulletHit { .. }))
            .count();
        let misses = events
            .iter()
            .filter(|event| matches!(event, Event::BulletMissed { .. }))
            .count();
        assert_eq!((hits, misses), (1, 0));
        assert_eq!(query::ammo_remaining(&world), 4);
    }

    #[test]
    fn boundary_miss_precedes_timeout() {
        let config = SessionConfig {
            map_width: 400.0,
            map_height: 400.0,
            ..still_config()
        };
        let mut world = started(config, funded(5, 1));
        let enemy = spawn(&mut world, WorldPoint::new(390.0, 200.0), 10);
        if let Some(record) = world.enemies.get(&enemy) {
            world.physics.set_enabled(record.body, false);
        }

        let mut events = Vec::new();
        apply(&mut world, Command::FireBullet { target: enemy }, &mut events);
        for _ in 0..60 {
            events.extend(tick(&mut world, 16));
        }

        assert!(events.iter().any(|event| matches!(
            event,
            Event::BulletMissed {
                reason: MissReason::LeftBounds,
                ..
            }
        )));
        assert!(query::bullet_view(&world).is_empty());
    }

    #[test]
    fn contact_damage_respects_invulnerability() {
        let mut world = started(still_config(), funded(5, 1));
        let center = query::player_position(&world);
        let _ = spawn(&mut world, center, 10);

        let first = tick(&mut world, 16);
        assert!(first
            .iter()
            .any(|event| matches!(event, Event::PlayerDamaged { health } if health.get() == 4)));

        for _ in 0..30 {
            let events = tick(&mut world, 16);
            assert!(!events
                .iter()
                .any(|event| matches!(event, Event::PlayerDamaged { .. })));
        }
        assert_eq!(query::player(&world).health, Health::new(4));
        assert_eq!(query::enemy_view(&world).len(), 1, "contact never kills enemies");

        let mut later = Vec::new();
        for _ in 0..40 {
            later.extend(tick(&mut world, 16));
        }
        assert!(later
            .iter()
            .any(|event| matches!(event, Event::InvulnerabilityEnded)));
        assert_eq!(query::player(&world).health, Health::new(3));
    }

    #[test]
    fn ending_clears_registry_and_schedule_once() {
        let mut world = started(still_config(), funded(5, 1));
        let _ = spawn(&mut world, WorldPoint::new(100.0, 100.0), 10);

        let mut events = Vec::new();
        apply(
            &mut world,
            Command::EndSession {
                cause: EndCause::AmmoExhausted,
            },
            &mut events,
        );
        apply(
            &mut world,
            Command::EndSession {
                cause: EndCause::PlayerDefeated,
            },
            &mut events,
        );

        let ended: Vec<_> = events
            .iter()
            .filter(|event| matches!(event, Event::SessionEnded { .. }))
            .collect();
        assert_eq!(ended.len(), 1);
        assert_eq!(query::end_cause(&world), Some(EndCause::AmmoExhausted));
        assert!(query::enemy_view(&world).is_empty());
        assert_eq!(query::pending_callbacks(&world), 0);
        assert_eq!(query::body_count(&world), 1, "only the frozen player remains");
        assert!(tick(&mut world, 16).is_empty());
    }

    #[test]
    fn wave_advances_only_by_one() {
        let mut world = started(still_config(), funded(5, 1));
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::AdvanceWave {
                wave: WaveNumber::new(3),
            },
            &mut events,
        );
        assert_eq!(query::wave(&world), WaveNumber::FIRST);

        apply(
            &mut world,
            Command::AdvanceWave {
                wave: WaveNumber::new(2),
            },
            &mut events,
        );
        apply(
            &mut world,
            Command::AdvanceWave {
                wave: WaveNumber::new(2),
            },
            &mut events,
        );
        assert_eq!(query::wave(&world).get(), 2);
        assert_eq!(
            events
                .iter()
                .filter(|event| matches!(event, Event::WaveAdvanced { .. }))
                .count(),
            1
        );
    }

    #[test]
    fn announcement_fades_after_configured_duration() {
        let config = SessionConfig {
            wave_announce_ms: 100,
            ..still_config()
        };
        let mut world = started(config, funded(5, 1));
        assert_eq!(
            query::announcement(&world),
            Some((WaveNumber::FIRST, Duration::ZERO))
        );

        let events = tick(&mut world, 100);
        assert!(events.iter().any(|event| matches!(
            event,
            Event::WaveAnnouncementCleared { wave } if *wave == WaveNumber::FIRST
        )));
        assert_eq!(query::announcement(&world), None);
    }
}
