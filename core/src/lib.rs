#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Wave Survivor engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative session world, and pure systems. Adapters and systems submit
//! [`Command`] values describing desired mutations, the world executes those
//! commands via its `apply` entry point, and then broadcasts [`Event`] values
//! for systems to react to deterministically. Systems consume event streams,
//! query immutable snapshots, and respond exclusively with new command batches.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Survive the waves.";

/// Highest health value an enemy may receive when it spawns.
pub const ENEMY_MAX_SPAWN_HEALTH: u32 = 50;

/// Lifecycle state of a single play session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SessionPhase {
    /// Simulation is live; timers fire and entities move.
    Running,
    /// Terminal state. Nothing moves and no timer fires until a restart.
    Ended,
}

/// Reason a session transitioned to [`SessionPhase::Ended`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EndCause {
    /// Player health reached zero through enemy contact.
    PlayerDefeated,
    /// The ammo ledger ran dry.
    AmmoExhausted,
}

/// Trigger that resolved a bullet as a miss.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MissReason {
    /// The deferred timeout scheduled at fire time elapsed first.
    TimedOut,
    /// The bullet left the map rectangle expanded by the miss margin.
    LeftBounds,
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Starts the session clock and announces the first wave.
    BeginSession,
    /// Advances the simulation clock by the provided delta time.
    Tick {
        /// Duration of simulated time that elapsed since the previous tick.
        dt: Duration,
    },
    /// Replaces the player's movement input for subsequent ticks.
    SetMovement {
        /// Directional keys currently held by the player.
        movement: MovementInput,
    },
    /// Requests that a new enemy be registered at the provided position.
    SpawnEnemy {
        /// Absolute spawn point, already clamped into the map.
        position: WorldPoint,
        /// Roster entry used to present the enemy.
        skin: SkinId,
        /// Health assigned to the enemy at spawn.
        health: Health,
    },
    /// Requests that a bullet be fired from the player toward an enemy.
    FireBullet {
        /// Enemy whose position fixes the bullet's direction.
        target: EnemyId,
    },
    /// Requests a transition to the provided wave.
    AdvanceWave {
        /// Wave the controller expects the session to enter.
        wave: WaveNumber,
    },
    /// Requests that the session terminate.
    EndSession {
        /// Reason reported alongside the termination signal.
        cause: EndCause,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Confirms that the session began with the provided funding.
    SessionStarted {
        /// Initial size of the ammo ledger.
        ammo: u32,
        /// Damage applied by every bullet hit.
        damage: Damage,
    },
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Duration of simulated time that elapsed in the tick.
        dt: Duration,
    },
    /// Confirms that an enemy entered the registry.
    EnemySpawned {
        /// Identifier assigned to the enemy.
        enemy: EnemyId,
        /// Position the enemy occupies after spawning.
        position: WorldPoint,
        /// Roster entry used to present the enemy.
        skin: SkinId,
        /// Health assigned at spawn.
        health: Health,
    },
    /// Confirms that a bullet left the player.
    BulletFired {
        /// Identifier assigned to the bullet.
        bullet: BulletId,
        /// Enemy the bullet was aimed at when fired.
        target: EnemyId,
        /// Fixed velocity of the bullet in world units per second.
        velocity: WorldVector,
    },
    /// Reports that a bullet struck an enemy.
    BulletHit {
        /// Bullet that resolved as a hit.
        bullet: BulletId,
        /// Enemy that absorbed the hit.
        enemy: EnemyId,
    },
    /// Reports that an enemy survived a hit with reduced health.
    EnemyDamaged {
        /// Enemy that was damaged.
        enemy: EnemyId,
        /// Health remaining after the hit.
        health: Health,
    },
    /// Reports that an enemy's health dropped to zero and it left the registry.
    EnemyKilled {
        /// Enemy that was removed.
        enemy: EnemyId,
    },
    /// Reports that a bullet resolved as a miss.
    BulletMissed {
        /// Bullet that resolved as a miss.
        bullet: BulletId,
        /// Trigger that detected the miss.
        reason: MissReason,
    },
    /// Reports the displayed ammo count after a charge.
    AmmoChanged {
        /// Remaining shots, clamped at zero.
        remaining: u32,
    },
    /// Reports that enemy contact cost the player health.
    PlayerDamaged {
        /// Player health after the decrement.
        health: Health,
    },
    /// Reports that the player's invulnerability window closed.
    InvulnerabilityEnded,
    /// Announces that the session entered a new wave.
    WaveAdvanced {
        /// Wave that became active.
        wave: WaveNumber,
    },
    /// Requests that adapters show the wave banner.
    WaveAnnounced {
        /// Wave displayed on the banner.
        wave: WaveNumber,
    },
    /// Reports that the wave banner finished fading.
    WaveAnnouncementCleared {
        /// Wave whose banner was removed.
        wave: WaveNumber,
    },
    /// Termination signal. Emitted exactly once per session.
    SessionEnded {
        /// Reason the session ended.
        cause: EndCause,
        /// Final counters captured at the moment of termination.
        summary: SessionSummary,
    },
}

/// Unique identifier assigned to an enemy. Never reused within a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EnemyId(u32);

impl EnemyId {
    /// Creates a new enemy identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to a bullet. Never reused within a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BulletId(u32);

impl BulletId {
    /// Creates a new bullet identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Index into the enemy roster supplied at session start.
///
/// Skins are purely visual and have no effect on the simulation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SkinId(u16);

impl SkinId {
    /// Creates a new skin index.
    #[must_use]
    pub const fn new(value: u16) -> Self {
        Self(value)
    }

    /// Retrieves the roster index.
    #[must_use]
    pub const fn get(&self) -> u16 {
        self.0
    }
}

/// Non-negative hit points carried by the player and by enemies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Health(u32);

impl Health {
    /// Health value that marks an entity as dead.
    pub const ZERO: Self = Self(0);

    /// Creates a new health value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric hit points.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Reports whether no hit points remain.
    #[must_use]
    pub const fn is_depleted(&self) -> bool {
        self.0 == 0
    }

    /// Subtracts `amount`, clamping at zero.
    #[must_use]
    pub const fn saturating_sub(self, amount: u32) -> Self {
        Self(self.0.saturating_sub(amount))
    }
}

/// Damage dealt by a single bullet hit. Always at least one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Damage(u32);

impl Damage {
    /// Smallest damage a bullet can deal.
    pub const MIN: Self = Self(1);

    /// Normalises an externally supplied damage value.
    ///
    /// Values that are not finite or not positive fall back to [`Damage::MIN`];
    /// everything else is floored and raised to at least one.
    #[must_use]
    pub fn from_input(raw: f64) -> Self {
        if !raw.is_finite() || raw <= 0.0 {
            return Self::MIN;
        }

        let floored = raw.floor().min(f64::from(u32::MAX));
        Self((floored as u32).max(1))
    }

    /// Retrieves the hit points removed per hit.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Wave counter. Starts at one and only ever grows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WaveNumber(u32);

impl WaveNumber {
    /// Wave active when a session starts.
    pub const FIRST: Self = Self(1);

    /// Creates a wave number, raising zero to [`WaveNumber::FIRST`].
    #[must_use]
    pub const fn new(value: u32) -> Self {
        if value == 0 {
            Self::FIRST
        } else {
            Self(value)
        }
    }

    /// Wave reached after `elapsed` under `floor(elapsed / duration) + 1`.
    ///
    /// A zero duration never advances past the first wave.
    #[must_use]
    pub fn for_elapsed(elapsed: Duration, wave_duration: Duration) -> Self {
        if wave_duration.is_zero() {
            return Self::FIRST;
        }

        let completed = elapsed.as_nanos() / wave_duration.as_nanos();
        let completed = u32::try_from(completed).unwrap_or(u32::MAX - 1);
        Self(completed.saturating_add(1))
    }

    /// Retrieves the numeric wave index.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Wave immediately following this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

/// Continuous position expressed in world units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WorldPoint {
    x: f32,
    y: f32,
}

impl WorldPoint {
    /// Creates a new point.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Horizontal coordinate.
    #[must_use]
    pub const fn x(&self) -> f32 {
        self.x
    }

    /// Vertical coordinate, growing downward.
    #[must_use]
    pub const fn y(&self) -> f32 {
        self.y
    }

    /// Squared Euclidean distance to `other`.
    #[must_use]
    pub fn distance_squared(self, other: WorldPoint) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        dx * dx + dy * dy
    }

    /// Vector pointing from this point to `other`.
    #[must_use]
    pub fn vector_to(self, other: WorldPoint) -> WorldVector {
        WorldVector::new(other.x - self.x, other.y - self.y)
    }

    /// Point reached by travelling `distance` along `angle` radians.
    #[must_use]
    pub fn polar_offset(self, angle: f32, distance: f32) -> Self {
        Self::new(
            self.x + angle.cos() * distance,
            self.y + angle.sin() * distance,
        )
    }

    /// Point displaced by `vector`.
    #[must_use]
    pub fn translated(self, vector: WorldVector) -> Self {
        Self::new(self.x + vector.x, self.y + vector.y)
    }
}

/// Displacement or velocity expressed in world units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WorldVector {
    x: f32,
    y: f32,
}

impl WorldVector {
    /// Zero vector.
    pub const ZERO: Self = Self::new(0.0, 0.0);

    /// Creates a new vector.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Horizontal component.
    #[must_use]
    pub const fn x(&self) -> f32 {
        self.x
    }

    /// Vertical component.
    #[must_use]
    pub const fn y(&self) -> f32 {
        self.y
    }

    /// Euclidean length.
    #[must_use]
    pub fn length(self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Multiplies both components by `factor`.
    #[must_use]
    pub fn scaled(self, factor: f32) -> Self {
        Self::new(self.x * factor, self.y * factor)
    }

    /// Vector of the provided `length` pointing the same way.
    ///
    /// A zero vector points along the positive x axis, matching the heading an
    /// angle of zero radians describes.
    #[must_use]
    pub fn with_length(self, length: f32) -> Self {
        let current = self.length();
        if current <= f32::EPSILON {
            return Self::new(length, 0.0);
        }
        self.scaled(length / current)
    }
}

/// Playable rectangle anchored at the origin.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MapBounds {
    width: f32,
    height: f32,
}

impl MapBounds {
    /// Creates a new map rectangle spanning `[0, width] x [0, height]`.
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Width of the map in world units.
    #[must_use]
    pub const fn width(&self) -> f32 {
        self.width
    }

    /// Height of the map in world units.
    #[must_use]
    pub const fn height(&self) -> f32 {
        self.height
    }

    /// Centre of the map.
    #[must_use]
    pub fn center(&self) -> WorldPoint {
        WorldPoint::new(self.width / 2.0, self.height / 2.0)
    }

    /// Clamps `point` into the map rectangle.
    #[must_use]
    pub fn clamp(&self, point: WorldPoint) -> WorldPoint {
        self.clamp_inset(point, 0.0)
    }

    /// Clamps `point` into the map rectangle shrunk by `margin` on every side.
    ///
    /// When the margin exceeds half the map size the point collapses onto the
    /// centre line instead of producing an inverted range.
    #[must_use]
    pub fn clamp_inset(&self, point: WorldPoint, margin: f32) -> WorldPoint {
        WorldPoint::new(
            clamp_axis(point.x(), margin, self.width - margin),
            clamp_axis(point.y(), margin, self.height - margin),
        )
    }

    /// Reports whether `point` lies inside the map expanded by `margin`.
    #[must_use]
    pub fn contains_expanded(&self, point: WorldPoint, margin: f32) -> bool {
        point.x() >= -margin
            && point.x() <= self.width + margin
            && point.y() >= -margin
            && point.y() <= self.height + margin
    }
}

fn clamp_axis(value: f32, low: f32, high: f32) -> f32 {
    if low > high {
        return (low + high) / 2.0;
    }
    value.clamp(low, high)
}

/// Directional keys held by the player during a frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct MovementInput {
    /// Move toward decreasing y.
    pub up: bool,
    /// Move toward increasing y.
    pub down: bool,
    /// Move toward decreasing x.
    pub left: bool,
    /// Move toward increasing x.
    pub right: bool,
}

impl MovementInput {
    /// Input with no keys held.
    pub const IDLE: Self = Self {
        up: false,
        down: false,
        left: false,
        right: false,
    };

    /// Sign of the horizontal input: -1, 0 or 1.
    #[must_use]
    pub const fn horizontal(&self) -> i8 {
        self.right as i8 - self.left as i8
    }

    /// Sign of the vertical input: -1, 0 or 1.
    #[must_use]
    pub const fn vertical(&self) -> i8 {
        self.down as i8 - self.up as i8
    }

    /// Velocity produced by this input at `speed`.
    ///
    /// Diagonal movement is divided by √2 so that every direction travels at
    /// the same rate.
    #[must_use]
    pub fn velocity(&self, speed: f32) -> WorldVector {
        let x = f32::from(self.horizontal());
        let y = f32::from(self.vertical());
        if x != 0.0 && y != 0.0 {
            WorldVector::new(x, y).scaled(speed / std::f32::consts::SQRT_2)
        } else {
            WorldVector::new(x, y).scaled(speed)
        }
    }
}

/// Horizontal direction the player sprite faces.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Facing {
    /// Sprite drawn mirrored.
    Left,
    /// Sprite drawn as authored.
    #[default]
    Right,
}

impl Facing {
    /// Facing after a frame of `input`; idle horizontal input keeps `self`.
    #[must_use]
    pub const fn after(self, input: MovementInput) -> Self {
        match input.horizontal() {
            value if value < 0 => Self::Left,
            value if value > 0 => Self::Right,
            _ => self,
        }
    }
}

/// Final counters reported with the termination signal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionSummary {
    /// Simulated milliseconds survived.
    pub elapsed_ms: u64,
    /// Wave active when the session ended.
    pub wave: u32,
    /// Bullets fired.
    pub shots_fired: u32,
    /// Bullets that resolved as hits.
    pub hits: u32,
    /// Bullets that resolved as misses.
    pub misses: u32,
    /// Enemies whose health reached zero.
    pub enemies_killed: u32,
    /// Shots left in the ledger, clamped at zero.
    pub ammo_remaining: u32,
}

/// Immutable representation of the player used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlayerSnapshot {
    /// Current position, always inside the map.
    pub position: WorldPoint,
    /// Remaining health.
    pub health: Health,
    /// Health the player started with.
    pub max_health: Health,
    /// Whether contact damage is currently suppressed.
    pub invulnerable: bool,
    /// Direction the sprite faces.
    pub facing: Facing,
}

/// Immutable representation of a single enemy used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnemySnapshot {
    /// Unique identifier assigned to the enemy.
    pub id: EnemyId,
    /// Current position.
    pub position: WorldPoint,
    /// Remaining health.
    pub health: Health,
    /// Roster entry used to present the enemy.
    pub skin: SkinId,
}

/// Read-only snapshot describing all live enemies.
#[derive(Clone, Debug, Default)]
pub struct EnemyView {
    snapshots: Vec<EnemySnapshot>,
}

impl EnemyView {
    /// Creates a new enemy view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<EnemySnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured snapshots in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = &EnemySnapshot> {
        self.snapshots.iter()
    }

    /// Number of live enemies.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Reports whether no enemy is alive.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}

/// Immutable representation of a bullet still in flight.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BulletSnapshot {
    /// Unique identifier assigned to the bullet.
    pub id: BulletId,
    /// Current position.
    pub position: WorldPoint,
    /// Fixed velocity captured at fire time.
    pub velocity: WorldVector,
    /// Enemy the bullet was aimed at.
    pub target: EnemyId,
}

/// Read-only snapshot describing every active bullet.
#[derive(Clone, Debug, Default)]
pub struct BulletView {
    snapshots: Vec<BulletSnapshot>,
}

impl BulletView {
    /// Creates a new bullet view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<BulletSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured snapshots in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = &BulletSnapshot> {
        self.snapshots.iter()
    }

    /// Number of bullets in flight.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Reports whether no bullet is in flight.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}

/// Tunable constants that stay fixed for a build.
///
/// Every duration is stored in milliseconds so the struct maps directly onto
/// a flat TOML table; accessor methods expose [`Duration`] values.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Width of the playable map.
    pub map_width: f32,
    /// Height of the playable map.
    pub map_height: f32,
    /// Milliseconds between periodic enemy spawns.
    pub enemy_spawn_interval_ms: u64,
    /// Milliseconds between bullet fire attempts.
    pub bullet_fire_interval_ms: u64,
    /// Player movement speed in world units per second.
    pub player_speed: f32,
    /// Enemy pursuit speed in world units per second.
    pub enemy_speed: f32,
    /// Bullet travel speed in world units per second.
    pub bullet_speed: f32,
    /// Player health at session start.
    pub player_max_health: u32,
    /// Milliseconds each wave lasts.
    pub wave_duration_ms: u64,
    /// Milliseconds before an unresolved bullet counts as a miss.
    pub miss_timeout_ms: u64,
    /// Milliseconds of contact immunity after the player takes damage.
    pub invulnerability_ms: u64,
    /// Milliseconds between ammo depletion by a resolved bullet and the end of the session.
    pub end_game_delay_ms: u64,
    /// Milliseconds the wave banner takes to fade out.
    pub wave_announce_ms: u64,
    /// Closest distance from the player at which periodic enemies appear.
    pub spawn_distance_min: f32,
    /// Farthest distance from the player at which periodic enemies appear.
    pub spawn_distance_max: f32,
    /// Inset from the map edge applied to every spawn point.
    pub spawn_margin: f32,
    /// Enemies in every wave burst regardless of wave number.
    pub burst_base: u32,
    /// Additional burst enemies per wave number.
    pub burst_per_wave: u32,
    /// Radius of the circle burst enemies are placed on.
    pub burst_radius: f32,
    /// Distance outside the map a bullet may travel before it counts as a miss.
    pub miss_margin: f32,
    /// Collision radius of the player.
    pub player_radius: f32,
    /// Collision radius of an enemy.
    pub enemy_radius: f32,
    /// Collision radius of a bullet.
    pub bullet_radius: f32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            map_width: 2_000.0,
            map_height: 2_000.0,
            enemy_spawn_interval_ms: 1_000,
            bullet_fire_interval_ms: 500,
            player_speed: 300.0,
            enemy_speed: 80.0,
            bullet_speed: 600.0,
            player_max_health: 5,
            wave_duration_ms: 60_000,
            miss_timeout_ms: 5_000,
            invulnerability_ms: 1_000,
            end_game_delay_ms: 100,
            wave_announce_ms: 2_000,
            spawn_distance_min: 300.0,
            spawn_distance_max: 500.0,
            spawn_margin: 50.0,
            burst_base: 15,
            burst_per_wave: 5,
            burst_radius: 400.0,
            miss_margin: 100.0,
            player_radius: 45.0,
            enemy_radius: 40.0,
            bullet_radius: 17.5,
        }
    }
}

impl SessionConfig {
    /// Playable rectangle.
    #[must_use]
    pub fn map(&self) -> MapBounds {
        MapBounds::new(self.map_width, self.map_height)
    }

    /// Cadence of the periodic enemy spawner.
    #[must_use]
    pub fn enemy_spawn_interval(&self) -> Duration {
        Duration::from_millis(self.enemy_spawn_interval_ms)
    }

    /// Cadence of the bullet emitter.
    #[must_use]
    pub fn bullet_fire_interval(&self) -> Duration {
        Duration::from_millis(self.bullet_fire_interval_ms)
    }

    /// Time per wave.
    #[must_use]
    pub fn wave_duration(&self) -> Duration {
        Duration::from_millis(self.wave_duration_ms)
    }

    /// Deferred miss check delay.
    #[must_use]
    pub fn miss_timeout(&self) -> Duration {
        Duration::from_millis(self.miss_timeout_ms)
    }

    /// Contact immunity window.
    #[must_use]
    pub fn invulnerability(&self) -> Duration {
        Duration::from_millis(self.invulnerability_ms)
    }

    /// Delay between ledger depletion and session end.
    #[must_use]
    pub fn end_game_delay(&self) -> Duration {
        Duration::from_millis(self.end_game_delay_ms)
    }

    /// Wave banner fade duration.
    #[must_use]
    pub fn wave_announce(&self) -> Duration {
        Duration::from_millis(self.wave_announce_ms)
    }

    /// Number of enemies spawned by the burst that opens `wave`.
    #[must_use]
    pub fn burst_size(&self, wave: WaveNumber) -> u32 {
        self.burst_base
            .saturating_add(self.burst_per_wave.saturating_mul(wave.get()))
    }
}
