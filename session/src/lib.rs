#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Session context that drives the world and its systems frame by frame.
//!
//! A [`Session`] owns everything that lives for the duration of one play
//! session: the authoritative world, the spawning, firing and wave systems,
//! the inputs it was started with and the outbound game-over listener.
//! Restarting rebuilds all of it from the stored inputs.

pub mod config;

use std::{fmt, time::Duration};

use wave_survivor_core::{
    Command, Damage, EndCause, Event, MovementInput, SessionConfig, SessionPhase, SessionSummary,
    SkinId,
};
use wave_survivor_system_firing::{self as firing, BulletEmitter};
use wave_survivor_system_spawning::{self as spawning, EnemySpawning};
use wave_survivor_system_waves::WaveController;
use wave_survivor_world::{self as world, query, Funding, World};

pub use config::ConfigError;

/// Asset keys of the enemy skins shipped with the game.
pub const DEFAULT_ROSTER: [&str; 10] = [
    "aave", "bnb", "btc", "doge", "eth", "sol", "usdc", "usdt", "world", "xrp",
];

/// Errors raised when building an enemy roster.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum RosterError {
    /// Enemies need at least one skin to be drawn from.
    #[error("enemy roster must contain at least one skin")]
    Empty,
    /// Skin indices are stored as `u16`.
    #[error("enemy roster holds {count} skins, more than the supported {max}")]
    TooLarge {
        /// Number of skins supplied.
        count: usize,
        /// Largest supported roster.
        max: usize,
    },
}

/// Non-empty list of visual identifiers enemies are drawn from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnemyRoster {
    skins: Vec<String>,
}

impl EnemyRoster {
    /// Builds a roster from the provided skin keys.
    pub fn new<I, S>(skins: I) -> Result<Self, RosterError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let skins: Vec<String> = skins.into_iter().map(Into::into).collect();
        if skins.is_empty() {
            return Err(RosterError::Empty);
        }
        let max = usize::from(u16::MAX);
        if skins.len() > max {
            return Err(RosterError::TooLarge {
                count: skins.len(),
                max,
            });
        }
        Ok(Self { skins })
    }

    /// Number of skins in the roster.
    #[must_use]
    pub fn len(&self) -> u16 {
        u16::try_from(self.skins.len()).unwrap_or(u16::MAX)
    }

    /// Reports whether the roster has no skins, which construction rules out.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.skins.is_empty()
    }

    /// Asset keys in roster order.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        self.skins.clone()
    }

    /// Looks up the asset key for a skin index.
    #[must_use]
    pub fn name(&self, skin: SkinId) -> Option<&str> {
        self.skins.get(usize::from(skin.get())).map(String::as_str)
    }
}

impl Default for EnemyRoster {
    fn default() -> Self {
        Self {
            skins: DEFAULT_ROSTER.iter().map(|skin| (*skin).to_owned()).collect(),
        }
    }
}

/// External values a session is funded with.
#[derive(Clone, Debug, PartialEq)]
pub struct SessionInputs {
    /// Shots available for the whole session.
    pub ammo: u32,
    /// Raw damage per hit, normalised to `max(1, floor(damage))`.
    pub damage: f64,
    /// Skins enemies are drawn from.
    pub roster: EnemyRoster,
}

impl Default for SessionInputs {
    fn default() -> Self {
        Self {
            ammo: 0,
            damage: 1.0,
            roster: EnemyRoster::default(),
        }
    }
}

/// Application phase the session context is in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Built but not yet started.
    Preload,
    /// Frames are advancing the simulation.
    Play,
    /// The session ended; only a restart leaves this phase.
    GameOver,
}

/// Termination signal handed to the outbound listener.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GameOver {
    /// Reason the session ended.
    pub cause: EndCause,
    /// Counters captured at the moment of ending.
    pub summary: SessionSummary,
}

type Listener = Box<dyn FnMut(&GameOver)>;

/// Context object holding one running play session.
pub struct Session {
    config: SessionConfig,
    inputs: SessionInputs,
    seed: u64,
    world: World,
    spawning: EnemySpawning,
    firing: BulletEmitter,
    waves: WaveController,
    phase: Phase,
    game_over: Option<GameOver>,
    listener: Option<Listener>,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("seed", &self.seed)
            .field("phase", &self.phase)
            .field("game_over", &self.game_over)
            .field("world", &self.world)
            .finish_non_exhaustive()
    }
}

impl Session {
    /// Builds a session in the [`Phase::Preload`] phase.
    #[must_use]
    pub fn new(config: SessionConfig, inputs: SessionInputs, seed: u64) -> Self {
        let damage = Damage::from_input(inputs.damage);
        if is_unusable_damage(inputs.damage) {
            log::warn!(
                "damage input {} normalised to {}",
                inputs.damage,
                damage.get()
            );
        }

        let world = World::new(
            config.clone(),
            Funding {
                ammo: inputs.ammo,
                damage,
            },
        );
        let spawning =
            EnemySpawning::new(spawning::Config::new(&config, seed, inputs.roster.len()));
        let firing = BulletEmitter::new(firing::Config::new(config.bullet_fire_interval()));
        let waves = WaveController::new(config.wave_duration());

        Self {
            config,
            inputs,
            seed,
            world,
            spawning,
            firing,
            waves,
            phase: Phase::Preload,
            game_over: None,
            listener: None,
        }
    }

    /// Registers the listener that receives the termination signal.
    ///
    /// The listener survives restarts and fires once per session.
    pub fn on_game_over<F>(&mut self, listener: F)
    where
        F: FnMut(&GameOver) + 'static,
    {
        self.listener = Some(Box::new(listener));
    }

    /// Moves from [`Phase::Preload`] to [`Phase::Play`].
    pub fn start(&mut self) -> Vec<Event> {
        let mut events = Vec::new();
        if self.phase != Phase::Preload {
            return events;
        }
        world::apply(&mut self.world, Command::BeginSession, &mut events);
        self.phase = Phase::Play;
        events
    }

    /// Advances the session by one frame and returns every event it produced.
    ///
    /// A session still preloading starts on its first step. Steps after the
    /// game is over produce nothing.
    pub fn step(&mut self, dt: Duration, movement: MovementInput) -> Vec<Event> {
        let mut events = match self.phase {
            Phase::Preload => self.start(),
            Phase::Play => Vec::new(),
            Phase::GameOver => return Vec::new(),
        };

        world::apply(
            &mut self.world,
            Command::SetMovement { movement },
            &mut events,
        );
        world::apply(&mut self.world, Command::Tick { dt }, &mut events);

        let mut commands = Vec::new();
        self.waves.handle(
            &events,
            query::phase(&self.world),
            query::wave(&self.world),
            query::elapsed(&self.world),
            &mut commands,
        );
        self.apply_all(&mut commands, &mut events);

        self.spawning.handle(
            &events,
            query::phase(&self.world),
            query::player_position(&self.world),
            &mut commands,
        );
        self.apply_all(&mut commands, &mut events);

        self.firing.handle(
            &events,
            query::phase(&self.world),
            query::ammo_remaining(&self.world),
            query::player_position(&self.world),
            &query::enemy_view(&self.world),
            &mut commands,
        );
        self.apply_all(&mut commands, &mut events);

        self.observe_end(&events);
        events
    }

    /// Tears the session down and rebuilds it from the stored inputs.
    ///
    /// The listener is kept; the new session waits in [`Phase::Preload`].
    pub fn restart(&mut self) {
        let listener = self.listener.take();
        *self = Self::new(self.config.clone(), self.inputs.clone(), self.seed);
        self.listener = listener;
        log::info!("session restarted");
    }

    /// Current application phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Termination signal of the current session, once it ended.
    #[must_use]
    pub fn game_over(&self) -> Option<&GameOver> {
        self.game_over.as_ref()
    }

    /// Read-only access to the authoritative world.
    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Inputs the session was funded with.
    #[must_use]
    pub fn inputs(&self) -> &SessionInputs {
        &self.inputs
    }

    /// Tunables the session runs with.
    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    fn apply_all(&mut self, commands: &mut Vec<Command>, events: &mut Vec<Event>) {
        for command in commands.drain(..) {
            world::apply(&mut self.world, command, events);
        }
    }

    fn observe_end(&mut self, events: &[Event]) {
        if self.game_over.is_some() {
            return;
        }

        let signal = events.iter().find_map(|event| match event {
            Event::SessionEnded { cause, summary } => Some(GameOver {
                cause: *cause,
                summary: *summary,
            }),
            _ => None,
        });
        let Some(signal) = signal else {
            return;
        };
        debug_assert_eq!(query::phase(&self.world), SessionPhase::Ended);

        self.phase = Phase::GameOver;
        self.game_over = Some(signal);
        if let Some(listener) = self.listener.as_mut() {
            listener(&signal);
        }
    }
}

/// Damage inputs that cannot be used as given and fall back to one.
fn is_unusable_damage(raw: f64) -> bool {
    !(raw.is_finite() && raw > 0.0)
}
