//! Spatial provider seam and the default arcade implementation.
//!
//! The world never integrates motion itself. It owns handles into a
//! [`Physics`] provider, steers bodies by assigning velocities, and asks the
//! provider for positions and overlaps.

use std::{collections::BTreeMap, fmt, time::Duration};

use wave_survivor_core::{MapBounds, WorldPoint, WorldVector};

/// Handle to a body owned by a [`Physics`] provider.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyHandle(u64);

impl BodyHandle {
    /// Retrieves the numeric representation of the handle.
    #[must_use]
    pub const fn get(&self) -> u64 {
        self.0
    }
}

/// Parameters describing a body at insertion time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BodyDesc {
    /// Initial centre of the body.
    pub position: WorldPoint,
    /// Collision radius.
    pub radius: f32,
    /// Rectangle the body is confined to, if any.
    pub clamp_to: Option<MapBounds>,
}

/// Capability the world relies on for motion and collision detection.
pub trait Physics: fmt::Debug {
    /// Registers a new enabled body at rest.
    fn insert(&mut self, body: BodyDesc) -> BodyHandle;

    /// Forgets a body. Unknown handles are ignored.
    fn remove(&mut self, handle: BodyHandle);

    /// Current centre of the body.
    fn position(&self, handle: BodyHandle) -> Option<WorldPoint>;

    /// Replaces the body's velocity, in world units per second.
    fn set_velocity(&mut self, handle: BodyHandle, velocity: WorldVector);

    /// Disabled bodies neither move nor overlap anything.
    fn set_enabled(&mut self, handle: BodyHandle, enabled: bool);

    /// Integrates every enabled body over `dt`.
    fn step(&mut self, dt: Duration);

    /// Reports whether two enabled bodies touch.
    fn overlaps(&self, first: BodyHandle, second: BodyHandle) -> bool;

    /// Number of bodies currently registered.
    fn body_count(&self) -> usize;
}

/// Circle-based arcade physics with explicit Euler integration.
#[derive(Debug, Default)]
pub struct ArcadePhysics {
    bodies: BTreeMap<BodyHandle, Body>,
    next_handle: u64,
}

impl ArcadePhysics {
    /// Creates an empty physics world.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[derive(Clone, Copy, Debug)]
struct Body {
    position: WorldPoint,
    velocity: WorldVector,
    radius: f32,
    clamp_to: Option<MapBounds>,
    enabled: bool,
}

impl Physics for ArcadePhysics {
    fn insert(&mut self, body: BodyDesc) -> BodyHandle {
        let handle = BodyHandle(self.next_handle);
        self.next_handle = self.next_handle.saturating_add(1);
        let position = match body.clamp_to {
            Some(bounds) => bounds.clamp(body.position),
            None => body.position,
        };
        let _ = self.bodies.insert(
            handle,
            Body {
                position,
                velocity: WorldVector::ZERO,
                radius: body.radius.max(0.0),
                clamp_to: body.clamp_to,
                enabled: true,
            },
        );
        handle
    }

    fn remove(&mut self, handle: BodyHandle) {
        let _ = self.bodies.remove(&handle);
    }

    fn position(&self, handle: BodyHandle) -> Option<WorldPoint> {
        self.bodies.get(&handle).map(|body| body.position)
    }

    fn set_velocity(&mut self, handle: BodyHandle, velocity: WorldVector) {
        if let Some(body) = self.bodies.get_mut(&handle) {
            body.velocity = velocity;
        }
    }

    fn set_enabled(&mut self, handle: BodyHandle, enabled: bool) {
        if let Some(body) = self.bodies.get_mut(&handle) {
            body.enabled = enabled;
            if !enabled {
                body.velocity = WorldVector::ZERO;
            }
        }
    }

    fn step(&mut self, dt: Duration) {
        let seconds = dt.as_secs_f32();
        if seconds <= 0.0 {
            return;
        }

        for body in self.bodies.values_mut().filter(|body| body.enabled) {
            let moved = body.position.translated(body.velocity.scaled(seconds));
            body.position = match body.clamp_to {
                Some(bounds) => bounds.clamp(moved),
                None => moved,
            };
        }
    }

    fn overlaps(&self, first: BodyHandle, second: BodyHandle) -> bool {
        let (Some(a), Some(b)) = (self.bodies.get(&first), self.bodies.get(&second)) else {
            return false;
        };
        if !a.enabled || !b.enabled {
            return false;
        }

        let reach = a.radius + b.radius;
        a.position.distance_squared(b.position) <= reach * reach
    }

    fn body_count(&self) -> usize {
        self.bodies.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn desc(x: f32, y: f32, radius: f32) -> BodyDesc {
        BodyDesc {
            position: WorldPoint::new(x, y),
            radius,
            clamp_to: None,
        }
    }

    #[test]
    fn step_integrates_velocity() {
        let mut physics = ArcadePhysics::new();
        let body = physics.insert(desc(0.0, 0.0, 1.0));
        physics.set_velocity(body, WorldVector::new(100.0, -50.0));
        physics.step(Duration::from_millis(500));

        assert_eq!(physics.position(body), Some(WorldPoint::new(50.0, -25.0)));
    }

    #[test]
    fn clamped_bodies_stay_inside_bounds() {
        let mut physics = ArcadePhysics::new();
        let body = physics.insert(BodyDesc {
            position: WorldPoint::new(95.0, 50.0),
            radius: 5.0,
            clamp_to: Some(MapBounds::new(100.0, 100.0)),
        });
        physics.set_velocity(body, WorldVector::new(300.0, 0.0));
        physics.step(Duration::from_secs(1));

        assert_eq!(physics.position(body), Some(WorldPoint::new(100.0, 50.0)));
    }

    #[test]
    fn disabled_bodies_neither_move_nor_overlap() {
        let mut physics = ArcadePhysics::new();
        let first = physics.insert(desc(0.0, 0.0, 10.0));
        let second = physics.insert(desc(5.0, 0.0, 10.0));
        assert!(physics.overlaps(first, second));

        physics.set_velocity(first, WorldVector::new(10.0, 0.0));
        physics.set_enabled(first, false);
        physics.step(Duration::from_secs(1));

        assert!(!physics.overlaps(first, second));
        assert_eq!(physics.position(first), Some(WorldPoint::new(0.0, 0.0)));
    }

    #[test]
    fn removed_handles_are_forgotten() {
        let mut physics = ArcadePhysics::new();
        let first = physics.insert(desc(0.0, 0.0, 1.0));
        physics.remove(first);
        let second = physics.insert(desc(0.0, 0.0, 1.0));

        assert_ne!(first, second);
        assert_eq!(physics.position(first), None);
        assert_eq!(physics.body_count(), 1);
    }
}
