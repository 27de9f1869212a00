#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Wave controller that derives the current wave from elapsed session time.

use std::time::Duration;

use wave_survivor_core::{Command, Event, SessionPhase, WaveNumber};

/// Pure system that requests wave advances as session time passes.
#[derive(Debug)]
pub struct WaveController {
    wave_duration: Duration,
}

impl WaveController {
    /// Creates a controller for waves lasting `wave_duration` each.
    #[must_use]
    pub const fn new(wave_duration: Duration) -> Self {
        Self { wave_duration }
    }

    /// Emits consecutive [`Command::AdvanceWave`] commands up to the wave
    /// reached at `elapsed`.
    ///
    /// A frame long enough to cross several boundaries yields one command per
    /// boundary so every transition is a single step.
    pub fn handle(
        &self,
        events: &[Event],
        phase: SessionPhase,
        current: WaveNumber,
        elapsed: Duration,
        out: &mut Vec<Command>,
    ) {
        if phase != SessionPhase::Running {
            return;
        }

        if !events
            .iter()
            .any(|event| matches!(event, Event::TimeAdvanced { .. }))
        {
            return;
        }

        let target = WaveNumber::for_elapsed(elapsed, self.wave_duration);
        let mut wave = current;
        while wave < target {
            wave = wave.next();
            out.push(Command::AdvanceWave { wave });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tick() -> [Event; 1] {
        [Event::TimeAdvanced {
            dt: Duration::from_millis(16),
        }]
    }

    #[test]
    fn stays_on_first_wave_before_boundary() {
        let controller = WaveController::new(Duration::from_secs(60));
        let mut commands = Vec::new();
        controller.handle(
            &tick(),
            SessionPhase::Running,
            WaveNumber::FIRST,
            Duration::from_millis(59_999),
            &mut commands,
        );
        assert!(commands.is_empty());
    }

    #[test]
    fn long_frame_yields_consecutive_advances() {
        let controller = WaveController::new(Duration::from_secs(60));
        let mut commands = Vec::new();
        controller.handle(
            &tick(),
            SessionPhase::Running,
            WaveNumber::FIRST,
            Duration::from_secs(180),
            &mut commands,
        );
        assert_eq!(
            commands,
            vec![
                Command::AdvanceWave {
                    wave: WaveNumber::new(2)
                },
                Command::AdvanceWave {
                    wave: WaveNumber::new(3)
                },
                Command::AdvanceWave {
                    wave: WaveNumber::new(4)
                },
            ]
        );
    }

    #[test]
    fn silent_without_time_or_after_end() {
        let controller = WaveController::new(Duration::from_secs(60));
        let mut commands = Vec::new();
        controller.handle(
            &[],
            SessionPhase::Running,
            WaveNumber::FIRST,
            Duration::from_secs(120),
            &mut commands,
        );
        controller.handle(
            &tick(),
            SessionPhase::Ended,
            WaveNumber::FIRST,
            Duration::from_secs(120),
            &mut commands,
        );
        assert!(commands.is_empty());
    }
}
