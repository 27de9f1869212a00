use std::{collections::BTreeMap, time::Duration};

use wave_survivor_core::{BulletId, EndCause, WaveNumber};

/// Callback deferred against the session clock.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Deferred {
    MissCheck(BulletId),
    InvulnerabilityExpired,
    EndSession(EndCause),
    AnnouncementFaded(WaveNumber),
}

/// Cooperative timer queue. Entries due at the same instant run in the order
/// they were scheduled.
#[derive(Debug, Default)]
pub(crate) struct Schedule {
    entries: BTreeMap<(Duration, u64), Deferred>,
    sequence: u64,
}

impl Schedule {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn schedule(&mut self, due: Duration, deferred: Deferred) {
        let key = (due, self.sequence);
        self.sequence = self.sequence.wrapping_add(1);
        let _ = self.entries.insert(key, deferred);
    }

    pub(crate) fn pop_due(&mut self, now: Duration) -> Option<Deferred> {
        let (&(due, _), _) = self.entries.first_key_value()?;
        if due > now {
            return None;
        }
        self.entries.pop_first().map(|(_, deferred)| deferred)
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}
