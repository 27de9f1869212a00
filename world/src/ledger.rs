/// Finite per-session bullet budget.
///
/// The balance is charged once per resolved bullet and never refunded. It may
/// dip below zero when several bullets are in flight as the last shot lands;
/// callers only ever observe the clamped value.
#[derive(Clone, Copy, Debug)]
pub(crate) struct AmmoLedger {
    balance: i64,
    fired: u32,
    hits: u32,
    misses: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Charge {
    Hit,
    Miss,
}

impl AmmoLedger {
    pub(crate) fn new(initial: u32) -> Self {
        Self {
            balance: i64::from(initial),
            fired: 0,
            hits: 0,
            misses: 0,
        }
    }

    pub(crate) fn can_fire(&self) -> bool {
        self.balance > 0
    }

    pub(crate) fn record_fire(&mut self) {
        self.fired = self.fired.saturating_add(1);
    }

    /// Charges one resolved bullet and reports whether the ledger is now dry.
    pub(crate) fn charge(&mut self, charge: Charge) -> bool {
        self.balance -= 1;
        match charge {
            Charge::Hit => self.hits = self.hits.saturating_add(1),
            Charge::Miss => self.misses = self.misses.saturating_add(1),
        }
        self.balance <= 0
    }

    pub(crate) fn remaining(&self) -> u32 {
        u32::try_from(self.balance.max(0)).unwrap_or(u32::MAX)
    }

    pub(crate) fn fired(&self) -> u32 {
        self.fired
    }

    pub(crate) fn hits(&self) -> u32 {
        self.hits
    }

    pub(crate) fn misses(&self) -> u32 {
        self.misses
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn charges_hits_and_misses_alike() {
        let mut ledger = AmmoLedger::new(2);
        assert!(!ledger.charge(Charge::Hit));
        assert!(ledger.charge(Charge::Miss));
        assert_eq!(ledger.remaining(), 0);
        assert_eq!((ledger.hits(), ledger.misses()), (1, 1));
        assert!(!ledger.can_fire());
    }

    #[test]
    fn displayed_balance_never_negative() {
        let mut ledger = AmmoLedger::new(1);
        let _ = ledger.charge(Charge::Miss);
        assert!(ledger.charge(Charge::Miss));
        assert_eq!(ledger.remaining(), 0);
    }
}
