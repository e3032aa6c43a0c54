//! Rate limit for the tracking reconciler.

use bevy_ecs::prelude::Resource;

/// Remembers when the last reconciliation cycle ran.
///
/// A session starts with no previous check, so the first cycle is due
/// immediately. After that a cycle is due once strictly more than the
/// cooldown has elapsed.
#[derive(Resource, Clone, Copy, Debug, Default)]
pub struct ReconcileClock {
    pub last_check_ms: Option<u64>,
}

impl ReconcileClock {
    pub fn is_due(&self, now_ms: u64, cooldown_ms: u64) -> bool {
        match self.last_check_ms {
            None => true,
            Some(last) => now_ms.saturating_sub(last) > cooldown_ms,
        }
    }

    pub fn mark(&mut self, now_ms: u64) {
        self.last_check_ms = Some(now_ms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_check_is_due() {
        assert!(ReconcileClock::default().is_due(0, 5_000));
    }

    #[test]
    fn cooldown_boundary_is_exclusive() {
        let mut clock = ReconcileClock::default();
        clock.mark(1_000);
        assert!(!clock.is_due(6_000, 5_000));
        assert!(clock.is_due(6_001, 5_000));
    }
}
