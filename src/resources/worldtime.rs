//! Monotonic session clock.
//!
//! The host feeds its frame delta into
//! [`update_world_time`](crate::systems::time::update_world_time) once per
//! frame; every system reads the current time from this resource instead of
//! querying a wall clock, which keeps the tracker deterministic under test.

use bevy_ecs::prelude::Resource;

#[derive(Resource, Clone, Copy, Debug, Default)]
pub struct WorldTime {
    /// Milliseconds since the session started. Never decreases.
    pub now_ms: u64,
    /// Whole milliseconds added by the last update.
    pub delta_ms: u64,
    /// Sub-millisecond remainder carried into the next update.
    pub carry_ms: f64,
    /// Number of updates applied so far.
    pub frame_count: u64,
}

impl WorldTime {
    /// Clock pinned at `now_ms`. Used by tests and replays.
    pub fn at_ms(now_ms: u64) -> Self {
        WorldTime {
            now_ms,
            ..Default::default()
        }
    }

    /// Move the clock forward by a whole number of milliseconds.
    pub fn advance_ms(&mut self, ms: u64) {
        self.now_ms += ms;
        self.delta_ms = ms;
        self.frame_count += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_accumulates() {
        let mut wt = WorldTime::at_ms(1_000);
        wt.advance_ms(250);
        wt.advance_ms(250);
        assert_eq!(wt.now_ms, 1_500);
        assert_eq!(wt.delta_ms, 250);
        assert_eq!(wt.frame_count, 2);
    }
}
