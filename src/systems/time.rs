//! Time update system.
//!
//! Advances the shared [`WorldTime`](crate::resources::worldtime::WorldTime)
//! resource once per frame from the host's frame delta.
use bevy_ecs::prelude::*;

use crate::resources::worldtime::WorldTime;

/// Advance `WorldTime` by `dt` seconds.
///
/// Sub-millisecond remainders are carried over so that many short frames add
/// up to the right total. Negative or non-finite deltas are ignored, keeping
/// the clock monotonic.
pub fn update_world_time(world: &mut World, dt: f32) {
    let mut wt = world.resource_mut::<WorldTime>();
    let dt_ms = if dt.is_finite() && dt > 0.0 {
        f64::from(dt) * 1000.0
    } else {
        0.0
    };
    let total = wt.carry_ms + dt_ms;
    let whole = total.floor();
    wt.carry_ms = total - whole;
    wt.advance_ms(whole as u64);
}
