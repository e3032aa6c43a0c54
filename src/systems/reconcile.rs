//! Tracking reconciler.
//!
//! Runs every frame but only does work once per cooldown. A cycle:
//!
//! 1. upserts every visible player except the local viewer into the active map
//! 2. moves active players missing from this frame's world into the stale map,
//!    triggering one [`WentStaleEvent`] per transition
//! 3. evicts stale records older than the retention window
//!
//! Without a local viewer the cycle is skipped and the cooldown is not
//! consumed, so tracking resumes on the first frame the viewer is back.

use bevy_ecs::prelude::*;
use log::{debug, trace};
use rustc_hash::FxHashSet;

use crate::components::player::TrackedId;
use crate::events::wentstale::WentStaleEvent;
use crate::resources::reconcileclock::ReconcileClock;
use crate::resources::recordstore::{RecordStore, WentStale};
use crate::resources::trackerconfig::TrackerConfig;
use crate::resources::worldtime::WorldTime;
use crate::systems::snapshot::WorldSnapshot;

pub fn tracking_reconcile_system(
    world_time: Res<WorldTime>,
    config: Res<TrackerConfig>,
    mut clock: ResMut<ReconcileClock>,
    mut store: ResMut<RecordStore>,
    snapshot: WorldSnapshot,
    mut present: Local<FxHashSet<TrackedId>>,
    mut commands: Commands,
) {
    let now = world_time.now_ms;
    if !clock.is_due(now, config.cooldown_ms) {
        return;
    }
    let Some(viewer) = snapshot.local_viewer() else {
        return;
    };
    clock.mark(now);

    present.clear();
    for entity in snapshot.visible_entities() {
        if entity.id == viewer.id {
            continue;
        }
        present.insert(entity.id);
        store.upsert_active(
            entity.id,
            entity.name.clone(),
            entity.position,
            entity.world_id.clone(),
            now,
        );
    }

    for WentStale { record, at_ms } in store.reconcile(&present, now) {
        debug!(
            "{} ({}) went stale at {:.1}, {:.1}, {:.1} in {}",
            record.display_name,
            record.entity_id,
            record.position.x,
            record.position.y,
            record.position.z,
            record.world_id
        );
        commands.trigger(WentStaleEvent {
            record,
            at_ms,
            viewer_position: viewer.position,
            viewer_world: viewer.world_id.clone(),
        });
    }

    let evicted = store.evict_expired(now, config.retention_ms);
    if evicted > 0 {
        debug!("Evicted {} expired record(s)", evicted);
    }

    trace!(
        "Reconciled at {}ms: {} active, {} stale",
        now,
        store.active_len(),
        store.stale_len()
    );
}
