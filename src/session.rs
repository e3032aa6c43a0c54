//! Session lifecycle for the overlay.
//!
//! A session owns one [`RecordStore`] and everything the overlay systems read
//! or write. It is created once when the viewer joins a world and torn down
//! when the viewer leaves; nothing is kept across sessions.
//!
//! # Frame order
//!
//! [`add_overlay_systems`] registers, chained in this order:
//!
//! 1. [`update_offline_notices`] – rotate the notice queue
//! 2. [`tracking_reconcile_system`] – rate-limited record maintenance
//! 3. [`beam_geometry_system`] – rebuild the frame's draw list
//!
//! The host advances [`WorldTime`] and updates the player entities and
//! [`ViewCamera`](crate::resources::viewcamera::ViewCamera) before running the
//! schedule, and presents [`FrameGeometry`] after it.

use bevy_ecs::prelude::*;
use log::info;

use crate::events::notice::OfflineNotice;
use crate::events::switchdebug::switch_debug_observer;
use crate::events::wentstale::offline_alert_observer;
use crate::resources::framegeometry::FrameGeometry;
use crate::resources::reconcileclock::ReconcileClock;
use crate::resources::recordstore::RecordStore;
use crate::resources::trackerconfig::TrackerConfig;
use crate::resources::worldtime::WorldTime;
use crate::systems::geometry::beam_geometry_system;
use crate::systems::notice::update_offline_notices;
use crate::systems::reconcile::tracking_reconcile_system;

/// Marker for observer entities spawned by [`init_session`].
#[derive(Component, Clone, Copy, Debug)]
pub struct SessionObserver;

/// Insert the session resources and register the overlay observers.
pub fn init_session(world: &mut World, config: TrackerConfig) {
    info!(
        "Starting tracking session (radius {}, cooldown {}ms, retention {}ms)",
        config.check_radius, config.cooldown_ms, config.retention_ms
    );
    world.insert_resource(WorldTime::default());
    world.insert_resource(config);
    world.insert_resource(RecordStore::new());
    world.insert_resource(ReconcileClock::default());
    world.insert_resource(FrameGeometry::default());
    world.init_resource::<Messages<OfflineNotice>>();

    world.spawn((Observer::new(offline_alert_observer), SessionObserver));
    world.spawn((Observer::new(switch_debug_observer), SessionObserver));
    // Observers must be registered before any system triggers an event.
    world.flush();
}

/// Add the overlay systems to `schedule` in frame order.
pub fn add_overlay_systems(schedule: &mut Schedule) {
    schedule.add_systems(
        (
            update_offline_notices,
            tracking_reconcile_system,
            beam_geometry_system,
        )
            .chain(),
    );
}

/// Drop every record and remove the session resources and observers.
pub fn teardown_session(world: &mut World) {
    if let Some(mut store) = world.get_resource_mut::<RecordStore>() {
        info!(
            "Ending tracking session ({} active, {} stale records dropped)",
            store.active_len(),
            store.stale_len()
        );
        store.clear();
    }
    world.remove_resource::<RecordStore>();
    world.remove_resource::<ReconcileClock>();
    world.remove_resource::<FrameGeometry>();
    world.remove_resource::<Messages<OfflineNotice>>();
    world.remove_resource::<TrackerConfig>();
    world.remove_resource::<WorldTime>();

    let observers: Vec<Entity> = world
        .query_filtered::<Entity, With<SessionObserver>>()
        .iter(world)
        .collect();
    for entity in observers {
        world.despawn(entity);
    }
}
