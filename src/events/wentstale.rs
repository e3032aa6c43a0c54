//! Active -> stale transition event and the notification observer.
//!
//! The tracking reconciler triggers a [`WentStaleEvent`] for every player that
//! vanished from the world during a cycle. The event carries the viewer's
//! position and dimension *at that moment*, so whether a notice is shown is
//! decided once, at transition time, and never re-evaluated while the record
//! is drawn.

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use glam::DVec3;
use log::{debug, info};

use crate::components::dimension::WorldId;
use crate::events::notice::OfflineNotice;
use crate::resources::recordstore::TrackedRecord;
use crate::resources::trackerconfig::TrackerConfig;

/// Fired once per active -> stale transition.
#[derive(Event, Debug, Clone)]
pub struct WentStaleEvent {
    /// The record as it entered the stale map.
    pub record: TrackedRecord,
    /// Session time of the transition.
    pub at_ms: u64,
    /// Viewer position when the transition was detected.
    pub viewer_position: DVec3,
    /// Viewer dimension when the transition was detected.
    pub viewer_world: WorldId,
}

impl WentStaleEvent {
    /// Distance from the viewer to the last known position, if both are in
    /// the same dimension.
    pub fn viewer_distance(&self) -> Option<f64> {
        (self.record.world_id == self.viewer_world)
            .then(|| self.viewer_position.distance(self.record.position))
    }
}

/// Observer that turns nearby transitions into [`OfflineNotice`] messages.
///
/// - Different dimension: no notice.
/// - Farther than `check_radius`: no notice.
/// - Otherwise one notice is written and logged.
pub fn offline_alert_observer(
    trigger: On<WentStaleEvent>,
    config: Res<TrackerConfig>,
    mut notices: MessageWriter<OfflineNotice>,
) {
    let event = trigger.event();
    let Some(distance) = event.viewer_distance() else {
        debug!(
            "{} went offline in {} at {}ms, viewer is elsewhere",
            event.record.display_name, event.record.world_id, event.at_ms
        );
        return;
    };
    if distance > config.check_radius {
        debug!(
            "{} went offline {:.1} away at {}ms, outside notice radius",
            event.record.display_name, distance, event.at_ms
        );
        return;
    }

    let notice = OfflineNotice::new(
        event.record.entity_id,
        event.record.display_name.clone(),
        event.record.position,
        distance,
        event.at_ms,
    );
    info!("{}", notice.text);
    notices.write(notice);
}
