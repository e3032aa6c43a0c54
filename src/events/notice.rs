//! Offline notifications for the local viewer.
//!
//! [`OfflineNotice`] is a [`Message`]: the
//! [`offline_alert_observer`](crate::events::wentstale::offline_alert_observer)
//! writes one per qualifying transition, and the presenter reads them with a
//! `MessageReader<OfflineNotice>`. The queue is rotated once per frame by
//! [`update_offline_notices`](crate::systems::notice::update_offline_notices),
//! so a notice stays readable for two frames and then disappears.

use std::sync::Arc;

use bevy_ecs::prelude::*;
use glam::DVec3;

use crate::components::player::TrackedId;

/// One-shot text shown to the viewer when a nearby player goes offline.
#[derive(Message, Debug, Clone, PartialEq)]
pub struct OfflineNotice {
    pub entity_id: TrackedId,
    pub name: Arc<str>,
    /// Last known position of the player.
    pub position: DVec3,
    /// Distance from the viewer at the moment of the transition.
    pub distance: f64,
    /// Session time (ms) of the transition.
    pub at_ms: u64,
    /// Ready-to-display message.
    pub text: String,
}

impl OfflineNotice {
    pub fn new(
        entity_id: TrackedId,
        name: Arc<str>,
        position: DVec3,
        distance: f64,
        at_ms: u64,
    ) -> Self {
        let text = format!(
            "[Offline] {} went offline at {:.1}, {:.1}, {:.1} ({:.1} blocks away)",
            name, position.x, position.y, position.z, distance
        );
        OfflineNotice {
            entity_id,
            name,
            position,
            distance,
            at_ms,
            text,
        }
    }
}
