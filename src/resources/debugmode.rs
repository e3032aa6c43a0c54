//! Debug toggle resource.
//!
//! Present while the viewer's debug overlay is on. Toggled through
//! [`SwitchDebugEvent`](crate::events::switchdebug::SwitchDebugEvent).

use bevy_ecs::prelude::Resource;

/// Marker resource: when present, the presenter draws store counts and timing.
#[derive(Resource, Clone, Copy, Debug)]
pub struct DebugMode {}
