//! Player identity components.
//!
//! Every entity the host reports as visible carries a [`Player`] component.
//! Exactly one of them is also tagged with [`LocalViewer`]: the player the
//! overlay is rendered for. The tracker never records the local viewer.

use std::fmt;
use std::sync::Arc;

use bevy_ecs::prelude::Component;
use uuid::Uuid;

/// Stable identifier of a tracked player.
///
/// Survives despawn/respawn on the host side, so a player that logs out and
/// back in keeps the same id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TrackedId(pub Uuid);

impl TrackedId {
    /// Generate a fresh random id.
    pub fn new_random() -> Self {
        TrackedId(Uuid::new_v4())
    }

    /// Build an id from a raw 128-bit value. Handy for deterministic tests.
    pub fn from_u128(value: u128) -> Self {
        TrackedId(Uuid::from_u128(value))
    }
}

impl fmt::Display for TrackedId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A player currently visible in the host world.
#[derive(Component, Clone, Debug)]
pub struct Player {
    /// Stable id used as the record key.
    pub id: TrackedId,
    /// Display name shown on the label.
    pub name: Arc<str>,
}

impl Player {
    pub fn new(id: TrackedId, name: impl Into<Arc<str>>) -> Self {
        Player {
            id,
            name: name.into(),
        }
    }
}

/// Marker for the player the overlay is drawn for.
#[derive(Component, Clone, Copy, Debug)]
pub struct LocalViewer;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_u128_is_stable() {
        assert_eq!(TrackedId::from_u128(7), TrackedId::from_u128(7));
        assert_ne!(TrackedId::from_u128(7), TrackedId::from_u128(8));
    }

    #[test]
    fn random_ids_differ() {
        assert_ne!(TrackedId::new_random(), TrackedId::new_random());
    }
}
