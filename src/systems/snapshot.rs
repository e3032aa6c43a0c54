//! Read-only view of the host world.
//!
//! The host mirrors every visible player into the ECS world as an entity with
//! [`Player`], [`WorldPosition`] and [`Dimension`] components, and tags the
//! local player with [`LocalViewer`]. [`WorldSnapshot`] bundles the queries
//! the overlay systems need so they all read the world the same way.
//!
//! Position and dimension are read from the same entity in the same query
//! item, so they always belong to the same snapshot.

use std::sync::Arc;

use bevy_ecs::prelude::*;
use bevy_ecs::system::SystemParam;
use glam::DVec3;

use crate::components::dimension::{Dimension, WorldId};
use crate::components::player::{LocalViewer, Player, TrackedId};
use crate::components::worldposition::WorldPosition;

/// The local viewer as seen in the current frame.
#[derive(Clone, Copy, Debug)]
pub struct ViewerSnapshot<'a> {
    pub id: TrackedId,
    pub position: DVec3,
    pub world_id: &'a WorldId,
}

/// One visible player as seen in the current frame.
#[derive(Clone, Copy, Debug)]
pub struct VisibleEntity<'a> {
    pub id: TrackedId,
    pub name: &'a Arc<str>,
    pub position: DVec3,
    pub world_id: &'a WorldId,
}

type PlayerData = (
    &'static Player,
    &'static WorldPosition,
    &'static Dimension,
);

#[derive(SystemParam)]
pub struct WorldSnapshot<'w, 's> {
    viewer: Query<'w, 's, PlayerData, With<LocalViewer>>,
    players: Query<'w, 's, PlayerData>,
}

impl<'w, 's> WorldSnapshot<'w, 's> {
    /// The local viewer, or `None` when there is no (single) viewer this frame.
    pub fn local_viewer(&self) -> Option<ViewerSnapshot<'_>> {
        let (player, position, dimension) = self.viewer.single().ok()?;
        Some(ViewerSnapshot {
            id: player.id,
            position: position.pos,
            world_id: &dimension.0,
        })
    }

    /// Every visible player, the local viewer included.
    pub fn visible_entities(&self) -> impl Iterator<Item = VisibleEntity<'_>> {
        self.players
            .iter()
            .map(|(player, position, dimension)| VisibleEntity {
                id: player.id,
                name: &player.name,
                position: position.pos,
                world_id: &dimension.0,
            })
    }
}
