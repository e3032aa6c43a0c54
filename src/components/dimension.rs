//! Spatial partition ("dimension") an entity lives in.
//!
//! A position only has meaning together with the [`WorldId`] it was captured
//! in. Records from another dimension are never drawn or announced, however
//! close their numeric coordinates are.

use std::fmt;
use std::sync::Arc;

use bevy_ecs::prelude::Component;

/// Identifier of a world/dimension, e.g. `"overworld"`.
///
/// Backed by an `Arc<str>` so copying it into every record is cheap.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct WorldId(pub Arc<str>);

impl WorldId {
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        WorldId(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WorldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Component holding the dimension an entity currently belongs to.
#[derive(Component, Clone, Debug, PartialEq, Eq)]
pub struct Dimension(pub WorldId);

impl Dimension {
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Dimension(WorldId::new(name))
    }
}
