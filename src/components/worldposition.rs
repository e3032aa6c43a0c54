use bevy_ecs::prelude::Component;
use glam::DVec3;

/// World-space position of an entity in double precision.
///
/// Coordinates far from the origin lose precision in `f32`, so world positions
/// stay `f64` and are only narrowed after being made camera-relative.
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct WorldPosition {
    pub pos: DVec3,
}

impl WorldPosition {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        WorldPosition {
            pos: DVec3::new(x, y, z),
        }
    }
}
