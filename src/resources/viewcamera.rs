//! Shared 3D camera resource.
//!
//! The host writes the eye position and orientation every frame before the
//! overlay systems run. The eye position stays in `f64` because all overlay
//! geometry is expressed relative to it.

use bevy_ecs::prelude::Resource;
use glam::{DVec3, Quat, Vec3};

#[derive(Resource, Clone, Copy, Debug, PartialEq)]
pub struct ViewCamera {
    /// Eye position in world space.
    pub position: DVec3,
    /// Camera orientation. Applied to labels so they face the viewer.
    pub rotation: Quat,
}

impl Default for ViewCamera {
    fn default() -> Self {
        ViewCamera {
            position: DVec3::ZERO,
            rotation: Quat::IDENTITY,
        }
    }
}

impl ViewCamera {
    pub fn new(position: DVec3, rotation: Quat) -> Self {
        ViewCamera { position, rotation }
    }

    /// Camera looking along `yaw` (around +Y) and `pitch` (around local +X), in radians.
    pub fn from_yaw_pitch(position: DVec3, yaw: f32, pitch: f32) -> Self {
        let rotation = Quat::from_rotation_y(yaw) * Quat::from_rotation_x(pitch);
        ViewCamera { position, rotation }
    }

    /// Unit vector the camera looks along (-Z in camera space).
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::NEG_Z
    }

    pub fn up(&self) -> Vec3 {
        self.rotation * Vec3::Y
    }
}
