//! Per-frame movement intent of the local viewer.
//!
//! The viewer binary maps keyboard state into [`ViewerInput`] each frame;
//! [`viewer_controller`](crate::demo::viewer_controller) turns it into motion.
//! Keeping the axes backend-free lets the controller run headless in tests.
use bevy_ecs::prelude::*;

/// Movement axes in `-1.0..=1.0`.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct ViewerInput {
    /// +1 walks forward, -1 backward.
    pub forward: f32,
    /// +1 strafes right, -1 left.
    pub strafe: f32,
    /// +1 turns left (counter-clockwise seen from above), -1 right.
    pub turn: f32,
    /// +1 looks up, -1 down.
    pub look: f32,
    /// +1 rises, -1 sinks.
    pub lift: f32,
}

impl ViewerInput {
    pub fn is_idle(&self) -> bool {
        *self == ViewerInput::default()
    }
}
