//! Per-frame draw list handed to the presenter.
//!
//! [`beam_geometry_system`](crate::systems::geometry::beam_geometry_system)
//! clears and refills [`FrameGeometry`] every frame. The presenter only reads
//! it. Vectors are cleared rather than reallocated so steady-state frames do
//! not allocate for geometry.

use bevy_ecs::prelude::Resource;
use glam::{Mat4, Vec3};
use smallvec::SmallVec;

/// One vertex of a beam quad, in camera-relative coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColoredVertex {
    pub position: Vec3,
    /// RGBA, components in `0.0..=1.0`.
    pub color: [f32; 4],
}

/// A run of label text drawn in a single color.
#[derive(Clone, Debug, PartialEq)]
pub struct TextSegment {
    pub text: String,
    /// Packed `0xAARRGGBB`.
    pub color: u32,
}

/// Request to draw one billboarded text label.
#[derive(Clone, Debug, PartialEq)]
pub struct LabelRequest {
    /// Camera-relative translation, camera rotation and text scale.
    pub transform: Mat4,
    /// Full label text.
    pub text: String,
    /// Colored runs that concatenate (with single spaces) to `text`.
    pub segments: SmallVec<[TextSegment; 3]>,
    /// Packed `0xAARRGGBB` base color.
    pub color: u32,
    /// Opacity of the box behind the text, `0.0` for none.
    pub background_opacity: f32,
}

impl LabelRequest {
    /// Camera-relative position of the label anchor.
    pub fn anchor(&self) -> Vec3 {
        self.transform.w_axis.truncate()
    }
}

/// Geometry emitted for the current frame.
#[derive(Resource, Debug, Default)]
pub struct FrameGeometry {
    /// Quads, four consecutive vertices each.
    pub vertices: Vec<ColoredVertex>,
    pub labels: Vec<LabelRequest>,
}

impl FrameGeometry {
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.labels.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() && self.labels.is_empty()
    }

    pub fn quad_count(&self) -> usize {
        self.vertices.len() / 4
    }

    /// Iterate quads as arrays of four vertices.
    pub fn quads(&self) -> impl Iterator<Item = &[ColoredVertex]> {
        self.vertices.chunks_exact(4)
    }
}
