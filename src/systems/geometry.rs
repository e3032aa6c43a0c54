//! Per-frame geometry for stale records.
//!
//! For every stale record in the viewer's dimension and within the check
//! radius, [`beam_geometry_system`] emits:
//!
//! - a beam: a vertical prism of five quads (four sides and a top cap) whose
//!   base sits on the last known position
//! - a label: a billboarded text transform above the beam
//!
//! All output is relative to the camera. The subtraction `record - camera`
//! happens in `f64` and only the small result is narrowed to `f32`, so beams
//! far from the world origin do not jitter.

use arrayvec::ArrayVec;
use bevy_ecs::prelude::*;
use glam::{DVec3, Mat4, Vec3};
use smallvec::{SmallVec, smallvec};

use crate::components::dimension::WorldId;
use crate::resources::framegeometry::{ColoredVertex, FrameGeometry, LabelRequest, TextSegment};
use crate::resources::recordstore::{RecordStore, TrackedRecord};
use crate::resources::trackerconfig::TrackerConfig;
use crate::resources::viewcamera::ViewCamera;
use crate::resources::worldtime::WorldTime;
use crate::systems::snapshot::WorldSnapshot;

/// Vertices per beam: five quads of four.
pub const BEAM_VERTEX_COUNT: usize = 20;

pub const LABEL_COLOR: u32 = 0xFFFF_FFFF;
pub const NAME_COLOR: u32 = 0xFFAA_00AA;
pub const DURATION_COLOR: u32 = 0xFFAA_AAAA;
pub const COORDS_COLOR: u32 = 0xFF55_FFFF;

/// Unit prism corners as `(x sign, y fraction, z sign)`, four per quad.
/// Order: north, south, west, east, top. The bottom is never visible.
const BEAM_CORNERS: [(f32, f32, f32); BEAM_VERTEX_COUNT] = [
    // north (-z)
    (-1.0, 0.0, -1.0),
    (1.0, 0.0, -1.0),
    (1.0, 1.0, -1.0),
    (-1.0, 1.0, -1.0),
    // south (+z)
    (-1.0, 0.0, 1.0),
    (-1.0, 1.0, 1.0),
    (1.0, 1.0, 1.0),
    (1.0, 0.0, 1.0),
    // west (-x)
    (-1.0, 0.0, -1.0),
    (-1.0, 1.0, -1.0),
    (-1.0, 1.0, 1.0),
    (-1.0, 0.0, 1.0),
    // east (+x)
    (1.0, 0.0, -1.0),
    (1.0, 0.0, 1.0),
    (1.0, 1.0, 1.0),
    (1.0, 1.0, -1.0),
    // top
    (-1.0, 1.0, -1.0),
    (1.0, 1.0, -1.0),
    (1.0, 1.0, 1.0),
    (-1.0, 1.0, 1.0),
];

/// Whether a stale record should be drawn for a viewer.
///
/// Compares squared distances to keep a square root off the per-frame path.
/// The radius boundary itself is inside.
pub fn in_render_range(
    record: &TrackedRecord,
    viewer_position: DVec3,
    viewer_world: &WorldId,
    radius_sq: f64,
) -> bool {
    record.world_id == *viewer_world
        && viewer_position.distance_squared(record.position) <= radius_sq
}

/// Build the beam prism with its base centered at `offset`.
pub fn build_beam(
    offset: Vec3,
    width: f32,
    height: f32,
    color: [f32; 4],
) -> ArrayVec<ColoredVertex, BEAM_VERTEX_COUNT> {
    let half = width / 2.0;
    BEAM_CORNERS
        .iter()
        .map(|&(sx, fy, sz)| ColoredVertex {
            position: offset + Vec3::new(sx * half, fy * height, sz * half),
            color,
        })
        .collect()
}

/// Billboard transform for a label anchored at `anchor` (world space).
///
/// Translate to camera space, turn with the camera so the text faces the
/// viewer, then scale to world size. X and Y are flipped so glyphs drawn in
/// screen convention (y down) come out upright.
pub fn label_transform(anchor: DVec3, camera: &ViewCamera, scale: f32) -> Mat4 {
    let relative = (anchor - camera.position).as_vec3();
    Mat4::from_translation(relative)
        * Mat4::from_quat(camera.rotation)
        * Mat4::from_scale(Vec3::new(-scale, -scale, scale))
}

/// Label text and its colored runs: name, time since last seen, coordinates.
pub fn compose_label(
    record: &TrackedRecord,
    now_ms: u64,
) -> (String, SmallVec<[TextSegment; 3]>) {
    let name = record.display_name.to_string();
    let duration = record.offline_duration(now_ms).to_string();
    let coords = format!(
        "{:.1}, {:.1}, {:.1}",
        record.position.x, record.position.y, record.position.z
    );
    let text = format!("{} {} {}", name, duration, coords);
    let segments = smallvec![
        TextSegment {
            text: name,
            color: NAME_COLOR,
        },
        TextSegment {
            text: duration,
            color: DURATION_COLOR,
        },
        TextSegment {
            text: coords,
            color: COORDS_COLOR,
        },
    ];
    (text, segments)
}

/// Rebuild [`FrameGeometry`] from the stale records.
///
/// Clears the previous frame's output first, so a frame without viewer or
/// camera presents nothing. Never writes to the [`RecordStore`].
pub fn beam_geometry_system(
    world_time: Res<WorldTime>,
    config: Res<TrackerConfig>,
    store: Res<RecordStore>,
    camera: Option<Res<ViewCamera>>,
    snapshot: WorldSnapshot,
    mut geometry: ResMut<FrameGeometry>,
) {
    geometry.clear();
    let (Some(camera), Some(viewer)) = (camera, snapshot.local_viewer()) else {
        return;
    };

    let now = world_time.now_ms;
    let radius_sq = config.check_radius_sq();
    let rgba = config.beam_rgba();
    let label_lift = f64::from(config.beam_height + config.label_offset);

    for record in store.iter_stale() {
        if !in_render_range(record, viewer.position, viewer.world_id, radius_sq) {
            continue;
        }

        let offset = (record.position - camera.position).as_vec3();
        geometry
            .vertices
            .extend(build_beam(offset, config.beam_width, config.beam_height, rgba));

        let anchor = record.position + DVec3::new(0.0, label_lift, 0.0);
        let (text, segments) = compose_label(record, now);
        geometry.labels.push(LabelRequest {
            transform: label_transform(anchor, &camera, config.label_scale),
            text,
            segments,
            color: LABEL_COLOR,
            background_opacity: 0.0,
        });
    }
}
