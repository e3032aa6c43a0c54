//! Raylib presenter.
//!
//! Draws one frame from the ECS world: a ground grid and the visible players
//! for context, then the overlay's [`FrameGeometry`] (translucent beams and
//! billboard labels), the [`NoticeLog`], and the debug overlay.
//!
//! The raylib camera sits at the origin because every overlay vertex is
//! already camera-relative; world-space context geometry is made relative the
//! same way (in `f64`) before it is narrowed.

use bevy_ecs::prelude::*;
use glam::{DVec3, Vec3};
use raylib::prelude::*;

use crate::components::dimension::Dimension;
use crate::components::player::{LocalViewer, Player};
use crate::components::worldposition::WorldPosition;
use crate::demo::EYE_HEIGHT;
use crate::resources::debugmode::DebugMode;
use crate::resources::framegeometry::{FrameGeometry, LabelRequest};
use crate::resources::noticelog::NoticeLog;
use crate::resources::recordstore::RecordStore;
use crate::resources::viewcamera::ViewCamera;
use crate::resources::worldtime::WorldTime;

const FOV_Y_DEGREES: f32 = 70.0;
const GRID_HALF_CELLS: i32 = 24;
const GRID_CELL: f64 = 4.0;
/// Glyph height in text pixels at raylib's default font size.
const GLYPH_PX: f32 = 10.0;
const MIN_LABEL_PX: i32 = 6;
const MAX_LABEL_PX: i32 = 40;
const SKY: Color = Color {
    r: 135,
    g: 180,
    b: 235,
    a: 255,
};

fn to_rl(v: Vec3) -> Vector3 {
    Vector3 {
        x: v.x,
        y: v.y,
        z: v.z,
    }
}

fn rgba_to_color(c: [f32; 4]) -> Color {
    let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
    Color {
        r: channel(c[0]),
        g: channel(c[1]),
        b: channel(c[2]),
        a: channel(c[3]),
    }
}

fn argb_to_color(argb: u32) -> Color {
    Color {
        a: (argb >> 24) as u8,
        r: (argb >> 16) as u8,
        g: (argb >> 8) as u8,
        b: argb as u8,
    }
}

/// Raylib camera at the origin looking along the [`ViewCamera`] orientation.
pub fn raylib_camera(camera: &ViewCamera) -> Camera3D {
    Camera3D::perspective(
        Vector3 {
            x: 0.0,
            y: 0.0,
            z: 0.0,
        },
        to_rl(camera.forward()),
        to_rl(camera.up()),
        FOV_Y_DEGREES,
    )
}

/// Render the whole frame.
///
/// The raylib handle lives outside the ECS world so the world can be borrowed
/// while a drawing scope is open.
pub fn render_frame(world: &mut World, rl: &mut RaylibHandle, thread: &RaylibThread) {
    let Some(camera) = world.get_resource::<ViewCamera>().copied() else {
        return;
    };
    let rl_camera = raylib_camera(&camera);

    // Context geometry: other players in the viewer's dimension, camera-relative.
    let viewer_world = world
        .query_filtered::<&Dimension, With<LocalViewer>>()
        .iter(world)
        .next()
        .cloned();
    let bodies: Vec<Vector3> = world
        .query_filtered::<(&WorldPosition, &Dimension), (With<Player>, Without<LocalViewer>)>()
        .iter(world)
        .filter(|(_, dim)| Some(*dim) == viewer_world.as_ref())
        .map(|(pos, _)| to_rl((pos.pos - camera.position).as_vec3()))
        .collect();

    let world: &World = world;
    let geometry = world.resource::<FrameGeometry>();

    let mut d = rl.begin_drawing(thread);
    d.clear_background(SKY);

    {
        let mut d3 = d.begin_mode3D(rl_camera);
        draw_ground_grid(&mut d3, &camera);
        for body in &bodies {
            let center = Vector3 {
                x: body.x,
                y: body.y + 0.9,
                z: body.z,
            };
            d3.draw_cube(center, 0.6, 1.8, 0.6, Color::DARKBLUE);
        }
        // Beams last so they blend over opaque geometry.
        for quad in geometry.quads() {
            let [a, b, c, e] = [
                to_rl(quad[0].position),
                to_rl(quad[1].position),
                to_rl(quad[2].position),
                to_rl(quad[3].position),
            ];
            let color = rgba_to_color(quad[0].color);
            // Quads wind towards the prism interior; reverse them so raylib's
            // counter-clockwise front faces point outwards.
            d3.draw_triangle3D(a, c, b, color);
            d3.draw_triangle3D(a, e, c, color);
        }
    }

    let screen_h = d.get_screen_height() as f32;
    for label in &geometry.labels {
        draw_label(&mut d, label, &camera, rl_camera, screen_h);
    }

    if let Some(log) = world.get_resource::<NoticeLog>() {
        for (row, notice) in log.iter().enumerate() {
            d.draw_text(&notice.text, 12, 12 + row as i32 * 22, 20, Color::RED);
        }
    }

    if world.contains_resource::<DebugMode>() {
        draw_debug_overlay(&mut d, world, &camera);
    }
}

fn draw_ground_grid(d3: &mut RaylibMode3D<RaylibDrawHandle>, camera: &ViewCamera) {
    let ground_y = camera.position.y.floor() - EYE_HEIGHT.ceil();
    let snap_x = (camera.position.x / GRID_CELL).floor() * GRID_CELL;
    let snap_z = (camera.position.z / GRID_CELL).floor() * GRID_CELL;
    let extent = GRID_HALF_CELLS as f64 * GRID_CELL;
    let color = Color::new(90, 120, 90, 255);

    for i in -GRID_HALF_CELLS..=GRID_HALF_CELLS {
        let step = i as f64 * GRID_CELL;
        let along_z = (
            DVec3::new(snap_x + step, ground_y, snap_z - extent),
            DVec3::new(snap_x + step, ground_y, snap_z + extent),
        );
        let along_x = (
            DVec3::new(snap_x - extent, ground_y, snap_z + step),
            DVec3::new(snap_x + extent, ground_y, snap_z + step),
        );
        for (from, to) in [along_z, along_x] {
            d3.draw_line_3D(
                to_rl((from - camera.position).as_vec3()),
                to_rl((to - camera.position).as_vec3()),
                color,
            );
        }
    }
}

fn draw_label(
    d: &mut RaylibDrawHandle,
    label: &LabelRequest,
    camera: &ViewCamera,
    rl_camera: Camera3D,
    screen_h: f32,
) {
    let anchor = label.anchor();
    let depth = anchor.dot(camera.forward());
    if depth <= 0.0 {
        return;
    }
    // World height of one glyph: text pixels times the label's world scale.
    let world_glyph = GLYPH_PX * label.transform.y_axis.truncate().length();
    let focal = screen_h / (2.0 * (FOV_Y_DEGREES.to_radians() / 2.0).tan());
    let font_px = ((world_glyph * focal / depth) as i32).clamp(MIN_LABEL_PX, MAX_LABEL_PX);

    let screen = d.get_world_to_screen(to_rl(anchor), rl_camera);
    let total_w = measure_text(&label.text, font_px);
    let space_w = measure_text(" ", font_px);

    if label.background_opacity > 0.0 {
        let alpha = (label.background_opacity.clamp(0.0, 1.0) * 255.0) as u8;
        d.draw_rectangle(
            screen.x as i32 - total_w / 2 - 2,
            screen.y as i32 - 2,
            total_w + 4,
            font_px + 4,
            Color::new(0, 0, 0, alpha),
        );
    }

    let mut x = screen.x as i32 - total_w / 2;
    let y = screen.y as i32;
    if label.segments.is_empty() {
        d.draw_text(&label.text, x, y, font_px, argb_to_color(label.color));
        return;
    }
    for segment in &label.segments {
        d.draw_text(&segment.text, x, y, font_px, argb_to_color(segment.color));
        x += measure_text(&segment.text, font_px) + space_w;
    }
}

fn draw_debug_overlay(d: &mut RaylibDrawHandle, world: &World, camera: &ViewCamera) {
    let screen_h = d.get_screen_height();
    let fps = d.get_fps();
    let now = world.resource::<WorldTime>().now_ms;
    d.draw_text(
        &format!("DEBUG (F11) | FPS: {} | t = {}ms", fps, now),
        12,
        screen_h - 66,
        18,
        Color::BLACK,
    );

    if let Some(store) = world.get_resource::<RecordStore>() {
        let geometry = world.resource::<FrameGeometry>();
        d.draw_text(
            &format!(
                "Records: {} active, {} stale, {} drawn",
                store.active_len(),
                store.stale_len(),
                geometry.labels.len()
            ),
            12,
            screen_h - 44,
            18,
            Color::BLACK,
        );
    }

    d.draw_text(
        &format!(
            "Camera: {:.1}, {:.1}, {:.1}",
            camera.position.x, camera.position.y, camera.position.z
        ),
        12,
        screen_h - 22,
        18,
        Color::BLACK,
    );
}
