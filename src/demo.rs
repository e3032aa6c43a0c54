//! Simulated host world.
//!
//! Stands in for a game client so the overlay can be run and tested without
//! one: a local viewer that walks around, and a handful of players that wander
//! and log out and back in at random. Logged-out players are despawned and
//! parked in [`DemoRoster`]; logging back in respawns them with the same id.

use std::f32::consts::FRAC_PI_2;

use bevy_ecs::prelude::*;
use glam::{DVec3, Quat, Vec3};
use log::info;

use crate::components::dimension::Dimension;
use crate::components::player::{LocalViewer, Player, TrackedId};
use crate::components::worldposition::WorldPosition;
use crate::resources::input::ViewerInput;
use crate::resources::viewcamera::ViewCamera;
use crate::resources::worldtime::WorldTime;

pub const OVERWORLD: &str = "overworld";
pub const NETHER: &str = "the_nether";

/// Eye height above the feet position.
pub const EYE_HEIGHT: f64 = 1.62;
const GROUND_Y: f64 = 64.0;
const SPAWN_SPREAD: f64 = 40.0;
const WANDER_SPEED: f64 = 2.0;
const WALK_SPEED: f32 = 8.0;
const TURN_SPEED: f32 = 1.8;
/// Chance per second that an online player logs out.
const LOGOUT_RATE: f64 = 0.03;
/// Chance per second that an offline player logs back in.
const LOGIN_RATE: f64 = 0.02;
const MAX_PITCH: f32 = FRAC_PI_2 - 0.05;

const NAMES: [&str; 12] = [
    "Alex", "Steve", "Noor", "Kai", "Mira", "Tomas", "Yuki", "Ines", "Ravi", "Olek", "Zara",
    "Finn",
];

/// Heading of the local viewer, in radians.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct ViewerHeading {
    pub yaw: f32,
    pub pitch: f32,
}

/// A player that is currently logged out of the simulated world.
#[derive(Debug, Clone)]
pub struct ParkedPlayer {
    pub player: Player,
    pub position: WorldPosition,
    pub dimension: Dimension,
}

/// Simulation state for the demo world.
#[derive(Resource, Debug)]
pub struct DemoRoster {
    pub offline: Vec<ParkedPlayer>,
    pub rng: fastrand::Rng,
}

impl DemoRoster {
    pub fn new(seed: u64) -> Self {
        DemoRoster {
            offline: Vec::new(),
            rng: fastrand::Rng::with_seed(seed),
        }
    }
}

fn player_name(index: usize) -> String {
    let base = NAMES[index % NAMES.len()];
    match index / NAMES.len() {
        0 => base.to_string(),
        n => format!("{}{}", base, n + 1),
    }
}

/// Spawn the local viewer and `players` simulated players.
///
/// The last simulated player (when there are at least two) spawns in the
/// nether so the dimension filter has something to hide. Returns the viewer
/// entity.
pub fn spawn_demo_world(world: &mut World, players: usize, seed: u64) -> Entity {
    let mut roster = DemoRoster::new(seed);

    let viewer = world
        .spawn((
            Player::new(TrackedId::new_random(), "You"),
            WorldPosition::new(0.0, GROUND_Y, 0.0),
            Dimension::new(OVERWORLD),
            LocalViewer,
        ))
        .id();

    for index in 0..players {
        let x = (roster.rng.f64() * 2.0 - 1.0) * SPAWN_SPREAD;
        let z = (roster.rng.f64() * 2.0 - 1.0) * SPAWN_SPREAD;
        let dimension = if players > 1 && index == players - 1 {
            NETHER
        } else {
            OVERWORLD
        };
        world.spawn((
            Player::new(TrackedId::new_random(), player_name(index)),
            WorldPosition::new(x, GROUND_Y, z),
            Dimension::new(dimension),
        ));
    }
    info!("Spawned demo world with {} simulated players", players);

    world.insert_resource(roster);
    world.insert_resource(ViewerHeading::default());
    world.insert_resource(ViewerInput::default());
    world.insert_resource(ViewCamera::new(
        DVec3::new(0.0, GROUND_Y + EYE_HEIGHT, 0.0),
        Quat::IDENTITY,
    ));
    viewer
}

/// Wander online players and log players out and in at random.
pub fn simulate_players(
    world_time: Res<WorldTime>,
    mut roster: ResMut<DemoRoster>,
    mut query: Query<(Entity, &Player, &mut WorldPosition, &Dimension), Without<LocalViewer>>,
    mut commands: Commands,
) {
    let dt = world_time.delta_ms as f64 / 1000.0;
    if dt <= 0.0 {
        return;
    }
    let roster = &mut *roster;

    for (entity, player, mut position, dimension) in query.iter_mut() {
        let step = DVec3::new(roster.rng.f64() * 2.0 - 1.0, 0.0, roster.rng.f64() * 2.0 - 1.0);
        position.pos += step * WANDER_SPEED * dt;

        if roster.rng.f64() < LOGOUT_RATE * dt {
            info!("[demo] {} logs out", player.name);
            roster.offline.push(ParkedPlayer {
                player: player.clone(),
                position: *position,
                dimension: dimension.clone(),
            });
            commands.entity(entity).despawn();
        }
    }

    let mut index = 0;
    while index < roster.offline.len() {
        if roster.rng.f64() < LOGIN_RATE * dt {
            let parked = roster.offline.swap_remove(index);
            info!("[demo] {} logs back in", parked.player.name);
            commands.spawn((parked.player, parked.position, parked.dimension));
        } else {
            index += 1;
        }
    }
}

/// Move and turn the local viewer from [`ViewerInput`].
pub fn viewer_controller(
    world_time: Res<WorldTime>,
    input: Res<ViewerInput>,
    mut heading: ResMut<ViewerHeading>,
    mut viewer: Query<&mut WorldPosition, With<LocalViewer>>,
) {
    let dt = world_time.delta_ms as f32 / 1000.0;
    if input.is_idle() || dt <= 0.0 {
        return;
    }
    heading.yaw += input.turn * TURN_SPEED * dt;
    heading.pitch = (heading.pitch + input.look * TURN_SPEED * dt).clamp(-MAX_PITCH, MAX_PITCH);

    let Ok(mut position) = viewer.single_mut() else {
        return;
    };
    let yaw = Quat::from_rotation_y(heading.yaw);
    let forward = yaw * Vec3::NEG_Z;
    let right = yaw * Vec3::X;
    let motion = (forward * input.forward + right * input.strafe + Vec3::Y * input.lift)
        * WALK_SPEED
        * dt;
    position.pos += motion.as_dvec3();
}

/// Place the camera at the viewer's eyes, looking along the heading.
pub fn follow_camera(
    heading: Res<ViewerHeading>,
    viewer: Query<&WorldPosition, With<LocalViewer>>,
    mut camera: ResMut<ViewCamera>,
) {
    let Ok(position) = viewer.single() else {
        return;
    };
    let eye = position.pos + DVec3::new(0.0, EYE_HEIGHT, 0.0);
    *camera = ViewCamera::from_yaw_pitch(eye, heading.yaw, heading.pitch);
}
