//! Last-seen overlay viewer.
//!
//! Opens a raylib window on a simulated world and runs the tracking overlay
//! against it: players wander, log out and log back in, and the overlay marks
//! where each one was last seen with a translucent beam and a floating label.
//!
//! # Main Loop
//!
//! 1. Load the tracker configuration, open the window
//! 2. Start a tracking session and spawn the demo world
//! 3. Each frame:
//!    - advance world time, read the keyboard
//!    - move the viewer and the simulated players, follow with the camera
//!    - run the overlay schedule (notices, reconciliation, geometry)
//!    - present the frame
//! 4. Tear the session down on exit
//!
//! # Running
//!
//! ```sh
//! cargo run --release --features viewer -- --players 12
//! ```
//!
//! WASD moves, arrow keys look around, SPACE/SHIFT fly, F11 toggles the
//! debug overlay.

// Do not create console on Windows
#![cfg_attr(target_os = "windows", windows_subsystem = "windows")]

use std::path::PathBuf;

use bevy_ecs::prelude::*;
use clap::Parser;
use log::{info, warn};

use lastseen::demo::{follow_camera, simulate_players, spawn_demo_world, viewer_controller};
use lastseen::resources::noticelog::NoticeLog;
use lastseen::resources::trackerconfig::TrackerConfig;
use lastseen::session::{add_overlay_systems, init_session, teardown_session};
use lastseen::systems::input::update_viewer_input;
use lastseen::systems::notice::collect_offline_notices;
use lastseen::systems::render::render_frame;
use lastseen::systems::time::update_world_time;

/// Last-seen beacons for players who left the world.
#[derive(Parser)]
#[command(version, about = "Marks where players were last seen before they went offline.")]
struct Cli {
    /// Configuration file to load.
    #[arg(long, value_name = "PATH", default_value = "./lastseen.ini")]
    config: PathBuf,

    /// Number of simulated players besides the viewer.
    #[arg(long, default_value_t = 8)]
    players: usize,

    /// Seed for the player simulation. Random when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Write the effective configuration to the config path and exit.
    #[arg(long)]
    write_config: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = TrackerConfig::with_path(&cli.config);
    if let Err(e) = config.load_from_file() {
        warn!("{}; using defaults", e);
    }

    // Early-exit: write the config file and quit (no window needed)
    if cli.write_config {
        if let Err(e) = config.save_to_file() {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
        println!("Configuration written to {}", config.config_path.display());
        return;
    }

    let seed = cli.seed.unwrap_or_else(|| fastrand::u64(..));
    info!("Demo seed: {}", seed);

    // --------------- Raylib window ---------------
    let (mut rl, thread) = raylib::init()
        .size(config.window_width as i32, config.window_height as i32)
        .resizable()
        .title("Last Seen")
        .build();
    rl.set_target_fps(config.target_fps);
    // Disable ESC to exit
    rl.set_exit_key(None);

    // --------------- ECS world + session ---------------
    let mut world = World::new();
    init_session(&mut world, config);
    spawn_demo_world(&mut world, cli.players, seed);
    world.insert_resource(NoticeLog::default());

    // Host: move the viewer and the simulated players, then the camera.
    let mut host = Schedule::default();
    host.add_systems((viewer_controller, simulate_players, follow_camera).chain());

    let mut overlay = Schedule::default();
    add_overlay_systems(&mut overlay);

    let mut present = Schedule::default();
    present.add_systems(collect_offline_notices);

    // --------------- Main loop ---------------
    while !rl.window_should_close() {
        update_world_time(&mut world, rl.get_frame_time());
        update_viewer_input(&mut world, &rl);

        host.run(&mut world);
        overlay.run(&mut world);
        present.run(&mut world);

        render_frame(&mut world, &mut rl, &thread);
        world.clear_trackers();
    }

    teardown_session(&mut world);
    info!("Bye");
}
