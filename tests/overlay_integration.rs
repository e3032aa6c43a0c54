//! Overlay tick integration tests: reconciliation, offline notices, geometry
//! and the session lifecycle, driven through real schedules.

use bevy_ecs::prelude::*;
use bevy_ecs::system::SystemState;
use glam::{DVec3, Quat};

use lastseen::components::dimension::Dimension;
use lastseen::components::player::{LocalViewer, Player, TrackedId};
use lastseen::components::worldposition::WorldPosition;
use lastseen::demo::{OVERWORLD, NETHER};
use lastseen::events::notice::OfflineNotice;
use lastseen::events::switchdebug::SwitchDebugEvent;
use lastseen::resources::debugmode::DebugMode;
use lastseen::resources::framegeometry::FrameGeometry;
use lastseen::resources::noticelog::NoticeLog;
use lastseen::resources::reconcileclock::ReconcileClock;
use lastseen::resources::recordstore::RecordStore;
use lastseen::resources::trackerconfig::TrackerConfig;
use lastseen::resources::viewcamera::ViewCamera;
use lastseen::resources::worldtime::WorldTime;
use lastseen::session::{add_overlay_systems, init_session, teardown_session};
use lastseen::systems::geometry::BEAM_VERTEX_COUNT;
use lastseen::systems::notice::collect_offline_notices;

const VIEWER: u128 = 1;
const ALEX: u128 = 2;
const STEVE: u128 = 3;

struct Harness {
    world: World,
    overlay: Schedule,
    notices: SystemState<MessageReader<'static, 'static, OfflineNotice>>,
}

impl Harness {
    fn new(config: TrackerConfig) -> Self {
        let mut world = World::new();
        init_session(&mut world, config);
        world.insert_resource(ViewCamera::new(DVec3::new(0.0, 65.62, 0.0), Quat::IDENTITY));
        let mut overlay = Schedule::default();
        add_overlay_systems(&mut overlay);
        let notices = SystemState::new(&mut world);
        Harness {
            world,
            overlay,
            notices,
        }
    }

    fn spawn_viewer(&mut self, x: f64, y: f64, z: f64, dimension: &str) -> Entity {
        self.world
            .spawn((
                Player::new(TrackedId::from_u128(VIEWER), "You"),
                LocalViewer,
                WorldPosition::new(x, y, z),
                Dimension::new(dimension),
            ))
            .id()
    }

    fn spawn_player(&mut self, id: u128, name: &str, x: f64, y: f64, z: f64, dimension: &str) -> Entity {
        self.world
            .spawn((
                Player::new(TrackedId::from_u128(id), name),
                WorldPosition::new(x, y, z),
                Dimension::new(dimension),
            ))
            .id()
    }

    /// Run one overlay frame at `now_ms`.
    fn tick_at(&mut self, now_ms: u64) {
        {
            let mut time = self.world.resource_mut::<WorldTime>();
            let delta = now_ms.saturating_sub(time.now_ms);
            time.advance_ms(delta);
        }
        self.overlay.run(&mut self.world);
    }

    /// Notices written since the last call.
    fn drain_notices(&mut self) -> Vec<OfflineNotice> {
        let mut reader = self.notices.get_mut(&mut self.world);
        reader.read().cloned().collect()
    }

    fn store(&self) -> &RecordStore {
        self.world.resource::<RecordStore>()
    }

    fn geometry(&self) -> &FrameGeometry {
        self.world.resource::<FrameGeometry>()
    }
}

fn id(n: u128) -> TrackedId {
    TrackedId::from_u128(n)
}

#[test]
fn record_goes_active_then_stale_then_expires() {
    let mut h = Harness::new(TrackerConfig::new());
    h.spawn_viewer(5.0, 64.0, 0.0, OVERWORLD);
    let alex = h.spawn_player(ALEX, "Alex", 0.0, 64.0, 0.0, OVERWORLD);

    h.tick_at(0);
    assert!(h.store().get_active(&id(ALEX)).is_some());
    assert!(h.store().get_active(&id(VIEWER)).is_none());
    assert_eq!(h.store().stale_len(), 0);

    h.world.despawn(alex);
    h.tick_at(6_000);
    assert!(h.store().get_active(&id(ALEX)).is_none());
    let stale = h.store().get_stale(&id(ALEX)).unwrap();
    assert_eq!(stale.position, DVec3::new(0.0, 64.0, 0.0));
    assert_eq!(stale.observed_at, 0);

    let notices = h.drain_notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(
        notices[0].text,
        "[Offline] Alex went offline at 0.0, 64.0, 0.0 (5.0 blocks away)"
    );
    assert_eq!(notices[0].at_ms, 6_000);
    assert_eq!(h.geometry().labels.len(), 1);
    assert_eq!(h.geometry().vertices.len(), BEAM_VERTEX_COUNT);

    h.tick_at(666_001);
    assert!(h.store().snapshot_stale().is_empty());
    assert!(h.geometry().is_empty());
}

#[test]
fn reconcile_waits_for_cooldown() {
    let mut h = Harness::new(TrackerConfig::new());
    h.spawn_viewer(0.0, 64.0, 0.0, OVERWORLD);
    let alex = h.spawn_player(ALEX, "Alex", 3.0, 64.0, 0.0, OVERWORLD);

    h.tick_at(0);
    h.world.despawn(alex);

    // exactly one cooldown later is not yet due
    h.tick_at(5_000);
    assert!(h.store().get_active(&id(ALEX)).is_some());

    h.tick_at(5_001);
    assert!(h.store().get_stale(&id(ALEX)).is_some());
}

#[test]
fn one_notice_per_disappearance() {
    let mut h = Harness::new(TrackerConfig::new());
    h.spawn_viewer(0.0, 64.0, 0.0, OVERWORLD);
    let alex = h.spawn_player(ALEX, "Alex", 3.0, 64.0, 4.0, OVERWORLD);

    h.tick_at(0);
    h.world.despawn(alex);
    let mut total = 0;
    for t in [6_000, 12_000, 18_000] {
        h.tick_at(t);
        total += h.drain_notices().len();
    }

    assert_eq!(total, 1);
    assert_eq!(h.store().stale_len(), 1);
}

#[test]
fn no_viewer_skips_cycle_without_consuming_cooldown() {
    let mut h = Harness::new(TrackerConfig::new());
    h.spawn_player(ALEX, "Alex", 3.0, 64.0, 0.0, OVERWORLD);

    h.tick_at(0);
    assert!(h.store().is_empty());
    assert!(h.world.resource::<ReconcileClock>().last_check_ms.is_none());
    assert!(h.geometry().is_empty());

    h.spawn_viewer(0.0, 64.0, 0.0, OVERWORLD);
    h.tick_at(16);
    assert!(h.store().get_active(&id(ALEX)).is_some());
    assert_eq!(h.world.resource::<ReconcileClock>().last_check_ms, Some(16));
}

#[test]
fn reappearing_player_leaves_stale_map() {
    let mut h = Harness::new(TrackerConfig::new());
    h.spawn_viewer(0.0, 64.0, 0.0, OVERWORLD);
    let alex = h.spawn_player(ALEX, "Alex", 3.0, 64.0, 0.0, OVERWORLD);

    h.tick_at(0);
    h.world.despawn(alex);
    h.tick_at(6_000);
    assert_eq!(h.store().stale_len(), 1);

    h.spawn_player(ALEX, "Alex", 20.0, 64.0, 0.0, OVERWORLD);
    h.tick_at(12_000);
    assert_eq!(h.store().stale_len(), 0);
    let active = h.store().get_active(&id(ALEX)).unwrap();
    assert_eq!(active.position, DVec3::new(20.0, 64.0, 0.0));
    assert_eq!(active.observed_at, 12_000);

    // next frame draws nothing for Alex
    h.tick_at(12_016);
    assert!(h.geometry().is_empty());
}

#[test]
fn other_dimension_is_tracked_but_neither_drawn_nor_announced() {
    let mut h = Harness::new(TrackerConfig::new());
    h.spawn_viewer(0.0, 64.0, 0.0, OVERWORLD);
    let steve = h.spawn_player(STEVE, "Steve", 1.0, 64.0, 1.0, NETHER);

    h.tick_at(0);
    h.world.despawn(steve);
    h.tick_at(6_000);

    assert!(h.store().get_stale(&id(STEVE)).is_some());
    assert!(h.drain_notices().is_empty());
    assert!(h.geometry().is_empty());
}

#[test]
fn far_player_is_not_announced_or_drawn() {
    let mut h = Harness::new(TrackerConfig::new());
    h.spawn_viewer(0.0, 64.0, 0.0, OVERWORLD);
    let alex = h.spawn_player(ALEX, "Alex", 200.0, 64.0, 0.0, OVERWORLD);

    h.tick_at(0);
    h.world.despawn(alex);
    h.tick_at(6_000);

    assert!(h.store().get_stale(&id(ALEX)).is_some());
    assert!(h.drain_notices().is_empty());
    assert!(h.geometry().is_empty());
}

#[test]
fn radius_boundary_is_inclusive_for_drawing() {
    let mut h = Harness::new(TrackerConfig::new());
    let viewer = h.spawn_viewer(0.0, 64.0, 0.0, OVERWORLD);
    let alex = h.spawn_player(ALEX, "Alex", 128.0, 64.0, 0.0, OVERWORLD);

    h.tick_at(0);
    h.world.despawn(alex);
    h.tick_at(6_000);
    assert_eq!(h.drain_notices().len(), 1);
    assert_eq!(h.geometry().labels.len(), 1);

    // stepping back moves the record out of range on the very next frame
    h.world.get_mut::<WorldPosition>(viewer).unwrap().pos.x = -0.5;
    h.tick_at(6_016);
    assert!(h.geometry().is_empty());
    assert_eq!(h.store().stale_len(), 1);
}

#[test]
fn approaching_after_the_fact_draws_without_announcing() {
    let mut h = Harness::new(TrackerConfig::new());
    let viewer = h.spawn_viewer(500.0, 64.0, 0.0, OVERWORLD);
    let alex = h.spawn_player(ALEX, "Alex", 0.0, 64.0, 0.0, OVERWORLD);

    h.tick_at(0);
    h.world.despawn(alex);
    h.tick_at(6_000);
    assert!(h.drain_notices().is_empty());
    assert!(h.geometry().is_empty());

    h.world.get_mut::<WorldPosition>(viewer).unwrap().pos.x = 1.0;
    for t in [6_016, 12_000] {
        h.tick_at(t);
        assert!(h.drain_notices().is_empty());
        assert_eq!(h.geometry().labels.len(), 1);
    }
}

#[test]
fn walking_away_after_the_notice_stays_silent() {
    let mut h = Harness::new(TrackerConfig::new());
    let viewer = h.spawn_viewer(1.0, 64.0, 0.0, OVERWORLD);
    let alex = h.spawn_player(ALEX, "Alex", 0.0, 64.0, 0.0, OVERWORLD);

    h.tick_at(0);
    h.world.despawn(alex);
    h.tick_at(6_000);
    assert_eq!(h.drain_notices().len(), 1);
    assert_eq!(h.geometry().labels.len(), 1);

    h.world.get_mut::<WorldPosition>(viewer).unwrap().pos.x = 500.0;
    for t in [6_016, 12_000, 18_000] {
        h.tick_at(t);
        assert!(h.drain_notices().is_empty());
        assert!(h.geometry().is_empty());
    }

    // coming back draws again, still without a second notice
    h.world.get_mut::<WorldPosition>(viewer).unwrap().pos.x = 1.0;
    h.tick_at(24_000);
    assert!(h.drain_notices().is_empty());
    assert_eq!(h.geometry().labels.len(), 1);
}

#[test]
fn negative_radius_in_config_falls_back_to_default() {
    let mut config = TrackerConfig::new();
    config
        .load_from_str("[tracking]\ncheck_radius = -10\n")
        .unwrap();
    let mut h = Harness::new(config);
    h.spawn_viewer(0.0, 64.0, 0.0, OVERWORLD);
    let alex = h.spawn_player(ALEX, "Alex", 3.0, 64.0, 0.0, OVERWORLD);

    h.tick_at(0);
    h.world.despawn(alex);
    h.tick_at(6_000);

    assert_eq!(h.drain_notices().len(), 1);
    assert_eq!(h.geometry().labels.len(), 1);
}

#[test]
fn geometry_is_camera_relative() {
    let mut h = Harness::new(TrackerConfig::new());
    h.spawn_viewer(1_000_000.0, 64.0, 1_000_000.0, OVERWORLD);
    let alex = h.spawn_player(ALEX, "Alex", 1_000_010.0, 64.0, 1_000_000.0, OVERWORLD);
    h.world.insert_resource(ViewCamera::new(
        DVec3::new(1_000_000.0, 65.62, 1_000_000.0),
        Quat::IDENTITY,
    ));

    h.tick_at(0);
    h.world.despawn(alex);
    h.tick_at(6_000);

    let geometry = h.geometry();
    assert_eq!(geometry.quad_count(), 5);
    for v in &geometry.vertices {
        assert!((v.position.x - 10.0).abs() <= 0.25 + 1e-4);
        assert!(v.position.y >= -1.62 - 1e-4 && v.position.y <= 0.38 + 1e-4);
        assert!(v.position.z.abs() <= 0.25 + 1e-4);
    }
    let anchor = geometry.labels[0].anchor();
    assert!((anchor.y - (2.5 - 1.62)).abs() < 1e-4);
}

#[test]
fn notices_reach_the_log() {
    let mut h = Harness::new(TrackerConfig::new());
    h.world.insert_resource(NoticeLog::default());
    let mut present = Schedule::default();
    present.add_systems(collect_offline_notices);

    h.spawn_viewer(0.0, 64.0, 0.0, OVERWORLD);
    let alex = h.spawn_player(ALEX, "Alex", 3.0, 64.0, 4.0, OVERWORLD);

    h.tick_at(0);
    present.run(&mut h.world);
    h.world.despawn(alex);
    h.tick_at(6_000);
    present.run(&mut h.world);
    h.tick_at(6_016);
    present.run(&mut h.world);

    let log = h.world.resource::<NoticeLog>();
    assert_eq!(log.len(), 1);
    assert!(log.iter().next().unwrap().text.contains("Alex went offline"));
}

#[test]
fn switch_debug_toggles_resource() {
    let mut h = Harness::new(TrackerConfig::new());
    assert!(!h.world.contains_resource::<DebugMode>());

    h.world.trigger(SwitchDebugEvent {});
    h.world.flush();
    assert!(h.world.contains_resource::<DebugMode>());

    h.world.trigger(SwitchDebugEvent {});
    h.world.flush();
    assert!(!h.world.contains_resource::<DebugMode>());
}

#[test]
fn teardown_drops_everything() {
    let mut h = Harness::new(TrackerConfig::new());
    h.spawn_viewer(0.0, 64.0, 0.0, OVERWORLD);
    h.spawn_player(ALEX, "Alex", 3.0, 64.0, 0.0, OVERWORLD);
    h.tick_at(0);

    teardown_session(&mut h.world);

    assert!(!h.world.contains_resource::<RecordStore>());
    assert!(!h.world.contains_resource::<TrackerConfig>());
    assert!(!h.world.contains_resource::<FrameGeometry>());
    assert!(!h.world.contains_resource::<WorldTime>());

    // a new session starts empty and reconciles immediately
    init_session(&mut h.world, TrackerConfig::new());
    h.overlay.run(&mut h.world);
    assert_eq!(h.world.resource::<RecordStore>().active_len(), 1);
}

#[test]
fn custom_config_changes_timing() {
    let mut config = TrackerConfig::new();
    config
        .load_from_str("[tracking]\ncooldown_ms = 100\nretention_ms = 1000\n")
        .unwrap();
    let mut h = Harness::new(config);
    h.spawn_viewer(0.0, 64.0, 0.0, OVERWORLD);
    let alex = h.spawn_player(ALEX, "Alex", 3.0, 64.0, 0.0, OVERWORLD);

    h.tick_at(0);
    h.world.despawn(alex);
    h.tick_at(101);
    assert_eq!(h.store().stale_len(), 1);

    h.tick_at(1_001);
    assert_eq!(h.store().stale_len(), 0);
}
