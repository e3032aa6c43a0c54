//! Offline notice plumbing.
//!
//! - [`update_offline_notices`] – rotate the [`OfflineNotice`] double buffer
//! - [`collect_offline_notices`] – move new notices into the on-screen [`NoticeLog`]

use bevy_ecs::prelude::*;

use crate::events::notice::OfflineNotice;
use crate::resources::noticelog::NoticeLog;
use crate::resources::worldtime::WorldTime;

/// Rotate the [`OfflineNotice`] double buffer.
///
/// Bevy's [`Messages`] must be updated once per frame; notices older than two
/// updates are dropped.
pub fn update_offline_notices(mut notices: ResMut<Messages<OfflineNotice>>) {
    notices.update();
}

/// Append unread notices to the [`NoticeLog`] and expire old entries.
pub fn collect_offline_notices(
    world_time: Res<WorldTime>,
    mut reader: MessageReader<OfflineNotice>,
    mut log: ResMut<NoticeLog>,
) {
    let now = world_time.now_ms;
    log.expire(now);
    for notice in reader.read() {
        log.push(notice.text.clone(), now);
    }
}
