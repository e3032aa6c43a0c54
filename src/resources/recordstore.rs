//! Record store for tracked players.
//!
//! The [`RecordStore`] resource keeps the last known position of every player
//! the local viewer has seen, split across two maps:
//!
//! - **active** – players confirmed present by the latest reconciliation cycle
//! - **stale** – players that vanished from the world and are still within the
//!   retention window; these are the ones the overlay draws
//!
//! # Lifecycle
//!
//! ```text
//! Unknown --upsert--> Active --reconcile (absent)--> Stale --evict (age > retention)--> gone
//!                       ^                              |
//!                       +--------upsert (reappears)----+   (fresh record, stale one dropped)
//! ```
//!
//! An id is never in both maps at once. Records are replaced as whole values,
//! never patched field by field, so a reader always sees a consistent record.

use std::fmt;
use std::sync::Arc;

use bevy_ecs::prelude::Resource;
use glam::DVec3;
use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::SmallVec;

use crate::components::dimension::WorldId;
use crate::components::player::TrackedId;

const MS_PER_MINUTE: u64 = 60_000;
const MINUTES_PER_HOUR: u64 = 60;

/// Last known state of one tracked player.
#[derive(Clone, Debug, PartialEq)]
pub struct TrackedRecord {
    pub entity_id: TrackedId,
    pub display_name: Arc<str>,
    /// Position captured together with `world_id` from the same snapshot.
    pub position: DVec3,
    pub world_id: WorldId,
    /// Session time (ms) at which `position` was captured.
    pub observed_at: u64,
}

impl TrackedRecord {
    /// Milliseconds since the position was captured.
    pub fn age(&self, now_ms: u64) -> u64 {
        now_ms.saturating_sub(self.observed_at)
    }

    /// Human readable bucket for the time since the player was last seen.
    pub fn offline_duration(&self, now_ms: u64) -> OfflineDuration {
        OfflineDuration::from_age_ms(self.age(now_ms))
    }
}

/// Coarse "time since last seen" bucket shown on labels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OfflineDuration {
    /// Less than one minute.
    JustNow,
    /// Whole minutes, `1..60`.
    Minutes(u64),
    /// Whole hours, at least 1.
    Hours(u64),
}

impl OfflineDuration {
    pub fn from_age_ms(age_ms: u64) -> Self {
        let minutes = age_ms / MS_PER_MINUTE;
        if minutes < 1 {
            OfflineDuration::JustNow
        } else if minutes < MINUTES_PER_HOUR {
            OfflineDuration::Minutes(minutes)
        } else {
            OfflineDuration::Hours(minutes / MINUTES_PER_HOUR)
        }
    }
}

impl fmt::Display for OfflineDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            OfflineDuration::JustNow => f.write_str("just now"),
            OfflineDuration::Minutes(1) => f.write_str("1 minute ago"),
            OfflineDuration::Minutes(n) => write!(f, "{} minutes ago", n),
            OfflineDuration::Hours(1) => f.write_str("1 hour ago"),
            OfflineDuration::Hours(n) => write!(f, "{} hours ago", n),
        }
    }
}

/// One active -> stale transition produced by [`RecordStore::reconcile`].
#[derive(Clone, Debug, PartialEq)]
pub struct WentStale {
    /// The record as it was moved into the stale map.
    pub record: TrackedRecord,
    /// Session time of the reconciliation cycle that noticed the absence.
    pub at_ms: u64,
}

/// Owner of all tracking records for one session.
#[derive(Resource, Debug, Default)]
pub struct RecordStore {
    active: FxHashMap<TrackedId, TrackedRecord>,
    stale: FxHashMap<TrackedId, TrackedRecord>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite the active record for `id`.
    ///
    /// A stale record for the same id is dropped: a player that reappears gets
    /// a fresh active record.
    pub fn upsert_active(
        &mut self,
        id: TrackedId,
        name: impl Into<Arc<str>>,
        position: DVec3,
        world_id: WorldId,
        now_ms: u64,
    ) {
        self.stale.remove(&id);
        self.active.insert(
            id,
            TrackedRecord {
                entity_id: id,
                display_name: name.into(),
                position,
                world_id,
                observed_at: now_ms,
            },
        );
    }

    /// Move every active record whose id is not in `present` to the stale map.
    ///
    /// Returns one [`WentStale`] per transition, in no particular order.
    pub fn reconcile(
        &mut self,
        present: &FxHashSet<TrackedId>,
        now_ms: u64,
    ) -> SmallVec<[WentStale; 4]> {
        let vanished: SmallVec<[TrackedId; 4]> = self
            .active
            .keys()
            .filter(|id| !present.contains(*id))
            .copied()
            .collect();

        let mut events = SmallVec::new();
        for id in vanished {
            if let Some(record) = self.active.remove(&id) {
                self.stale.insert(id, record.clone());
                events.push(WentStale {
                    record,
                    at_ms: now_ms,
                });
            }
        }
        events
    }

    /// Remove every stale record older than `retention_ms`.
    ///
    /// A record exactly `retention_ms` old is kept. Returns how many were removed.
    pub fn evict_expired(&mut self, now_ms: u64, retention_ms: u64) -> usize {
        let before = self.stale.len();
        self.stale.retain(|_, record| record.age(now_ms) <= retention_ms);
        before - self.stale.len()
    }

    /// Owned copy of every stale record.
    pub fn snapshot_stale(&self) -> Vec<TrackedRecord> {
        self.stale.values().cloned().collect()
    }

    /// Borrowing iterator over stale records, for the per-frame path.
    pub fn iter_stale(&self) -> impl Iterator<Item = &TrackedRecord> {
        self.stale.values()
    }

    pub fn get_active(&self, id: &TrackedId) -> Option<&TrackedRecord> {
        self.active.get(id)
    }

    pub fn get_stale(&self, id: &TrackedId) -> Option<&TrackedRecord> {
        self.stale.get(id)
    }

    pub fn active_len(&self) -> usize {
        self.active.len()
    }

    pub fn stale_len(&self) -> usize {
        self.stale.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty() && self.stale.is_empty()
    }

    /// Drop all records.
    pub fn clear(&mut self) {
        self.active.clear();
        self.stale.clear();
    }
}
