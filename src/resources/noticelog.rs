//! Recent offline notices kept on screen by the viewer.

use std::collections::VecDeque;

use bevy_ecs::prelude::Resource;

/// How long a notice stays visible.
pub const NOTICE_DISPLAY_MS: u64 = 8_000;
/// Oldest notices are dropped beyond this many.
pub const NOTICE_CAPACITY: usize = 6;

#[derive(Debug, Clone, PartialEq)]
pub struct LoggedNotice {
    pub text: String,
    pub expires_at_ms: u64,
}

/// Bounded queue of notices currently on screen, oldest first.
#[derive(Resource, Debug, Default)]
pub struct NoticeLog {
    entries: VecDeque<LoggedNotice>,
}

impl NoticeLog {
    pub fn push(&mut self, text: impl Into<String>, now_ms: u64) {
        if self.entries.len() == NOTICE_CAPACITY {
            self.entries.pop_front();
        }
        self.entries.push_back(LoggedNotice {
            text: text.into(),
            expires_at_ms: now_ms + NOTICE_DISPLAY_MS,
        });
    }

    /// Drop notices whose display time is over.
    pub fn expire(&mut self, now_ms: u64) {
        self.entries.retain(|n| n.expires_at_ms > now_ms);
    }

    pub fn iter(&self) -> impl Iterator<Item = &LoggedNotice> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capacity_drops_oldest() {
        let mut log = NoticeLog::default();
        for i in 0..NOTICE_CAPACITY + 2 {
            log.push(format!("n{}", i), 0);
        }
        assert_eq!(log.len(), NOTICE_CAPACITY);
        assert_eq!(log.iter().next().unwrap().text, "n2");
    }

    #[test]
    fn notices_expire_after_display_time() {
        let mut log = NoticeLog::default();
        log.push("a", 1_000);
        log.expire(1_000 + NOTICE_DISPLAY_MS - 1);
        assert_eq!(log.len(), 1);
        log.expire(1_000 + NOTICE_DISPLAY_MS);
        assert!(log.is_empty());
    }
}
