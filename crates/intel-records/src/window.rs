//! Per-commander bounded record window

use game_time::GameTime;
use intel_api::LegalRecord;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// How many records a window retains, most recent first
pub const WINDOW_CAPACITY: usize = 10;

/// Cached state for one commander: the retained records and when they were
/// last refreshed from the remote source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityWindow {
    /// Advances to "now" on every successful refresh, never backwards
    pub last_updated: GameTime,
    /// Most-recent-first; the tail drops off silently beyond capacity
    pub records: VecDeque<LegalRecord>,
}

impl EntityWindow {
    pub fn new(last_updated: GameTime) -> Self {
        Self {
            last_updated,
            records: VecDeque::with_capacity(WINDOW_CAPACITY),
        }
    }

    /// Merge freshly fetched records into the window
    ///
    /// Fetched records are prepended in ascending timestamp order, one at a
    /// time, so the newest of them ends up at index 0 regardless of the
    /// source's ordering; the tail is trimmed to capacity after each insert.
    /// An empty fetch still advances `last_updated`, which suppresses
    /// repeat remote calls for commanders with no recent activity.
    pub fn merge(&mut self, mut fetched: Vec<LegalRecord>, refreshed_at: GameTime) {
        fetched.sort_by_key(|record| record.timestamp);
        for record in fetched {
            self.records.push_front(record);
            self.records.truncate(WINDOW_CAPACITY);
        }
        self.last_updated = self.last_updated.max(refreshed_at);
    }
}
