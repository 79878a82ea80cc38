//! Bounded activity log behind the dashboard's "Live Log" panel.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::Serialize;

pub const DEFAULT_CAPACITY: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogEntry {
    pub at: DateTime<Utc>,
    pub message: String,
}

/// Ring of the most recent entries; the oldest is dropped once full.
#[derive(Debug, Clone, Serialize)]
pub struct ActivityLog {
    entries: VecDeque<LogEntry>,
    #[serde(skip)]
    capacity: usize,
}

impl Default for ActivityLog {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl ActivityLog {
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, message: impl Into<String>) {
        self.push_at(Utc::now(), message);
    }

    pub fn push_at(&mut self, at: DateTime<Utc>, message: impl Into<String>) {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(LogEntry {
            at,
            message: message.into(),
        });
    }

    /// Up to `n` most recent entries, newest first.
    pub fn recent(&self, n: usize) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter().rev().take(n)
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
    fn test_recent_is_newest_first() {
        let mut log = ActivityLog::default();
        log.push("one");
        log.push("two");
        log.push("three");
        let msgs: Vec<_> = log.recent(2).map(|e| e.message.as_str()).collect();
        assert_eq!(msgs, vec!["three", "two"]);
    }

    #[test]
    fn test_capacity_drops_oldest() {
        let mut log = ActivityLog::with_capacity(2);
        log.push("one");
        log.push("two");
        log.push("three");
        assert_eq!(log.len(), 2);
        let msgs: Vec<_> = log.recent(10).map(|e| e.message.as_str()).collect();
        assert_eq!(msgs, vec!["three", "two"]);
    }

    #[test]
    fn test_zero_capacity_still_keeps_latest() {
        let mut log = ActivityLog::with_capacity(0);
        log.push("only");
        log.push("latest");
        assert_eq!(log.len(), 1);
        assert_eq!(log.recent(1).next().unwrap().message, "latest");
    }
}
