//! Bounded activity history.
//!
//! Purely observational: the engine appends, the presentation layer reads.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Default number of entries retained.
pub const DEFAULT_ACTIVITY_CAPACITY: usize = 10;

/// Kinds of user-visible actions recorded in the log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityAction {
    Submitted,
    Skipped,
    Exported,
    ReportGenerated,
    Cleared,
}

impl std::fmt::Display for ActivityAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            ActivityAction::Submitted => "Completed",
            ActivityAction::Skipped => "Skipped",
            ActivityAction::Exported => "Export",
            ActivityAction::ReportGenerated => "Report",
            ActivityAction::Cleared => "Reset",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityEntry {
    pub timestamp_display: String,
    pub action: ActivityAction,
    pub details: String,
}

/// Newest-first log that evicts the oldest entries beyond its capacity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityLog {
    entries: VecDeque<ActivityEntry>,
    capacity: usize,
}

impl ActivityLog {
    /// Creates an empty log. A zero capacity is raised to one so the most
    /// recent action is always visible.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, entry: ActivityEntry) {
        tracing::info!(
            action = ?entry.action,
            details = %entry.details,
            "activity"
        );
        self.entries.push_front(entry);
        self.entries.truncate(self.capacity);
    }

    /// Drops everything and leaves `entry` as the only record.
    pub fn reset_to(&mut self, entry: ActivityEntry) {
        self.entries.clear();
        self.push(entry);
    }

    /// Most recent entry.
    pub fn latest(&self) -> Option<&ActivityEntry> {
        self.entries.front()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ActivityEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn to_vec(&self) -> Vec<ActivityEntry> {
        self.entries.iter().cloned().collect()
    }
}

impl Default for ActivityLog {
    fn default() -> Self {
        Self::new(DEFAULT_ACTIVITY_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(n: usize) -> ActivityEntry {
        ActivityEntry {
            timestamp_display: "12:00:00".to_string(),
            action: ActivityAction::Skipped,
            details: format!("Item #{} skipped", n),
        }
    }

    #[test]
    fn test_log_is_bounded_and_newest_first() {
        let mut log = ActivityLog::new(3);
        for n in 1..=5 {
            log.push(entry(n));
        }

        assert_eq!(log.len(), 3);
        let details: Vec<&str> = log.iter().map(|e| e.details.as_str()).collect();
        assert_eq!(
            details,
            vec!["Item #5 skipped", "Item #4 skipped", "Item #3 skipped"]
        );
    }

    #[test]
    fn test_reset_to_leaves_single_entry() {
        let mut log = ActivityLog::default();
        log.push(entry(1));
        log.push(entry(2));
        log.reset_to(ActivityEntry {
            timestamp_display: "System Reset".to_string(),
            action: ActivityAction::Cleared,
            details: "All data cleared".to_string(),
        });

        assert_eq!(log.len(), 1);
        assert_eq!(log.latest().map(|e| e.action), Some(ActivityAction::Cleared));
    }

    #[test]
    fn test_zero_capacity_keeps_latest() {
        let mut log = ActivityLog::new(0);
        log.push(entry(1));
        log.push(entry(2));
        assert_eq!(log.len(), 1);
        assert_eq!(log.latest().unwrap().details, "Item #2 skipped");
    }
}
