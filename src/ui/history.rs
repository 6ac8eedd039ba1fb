// src/ui/history.rs
use std::collections::VecDeque;

use crate::store::BatchId;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogCategory {
    /// Status line, nothing to undo.
    Log,
    /// A capture; carries the batch it wrote.
    Add,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HistoryEntry {
    pub id: u64,
    pub label: String,
    pub category: LogCategory,
    pub batch: Option<BatchId>,
}

impl HistoryEntry {
    pub fn deletable(&self) -> bool { self.batch.is_some() }
}

/// Newest-first log, capped at `max_logs` visible entries.
#[derive(Clone, Debug)]
pub struct HistoryTracker {
    max_logs: usize,
    next_id: u64,
    entries: VecDeque<HistoryEntry>,
}

impl HistoryTracker {
    pub fn new(max_logs: usize) -> Self {
        Self { max_logs: max_logs.max(1), next_id: 0, entries: VecDeque::new() }
    }

    pub fn add(&mut self, label: &str, category: LogCategory, batch: Option<BatchId>) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.entries.push_front(HistoryEntry { id, label: s!(label), category, batch });
        self.entries.truncate(self.max_logs);
        id
    }

    pub fn remove_batch(&mut self, batch: BatchId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.batch != Some(batch));
        before != self.entries.len()
    }

    pub fn clear(&mut self) { self.entries.clear(); }

    pub fn entries(&self) -> impl Iterator<Item = &HistoryEntry> { self.entries.iter() }

    pub fn len(&self) -> usize { self.entries.len() }
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_newest_within_cap() {
        let mut h = HistoryTracker::new(2);
        h.add("a", LogCategory::Log, None);
        h.add("b", LogCategory::Add, Some(BatchId(1)));
        h.add("c", LogCategory::Add, Some(BatchId(2)));
        let labels: Vec<_> = h.entries().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, ["c", "b"]);
    }

    #[test]
    fn remove_batch_only_touches_that_batch() {
        let mut h = HistoryTracker::new(4);
        h.add("ready", LogCategory::Log, None);
        h.add("x", LogCategory::Add, Some(BatchId(7)));
        assert!(h.remove_batch(BatchId(7)));
        assert!(!h.remove_batch(BatchId(7)));
        assert_eq!(h.len(), 1);
        assert!(!h.entries().next().unwrap().deletable());
    }
}
