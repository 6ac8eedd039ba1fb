// src/ui/panel.rs
use super::{HistoryTracker, LogCategory, UiController};
use crate::config::options::ExportOptions;
use crate::store::BatchId;

/// Floating widget state: counter, history and the export settings the
/// download action uses.
#[derive(Clone, Debug)]
pub struct ControlPanel {
    pub history: HistoryTracker,
    pub export: ExportOptions,
    count: usize,
}

impl ControlPanel {
    pub fn new(max_logs: usize, export: ExportOptions) -> Self {
        Self { history: HistoryTracker::new(max_logs), export, count: 0 }
    }

    pub fn count(&self) -> usize { self.count }

    /// Text of the download button.
    pub fn download_label(&self) -> String {
        format!("Download\u{00a0}{}\u{00a0}users", self.count)
    }
}

impl UiController for ControlPanel {
    fn log(&mut self, label: &str, category: LogCategory, batch: Option<BatchId>) {
        self.history.add(label, category, batch);
    }

    fn set_count(&mut self, count: usize) { self.count = count; }

    fn remove_batch(&mut self, batch: BatchId) { self.history.remove_batch(batch); }

    fn clear_logs(&mut self) { self.history.clear(); }
}
