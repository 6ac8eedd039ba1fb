// src/ui/mod.rs
//! Headless model of the capture widget: running counter, capture history
//! and the download/reset/delete actions. Nothing here draws anything; a
//! frontend reads `ControlPanel` state and calls into `actions`.

pub mod actions;
pub mod history;
pub mod panel;

pub use history::{HistoryEntry, HistoryTracker, LogCategory};
pub use panel::ControlPanel;

use crate::store::BatchId;

/// What the capture engine tells the widget.
/// Frontends implement this to surface status to users.
pub trait UiController {
    /// One history line. Entries bound to a batch can be deleted later.
    fn log(&mut self, _label: &str, _category: LogCategory, _batch: Option<BatchId>) {}

    /// Refresh the running record count.
    fn set_count(&mut self, _count: usize) {}

    /// Drop the history line(s) for `batch`.
    fn remove_batch(&mut self, _batch: BatchId) {}

    fn clear_logs(&mut self) {}
}
