// src/ui/actions.rs
//
// Button handlers. Each takes the sink and the widget explicitly so the
// capture session and a frontend can both drive them.

use std::path::PathBuf;

use super::UiController;
use crate::config::options::ExportOptions;
use crate::file::{export_timestamp, write_export};
use crate::store::{BatchId, RecordSink};

/// Download: export everything captured so far.
/// Failures go to the diagnostic log only; the user just gets no file.
pub fn download(sink: &dyn RecordSink, export: &ExportOptions) -> Option<PathBuf> {
    let data = sink.to_csv_data();
    match write_export(export, &data, &export_timestamp()) {
        Ok(path) => {
            logf!("Exported {} record(s) to {}", data.len().saturating_sub(1), path.display());
            Some(path)
        }
        Err(e) => {
            loge!("Error while generating export: {e}");
            None
        }
    }
}

/// Reset: empty the sink and the history, zero the counter.
pub fn reset(sink: &mut dyn RecordSink, ui: &mut dyn UiController) {
    sink.clear();
    ui.clear_logs();
    ui.set_count(sink.count());
}

/// History delete affordance: roll back one capture batch.
pub fn delete_batch(sink: &mut dyn RecordSink, ui: &mut dyn UiController, batch: BatchId) -> usize {
    logf!("Delete batch {}", batch.0);
    let removed = sink.delete_batch(batch);
    ui.remove_batch(batch);
    ui.set_count(sink.count());
    removed
}
