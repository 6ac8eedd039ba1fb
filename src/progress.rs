// src/progress.rs
/// Lightweight progress reporting for replays.
/// Frontends (CLI) implement this to surface status to users.
pub trait Progress {
    /// Called at the start with the number of snapshots.
    fn begin(&mut self, _total: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// One snapshot replayed; `captured` is the running record count.
    fn item_done(&mut self, _index: usize, _captured: usize) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}
