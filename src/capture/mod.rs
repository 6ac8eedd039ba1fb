// src/capture/mod.rs
//! Mutation-driven contact capture.
//!
//! ```text
//! #app child-list → BodyWatcher → (attach delay) → RowWatcher on container
//! row attribute change → RowWatcher → (extract delay) → extract::extract_profile
//!                                                     ↘ RecordSink::upsert + UiController
//! ```
//! `extract` is pure; `session` owns time, watchers and side effects.

pub mod extract;
pub mod scheduler;
pub mod session;
pub mod watcher;

pub use extract::{classify, extract_profile, RowClass};
pub use session::CaptureSession;
