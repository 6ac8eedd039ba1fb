// src/capture/session.rs
//
// One capture session over one host document.
//
// The session owns the body watcher, at most one row watcher, the timer
// queue, the record sink and the widget. Nothing runs on its own: callers
// mutate the document, then `pump` (deliver mutation records) or `advance`
// (deliver records and let virtual time pass so delayed passes fire).
//
// Attaching always detaches first, and detaching cancels the old watcher's
// pending extraction passes. Passes from the live watcher are never
// deduplicated; repeated passes over one row converge through the upsert.

use std::path::PathBuf;

use crate::config::consts::{APP_ROOT_ID, LOG_ACTIVE, LOG_READY};
use crate::config::options::{CaptureOptions, ExportOptions};
use crate::core::{Document, NodeId};
use crate::store::{BatchId, CapturedProfile, RecordSink};
use crate::ui::{self, LogCategory, UiController};

use super::extract;
use super::scheduler::TaskQueue;
use super::watcher::{BodyWatcher, RowWatcher};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Task {
    Attach(NodeId),
    Extract { row: NodeId },
}

pub struct CaptureSession<S: RecordSink, U: UiController> {
    doc: Document,
    opts: CaptureOptions,
    sink: S,
    ui: U,
    queue: TaskQueue<Task>,
    body: Option<BodyWatcher>,
    rows: Option<RowWatcher>,
    next_generation: u64,
    next_batch: u64,
}

impl<S: RecordSink, U: UiController> CaptureSession<S, U> {
    pub fn new(doc: Document, opts: CaptureOptions, sink: S, ui: U) -> Self {
        Self {
            doc,
            opts,
            sink,
            ui,
            queue: TaskQueue::new(),
            body: None,
            rows: None,
            next_generation: 1,
            next_batch: 1,
        }
    }

    /* ---------------- Accessors ---------------- */

    pub fn document(&self) -> &Document { &self.doc }
    pub fn document_mut(&mut self) -> &mut Document { &mut self.doc }
    pub fn sink(&self) -> &S { &self.sink }
    pub fn ui(&self) -> &U { &self.ui }
    pub fn ui_mut(&mut self) -> &mut U { &mut self.ui }
    pub fn options(&self) -> &CaptureOptions { &self.opts }
    pub fn now(&self) -> u64 { self.queue.now() }
    pub fn pending_tasks(&self) -> usize { self.queue.len() }

    /// Container the live row watcher is attached to.
    pub fn attached_container(&self) -> Option<NodeId> {
        self.rows.as_ref().map(|w| w.container())
    }

    pub fn into_parts(self) -> (Document, S, U) {
        (self.doc, self.sink, self.ui)
    }

    /* ---------------- Lifecycle ---------------- */

    /// Greet, hook the app root if present, and attach straight away to a
    /// container that is already on the page.
    pub fn start(&mut self) {
        self.ui.log(LOG_READY, LogCategory::Log, None);
        self.ui.set_count(self.sink.count());

        match self.doc.get_element_by_id(APP_ROOT_ID) {
            Some(app) => self.body = Some(BodyWatcher::start(&mut self.doc, app)),
            None => logd!("no #{} element; body watcher idle", APP_ROOT_ID),
        }

        let root = self.doc.root();
        if let Some(existing) = extract::find_container(&self.doc, root) {
            logf!("container already present at start");
            self.attach(existing);
        }
    }

    /// Tear everything down. Safe to call more than once.
    pub fn stop(&mut self) {
        self.detach();
        if let Some(b) = self.body.take() {
            b.stop(&mut self.doc);
        }
    }

    /// Hook a row watcher onto `container`, replacing any previous one.
    pub fn attach(&mut self, container: NodeId) {
        self.detach();
        let generation = self.next_generation;
        self.next_generation += 1;
        self.rows = Some(RowWatcher::start(&mut self.doc, container, generation));
        logd!(
            "row watcher #{} attached to {:?} ({} observer slot(s))",
            generation, container, self.doc.observer_capacity()
        );
    }

    /// Disconnect the row watcher and cancel its pending passes.
    /// No-op when nothing is attached.
    pub fn detach(&mut self) {
        let Some(w) = self.rows.take() else { return; };
        w.stop(&mut self.doc);
        let dropped = self.queue.cancel_owner(w.generation());
        logd!("row watcher #{} detached, {} pass(es) cancelled", w.generation(), dropped);
    }

    /* ---------------- Event loop ---------------- */

    /// Deliver pending mutation records. Schedules, never extracts.
    pub fn pump(&mut self) {
        if let Some(body) = &self.body {
            for c in body.containers(&mut self.doc) {
                self.queue.schedule(self.opts.attach_delay_ms, None, Task::Attach(c));
            }
        }
        if let Some(w) = &self.rows {
            let owner = Some(w.generation());
            for row in w.touched_rows(&mut self.doc) {
                self.queue.schedule(self.opts.extract_delay_ms, owner, Task::Extract { row });
            }
        }
    }

    /// Let `ms` of virtual time pass, running every task that falls due.
    /// Records produced along the way are pumped before each task.
    /// The clock stops at `u64::MAX` rather than wrapping.
    pub fn advance(&mut self, ms: u64) {
        let until = self.queue.now().saturating_add(ms);
        loop {
            self.pump();
            let Some(task) = self.queue.pop_due(until) else { break; };
            self.run(task);
        }
        self.queue.set_now(until);
    }

    /// Advance until nothing is pending.
    pub fn settle(&mut self) {
        self.pump();
        while let Some(due) = self.queue.next_due() {
            let now = self.queue.now();
            self.advance(due.saturating_sub(now));
        }
    }

    fn run(&mut self, task: Task) {
        match task {
            Task::Attach(container) => {
                if !self.doc.is_connected(container) {
                    logd!("container {:?} gone before attach", container);
                    return;
                }
                self.attach(container);
                self.ui.log(LOG_ACTIVE, LogCategory::Log, None);
            }
            Task::Extract { row } => {
                if let Some(profile) = extract::extract_profile(&self.doc, row) {
                    self.capture(profile);
                }
            }
        }
    }

    fn capture(&mut self, mut profile: CapturedProfile) {
        if profile.source.is_none() {
            profile.source = self.opts.source.clone();
        }
        let batch = BatchId(self.next_batch);
        self.next_batch += 1;

        let label = format!("Capturing {}", profile.name.as_deref().unwrap_or(&profile.profile_id));
        let id = profile.profile_id.clone();
        if !self.sink.upsert(&id, profile, Some(batch), true) {
            return;
        }
        self.ui.log(&label, LogCategory::Add, Some(batch));
        self.ui.set_count(self.sink.count());
    }

    /* ---------------- Widget actions ---------------- */

    pub fn download(&self, export: &ExportOptions) -> Option<PathBuf> {
        ui::actions::download(&self.sink, export)
    }

    pub fn reset(&mut self) {
        ui::actions::reset(&mut self.sink, &mut self.ui);
    }

    pub fn delete_batch(&mut self, batch: BatchId) -> usize {
        ui::actions::delete_batch(&mut self.sink, &mut self.ui, batch)
    }
}
