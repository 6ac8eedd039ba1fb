// src/runner.rs
//
// Offline replay: feed saved markup of the app root through a capture
// session as if the client had rendered it, then export.

use std::error::Error;
use std::fs;
use std::path::PathBuf;

use crate::capture::CaptureSession;
use crate::capture::extract::ROW;
use crate::config::consts::{APP_ROOT_ID, SCROLL_ROW_HEIGHT_PX, STORE_NAME};
use crate::core::Document;
use crate::params::Params;
use crate::progress::Progress;
use crate::store::{MemberStore, RecordSink};
use crate::ui::{ControlPanel, UiController};

pub type Session = CaptureSession<MemberStore, ControlPanel>;

/// Summary of what was produced.
pub struct RunSummary {
    pub captured: usize,
    pub export: PathBuf,
    pub history: Vec<String>,
}

/// Fresh session over an empty `#app` root, already started.
pub fn new_session(params: &Params) -> Session {
    let doc = Document::parse(&format!(r#"<div id="{APP_ROOT_ID}"></div>"#));
    let panel = ControlPanel::new(params.app.capture.max_logs, params.app.export.clone());
    let mut session = CaptureSession::new(doc, params.app.capture.clone(), MemberStore::new(STORE_NAME), panel);
    session.start();
    session
}

/// Swap the app root's content for `markup`, wait for the attach, scroll
/// through every row, and let all passes finish.
pub fn replay_snapshot<S: RecordSink, U: UiController>(
    session: &mut CaptureSession<S, U>,
    markup: &str,
) -> Result<usize, Box<dyn Error>> {
    let app = session
        .document()
        .get_element_by_id(APP_ROOT_ID)
        .ok_or("snapshot host has no #app element")?;
    session.document_mut().replace_children_html(app, markup);

    let attach_delay = session.options().attach_delay_ms;
    session.advance(attach_delay);

    let touched = scroll_rows(session);
    session.settle();
    Ok(touched)
}

/// Touch every row of the attached container the way list virtualisation
/// does on scroll. Returns how many rows were touched.
pub fn scroll_rows<S: RecordSink, U: UiController>(session: &mut CaptureSession<S, U>) -> usize {
    let Some(container) = session.attached_container() else {
        logd!("scroll: nothing attached");
        return 0;
    };
    let rows = session.document().query_selector_all(container, &ROW);
    let doc = session.document_mut();
    for (i, &row) in rows.iter().enumerate() {
        let style = format!("transform: translateY({}px);", i * SCROLL_ROW_HEIGHT_PX);
        doc.set_attribute(row, "style", &style);
    }
    rows.len()
}

/// Top-level runner: replay every snapshot, then export.
/// `progress` can be None (no UI updates) or Some(&mut impl Progress).
pub fn run(
    params: &Params,
    mut progress: Option<&mut dyn Progress>,
) -> Result<RunSummary, Box<dyn Error>> {
    if params.snapshots.is_empty() {
        return Err("No snapshots given".into());
    }
    if let Some(p) = progress.as_deref_mut() { p.begin(params.snapshots.len()); }

    let mut session = new_session(params);

    for (i, path) in params.snapshots.iter().enumerate() {
        let markup = fs::read_to_string(path)
            .map_err(|e| format!("{}: {e}", path.display()))?;
        let rows = replay_snapshot(&mut session, &markup)?;
        logf!("replayed {} ({} rows touched)", path.display(), rows);

        if let Some(p) = progress.as_deref_mut() {
            if session.attached_container().is_none() {
                p.log(&format!("{}: no results container found", path.display()));
            }
            p.item_done(i, session.sink().count());
        }
    }

    let export = session.download(&params.app.export);
    if let Some(p) = progress.as_deref_mut() { p.finish(); }
    let export = export.ok_or("Export failed (see .capture/debug.log)")?;

    let history = session.ui().history.entries().map(|e| e.label.clone()).collect();
    Ok(RunSummary { captured: session.sink().count(), export, history })
}
