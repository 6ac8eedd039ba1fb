// src/capture/watcher.rs
//
// The two observation streams. Each watcher only turns raw mutation records
// into intents; scheduling and side effects belong to the session.

use crate::core::{Document, Mutation, NodeId, ObserveConfig, ObserverId};

use super::extract::{self, ROW};

/// Watches the application root for a results/chat-list container showing up.
#[derive(Debug)]
pub struct BodyWatcher {
    observer: ObserverId,
}

impl BodyWatcher {
    pub fn start(doc: &mut Document, root: NodeId) -> Self {
        Self { observer: doc.observe(root, ObserveConfig::ALL) }
    }

    /// Drain pending records; one container per added node that holds one.
    pub fn containers(&self, doc: &mut Document) -> Vec<NodeId> {
        let mut found = Vec::new();
        for m in doc.take_records(self.observer) {
            let Mutation::ChildList { added, .. } = m else { continue; };
            for node in added {
                if let Some(c) = extract::find_container(doc, node) {
                    found.push(c);
                }
            }
        }
        found
    }

    pub fn stop(&self, doc: &mut Document) {
        doc.disconnect(self.observer);
    }
}

/// Watches one sidebar container for attribute changes on rows.
/// `generation` ties scheduled passes back to this watcher.
#[derive(Debug)]
pub struct RowWatcher {
    observer: ObserverId,
    container: NodeId,
    generation: u64,
}

impl RowWatcher {
    pub fn start(doc: &mut Document, container: NodeId, generation: u64) -> Self {
        Self { observer: doc.observe(container, ObserveConfig::ALL), container, generation }
    }

    pub fn container(&self) -> NodeId { self.container }
    pub fn generation(&self) -> u64 { self.generation }

    /// Drain pending records; one entry per attribute change on a row,
    /// duplicates included.
    pub fn touched_rows(&self, doc: &mut Document) -> Vec<NodeId> {
        doc.take_records(self.observer)
            .into_iter()
            .filter_map(|m| match m {
                Mutation::Attributes { target, .. } => Some(target),
                Mutation::ChildList { .. } => None,
            })
            .filter(|&t| ROW.matches(doc, t))
            .collect()
    }

    pub fn stop(&self, doc: &mut Document) {
        doc.disconnect(self.observer);
    }
}
