// src/store.rs
//
// Captured records and the sink they land in.
//
// The sink is keyed by profile id: a second capture of the same id updates
// the stored record instead of appending a duplicate. Every write is tagged
// with the capture batch it came from so a batch can be rolled back later.

use std::collections::HashMap;

use crate::config::consts::EXPORT_HEADERS;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BatchId(pub u64);

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CapturedProfile {
    pub profile_id: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub phone_number: Option<String>,
    pub source: Option<String>,
}

impl CapturedProfile {
    /// Export row, in `EXPORT_HEADERS` order. Missing fields become "".
    pub fn to_row(&self) -> Vec<String> {
        let cell = |v: &Option<String>| v.clone().unwrap_or_default();
        vec![
            cell(&self.phone_number),
            cell(&self.name),
            cell(&self.description),
            cell(&self.source),
        ]
    }
}

pub trait RecordSink {
    /// Store `record` under `id`. An existing id is overwritten only when
    /// `update_if_exists` is set. Returns whether anything was written.
    fn upsert(&mut self, id: &str, record: CapturedProfile, batch: Option<BatchId>, update_if_exists: bool) -> bool;

    /// Remove every record whose latest write came from `batch`.
    fn delete_batch(&mut self, batch: BatchId) -> usize;

    fn clear(&mut self);

    fn count(&self) -> usize;

    /// Header row followed by one row per record.
    fn to_csv_data(&self) -> Vec<Vec<String>>;
}

#[derive(Clone, Debug)]
struct Entry {
    id: String,
    record: CapturedProfile,
    batch: Option<BatchId>,
}

/// In-memory sink. Keeps first-seen order for export.
#[derive(Clone, Debug, Default)]
pub struct MemberStore {
    name: String,
    entries: Vec<Entry>,
    index: HashMap<String, usize>,
}

impl MemberStore {
    pub fn new(name: &str) -> Self {
        Self { name: s!(name), ..Self::default() }
    }

    pub fn get(&self, id: &str) -> Option<&CapturedProfile> {
        self.index.get(id).map(|&i| &self.entries[i].record)
    }

    pub fn batch_of(&self, id: &str) -> Option<BatchId> {
        self.index.get(id).and_then(|&i| self.entries[i].batch)
    }

    fn reindex(&mut self) {
        self.index = self.entries
            .iter()
            .enumerate()
            .map(|(i, e)| (e.id.clone(), i))
            .collect();
    }
}

impl RecordSink for MemberStore {
    fn upsert(&mut self, id: &str, record: CapturedProfile, batch: Option<BatchId>, update_if_exists: bool) -> bool {
        if id.is_empty() {
            logw!("[store:{}] refusing record with empty id", self.name);
            return false;
        }
        match self.index.get(id) {
            Some(&i) => {
                if !update_if_exists { return false; }
                let e = &mut self.entries[i];
                e.record = record;
                e.batch = batch;
            }
            None => {
                self.index.insert(s!(id), self.entries.len());
                self.entries.push(Entry { id: s!(id), record, batch });
            }
        }
        true
    }

    fn delete_batch(&mut self, batch: BatchId) -> usize {
        let before = self.entries.len();
        self.entries.retain(|e| e.batch != Some(batch));
        let removed = before - self.entries.len();
        if removed > 0 { self.reindex(); }
        logd!("[store:{}] batch {} removed {} record(s)", self.name, batch.0, removed);
        removed
    }

    fn clear(&mut self) {
        self.entries.clear();
        self.index.clear();
    }

    fn count(&self) -> usize { self.entries.len() }

    fn to_csv_data(&self) -> Vec<Vec<String>> {
        let mut rows = Vec::with_capacity(self.entries.len() + 1);
        rows.push(EXPORT_HEADERS.iter().map(|h| s!(*h)).collect());
        rows.extend(self.entries.iter().map(|e| e.record.to_row()));
        rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(name: &str, desc: Option<&str>) -> CapturedProfile {
        CapturedProfile {
            profile_id: s!(name),
            name: Some(s!(name)),
            description: desc.map(String::from),
            phone_number: Some(s!(name)),
            source: None,
        }
    }

    #[test]
    fn upsert_same_id_keeps_one_latest_record() {
        let mut store = MemberStore::new("t");
        assert!(store.upsert("Ann", profile("Ann", Some("first")), Some(BatchId(1)), true));
        assert!(store.upsert("Ann", profile("Ann", Some("second")), Some(BatchId(2)), true));
        assert_eq!(store.count(), 1);
        assert_eq!(store.get("Ann").unwrap().description.as_deref(), Some("second"));
        assert_eq!(store.batch_of("Ann"), Some(BatchId(2)));
    }

    #[test]
    fn upsert_without_update_leaves_existing() {
        let mut store = MemberStore::new("t");
        store.upsert("Ann", profile("Ann", Some("first")), None, true);
        assert!(!store.upsert("Ann", profile("Ann", Some("second")), None, false));
        assert_eq!(store.get("Ann").unwrap().description.as_deref(), Some("first"));
    }

    #[test]
    fn empty_id_is_rejected() {
        let mut store = MemberStore::new("t");
        assert!(!store.upsert("", profile("", None), None, true));
        assert_eq!(store.count(), 0);
    }

    #[test]
    fn delete_batch_only_hits_latest_writes() {
        let mut store = MemberStore::new("t");
        store.upsert("Ann", profile("Ann", None), Some(BatchId(1)), true);
        store.upsert("Bob", profile("Bob", None), Some(BatchId(2)), true);
        // Ann re-captured later; batch 1 no longer owns her
        store.upsert("Ann", profile("Ann", None), Some(BatchId(3)), true);

        assert_eq!(store.delete_batch(BatchId(1)), 0);
        assert_eq!(store.delete_batch(BatchId(2)), 1);
        assert!(store.get("Bob").is_none());
        assert!(store.get("Ann").is_some());
        assert_eq!(store.count(), 1);
    }

    #[test]
    fn csv_data_has_header_then_rows_in_capture_order() {
        let mut store = MemberStore::new("t");
        store.upsert("Bob", profile("Bob", Some("On a call")), None, true);
        store.upsert("Ann", profile("Ann", None), None, true);
        let rows = store.to_csv_data();
        assert_eq!(rows[0], ["Phone Number", "Name", "Description", "Source"]);
        assert_eq!(rows[1], ["Bob", "Bob", "On a call", ""]);
        assert_eq!(rows[2], ["Ann", "Ann", "", ""]);
    }
}
