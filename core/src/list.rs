//! The local, in-memory record collection.
//!
//! `RecordList` only knows how to apply confirmed changes; it never talks to
//! the network. Identity is the record `id`, so records that were never
//! persisted (no `id`) cannot be matched by `replace` or `remove`.

use crate::types::{Record, RecordId};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordList {
    records: Vec<Record>,
}

impl RecordList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn as_slice(&self) -> &[Record] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    pub fn get(&self, id: RecordId) -> Option<&Record> {
        self.records.iter().find(|r| r.id == Some(id))
    }

    /// Swap the whole collection for a freshly listed one.
    pub fn replace_all(&mut self, records: Vec<Record>) {
        self.records = records;
    }

    pub fn append(&mut self, record: Record) {
        self.records.push(record);
    }

    /// Replace the entry whose id matches, keeping its position.
    ///
    /// Returns `false` and leaves the list untouched when no entry matches.
    pub fn replace(&mut self, id: RecordId, record: Record) -> bool {
        match self.records.iter_mut().find(|r| r.id == Some(id)) {
            Some(slot) => {
                *slot = record;
                true
            }
            None => false,
        }
    }

    /// Remove every entry with this id. Returns how many were removed.
    pub fn remove(&mut self, id: RecordId) -> usize {
        let before = self.records.len();
        self.records.retain(|r| r.id != Some(id));
        before - self.records.len()
    }
}

impl From<Vec<Record>> for RecordList {
    fn from(records: Vec<Record>) -> Self {
        Self { records }
    }
}

impl<'a> IntoIterator for &'a RecordList {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
