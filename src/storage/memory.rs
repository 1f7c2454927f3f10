use crate::error::Result;
use crate::storage::{ProfileRecord, RecordKind, RecordStore};
use std::sync::RwLock;

/// Insertion-ordered store for tests and one-shot runs
#[derive(Default)]
pub struct InMemoryStore {
    records: RwLock<Vec<ProfileRecord>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RecordStore for InMemoryStore {
    fn put(&self, record: ProfileRecord) -> Result<()> {
        let mut records = self.records.write().unwrap_or_else(|poisoned| poisoned.into_inner());
        match records.iter_mut().find(|existing| existing.id == record.id) {
            Some(existing) => *existing = record,
            None => records.push(record),
        }
        Ok(())
    }

    fn get(&self, kind: RecordKind, id: &str) -> Result<Option<ProfileRecord>> {
        let records = self.records.read().unwrap_or_else(|poisoned| poisoned.into_inner());
        Ok(records
            .iter()
            .find(|record| record.kind == kind && record.id == id)
            .cloned())
    }

    fn list(&self, kind: RecordKind) -> Result<Vec<ProfileRecord>> {
        let records = self.records.read().unwrap_or_else(|poisoned| poisoned.into_inner());
        Ok(records.iter().filter(|record| record.kind == kind).cloned().collect())
    }
}
