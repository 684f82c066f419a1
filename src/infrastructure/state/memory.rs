//! In-memory State Store
//!
//! Keeps records in a map for embedding and tests. The map lock is only held
//! for a single lookup or insert, never across a compile.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use crate::domain::entities::BuildRecord;
use crate::domain::ports::{StateResult, StateStore};

#[derive(Debug, Default)]
pub struct MemoryStateStore {
    records: Mutex<HashMap<String, BuildRecord>>,
}

impl MemoryStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate the store
    pub fn with_records(records: impl IntoIterator<Item = BuildRecord>) -> Self {
        let map = records
            .into_iter()
            .map(|record| (record.name().to_string(), record))
            .collect();
        Self {
            records: Mutex::new(map),
        }
    }

    pub fn len(&self) -> usize {
        self.records().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records().is_empty()
    }

    fn records(&self) -> MutexGuard<'_, HashMap<String, BuildRecord>> {
        // A panic while holding the guard cannot leave a half-written record:
        // every mutation is a single map operation.
        self.records
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl StateStore for MemoryStateStore {
    fn get(&self, name: &str) -> Option<BuildRecord> {
        self.records().get(name).cloned()
    }

    fn put(&self, record: &BuildRecord) -> StateResult<()> {
        self.records()
            .insert(record.name().to_string(), record.clone());
        Ok(())
    }

    fn delete(&self, name: &str) -> StateResult<()> {
        self.records().remove(name);
        Ok(())
    }

    fn list(&self) -> StateResult<Vec<BuildRecord>> {
        Ok(self.records().values().cloned().collect())
    }
}
