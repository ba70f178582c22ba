//! Index implementation
//!
//! HashMap-based index with RwLock for concurrency.

use std::collections::HashMap;

use parking_lot::RwLock;

use crate::codec::{Document, Record};
use crate::error::{KvError, Result};

use super::Admission;

/// In-memory key → record table
pub struct Index {
    data: RwLock<HashMap<String, Record>>,
}

impl Index {
    /// Create a new empty Index
    pub fn new() -> Self {
        Self::from_records(HashMap::new())
    }

    /// Build an index from decoded records
    pub fn from_records(records: HashMap<String, Record>) -> Self {
        Self {
            data: RwLock::new(records),
        }
    }

    /// Get the value of a record that is live at `now` (read lock)
    pub fn get_live(&self, key: &str, now: i64) -> Option<Document> {
        self.data
            .read()
            .get(key)
            .filter(|record| !record.is_expired(now))
            .map(|record| record.value.clone())
    }

    /// Insert a record unless a live record already holds its key (write lock)
    ///
    /// The existence check and the insert happen under one lock acquisition.
    pub fn admit(&self, record: Record, now: i64) -> Result<Admission> {
        let mut data = self.data.write();

        let admission = match data.get(&record.key) {
            Some(existing) if !existing.is_expired(now) => {
                return Err(KvError::KeyExists(record.key));
            }
            Some(_) => Admission::ReplacedExpired,
            None => Admission::Inserted,
        };

        data.insert(record.key.clone(), record);
        Ok(admission)
    }

    /// Remove a record, expired or not (write lock)
    pub fn remove(&self, key: &str) -> Option<Record> {
        self.data.write().remove(key)
    }

    /// Whether a record live at `now` holds `key`
    pub fn contains_live(&self, key: &str, now: i64) -> bool {
        self.data
            .read()
            .get(key)
            .is_some_and(|record| !record.is_expired(now))
    }

    /// Keys of records live at `now`, sorted
    pub fn live_keys(&self, now: i64) -> Vec<String> {
        let mut keys: Vec<String> = self
            .data
            .read()
            .values()
            .filter(|record| !record.is_expired(now))
            .map(|record| record.key.clone())
            .collect();
        keys.sort();
        keys
    }

    /// Number of records, including expired ones not yet reclaimed
    pub fn len(&self) -> usize {
        self.data.read().len()
    }

    /// Check if the index is empty
    pub fn is_empty(&self) -> bool {
        self.data.read().is_empty()
    }

    /// Clone every record (for compaction)
    pub fn snapshot(&self) -> Vec<Record> {
        self.data.read().values().cloned().collect()
    }
}

impl Default for Index {
    fn default() -> Self {
        Self::new()
    }
}
