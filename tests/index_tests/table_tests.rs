//! Tests for Index
//!
//! These tests verify:
//! - Admission of new records and rejection of live duplicates
//! - Overwrite of expired records
//! - Lazy expiry on reads
//! - Removal, snapshots and concurrent access

use std::collections::HashMap;
use std::sync::Arc;
use std::thread;

use filekv::codec::{Document, Record};
use filekv::index::{Admission, Index};
use filekv::KvError;
use serde_json::json;

// =============================================================================
// Helper Functions
// =============================================================================

const NOW: i64 = 1_700_000_000;

fn record(key: &str, ttl: i64, written_at: i64) -> Record {
    let mut value = Document::new();
    value.insert("key".to_string(), json!(key));
    Record::new(key, value, ttl, written_at)
}

// =============================================================================
// Admission Tests
// =============================================================================

#[test]
fn test_new_index_is_empty() {
    let index = Index::new();

    assert!(index.is_empty());
    assert_eq!(index.len(), 0);
    assert!(index.get_live("anything", NOW).is_none());
}

#[test]
fn test_admit_inserts() {
    let index = Index::new();

    let admission = index.admit(record("a", 0, NOW), NOW).unwrap();

    assert_eq!(admission, Admission::Inserted);
    assert_eq!(index.len(), 1);
    assert_eq!(index.snapshot(), vec![record("a", 0, NOW)]);
}

#[test]
fn test_admit_rejects_live_duplicate() {
    let index = Index::new();
    index.admit(record("a", 100, NOW), NOW).unwrap();

    let result = index.admit(record("a", 5, NOW), NOW + 10);

    assert!(matches!(result, Err(KvError::KeyExists(key)) if key == "a"));
    assert_eq!(index.snapshot()[0].ttl_seconds, 100);
}

#[test]
fn test_admit_rejects_non_expiring_duplicate() {
    let index = Index::new();
    index.admit(record("a", 0, NOW), NOW).unwrap();

    assert!(index.admit(record("a", 0, NOW), i64::MAX).is_err());
}

#[test]
fn test_admit_replaces_expired() {
    let index = Index::new();
    index.admit(record("a", 10, NOW), NOW).unwrap();

    let later = NOW + 11;
    let admission = index.admit(record("a", 0, later), later).unwrap();

    assert_eq!(admission, Admission::ReplacedExpired);
    assert_eq!(index.len(), 1);
    assert_eq!(index.snapshot()[0].ttl_seconds, 0);
}

// =============================================================================
// Expiry Tests
// =============================================================================

#[test]
fn test_get_live_hides_expired_without_removing() {
    let index = Index::new();
    index.admit(record("a", 10, NOW), NOW).unwrap();

    assert!(index.get_live("a", NOW + 10).is_some());
    assert!(index.get_live("a", NOW + 11).is_none());

    assert_eq!(index.snapshot()[0].key, "a");
    assert!(!index.contains_live("a", NOW + 11));
    assert_eq!(index.len(), 1);
}

#[test]
fn test_live_keys_sorted_and_filtered() {
    let index = Index::new();
    index.admit(record("c", 0, NOW), NOW).unwrap();
    index.admit(record("a", 0, NOW), NOW).unwrap();
    index.admit(record("b", -1, NOW), NOW).unwrap();

    assert_eq!(index.live_keys(NOW), vec!["a".to_string(), "c".to_string()]);
}

// =============================================================================
// Removal / Snapshot Tests
// =============================================================================

#[test]
fn test_remove() {
    let index = Index::new();
    index.admit(record("a", 0, NOW), NOW).unwrap();

    assert!(index.remove("a").is_some());
    assert!(index.remove("a").is_none());
    assert!(index.is_empty());
}

#[test]
fn test_from_records_and_snapshot() {
    let mut records = HashMap::new();
    for key in ["x", "y", "z"] {
        records.insert(key.to_string(), record(key, 0, NOW));
    }

    let index = Index::from_records(records);
    let mut snapshot = index.snapshot();
    snapshot.sort_by(|a, b| a.key.cmp(&b.key));

    assert_eq!(snapshot.len(), 3);
    assert_eq!(snapshot[0].key, "x");
    assert_eq!(snapshot[2], record("z", 0, NOW));
}

// =============================================================================
// Concurrency Tests
// =============================================================================

#[test]
fn test_concurrent_admit_same_key_single_winner() {
    let index = Arc::new(Index::new());

    let mut handles = vec![];
    for _ in 0..8 {
        let index = Arc::clone(&index);
        handles.push(thread::spawn(move || {
            index.admit(record("contended", 0, NOW), NOW).is_ok()
        }));
    }

    let winners = handles
        .into_iter()
        .map(|h| h.join().unwrap())
        .filter(|won| *won)
        .count();

    assert_eq!(winners, 1);
    assert_eq!(index.len(), 1);
}
