//! Index Module
//!
//! In-memory mapping from key to record; the authoritative read path.
//!
//! ## Responsibilities
//! - Serve reads without touching the store file
//! - Admit new records (rejecting live duplicates atomically)
//! - Hand out snapshots for compaction
//!
//! ## Data Structure Choice
//! `HashMap` wrapped in a `parking_lot::RwLock`:
//! - Point lookups only, no ordering needed on the hot path
//! - Many concurrent readers, one writer at a time
//! - Expired records stay in the map until overwritten or deleted (lazy expiry)

mod table;

pub use table::Index;

/// How `Index::admit` placed a record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// The key was not present
    Inserted,

    /// The key held an expired record, which was overwritten
    ReplacedExpired,
}
