//! # filekv
//!
//! An embedded, single-file key-value store with:
//! - JSON documents addressed by short string keys
//! - Optional per-record time-to-live with lazy expiry
//! - Append-only persistence with threshold-triggered compaction
//! - A lock-flag byte that keeps a second handle off a live store file
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                         Store                               │
//! │            (open / create / read / delete / close)          │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │  FileStore  │          │    Index    │
//!   │   (Mutex)   │          │  (RwLock)   │
//!   └──────┬──────┘          └─────────────┘
//!          │
//!          ▼
//!   ┌─────────────┐
//!   │    Codec    │
//!   │ (fragments) │
//!   └─────────────┘
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use filekv::{Document, Store};
//! use serde_json::json;
//!
//! let store = Store::open_path("data.store")?;
//!
//! let mut value = Document::new();
//! value.insert("name".to_string(), json!("ada"));
//! store.create("user:1", value, 3600)?;
//!
//! let doc = store.read("user:1")?;
//! assert_eq!(doc["name"], "ada");
//!
//! store.close()?;
//! # Ok::<(), filekv::KvError>(())
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod codec;
pub mod storage;
pub mod index;
pub mod engine;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{KvError, Result};
pub use config::Config;
pub use codec::{Document, Record};
pub use engine::Store;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of filekv
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
