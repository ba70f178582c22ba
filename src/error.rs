//! Error types for filekv
//!
//! Provides a unified error type for all store operations.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using KvError
pub type Result<T> = std::result::Result<T, KvError>;

/// Unified error type for filekv operations
#[derive(Debug, Error)]
pub enum KvError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Store State Errors
    // -------------------------------------------------------------------------
    #[error("Store file is corrupt: {0}")]
    CorruptStore(String),

    #[error("Store already in use by another handle: {}", .0.display())]
    StoreInUse(PathBuf),

    #[error("Store file is full: {size} bytes exceeds the {limit} byte limit")]
    StoreFull { size: u64, limit: u64 },

    // -------------------------------------------------------------------------
    // Validation Errors
    // -------------------------------------------------------------------------
    #[error("Key cannot be empty")]
    EmptyKey,

    #[error("Key is {len} characters, limit is {limit}")]
    KeyTooLong { len: usize, limit: usize },

    #[error("Key already present: {0}")]
    KeyExists(String),

    #[error("Key not found: {0}")]
    KeyNotFound(String),

    #[error("Value is {size} bytes serialized, limit is {limit}")]
    ValueTooLarge { size: usize, limit: usize },

    // -------------------------------------------------------------------------
    // Serialization Errors
    // -------------------------------------------------------------------------
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
