//! Configuration for filekv
//!
//! Centralized configuration with the store's default limits.

use std::path::PathBuf;

use crate::codec::unix_now;

/// Default number of pending deletes tolerated before an immediate compaction
pub const DEFAULT_DELETE_THRESHOLD: u64 = 256;

/// Default maximum key length, in characters
pub const DEFAULT_MAX_KEY_LEN: usize = 32;

/// Default maximum serialized value size (16 KiB)
pub const DEFAULT_MAX_VALUE_SIZE: usize = 16 * 1024;

/// Default maximum store file size (1 GiB)
pub const DEFAULT_MAX_FILE_SIZE: u64 = 1024 * 1024 * 1024;

/// Main configuration for a filekv store
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Storage Configuration
    // -------------------------------------------------------------------------
    /// Backing store file. An empty path means "generate a timestamped
    /// default" (`<unix-seconds>.store` in the working directory).
    pub path: PathBuf,

    /// fsync after every append and every compaction
    pub sync_writes: bool,

    // -------------------------------------------------------------------------
    // Limits
    // -------------------------------------------------------------------------
    /// Compaction runs once pending deletes exceed this count
    pub delete_threshold: u64,

    /// Maximum key length (in characters)
    pub max_key_len: usize,

    /// Maximum size of a value's serialized JSON text (in bytes)
    pub max_value_size: usize,

    /// Appends are refused once the file has grown past this size (in bytes)
    pub max_file_size: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            path: PathBuf::new(),
            sync_writes: false,
            delete_threshold: DEFAULT_DELETE_THRESHOLD,
            max_key_len: DEFAULT_MAX_KEY_LEN,
            max_value_size: DEFAULT_MAX_VALUE_SIZE,
            max_file_size: DEFAULT_MAX_FILE_SIZE,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// The path the store will actually open.
    ///
    /// Falls back to `<unix-seconds>.store` when `path` is empty.
    pub fn resolved_path(&self) -> PathBuf {
        if self.path.as_os_str().is_empty() {
            PathBuf::from(format!("{}.store", unix_now()))
        } else {
            self.path.clone()
        }
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the store file path
    pub fn path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.path = path.into();
        self
    }

    /// fsync after every write
    pub fn sync_writes(mut self, sync: bool) -> Self {
        self.config.sync_writes = sync;
        self
    }

    /// Set the pending-delete count that triggers compaction
    pub fn delete_threshold(mut self, threshold: u64) -> Self {
        self.config.delete_threshold = threshold;
        self
    }

    /// Set the maximum key length (in characters)
    pub fn max_key_len(mut self, len: usize) -> Self {
        self.config.max_key_len = len;
        self
    }

    /// Set the maximum serialized value size (in bytes)
    pub fn max_value_size(mut self, size: usize) -> Self {
        self.config.max_value_size = size;
        self
    }

    /// Set the maximum store file size (in bytes)
    pub fn max_file_size(mut self, size: u64) -> Self {
        self.config.max_file_size = size;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
