//! Engine Module
//!
//! The store handle that coordinates all components.
//!
//! ## Responsibilities
//! - Claim the store file through the lock flag on open, release it on close
//! - Validate keys and values, apply TTL expiry rules
//! - Keep the index and the store file in step
//! - Trigger compaction once enough deletes have piled up

use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;
use tracing::{debug, info, warn};

use crate::codec::{self, unix_now, Document, Record};
use crate::config::Config;
use crate::error::{KvError, Result};
use crate::index::{Admission, Index};
use crate::storage::{FileStore, LockFlag};

/// An open key-value store
///
/// ## Concurrency Model
///
/// - **File mutation** (append/compaction/flag): Serialized by the `file`
///   mutex, held for the whole append or rewrite
/// - **Reads**: Served from the index under its read lock only
///
/// The index is updated before the file mutex is taken, so a concurrent
/// `read` can see a record whose fragment is still being appended.
///
/// `close` consumes the handle; there is no way to use a closed store.
pub struct Store {
    /// Store configuration (path already resolved)
    config: Config,

    /// Backing file (exclusive access needed)
    file: Mutex<FileStore>,

    /// Authoritative in-memory records (internal RwLock)
    index: Index,

    /// Deletes and expired overwrites since the last compaction
    pending_deletes: AtomicU64,
}

impl Store {
    /// Open or create a store with the given config
    ///
    /// On startup:
    /// 1. Resolve the path (empty → `<unix-seconds>.store`)
    /// 2. Open the file, creating it with a free flag if missing
    /// 3. Refuse with `StoreInUse` if the flag is already set
    /// 4. Set the flag and decode the body into the index
    pub fn open(mut config: Config) -> Result<Self> {
        config.path = config.resolved_path();

        let mut file = FileStore::open(&config.path, &config)?;

        if file.read_flag()? == LockFlag::InUse {
            warn!(path = %config.path.display(), "store already in use");
            return Err(KvError::StoreInUse(config.path));
        }

        file.toggle_flag()?;

        let records = match file.read_body().and_then(|body| codec::decode_all(&body)) {
            Ok(records) => records,
            Err(e) => {
                // Leave the file claimable again; nothing was loaded.
                if let Err(release) = file.write_flag(LockFlag::Free) {
                    warn!(error = %release, "failed to release lock flag after load error");
                }
                return Err(e);
            }
        };

        info!(
            path = %config.path.display(),
            records = records.len(),
            "store opened"
        );

        Ok(Self {
            config,
            file: Mutex::new(file),
            index: Index::from_records(records),
            pending_deletes: AtomicU64::new(0),
        })
    }

    /// Open with a path (convenience method)
    ///
    /// Uses default config with the specified file path
    pub fn open_path(path: impl AsRef<Path>) -> Result<Self> {
        Self::open(Config::builder().path(path.as_ref()).build())
    }

    /// Store a new record
    ///
    /// Fails with `KeyExists` while a live record holds the key. An expired
    /// record under the same key is overwritten and its stale fragment is
    /// left for the next compaction.
    ///
    /// If the append fails (`StoreFull`, `Io`) the index keeps the new record
    /// and the file lags behind until the next compaction.
    pub fn create(&self, key: &str, value: Document, ttl_seconds: i64) -> Result<()> {
        self.validate_key(key)?;

        let now = unix_now();
        if self.index.contains_live(key, now) {
            return Err(KvError::KeyExists(key.to_string()));
        }

        let record = Record::new(key, value, ttl_seconds, now);
        let fragment = codec::encode(&record, self.config.max_value_size)?;

        if self.index.admit(record, now)? == Admission::ReplacedExpired {
            self.pending_deletes.fetch_add(1, Ordering::SeqCst);
            debug!(key, "overwrote expired record");
        }

        let mut file = self.file.lock();
        file.append_record(&fragment)?;
        debug!(key, bytes = fragment.len(), "appended record");

        Ok(())
    }

    /// Get a value by key
    ///
    /// Expired records read as absent but stay in the index.
    pub fn read(&self, key: &str) -> Result<Document> {
        self.index
            .get_live(key, unix_now())
            .ok_or_else(|| KvError::KeyNotFound(key.to_string()))
    }

    /// Delete a key
    ///
    /// Expired records can still be deleted. Once pending deletes exceed the
    /// threshold the file is compacted; the counter is reset even when that
    /// compaction fails, and the failure is returned.
    pub fn delete(&self, key: &str) -> Result<()> {
        if self.index.remove(key).is_none() {
            return Err(KvError::KeyNotFound(key.to_string()));
        }

        let pending = self.pending_deletes.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(key, pending, "deleted record");

        if pending > self.config.delete_threshold {
            if let Err(e) = self.compact() {
                self.pending_deletes.store(0, Ordering::SeqCst);
                warn!(error = %e, "threshold compaction failed");
                return Err(e);
            }
        }

        Ok(())
    }

    /// Rewrite the store file to hold exactly the indexed records
    pub fn compact(&self) -> Result<()> {
        let mut file = self.file.lock();

        // Counted deletes were removed from the index before being counted,
        // so the snapshot below already reflects all of them.
        let seen = self.pending_deletes.load(Ordering::SeqCst);
        let records = self.index.snapshot();

        let size = file.replace_all(&records)?;

        let _ = self
            .pending_deletes
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| {
                Some(n.saturating_sub(seen))
            });

        info!(
            path = %file.path().display(),
            records = records.len(),
            bytes = size,
            "store compacted"
        );

        Ok(())
    }

    /// Close the store gracefully
    ///
    /// Compacts if any deletes are pending, then clears the lock flag. If
    /// compaction fails the flag is left set and the error is returned.
    pub fn close(self) -> Result<()> {
        if self.pending_deletes.load(Ordering::SeqCst) > 0 {
            self.compact()?;
        }

        let mut file = self.file.into_inner();
        file.write_flag(LockFlag::Free)?;
        file.sync()?;

        info!(path = %self.config.path.display(), "store closed");
        Ok(())
    }

    fn validate_key(&self, key: &str) -> Result<()> {
        if key.is_empty() {
            return Err(KvError::EmptyKey);
        }

        let len = key.chars().count();
        if len > self.config.max_key_len {
            return Err(KvError::KeyTooLong {
                len,
                limit: self.config.max_key_len,
            });
        }

        Ok(())
    }

    // =========================================================================
    // Accessors (for testing and debugging)
    // =========================================================================

    /// Get the store file path
    pub fn path(&self) -> &Path {
        &self.config.path
    }

    /// Number of records held, including expired ones not yet reclaimed
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Check if the store holds no records
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Whether a live record holds `key`
    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_live(key, unix_now())
    }

    /// Live keys, sorted
    pub fn keys(&self) -> Vec<String> {
        self.index.live_keys(unix_now())
    }

    /// Deletes and expired overwrites since the last compaction
    pub fn pending_deletes(&self) -> u64 {
        self.pending_deletes.load(Ordering::SeqCst)
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }
}
