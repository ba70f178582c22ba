//! File Store
//!
//! Byte-level primitives over the backing store file.

use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use bytes::{BufMut, BytesMut};
use tracing::debug;

use crate::codec::{self, Record};
use crate::config::Config;
use crate::error::{KvError, Result};

use super::{LockFlag, FLAG_OFFSET};

/// Owns the OS file handle of a store
///
/// ## Concurrency:
/// - Every method that writes takes `&mut self`; the engine keeps the
///   `FileStore` behind a single mutex, so all file mutation is serialized
/// - Appends seek to the end explicitly instead of relying on `O_APPEND`,
///   which would also redirect the flag write at offset 0
pub struct FileStore {
    /// Path the file was opened at (reused when compaction recreates it)
    path: PathBuf,

    /// Open read/write handle
    file: File,

    /// Appends are refused once the file is larger than this
    max_file_size: u64,

    /// fsync after each append / rewrite
    sync_writes: bool,
}

impl FileStore {
    /// Open the store file, creating it with a free flag if it does not exist
    pub fn open(path: &Path, config: &Config) -> Result<Self> {
        let file = match OpenOptions::new()
            .read(true)
            .write(true)
            .create_new(true)
            .open(path)
        {
            Ok(mut file) => {
                file.write_all(&[LockFlag::Free.as_byte()])?;
                file.sync_all()?;
                debug!(path = %path.display(), "created store file");
                file
            }
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                OpenOptions::new().read(true).write(true).open(path)?
            }
            Err(e) => return Err(e.into()),
        };

        Ok(Self {
            path: path.to_path_buf(),
            file,
            max_file_size: config.max_file_size,
            sync_writes: config.sync_writes,
        })
    }

    /// Read the flag byte at offset 0
    pub fn read_flag(&mut self) -> Result<LockFlag> {
        let mut byte = [0u8; 1];
        self.file.seek(SeekFrom::Start(FLAG_OFFSET))?;
        match self.file.read_exact(&mut byte) {
            Ok(()) => LockFlag::from_byte(byte[0]),
            Err(e) if e.kind() == ErrorKind::UnexpectedEof => Err(KvError::CorruptStore(
                "store file has no lock flag".to_string(),
            )),
            Err(e) => Err(e.into()),
        }
    }

    /// Overwrite the flag byte at offset 0
    pub fn write_flag(&mut self, flag: LockFlag) -> Result<()> {
        self.file.seek(SeekFrom::Start(FLAG_OFFSET))?;
        self.file.write_all(&[flag.as_byte()])?;
        self.maybe_sync()?;
        Ok(())
    }

    /// Flip the flag byte in place and return the new state
    pub fn toggle_flag(&mut self) -> Result<LockFlag> {
        let flag = self.read_flag()?.toggled();
        self.write_flag(flag)?;
        Ok(flag)
    }

    /// Read everything after the flag byte
    pub fn read_body(&mut self) -> Result<Vec<u8>> {
        let mut body = Vec::new();
        self.file.seek(SeekFrom::Start(FLAG_OFFSET + 1))?;
        self.file.read_to_end(&mut body)?;
        Ok(body)
    }

    /// Append an encoded fragment
    ///
    /// The size limit is checked before the write, so one append may carry
    /// the file past the limit; every append after that fails.
    pub fn append_record(&mut self, fragment: &[u8]) -> Result<()> {
        let size = self.size()?;
        if size > self.max_file_size {
            return Err(KvError::StoreFull {
                size,
                limit: self.max_file_size,
            });
        }

        self.file.seek(SeekFrom::End(0))?;
        self.file.write_all(fragment)?;
        self.maybe_sync()?;
        Ok(())
    }

    /// Rewrite the file to hold exactly `records`
    ///
    /// Every fragment is encoded before the old file is removed. Records are
    /// not re-checked against the value limit: the index already holds them.
    /// The old file is then removed and recreated at the same path with the
    /// flag set to in-use, and the handle switches to the new file before
    /// anything is written to it. A crash between the remove and the final
    /// write loses data. Returns the new file size.
    pub fn replace_all(&mut self, records: &[Record]) -> Result<u64> {
        let mut contents = BytesMut::new();
        contents.put_u8(LockFlag::InUse.as_byte());
        for record in records {
            contents.put_slice(&codec::encode(record, usize::MAX)?);
        }

        fs::remove_file(&self.path)?;

        self.file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(true)
            .open(&self.path)?;

        self.file.write_all(&contents)?;
        self.maybe_sync()?;

        self.size()
    }

    /// Force sync to disk
    pub fn sync(&mut self) -> Result<()> {
        self.file.sync_all()?;
        Ok(())
    }

    /// Current file size in bytes
    pub fn size(&self) -> Result<u64> {
        Ok(self.file.metadata()?.len())
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn maybe_sync(&mut self) -> Result<()> {
        if self.sync_writes {
            self.sync()?;
        }
        Ok(())
    }
}
