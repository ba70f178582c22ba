//! Lock flag byte

use crate::error::{KvError, Result};

/// Offset of the flag byte within the store file
pub const FLAG_OFFSET: u64 = 0;

/// Ownership state recorded in the first byte of the store file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockFlag {
    /// `'0'`: no live handle owns the file
    Free,

    /// `'1'`: a live handle owns the file
    InUse,
}

impl LockFlag {
    /// The on-disk byte for this flag
    pub fn as_byte(self) -> u8 {
        match self {
            LockFlag::Free => b'0',
            LockFlag::InUse => b'1',
        }
    }

    /// Parse the on-disk byte
    pub fn from_byte(byte: u8) -> Result<Self> {
        match byte {
            b'0' => Ok(LockFlag::Free),
            b'1' => Ok(LockFlag::InUse),
            other => Err(KvError::CorruptStore(format!(
                "invalid lock flag byte 0x{:02x}",
                other
            ))),
        }
    }

    /// The opposite state
    pub fn toggled(self) -> Self {
        match self {
            LockFlag::Free => LockFlag::InUse,
            LockFlag::InUse => LockFlag::Free,
        }
    }
}
