//! Storage Module
//!
//! Owns the backing store file and the single-writer flag protocol.
//!
//! ## Responsibilities
//! - Create the store file and stamp the lock flag
//! - Read and flip the lock flag at offset 0
//! - Append encoded fragments
//! - Rewrite the whole file during compaction
//!
//! ## File Format
//! ```text
//! ┌──────────┬───────────────────────────────────────────────┐
//! │ Flag (1) │ Fragments ("<key>":{...},"<key>":{...},...)   │
//! └──────────┴───────────────────────────────────────────────┘
//!   '0' = free
//!   '1' = in use by a live handle
//! ```
//!
//! The flag is an advisory marker, not an OS-level lock: a crash leaves it
//! at `'1'` and the file must be released by hand.

mod file_store;
mod flag;

pub use file_store::FileStore;
pub use flag::{LockFlag, FLAG_OFFSET};
