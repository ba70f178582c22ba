//! Record Codec Module
//!
//! Converts records to and from their on-disk textual form.
//!
//! ## Responsibilities
//! - Encode a single record as an append-friendly fragment
//! - Decode the whole store body back into records
//! - Enforce the per-value size limit
//!
//! ## Fragment Format
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │ "<key>":{"value":<json>,"time":<ttl>,"validTill":<expiry>},  │
//! ├──────────────────────────────────────────────────────────────┤
//! │ "<key>":{"value":<json>,"time":<ttl>,"validTill":<expiry>},  │
//! ├──────────────────────────────────────────────────────────────┤
//! │ ...                                                          │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every fragment ends with a `,`. Dropping the final separator and wrapping
//! the body in `{` `}` yields one JSON object keyed by record key, so a new
//! record is an O(1) append while the whole file stays parseable in one pass.

mod fragment;
mod record;

pub use fragment::{decode_all, encode};
pub use record::{unix_now, Document, Record};
