//! Fragment encoding/decoding
//!
//! One fragment per record; the store body is their concatenation.

use std::collections::HashMap;

use bytes::{BufMut, Bytes, BytesMut};
use serde::{Deserialize, Serialize};

use crate::error::{KvError, Result};

use super::{Document, Record};

/// Separator written after every fragment
const SEPARATOR: u8 = b',';

/// The labeled object half of a fragment, as it is written
#[derive(Debug, Serialize)]
struct FragmentBodyRef<'a> {
    value: &'a Document,
    time: i64,
    #[serde(rename = "validTill")]
    valid_till: i64,
}

/// The labeled object half of a fragment, as it is read back
#[derive(Debug, Deserialize)]
struct FragmentBody {
    value: Document,
    time: i64,
    #[serde(rename = "validTill")]
    valid_till: i64,
}

/// Encode a record into a self-describing fragment, separator included.
///
/// Fails with `ValueTooLarge` when the value's JSON text exceeds
/// `max_value_size` bytes.
pub fn encode(record: &Record, max_value_size: usize) -> Result<Bytes> {
    let value = serde_json::to_vec(&record.value)?;
    if value.len() > max_value_size {
        return Err(KvError::ValueTooLarge {
            size: value.len(),
            limit: max_value_size,
        });
    }

    let key = serde_json::to_vec(&record.key)?;
    let body = serde_json::to_vec(&FragmentBodyRef {
        value: &record.value,
        time: record.ttl_seconds,
        valid_till: record.expires_at,
    })?;

    let mut buf = BytesMut::with_capacity(key.len() + body.len() + 2);
    buf.put_slice(&key);
    buf.put_u8(b':');
    buf.put_slice(&body);
    buf.put_u8(SEPARATOR);

    Ok(buf.freeze())
}

/// Decode a store body (everything after the flag byte) into records.
///
/// Later fragments win when a key repeats, matching append order.
pub fn decode_all(body: &[u8]) -> Result<HashMap<String, Record>> {
    let mut body = body.trim_ascii();
    if let Some(stripped) = body.strip_suffix(&[SEPARATOR]) {
        body = stripped;
    }

    if body.is_empty() {
        return Ok(HashMap::new());
    }

    let mut document = Vec::with_capacity(body.len() + 2);
    document.push(b'{');
    document.extend_from_slice(body);
    document.push(b'}');

    let fragments: HashMap<String, FragmentBody> = serde_json::from_slice(&document)
        .map_err(|e| KvError::CorruptStore(format!("failed to parse store body: {}", e)))?;

    Ok(fragments
        .into_iter()
        .map(|(key, body)| {
            let record = Record {
                key: key.clone(),
                value: body.value,
                ttl_seconds: body.time,
                expires_at: body.valid_till,
            };
            (key, record)
        })
        .collect())
}
