//! Key-space layout.
//!
//! A single ordered key space holds everything. Data keys start with an
//! 8-byte field id; the bottom and top of the id range are reserved for
//! metadata, so data ids run from 1 to `2^64 - 9`:
//!
//! | first 8 bytes            | payload in key suffix       | value                  |
//! |--------------------------|-----------------------------|------------------------|
//! | `00 .. 00`               | (none)                      | last issued id (BE u64)|
//! | `FF .. FD`               | ASCII `db~series~field`     | 8-byte field id        |
//! | `FF .. FE`               | 8-byte field id             | field definition bytes |
//! | `FF .. FF`               | ASCII `db~series`           | 8-byte field id        |
//! | anything else            | shifted ts ∥ sequence       | field value bytes      |
//!
//! Index payloads join name components with `~`, so names may not contain
//! it; [`validate_name`] enforces that at the API boundary.

use crate::encoding::{sequence_to_bytes, timestamp_to_bytes};
use crate::error::{Result, StoreError};
use crate::types::{FieldId, SequenceNumber, Timestamp};

/// Key of the durable next-id counter.
pub const NEXT_ID_KEY: [u8; 8] = [0x00; 8];

/// Prefix of `db~series~field → id` index entries.
pub const FIELD_INDEX_PREFIX: [u8; 8] = [0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFD];

/// Prefix of `id → field definition` records.
pub const FIELD_DEFINITION_PREFIX: [u8; 8] = [0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFE];

/// Prefix of `db~series → id` series-exists markers.
pub const SERIES_INDEX_PREFIX: [u8; 8] = [0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF];

/// Largest encodable sequence, used to seek to the top of a timestamp.
pub const MAX_SEQUENCE: [u8; 8] = [0xFF; 8];

/// Separator between name components in index key payloads.
const SEPARATOR: char = '~';

/// Rejects names that would be ambiguous inside index keys.
pub fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() || name.contains(SEPARATOR) {
        return Err(StoreError::InvalidName(name.to_string()));
    }
    Ok(())
}

/// Data key for one `(field, timestamp, sequence)` entry: 24 bytes.
pub fn data_key(id: FieldId, timestamp: Timestamp, sequence: SequenceNumber) -> [u8; 24] {
    let mut key = [0u8; 24];
    key[..8].copy_from_slice(&id.to_bytes());
    key[8..16].copy_from_slice(&timestamp_to_bytes(timestamp));
    key[16..].copy_from_slice(&sequence_to_bytes(sequence));
    key
}

/// Splits a raw key into `(id bytes, time bytes, sequence bytes)`.
/// Returns `None` for keys that are not data entries.
pub fn split_data_key(key: &[u8]) -> Option<([u8; 8], [u8; 8], [u8; 8])> {
    if key.len() != 24 {
        return None;
    }
    let mut id = [0u8; 8];
    let mut time = [0u8; 8];
    let mut sequence = [0u8; 8];
    id.copy_from_slice(&key[..8]);
    time.copy_from_slice(&key[8..16]);
    sequence.copy_from_slice(&key[16..]);
    Some((id, time, sequence))
}

/// Index key mapping a `(database, series, field)` triple to its id.
pub fn field_index_key(database: &str, series: &str, field: &str) -> Vec<u8> {
    let mut key = Vec::with_capacity(8 + database.len() + series.len() + field.len() + 2);
    key.extend_from_slice(&FIELD_INDEX_PREFIX);
    key.extend_from_slice(database.as_bytes());
    key.push(SEPARATOR as u8);
    key.extend_from_slice(series.as_bytes());
    key.push(SEPARATOR as u8);
    key.extend_from_slice(field.as_bytes());
    key
}

/// Key of the definition record for a field id.
pub fn field_definition_key(id: FieldId) -> [u8; 16] {
    let mut key = [0u8; 16];
    key[..8].copy_from_slice(&FIELD_DEFINITION_PREFIX);
    key[8..].copy_from_slice(&id.to_bytes());
    key
}

/// Series-exists marker key for a `(database, series)` pair.
pub fn series_index_key(database: &str, series: &str) -> Vec<u8> {
    let mut key = Vec::with_capacity(8 + database.len() + series.len() + 1);
    key.extend_from_slice(&SERIES_INDEX_PREFIX);
    key.extend_from_slice(database.as_bytes());
    key.push(SEPARATOR as u8);
    key.extend_from_slice(series.as_bytes());
    key
}

/// Prefix under which all series-index entries of one database sort.
pub fn series_index_scan_prefix(database: &str) -> Vec<u8> {
    let mut prefix = Vec::with_capacity(8 + database.len() + 1);
    prefix.extend_from_slice(&SERIES_INDEX_PREFIX);
    prefix.extend_from_slice(database.as_bytes());
    prefix.push(SEPARATOR as u8);
    prefix
}

/// Prefix under which all field-index entries of one series sort.
pub fn field_index_scan_prefix(database: &str, series: &str) -> Vec<u8> {
    let mut prefix = Vec::with_capacity(8 + database.len() + series.len() + 2);
    prefix.extend_from_slice(&FIELD_INDEX_PREFIX);
    prefix.extend_from_slice(database.as_bytes());
    prefix.push(SEPARATOR as u8);
    prefix.extend_from_slice(series.as_bytes());
    prefix.push(SEPARATOR as u8);
    prefix
}
