//! Reverse multi-field merge scan.
//!
//! A query opens one reverse iterator per requested field, each positioned
//! at the newest entry inside the time range. The loop repeatedly takes the
//! newest `(time, sequence)` pair across all pending entries, assembles one
//! row point from every field sitting exactly at that pair, and steps those
//! iterators back. Fields whose newest entry is older keep it for a later
//! row and contribute a null slot.

use prost::Message;
use rocksdb::DB;

use crate::encoding::{sequence_from_bytes, timestamp_from_bytes, timestamp_to_bytes};
use crate::error::Result;
use crate::keys::{self, MAX_SEQUENCE};
use crate::protocol::FieldValue;
use crate::types::{Field, Point, Timestamp};

/// One captured-but-unconsumed entry of a field iterator.
struct RawFieldValue {
    time: [u8; 8],
    sequence: [u8; 8],
    value: Vec<u8>,
}

/// Scans all fields in reverse and assembles row points in strictly
/// descending `(timestamp, sequence)` order.
///
/// The start bound is exclusive and the end bound inclusive: emitted points
/// satisfy `start_time < ts <= end_time`. Iterator invalidation is the
/// normal termination signal; a value that fails to decode aborts the scan.
///
/// TODO: optimize the single-field case to skip the merge bookkeeping.
pub(crate) fn scan_points(
    db: &DB,
    fields: &[Field],
    start_time: Timestamp,
    end_time: Timestamp,
) -> Result<Vec<Point>> {
    let field_count = fields.len();
    let start_bytes = timestamp_to_bytes(start_time);

    // One snapshot serves every field iterator: the whole scan reads a
    // single consistent view and releases it at once.
    let snapshot = db.snapshot();
    let mut iterators = Vec::with_capacity(field_count);
    for field in fields {
        let mut seek_key = Vec::with_capacity(24);
        seek_key.extend_from_slice(&field.id.to_bytes());
        seek_key.extend_from_slice(&timestamp_to_bytes(end_time));
        seek_key.extend_from_slice(&MAX_SEQUENCE);

        let mut it = snapshot.raw_iterator();
        // Lands on the newest entry at or below (end_time, MAX_SEQUENCE),
        // making the end of the range inclusive.
        it.seek_for_prev(&seek_key);
        iterators.push(it);
    }

    let mut pending: Vec<Option<RawFieldValue>> = Vec::with_capacity(field_count);
    pending.resize_with(field_count, || None);
    let mut points = Vec::new();

    loop {
        // Capture the current entry of every iterator with nothing pending,
        // as long as it still sits inside its field's slice of the range.
        for (i, it) in iterators.iter().enumerate() {
            if pending[i].is_some() || !it.valid() {
                continue;
            }
            let (Some(key), Some(value)) = (it.key(), it.value()) else {
                continue;
            };
            let Some((id, time, sequence)) = keys::split_data_key(key) else {
                continue;
            };
            if id != fields[i].id.to_bytes() || time <= start_bytes {
                continue;
            }
            pending[i] = Some(RawFieldValue {
                time,
                sequence,
                value: value.to_vec(),
            });
        }

        // The next row is the newest pending (time, sequence) pair. No
        // pending entries anywhere means every field is exhausted.
        let Some((latest_time, latest_sequence)) = pending
            .iter()
            .flatten()
            .map(|raw| (raw.time, raw.sequence))
            .max()
        else {
            break;
        };

        let mut values = vec![None; field_count];
        for (i, it) in iterators.iter_mut().enumerate() {
            let contributes = matches!(
                &pending[i],
                Some(raw) if raw.time == latest_time && raw.sequence == latest_sequence
            );
            if !contributes {
                continue;
            }
            if let Some(raw) = pending[i].take() {
                values[i] = Some(FieldValue::decode(raw.value.as_slice())?);
                it.prev();
            }
        }

        points.push(Point::new(
            timestamp_from_bytes(latest_time),
            sequence_from_bytes(latest_sequence),
            values,
        ));
    }

    Ok(points)
}
