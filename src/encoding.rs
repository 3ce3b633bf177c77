//! Order-preserving key field encoding.
//!
//! Timestamps are signed but must sort correctly as unsigned big-endian
//! bytes, so they are rebased into the unsigned range before encoding.
//! Sequence numbers are already unsigned. All key fields are 8 bytes wide,
//! which keeps the concatenated data key `(id, timestamp, sequence)` in
//! lexicographic order equal to its numeric order.

use crate::types::{SequenceNumber, Timestamp};

/// Rebase a signed timestamp into the unsigned range.
///
/// Flipping the sign bit maps `i64::MIN..=i64::MAX` onto `0..=u64::MAX`
/// while preserving order; it is the two's-complement form of adding
/// `2^63`.
pub fn shift_timestamp(t: Timestamp) -> u64 {
    (t as u64) ^ (1u64 << 63)
}

/// Inverse of [`shift_timestamp`].
pub fn unshift_timestamp(u: u64) -> Timestamp {
    (u ^ (1u64 << 63)) as i64
}

/// Encode a timestamp as 8 shifted big-endian bytes.
pub fn timestamp_to_bytes(t: Timestamp) -> [u8; 8] {
    shift_timestamp(t).to_be_bytes()
}

/// Decode 8 shifted big-endian bytes back to a signed timestamp.
pub fn timestamp_from_bytes(bytes: [u8; 8]) -> Timestamp {
    unshift_timestamp(u64::from_be_bytes(bytes))
}

/// Encode a sequence number as 8 big-endian bytes.
pub fn sequence_to_bytes(seq: SequenceNumber) -> [u8; 8] {
    seq.to_be_bytes()
}

/// Decode 8 big-endian bytes back to a sequence number.
pub fn sequence_from_bytes(bytes: [u8; 8]) -> SequenceNumber {
    u64::from_be_bytes(bytes)
}
