use crate::protocol::{FieldDefinition, FieldValue};

/// Timestamp type (signed, unit-agnostic: callers pick seconds or microseconds).
pub type Timestamp = i64;

/// Per-point sequence number, the secondary sort key within a field.
pub type SequenceNumber = u64;

/// Compact identifier for one `(database, series, field)` triple.
///
/// Every data key starts with these eight bytes; ids are issued once and
/// never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldId(pub u64);

impl FieldId {
    /// Big-endian key bytes, so numeric order matches byte order.
    pub fn to_bytes(self) -> [u8; 8] {
        self.0.to_be_bytes()
    }

    pub fn from_bytes(bytes: [u8; 8]) -> Self {
        FieldId(u64::from_be_bytes(bytes))
    }
}

/// A single measurement row: one value slot per field of the series,
/// positionally aligned with the series' field definitions. A `None` slot
/// means the point carries no value for that field.
#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    pub timestamp: Timestamp,
    pub sequence_number: SequenceNumber,
    pub values: Vec<Option<FieldValue>>,
}

impl Point {
    pub fn new(
        timestamp: Timestamp,
        sequence_number: SequenceNumber,
        values: Vec<Option<FieldValue>>,
    ) -> Self {
        Point {
            timestamp,
            sequence_number,
            values,
        }
    }
}

/// A batch of points for one series, as handed to `write`, and the shape of
/// each result yielded by `query`.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub name: String,
    pub fields: Vec<FieldDefinition>,
    pub points: Vec<Point>,
}

/// A field resolved against the store: its id plus the definition recorded
/// on first write.
#[derive(Debug, Clone)]
pub struct Field {
    pub id: FieldId,
    pub name: String,
    pub definition: FieldDefinition,
}
