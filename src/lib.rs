#![doc = r#"
seriate: Time-Series Storage Engine Core in Rust

This crate persists measurement points into an ordered key-value store
(RocksDB) and serves time-range queries against them. Data is organized by
`(database, series, field)`; each such triple gets a compact 8-byte id, and
all data lives in a single globally ordered key space so that range queries
reduce to bounded seeks and reverse scans. It provides:
- Order-preserving key encoding across the full signed timestamp range
- Crash-safe, monotonic field-id allocation serialized across writers
- Atomic per-series write batches
- A multi-field reverse merge scan that reassembles row points
- Thread-safe operation behind a shared handle

Query parsing, clustering, ingestion protocols, and retention are outside
this crate; it is the storage layer those systems sit on.
"#]

// Declare modules
pub mod encoding;
pub mod error;
pub mod fields;
pub mod keys;
pub mod protocol;
pub mod query;
mod scan;
pub mod store;
pub mod telemetry;
pub mod types;
mod write;

/// Main entry point: the storage engine handle.
pub use crate::store::Store;
/// Configuration options for opening a store.
pub use crate::store::StoreConfig;
/// Error type for engine operations.
pub use crate::error::{Result, StoreError};
/// Range query description handed to [`Store::query`].
pub use crate::query::Query;
/// Wire records for stored values and field schemas.
pub use crate::protocol::{FieldDefinition, FieldType, FieldValue};
/// Structured event hook for observability.
pub use crate::telemetry::{StoreEvent, StoreEventListener};
/// Engine data records.
pub use crate::types::{Field, FieldId, Point, SequenceNumber, Series, Timestamp};
