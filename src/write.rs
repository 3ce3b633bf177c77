//! Write path: one atomic batch per series write.
//!
//! Data entries for every supplied `(point, field)` pair and the definition
//! records of first-seen fields commit together; readers observe the whole
//! batch or none of it.

use prost::Message;
use rocksdb::{WriteBatch, DB};

use crate::error::Result;
use crate::fields::FieldRegistry;
use crate::keys;
use crate::types::Series;

/// Assembles and commits the batch for one series write.
pub(crate) fn write_series(
    db: &DB,
    registry: &FieldRegistry,
    database: &str,
    series: &Series,
) -> Result<()> {
    keys::validate_name(database)?;
    keys::validate_name(&series.name)?;
    for definition in &series.fields {
        keys::validate_name(&definition.name)?;
    }

    let mut batch = WriteBatch::default();

    for (field_index, definition) in series.fields.iter().enumerate() {
        let (id, already_present) =
            registry.get_or_allocate(db, database, &series.name, &definition.name)?;
        if !already_present {
            batch.put(keys::field_definition_key(id), definition.encode_to_vec());
        }
        for point in &series.points {
            let value = match point.values.get(field_index) {
                Some(Some(value)) => value,
                // Nothing supplied for this field: no entry.
                _ => continue,
            };
            let key = keys::data_key(id, point.timestamp, point.sequence_number);
            batch.put(key, value.encode_to_vec());
        }
    }

    db.write(batch)?;
    Ok(())
}
