//! Field-id registry.
//!
//! Every distinct `(database, series, field)` triple gets a durable 8-byte
//! id, issued from a single counter persisted alongside the index entries
//! that record the mapping. Lookups of known triples are lock-free; only
//! the allocation of a new id serializes on the registry mutex.

use std::sync::{Arc, Mutex};

use prost::Message;
use rocksdb::{WriteBatch, DB};

use crate::error::{Result, StoreError};
use crate::keys;
use crate::protocol::FieldDefinition;
use crate::telemetry::{StoreEvent, StoreEventListener};
use crate::types::{Field, FieldId};

#[derive(Debug)]
pub struct FieldRegistry {
    /// Last issued id. Invariant: never ahead of the persisted counter.
    last_id: Mutex<u64>,
    events: Arc<dyn StoreEventListener>,
}

impl FieldRegistry {
    /// Reads the persisted counter and builds the registry. An absent
    /// counter means no id has ever been issued.
    pub fn load(db: &DB, events: Arc<dyn StoreEventListener>) -> Result<Self> {
        let last_id = match db.get(keys::NEXT_ID_KEY)? {
            Some(bytes) => decode_id(&bytes)?.0,
            None => 0,
        };
        Ok(FieldRegistry {
            last_id: Mutex::new(last_id),
            events,
        })
    }

    /// Returns the id recorded for the triple, without ever allocating.
    pub fn lookup(
        &self,
        db: &DB,
        database: &str,
        series: &str,
        field: &str,
    ) -> Result<Option<FieldId>> {
        let key = keys::field_index_key(database, series, field);
        match db.get(key)? {
            Some(bytes) => Ok(Some(decode_id(&bytes)?)),
            None => Ok(None),
        }
    }

    /// Returns the triple's id, issuing a fresh one on first sight.
    ///
    /// The second element is `true` when the triple was already known.
    /// Allocation persists `{counter, series index, field index}` in one
    /// batch before the id is handed out, so a crash can orphan an id but
    /// never reissue one.
    pub fn get_or_allocate(
        &self,
        db: &DB,
        database: &str,
        series: &str,
        field: &str,
    ) -> Result<(FieldId, bool)> {
        let key = keys::field_index_key(database, series, field);
        if let Some(bytes) = db.get(&key)? {
            return Ok((decode_id(&bytes)?, true));
        }

        let mut last_id = self.last_id.lock()?;
        // Re-check under the lock: a concurrent writer may have allocated
        // this triple between the unlocked read and here.
        if let Some(bytes) = db.get(&key)? {
            return Ok((decode_id(&bytes)?, true));
        }

        let id = FieldId(*last_id + 1);
        let id_bytes = id.to_bytes();
        let mut batch = WriteBatch::default();
        batch.put(keys::NEXT_ID_KEY, id_bytes);
        batch.put(keys::series_index_key(database, series), id_bytes);
        batch.put(&key, id_bytes);
        db.write(batch)?;
        // Advance only after the batch is durable, keeping the in-memory
        // counter at or behind the persisted one.
        *last_id = id.0;
        drop(last_id);

        self.events.on_event(StoreEvent::FieldAllocated {
            database: database.to_string(),
            series: series.to_string(),
            field: field.to_string(),
            id: id.0,
        });
        Ok((id, false))
    }

    /// Loads the definition record written when the field was first seen.
    pub fn definition(&self, db: &DB, id: FieldId) -> Result<FieldDefinition> {
        let bytes = db.get(keys::field_definition_key(id))?.ok_or_else(|| {
            StoreError::Corruption(format!("definition record missing for field id {}", id.0))
        })?;
        Ok(FieldDefinition::decode(bytes.as_slice())?)
    }

    /// Resolves query field names to ids and definitions. Lookup-only: an
    /// unknown name fails the whole resolution and nothing is allocated.
    pub fn resolve_for_query(
        &self,
        db: &DB,
        database: &str,
        series: &str,
        names: &[String],
    ) -> Result<Vec<Field>> {
        let mut fields = Vec::with_capacity(names.len());
        for name in names {
            keys::validate_name(name)?;
            let id = self
                .lookup(db, database, series, name)?
                .ok_or_else(|| StoreError::UnknownField {
                    field: name.clone(),
                    series: series.to_string(),
                })?;
            let definition = self.definition(db, id)?;
            fields.push(Field {
                id,
                name: name.clone(),
                definition,
            });
        }
        Ok(fields)
    }

    /// All series names of a database, from the series-index markers.
    pub fn list_series(&self, db: &DB, database: &str) -> Result<Vec<String>> {
        let prefix = keys::series_index_scan_prefix(database);
        let mut names = Vec::new();
        let mut it = db.raw_iterator();
        it.seek(&prefix);
        while it.valid() {
            let Some(key) = it.key() else { break };
            if !key.starts_with(&prefix) {
                break;
            }
            names.push(String::from_utf8_lossy(&key[prefix.len()..]).into_owned());
            it.next();
        }
        Ok(names)
    }

    /// All field names of a series with their ids, from the field index.
    pub fn list_fields(
        &self,
        db: &DB,
        database: &str,
        series: &str,
    ) -> Result<Vec<(String, FieldId)>> {
        let prefix = keys::field_index_scan_prefix(database, series);
        let mut fields = Vec::new();
        let mut it = db.raw_iterator();
        it.seek(&prefix);
        while it.valid() {
            let (Some(key), Some(value)) = (it.key(), it.value()) else {
                break;
            };
            if !key.starts_with(&prefix) {
                break;
            }
            let name = String::from_utf8_lossy(&key[prefix.len()..]).into_owned();
            fields.push((name, decode_id(value)?));
            it.next();
        }
        Ok(fields)
    }
}

fn decode_id(bytes: &[u8]) -> Result<FieldId> {
    let bytes: [u8; 8] = bytes
        .try_into()
        .map_err(|_| StoreError::Corruption(format!("id record has {} bytes, want 8", bytes.len())))?;
    Ok(FieldId::from_bytes(bytes))
}
